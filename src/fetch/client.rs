use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Lets tests and wrappers stand in for the
/// network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Plain `reqwest` client: one attempt, no timeout, no extra headers.
#[derive(Default)]
pub struct BasicClient {
    inner: reqwest::Client,
}

impl BasicClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<reqwest::Client> for BasicClient {
    fn from(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.inner.execute(req).await
    }
}
