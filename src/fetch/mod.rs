//! Loading the raw CSV text from a URL or a local file.

mod client;

pub use client::{BasicClient, HttpClient};

use anyhow::{Context, Result};
use bytes::Bytes;
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

/// Issues a single GET and returns the body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?)
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads `source` (URL or path) into text. `.gz` sources are decompressed;
/// invalid UTF-8 is replaced rather than rejected and a leading BOM is dropped.
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<String> {
    let raw: Bytes = if is_remote(source) {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("failed to fetch {source}"))?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read {source}"))?
            .into()
    };
    debug!(source, bytes = raw.len(), "Source loaded");

    let raw = if source.ends_with(".gz") {
        gunzip(&raw).with_context(|| format!("failed to decompress {source}"))?
    } else {
        raw.to_vec()
    };

    let text = String::from_utf8_lossy(&raw);
    let text: &str = &text;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

fn gunzip(raw: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(raw).read_to_end(&mut out)?;
    Ok(out)
}
