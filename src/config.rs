//! Runtime settings read from the environment (and `.env`, loaded by the binary).

pub const DEFAULT_SOURCE: &str = "data.csv";
pub const DEFAULT_LOG_FILE: &str = "logs/direction_stats.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL or path of the score CSV (`STATS_SOURCE`).
    pub source: String,
    /// JSON log file, rotated daily (`LOG_FILE_PATH`).
    pub log_file_path: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults for
    /// missing or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            source: get("STATS_SOURCE", DEFAULT_SOURCE),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE),
        }
    }
}
