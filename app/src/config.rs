//! FILENAME: app/src/config.rs
// PURPOSE: Runtime configuration (endpoint, timeout, log file).
// CONTEXT: Defaults, then an optional JSON document, then environment
//          variables. Later layers override earlier ones field by field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use ticker_source::DEFAULT_TICKERS_URL;

pub const ENV_URL: &str = "TICKER_VIEW_URL";
pub const ENV_TIMEOUT_SECS: &str = "TICKER_VIEW_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "TICKER_VIEW_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Ticker endpoint returning the `{"data": [...]}` envelope
    pub tickers_url: String,
    /// Whole-request timeout for a single fetch
    pub request_timeout_secs: u64,
    /// Unified log file; console only when unset
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tickers_url: DEFAULT_TICKERS_URL.to_string(),
            request_timeout_secs: 15,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid config: {}", e))
    }

    /// Defaults, overlaid with `path` (if given) and then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config {:?}: {}", path, e))?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// Unparseable timeouts are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_URL).filter(|u| !u.trim().is_empty()) {
            self.tickers_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse().ok()) {
            self.request_timeout_secs = secs;
        }
        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            self.log_file = Some(PathBuf::from(path));
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
