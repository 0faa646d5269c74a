//! FILENAME: core/ticker-source/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ticker service responded with status {0}")]
    Status(u16),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed ticker payload: {0}")]
    Malformed(String),
}
