//! FILENAME: core/ticker-source/src/http.rs
//! PURPOSE: Fetches the ticker list over HTTP.

use crate::error::SourceError;
use crate::payload::parse_tickers;
use crate::TickerSource;
use reqwest::Client;
use std::time::Duration;
use view_engine::Record;

/// Ticker source backed by a single GET endpoint.
#[derive(Debug, Clone)]
pub struct HttpTickerSource {
    client: Client,
    url: String,
}

impl HttpTickerSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTickerSource {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TickerSource for HttpTickerSource {
    async fn fetch_tickers(&self) -> Result<Vec<Record>, SourceError> {
        log::debug!("GET {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("ticker request to {} failed with {}", self.url, status);
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let records = parse_tickers(&body)?;
        log::debug!("parsed {} tickers ({} bytes)", records.len(), body.len());
        Ok(records)
    }
}
