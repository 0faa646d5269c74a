//! FILENAME: core/ticker-source/src/lib.rs
//! Ticker data source.
//!
//! Supplies the raw dataset for the view engine once per load cycle:
//! an HTTP source for the live service and a static source for tests
//! and offline use. Any failure is a `SourceError`, whose message becomes
//! the user-facing load failure.

mod error;
mod http;
mod payload;

pub use error::SourceError;
pub use http::HttpTickerSource;
pub use payload::parse_tickers;

use std::future::Future;
use view_engine::Record;

/// Public endpoint of the ticker service.
pub const DEFAULT_TICKERS_URL: &str = "https://api.coinlore.net/api/tickers/";

/// Anything that can produce a fresh ticker dataset.
pub trait TickerSource {
    fn fetch_tickers(&self) -> impl Future<Output = Result<Vec<Record>, SourceError>> + Send;
}

/// A source that always returns the same records.
#[derive(Debug, Clone, Default)]
pub struct StaticTickerSource {
    records: Vec<Record>,
}

impl StaticTickerSource {
    pub fn new(records: Vec<Record>) -> Self {
        StaticTickerSource { records }
    }
}

impl TickerSource for StaticTickerSource {
    async fn fetch_tickers(&self) -> Result<Vec<Record>, SourceError> {
        Ok(self.records.clone())
    }
}
