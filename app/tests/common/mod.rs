//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the ticker view integration tests.

#![allow(dead_code)]

use app_lib::{create_app_state, AppConfig, AppState};
use std::sync::Mutex;
use ticker_source::{SourceError, StaticTickerSource, TickerSource};
use tokio::sync::oneshot;
use view_engine::Record;

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Fresh state, nothing loaded yet.
    pub fn new() -> Self {
        TestHarness {
            state: create_app_state(AppConfig::default()),
        }
    }

    /// State with the ticker fixture already loaded.
    pub fn with_tickers() -> Self {
        let harness = Self::new();
        harness.state.view().load_dataset(TickerFixture::records());
        harness
    }

    /// Names of the visible rows, in order.
    pub fn visible_names(&self) -> Vec<String> {
        self.state
            .view()
            .visible()
            .iter()
            .map(|r| {
                r.get("name")
                    .map(|v| v.display().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// A small, realistic slice of the ticker payload.
pub struct TickerFixture;

impl TickerFixture {
    /// (id, rank, name, symbol, price_usd, percent_change_24h)
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str, &'static str, &'static str)> {
        vec![
            ("90", "1", "Bitcoin", "BTC", "50000.5", "-2.3"),
            ("80", "2", "Ethereum", "ETH", "3000.1", "5.0"),
            ("518", "3", "Tether", "USDT", "1.0", "0.01"),
            ("2710", "4", "Binance Coin", "BNB", "600.2", "1.2"),
            ("48543", "5", "Solana", "SOL", "150", "-4.5"),
            ("257", "10", "Cardano", "ADA", "0.45", "2.1"),
        ]
    }

    pub fn records() -> Vec<Record> {
        Self::data()
            .into_iter()
            .map(|(id, rank, name, symbol, price, change)| {
                Record::new(id)
                    .with_field("rank", rank)
                    .with_field("name", name)
                    .with_field("symbol", symbol)
                    .with_field("price_usd", price)
                    .with_field("percent_change_24h", change)
            })
            .collect()
    }

    pub fn source() -> StaticTickerSource {
        StaticTickerSource::new(Self::records())
    }
}

/// Always fails with a non-success status.
pub struct FailingSource(pub u16);

impl TickerSource for FailingSource {
    async fn fetch_tickers(&self) -> Result<Vec<Record>, SourceError> {
        Err(SourceError::Status(self.0))
    }
}

/// Holds its fetch open until the test sends the records through the gate.
pub struct GatedSource {
    gate: Mutex<Option<oneshot::Receiver<Vec<Record>>>>,
}

impl GatedSource {
    pub fn new() -> (Self, oneshot::Sender<Vec<Record>>) {
        let (tx, rx) = oneshot::channel();
        (
            GatedSource {
                gate: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

impl TickerSource for GatedSource {
    async fn fetch_tickers(&self) -> Result<Vec<Record>, SourceError> {
        let gate = self.gate.lock().unwrap().take();
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| SourceError::Malformed("gate dropped".to_string())),
            None => Err(SourceError::Malformed("gate already used".to_string())),
        }
    }
}
