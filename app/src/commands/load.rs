//! FILENAME: app/src/commands/load.rs
// PURPOSE: Dataset load cycle (initial load and retry).
// CONTEXT: The fetch is awaited without holding the view lock. The ticket
//          issued at the start decides whether the completion still applies.

use crate::api_types::ViewSnapshot;
use crate::{log_enter, log_error, log_exit, log_info, log_warn, AppState};
use chrono::Utc;
use ticker_source::{HttpTickerSource, TickerSource};
use view_engine::LoadOutcome;

/// Run one load cycle against `source`.
///
/// Returns the snapshot after the load, or the load failure message. A
/// completion superseded by a newer load returns the current snapshot and
/// leaves the state untouched.
pub async fn load_tickers<S: TickerSource>(
    state: &AppState,
    source: &S,
) -> Result<ViewSnapshot, String> {
    let ticket = state.view().begin_load();
    log_enter!("LOAD", "load_tickers", "ticket={}", ticket);

    let result = source.fetch_tickers().await.map_err(|e| e.to_string());

    let mut view = state.view();
    let outcome = view.complete_load(ticket, result);
    log_exit!("LOAD", "load_tickers", "ticket={} outcome={:?}", ticket, outcome);

    match outcome {
        LoadOutcome::Ready { records } => {
            log_info!("LOAD", "loaded {} tickers", records);
            let loaded_at = Utc::now();
            state.set_loaded_at(loaded_at);
            Ok(ViewSnapshot::from_state(&view, Some(loaded_at)))
        }
        LoadOutcome::Failed(message) => {
            log_error!("LOAD", "ticker load failed: {}", message);
            Err(message)
        }
        LoadOutcome::Superseded => {
            log_warn!("LOAD", "ticket {} superseded, result dropped", ticket);
            Ok(ViewSnapshot::from_state(&view, state.loaded_at()))
        }
    }
}

/// Load from the configured HTTP endpoint.
pub async fn load_from_config(state: &AppState) -> Result<ViewSnapshot, String> {
    let source = HttpTickerSource::new(
        state.config.tickers_url.clone(),
        state.config.request_timeout(),
    )
    .map_err(|e| {
        let message = e.to_string();
        state.view().load_failed(message.clone());
        message
    })?;

    load_tickers(state, &source).await
}
