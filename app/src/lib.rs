//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (presentation bridge).
// CONTEXT: Owns the shared view state and exposes commands that a frontend
//          calls one at a time; every command returns a fresh snapshot.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use view_engine::ViewState;

pub mod api_types;
pub mod commands;
pub mod config;
pub mod logging;

pub use api_types::{CellData, ColumnInfo, RowData, SortInfo, StatusInfo, ViewSnapshot};
pub use config::AppConfig;
pub use logging::{
    bridge_category, get_log_path, init_log_file, install_log_bridge, next_seq, sort_log_file,
    write_log,
};


// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    /// The view engine; every command locks it for one dispatch
    pub view: Mutex<ViewState>,
    /// When the current dataset finished loading
    pub loaded_at: Mutex<Option<DateTime<Utc>>>,
    pub config: AppConfig,
}

impl AppState {
    /// Lock the view. A panic in another command must not wedge the UI,
    /// so a poisoned lock is recovered.
    pub fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        *self.loaded_at.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_loaded_at(&self, at: DateTime<Utc>) {
        *self.loaded_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(at);
    }
}

pub fn create_app_state(config: AppConfig) -> AppState {
    log_info!("SYS", "Creating AppState, source={}", config.tickers_url);

    AppState {
        view: Mutex::new(ViewState::new()),
        loaded_at: Mutex::new(None),
        config,
    }
}

/// Set up the unified log (file if configured) and route `log` records
/// from the engine crates into it.
pub fn init_logging(config: &AppConfig, level: log::LevelFilter) {
    if let Some(path) = &config.log_file {
        match init_log_file(path) {
            Ok(path) => log_info!("SYS", "Log file: {}", path.display()),
            Err(e) => {
                eprintln!("[LOG_INIT] FAILED: {}", e);
                eprintln!("[LOG_INIT] Continuing with console-only logging");
            }
        }
    }

    if let Err(e) = install_log_bridge(level) {
        log_warn!("SYS", "{}", e);
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Load the ticker table once and print the snapshot as JSON.
/// The first argument, if any, is a JSON config file.
pub fn run() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[CONFIG] {}", e);
            eprintln!("[CONFIG] Falling back to defaults");
            AppConfig::default().with_overrides(|key| std::env::var(key).ok())
        }
    };

    init_logging(&config, log::LevelFilter::Info);
    let state = create_app_state(config);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log_error!("SYS", "Failed to start runtime: {}", e);
            return;
        }
    };

    match runtime.block_on(commands::load_from_config(&state)) {
        Ok(snapshot) => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => log_error!("SYS", "Failed to serialize snapshot: {}", e),
        },
        Err(message) => log_error!("SYS", "Error: {}", message),
    }

    if get_log_path().is_some() {
        if let Err(e) = sort_log_file() {
            eprintln!("[LOG_SORT] FAILED: {}", e);
        }
    }
}
