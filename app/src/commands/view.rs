//! FILENAME: app/src/commands/view.rs
// PURPOSE: Filter, search and sort commands.
// CONTEXT: Each command is one dispatch on the view engine under the state
//          lock, followed by a fresh snapshot for the frontend.

use crate::api_types::ViewSnapshot;
use crate::{log_debug, AppState};

/// Current view without changing anything.
pub fn get_view(state: &AppState) -> ViewSnapshot {
    let view = state.view();
    ViewSnapshot::from_state(&view, state.loaded_at())
}

/// Set (or clear, with an empty value) the filter for one column.
pub fn set_field_filter(state: &AppState, key: &str, value: &str) -> ViewSnapshot {
    log_debug!("VIEW", "set_field_filter key={} value={:?}", key, value);
    let mut view = state.view();
    view.set_field_filter(key, value);
    ViewSnapshot::from_state(&view, state.loaded_at())
}

pub fn set_global_search(state: &AppState, value: &str) -> ViewSnapshot {
    log_debug!("VIEW", "set_global_search value={:?}", value);
    let mut view = state.view();
    view.set_global_search(value);
    ViewSnapshot::from_state(&view, state.loaded_at())
}

/// Header click: advances the column's ascending -> descending -> unsorted cycle.
pub fn activate_sort(state: &AppState, key: &str) -> ViewSnapshot {
    let mut view = state.view();
    view.activate_sort(key);
    log_debug!("VIEW", "activate_sort key={} -> {:?}", key, view.sort());
    ViewSnapshot::from_state(&view, state.loaded_at())
}

/// Deactivate every column filter and the global search.
pub fn clear_filters(state: &AppState) -> ViewSnapshot {
    log_debug!("VIEW", "clear_filters");
    let mut view = state.view();
    view.clear_filters();
    ViewSnapshot::from_state(&view, state.loaded_at())
}
