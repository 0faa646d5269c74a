//! FILENAME: core/view-engine/src/state.rs
//! PURPOSE: The view state machine: dataset, filters, search, sort and lifecycle.
//! CONTEXT: Every mutation goes through `dispatch`, which applies the action
//! and then re-derives the visible sequence from the raw dataset
//! (filter -> search -> sort). The visible sequence is never patched in place.

use crate::filter::{FilterMap, FilterPredicate};
use crate::record::Record;
use crate::schema::Schema;
use crate::sort::{build_comparator, SortDirective};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// LIFECYCLE & STATUS
// ============================================================================

/// Dataset lifecycle. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum Lifecycle {
    Loading,
    Error(String),
    Ready,
}

/// What the presentation layer should show in place of, or above, the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Failed(String),
    /// Ready, but the dataset itself is empty.
    NoData,
    /// Ready with records, but none pass the active filters/search.
    NoMatches,
    Rows(usize),
}

/// Generation number of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of completing a load against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { records: usize },
    Failed(String),
    /// A newer load was started (or a dataset was set directly) since this
    /// ticket was issued; the completion was dropped.
    Superseded,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Every state mutation the engine accepts.
#[derive(Debug, Clone)]
pub enum ViewAction {
    SetFieldFilter { key: String, value: String },
    SetGlobalSearch(String),
    ActivateSort(String),
    ClearFilters,
    LoadDataset(Vec<Record>),
    LoadFailed(String),
}

// ============================================================================
// VIEW STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct ViewState {
    dataset: Vec<Arc<Record>>,
    schema: Schema,
    filters: FilterMap,
    global_search: String,
    sort: SortDirective,
    lifecycle: Lifecycle,
    visible: Vec<Arc<Record>>,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// A fresh state: empty dataset, lifecycle `Loading`.
    pub fn new() -> Self {
        ViewState {
            dataset: Vec::new(),
            schema: Schema::default(),
            filters: FilterMap::default(),
            global_search: String::new(),
            sort: SortDirective::Unsorted,
            lifecycle: Lifecycle::Loading,
            visible: Vec::new(),
            generation: 0,
        }
    }

    /// Apply one action and recompute the visible sequence.
    pub fn dispatch(&mut self, action: ViewAction) {
        match action {
            ViewAction::SetFieldFilter { key, value } => {
                if !self.filters.set(&key, value) {
                    log::warn!("ignoring filter for unknown field '{}'", key);
                }
            }
            ViewAction::SetGlobalSearch(value) => {
                self.global_search = value;
            }
            ViewAction::ActivateSort(key) => {
                if self.schema.contains(&key) {
                    self.sort = self.sort.advance(&key);
                } else {
                    log::warn!("ignoring sort on unknown field '{}'", key);
                }
            }
            ViewAction::ClearFilters => {
                self.filters.clear();
                self.global_search.clear();
            }
            ViewAction::LoadDataset(records) => {
                // A direct load supersedes anything still in flight
                self.generation += 1;
                self.dataset = records.into_iter().map(Arc::new).collect();
                self.schema = Schema::infer(&self.dataset);
                self.filters = FilterMap::for_schema(&self.schema);
                self.sort = SortDirective::Unsorted;
                self.lifecycle = Lifecycle::Ready;
                log::info!(
                    "dataset loaded: {} records, {} columns",
                    self.dataset.len(),
                    self.schema.len()
                );
            }
            ViewAction::LoadFailed(message) => {
                log::error!("dataset load failed: {}", message);
                self.lifecycle = Lifecycle::Error(message);
            }
        }
        self.recompute();
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    pub fn set_field_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.dispatch(ViewAction::SetFieldFilter {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn set_global_search(&mut self, value: impl Into<String>) {
        self.dispatch(ViewAction::SetGlobalSearch(value.into()));
    }

    pub fn activate_sort(&mut self, key: impl Into<String>) {
        self.dispatch(ViewAction::ActivateSort(key.into()));
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(ViewAction::ClearFilters);
    }

    pub fn load_dataset(&mut self, records: Vec<Record>) {
        self.dispatch(ViewAction::LoadDataset(records));
    }

    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.dispatch(ViewAction::LoadFailed(message.into()));
    }

    /// Start a load cycle: lifecycle becomes `Loading` and a new ticket is issued.
    /// The dataset stays as last known until the load completes.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.lifecycle = Lifecycle::Loading;
        self.recompute();
        LoadTicket(self.generation)
    }

    /// Finish the load identified by `ticket`. Stale tickets are discarded.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Record>, String>,
    ) -> LoadOutcome {
        if ticket.0 != self.generation {
            log::debug!(
                "discarding load {} (latest is #{})",
                ticket,
                self.generation
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                self.load_dataset(records);
                LoadOutcome::Ready { records: count }
            }
            Err(message) => {
                self.load_failed(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    // ========================================================================
    // DERIVATION
    // ========================================================================

    fn recompute(&mut self) {
        let predicate = FilterPredicate::build(&self.filters, &self.global_search);

        let mut rows: Vec<Arc<Record>> = if predicate.is_pass_through() {
            self.dataset.clone()
        } else {
            self.dataset
                .iter()
                .filter(|record| predicate.matches(record))
                .cloned()
                .collect()
        };

        if let SortDirective::Sorted { key, direction } = &self.sort {
            let compare = build_comparator(key, *direction);
            rows.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
        }

        self.visible = rows;
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Rows to display. Empty unless the lifecycle is `Ready`.
    pub fn visible(&self) -> &[Arc<Record>] {
        match self.lifecycle {
            Lifecycle::Ready => &self.visible,
            _ => &[],
        }
    }

    pub fn dataset(&self) -> &[Arc<Record>] {
        &self.dataset
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn global_search(&self) -> &str {
        &self.global_search
    }

    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active() || !self.global_search.trim().is_empty()
    }

    pub fn status(&self) -> ViewStatus {
        match &self.lifecycle {
            Lifecycle::Loading => ViewStatus::Loading,
            Lifecycle::Error(message) => ViewStatus::Failed(message.clone()),
            Lifecycle::Ready if self.dataset.is_empty() => ViewStatus::NoData,
            Lifecycle::Ready if self.visible.is_empty() => ViewStatus::NoMatches,
            Lifecycle::Ready => ViewStatus::Rows(self.visible.len()),
        }
    }
}
