//! FILENAME: app/src/api_types.rs
// PURPOSE: Serializable types handed to the presentation layer.
// CONTEXT: Everything here is a snapshot; the frontend never holds engine state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use view_engine::{
    ColumnKind, FieldValue, Record, SortDirection, SortDirective, ViewState, ViewStatus,
};

// ============================================================================
// STATUS
// ============================================================================

/// Lifecycle plus the empty-table distinction, as the frontend renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatusInfo {
    Loading,
    Error { message: String },
    NoData,
    NoMatches,
    Rows { count: usize },
}

impl StatusInfo {
    /// Text to show instead of (or below) the table, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            StatusInfo::Loading => Some("Loading tickers...".to_string()),
            StatusInfo::Error { message } => Some(format!("Error: {}", message)),
            StatusInfo::NoData => Some("No data".to_string()),
            StatusInfo::NoMatches => Some("Nothing matches the current filters".to_string()),
            StatusInfo::Rows { .. } => None,
        }
    }

    /// Whether a table should be rendered at all.
    pub fn shows_table(&self) -> bool {
        !matches!(self, StatusInfo::Loading | StatusInfo::Error { .. })
    }
}

impl From<ViewStatus> for StatusInfo {
    fn from(status: ViewStatus) -> Self {
        match status {
            ViewStatus::Loading => StatusInfo::Loading,
            ViewStatus::Failed(message) => StatusInfo::Error { message },
            ViewStatus::NoData => StatusInfo::NoData,
            ViewStatus::NoMatches => StatusInfo::NoMatches,
            ViewStatus::Rows(count) => StatusInfo::Rows { count },
        }
    }
}

// ============================================================================
// COLUMNS & ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub key: String,
    pub kind: ColumnKind,
    /// Current filter text (empty = inactive)
    pub filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// Header arrow, empty when the column is not the sort column
    pub indicator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub display: String,
    /// Raw value; absent when the record lacks the column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowData {
    /// Presentation key
    pub id: String,
    /// One cell per column, in column order
    pub cells: Vec<CellData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortInfo {
    pub key: String,
    pub direction: SortDirection,
}

// ============================================================================
// VIEW SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub status: StatusInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<RowData>,
    pub global_search: String,
    pub has_active_filters: bool,
    /// Records in the dataset, regardless of filters
    pub total_count: usize,
    pub visible_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl ViewSnapshot {
    pub fn from_state(view: &ViewState, loaded_at: Option<DateTime<Utc>>) -> Self {
        let sort = view.sort();
        let filters = view.filters();

        let columns: Vec<ColumnInfo> = view
            .schema()
            .columns()
            .iter()
            .map(|column| {
                let sort_direction = sort.direction_for(&column.key);
                ColumnInfo {
                    key: column.key.clone(),
                    kind: column.kind,
                    filter: filters.get(&column.key).unwrap_or_default().to_string(),
                    sort_direction,
                    indicator: sort_direction
                        .map(|d| d.indicator().to_string())
                        .unwrap_or_default(),
                }
            })
            .collect();

        let rows: Vec<RowData> = view
            .visible()
            .iter()
            .map(|record| row_data(record, &columns))
            .collect();

        let status = StatusInfo::from(view.status());

        ViewSnapshot {
            status_message: status.message(),
            status,
            visible_count: rows.len(),
            columns,
            rows,
            global_search: view.global_search().to_string(),
            has_active_filters: view.has_active_filters(),
            total_count: view.dataset().len(),
            sort: sort_info(sort),
            loaded_at,
        }
    }
}

fn row_data(record: &Record, columns: &[ColumnInfo]) -> RowData {
    let cells = columns
        .iter()
        .map(|column| match record.get(&column.key) {
            Some(value) => CellData {
                display: value.display().into_owned(),
                value: Some(value.clone()),
            },
            None => CellData {
                display: String::new(),
                value: None,
            },
        })
        .collect();

    RowData {
        id: record.id().to_string(),
        cells,
    }
}

fn sort_info(sort: &SortDirective) -> Option<SortInfo> {
    match sort {
        SortDirective::Unsorted => None,
        SortDirective::Sorted { key, direction } => Some(SortInfo {
            key: key.clone(),
            direction: *direction,
        }),
    }
}
