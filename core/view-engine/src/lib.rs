//! FILENAME: core/view-engine/src/lib.rs
//! Ticker view engine.
//!
//! Derives the visible rows of a ticker table from a raw dataset, per-field
//! filters, a global search term and a tri-state column sort. Pure and
//! synchronous; fetching and rendering live in other crates.
//!
//! Layers:
//! - `record`: Row and scalar value model
//! - `schema`: Column discovery from the first record
//! - `filter`: Filter map and compiled record predicate
//! - `sort`: Sort directive, tri-state cycle and comparator
//! - `state`: The view state machine tying it all together

pub mod record;
pub mod schema;
pub mod filter;
pub mod sort;
pub mod state;

pub use record::{format_number, parse_number, FieldValue, Record};
pub use schema::{Column, ColumnKind, Schema};
pub use filter::{FilterMap, FilterPredicate};
pub use sort::{build_comparator, compare_values, natural_cmp, SortDirection, SortDirective};
pub use state::{Lifecycle, LoadOutcome, LoadTicket, ViewAction, ViewState, ViewStatus};
