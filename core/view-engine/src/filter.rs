//! FILENAME: core/view-engine/src/filter.rs
//! PURPOSE: Per-field filter values and the record predicate built from them.
//! CONTEXT: Per-field filters are AND-combined case-insensitive substring
//! tests. The global search is an OR across all fields of a record, and is
//! AND-combined with the per-field filters.

use crate::record::Record;
use crate::schema::Schema;
use rustc_hash::FxHashMap;

// ============================================================================
// FILTER MAP
// ============================================================================

/// Filter text per field key. An empty string means the filter is inactive.
/// The key set always mirrors the schema it was created for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterMap {
    values: FxHashMap<String, String>,
}

impl FilterMap {
    /// All-inactive filters for every column of `schema`.
    pub fn for_schema(schema: &Schema) -> Self {
        FilterMap {
            values: schema.keys().map(|k| (k.to_string(), String::new())).collect(),
        }
    }

    /// Update the filter for `key`. Returns false (and changes nothing) when
    /// `key` is not a known field.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Deactivate every filter, keeping the key set.
    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    /// Filters with a non-empty value.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_active(&self) -> bool {
        self.values.values().any(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// A compiled record predicate. Needles are lowercased once at build time.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    /// No filter and no search active: every record passes.
    PassThrough,
    Active {
        fields: Vec<(String, String)>,
        search: Option<String>,
    },
}

impl FilterPredicate {
    pub fn build(filters: &FilterMap, global_search: &str) -> Self {
        let fields: Vec<(String, String)> = filters
            .active()
            .map(|(key, value)| (key.to_string(), value.to_lowercase()))
            .collect();

        let trimmed = global_search.trim();
        let search = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());

        if fields.is_empty() && search.is_none() {
            FilterPredicate::PassThrough
        } else {
            FilterPredicate::Active { fields, search }
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, FilterPredicate::PassThrough)
    }

    pub fn matches(&self, record: &Record) -> bool {
        let (fields, search) = match self {
            FilterPredicate::PassThrough => return true,
            FilterPredicate::Active { fields, search } => (fields, search),
        };

        for (key, needle) in fields {
            // A record without the field cannot satisfy a filter on it
            let Some(value) = record.get(key) else {
                return false;
            };
            if !value.display().to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        match search {
            Some(needle) => record
                .fields()
                .any(|(_, value)| value.display().to_lowercase().contains(needle.as_str())),
            None => true,
        }
    }
}
