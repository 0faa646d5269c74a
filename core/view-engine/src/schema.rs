//! FILENAME: core/view-engine/src/schema.rs
//! PURPOSE: Column discovery for a freshly loaded dataset.
//! CONTEXT: The engine never hardcodes ticker columns. The first record's
//! field keys become the filterable/sortable columns, in payload order.

use crate::record::Record;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Rendering hint for a column. The comparator does not use it; numeric
/// ordering is decided per value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    pub kind: ColumnKind,
}

/// Ordered set of field keys shared by every record of a dataset.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<Column>,
    index: FxHashMap<String, usize>,
}

impl Schema {
    /// Derive the schema from the shape of the first record.
    /// An empty dataset has an empty schema.
    pub fn infer(records: &[impl AsRef<Record>]) -> Self {
        let Some(first) = records.first() else {
            return Schema::default();
        };

        let mut schema = Schema::default();
        for (key, value) in first.as_ref().fields() {
            let kind = if value.as_number().is_some() {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            };
            schema.index.insert(key.to_string(), schema.columns.len());
            schema.columns.push(Column {
                key: key.to_string(),
                kind,
            });
        }
        schema
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.index.get(key).map(|&i| &self.columns[i])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use std::sync::Arc;

    #[test]
    fn test_infer_from_first_record() {
        let records = vec![
            Arc::new(
                Record::new("1")
                    .with_field("rank", "1")
                    .with_field("name", "Bitcoin")
                    .with_field("price_usd", "50000.5"),
            ),
            Arc::new(Record::new("2").with_field("other", "ignored")),
        ];

        let schema = Schema::infer(&records);
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["rank", "name", "price_usd"]);
        assert!(schema.contains("name"));
        assert!(!schema.contains("other"));
        assert!(!schema.contains("id"));
        assert_eq!(schema.column("rank").map(|c| c.kind), Some(ColumnKind::Numeric));
        assert_eq!(schema.column("name").map(|c| c.kind), Some(ColumnKind::Text));
    }

    #[test]
    fn test_infer_empty_dataset() {
        let records: Vec<Arc<Record>> = Vec::new();
        let schema = Schema::infer(&records);
        assert!(schema.is_empty());
        assert_eq!(schema.len(), 0);
    }

    #[test]
    fn test_null_first_value_is_text() {
        let records = vec![Record::new("1").with_field("msupply", FieldValue::Null)];
        let schema = Schema::infer(&records);
        assert_eq!(schema.column("msupply").map(|c| c.kind), Some(ColumnKind::Text));
    }
}
