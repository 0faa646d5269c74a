//! FILENAME: core/view-engine/src/record.rs
//! PURPOSE: Defines a single ticker row and the scalar values it holds.
//! CONTEXT: Records are schema-less ordered field lists. The `id` lives outside
//! the field list because it keys presentation rows and never takes part in
//! filtering or sorting.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Inline capacity for record fields. A ticker payload carries ~15 fields.
const INLINE_FIELDS: usize = 16;

/// A scalar value stored in a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// The string form used for substring matching and text comparison.
    /// Null renders as the empty string.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Bool(true) => Cow::Borrowed("true"),
            FieldValue::Bool(false) => Cow::Borrowed("false"),
            FieldValue::Number(n) => Cow::Owned(format_number(*n)),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Numeric interpretation of the value, if it has one.
    /// Numeric-looking text ("3000.1", " -2.3 ") parses; anything non-finite does not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Number to text the way the ticker service's clients print it: plain
/// decimals between 1e-6 and 1e21, exponent form (`1e+21`, `1.5e-7`) outside.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

/// Parse trimmed text as a finite float.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

// ============================================================================
// RECORD
// ============================================================================

/// One row of the dataset: a presentation id plus ordered named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: String,
    fields: SmallVec<[(String, FieldValue); INLINE_FIELDS]>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            fields: SmallVec::new(),
        }
    }

    /// Builder-style field insertion, mostly for fixtures.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_field(key, value);
        self
    }

    /// Insert or replace a field. New keys keep insertion order.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_values() {
        assert_eq!(FieldValue::Null.display(), "");
        assert_eq!(FieldValue::Bool(true).display(), "true");
        assert_eq!(FieldValue::Number(1.0).display(), "1");
        assert_eq!(FieldValue::Number(50000.5).display(), "50000.5");
        assert_eq!(FieldValue::text("BTC").display(), "BTC");
    }

    #[test]
    fn test_number_display_switches_to_exponent_at_extremes() {
        assert_eq!(FieldValue::Number(1e21).display(), "1e+21");
        assert_eq!(FieldValue::Number(-2.5e22).display(), "-2.5e+22");
        assert_eq!(FieldValue::Number(1e20).display(), "100000000000000000000");
        assert_eq!(FieldValue::Number(1e-7).display(), "1e-7");
        assert_eq!(FieldValue::Number(1.5e-7).display(), "1.5e-7");
        assert_eq!(FieldValue::Number(0.000001).display(), "0.000001");
        assert_eq!(FieldValue::Number(-0.0).display(), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::text("3000.1").as_number(), Some(3000.1));
        assert_eq!(FieldValue::text(" -2.3 ").as_number(), Some(-2.3));
        assert_eq!(FieldValue::Number(7.0).as_number(), Some(7.0));
        assert_eq!(FieldValue::text("BTC").as_number(), None);
        assert_eq!(FieldValue::text("").as_number(), None);
        assert_eq!(FieldValue::text("NaN").as_number(), None);
        assert_eq!(FieldValue::text("inf").as_number(), None);
        assert_eq!(FieldValue::Null.as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_record_fields_keep_order() {
        let record = Record::new("90")
            .with_field("symbol", "BTC")
            .with_field("name", "Bitcoin")
            .with_field("rank", 1.0);

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["symbol", "name", "rank"]);
        assert_eq!(record.id(), "90");
        assert_eq!(record.get("name"), Some(&FieldValue::text("Bitcoin")));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_set_field_replaces_in_place() {
        let mut record = Record::new("1").with_field("a", "x").with_field("b", "y");
        record.set_field("a", "z");

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::text("z")));
        assert_eq!(record.field_count(), 2);
    }

    #[test]
    fn test_field_value_json_shape() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 1.5, "BTC"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Number(1.5),
                FieldValue::text("BTC"),
            ]
        );
    }
}
