//! FILENAME: core/ticker-source/src/payload.rs
//! PURPOSE: Turns the ticker service's JSON envelope into engine records.
//! CONTEXT: The service answers `{"data": [{...}, ...], "info": {...}}`.
//! Each ticker object must carry an `id`; every other member becomes a
//! field, in payload order.

use crate::error::SourceError;
use serde_json::{Map, Value};
use view_engine::{FieldValue, Record};

/// Parse a full response body into records.
pub fn parse_tickers(body: &str) -> Result<Vec<Record>, SourceError> {
    let payload: Value = serde_json::from_str(body)?;

    let data = payload
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::Malformed("payload has no `data` array".to_string()))?;

    data.iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => record_from_object(index, object),
            _ => Err(SourceError::Malformed(format!(
                "ticker #{} is not an object",
                index
            ))),
        })
        .collect()
}

fn record_from_object(index: usize, object: &Map<String, Value>) -> Result<Record, SourceError> {
    let id = match object.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(SourceError::Malformed(format!(
                "ticker #{} has no usable id",
                index
            )))
        }
    };

    let mut record = Record::new(id);
    for (key, value) in object {
        if key == "id" {
            continue;
        }
        let scalar = scalar_value(value).ok_or_else(|| {
            SourceError::Malformed(format!(
                "ticker {} field `{}` is not a scalar",
                record.id(),
                key
            ))
        })?;
        record.set_field(key.as_str(), scalar);
    }
    Ok(record)
}

fn scalar_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null => Some(FieldValue::Null),
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {
                "id": "90",
                "symbol": "BTC",
                "name": "Bitcoin",
                "nameid": "bitcoin",
                "rank": 1,
                "price_usd": "50000.5",
                "percent_change_24h": "-2.3",
                "msupply": null
            },
            {
                "id": 80,
                "symbol": "ETH",
                "name": "Ethereum",
                "nameid": "ethereum",
                "rank": 2,
                "price_usd": "3000.1",
                "percent_change_24h": "5.0",
                "msupply": ""
            }
        ],
        "info": { "coins_num": 2, "time": 1700000000 }
    }"#;

    #[test]
    fn test_parse_sample_payload() {
        let records = parse_tickers(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        let btc = &records[0];
        assert_eq!(btc.id(), "90");
        let keys: Vec<&str> = btc.keys().collect();
        assert_eq!(
            keys,
            vec!["symbol", "name", "nameid", "rank", "price_usd", "percent_change_24h", "msupply"]
        );
        assert_eq!(btc.get("rank"), Some(&FieldValue::Number(1.0)));
        assert_eq!(btc.get("msupply"), Some(&FieldValue::Null));

        // Numeric ids are accepted and stringified
        assert_eq!(records[1].id(), "80");
    }

    #[test]
    fn test_missing_data_array() {
        let err = parse_tickers(r#"{"info": {}}"#).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
        assert!(err.to_string().contains("data"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_tickers("<html>busy</html>").unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
    }

    #[test]
    fn test_ticker_without_id() {
        let err = parse_tickers(r#"{"data": [{"symbol": "BTC"}]}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed ticker payload: ticker #0 has no usable id"
        );
    }

    #[test]
    fn test_nested_field_rejected() {
        let err = parse_tickers(r#"{"data": [{"id": "1", "tags": ["a"]}]}"#).unwrap_err();
        assert!(err.to_string().contains("`tags`"));
    }

    #[test]
    fn test_non_object_ticker_rejected() {
        let err = parse_tickers(r#"{"data": [42]}"#).unwrap_err();
        assert!(err.to_string().contains("#0"));
    }

    #[test]
    fn test_empty_data_array() {
        assert!(parse_tickers(r#"{"data": []}"#).unwrap().is_empty());
    }
}
