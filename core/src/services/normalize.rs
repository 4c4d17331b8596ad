//! Conversion of store-native values into plain JSON for callers.
//!
//! Timestamps are found by shape (see [`StoreTimestamp::detect`]) at any
//! depth and replaced by RFC 3339 strings. An accessor wrapper that does not
//! hold a recognisable timestamp is copied whole, never descended into.
//! Everything else is copied as is, so normalizing an already normalized
//! record changes nothing.

use serde_json::Value;

use crate::domain::entities::{Document, StoreTimestamp};

/// Normalize every field of a record
pub fn normalize(record: &Document) -> Document {
    record
        .iter()
        .map(|(key, value)| (key.clone(), normalize_value(value)))
        .collect()
}

/// Normalize a single value recursively
pub fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => match StoreTimestamp::detect(map).and_then(|ts| ts.to_iso_string()) {
            Some(iso) => Value::String(iso),
            None if StoreTimestamp::is_accessor(map) => value.clone(),
            None => Value::Object(normalize(map)),
        },
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        other => other.clone(),
    }
}
