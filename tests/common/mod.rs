//! Shared test helpers.

#![allow(dead_code)]

use screenstore::screen::ScreenData;
use serde_json::Value;

/// Build a record from a `json!` object literal.
pub fn record(value: Value) -> ScreenData {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
