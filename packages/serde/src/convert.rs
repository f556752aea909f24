//! Conversions between Value and serde types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use structyaml_core::{Key, Value};

use crate::error::Error;

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::decode(e.to_string()))
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Ok(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
///
/// JSON object keys are strings, so non-string keys use their canonical
/// text. Non-finite floats have no JSON form and become `null`.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::List(items) => {
            serde_json::Value::Array(items.into_iter().map(value_to_json).collect())
        }
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (key_to_string(k), value_to_json(v)))
                .collect(),
        ),
    }
}

fn key_to_string(key: Key) -> String {
    match key {
        Key::String(s) => s,
        other => other.to_string(),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (Key::String(k), json_to_value(v)))
                .collect(),
        ),
    }
}
