//! Map keys and path segments.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::settings::KeyMode;
use crate::value::{format_float, Value};

/// A single map key, and therefore a single [`Path`](crate::Path) segment.
///
/// YAML allows any scalar as a mapping key, including `null`. Which of these
/// shapes a document actually stores depends on its [`KeyMode`]: structured
/// documents keep keys exactly as parsed, string-keyed documents turn every
/// non-null key into its canonical text (see [`Key::adapt`]).
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// The null key (`~` or an empty key node).
    Null,
    Bool(bool),
    Integer(i64),
    /// Float key, totally ordered so it can live in hashed and sorted maps.
    Float(OrderedFloat<f64>),
    String(String),
}

impl Key {
    /// Convert this key to the shape stored under `mode`.
    ///
    /// Structured mode keeps the key as-is. String mode replaces every
    /// non-null key with its canonical text; the null key stays null.
    ///
    /// ```rust
    /// use structyaml_core::{Key, KeyMode};
    ///
    /// assert_eq!(Key::from(8080).adapt(KeyMode::String), Key::from("8080"));
    /// assert_eq!(Key::from(8080).adapt(KeyMode::Structured), Key::Integer(8080));
    /// ```
    #[must_use]
    pub fn adapt(self, mode: KeyMode) -> Key {
        match (mode, self) {
            (KeyMode::Structured, key) => key,
            (KeyMode::String, Key::Null) => Key::Null,
            (KeyMode::String, key @ Key::String(_)) => key,
            (KeyMode::String, key) => Key::String(key.to_string()),
        }
    }

    /// Build a key from a constructed node value.
    ///
    /// Scalars map onto the matching variant. Lists and maps (YAML complex
    /// keys) have no key variant and are stored as their flow rendering.
    pub fn from_value(value: Value) -> Key {
        match value {
            Value::Null => Key::Null,
            Value::Bool(b) => Key::Bool(b),
            Value::Integer(i) => Key::Integer(i),
            Value::Float(f) => Key::Float(OrderedFloat(f)),
            Value::String(s) => Key::String(s),
            complex @ (Value::List(_) | Value::Map(_)) => Key::String(complex.to_string()),
        }
    }

    /// The string content, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Key::Null)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "null"),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Integer(i) => write!(f, "{}", i),
            Key::Float(x) => write!(f, "{}", format_float(x.0)),
            Key::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(b),
            Key::Integer(i) => Value::Integer(i),
            Key::Float(x) => Value::Float(x.0),
            Key::String(s) => Value::String(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::String(s.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Integer(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Integer(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::Float(OrderedFloat(f))
    }
}

impl From<()> for Key {
    fn from(_: ()) -> Self {
        Key::Null
    }
}
