//! Document-wide settings.
//!
//! A [`Settings`] value is fixed when a [`Document`](crate::Document) is
//! created and shared by reference with every section in it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::{Key, Value};

/// How keys passed to the section API are interpreted.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Keys are opaque values. A string key containing the separator is
    /// just a string key; nested access goes through [`Path`](crate::Path).
    Structured,
    /// Every key is stored as a string, and a string key containing the
    /// separator is read as a path (`"server.port"`).
    #[default]
    String,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Structured => write!(f, "structured"),
            KeyMode::String => write!(f, "string"),
        }
    }
}

/// Immutable configuration consulted by every section of a document.
///
/// Loads from any serde format; missing fields take their defaults.
///
/// ```rust
/// use structyaml_core::{KeyMode, Settings};
///
/// let settings: Settings = serde_json::from_str(r#"{"key-mode": "structured", "separator": "/"}"#).unwrap();
/// assert_eq!(settings.key_mode(), KeyMode::Structured);
/// assert_eq!(settings.separator(), '/');
/// assert_eq!(settings.default_char(), ' ');
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    key_mode: KeyMode,
    separator: char,
    default_string: String,
    default_number: Value,
    default_boolean: bool,
    default_char: char,
    default_list: Vec<Value>,
    default_map: IndexMap<Key, Value>,
}

lazy_static! {
    static ref DEFAULT_SETTINGS: Arc<Settings> = Arc::new(Settings::default());
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_mode: KeyMode::String,
            separator: '.',
            default_string: String::new(),
            default_number: Value::Integer(0),
            default_boolean: false,
            default_char: ' ',
            default_list: Vec::new(),
            default_map: IndexMap::new(),
        }
    }
}

impl Settings {
    /// A shared handle to the default settings.
    pub fn shared_default() -> Arc<Settings> {
        Arc::clone(&DEFAULT_SETTINGS)
    }

    /// Default settings with structured keys.
    pub fn structured() -> Self {
        Self::default().with_key_mode(KeyMode::Structured)
    }

    #[must_use]
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_default_string(mut self, value: impl Into<String>) -> Self {
        self.default_string = value.into();
        self
    }

    /// Set the number returned by numeric accessors on a miss.
    ///
    /// Non-numeric values are ignored.
    #[must_use]
    pub fn with_default_number(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        if value.is_number() {
            self.default_number = value;
        }
        self
    }

    #[must_use]
    pub fn with_default_boolean(mut self, value: bool) -> Self {
        self.default_boolean = value;
        self
    }

    #[must_use]
    pub fn with_default_char(mut self, value: char) -> Self {
        self.default_char = value;
        self
    }

    #[must_use]
    pub fn with_default_list(mut self, value: Vec<Value>) -> Self {
        self.default_list = value;
        self
    }

    #[must_use]
    pub fn with_default_map(mut self, value: IndexMap<Key, Value>) -> Self {
        self.default_map = value;
        self
    }

    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn default_string(&self) -> &str {
        &self.default_string
    }

    pub fn default_number(&self) -> &Value {
        &self.default_number
    }

    pub fn default_boolean(&self) -> bool {
        self.default_boolean
    }

    pub fn default_char(&self) -> char {
        self.default_char
    }

    pub fn default_list(&self) -> &[Value] {
        &self.default_list
    }

    pub fn default_map(&self) -> &IndexMap<Key, Value> {
        &self.default_map
    }
}
