//! Coercion rules for typed access.
//!
//! [`FromValue`] is the whole coercion table: every typed getter on
//! [`SectionRef`](crate::SectionRef) is `FromValue::from_value` applied to the
//! resolved leaf, and list getters apply it elementwise. [`Fallback`] picks
//! the configured default when nothing usable is found.

use indexmap::IndexMap;

use crate::value::format_float;
use crate::{Key, Settings, Value};

/// Conversion from a stored value to a Rust type.
///
/// Conversions never fail loudly: a value of the wrong shape converts to
/// `None`.
pub trait FromValue: Sized {
    /// Coerce `value` to `Self`.
    fn from_value(value: &Value) -> Option<Self>;

    /// Whether `value` already has this type's natural shape, without any
    /// coercion (`is_i32` holds for an integer in `i32` range, not for `"5"`).
    fn is_exact(value: &Value) -> bool;
}

/// The value a getter returns when nothing usable is stored.
pub trait Fallback {
    fn fallback(settings: &Settings) -> Self;
}

/// Coerce each element, dropping those that don't convert.
pub fn coerce_list<T: FromValue>(items: &[Value]) -> Vec<T> {
    items.iter().filter_map(T::from_value).collect()
}

// Integers: truncating from floats, wrapping from wider integers, parsed
// from strings. Booleans never count as numbers.
macro_rules! integer_coercion {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Integer(i) => Some(*i as $t),
                        Value::Float(f) => Some(*f as $t),
                        Value::String(s) => s.parse::<$t>().ok(),
                        _ => None,
                    }
                }

                fn is_exact(value: &Value) -> bool {
                    matches!(value, Value::Integer(i) if <$t>::try_from(*i).is_ok())
                }
            }

            impl Fallback for $t {
                fn fallback(settings: &Settings) -> Self {
                    <$t>::from_value(settings.default_number()).unwrap_or_default()
                }
            }
        )*
    };
}

integer_coercion!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

macro_rules! float_coercion {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Integer(i) => Some(*i as $t),
                        Value::Float(f) => Some(*f as $t),
                        Value::String(s) => s.parse::<$t>().ok(),
                        _ => None,
                    }
                }

                fn is_exact(value: &Value) -> bool {
                    matches!(value, Value::Float(_))
                }
            }

            impl Fallback for $t {
                fn fallback(settings: &Settings) -> Self {
                    <$t>::from_value(settings.default_number()).unwrap_or_default()
                }
            }
        )*
    };
}

float_coercion!(f32, f64);

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn is_exact(value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }
}

impl Fallback for bool {
    fn fallback(settings: &Settings) -> Self {
        settings.default_boolean()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn is_exact(value: &Value) -> bool {
        matches!(value, Value::String(_))
    }
}

impl Fallback for String {
    fn fallback(settings: &Settings) -> Self {
        settings.default_string().to_string()
    }
}

/// The single char of a one-char string.
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => single_char(s),
            Value::Integer(i) => u32::try_from(*i).ok().and_then(char::from_u32),
            _ => None,
        }
    }

    fn is_exact(value: &Value) -> bool {
        matches!(value, Value::String(s) if single_char(s).is_some())
    }
}

impl Fallback for char {
    fn fallback(settings: &Settings) -> Self {
        settings.default_char()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn is_exact(_: &Value) -> bool {
        true
    }
}

impl Fallback for Value {
    fn fallback(_: &Settings) -> Self {
        Value::Null
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_list().map(<[Value]>::to_vec)
    }

    fn is_exact(value: &Value) -> bool {
        value.is_list()
    }
}

impl Fallback for Vec<Value> {
    fn fallback(settings: &Settings) -> Self {
        settings.default_list().to_vec()
    }
}

impl FromValue for IndexMap<Key, Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }

    fn is_exact(value: &Value) -> bool {
        value.is_map()
    }
}

impl Fallback for IndexMap<Key, Value> {
    fn fallback(settings: &Settings) -> Self {
        settings.default_map().clone()
    }
}
