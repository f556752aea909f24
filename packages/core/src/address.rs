//! Addresses accepted by the section API, and values accepted by `set`.

use indexmap::IndexMap;

use crate::document::SectionId;
use crate::{Key, Mapping, Path, Value};

/// Where a section operation points.
///
/// A [`Path`] is always resolved segment by segment. A single [`Key`] is a
/// direct child key, except in [`KeyMode::String`](crate::KeyMode::String)
/// documents, where a string key containing the separator is read as a path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    Path(Path),
    Key(Key),
}

impl From<Path> for Address {
    fn from(path: Path) -> Self {
        Address::Path(path)
    }
}

impl From<&Path> for Address {
    fn from(path: &Path) -> Self {
        Address::Path(path.clone())
    }
}

impl From<Key> for Address {
    fn from(key: Key) -> Self {
        Address::Key(key)
    }
}

impl From<&Key> for Address {
    fn from(key: &Key) -> Self {
        Address::Key(key.clone())
    }
}

macro_rules! key_address {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Address {
                fn from(key: $t) -> Self {
                    Address::Key(Key::from(key))
                }
            }
        )*
    };
}

key_address!(&str, String, &String, i64, i32, u32, bool, f64, ());

/// A value that can be stored under a key with [`SectionMut::set`](crate::SectionMut::set).
///
/// Each variant is stored differently:
///
/// - `Section`: an existing section of the same document, moved here
/// - `Block`: a prepared leaf, stored with its own comments
/// - `Map`: converted into a new section, nested maps into nested sections
/// - `Value`: stored as a leaf; `Value::Null` removes the key instead
#[derive(Clone, Debug, PartialEq)]
pub enum Settable {
    Section(SectionId),
    Block(Mapping),
    Map(IndexMap<Key, Value>),
    Value(Value),
}

impl From<Value> for Settable {
    fn from(value: Value) -> Self {
        match value {
            Value::Map(map) => Settable::Map(map),
            other => Settable::Value(other),
        }
    }
}

impl From<SectionId> for Settable {
    fn from(id: SectionId) -> Self {
        Settable::Section(id)
    }
}

impl From<Mapping> for Settable {
    fn from(block: Mapping) -> Self {
        Settable::Block(block)
    }
}

impl From<IndexMap<Key, Value>> for Settable {
    fn from(map: IndexMap<Key, Value>) -> Self {
        Settable::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Settable {
    fn from(items: Vec<T>) -> Self {
        Settable::Value(Value::from(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Settable {
    fn from(value: Option<T>) -> Self {
        Settable::from(Value::from(value))
    }
}

macro_rules! scalar_settable {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Settable {
                fn from(value: $t) -> Self {
                    Settable::Value(Value::from(value))
                }
            }
        )*
    };
}

scalar_settable!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, char, String, &str, ());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn strings_are_keys() {
        assert_eq!(Address::from("a.b"), Address::Key(Key::from("a.b")));
        assert_eq!(Address::from(3), Address::Key(Key::Integer(3)));
    }

    #[test]
    fn paths_stay_paths() {
        let p = path!["a", "b"];
        assert_eq!(Address::from(&p), Address::Path(p));
    }

    #[test]
    fn raw_maps_become_map_settables() {
        let value = Value::map();
        assert!(matches!(Settable::from(value), Settable::Map(_)));
        assert!(matches!(Settable::from(5), Settable::Value(Value::Integer(5))));
    }

    #[test]
    fn none_is_null() {
        assert_eq!(Settable::from(None::<i32>), Settable::Value(Value::Null));
    }
}
