//! Path type: an immutable sequence of key segments.

use std::fmt;

use crate::{Error, Key};

/// A path from some section down to one of its descendants.
///
/// Each segment is a [`Key`]. A path with no segments denotes the section it
/// is resolved against. Paths are plain values: deriving a new path (via
/// [`append`](Path::append) or [`parent`](Path::parent)) never touches the
/// original.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Key>,
}

impl Path {
    /// The empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A path with exactly one segment.
    pub fn single(key: impl Into<Key>) -> Self {
        Path {
            segments: vec![key.into()],
        }
    }

    /// Create a path from its segments.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Path {
            segments: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a separator-delimited string into a path of string segments.
    ///
    /// Every occurrence of `separator` starts a new segment. Empty substrings
    /// are kept as empty-string segments, since YAML permits empty keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structyaml_core::{Key, Path};
    ///
    /// let path = Path::from_string("server.http.port", '.');
    /// assert_eq!(path.len(), 3);
    ///
    /// // Separators are never collapsed
    /// let path = Path::from_string("a..b.", '.');
    /// assert_eq!(path, Path::from_keys(["a", "", "b", ""]));
    /// ```
    pub fn from_string(s: &str, separator: char) -> Self {
        Path {
            segments: s.split(separator).map(Key::from).collect(),
        }
    }

    /// Check if this path is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Get the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<&Key, Error> {
        self.segments.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.segments.len(),
        })
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&Key> {
        self.segments.last()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.segments.iter()
    }

    /// Return a new path with `key` appended.
    #[must_use]
    pub fn append(&self, key: impl Into<Key>) -> Path {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.into());
        Path { segments }
    }

    /// Return this path without its last segment.
    ///
    /// The parent of the empty path is the empty path.
    #[must_use]
    pub fn parent(&self) -> Path {
        let end = self.segments.len().saturating_sub(1);
        Path {
            segments: self.segments[..end].to_vec(),
        }
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    /// Render the path as a single string, segments joined by `separator`.
    pub fn join_with(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, key) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(&key.to_string());
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join_with('.'))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = Key;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Macro for building structured paths from key literals.
///
/// # Example
///
/// ```rust
/// use structyaml_core::{path, Key};
///
/// let p = path!["servers", 0, "host"];
/// assert_eq!(p.len(), 3);
/// assert_eq!(p[1], Key::Integer(0));
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::Path::from_keys([$($crate::Key::from($key)),+])
    };
}
