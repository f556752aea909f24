//! Error types for the document model.
//!
//! Missing data is never an error here: lookups that find nothing (or find
//! the wrong shape) return `None` or a configured default. The variants below
//! are programming errors on the caller's side.

use thiserror::Error;

use crate::path::Path;
use crate::settings::KeyMode;

/// Errors raised by the document model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A path segment was indexed past the end of the path.
    #[error("segment index {index} out of bounds for path of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The operation cannot be expressed in the document's key mode.
    #[error("{operation} is not supported in {mode} key mode")]
    Unsupported {
        operation: &'static str,
        mode: KeyMode,
    },

    /// A section cannot be moved to the requested location.
    #[error("cannot relocate section '{from}' to '{to}'")]
    InvalidRelocation { from: Path, to: Path },

    /// The section handle refers to a node that has been removed.
    #[error("section handle is stale")]
    StaleSection,

    /// The section handle was issued by a different document.
    #[error("section handle belongs to another document")]
    ForeignSection,
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn index_error_display() {
        let e = Error::IndexOutOfBounds { index: 3, len: 2 };
        let display = e.to_string();
        assert!(display.contains("3"));
        assert!(display.contains("length 2"));
    }

    #[test]
    fn unsupported_display() {
        let e = Error::Unsupported {
            operation: "keys_as_strings",
            mode: KeyMode::Structured,
        };
        assert_eq!(
            e.to_string(),
            "keys_as_strings is not supported in structured key mode"
        );
    }

    #[test]
    fn relocation_display() {
        let e = Error::InvalidRelocation {
            from: path!["a"],
            to: path!["a", "b"],
        };
        let display = e.to_string();
        assert!(display.contains("'a'"));
        assert!(display.contains("'a.b'"));
    }
}
