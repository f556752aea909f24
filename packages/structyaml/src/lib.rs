//! structyaml: a comment-preserving YAML document model addressed by paths.
//!
//! A document is a tree of sections holding values and the comments attached
//! to them. Values are read with typed getters that fall back to configured
//! defaults, and written with `set`, which keeps the comments of whatever it
//! overwrites.
//!
//! The model lives in [`structyaml_core`]; typed serde access and JSON input
//! live in [`structyaml_serde`]. Both are re-exported here.
//!
//! ```rust
//! use structyaml::{path, Document, Settings, TypedSection};
//!
//! let mut doc = Document::with_settings(Settings::structured().into());
//! doc.root_mut().set(path!["retry", "attempts"], 3).unwrap();
//!
//! let attempts: Option<u8> = doc.root().read_as(path!["retry", "attempts"]).unwrap();
//! assert_eq!(attempts, Some(3));
//! assert_eq!(doc.root().get_f64_or(path!["retry", "backoff"], 1.5), 1.5);
//! ```

pub use structyaml_core::*;
pub use structyaml_serde::{
    document_from_json, document_from_json_str, document_to_json, from_value, json_to_value,
    to_value, value_to_json, TypedSection, TypedSectionMut,
};

/// Errors from the serde layer, which wrap [`Error`].
pub use structyaml_serde::Error as SerdeError;
