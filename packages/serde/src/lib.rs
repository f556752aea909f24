//! Serde integration for structyaml
//!
//! This layer adds typed access on top of the document model:
//! - `TypedSection` / `TypedSectionMut`: read and write Rust types at an address
//! - Value <-> serde conversions, through `serde_json`
//! - JSON as a document source
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use structyaml_core::Settings;
//! use structyaml_serde::{document_from_json, TypedSection, TypedSectionMut};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Limits {
//!     requests: u32,
//!     burst: u32,
//! }
//!
//! let mut doc = document_from_json(
//!     Settings::shared_default(),
//!     serde_json::json!({"limits": {"requests": 100, "burst": 10}}),
//! );
//! let limits: Limits = doc.root().read_as("limits").unwrap().unwrap();
//! assert_eq!(limits.burst, 10);
//!
//! doc.root_mut()
//!     .write_as("limits", &Limits { requests: 50, burst: 5 })
//!     .unwrap();
//! assert_eq!(doc.root().get_i32("limits.requests"), 50);
//! ```

mod convert;
mod error;
mod json;
mod typed;

pub use convert::{from_value, json_to_value, to_value, value_to_json};
pub use error::{Error, Result};
pub use json::{document_from_json, document_from_json_str, document_to_json};
pub use typed::{TypedSection, TypedSectionMut};
