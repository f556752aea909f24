//! Core structyaml: the document model
//!
//! A YAML document is a tree of sections. Each section maps keys to either
//! a leaf ([`Mapping`]: a value plus its comments) or a nested section.
//! - `Path` / `Key`: addressing, with `path!` for literal paths
//! - `Value`: the native value of a leaf
//! - `Document`: the arena owning every section, plus its `Settings`
//! - `SectionRef` / `SectionMut`: read and write views of one section
//!
//! Keys are interpreted according to the document's [`KeyMode`]. In string
//! mode (the default) every key is a string and `"a.b"` addresses `b`
//! inside section `a`; in structured mode keys keep their type and nesting
//! is spelled with a [`Path`].
//!
//! # Example
//!
//! ```rust
//! use structyaml_core::Document;
//!
//! let mut doc = Document::new();
//! let mut root = doc.root_mut();
//! root.set("server.host", "localhost").unwrap();
//! root.set("server.port", 8080).unwrap();
//!
//! let root = doc.root();
//! assert_eq!(root.get_string("server.host"), "localhost");
//! assert_eq!(root.get_i32_or("server.timeout", 30), 30);
//! assert_eq!(root.get_section_safe("server").unwrap().len(), 2);
//! ```

mod accessors;
mod address;
mod block;
pub mod coerce;
mod document;
mod error;
mod key;
mod path;
mod section;
mod settings;
mod source;
mod value;

pub use address::{Address, Settable};
pub use block::{Block, Comments, Mapping};
pub use coerce::{Fallback, FromValue};
pub use document::{Document, SectionId};
pub use error::{Error, Result};
pub use key::Key;
pub use path::Path;
pub use section::{BlockRef, Item, SectionMut, SectionRef};
pub use settings::{KeyMode, Settings};
pub use source::{Node, NodeKind, SourceNode};
pub use value::Value;
