//! JSON as a document source.
//!
//! JSON is a subset of YAML's data model, so a JSON tree maps directly onto
//! [`Node`]s: objects become mappings (and so sections), arrays sequences,
//! everything else scalars. JSON has no comments; the resulting document has
//! none either.

use std::sync::Arc;

use structyaml_core::{Document, Node, Settings};

use crate::convert::{json_to_value, value_to_json};
use crate::error::Error;

/// Build a document from a parsed JSON value.
///
/// ```rust
/// use structyaml_core::Settings;
/// use structyaml_serde::document_from_json;
///
/// let doc = document_from_json(
///     Settings::shared_default(),
///     serde_json::json!({"server": {"port": 8080}}),
/// );
/// assert_eq!(doc.root().get_i32("server.port"), 8080);
/// ```
pub fn document_from_json(settings: Arc<Settings>, json: serde_json::Value) -> Document {
    Document::build(settings, &json_to_node(json))
}

/// Parse JSON text and build a document from it.
pub fn document_from_json_str(settings: Arc<Settings>, text: &str) -> Result<Document, Error> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "rejected JSON document");
        Error::decode(e.to_string())
    })?;
    Ok(document_from_json(settings, json))
}

/// Export a document as JSON. Comments are dropped.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    value_to_json(doc.to_value())
}

fn json_to_node(json: serde_json::Value) -> Node {
    match json {
        serde_json::Value::Object(map) => Node::mapping(
            map.into_iter()
                .map(|(key, value)| (Node::scalar(key), json_to_node(value)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            Node::sequence(items.into_iter().map(json_to_node).collect())
        }
        scalar => Node::scalar(json_to_value(scalar)),
    }
}
