//! Building documents from parsed YAML.
//!
//! The parser itself is external. Anything that can hand out comments, a
//! constructed value and, for mappings, ordered key/value pairs can be turned
//! into a [`Document`] through [`SourceNode`].

use std::sync::Arc;

use crate::document::SectionId;
use crate::{Comments, Document, Key, Mapping, Settings, Value};

/// A node of a parsed YAML tree.
pub trait SourceNode {
    /// Comment lines preceding the node.
    fn before_comments(&self) -> Vec<String>;

    /// Comment lines trailing the node on the same line.
    fn inline_comments(&self) -> Vec<String>;

    /// The native value of the node.
    fn construct(&self) -> Value;

    /// The ordered key/value pairs, if the node is a mapping.
    fn pairs(&self) -> Option<Vec<(&Self, &Self)>>;
}

impl Comments {
    /// Comments of a mapping entry: the lines above the key, and the ones
    /// trailing the value.
    pub fn from_nodes<N: SourceNode + ?Sized>(key: &N, value: &N) -> Self {
        Comments::new(key.before_comments(), value.inline_comments())
    }
}

/// An in-memory [`SourceNode`].
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    comments: Comments,
    kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Scalar(Value),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

impl Node {
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self {
            comments: Comments::default(),
            kind: NodeKind::Scalar(value.into()),
        }
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self {
            comments: Comments::default(),
            kind: NodeKind::Sequence(items),
        }
    }

    pub fn mapping(pairs: Vec<(Node, Node)>) -> Self {
        Self {
            comments: Comments::default(),
            kind: NodeKind::Mapping(pairs),
        }
    }

    #[must_use]
    pub fn with_before(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.comments.before = lines.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_inline(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.comments.inline = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn comments(&self) -> &Comments {
        &self.comments
    }
}

impl SourceNode for Node {
    fn before_comments(&self) -> Vec<String> {
        self.comments.before.clone()
    }

    fn inline_comments(&self) -> Vec<String> {
        self.comments.inline.clone()
    }

    fn construct(&self) -> Value {
        match &self.kind {
            NodeKind::Scalar(value) => value.clone(),
            NodeKind::Sequence(items) => Value::List(items.iter().map(Node::construct).collect()),
            NodeKind::Mapping(pairs) => Value::Map(
                pairs
                    .iter()
                    .map(|(key, value)| (Key::from_value(key.construct()), value.construct()))
                    .collect(),
            ),
        }
    }

    fn pairs(&self) -> Option<Vec<(&Self, &Self)>> {
        match &self.kind {
            NodeKind::Mapping(pairs) => Some(pairs.iter().map(|(k, v)| (k, v)).collect()),
            _ => None,
        }
    }
}

impl Document {
    /// Build a document from a parsed tree.
    ///
    /// Nested mappings become sections, everything else a leaf holding the
    /// node's constructed value. Keys are adapted to the key mode, and a key
    /// repeated within one mapping keeps its first position but its last
    /// value. A root that is not a mapping yields an empty document.
    pub fn build<N: SourceNode>(settings: Arc<Settings>, root: &N) -> Self {
        let mut doc = Document::with_settings(settings);
        let root_id = doc.root_id();
        if let Some(node) = doc.node_mut(root_id) {
            node.comments = Comments::new(root.before_comments(), root.inline_comments());
        }
        match root.pairs() {
            Some(pairs) => doc.fill(root_id, pairs),
            None => tracing::debug!("document root is not a mapping; starting empty"),
        }
        tracing::debug!(sections = doc.section_count(), "built document");
        doc
    }

    fn fill<N: SourceNode>(&mut self, section: SectionId, pairs: Vec<(&N, &N)>) {
        for (key_node, value_node) in pairs {
            let key = self.adapt(Key::from_value(key_node.construct()));
            let comments = Comments::from_nodes(key_node, value_node);
            match value_node.pairs() {
                Some(nested) => {
                    if let Some(id) = self.attach_new_section(section, key, comments) {
                        self.fill(id, nested);
                    }
                }
                None => self.attach_mapping(
                    section,
                    key,
                    Mapping::with_comments(comments, value_node.construct()),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    fn entry(key: impl Into<Value>, value: Node) -> (Node, Node) {
        (Node::scalar(key), value)
    }

    fn server_config() -> Node {
        Node::mapping(vec![
            (
                Node::scalar("server").with_before(["# network"]),
                Node::mapping(vec![
                    entry("host", Node::scalar("localhost")),
                    (
                        Node::scalar("port"),
                        Node::scalar(8080).with_inline(["# default"]),
                    ),
                ]),
            ),
            entry(
                "tags",
                Node::sequence(vec![Node::scalar("a"), Node::scalar("b")]),
            ),
            entry(1, Node::scalar(true)),
        ])
    }

    #[test]
    fn mappings_become_sections() {
        let doc = Document::build(Settings::shared_default(), &server_config());
        let root = doc.root();
        assert!(root.is_section("server"));
        assert_eq!(root.get_string("server.host"), "localhost");
        assert_eq!(root.get_i32("server.port"), 8080);
        assert_eq!(root.get_list("tags").len(), 2);
        assert_eq!(doc.section_count(), 2);
    }

    #[test]
    fn comments_are_split_between_key_and_value() {
        let doc = Document::build(Settings::shared_default(), &server_config());
        let root = doc.root();
        let server = root.get_block("server").unwrap();
        assert_eq!(server.comments().before, vec!["# network"]);
        let port = root.get_block("server.port").unwrap();
        assert_eq!(port.comments().inline, vec!["# default"]);
        assert!(port.comments().before.is_empty());
    }

    #[test]
    fn keys_follow_key_mode() {
        let doc = Document::build(Settings::shared_default(), &server_config());
        assert!(doc.root().contains(path!["1"]));

        let doc = Document::build(Settings::structured().into(), &server_config());
        assert!(doc.root().contains(path![1]));
        assert!(!doc.root().contains(path!["1"]));
    }

    #[test]
    fn later_duplicates_win() {
        let root = Node::mapping(vec![
            entry("a", Node::scalar(1)),
            entry("b", Node::scalar(2)),
            entry("a", Node::scalar(3)),
        ]);
        let doc = Document::build(Settings::shared_default(), &root);
        assert_eq!(doc.root().get_i32("a"), 3);
        let keys: Vec<String> = doc.root().keys(false).iter().map(|p| p.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_section_is_released() {
        let root = Node::mapping(vec![
            entry("a", Node::mapping(vec![entry("x", Node::scalar(1))])),
            entry("a", Node::scalar("flat")),
        ]);
        let doc = Document::build(Settings::shared_default(), &root);
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.root().get_string("a"), "flat");
    }

    #[test]
    fn scalar_root_yields_empty_document() {
        let root = Node::scalar("just text").with_before(["# header"]);
        let doc = Document::build(Settings::shared_default(), &root);
        assert!(doc.root().is_empty(true));
        assert_eq!(doc.root().before_comments(), ["# header"]);
    }

    #[test]
    fn complex_keys_become_flow_strings() {
        let root = Node::mapping(vec![(
            Node::sequence(vec![Node::scalar(1), Node::scalar(2)]),
            Node::scalar("pair"),
        )]);
        let doc = Document::build(Settings::structured().into(), &root);
        assert_eq!(doc.root().get_string(path!["[1, 2]"]), "pair");
    }

    #[test]
    fn construct_renders_nested_values() {
        let value = server_config().construct();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert!(map[&Key::from("server")].is_map());
    }
}
