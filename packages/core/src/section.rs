//! Sections: the container nodes of a document.
//!
//! A section is read through a [`SectionRef`] and changed through a
//! [`SectionMut`]; both are views into the owning [`Document`]'s arena.
//!
//! # Addressing
//!
//! Every operation taking an address accepts either a [`Path`] or a single
//! key (see [`Address`]):
//!
//! - a `Path` is walked segment by segment, each intermediate segment naming
//!   a child section;
//! - a key is a direct child key, unless the document uses
//!   [`KeyMode::String`] and the key is a string containing the separator, in
//!   which case it is split into a path first.
//!
//! ```rust
//! use structyaml_core::{path, Document, Settings};
//!
//! let mut doc = Document::new();
//! doc.root_mut().set("server.port", 8080).unwrap();
//! assert_eq!(doc.root().get_i32(path!["server", "port"]), 8080);
//!
//! let mut doc = Document::with_settings(Settings::structured().into());
//! doc.root_mut().set("server.port", 8080).unwrap();
//! assert!(doc.root().get_section_safe("server").is_none());
//! assert_eq!(doc.root().get_i32("server.port"), 8080);
//! ```

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::address::{Address, Settable};
use crate::document::{Child, Document, Route, SectionId, SectionNode};
use crate::{Comments, Error, Key, KeyMode, Mapping, Path, Settings, Value};

/// A resolved value: either a child section or a leaf value.
#[derive(Clone, Copy, Debug)]
pub enum Item<'a> {
    Section(SectionRef<'a>),
    Value(&'a Value),
}

impl<'a> Item<'a> {
    pub fn is_section(&self) -> bool {
        matches!(self, Item::Section(_))
    }

    pub fn as_section(&self) -> Option<SectionRef<'a>> {
        match self {
            Item::Section(section) => Some(*section),
            Item::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Item::Section(_) => None,
            Item::Value(value) => Some(value),
        }
    }

    /// Owned copy; sections are exported as `Value::Map`.
    pub fn to_value(&self) -> Value {
        match self {
            Item::Section(section) => section.to_value(),
            Item::Value(value) => (*value).clone(),
        }
    }
}

impl PartialEq for Item<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Section(a), Item::Section(b)) => a.same_section(b),
            (Item::Value(a), Item::Value(b)) => a == b,
            _ => false,
        }
    }
}

/// A resolved block: a leaf mapping or a child section, with its comments.
#[derive(Clone, Copy, Debug)]
pub enum BlockRef<'a> {
    Mapping(&'a Mapping),
    Section(SectionRef<'a>),
}

impl<'a> BlockRef<'a> {
    pub fn comments(&self) -> &'a Comments {
        match self {
            BlockRef::Mapping(mapping) => mapping.comments(),
            BlockRef::Section(section) => section.comments(),
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, BlockRef::Section(_))
    }

    pub fn as_mapping(&self) -> Option<&'a Mapping> {
        match self {
            BlockRef::Mapping(mapping) => Some(mapping),
            BlockRef::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<SectionRef<'a>> {
        match self {
            BlockRef::Mapping(_) => None,
            BlockRef::Section(section) => Some(*section),
        }
    }

    /// The block's value.
    pub fn item(&self) -> Item<'a> {
        match self {
            BlockRef::Mapping(mapping) => Item::Value(mapping.value()),
            BlockRef::Section(section) => Item::Section(*section),
        }
    }
}

fn block_ref<'a>(doc: &'a Document, child: &'a Child) -> Option<BlockRef<'a>> {
    match child {
        Child::Mapping(mapping) => Some(BlockRef::Mapping(mapping)),
        Child::Section(id) => doc.section(*id).map(BlockRef::Section),
    }
}

/// Read access to one section of a document.
#[derive(Clone, Copy)]
pub struct SectionRef<'a> {
    doc: &'a Document,
    id: SectionId,
    node: &'a SectionNode,
}

impl<'a> SectionRef<'a> {
    pub(crate) fn new(doc: &'a Document, id: SectionId, node: &'a SectionNode) -> Self {
        Self { doc, id, node }
    }

    fn same_section(&self, other: &SectionRef<'_>) -> bool {
        self.id == other.id
    }

    // === Identity ===

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn settings(&self) -> &'a Settings {
        self.doc.settings()
    }

    /// This section's key in its parent; `None` for the root.
    pub fn name(&self) -> Option<&'a Key> {
        self.node.name.as_ref()
    }

    /// Path from the document root to this section.
    pub fn path(&self) -> &'a Path {
        &self.node.path
    }

    pub fn parent(&self) -> Option<SectionRef<'a>> {
        self.node.parent.and_then(|id| self.doc.section(id))
    }

    pub fn root(&self) -> SectionRef<'a> {
        self.doc.root()
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn comments(&self) -> &'a Comments {
        &self.node.comments
    }

    pub fn before_comments(&self) -> &'a [String] {
        &self.node.comments.before
    }

    pub fn inline_comments(&self) -> &'a [String] {
        &self.node.comments.inline
    }

    // === Contents ===

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.node.children.len()
    }

    /// Whether this section holds no entries.
    ///
    /// With `deep`, a section whose only entries are (recursively) empty
    /// sections also counts as empty.
    pub fn is_empty(&self, deep: bool) -> bool {
        if !deep {
            return self.node.children.is_empty();
        }
        self.node.children.values().all(|child| match child {
            Child::Mapping(_) => false,
            Child::Section(id) => self
                .doc
                .section(*id)
                .map_or(true, |section| section.is_empty(true)),
        })
    }

    /// Direct entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a Key, BlockRef<'a>)> + 'a {
        let doc = self.doc;
        self.node
            .children
            .iter()
            .filter_map(move |(key, child)| block_ref(doc, child).map(|block| (key, block)))
    }

    // === Resolution ===

    /// The block at `address`. The empty path resolves to this section.
    pub fn get_block(&self, address: impl Into<Address>) -> Option<BlockRef<'a>> {
        match self.doc.route(address.into()) {
            Route::Itself => Some(BlockRef::Section(*self)),
            Route::Entry { parents, key } => {
                let parent = self.doc.walk(self.id, &parents)?;
                let child = self.doc.node(parent)?.children.get(&key)?;
                block_ref(self.doc, child)
            }
        }
    }

    /// The section that contains (or would contain) the entry at `address`.
    pub fn get_parent(&self, address: impl Into<Address>) -> Option<SectionRef<'a>> {
        let id = self.doc.resolve_parent(self.id, address.into())?;
        self.doc.section(id)
    }

    pub fn contains(&self, address: impl Into<Address>) -> bool {
        self.get_block(address).is_some()
    }

    pub fn is_section(&self, address: impl Into<Address>) -> bool {
        self.get_block(address).is_some_and(|block| block.is_section())
    }

    /// The value at `address`: a section, or a leaf's value.
    pub fn get_safe(&self, address: impl Into<Address>) -> Option<Item<'a>> {
        self.get_block(address).map(|block| block.item())
    }

    pub fn get_section_safe(&self, address: impl Into<Address>) -> Option<SectionRef<'a>> {
        self.get_block(address)?.as_section()
    }

    // === Enumeration ===

    fn collect_blocks(&self, deep: bool, prefix: &Path, out: &mut IndexMap<Path, BlockRef<'a>>) {
        for (key, block) in self.entries() {
            let path = prefix.append(key.clone());
            if deep {
                if let BlockRef::Section(section) = block {
                    out.insert(path.clone(), block);
                    section.collect_blocks(true, &path, out);
                    continue;
                }
            }
            out.insert(path, block);
        }
    }

    /// Every block below this section, keyed by path relative to it.
    ///
    /// Without `deep` only direct entries are listed. With `deep`, each
    /// section is followed by its own descendants.
    pub fn blocks(&self, deep: bool) -> IndexMap<Path, BlockRef<'a>> {
        let mut out = IndexMap::new();
        self.collect_blocks(deep, &Path::new(), &mut out);
        out
    }

    pub fn keys(&self, deep: bool) -> IndexSet<Path> {
        self.blocks(deep).into_keys().collect()
    }

    pub fn values(&self, deep: bool) -> IndexMap<Path, Item<'a>> {
        self.blocks(deep)
            .into_iter()
            .map(|(path, block)| (path, block.item()))
            .collect()
    }

    fn require_string_mode(&self, operation: &'static str) -> Result<char, Error> {
        let settings = self.settings();
        match settings.key_mode() {
            KeyMode::String => Ok(settings.separator()),
            mode => Err(Error::Unsupported { operation, mode }),
        }
    }

    /// Like [`keys`](Self::keys), rendered as separator-joined strings.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] unless the document uses [`KeyMode::String`].
    pub fn keys_as_strings(&self, deep: bool) -> Result<IndexSet<String>, Error> {
        let separator = self.require_string_mode("keys_as_strings")?;
        Ok(self
            .keys(deep)
            .iter()
            .map(|path| path.join_with(separator))
            .collect())
    }

    /// Like [`values`](Self::values), keyed by separator-joined strings.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] unless the document uses [`KeyMode::String`].
    pub fn string_keyed_values(&self, deep: bool) -> Result<IndexMap<String, Item<'a>>, Error> {
        let separator = self.require_string_mode("string_keyed_values")?;
        Ok(self
            .values(deep)
            .into_iter()
            .map(|(path, item)| (path.join_with(separator), item))
            .collect())
    }

    /// This section's path as a separator-joined string.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] unless the document uses [`KeyMode::String`].
    pub fn path_as_string(&self) -> Result<String, Error> {
        let separator = self.require_string_mode("path_as_string")?;
        Ok(self.node.path.join_with(separator))
    }

    /// Export this subtree as a `Value::Map`, comments dropped.
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.entries()
                .map(|(key, block)| (key.clone(), block.item().to_value()))
                .collect(),
        )
    }
}

impl fmt::Debug for SectionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionRef")
            .field("id", &self.id)
            .field("path", &self.node.path)
            .field("len", &self.node.children.len())
            .finish()
    }
}

/// Unwrap a lookup that cannot fail for a live section.
///
/// A `SectionMut` is only created for a live id, and none of its operations
/// can free the section it points at.
fn live<T>(value: Option<T>) -> T {
    match value {
        Some(value) => value,
        None => unreachable!("section handle outlived its node"),
    }
}

/// Write access to one section of a document.
pub struct SectionMut<'a> {
    doc: &'a mut Document,
    id: SectionId,
}

impl<'a> SectionMut<'a> {
    pub(crate) fn new(doc: &'a mut Document, id: SectionId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Borrow as a read view.
    pub fn view(&self) -> SectionRef<'_> {
        live(self.doc.section(self.id))
    }

    /// Turn into a read view for the rest of the borrow.
    pub fn into_ref(self) -> SectionRef<'a> {
        let doc: &'a Document = self.doc;
        live(doc.section(self.id))
    }

    /// Store `value` at `address`.
    ///
    /// Missing sections along a path are created; a leaf found in the way is
    /// replaced by a section that keeps the leaf's comments but not its value.
    /// What is stored depends on the [`Settable`] variant:
    ///
    /// - a leaf value replaces the entry, keeping the previous entry's comments;
    /// - a map becomes a new section (nested maps, nested sections), also
    ///   keeping the previous entry's comments;
    /// - a prepared [`Mapping`] is stored as-is, with its own comments;
    /// - a [`SectionId`] moves that section of this document here, re-stamping
    ///   the paths of its whole subtree. The move is checked before any
    ///   missing section along the path is created, so a rejected move
    ///   leaves the document unchanged. Sections of other documents are
    ///   copied in with [`import`](Self::import) instead;
    /// - `Value::Null` removes the entry. This is kept for callers that
    ///   predate [`remove`](Self::remove), which should be preferred.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsupported`] for the empty path
    /// - [`Error::InvalidRelocation`] when moving the root, or moving a section
    ///   into its own subtree
    /// - [`Error::StaleSection`] when moving a section that no longer exists
    /// - [`Error::ForeignSection`] when moving a section of another document
    pub fn set(
        &mut self,
        address: impl Into<Address>,
        value: impl Into<Settable>,
    ) -> Result<(), Error> {
        let value = value.into();
        match self.doc.route(address.into()) {
            Route::Itself => Err(Error::Unsupported {
                operation: "set on the empty path",
                mode: self.doc.settings().key_mode(),
            }),
            Route::Entry { parents, key } => {
                if let Settable::Section(moved) = &value {
                    self.doc.check_relocation(*moved, self.id, &parents, &key)?;
                }
                let parent = live(self.doc.walk_create(self.id, &parents));
                self.doc.set_child(parent, key, value)
            }
        }
    }

    /// Copy `source` and its whole subtree to `address`, comments included.
    ///
    /// `source` usually belongs to another document, such as a set of
    /// defaults spliced into a user's file. Keys are adapted to this
    /// document's key mode. Whatever was stored at `address` is replaced.
    ///
    /// ```rust
    /// use structyaml_core::Document;
    ///
    /// let mut defaults = Document::new();
    /// defaults.root_mut().set("server.port", 8080).unwrap();
    ///
    /// let mut doc = Document::new();
    /// let server = defaults.root().get_section_safe("server").unwrap();
    /// doc.root_mut().import("server", server).unwrap();
    /// assert_eq!(doc.root().get_i32("server.port"), 8080);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] for the empty path.
    pub fn import(
        &mut self,
        address: impl Into<Address>,
        source: SectionRef<'_>,
    ) -> Result<SectionMut<'_>, Error> {
        match self.doc.route(address.into()) {
            Route::Itself => Err(Error::Unsupported {
                operation: "import on the empty path",
                mode: self.doc.settings().key_mode(),
            }),
            Route::Entry { parents, key } => {
                let parent = live(self.doc.walk_create(self.id, &parents));
                let id = live(self.doc.import(parent, key, source));
                tracing::debug!(from = %source.path(), "imported section");
                Ok(SectionMut::new(self.doc, id))
            }
        }
    }

    /// Return the section at `address`, creating it and any missing
    /// ancestors. An existing section is returned unchanged.
    pub fn create_section(&mut self, address: impl Into<Address>) -> SectionMut<'_> {
        let id = match self.doc.route(address.into()) {
            Route::Itself => self.id,
            Route::Entry { parents, key } => {
                let parent = live(self.doc.walk_create(self.id, &parents));
                live(self.doc.create_child_section(parent, key))
            }
        };
        SectionMut::new(self.doc, id)
    }

    /// Remove the entry at `address`. Returns whether anything was removed.
    ///
    /// An address whose parent cannot be resolved removes nothing.
    pub fn remove(&mut self, address: impl Into<Address>) -> bool {
        match self.doc.route(address.into()) {
            Route::Itself => false,
            Route::Entry { parents, key } => match self.doc.walk(self.id, &parents) {
                Some(parent) => self.doc.remove_child(parent, &key),
                None => false,
            },
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.doc.clear(self.id);
    }

    pub fn get_section_mut(&mut self, address: impl Into<Address>) -> Option<SectionMut<'_>> {
        let id = self.view().get_section_safe(address)?.id();
        Some(SectionMut::new(self.doc, id))
    }

    /// This section's own comments.
    pub fn comments_mut(&mut self) -> &mut Comments {
        &mut live(self.doc.node_mut(self.id)).comments
    }

    /// Comments of the entry at `address`, leaf or section.
    pub fn entry_comments_mut(&mut self, address: impl Into<Address>) -> Option<&mut Comments> {
        let (parent, key) = match self.doc.route(address.into()) {
            Route::Itself => return Some(self.comments_mut()),
            Route::Entry { parents, key } => (self.doc.walk(self.id, &parents)?, key),
        };
        let section = match self.doc.node(parent)?.children.get(&key)? {
            Child::Section(id) => Some(*id),
            Child::Mapping(_) => None,
        };
        match section {
            Some(id) => self.doc.node_mut(id).map(|node| &mut node.comments),
            None => self.mapping_in(parent, &key).map(Mapping::comments_mut),
        }
    }

    /// The leaf at `address`, for editing its value or comments in place.
    pub fn mapping_mut(&mut self, address: impl Into<Address>) -> Option<&mut Mapping> {
        match self.doc.route(address.into()) {
            Route::Itself => None,
            Route::Entry { parents, key } => {
                let parent = self.doc.walk(self.id, &parents)?;
                self.mapping_in(parent, &key)
            }
        }
    }

    fn mapping_in(&mut self, parent: SectionId, key: &Key) -> Option<&mut Mapping> {
        match self.doc.node_mut(parent)?.children.get_mut(key)? {
            Child::Mapping(mapping) => Some(mapping),
            Child::Section(_) => None,
        }
    }
}

impl fmt::Debug for SectionMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}
