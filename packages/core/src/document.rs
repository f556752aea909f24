//! The document arena.
//!
//! Every section of a document lives in one arena owned by [`Document`] and
//! is addressed by a [`SectionId`]. A section's map stores leaves inline and
//! child sections by id, so moving a subtree is a matter of rewriting the
//! moved nodes' parent/name/path fields rather than chasing references.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::address::{Address, Settable};
use crate::section::{BlockRef, SectionMut, SectionRef};
use crate::{Comments, Error, Key, KeyMode, Mapping, Path, Settings, Value};

/// Handle to a section inside a [`Document`].
///
/// Handles are cheap to copy. Once the section is removed from the document
/// its handle goes stale: lookups return `None`, even if the arena slot is
/// later reused.
///
/// A handle belongs to the document that issued it. Any other document,
/// clones included, answers `None` for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId {
    document: u64,
    index: u32,
    generation: u32,
}

static NEXT_DOCUMENT: AtomicU64 = AtomicU64::new(0);

fn next_document() -> u64 {
    NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed)
}

/// An entry in a section's map.
#[derive(Clone, Debug)]
pub(crate) enum Child {
    Mapping(Mapping),
    Section(SectionId),
}

#[derive(Clone, Debug)]
pub(crate) struct SectionNode {
    pub(crate) comments: Comments,
    pub(crate) children: IndexMap<Key, Child>,
    pub(crate) parent: Option<SectionId>,
    pub(crate) name: Option<Key>,
    pub(crate) path: Path,
}

impl SectionNode {
    /// Copy of this node with every stored handle moved to `document`.
    fn rebound(&self, document: u64) -> SectionNode {
        let rebind = |id: SectionId| SectionId { document, ..id };
        SectionNode {
            comments: self.comments.clone(),
            children: self
                .children
                .iter()
                .map(|(key, child)| {
                    let child = match child {
                        Child::Mapping(mapping) => Child::Mapping(mapping.clone()),
                        Child::Section(id) => Child::Section(rebind(*id)),
                    };
                    (key.clone(), child)
                })
                .collect(),
            parent: self.parent.map(rebind),
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<SectionNode>,
}

/// Where an address points, relative to the section it is resolved from.
pub(crate) enum Route {
    /// The section itself (the empty path).
    Itself,
    /// Entry `key` inside the section reached through `parents`.
    Entry { parents: Vec<Key>, key: Key },
}

/// A YAML document: a root section plus the settings every section shares.
///
/// # Example
///
/// ```rust
/// use structyaml_core::{path, Document, Settings};
///
/// let mut doc = Document::with_settings(Settings::structured().into());
/// doc.root_mut().set(path!["server", "port"], 8080).unwrap();
///
/// let root = doc.root();
/// assert_eq!(root.get_i32(path!["server", "port"]), 8080);
/// assert!(root.is_section(path!["server"]));
/// ```
#[derive(Debug)]
pub struct Document {
    id: u64,
    settings: Arc<Settings>,
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: SectionId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a new document: same content, fresh identity.
impl Clone for Document {
    fn clone(&self) -> Self {
        let id = next_document();
        let slots = self
            .slots
            .iter()
            .map(|slot| Slot {
                generation: slot.generation,
                node: slot.node.as_ref().map(|node| node.rebound(id)),
            })
            .collect();
        Document {
            id,
            settings: Arc::clone(&self.settings),
            slots,
            free: self.free.clone(),
            root: SectionId {
                document: id,
                ..self.root
            },
        }
    }
}

impl Document {
    /// An empty document using the default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::shared_default())
    }

    /// An empty document using `settings`.
    pub fn with_settings(settings: Arc<Settings>) -> Self {
        let id = next_document();
        let mut doc = Document {
            id,
            settings,
            slots: Vec::new(),
            free: Vec::new(),
            root: SectionId {
                document: id,
                index: 0,
                generation: 0,
            },
        };
        doc.root = doc.alloc(SectionNode {
            comments: Comments::default(),
            children: IndexMap::new(),
            parent: None,
            name: None,
            path: Path::new(),
        });
        doc
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn root_id(&self) -> SectionId {
        self.root
    }

    pub fn root(&self) -> SectionRef<'_> {
        SectionRef::new(self, self.root, self.root_node())
    }

    pub fn root_mut(&mut self) -> SectionMut<'_> {
        let id = self.root;
        SectionMut::new(self, id)
    }

    /// Look up a section by handle. Returns `None` for stale handles.
    pub fn section(&self, id: SectionId) -> Option<SectionRef<'_>> {
        self.node(id).map(|node| SectionRef::new(self, id, node))
    }

    /// Look up a section by handle for mutation. Returns `None` for stale handles.
    pub fn section_mut(&mut self, id: SectionId) -> Option<SectionMut<'_>> {
        if self.node(id).is_some() {
            Some(SectionMut::new(self, id))
        } else {
            None
        }
    }

    /// Number of live sections, the root included.
    pub fn section_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Export the whole document as a `Value::Map`.
    pub fn to_value(&self) -> Value {
        self.root().to_value()
    }

    // === Arena ===

    fn root_node(&self) -> &SectionNode {
        // The root is allocated with the document and never freed.
        match self.slots[self.root.index as usize].node.as_ref() {
            Some(node) => node,
            None => unreachable!("document root is never freed"),
        }
    }

    pub(crate) fn node(&self, id: SectionId) -> Option<&SectionNode> {
        if id.document != self.id {
            return None;
        }
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: SectionId) -> Option<&mut SectionNode> {
        if id.document != self.id {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn alloc(&mut self, node: SectionNode) -> SectionId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            SectionId {
                document: self.id,
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            SectionId {
                document: self.id,
                index,
                generation: 0,
            }
        }
    }

    /// Release a section and every section below it.
    fn free_subtree(&mut self, id: SectionId) {
        let mut stack = vec![id];
        let mut freed = 0usize;
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            freed += 1;
            stack.extend(node.children.values().filter_map(|child| match child {
                Child::Section(child_id) => Some(*child_id),
                Child::Mapping(_) => None,
            }));
        }
        tracing::debug!(freed, "released section subtree");
    }

    // === Resolution ===

    pub(crate) fn adapt(&self, key: Key) -> Key {
        key.adapt(self.settings.key_mode())
    }

    /// Split an address into the sections to walk and the final key.
    pub(crate) fn route(&self, address: Address) -> Route {
        let segments: Vec<Key> = match address {
            Address::Path(path) => path.iter().cloned().map(|key| self.adapt(key)).collect(),
            Address::Key(key) => {
                let key = self.adapt(key);
                let separator = self.settings.separator();
                match key {
                    Key::String(s)
                        if self.settings.key_mode() == KeyMode::String
                            && s.contains(separator) =>
                    {
                        s.split(separator).map(Key::from).collect()
                    }
                    key => vec![key],
                }
            }
        };
        let mut parents = segments;
        match parents.pop() {
            Some(key) => Route::Entry { parents, key },
            None => Route::Itself,
        }
    }

    /// Follow `parents` from `from`, requiring a section at every step.
    pub(crate) fn walk(&self, from: SectionId, parents: &[Key]) -> Option<SectionId> {
        let mut current = from;
        for key in parents {
            match self.node(current)?.children.get(key) {
                Some(Child::Section(id)) => current = *id,
                Some(Child::Mapping(_)) => {
                    tracing::trace!(%key, "path runs through a leaf");
                    return None;
                }
                None => {
                    tracing::trace!(%key, "path segment missing");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Follow `parents` from `from`, creating sections where needed.
    pub(crate) fn walk_create(&mut self, from: SectionId, parents: &[Key]) -> Option<SectionId> {
        let mut current = from;
        for key in parents {
            current = self.create_child_section(current, key.clone())?;
        }
        Some(current)
    }

    /// The section that contains the entry `address` points at.
    pub(crate) fn resolve_parent(&self, from: SectionId, address: Address) -> Option<SectionId> {
        match self.route(address) {
            Route::Itself => Some(from),
            Route::Entry { parents, .. } => self.walk(from, &parents),
        }
    }

    // === Mutation ===

    fn child_comments(&self, parent: SectionId, key: &Key) -> Option<Comments> {
        match self.node(parent)?.children.get(key)? {
            Child::Mapping(mapping) => Some(mapping.comments().clone()),
            Child::Section(id) => self.node(*id).map(|node| node.comments.clone()),
        }
    }

    /// Store `child` under `key`, releasing whatever section it replaces.
    fn put_child(&mut self, parent: SectionId, key: Key, child: Child) {
        let incoming = match &child {
            Child::Section(id) => Some(*id),
            Child::Mapping(_) => None,
        };
        let Some(node) = self.node_mut(parent) else {
            return;
        };
        let replaced = node.children.insert(key, child);
        if let Some(Child::Section(old)) = replaced {
            if incoming != Some(old) {
                self.free_subtree(old);
            }
        }
    }

    /// Create an empty section under `key` and attach it to `parent`.
    pub(crate) fn attach_new_section(
        &mut self,
        parent: SectionId,
        key: Key,
        comments: Comments,
    ) -> Option<SectionId> {
        let path = self.node(parent)?.path.append(key.clone());
        let id = self.alloc(SectionNode {
            comments,
            children: IndexMap::new(),
            parent: Some(parent),
            name: Some(key.clone()),
            path,
        });
        self.put_child(parent, key, Child::Section(id));
        Some(id)
    }

    pub(crate) fn attach_mapping(&mut self, parent: SectionId, key: Key, mapping: Mapping) {
        self.put_child(parent, key, Child::Mapping(mapping));
    }

    /// Return the section under `key`, creating it if needed.
    ///
    /// A leaf in the way is replaced; its comments move to the new section
    /// and its value is dropped.
    pub(crate) fn create_child_section(&mut self, parent: SectionId, key: Key) -> Option<SectionId> {
        match self.node(parent)?.children.get(&key) {
            Some(Child::Section(id)) => Some(*id),
            Some(Child::Mapping(mapping)) => {
                let comments = mapping.comments().clone();
                tracing::debug!(%key, "replacing leaf value with a section");
                self.attach_new_section(parent, key, comments)
            }
            None => self.attach_new_section(parent, key, Comments::default()),
        }
    }

    /// Store `value` directly under `key` in `parent`.
    pub(crate) fn set_child(
        &mut self,
        parent: SectionId,
        key: Key,
        value: Settable,
    ) -> Result<(), Error> {
        match value {
            Settable::Value(Value::Null) => {
                tracing::debug!(%key, "null value removes the key; prefer remove()");
                self.remove_child(parent, &key);
            }
            Settable::Section(id) => self.relocate(id, parent, key)?,
            Settable::Block(mapping) => match mapping.into_parts() {
                (comments, Value::Map(map)) => self.attach_map(parent, key, comments, map),
                (comments, value) => {
                    self.attach_mapping(parent, key, Mapping::with_comments(comments, value))
                }
            },
            Settable::Map(map) | Settable::Value(Value::Map(map)) => {
                let comments = self.child_comments(parent, &key).unwrap_or_default();
                self.attach_map(parent, key, comments, map);
            }
            Settable::Value(value) => {
                let comments = self.child_comments(parent, &key);
                self.attach_mapping(parent, key, Mapping::inherit(comments.as_ref(), value));
            }
        }
        Ok(())
    }

    fn attach_map(
        &mut self,
        parent: SectionId,
        key: Key,
        comments: Comments,
        map: IndexMap<Key, Value>,
    ) {
        if let Some(id) = self.attach_new_section(parent, key, comments) {
            self.populate(id, map);
        }
    }

    /// Fill a section from a raw map, nested maps becoming nested sections.
    fn populate(&mut self, section: SectionId, map: IndexMap<Key, Value>) {
        for (key, value) in map {
            let key = self.adapt(key);
            match value {
                Value::Map(nested) => self.attach_map(section, key, Comments::default(), nested),
                other => self.attach_mapping(section, key, Mapping::new(other)),
            }
        }
    }

    /// Remove the entry `key` from `parent`. Returns whether anything was removed.
    pub(crate) fn remove_child(&mut self, parent: SectionId, key: &Key) -> bool {
        let Some(node) = self.node_mut(parent) else {
            return false;
        };
        match node.children.shift_remove(key) {
            Some(Child::Section(id)) => {
                self.free_subtree(id);
                true
            }
            Some(Child::Mapping(_)) => true,
            None => false,
        }
    }

    /// Remove every entry of `section`.
    pub(crate) fn clear(&mut self, section: SectionId) {
        let Some(node) = self.node_mut(section) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children.into_values() {
            if let Child::Section(id) = child {
                self.free_subtree(id);
            }
        }
    }

    /// Move section `moved` under `key` in `target`.
    ///
    /// The section is detached from its current parent first, so replacing
    /// one of its own ancestors is safe. Every section in the moved subtree
    /// is re-stamped before this returns.
    fn relocate(&mut self, moved: SectionId, target: SectionId, key: Key) -> Result<(), Error> {
        self.check_relocation(moved, target, &[], &key)?;
        let (old_parent, old_name, from) = match self.node(moved) {
            Some(node) => (node.parent, node.name.clone(), node.path.clone()),
            None => return Err(Error::StaleSection),
        };
        let to = match self.node(target) {
            Some(node) => node.path.append(key.clone()),
            None => return Err(Error::StaleSection),
        };

        if let (Some(parent), Some(name)) = (old_parent, old_name) {
            if !(parent == target && name == key) {
                if let Some(node) = self.node_mut(parent) {
                    node.children.shift_remove(&name);
                }
            }
        }

        self.put_child(target, key.clone(), Child::Section(moved));
        self.restamp(moved, target, key);
        tracing::debug!(%from, %to, "relocated section");
        Ok(())
    }

    /// Check that `moved` may be stored under `key` in the section reached
    /// from `from` through `parents`, without creating anything.
    ///
    /// Sections along `parents` that do not exist yet would be created below
    /// the deepest existing one, so only that section's ancestry matters.
    pub(crate) fn check_relocation(
        &self,
        moved: SectionId,
        from: SectionId,
        parents: &[Key],
        key: &Key,
    ) -> Result<(), Error> {
        if moved.document != self.id {
            return Err(Error::ForeignSection);
        }
        let Some(node) = self.node(moved) else {
            return Err(Error::StaleSection);
        };
        let Some(start) = self.node(from) else {
            return Err(Error::StaleSection);
        };

        let mut deepest = from;
        for segment in parents {
            match self.node(deepest).and_then(|n| n.children.get(segment)) {
                Some(Child::Section(id)) => deepest = *id,
                _ => break,
            }
        }

        // The root cannot move, and nothing can move into its own subtree.
        let into_own_subtree =
            std::iter::successors(Some(deepest), |id| self.node(*id).and_then(|n| n.parent))
                .any(|id| id == moved);
        if node.parent.is_some() && !into_own_subtree {
            return Ok(());
        }
        let to = parents
            .iter()
            .chain(std::iter::once(key))
            .fold(start.path.clone(), |path, segment| path.append(segment.clone()));
        Err(Error::InvalidRelocation {
            from: node.path.clone(),
            to,
        })
    }

    /// Deep-copy `source`, which may belong to another document, under `key`
    /// in `parent`. The copy keeps every comment of the source subtree; its
    /// keys are adapted to this document's key mode.
    pub(crate) fn import(
        &mut self,
        parent: SectionId,
        key: Key,
        source: SectionRef<'_>,
    ) -> Option<SectionId> {
        let id = self.attach_new_section(parent, key, source.comments().clone())?;
        for (child_key, block) in source.entries() {
            let child_key = self.adapt(child_key.clone());
            match block {
                BlockRef::Mapping(mapping) => self.attach_mapping(id, child_key, mapping.clone()),
                BlockRef::Section(section) => {
                    self.import(id, child_key, section);
                }
            }
        }
        Some(id)
    }

    /// Rewrite parent, name and path of `id` and the paths of all its descendants.
    fn restamp(&mut self, id: SectionId, parent: SectionId, name: Key) {
        let Some(parent_path) = self.node(parent).map(|node| node.path.clone()) else {
            return;
        };
        if let Some(node) = self.node_mut(id) {
            node.path = parent_path.append(name.clone());
            node.parent = Some(parent);
            node.name = Some(name);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            let path = node.path.clone();
            let sections: Vec<(Key, SectionId)> = node
                .children
                .iter()
                .filter_map(|(key, child)| match child {
                    Child::Section(child_id) => Some((key.clone(), *child_id)),
                    Child::Mapping(_) => None,
                })
                .collect();
            for (key, child_id) in sections {
                if let Some(child) = self.node_mut(child_id) {
                    child.path = path.append(key.clone());
                    child.parent = Some(current);
                    child.name = Some(key);
                }
                stack.push(child_id);
            }
        }
    }
}
