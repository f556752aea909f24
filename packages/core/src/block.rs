//! Blocks: a value plus the comments attached to it.

use crate::Value;

/// Comments attached to a node.
///
/// `before` holds the comment lines that precede the key, `inline` the ones
/// that follow the value on the same line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comments {
    pub before: Vec<String>,
    pub inline: Vec<String>,
}

impl Comments {
    pub fn new(before: Vec<String>, inline: Vec<String>) -> Self {
        Self { before, inline }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.inline.is_empty()
    }
}

/// A value together with its comments.
///
/// Sections store their leaves as [`Mapping`]s. When a key is overwritten
/// the new block is built with [`Block::inherit`], so the comment that
/// described the old value keeps describing the new one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block<T> {
    comments: Comments,
    value: T,
}

/// A leaf block: a scalar or list value.
pub type Mapping = Block<Value>;

impl<T> Block<T> {
    /// A block without comments.
    pub fn new(value: T) -> Self {
        Self {
            comments: Comments::default(),
            value,
        }
    }

    pub fn with_comments(comments: Comments, value: T) -> Self {
        Self { comments, value }
    }

    /// A block carrying over the comments of the block it replaces.
    pub fn inherit(previous: Option<&Comments>, value: T) -> Self {
        Self {
            comments: previous.cloned().unwrap_or_default(),
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (Comments, T) {
        (self.comments, self.value)
    }

    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Comments {
        &mut self.comments
    }

    pub fn before_comments(&self) -> &[String] {
        &self.comments.before
    }

    pub fn inline_comments(&self) -> &[String] {
        &self.comments.inline
    }

    pub fn set_before_comments(&mut self, comments: Vec<String>) {
        self.comments.before = comments;
    }

    pub fn set_inline_comments(&mut self, comments: Vec<String>) {
        self.comments.inline = comments;
    }
}
