//! Block representation for the note forest.
//!
//! A note is an ordered forest of [`Block`]s. Each block carries a short text
//! payload, a [`BlockType`] that controls how it is displayed, and an ordered
//! list of children it owns exclusively. The `parent_path` field is a
//! denormalized structural address (the ids of every ancestor, outermost
//! first) that [`BlockTree`](super::tree::BlockTree) keeps consistent across
//! every mutation.
//!
//! # Example
//!
//! ```
//! use blocknote::document::block::{Block, BlockId, BlockType};
//!
//! let heading = Block::new(BlockId::from("h1"), BlockType::Heading1, "Notes");
//! assert!(heading.is_heading());
//! assert!(heading.parent_path.is_empty());
//!
//! let fresh = Block::empty(BlockType::Text);
//! assert!(fresh.content.is_empty());
//! assert_ne!(fresh.id, heading.id);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a block, stable for the block's lifetime.
///
/// Freshly generated ids are random UUIDv4 strings. Any string is accepted,
/// so hand-written documents and tests can use readable ids like `"h1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generates a new random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Display style of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Plain paragraph text
    #[default]
    Text,
    /// Top-level heading, rendered bold
    Heading1,
}

impl BlockType {
    /// Returns the other block type; used by the heading toggle.
    pub fn toggled(self) -> Self {
        match self {
            BlockType::Text => BlockType::Heading1,
            BlockType::Heading1 => BlockType::Text,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Text => write!(f, "text"),
            BlockType::Heading1 => write!(f, "heading1"),
        }
    }
}

/// One node of the note forest.
///
/// Blocks own their children directly; there is no shared ownership, so a
/// block appears in exactly one place in the forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    /// Ancestor ids from the top-level block down to (not including) this one
    #[serde(default)]
    pub parent_path: Vec<BlockId>,
    #[serde(default)]
    pub children: Vec<Block>,
    #[serde(default)]
    pub is_focused: bool,
}

impl Block {
    /// Creates an unfocused top-level block with the given id and content.
    pub fn new(id: BlockId, block_type: BlockType, content: impl Into<String>) -> Self {
        Self {
            id,
            block_type,
            content: content.into(),
            parent_path: Vec::new(),
            children: Vec::new(),
            is_focused: false,
        }
    }

    /// Creates a block with a fresh id and no content.
    pub fn empty(block_type: BlockType) -> Self {
        Self::new(BlockId::new(), block_type, String::new())
    }

    /// Builder-style helper that attaches children and fixes up their paths.
    ///
    /// ```
    /// use blocknote::document::block::{Block, BlockId, BlockType};
    ///
    /// let parent = Block::new(BlockId::from("a"), BlockType::Text, "a")
    ///     .with_children(vec![Block::new(BlockId::from("b"), BlockType::Text, "b")]);
    /// assert_eq!(parent.children[0].parent_path, vec![BlockId::from("a")]);
    /// ```
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        let own_path = self.child_path();
        for child in &mut self.children {
            child.set_parent_path(own_path.clone());
        }
        self
    }

    pub fn is_heading(&self) -> bool {
        self.block_type == BlockType::Heading1
    }

    /// The `parent_path` every direct child of this block must carry.
    pub fn child_path(&self) -> Vec<BlockId> {
        let mut path = self.parent_path.clone();
        path.push(self.id.clone());
        path
    }

    /// Sets this block's path and rewrites every descendant's prefix to match.
    pub fn set_parent_path(&mut self, path: Vec<BlockId>) {
        self.parent_path = path;
        let own_path = self.child_path();
        for child in &mut self.children {
            child.set_parent_path(own_path.clone());
        }
    }

    /// Clears the focus flag on this block and all descendants.
    pub fn clear_focus(&mut self) {
        self.is_focused = false;
        for child in &mut self.children {
            child.clear_focus();
        }
    }

    /// Number of blocks in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Block::subtree_len).sum::<usize>()
    }

    /// Nesting depth implied by the path (0 for top-level blocks).
    pub fn depth(&self) -> usize {
        self.parent_path.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = BlockId::new();
        let b = BlockId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_set_parent_path_rewrites_descendants() {
        let mut block = Block::new(BlockId::from("a"), BlockType::Text, "").with_children(vec![
            Block::new(BlockId::from("b"), BlockType::Text, "")
                .with_children(vec![Block::new(BlockId::from("c"), BlockType::Text, "")]),
        ]);

        block.set_parent_path(vec![BlockId::from("root")]);

        let c = &block.children[0].children[0];
        assert_eq!(
            c.parent_path,
            vec![BlockId::from("root"), BlockId::from("a"), BlockId::from("b")]
        );
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn test_serde_field_names() {
        let block = Block::new(BlockId::from("h1"), BlockType::Heading1, "Title");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading1");
        assert_eq!(json["parentPath"], serde_json::json!([]));
        assert_eq!(json["isFocused"], false);
    }

    #[test]
    fn test_toggled_type() {
        assert_eq!(BlockType::Text.toggled(), BlockType::Heading1);
        assert_eq!(BlockType::Heading1.toggled(), BlockType::Text);
    }
}
