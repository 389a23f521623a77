//! The note forest and its structural mutations.
//!
//! [`BlockTree`] owns an ordered forest of [`Block`]s and implements every
//! structural edit the editor performs: content replacement, insertion after
//! an anchor, indent, unindent, delete with refocus, and append. A block is
//! addressed by the pair `(id, parent_path)`; lookups match both fields at
//! every level of the descent, never the id alone.
//!
//! Every operation is total. A stale or unknown address is a no-op that
//! leaves the forest untouched and reports `false` (or `None`), so a fast key
//! repeat racing a re-render can never corrupt the document.
//!
//! # Example
//!
//! ```
//! use blocknote::document::block::{Block, BlockId, BlockType};
//! use blocknote::document::tree::BlockTree;
//!
//! let mut tree = BlockTree::from_blocks(vec![
//!     Block::new(BlockId::from("h1"), BlockType::Heading1, "Notes"),
//!     Block::new(BlockId::from("t1"), BlockType::Text, "first line"),
//! ]);
//!
//! // Tab on "t1" nests it under "h1"
//! assert!(tree.indent(&BlockId::from("t1"), &[]));
//! let t1 = tree.identify(&BlockId::from("t1"), &[BlockId::from("h1")]).unwrap();
//! assert!(t1.is_focused);
//!
//! // The old address no longer resolves
//! assert!(tree.identify(&BlockId::from("t1"), &[]).is_none());
//! ```

use super::block::{Block, BlockId, BlockType};

/// An ordered forest of blocks.
///
/// The top-level sequence and every `children` list are in document order.
/// At most one block in the whole forest is focused.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockTree {
    blocks: Vec<Block>,
}

impl BlockTree {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Builds a forest from top-level blocks and normalizes it.
    ///
    /// See [`BlockTree::normalize`] for what is repaired.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut tree = Self { blocks };
        tree.normalize();
        tree
    }

    /// The top-level sequence.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of blocks at every depth.
    pub fn len(&self) -> usize {
        self.blocks.iter().map(Block::subtree_len).sum()
    }

    /// Depth of the deepest block, or `None` for an empty forest.
    pub fn max_depth(&self) -> Option<usize> {
        self.flatten().iter().map(|b| b.depth()).max()
    }

    /// Returns the block addressed by `(id, parent_path)`.
    ///
    /// Both fields must match exactly, and every ancestor on the way down must
    /// itself match its own id and path at its depth.
    pub fn identify(&self, id: &BlockId, parent_path: &[BlockId]) -> Option<&Block> {
        self.sequence(parent_path)?
            .iter()
            .find(|b| &b.id == id && b.parent_path == parent_path)
    }

    fn identify_mut(&mut self, id: &BlockId, parent_path: &[BlockId]) -> Option<&mut Block> {
        self.sequence_mut(parent_path)?
            .iter_mut()
            .find(|b| &b.id == id && b.parent_path == parent_path)
    }

    /// Resolves the sequence whose members carry `parent_path`.
    fn sequence(&self, parent_path: &[BlockId]) -> Option<&Vec<Block>> {
        let mut seq = &self.blocks;
        for (depth, ancestor) in parent_path.iter().enumerate() {
            let prefix = &parent_path[..depth];
            let parent = seq
                .iter()
                .find(|b| &b.id == ancestor && b.parent_path == prefix)?;
            seq = &parent.children;
        }
        Some(seq)
    }

    fn sequence_mut(&mut self, parent_path: &[BlockId]) -> Option<&mut Vec<Block>> {
        let mut seq = &mut self.blocks;
        for (depth, ancestor) in parent_path.iter().enumerate() {
            let prefix = &parent_path[..depth];
            let parent = seq
                .iter_mut()
                .find(|b| &b.id == ancestor && b.parent_path == prefix)?;
            seq = &mut parent.children;
        }
        Some(seq)
    }

    /// Index of the addressed block within its containing sequence.
    fn position(&self, id: &BlockId, parent_path: &[BlockId]) -> Option<usize> {
        self.sequence(parent_path)?
            .iter()
            .position(|b| &b.id == id && b.parent_path == parent_path)
    }

    /// Replaces the content of the addressed block. Focus is untouched.
    pub fn set_content(&mut self, id: &BlockId, parent_path: &[BlockId], text: &str) -> bool {
        match self.identify_mut(id, parent_path) {
            Some(block) => {
                if block.content == text {
                    return false;
                }
                block.content = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Changes the display type of the addressed block.
    pub fn set_block_type(
        &mut self,
        id: &BlockId,
        parent_path: &[BlockId],
        block_type: BlockType,
    ) -> bool {
        match self.identify_mut(id, parent_path) {
            Some(block) if block.block_type != block_type => {
                block.block_type = block_type;
                true
            }
            _ => false,
        }
    }

    /// Inserts a fresh, empty, focused block right after the anchor.
    ///
    /// The new block joins the anchor's containing sequence and inherits its
    /// `parent_path`. Every other block loses focus. Returns the new id, or
    /// `None` (forest unchanged) when the anchor does not resolve.
    pub fn insert_after(
        &mut self,
        anchor_id: &BlockId,
        anchor_parent_path: &[BlockId],
        block_type: BlockType,
    ) -> Option<BlockId> {
        let index = self.position(anchor_id, anchor_parent_path)?;
        self.clear_focus();

        let mut block = Block::empty(block_type);
        block.parent_path = anchor_parent_path.to_vec();
        block.is_focused = true;
        let new_id = block.id.clone();

        self.sequence_mut(anchor_parent_path)?
            .insert(index + 1, block);
        Some(new_id)
    }

    /// Enter without modifiers: a new block of the pressed block's type.
    pub fn enter_split(
        &mut self,
        id: &BlockId,
        parent_path: &[BlockId],
        block_type: BlockType,
    ) -> Option<BlockId> {
        self.insert_after(id, parent_path, block_type)
    }

    /// Appends a fresh focused block at the end of the top-level sequence.
    pub fn append(&mut self, block_type: BlockType) -> BlockId {
        self.clear_focus();
        let mut block = Block::empty(block_type);
        block.is_focused = true;
        let id = block.id.clone();
        self.blocks.push(block);
        id
    }

    /// Tab: nests the block under its preceding sibling.
    ///
    /// The block becomes the last child of the sibling before it, its whole
    /// subtree moves with it, and every path in that subtree is rewritten.
    /// The moved block takes focus. No-op when the block is first in its
    /// sequence or does not resolve.
    pub fn indent(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        let index = match self.position(id, parent_path) {
            Some(index) if index > 0 => index,
            _ => return false,
        };
        self.clear_focus();

        let Some(seq) = self.sequence_mut(parent_path) else {
            return false;
        };
        let mut block = seq.remove(index);
        let new_parent = &mut seq[index - 1];
        block.set_parent_path(new_parent.child_path());
        block.is_focused = true;
        new_parent.children.push(block);
        true
    }

    /// Shift+Tab: moves a nested block out to follow its former parent.
    ///
    /// Siblings that came after the block stay with the former parent. The
    /// moved subtree's paths are rewritten and the block takes focus. No-op for
    /// top-level or unresolved blocks.
    pub fn unindent(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        let Some((parent_id, grand_path)) = parent_path.split_last() else {
            return false;
        };
        let Some(index) = self.position(id, parent_path) else {
            return false;
        };
        let Some(parent_index) = self.position(parent_id, grand_path) else {
            return false;
        };
        self.clear_focus();

        let Some(grand) = self.sequence_mut(grand_path) else {
            return false;
        };
        let mut block = grand[parent_index].children.remove(index);
        block.set_parent_path(grand_path.to_vec());
        block.is_focused = true;
        grand.insert(parent_index + 1, block);
        true
    }

    /// Backspace on an empty block: removes it and refocuses.
    ///
    /// Content emptiness is the caller's contract and is not re-checked here.
    /// Children of the removed block are promoted, in order, into its place.
    /// Focus moves to the block at `max(0, i - 1)` in the new pre-order, where
    /// `i` was the removed block's pre-order index; an emptied forest has no
    /// focus.
    pub fn delete(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        let Some(index) = self.position(id, parent_path) else {
            return false;
        };
        let Some(flat_index) = self
            .flatten()
            .iter()
            .position(|b| &b.id == id && b.parent_path == parent_path)
        else {
            return false;
        };

        let Some(seq) = self.sequence_mut(parent_path) else {
            return false;
        };
        let removed = seq.remove(index);
        let mut orphans = removed.children;
        for child in &mut orphans {
            child.set_parent_path(parent_path.to_vec());
        }
        for (offset, child) in orphans.into_iter().enumerate() {
            seq.insert(index + offset, child);
        }

        self.clear_focus();
        self.focus_nth(flat_index.saturating_sub(1));
        true
    }

    /// Focuses the addressed block, clearing focus elsewhere.
    pub fn focus(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        if self.identify(id, parent_path).is_none() {
            return false;
        }
        self.clear_focus();
        if let Some(block) = self.identify_mut(id, parent_path) {
            block.is_focused = true;
        }
        true
    }

    /// Moves focus one block forward in document order.
    pub fn focus_next(&mut self) -> bool {
        self.step_focus(true)
    }

    /// Moves focus one block backward in document order.
    pub fn focus_previous(&mut self) -> bool {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> bool {
        let target = {
            let flat = self.flatten();
            if flat.is_empty() {
                return false;
            }
            match flat.iter().position(|b| b.is_focused) {
                Some(current) if forward => {
                    if current + 1 >= flat.len() {
                        return false;
                    }
                    current + 1
                }
                Some(current) => {
                    if current == 0 {
                        return false;
                    }
                    current - 1
                }
                None => 0,
            }
        };
        self.clear_focus();
        self.focus_nth(target)
    }

    /// Focuses the `n`th block in pre-order, if there is one.
    fn focus_nth(&mut self, n: usize) -> bool {
        let address = self
            .flatten()
            .get(n)
            .map(|b| (b.id.clone(), b.parent_path.clone()));
        match address {
            Some((id, path)) => match self.identify_mut(&id, &path) {
                Some(block) => {
                    block.is_focused = true;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Clears focus on every block.
    pub fn clear_focus(&mut self) {
        for block in &mut self.blocks {
            block.clear_focus();
        }
    }

    /// The focused block, if any.
    pub fn focused(&self) -> Option<&Block> {
        self.flatten().into_iter().find(|b| b.is_focused)
    }

    /// Number of focused blocks across the whole forest. Never more than one
    /// after any operation on this type.
    pub fn focused_count(&self) -> usize {
        self.flatten().iter().filter(|b| b.is_focused).count()
    }

    /// All blocks in document (pre-order) order.
    pub fn flatten(&self) -> Vec<&Block> {
        fn walk<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
            for block in blocks {
                out.push(block);
                walk(&block.children, out);
            }
        }

        let mut out = Vec::with_capacity(self.blocks.len());
        walk(&self.blocks, &mut out);
        out
    }

    /// Recomputes every `parent_path` from structure and keeps only the first
    /// focused block in document order.
    pub fn normalize(&mut self) {
        for block in &mut self.blocks {
            block.set_parent_path(Vec::new());
        }

        if self.focused_count() > 1 {
            let first = self
                .flatten()
                .into_iter()
                .position(|b| b.is_focused)
                .unwrap_or(0);
            self.clear_focus();
            self.focus_nth(first);
        }
    }

    /// True when every stored path matches the structure and at most one
    /// block is focused.
    pub fn is_well_formed(&self) -> bool {
        fn paths_ok(blocks: &[Block], expected: &[BlockId]) -> bool {
            blocks.iter().all(|b| {
                b.parent_path == expected && paths_ok(&b.children, &b.child_path())
            })
        }

        paths_ok(&self.blocks, &[]) && self.focused_count() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str) -> Block {
        Block::new(BlockId::from(id), BlockType::Text, id)
    }

    fn id(s: &str) -> BlockId {
        BlockId::from(s)
    }

    #[test]
    fn test_identify_requires_matching_path() {
        let tree = BlockTree::from_blocks(vec![text("a").with_children(vec![text("b")])]);

        assert!(tree.identify(&id("b"), &[id("a")]).is_some());
        assert!(tree.identify(&id("b"), &[]).is_none());
        assert!(tree.identify(&id("a"), &[id("a")]).is_none());
    }

    #[test]
    fn test_identify_checks_ancestors_at_each_depth() {
        let tree = BlockTree::from_blocks(vec![
            text("a").with_children(vec![text("b").with_children(vec![text("c")])]),
        ]);

        assert!(tree.identify(&id("c"), &[id("a"), id("b")]).is_some());
        assert!(tree.identify(&id("c"), &[id("b"), id("a")]).is_none());
    }

    #[test]
    fn test_set_content_same_text_is_noop() {
        let mut tree = BlockTree::from_blocks(vec![text("a")]);
        assert!(!tree.set_content(&id("a"), &[], "a"));
        assert!(tree.set_content(&id("a"), &[], ""));
        assert_eq!(tree.blocks()[0].content, "");
    }

    #[test]
    fn test_insert_after_nested_anchor() {
        let mut tree = BlockTree::from_blocks(vec![text("a").with_children(vec![text("b")])]);

        let new_id = tree.insert_after(&id("b"), &[id("a")], BlockType::Text).unwrap();

        let a = &tree.blocks()[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[1].id, new_id);
        assert_eq!(a.children[1].parent_path, vec![id("a")]);
        assert!(tree.is_well_formed());
    }

    #[test]
    fn test_indent_first_block_is_noop() {
        let mut tree = BlockTree::from_blocks(vec![text("a"), text("b")]);
        let before = tree.clone();
        assert!(!tree.indent(&id("a"), &[]));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_unindent_top_level_is_noop() {
        let mut tree = BlockTree::from_blocks(vec![text("a")]);
        assert!(!tree.unindent(&id("a"), &[]));
    }

    #[test]
    fn test_delete_last_block_leaves_no_focus() {
        let mut tree = BlockTree::from_blocks(vec![text("a")]);
        assert!(tree.delete(&id("a"), &[]));
        assert!(tree.is_empty());
        assert!(tree.focused().is_none());
    }

    #[test]
    fn test_step_focus_without_focus_starts_at_first() {
        let mut tree = BlockTree::from_blocks(vec![text("a"), text("b")]);
        assert!(tree.focus_next());
        assert_eq!(tree.focused().unwrap().id, id("a"));
        assert!(tree.focus_next());
        assert_eq!(tree.focused().unwrap().id, id("b"));
        assert!(!tree.focus_next());
    }

    #[test]
    fn test_normalize_repairs_paths_and_focus() {
        let mut child = text("b");
        child.parent_path = vec![id("wrong")];
        child.is_focused = true;
        let mut parent = text("a");
        parent.is_focused = true;
        parent.children.push(child);

        let tree = BlockTree::from_blocks(vec![parent]);

        assert!(tree.is_well_formed());
        assert_eq!(tree.focused().unwrap().id, id("a"));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.max_depth(), Some(1));
    }
}
