//! Undo/redo history of forest snapshots.
//!
//! Every successful mutation records a snapshot of the whole forest (focus
//! included, since focus lives on the blocks). Undo and redo walk a linear
//! history; recording a change after an undo discards the redo tail.
//!
//! Typing produces one `set_content` per keystroke, so consecutive content
//! edits of the same block coalesce into a single entry: one undo removes the
//! whole word or sentence typed into that block.
//!
//! # Architecture
//!
//! - `EditorSnapshot`: forest state plus an optional coalescing key
//! - `UndoHistory`: bounded list of snapshots with a current pointer

use crate::document::block::BlockId;
use crate::document::tree::BlockTree;

/// Snapshot of editor state at a specific point in time.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub tree: BlockTree,
    /// Content edits of the same block share a key and merge into one entry
    pub coalesce_key: Option<BlockId>,
}

impl EditorSnapshot {
    pub fn new(tree: BlockTree) -> Self {
        Self {
            tree,
            coalesce_key: None,
        }
    }

    pub fn coalescing(tree: BlockTree, key: BlockId) -> Self {
        Self {
            tree,
            coalesce_key: Some(key),
        }
    }
}

/// Bounded linear undo history.
///
/// Entry 0 is the oldest state still reachable. `current` points at the
/// entry matching the live forest.
///
/// ```text
///   [initial] [indent t1] [typed "abc"] [delete t2]
///                                ^ current (after one undo)
/// ```
#[derive(Debug)]
pub struct UndoHistory {
    entries: Vec<EditorSnapshot>,
    current: usize,
    limit: usize,
}

impl UndoHistory {
    /// Creates a history whose only entry is the initial state.
    ///
    /// # Arguments
    ///
    /// * `initial` - The starting state
    /// * `limit` - Maximum number of undo steps kept (at least 1)
    pub fn new(initial: EditorSnapshot, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            current: 0,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Records the state after a mutation.
    ///
    /// Drops any redo tail first. If the newest entry carries the same
    /// coalescing key, it is replaced instead of a new entry being added.
    /// The oldest entries are discarded once more than `limit` undo steps
    /// exist.
    pub fn add_checkpoint(&mut self, snapshot: EditorSnapshot) {
        self.entries.truncate(self.current + 1);

        let merges = self.current > 0
            && snapshot.coalesce_key.is_some()
            && self.entries[self.current].coalesce_key == snapshot.coalesce_key;
        if merges {
            self.entries[self.current] = snapshot;
            return;
        }

        self.entries.push(snapshot);
        self.current = self.entries.len() - 1;

        let overflow = self.entries.len().saturating_sub(self.limit + 1);
        if overflow > 0 {
            self.entries.drain(..overflow);
            self.current -= overflow;
        }
    }

    /// Ends any coalescing run so the next content edit starts a new entry.
    pub fn seal(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.current) {
            entry.coalesce_key = None;
        }
    }

    /// Steps back one entry. Returns the snapshot to restore, or `None` at the
    /// oldest entry.
    ///
    /// The entry landed on is sealed, so an edit after an undo starts a new
    /// entry instead of overwriting the restored state.
    pub fn undo(&mut self) -> Option<EditorSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current -= 1;
        self.seal();
        Some(self.entries[self.current].clone())
    }

    /// Steps forward one entry, or `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<EditorSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current += 1;
        self.seal();
        Some(self.entries[self.current].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::{Block, BlockType};

    fn tree_with(content: &str) -> BlockTree {
        BlockTree::from_blocks(vec![Block::new(
            BlockId::from("a"),
            BlockType::Text,
            content,
        )])
    }

    #[test]
    fn test_history_initialization() {
        let history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 50);

        assert_eq!(history.current(), 0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.limit(), 50);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 50);
        history.add_checkpoint(EditorSnapshot::new(tree_with("x")));

        let undone = history.undo().unwrap();
        assert_eq!(undone.tree, tree_with(""));
        assert!(history.undo().is_none());

        let redone = history.redo().unwrap();
        assert_eq!(redone.tree, tree_with("x"));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_checkpoint_after_undo_drops_redo_tail() {
        let mut history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 50);
        history.add_checkpoint(EditorSnapshot::new(tree_with("x")));
        history.undo();
        history.add_checkpoint(EditorSnapshot::new(tree_with("y")));

        assert_eq!(history.len(), 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_coalescing_merges_same_block() {
        let mut history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 50);
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("a"), BlockId::from("a")));
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("ab"), BlockId::from("a")));
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("abc"), BlockId::from("a")));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo().unwrap().tree, tree_with(""));
    }

    #[test]
    fn test_seal_breaks_coalescing() {
        let mut history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 50);
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("a"), BlockId::from("a")));
        history.seal();
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("ab"), BlockId::from("a")));

        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_edit_after_undo_starts_new_entry() {
        let a = BlockId::from("a");
        let mut history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 50);
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("ab"), a.clone()));
        history.add_checkpoint(EditorSnapshot::new(tree_with("ab!")));

        assert_eq!(history.undo().unwrap().tree, tree_with("ab"));
        history.add_checkpoint(EditorSnapshot::coalescing(tree_with("abc"), a));

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().unwrap().tree, tree_with("ab"));
    }

    #[test]
    fn test_limit_discards_oldest() {
        let mut history = UndoHistory::new(EditorSnapshot::new(tree_with("")), 2);
        history.add_checkpoint(EditorSnapshot::new(tree_with("1")));
        history.add_checkpoint(EditorSnapshot::new(tree_with("2")));
        history.add_checkpoint(EditorSnapshot::new(tree_with("3")));

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().unwrap().tree, tree_with("2"));
        assert_eq!(history.undo().unwrap().tree, tree_with("1"));
        assert!(history.undo().is_none());
    }
}
