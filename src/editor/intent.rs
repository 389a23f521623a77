//! Structural intents forwarded from the block view to the editor.
//!
//! The block view never touches the forest. It turns a key on the focused
//! block into one `BlockIntent` carrying the block's full address, and the
//! editor applies it with the matching tree operation.

use crate::document::block::{BlockId, BlockType};

/// One requested edit against the block at `(id, parent_path)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockIntent {
    /// Replace the block's content (sent on every keystroke)
    SetContent {
        id: BlockId,
        parent_path: Vec<BlockId>,
        content: String,
    },
    /// Tab
    Indent {
        id: BlockId,
        parent_path: Vec<BlockId>,
    },
    /// Shift+Tab
    Unindent {
        id: BlockId,
        parent_path: Vec<BlockId>,
    },
    /// Backspace on empty content
    Delete {
        id: BlockId,
        parent_path: Vec<BlockId>,
    },
    /// Enter without modifiers
    EnterSplit {
        id: BlockId,
        parent_path: Vec<BlockId>,
        block_type: BlockType,
    },
}

impl BlockIntent {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            BlockIntent::SetContent { .. } => "set_content",
            BlockIntent::Indent { .. } => "indent",
            BlockIntent::Unindent { .. } => "unindent",
            BlockIntent::Delete { .. } => "delete",
            BlockIntent::EnterSplit { .. } => "enter_split",
        }
    }
}
