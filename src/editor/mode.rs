//! Editor mode management.
//!
//! The editor is modal, but unlike vim it starts in Insert mode: the focused
//! block is always live for typing, and Esc drops to Normal mode for
//! navigation and document commands.
//!
//! # Modes
//!
//! - **Insert**: keystrokes edit and restructure the focused block
//! - **Normal**: move focus, append blocks, undo/redo, toggle headings
//! - **Command**: `:`-prefixed commands (save, quit, theme)
//!
//! # Example
//!
//! ```
//! use blocknote::editor::mode::EditorMode;
//!
//! assert_eq!(format!("{}", EditorMode::Insert), "INSERT");
//! assert_eq!(format!("{}", EditorMode::Normal), "NORMAL");
//! ```

use std::fmt;

/// Represents the current editing mode of the editor.
///
/// The mode decides how a key is mapped (see
/// [`map_key_event`](crate::input::keys::map_key_event)) and is shown in the
/// status line through the `Display` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Navigation and document-level commands.
    Normal,
    /// Typing into the focused block.
    #[default]
    Insert,
    /// Entering a `:` command.
    Command,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::Normal => write!(f, "NORMAL"),
            EditorMode::Insert => write!(f, "INSERT"),
            EditorMode::Command => write!(f, "COMMAND"),
        }
    }
}
