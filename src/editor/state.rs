//! The editor shell: sole owner and writer of the note forest.
//!
//! `EditorState` holds the current [`BlockTree`] as its one authoritative
//! state value alongside UI bookkeeping (mode, message, command buffer,
//! scroll position). Every structural entry point follows the same steps:
//!
//! 1. run the matching `BlockTree` operation,
//! 2. if the forest changed, record an undo checkpoint and mark the document
//!    dirty,
//! 3. hand the new forest to the [`Host`] via `update_state`, then call
//!    `send_to_server`.
//!
//! An operation that resolves to a no-op (stale address, first block indented,
//! and so on) records nothing and calls no host callback. Nothing here
//! surfaces an error to the user; the only fallible path is saving.
//!
//! # Example
//!
//! ```
//! use blocknote::document::block::{Block, BlockId, BlockType};
//! use blocknote::document::tree::BlockTree;
//! use blocknote::editor::state::EditorState;
//!
//! let tree = BlockTree::from_blocks(vec![
//!     Block::new(BlockId::from("a"), BlockType::Text, "first"),
//!     Block::new(BlockId::from("b"), BlockType::Text, "second"),
//! ]);
//! let mut state = EditorState::new_with_default_theme(tree);
//!
//! assert!(state.indent(&BlockId::from("b"), &[]));
//! assert!(state.is_dirty());
//! assert_eq!(state.tree().blocks()[0].children.len(), 1);
//!
//! assert!(state.undo());
//! assert_eq!(state.tree().blocks().len(), 2);
//! ```

use super::host::{Host, NullHost};
use super::intent::BlockIntent;
use super::mode::EditorMode;
use super::undo::{EditorSnapshot, UndoHistory};
use crate::document::block::{BlockId, BlockType};
use crate::document::tree::BlockTree;
use anyhow::{anyhow, Result};
use tracing::{debug, info};

/// Represents a message to display to the user.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// How the editor recorded a successful mutation in the undo history.
enum Checkpoint {
    /// A structural change, always its own undo step
    Step,
    /// A content edit that merges with adjacent edits of the same block
    Typing(BlockId),
}

pub struct EditorState {
    tree: BlockTree,
    mode: EditorMode,
    host: Box<dyn Host>,
    history: UndoHistory,
    dirty: bool,
    filename: Option<String>,
    message: Option<Message>,
    command_buffer: String,
    show_help: bool,
    help_scroll: usize,
    pending_theme: Option<String>,
    current_theme: String,
    indent_size: usize,
    create_backup: bool,
    enable_mouse: bool,
    auto_save: bool,
    undo_limit: usize,
    scroll_offset: usize,
    cursor_visible: bool,
    cursor_blink_ticks: u8,
}

impl EditorState {
    /// Creates a new editor over `tree` with the given theme name.
    ///
    /// If the forest is non-empty and nothing is focused, the first block
    /// receives focus so typing has somewhere to go. The host starts as a
    /// [`NullHost`]; see [`EditorState::set_host`].
    pub fn new(mut tree: BlockTree, initial_theme_name: String) -> Self {
        if tree.focused().is_none() {
            tree.focus_next();
        }

        let undo_limit = 50; // Default from Config
        let history = UndoHistory::new(EditorSnapshot::new(tree.clone()), undo_limit);

        Self {
            tree,
            mode: EditorMode::Insert,
            host: Box::new(NullHost),
            history,
            dirty: false,
            filename: None,
            message: None,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            pending_theme: None,
            current_theme: initial_theme_name,
            indent_size: 2,
            create_backup: false,
            enable_mouse: true,
            auto_save: false,
            undo_limit,
            scroll_offset: 0,
            cursor_visible: true,
            cursor_blink_ticks: 0,
        }
    }

    /// Creates a new editor state with a default theme (for tests).
    #[doc(hidden)]
    pub fn new_with_default_theme(tree: BlockTree) -> Self {
        Self::new(tree, "default-dark".to_string())
    }

    /// Replaces the host that receives mutation callbacks.
    pub fn set_host(&mut self, host: Box<dyn Host>) {
        self.host = host;
    }

    /// Read-only view of the forest.
    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Switches mode. Leaving a mode ends any typing run for undo purposes.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            self.history.seal();
        }
        self.mode = mode;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: String) {
        self.filename = Some(filename);
    }

    fn record(&mut self, operation: &'static str, checkpoint: Checkpoint) {
        self.dirty = true;
        let snapshot = match checkpoint {
            Checkpoint::Step => EditorSnapshot::new(self.tree.clone()),
            Checkpoint::Typing(id) => EditorSnapshot::coalescing(self.tree.clone(), id),
        };
        self.history.add_checkpoint(snapshot);
        debug!(operation, blocks = self.tree.len(), "forest updated");
        self.notify_host();
    }

    fn notify_host(&mut self) {
        self.host.update_state(&self.tree);
        self.host.send_to_server();
    }

    /// Replaces the content of the addressed block.
    pub fn set_content(&mut self, id: &BlockId, parent_path: &[BlockId], text: &str) -> bool {
        if !self.tree.set_content(id, parent_path, text) {
            return false;
        }
        self.record("set_content", Checkpoint::Typing(id.clone()));
        true
    }

    /// Inserts a fresh focused block after the anchor.
    pub fn insert_after(
        &mut self,
        anchor_id: &BlockId,
        anchor_parent_path: &[BlockId],
        block_type: BlockType,
    ) -> Option<BlockId> {
        let new_id = self
            .tree
            .insert_after(anchor_id, anchor_parent_path, block_type)?;
        self.record("insert_after", Checkpoint::Step);
        Some(new_id)
    }

    /// Enter on a block: a new block of the same type right after it.
    pub fn enter_split(
        &mut self,
        id: &BlockId,
        parent_path: &[BlockId],
        block_type: BlockType,
    ) -> Option<BlockId> {
        let new_id = self.tree.enter_split(id, parent_path, block_type)?;
        self.record("enter_split", Checkpoint::Step);
        Some(new_id)
    }

    pub fn indent(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        if !self.tree.indent(id, parent_path) {
            return false;
        }
        self.record("indent", Checkpoint::Step);
        true
    }

    pub fn unindent(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        if !self.tree.unindent(id, parent_path) {
            return false;
        }
        self.record("unindent", Checkpoint::Step);
        true
    }

    /// Deletes the addressed block. Callers only invoke this for empty blocks.
    pub fn delete(&mut self, id: &BlockId, parent_path: &[BlockId]) -> bool {
        if !self.tree.delete(id, parent_path) {
            return false;
        }
        self.record("delete", Checkpoint::Step);
        true
    }

    /// Toolbar action: appends a new focused block at the end of the document.
    pub fn append_block(&mut self, block_type: BlockType) -> BlockId {
        let id = self.tree.append(block_type);
        self.record("append", Checkpoint::Step);
        id
    }

    /// Starts an empty document with a text block holding `content`.
    ///
    /// Recorded as the start of a typing run on the new block, so the
    /// keystrokes that follow undo together with it.
    pub fn start_document(&mut self, content: &str) -> BlockId {
        let id = self.tree.append(BlockType::Text);
        self.tree.set_content(&id, &[], content);
        self.record("start_document", Checkpoint::Typing(id.clone()));
        id
    }

    /// Flips the focused block between text and heading.
    pub fn toggle_block_type(&mut self) -> bool {
        let Some((id, path, block_type)) = self
            .tree
            .focused()
            .map(|b| (b.id.clone(), b.parent_path.clone(), b.block_type))
        else {
            return false;
        };
        if !self.tree.set_block_type(&id, &path, block_type.toggled()) {
            return false;
        }
        self.record("set_block_type", Checkpoint::Step);
        true
    }

    /// Applies an intent forwarded by the block view.
    pub fn apply(&mut self, intent: BlockIntent) -> bool {
        debug!(intent = intent.name(), "applying block intent");
        match intent {
            BlockIntent::SetContent {
                id,
                parent_path,
                content,
            } => self.set_content(&id, &parent_path, &content),
            BlockIntent::Indent { id, parent_path } => self.indent(&id, &parent_path),
            BlockIntent::Unindent { id, parent_path } => self.unindent(&id, &parent_path),
            BlockIntent::Delete { id, parent_path } => self.delete(&id, &parent_path),
            BlockIntent::EnterSplit {
                id,
                parent_path,
                block_type,
            } => self.enter_split(&id, &parent_path, block_type).is_some(),
        }
    }

    /// Moves focus to the next block in document order.
    ///
    /// Focus moves are not undo steps and do not dirty the document, but the
    /// host still sees the new forest.
    pub fn focus_next(&mut self) -> bool {
        self.move_focus(true)
    }

    /// Moves focus to the previous block in document order.
    pub fn focus_previous(&mut self) -> bool {
        self.move_focus(false)
    }

    fn move_focus(&mut self, forward: bool) -> bool {
        let moved = if forward {
            self.tree.focus_next()
        } else {
            self.tree.focus_previous()
        };
        if moved {
            self.history.seal();
            self.host.update_state(&self.tree);
        }
        moved
    }

    /// Restores the previous forest. Returns false at the oldest state.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot.tree, "undo");
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone change. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot.tree, "redo");
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, tree: BlockTree, operation: &'static str) {
        self.tree = tree;
        self.dirty = true;
        debug!(operation, blocks = self.tree.len(), "forest restored");
        self.notify_host();
    }

    /// Saves the forest to `path`, or to the current filename.
    ///
    /// On success the path becomes the current filename and the dirty flag
    /// is cleared.
    pub fn save(&mut self, path: Option<String>) -> Result<()> {
        let target = path
            .or_else(|| self.filename.clone())
            .ok_or_else(|| anyhow!("No file name"))?;

        crate::file::saver::save_notes_file(&target, &self.tree, self.create_backup)?;
        info!(path = %target, blocks = self.tree.len(), "saved notes");

        self.filename = Some(target);
        self.clear_dirty();
        Ok(())
    }

    /// Returns the current message, if any.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Sets a message to display to the user.
    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message { text, level });
    }

    /// Clears the current message.
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn push_to_command_buffer(&mut self, ch: char) {
        self.command_buffer.push(ch);
    }

    pub fn pop_from_command_buffer(&mut self) {
        self.command_buffer.pop();
    }

    pub fn clear_command_buffer(&mut self) {
        self.command_buffer.clear();
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Toggles the help overlay, resetting its scroll when opened.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn help_scroll(&self) -> usize {
        self.help_scroll
    }

    /// Scrolls the help text down one line, never past `line_count - 1`.
    pub fn scroll_help_down(&mut self, line_count: usize) {
        let last = line_count.saturating_sub(1);
        self.help_scroll = (self.help_scroll + 1).min(last);
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    /// Takes the theme requested by `:theme`, if any, for the UI to apply.
    pub fn take_pending_theme(&mut self) -> Option<String> {
        self.pending_theme.take()
    }

    pub fn request_theme_change(&mut self, theme_name: String) {
        self.current_theme = theme_name.clone();
        self.pending_theme = Some(theme_name);
    }

    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    /// Columns of left padding per nesting level.
    pub fn indent_size(&self) -> usize {
        self.indent_size
    }

    pub fn set_indent_size(&mut self, size: usize) {
        self.indent_size = size.max(1);
    }

    pub fn create_backup(&self) -> bool {
        self.create_backup
    }

    pub fn set_create_backup(&mut self, enable: bool) {
        self.create_backup = enable;
    }

    pub fn enable_mouse(&self) -> bool {
        self.enable_mouse
    }

    pub fn set_enable_mouse(&mut self, enable: bool) {
        self.enable_mouse = enable;
    }

    pub fn set_auto_save(&mut self, enable: bool) {
        self.auto_save = enable;
    }

    /// Replaces the undo history with a fresh one bounded by `limit`.
    pub fn set_undo_limit(&mut self, limit: usize) {
        self.undo_limit = limit;
        self.history = UndoHistory::new(EditorSnapshot::new(self.tree.clone()), limit);
    }

    /// Current settings as a config, for `:w` and config persistence.
    pub fn to_config(&self) -> crate::config::Config {
        crate::config::Config {
            theme: self.current_theme.clone(),
            indent_size: self.indent_size,
            auto_save: self.auto_save,
            create_backup: self.create_backup,
            undo_limit: self.undo_limit,
            enable_mouse: self.enable_mouse,
            ..crate::config::Config::default()
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Scrolls just enough to keep `focus_line` inside the viewport.
    pub fn adjust_scroll(&mut self, focus_line: Option<usize>, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        let Some(line) = focus_line else {
            self.scroll_offset = 0;
            return;
        };

        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + viewport_height {
            self.scroll_offset = line + 1 - viewport_height;
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Toggles caret visibility every ~5 ticks.
    pub fn update_cursor_blink(&mut self) {
        self.cursor_blink_ticks = self.cursor_blink_ticks.wrapping_add(1);
        if self.cursor_blink_ticks >= 5 {
            self.cursor_visible = !self.cursor_visible;
            self.cursor_blink_ticks = 0;
        }
    }

    /// Shows the caret immediately after an edit.
    pub fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.cursor_blink_ticks = 0;
    }
}
