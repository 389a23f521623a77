//! UI module for the blocknote terminal interface.
//!
//! This module provides the main UI structure for rendering the terminal interface,
//! including layout management and widget composition.

pub mod block_view;
pub mod help_overlay;
pub mod message_area;
pub mod status_line;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::editor::mode::EditorMode;
use crate::editor::state::EditorState;
use crate::theme::Theme;

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of three main areas:
/// - Main view area (top): the block forest, one or more lines per block
/// - Status line (middle): mode, file info and focused block position
/// - Message area (bottom): messages and the `:` command prompt
///
/// # Example
///
/// ```
/// use blocknote::ui::UI;
/// use blocknote::theme::get_builtin_theme;
///
/// let theme = get_builtin_theme("default-dark").unwrap();
/// let ui = UI::new(theme);
/// assert_eq!(ui.theme_name(), "default-dark");
/// ```
pub struct UI {
    theme: Theme,
}

impl UI {
    /// Creates a new UI instance with the specified theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the current theme name.
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Changes the current theme.
    ///
    /// Returns true if the theme was successfully changed, false if the theme name is invalid.
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        use crate::theme::get_builtin_theme;

        if let Some(new_theme) = get_builtin_theme(theme_name) {
            self.theme = new_theme;
            true
        } else {
            false
        }
    }

    /// Renders the UI to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        state: &mut EditorState,
    ) -> Result<()> {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Main view area
                    Constraint::Length(1), // Status line
                    Constraint::Length(1), // Message area
                ])
                .split(f.area());

            // Keep the focused block on screen
            let viewport_height = chunks[0].height as usize;
            let focus_line = block_view::focused_line_index(state.tree());
            state.adjust_scroll(focus_line, viewport_height);

            let show_caret = *state.mode() == EditorMode::Insert && state.cursor_visible();
            block_view::render_block_view(
                f,
                chunks[0],
                state.tree(),
                &self.theme.colors,
                state.indent_size(),
                state.scroll_offset(),
                show_caret,
            );

            status_line::render_status_line(f, chunks[1], state, &self.theme.colors);
            message_area::render_message_area(f, chunks[2], state, &self.theme.colors);

            // Help overlay (rendered on top if visible)
            if state.show_help() {
                help_overlay::render_help_overlay(f, &self.theme.colors, state.help_scroll());
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::{Block, BlockId, BlockType};
    use crate::document::tree::BlockTree;
    use crate::theme::get_builtin_theme;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_set_theme() {
        let mut ui = UI::new(get_builtin_theme("default-dark").unwrap());
        assert!(ui.set_theme("nord"));
        assert_eq!(ui.theme_name(), "nord");
        assert!(!ui.set_theme("nope"));
        assert_eq!(ui.theme_name(), "nord");
    }

    #[test]
    fn test_render_blocks_and_status_line() {
        let ui = UI::new(get_builtin_theme("default-dark").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();

        let tree = BlockTree::from_blocks(vec![
            Block::new(BlockId::from("h"), BlockType::Heading1, "Title"),
            Block::new(BlockId::from("t"), BlockType::Text, "body"),
        ]);
        let mut state = EditorState::new_with_default_theme(tree);
        state.set_filename("notes.json".to_string());
        state.mark_dirty();

        ui.render(&mut terminal, &mut state).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("# Title"));
        assert!(text.contains("body"));
        assert!(text.contains("INSERT | notes.json [+]"));
        assert!(text.contains("1/2"));
    }

    #[test]
    fn test_render_empty_document_hint() {
        let ui = UI::new(get_builtin_theme("default-light").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        let mut state = EditorState::new_with_default_theme(BlockTree::new());

        ui.render(&mut terminal, &mut state).unwrap();

        assert!(buffer_text(&terminal).contains("Empty document"));
    }

    #[test]
    fn test_render_scrolls_to_focused_block() {
        let ui = UI::new(get_builtin_theme("default-dark").unwrap());
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();

        let blocks = (0..20)
            .map(|i| {
                Block::new(
                    BlockId::from(format!("b{}", i)),
                    BlockType::Text,
                    format!("line {}", i),
                )
            })
            .collect();
        let mut state = EditorState::new_with_default_theme(BlockTree::from_blocks(blocks));
        for _ in 0..15 {
            state.focus_next();
        }

        ui.render(&mut terminal, &mut state).unwrap();

        assert!(state.scroll_offset() > 0);
        assert!(buffer_text(&terminal).contains("line 15"));
    }
}
