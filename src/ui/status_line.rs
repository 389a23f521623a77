//! Status line widget for displaying editor state information.
//!
//! The status line shows:
//! - Current mode (NORMAL, INSERT, COMMAND)
//! - Filename (or "[No Name]" if unsaved)
//! - Dirty indicator "[+]" for unsaved changes
//! - Focused block position, nesting depth and type
//!
//! Example status line: `INSERT | notes.json [+]          heading1 d0  1/12`

use crate::editor::state::EditorState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Right-hand summary of the focused block, e.g. `text d2  4/9`.
fn focus_summary(state: &EditorState) -> String {
    let blocks = state.tree().flatten();
    let total = blocks.len();
    match blocks.iter().position(|b| b.is_focused) {
        Some(index) => {
            let block = blocks[index];
            format!(
                "{} d{}  {}/{}",
                block.block_type,
                block.depth(),
                index + 1,
                total
            )
        }
        None => format!("-/{}", total),
    }
}

/// Renders the status line showing mode, filename, and dirty indicator.
pub fn render_status_line(f: &mut Frame, area: Rect, state: &EditorState, colors: &ThemeColors) {
    let mode_text = format!("{}", state.mode());
    let filename = state.filename().unwrap_or("[No Name]");
    let dirty_indicator = if state.is_dirty() { " [+]" } else { "" };

    let left = format!("{} | {}{}", mode_text, filename, dirty_indicator);
    let right = focus_summary(state);

    // Pad with spaces so the summary sits on the right edge
    let total_width = area.width as usize;
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    let padding = if left_len + right_len + 1 < total_width {
        total_width - left_len - right_len
    } else {
        1
    };

    let style = Style::default()
        .fg(colors.status_line_fg)
        .bg(colors.status_line_bg);

    let line = Line::from(vec![
        Span::styled(left, style),
        Span::styled(" ".repeat(padding), style),
        Span::styled(right, style),
    ]);

    f.render_widget(Paragraph::new(line).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::{Block, BlockId, BlockType};
    use crate::document::tree::BlockTree;

    #[test]
    fn test_focus_summary_reports_nested_block() {
        let tree = BlockTree::from_blocks(vec![Block::new(
            BlockId::from("p"),
            BlockType::Heading1,
            "p",
        )
        .with_children(vec![Block::new(BlockId::from("c"), BlockType::Text, "c")])]);
        let mut state = EditorState::new_with_default_theme(tree);
        state.focus_next();

        assert_eq!(focus_summary(&state), "text d1  2/2");
    }

    #[test]
    fn test_focus_summary_empty_document() {
        let state = EditorState::new_with_default_theme(BlockTree::new());
        assert_eq!(focus_summary(&state), "-/0");
    }
}
