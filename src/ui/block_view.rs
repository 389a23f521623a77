//! The block view: how one block looks and what its keys mean.
//!
//! Blocks never touch the forest. [`translate`] turns a key pressed inside
//! the focused block into a [`BlockIntent`] carrying the block's own
//! `(id, parent_path)` address, and the editor decides what to do with it.
//! Rendering walks the forest in document order and produces one or more
//! lines per block, indented by nesting depth.

use crate::document::block::Block;
use crate::document::tree::BlockTree;
use crate::editor::intent::BlockIntent;
use crate::input::keys::InputEvent;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PLACEHOLDER: &str = "Type something...";
const HEADING_MARKER: &str = "# ";
const TEXT_MARKER: &str = "· ";
const CARET: &str = "▏";

/// Maps a key pressed inside `block` to the intent it expresses.
///
/// Returns `None` for keys that mean nothing to a block.
///
/// # Example
///
/// ```
/// use blocknote::document::block::{Block, BlockId, BlockType};
/// use blocknote::editor::intent::BlockIntent;
/// use blocknote::input::keys::InputEvent;
/// use blocknote::ui::block_view::translate;
///
/// let block = Block::new(BlockId::from("a"), BlockType::Text, "");
/// let intent = translate(&block, &InputEvent::Backspace).unwrap();
/// assert!(matches!(intent, BlockIntent::Delete { .. }));
/// ```
pub fn translate(block: &Block, input: &InputEvent) -> Option<BlockIntent> {
    let id = block.id.clone();
    let parent_path = block.parent_path.clone();

    match input {
        InputEvent::Indent => Some(BlockIntent::Indent { id, parent_path }),
        InputEvent::Unindent => Some(BlockIntent::Unindent { id, parent_path }),
        InputEvent::Enter => Some(BlockIntent::EnterSplit {
            id,
            parent_path,
            block_type: block.block_type,
        }),
        InputEvent::Backspace if block.content.is_empty() => {
            Some(BlockIntent::Delete { id, parent_path })
        }
        InputEvent::Backspace => {
            let mut content = block.content.clone();
            content.pop();
            Some(BlockIntent::SetContent {
                id,
                parent_path,
                content,
            })
        }
        InputEvent::SoftBreak => Some(BlockIntent::SetContent {
            id,
            parent_path,
            content: format!("{}\n", block.content),
        }),
        InputEvent::InsertCharacter(c) => Some(BlockIntent::SetContent {
            id,
            parent_path,
            content: format!("{}{}", block.content, c),
        }),
        _ => None,
    }
}

/// Number of screen lines a block's own content occupies.
fn content_height(block: &Block) -> usize {
    block.content.split('\n').count()
}

/// Line index of the focused block's last content line, where the caret sits.
pub fn focused_line_index(tree: &BlockTree) -> Option<usize> {
    let mut line = 0;
    for block in tree.flatten() {
        let height = content_height(block);
        if block.is_focused {
            return Some(line + height - 1);
        }
        line += height;
    }
    None
}

/// Renders every block of the forest into display lines.
pub fn render_blocks(
    tree: &BlockTree,
    colors: &ThemeColors,
    indent_size: usize,
    show_caret: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in tree.blocks() {
        render_block(block, 0, colors, indent_size, show_caret, &mut lines);
    }
    lines
}

fn render_block(
    block: &Block,
    depth: usize,
    colors: &ThemeColors,
    indent_size: usize,
    show_caret: bool,
    lines: &mut Vec<Line<'static>>,
) {
    let indent = " ".repeat(depth * indent_size);

    let (marker, content_style) = if block.is_heading() {
        (
            HEADING_MARKER,
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (TEXT_MARKER, Style::default().fg(colors.text))
    };
    let marker_style = if block.is_heading() {
        content_style
    } else {
        Style::default().fg(colors.marker)
    };

    let rows: Vec<&str> = block.content.split('\n').collect();
    let last_row = rows.len() - 1;

    for (row, text) in rows.into_iter().enumerate() {
        let mut spans = vec![Span::raw(indent.clone())];

        // Continuation lines line up under the first line's text
        if row == 0 {
            spans.push(Span::styled(marker.to_string(), marker_style));
        } else {
            spans.push(Span::raw(" ".repeat(marker.chars().count())));
        }

        if block.content.is_empty() && !block.is_focused {
            spans.push(Span::styled(
                PLACEHOLDER.to_string(),
                Style::default()
                    .fg(colors.placeholder)
                    .add_modifier(Modifier::DIM | Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(text.to_string(), content_style));
        }

        if block.is_focused && show_caret && row == last_row {
            spans.push(Span::styled(CARET, Style::default().fg(colors.caret)));
        }

        let line = Line::from(spans);
        if block.is_focused {
            lines.push(line.style(Style::default().bg(colors.focus_bg)));
        } else {
            lines.push(line);
        }
    }

    for child in &block.children {
        render_block(child, depth + 1, colors, indent_size, show_caret, lines);
    }
}

/// Renders the block view into `area`, starting at `scroll_offset`.
pub fn render_block_view(
    f: &mut Frame,
    area: Rect,
    tree: &BlockTree,
    colors: &ThemeColors,
    indent_size: usize,
    scroll_offset: usize,
    show_caret: bool,
) {
    let base = Style::default().bg(colors.background).fg(colors.foreground);

    if tree.is_empty() {
        let hint = Line::from(Span::styled(
            "Empty document. Start typing, or press o in NORMAL mode to add a block.",
            Style::default()
                .fg(colors.placeholder)
                .add_modifier(Modifier::ITALIC),
        ));
        f.render_widget(Paragraph::new(hint).style(base), area);
        return;
    }

    let lines: Vec<Line> = render_blocks(tree, colors, indent_size, show_caret)
        .into_iter()
        .skip(scroll_offset)
        .take(area.height as usize)
        .collect();

    f.render_widget(Paragraph::new(lines).style(base), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::{BlockId, BlockType};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_translate_typing_appends() {
        let block = Block::new(BlockId::from("a"), BlockType::Text, "ab");
        match translate(&block, &InputEvent::InsertCharacter('c')) {
            Some(BlockIntent::SetContent { content, .. }) => assert_eq!(content, "abc"),
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_translate_backspace_pops_multibyte_char() {
        let block = Block::new(BlockId::from("a"), BlockType::Text, "дом");
        match translate(&block, &InputEvent::Backspace) {
            Some(BlockIntent::SetContent { content, .. }) => assert_eq!(content, "до"),
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_translate_enter_keeps_heading_type() {
        let block = Block::new(BlockId::from("h"), BlockType::Heading1, "Title");
        match translate(&block, &InputEvent::Enter) {
            Some(BlockIntent::EnterSplit { block_type, .. }) => {
                assert_eq!(block_type, BlockType::Heading1)
            }
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_translate_ignores_navigation() {
        let block = Block::new(BlockId::from("a"), BlockType::Text, "");
        assert!(translate(&block, &InputEvent::FocusNext).is_none());
    }

    #[test]
    fn test_render_indents_children() {
        let tree = BlockTree::from_blocks(vec![Block::new(
            BlockId::from("p"),
            BlockType::Heading1,
            "Parent",
        )
        .with_children(vec![Block::new(BlockId::from("c"), BlockType::Text, "child")])]);
        let colors = ThemeColors::default_dark();

        let lines = render_blocks(&tree, &colors, 2, false);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "# Parent");
        assert_eq!(line_text(&lines[1]), "  · child");
    }

    #[test]
    fn test_multiline_content_and_focus_line() {
        let mut tree = BlockTree::from_blocks(vec![
            Block::new(BlockId::from("a"), BlockType::Text, "one\ntwo"),
            Block::new(BlockId::from("b"), BlockType::Text, "three"),
        ]);
        tree.focus(&BlockId::from("b"), &[]);
        let colors = ThemeColors::default_dark();

        let lines = render_blocks(&tree, &colors, 2, false);
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[1]), "  two");
        assert_eq!(focused_line_index(&tree), Some(2));
    }

    #[test]
    fn test_empty_unfocused_block_shows_placeholder() {
        let tree = BlockTree::from_blocks(vec![Block::new(BlockId::from("a"), BlockType::Text, "")]);
        let colors = ThemeColors::default_dark();

        let lines = render_blocks(&tree, &colors, 2, true);
        assert!(line_text(&lines[0]).contains(PLACEHOLDER));
    }
}
