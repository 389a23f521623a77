//! Bottom line: the `:` command prompt while in COMMAND mode, otherwise the
//! latest editor message colored by level.

use crate::editor::mode::EditorMode;
use crate::editor::state::{EditorState, MessageLevel};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Builds the single line shown under the status line.
pub fn message_line(state: &EditorState, colors: &ThemeColors) -> Line<'static> {
    if *state.mode() == EditorMode::Command {
        return Line::from(vec![
            Span::styled(
                ":",
                Style::default()
                    .fg(colors.info)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                state.command_buffer().to_string(),
                Style::default().fg(colors.foreground),
            ),
            Span::styled("▏", Style::default().fg(colors.caret)),
        ]);
    }

    let Some(message) = state.message() else {
        return Line::default();
    };
    let style = match message.level {
        MessageLevel::Error => Style::default()
            .fg(colors.error)
            .add_modifier(Modifier::BOLD),
        MessageLevel::Warning => Style::default().fg(colors.warning),
        MessageLevel::Info => Style::default().fg(colors.info),
    };
    Line::from(Span::styled(message.text.clone(), style))
}

pub fn render_message_area(f: &mut Frame, area: Rect, state: &EditorState, colors: &ThemeColors) {
    let paragraph = Paragraph::new(message_line(state, colors))
        .style(Style::default().bg(colors.background).fg(colors.foreground));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tree::BlockTree;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_command_prompt_shows_buffer() {
        let mut state = EditorState::new_with_default_theme(BlockTree::new());
        state.set_mode(EditorMode::Command);
        state.push_to_command_buffer('w');
        state.push_to_command_buffer('q');

        let line = message_line(&state, &ThemeColors::default_dark());
        assert_eq!(line_text(&line), ":wq▏");
    }

    #[test]
    fn test_message_hidden_while_typing_command() {
        let mut state = EditorState::new_with_default_theme(BlockTree::new());
        state.set_message("Wrote notes.json".to_string(), MessageLevel::Info);
        let colors = ThemeColors::default_dark();

        assert_eq!(line_text(&message_line(&state, &colors)), "Wrote notes.json");

        state.set_mode(EditorMode::Command);
        assert_eq!(line_text(&message_line(&state, &colors)), ":▏");
    }

    #[test]
    fn test_no_message_is_blank() {
        let state = EditorState::new_with_default_theme(BlockTree::new());
        assert!(message_line(&state, &ThemeColors::default_dark()).spans.is_empty());
    }
}
