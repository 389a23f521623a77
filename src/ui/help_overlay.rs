//! Help overlay for displaying keybindings and commands.

use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Insert mode (default)",
        &[
            ("  <text>         ", "Type into the focused block"),
            ("  Enter          ", "New block of the same type below"),
            ("  Alt-Enter      ", "Line break inside the block"),
            ("  Tab            ", "Nest under the previous sibling"),
            ("  Shift-Tab      ", "Move out of the parent block"),
            ("  Backspace      ", "Delete a character, or the block when empty"),
            ("  Up / Down      ", "Focus previous/next block"),
            ("  Ctrl-z / Ctrl-y", "Undo / redo"),
            ("  Ctrl-s         ", "Write the note file"),
            ("  Esc            ", "Switch to NORMAL mode"),
        ],
    ),
    (
        "Normal mode",
        &[
            ("  j/k            ", "Focus next/previous block"),
            ("  i / Enter      ", "Back to INSERT mode"),
            ("  o / O          ", "Append a text/heading block"),
            ("  t              ", "Toggle heading on the focused block"),
            ("  > / <          ", "Indent / unindent"),
            ("  u / Ctrl-r     ", "Undo / redo"),
            ("  q              ", "Quit"),
        ],
    ),
    (
        "Commands",
        &[
            ("  :w [file]      ", "Write the note file"),
            ("  :q / :q!       ", "Quit / quit without saving"),
            ("  :wq / :x       ", "Write and quit"),
            ("  :theme <name>  ", "Switch color theme"),
        ],
    ),
];

/// Number of lines in the help text, the bound for help scrolling.
pub fn help_line_count() -> usize {
    // Each section adds a blank line and its title; the footer adds two more
    SECTIONS
        .iter()
        .map(|(_, bindings)| bindings.len() + 2)
        .sum::<usize>()
        + 2
}

fn help_lines(colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut help_text = Vec::new();
    for (title, bindings) in SECTIONS {
        help_text.push(Line::from(""));
        help_text.push(Line::from(vec![Span::styled(
            *title,
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )]));
        for (keys, description) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(*keys, Style::default().fg(colors.caret)),
                Span::raw(*description),
            ]));
        }
    }
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![Span::styled(
        "j/k or mouse wheel to scroll • any other key closes",
        Style::default()
            .fg(colors.info)
            .add_modifier(Modifier::ITALIC),
    )]));
    help_text
}

/// Renders a centered help overlay showing keybindings and commands.
pub fn render_help_overlay(f: &mut Frame, colors: &ThemeColors, scroll: usize) {
    let area = centered_rect(80, 85, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" blocknote Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.info))
        .style(Style::default().bg(colors.background));

    let scroll = scroll.min(help_line_count().saturating_sub(1));
    let paragraph = Paragraph::new(help_lines(colors))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
