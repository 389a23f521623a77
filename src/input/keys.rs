//! Keyboard event mapping and input event types.

use crate::editor::mode::EditorMode;
use termion::event::{Event, Key};

/// High-level input events abstracted from raw keyboard input.
///
/// These events represent user intentions rather than specific key presses,
/// allowing for mode-specific keybindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User wants to quit the editor
    Quit,
    /// Move focus to the next block
    FocusNext,
    /// Move focus to the previous block
    FocusPrevious,
    /// Enter insert mode (from normal mode)
    EnterInsertMode,
    /// Enter command mode (from normal mode)
    EnterCommandMode,
    /// Exit current mode back to normal mode
    ExitMode,
    /// Nest the focused block under its previous sibling (Tab)
    Indent,
    /// Move the focused block out of its parent (Shift+Tab)
    Unindent,
    /// Backspace in insert mode
    Backspace,
    /// Enter in insert mode
    Enter,
    /// Alt+Enter: line break inside the focused block
    SoftBreak,
    /// Insert a character in insert mode
    InsertCharacter(char),
    /// Append a text block at the end of the document
    AppendText,
    /// Append a heading block at the end of the document
    AppendHeading,
    /// Switch the focused block between text and heading
    ToggleHeading,
    /// Undo last change
    Undo,
    /// Redo last undone change
    Redo,
    /// Write the document
    Save,
    /// Toggle help overlay
    Help,
    /// Run the command buffer
    ExecuteCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Type into the command buffer
    CommandCharacter(char),
    /// Unknown or unmapped key
    Unknown,
}

/// Maps a termion Event to an InputEvent based on the current editor mode.
///
/// - Insert mode: printable keys edit the focused block, Tab/Shift+Tab/Enter/
///   Backspace restructure it, Esc leaves to Normal mode
/// - Normal mode: j/k move focus, o/O append blocks, u/Ctrl-r undo/redo,
///   i returns to Insert mode, : opens the command line
/// - Command mode: characters fill the buffer, Enter runs it, Esc cancels
///
/// # Example
///
/// ```
/// use termion::event::{Event, Key};
/// use blocknote::editor::mode::EditorMode;
/// use blocknote::input::keys::{map_key_event, InputEvent};
///
/// let event = Event::Key(Key::Char('\t'));
/// assert_eq!(map_key_event(event, &EditorMode::Insert), InputEvent::Indent);
/// ```
pub fn map_key_event(event: Event, mode: &EditorMode) -> InputEvent {
    let key = match event {
        Event::Key(k) => k,
        _ => return InputEvent::Unknown,
    };

    match mode {
        EditorMode::Insert => match key {
            Key::Esc => InputEvent::ExitMode,
            Key::Char('\t') => InputEvent::Indent,
            Key::BackTab => InputEvent::Unindent,
            Key::Backspace => InputEvent::Backspace,
            Key::Char('\n') => InputEvent::Enter,
            // Terminals send Alt+Enter as ESC followed by CR
            Key::Alt('\r') | Key::Alt('\n') => InputEvent::SoftBreak,
            Key::Up => InputEvent::FocusPrevious,
            Key::Down => InputEvent::FocusNext,
            Key::Ctrl('s') => InputEvent::Save,
            Key::Ctrl('z') => InputEvent::Undo,
            Key::Ctrl('y') => InputEvent::Redo,
            Key::F(1) => InputEvent::Help,
            Key::Char(c) => InputEvent::InsertCharacter(c),
            _ => InputEvent::Unknown,
        },
        EditorMode::Normal => match key {
            Key::Ctrl('r') => InputEvent::Redo,
            Key::Ctrl('s') => InputEvent::Save,
            Key::Char('q') => InputEvent::Quit,
            Key::Char('j') | Key::Down => InputEvent::FocusNext,
            Key::Char('k') | Key::Up => InputEvent::FocusPrevious,
            Key::Char('i') | Key::Char('a') | Key::Char('\n') => InputEvent::EnterInsertMode,
            Key::Char(':') => InputEvent::EnterCommandMode,
            Key::Char('o') => InputEvent::AppendText,
            Key::Char('O') => InputEvent::AppendHeading,
            Key::Char('t') => InputEvent::ToggleHeading,
            Key::Char('>') | Key::Char('\t') => InputEvent::Indent,
            Key::Char('<') | Key::BackTab => InputEvent::Unindent,
            Key::Char('u') => InputEvent::Undo,
            Key::Char('?') | Key::F(1) => InputEvent::Help,
            _ => InputEvent::Unknown,
        },
        EditorMode::Command => match key {
            Key::Esc => InputEvent::ExitMode,
            Key::Char('\n') => InputEvent::ExecuteCommand,
            Key::Backspace => InputEvent::CommandBackspace,
            Key::Char(c) => InputEvent::CommandCharacter(c),
            _ => InputEvent::Unknown,
        },
    }
}
