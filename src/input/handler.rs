//! Input event handler for polling and processing keyboard events.

use super::keys::{map_key_event, InputEvent};
use crate::document::block::BlockType;
use crate::editor::mode::EditorMode;
use crate::editor::state::{EditorState, MessageLevel};
use crate::ui::{block_view, help_overlay};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Stdin};
use std::time::Duration;
use termion::event::{Event, Key, MouseButton, MouseEvent};
use termion::input::{Events, TermRead};
use tracing::{debug, warn};

/// Event source for reading terminal events.
///
/// The events iterator is kept across calls so rapid input (paste) is not
/// lost between polls.
enum EventSource {
    /// Reading from stdin
    Stdin(Events<Stdin>),
    /// Reading from /dev/tty
    Tty(Events<File>),
}

/// Handles terminal input events and updates editor state.
///
/// The InputHandler polls for termion events, converts them to
/// high-level InputEvents, and drives the editor accordingly.
pub struct InputHandler {
    events: EventSource,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// What a `:` command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write(Option<String>),
    Quit,
    ForceQuit,
    WriteQuit,
    Theme(String),
    Unknown(String),
}

/// Parses the text typed after `:`.
///
/// ```
/// use blocknote::input::handler::{parse_command, Command};
///
/// assert_eq!(parse_command("w"), Command::Write(None));
/// assert_eq!(parse_command("w notes.json"), Command::Write(Some("notes.json".to_string())));
/// assert_eq!(parse_command("q!"), Command::ForceQuit);
/// ```
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (name, arg) = match input.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string())),
        None => (input, None),
    };

    match name {
        "w" | "write" => Command::Write(arg),
        "q" | "quit" => Command::Quit,
        "q!" | "quit!" => Command::ForceQuit,
        "wq" | "x" => Command::WriteQuit,
        "theme" => match arg {
            Some(theme) if !theme.is_empty() => Command::Theme(theme),
            _ => Command::Unknown(input.to_string()),
        },
        _ => Command::Unknown(input.to_string()),
    }
}

impl InputHandler {
    /// Creates a new InputHandler that reads from stdin.
    pub fn new() -> Self {
        Self {
            events: EventSource::Stdin(io::stdin().events()),
        }
    }

    /// Creates a new InputHandler that reads from /dev/tty.
    pub fn new_with_tty() -> Result<Self> {
        let tty_file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self {
            events: EventSource::Tty(tty_file.events()),
        })
    }

    /// Waits for the next terminal event.
    ///
    /// Returns None when the input stream has ended.
    pub fn poll_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        let next = match &mut self.events {
            EventSource::Stdin(events) => events.next(),
            EventSource::Tty(events) => events.next(),
        };

        match next {
            Some(event_result) => Ok(Some(event_result?)),
            None => Ok(None),
        }
    }

    /// Handles a terminal event and updates editor state.
    ///
    /// Returns Ok(true) if the application should quit.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use blocknote::input::InputHandler;
    /// use blocknote::editor::state::EditorState;
    /// use blocknote::document::tree::BlockTree;
    /// use termion::event::{Event, Key};
    ///
    /// let mut handler = InputHandler::new();
    /// let mut state = EditorState::new_with_default_theme(BlockTree::new());
    /// handler.handle_event(Event::Key(Key::Esc), &mut state).unwrap();
    /// let should_quit = handler.handle_event(Event::Key(Key::Char('q')), &mut state).unwrap();
    /// assert!(should_quit);
    /// ```
    pub fn handle_event(&mut self, event: Event, state: &mut EditorState) -> Result<bool> {
        if let Event::Mouse(mouse_event) = event {
            handle_mouse(mouse_event, state);
            return Ok(false);
        }

        if state.show_help() {
            match event {
                Event::Key(Key::Char('j')) | Event::Key(Key::Down) => {
                    state.scroll_help_down(help_overlay::help_line_count())
                }
                Event::Key(Key::Char('k')) | Event::Key(Key::Up) => state.scroll_help_up(),
                _ => state.toggle_help(),
            }
            return Ok(false);
        }

        let input = map_key_event(event, state.mode());
        handle_input(input, state)
    }
}

fn handle_mouse(mouse_event: MouseEvent, state: &mut EditorState) {
    if !state.enable_mouse() {
        return;
    }

    match mouse_event {
        MouseEvent::Press(MouseButton::WheelUp, _, _) => {
            if state.show_help() {
                state.scroll_help_up();
            } else {
                state.focus_previous();
            }
        }
        MouseEvent::Press(MouseButton::WheelDown, _, _) => {
            if state.show_help() {
                state.scroll_help_down(help_overlay::help_line_count());
            } else {
                state.focus_next();
            }
        }
        _ => {}
    }
}

/// Applies one mapped input event to the editor. Returns true to quit.
pub fn handle_input(input: InputEvent, state: &mut EditorState) -> Result<bool> {
    match input {
        InputEvent::Indent
        | InputEvent::Unindent
        | InputEvent::Backspace
        | InputEvent::Enter
        | InputEvent::SoftBreak
        | InputEvent::InsertCharacter(_) => {
            edit_focused_block(&input, state);
        }
        InputEvent::ExitMode => {
            state.clear_command_buffer();
            state.set_mode(EditorMode::Normal);
        }
        InputEvent::EnterInsertMode => {
            state.clear_message();
            state.set_mode(EditorMode::Insert);
        }
        InputEvent::EnterCommandMode => {
            state.clear_message();
            state.clear_command_buffer();
            state.set_mode(EditorMode::Command);
        }
        InputEvent::FocusNext => {
            state.focus_next();
        }
        InputEvent::FocusPrevious => {
            state.focus_previous();
        }
        InputEvent::AppendText => {
            state.append_block(BlockType::Text);
            state.set_mode(EditorMode::Insert);
        }
        InputEvent::AppendHeading => {
            state.append_block(BlockType::Heading1);
            state.set_mode(EditorMode::Insert);
        }
        InputEvent::ToggleHeading => {
            state.toggle_block_type();
        }
        InputEvent::Undo => {
            if !state.undo() {
                state.set_message("Already at oldest change".to_string(), MessageLevel::Info);
            }
        }
        InputEvent::Redo => {
            if !state.redo() {
                state.set_message("Already at newest change".to_string(), MessageLevel::Info);
            }
        }
        InputEvent::Save => save(state, None),
        InputEvent::Help => state.toggle_help(),
        InputEvent::Quit => return Ok(try_quit(state)),
        InputEvent::CommandCharacter(c) => state.push_to_command_buffer(c),
        InputEvent::CommandBackspace => {
            if state.command_buffer().is_empty() {
                state.set_mode(EditorMode::Normal);
            } else {
                state.pop_from_command_buffer();
            }
        }
        InputEvent::ExecuteCommand => {
            let command = parse_command(state.command_buffer());
            state.clear_command_buffer();
            state.set_mode(EditorMode::Normal);
            return Ok(run_command(command, state));
        }
        InputEvent::Unknown => {}
    }

    Ok(false)
}

/// Routes a block-level key through the block view to the editor.
fn edit_focused_block(input: &InputEvent, state: &mut EditorState) {
    // Typing into an empty document starts a first block
    if state.tree().focused().is_none() {
        let content = match input {
            InputEvent::InsertCharacter(c) => c.to_string(),
            InputEvent::SoftBreak => "\n".to_string(),
            InputEvent::Enter => String::new(),
            _ => return,
        };
        state.start_document(&content);
        state.reset_cursor_blink();
        return;
    }

    let intent = state
        .tree()
        .focused()
        .and_then(|block| block_view::translate(block, input));
    if let Some(intent) = intent {
        state.apply(intent);
        state.reset_cursor_blink();
    }
}

fn save(state: &mut EditorState, path: Option<String>) {
    match state.save(path) {
        Ok(()) => {
            let name = state.filename().unwrap_or_default().to_string();
            state.set_message(format!("Wrote {}", name), MessageLevel::Info);
        }
        Err(e) => {
            warn!(error = %e, "save failed");
            state.set_message(format!("Save failed: {:#}", e), MessageLevel::Error);
        }
    }
}

fn try_quit(state: &mut EditorState) -> bool {
    if state.is_dirty() {
        state.set_message(
            "No write since last change (add ! to override)".to_string(),
            MessageLevel::Warning,
        );
        false
    } else {
        true
    }
}

fn run_command(command: Command, state: &mut EditorState) -> bool {
    debug!(?command, "running command");
    match command {
        Command::Write(path) => {
            save(state, path);
            false
        }
        Command::Quit => try_quit(state),
        Command::ForceQuit => true,
        Command::WriteQuit => {
            save(state, None);
            !state.is_dirty()
        }
        Command::Theme(name) => {
            if crate::theme::get_builtin_theme(&name).is_some() {
                state.request_theme_change(name);
            } else {
                state.set_message(format!("Unknown theme: {}", name), MessageLevel::Error);
            }
            false
        }
        Command::Unknown(text) => {
            state.set_message(format!("Not an editor command: {}", text), MessageLevel::Error);
            false
        }
    }
}
