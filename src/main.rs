use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blocknote::config::Config;
use blocknote::document::block::{Block, BlockId, BlockType};
use blocknote::document::tree::BlockTree;
use blocknote::editor::state::EditorState;
use blocknote::file::host::FileHost;
use blocknote::file::loader::{load_notes_file, load_notes_from_stdin};
use blocknote::input::InputHandler;
use blocknote::theme::get_builtin_theme;
use blocknote::ui::UI;

/// blocknote - A terminal-based hierarchical block note editor
#[derive(Parser)]
#[command(name = "blocknote")]
#[command(version)]
#[command(about = "A terminal-based hierarchical block note editor", long_about = None)]
struct Cli {
    /// Note file to edit (omit to read from stdin if piped, or start a sample document)
    file: Option<String>,

    /// Theme name (overrides the config file)
    #[arg(short, long)]
    theme: Option<String>,

    /// Write logs to this file instead of the default data directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Use stderr to avoid interfering with stdout pipes
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

/// Installs the file logger. The returned guard flushes it on drop.
///
/// The terminal belongs to the UI, so logs only ever go to a file.
fn init_logging(log_file: Option<&Path>, default_filter: &str) -> Option<WorkerGuard> {
    let log_path = match log_file {
        Some(path) => path.to_path_buf(),
        None => dirs::data_local_dir()?.join("blocknote").join("blocknote.log"),
    };
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path.file_name()?;
    std::fs::create_dir_all(dir).ok()?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .ok()?;

    Some(guard)
}

/// The document shown when no file is given.
fn sample_document() -> BlockTree {
    BlockTree::from_blocks(vec![
        Block::new(BlockId::new(), BlockType::Heading1, "Мои заметки"),
        Block::new(BlockId::new(), BlockType::Text, "Начните писать здесь..."),
    ])
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();
    let config = Config::load();
    let _log_guard = init_logging(cli.log_file.as_deref(), &config.log_filter);
    info!(version = env!("CARGO_PKG_VERSION"), "starting blocknote");

    // Load the document BEFORE terminal setup, stdin may carry note data
    let (tree, filename, stdin_was_piped) = match cli.file {
        Some(file_path) if Path::new(&file_path).exists() => {
            let tree = load_notes_file(&file_path)?;
            (tree, Some(file_path), false)
        }
        Some(file_path) => {
            info!(path = %file_path, "file does not exist yet, starting a new document");
            (sample_document(), Some(file_path), false)
        }
        None if !io::stdin().is_terminal() => (load_notes_from_stdin()?, None, true),
        None => (sample_document(), None, false),
    };

    // Termion can use /dev/tty directly when stdin is piped, no redirection needed
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = MouseTerminal::from(stdout);
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // CLI theme overrides config theme
    let requested_theme = cli.theme.unwrap_or_else(|| config.theme.clone());
    let theme = match get_builtin_theme(&requested_theme) {
        Some(theme) => theme,
        None => {
            warn!(theme = %requested_theme, "unknown theme, using default-dark");
            get_builtin_theme("default-dark").context("default-dark theme is missing")?
        }
    };
    let theme_name = theme.name.clone();
    let mut ui = UI::new(theme);
    let mut input_handler = if stdin_was_piped {
        InputHandler::new_with_tty()
            .context("Failed to open /dev/tty for keyboard input when stdin was piped")?
    } else {
        InputHandler::new()
    };

    let mut state = EditorState::new(tree, theme_name);
    state.set_indent_size(config.indent_size);
    state.set_enable_mouse(config.enable_mouse);
    state.set_create_backup(config.create_backup);
    state.set_auto_save(config.auto_save);
    state.set_undo_limit(config.undo_limit);
    state.set_host(Box::new(FileHost::new(
        filename.as_ref().map(PathBuf::from),
        config.auto_save,
        config.create_backup,
    )));
    if let Some(name) = filename {
        state.set_filename(name);
    }

    let result = run_event_loop(&mut terminal, &mut ui, &mut input_handler, &mut state);

    // Termion restores the screen through Drop guards, the cursor is on us
    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    info!("exiting blocknote");
    result
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &mut UI,
    input_handler: &mut InputHandler,
    state: &mut EditorState,
) -> Result<()> {
    loop {
        if let Some(theme_name) = state.take_pending_theme() {
            ui.set_theme(&theme_name);
        }

        state.update_cursor_blink();

        ui.render(terminal, state)?;

        match input_handler.poll_event(Duration::from_millis(100))? {
            Some(event) => {
                if input_handler.handle_event(event, state)? {
                    break;
                }
            }
            // Input closed
            None => break,
        }
    }

    Ok(())
}
