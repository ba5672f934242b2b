use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use medwrite::app::{command::Command, persistence, r#loop::run_loop, state::AppState};
use medwrite::infrastructure::FsNoteStore;

const USAGE: &str = "usage: medwrite [PATH]\n\nOpens PATH for editing, or starts a new note there when it does not exist.";

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let path = match std::env::args().nth(1).as_deref() {
        Some("-h" | "--help") => {
            println!("{USAGE}");
            return Ok(());
        }
        Some("-V" | "--version") => {
            println!("medwrite {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        other => other.map(PathBuf::from),
    };

    let log_guard = medwrite::logging::init();
    setup_panic_hook();

    // Everything that can fail on config happens before raw mode.
    let prefs = persistence::load_preferences();
    let mut app_state = AppState::new(&prefs);
    let initial = match path {
        Some(path) if path.exists() => Some(Command::LoadNote(path)),
        Some(path) => {
            app_state.set_status(format!("New note: {}", path.display()));
            app_state.file_path = Some(path);
            None
        }
        None => None,
    };
    let store = Arc::new(FsNoteStore::new());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app_state, store, initial).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %format!("{err:#}"), "editor exited with an error");
        eprintln!("{err:?}");
        if let Some(guard) = &log_guard {
            eprintln!("Logs: {}", guard.log_dir().display());
        }
    }

    Ok(())
}
