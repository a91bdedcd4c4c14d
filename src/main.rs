//! bookshelf - Personal Library Manager
//!
//! A terminal book catalog. Books are added through a form, listed, searched
//! by title or author, and summarised in a statistics view. The library is
//! saved to a JSON file after every change.

use std::io;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

mod cli;

use bookshelf::application::{App, AppMode, LibraryStore};
use bookshelf::domain::current_year;
use bookshelf::infrastructure::{FileRepository, setup_tracing};
use bookshelf::presentation::{render_ui, InputHandler};
use cli::Cli;

/// Entry point for the bookshelf terminal application.
///
/// Parses arguments, opens the library file, sets up the terminal and runs
/// the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let logging = setup_tracing(&cli.log_file);

    let (store, notice) = LibraryStore::open(FileRepository::new(&cli.library));
    let mut app = App::new(store, notice, current_year());
    info!(path = %cli.library.display(), "bookshelf started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = logging {
        eprintln!("logging disabled: could not open {}: {}", cli.log_file.display(), err);
    }

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Draws the current view and dispatches key presses. Returns when the
/// user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => {
                        info!(books = app.store.len(), "bookshelf exiting");
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
