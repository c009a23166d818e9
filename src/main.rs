use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use rusqlite::Connection;
use std::{fs::OpenOptions, io, sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;

use app::error::AppResult;
use app::paths::AppPaths;

// The terminal is taken over by the UI, so log lines go to a file
// next to the database
fn init_logging(paths: &AppPaths) -> AppResult<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_path())?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

// Start the app.
// Terminal handling heavily based on:
// https://github.com/ratatui-org/ratatui/blob/main/examples/list.rs
pub fn main() -> AppResult<()> {
    let paths = AppPaths::resolve()?;
    init_logging(&paths)?;

    // Initialize connection to the database
    let storage = app::storage::Storage {
        db_con: Connection::open(paths.db_path())?,
    };
    storage.create_tables_if_not_exist()?;
    storage.seed_people_if_empty()?;
    info!(target: "app", db = %paths.db_path().display(), "starting");

    // Create an app with 250 ms tick
    let tick_rate = Duration::from_millis(250);
    let app = app::ui::App::new(&storage)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app::ui::run_app(&mut terminal, app, tick_rate);

    // Restore previous terminal state after exit
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}
