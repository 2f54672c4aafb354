//! Terminal UI: the human plays X against the search engine.

mod app;
mod input;
mod ui;

pub use app::App;

use crate::config::AppConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info, instrument};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the TUI until the user quits.
///
/// The terminal is restored even when the game loop fails.
#[instrument(skip_all)]
pub fn run_tui(config: &AppConfig) -> Result<()> {
    info!("Starting Unbeatable TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(config));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI exited");
    res
}

fn run_app(terminal: &mut Term, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
