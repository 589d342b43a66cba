//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::controller::Controller;
use crate::notify::LatestNotification;
use crate::tui::app::App;

/// Initialise the terminal, run the app until the user quits, and restore
/// the terminal whether or not the app returned an error.
pub fn run_tui(controller: Controller<LatestNotification>) -> io::Result<()> {
    enable_raw_mode()?;
    if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    with_restore(|| run_app(controller), restore_terminal)
}

fn run_app(controller: Controller<LatestNotification>) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = App::new(controller);
    app.run(&mut terminal)
}

/// Run `run`, then `restore` unconditionally. The first error wins.
fn with_restore<T>(
    run: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let result = run();
    let restored = restore();
    match result {
        Ok(value) => restored.map(|()| value),
        Err(e) => Err(e),
    }
}

/// Leave raw mode and the alternate screen. Every step is attempted even if
/// an earlier one fails.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw.and(screen)
}
