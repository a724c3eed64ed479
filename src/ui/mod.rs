mod app;
mod handlers;
mod rendering;
mod types;

pub use app::App;
pub use types::{ActivityLog, AppTracker, InputMode, Toast, ToastKind, ToastQueue};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;

/// Entry point for running the dashboard.
pub fn run_ui(tracker: AppTracker) -> Result<()> {
    let mut app = App::new(tracker);

    let mut stdout = stdout();
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
