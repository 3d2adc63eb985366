//! Interactive terminal dashboard

mod app;
mod charts;
mod components;
mod dashboard;
mod styles;
mod timeline;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::cli::workbook_path;
use crate::workbook::Workbook;
use app::App;

/// Load the workbook and run the dashboard until the user quits.
pub fn run(file: Option<PathBuf>) -> Result<()> {
    let path = workbook_path(file)?;

    // Load before switching terminal modes so load errors print normally.
    let workbook = Workbook::load(&path)?;
    tracing::info!(path = %path.display(), sheets = workbook.sheets.len(), "workbook loaded");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(workbook).run(&mut terminal);

    // Restore the terminal even when the loop errored
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
