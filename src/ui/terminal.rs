//! Terminal setup and teardown.
//!
//! The UI is drawn on stderr so that stdout stays clean for print mode,
//! where the shell captures the selected command from our standard output.

use std::io::{self, Stderr};

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type TuiTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Switch to raw mode and the alternate screen.
pub fn init() -> io::Result<TuiTerminal> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stderr()))
}

/// Leave the alternate screen and give the terminal back to the shell.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stderr(), LeaveAlternateScreen, Show)
}

/// Rows available for the result list on a terminal `rows` tall; one row is
/// taken by the prompt.
pub fn list_capacity(rows: u16) -> usize {
    (rows as usize).saturating_sub(1).max(1)
}
