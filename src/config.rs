//! Command-line flags and environment-derived settings.

use std::path::PathBuf;

use clap::Parser;

use crate::history::{resolve_history_path, HistoryError};

#[derive(Parser, Debug, Default)]
#[command(name = "shist")]
#[command(
    about = "Shell history selector - a replacement for standard reverse search.",
    long_about = None
)]
pub struct Cli {
    /// Use TIOCSTI to inject the selection into the shell instead of printing it.
    #[arg(long)]
    pub iocsti: bool,

    /// Print the key binding command for the given shell and exit.
    #[arg(
        short = 'b',
        long,
        value_name = "SHELL",
        num_args = 0..=1,
        default_missing_value = "bash"
    )]
    pub bind: Option<String>,

    /// Read history from this file instead of $HISTFILE.
    #[arg(long, value_name = "PATH")]
    pub histfile: Option<PathBuf>,

    /// Let Up/Down wrap around within the visible rows.
    #[arg(long)]
    pub wrap: bool,
}

/// How the final selection reaches the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectMode {
    /// Write it to stdout for a `bind -x` widget.
    Print,
    /// Push it into the terminal input queue with TIOCSTI.
    Iocsti,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub histfile: PathBuf,
    pub inject_mode: InjectMode,
    pub wrap: bool,
    /// Command line the shell had when we were launched (`$READLINE_LINE`).
    pub initial_line: String,
    /// Cursor within `initial_line`, in characters.
    pub initial_cursor: usize,
}

impl Config {
    /// Combine CLI flags with the environment. `env` looks up variables.
    pub fn resolve<F>(cli: &Cli, env: F) -> Result<Self, HistoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let histfile = resolve_history_path(cli.histfile.as_deref(), &env)?;

        // Bash exports the edited line and its byte cursor only together.
        let (initial_line, initial_cursor) = match (env("READLINE_LINE"), env("READLINE_POINT")) {
            (Some(line), Some(point)) => {
                let point = point.trim().parse::<usize>().unwrap_or(line.len());
                let cursor = char_cursor(&line, point);
                (line, cursor)
            }
            _ => (String::new(), 0),
        };

        Ok(Self {
            histfile,
            inject_mode: if cli.iocsti { InjectMode::Iocsti } else { InjectMode::Print },
            wrap: cli.wrap,
            initial_line,
            initial_cursor,
        })
    }
}

/// Convert bash's byte offset into a character index.
fn char_cursor(line: &str, byte_point: usize) -> usize {
    line.char_indices().take_while(|(i, _)| *i < byte_point).count()
}
