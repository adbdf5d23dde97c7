//! Handing the selection back to the shell.
//!
//! Print mode writes the command to stdout and reports the chosen action
//! through the exit status; TIOCSTI mode types the command into the terminal
//! directly.

pub mod bind;
mod inject;

use tracing::info;

pub use inject::{inject, print, replay_sequence, InjectError};

use crate::config::InjectMode;
use crate::history::HistoryError;
use crate::event::keys::Action;
use crate::session::Outcome;

/// Exit status: the line was replaced (or restored, with TIOCSTI).
pub const EXIT_OK: u8 = 0;
/// Exit status: nothing was chosen, or the shell should keep its line.
pub const EXIT_NOTHING: u8 = 1;
/// Exit status: the history file could not be read.
pub const EXIT_NO_HISTORY: u8 = 2;
/// Exit status in print mode: the printed command should be run.
pub const EXIT_EXECUTE: u8 = 10;

/// Deliver `outcome` to the shell and pick the process exit status.
pub fn deliver(outcome: Option<&Outcome>, mode: InjectMode) -> Result<u8, InjectError> {
    let Some(outcome) = outcome else {
        return Ok(EXIT_NOTHING);
    };
    info!("Delivering {:?} via {:?}", outcome.action, mode);

    match (mode, outcome.action) {
        (InjectMode::Print, Action::Restore) => Ok(EXIT_NOTHING),
        (InjectMode::Print, Action::Replace) => {
            print(&outcome.text)?;
            Ok(EXIT_OK)
        }
        (InjectMode::Print, Action::Execute) => {
            print(&outcome.text)?;
            Ok(EXIT_EXECUTE)
        }
        (InjectMode::Iocsti, Action::Restore) => Ok(EXIT_OK),
        (InjectMode::Iocsti, action) => {
            inject(&outcome.text, outcome.cursor, action == Action::Execute)?;
            Ok(EXIT_OK)
        }
    }
}

/// Exit status for a run that failed with `err`.
pub fn error_status(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<HistoryError>().is_some() {
        EXIT_NO_HISTORY
    } else {
        EXIT_NOTHING
    }
}
