//! Shell history loading and incremental search.
//!
//! This module reads the shell's history file once at startup and exposes it
//! as a deduplicated, optionally pattern-filtered sequence ordered from the
//! most recent command to the oldest. Results are materialized lazily: only
//! as many entries as the screen asks for are ever scanned.

mod source;
mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use source::{parse_history, read_history_file, resolve_history_path};
pub use store::{find_matches, HistoryEntry, HistoryStore, MatchSpan, MAX_MATCHES};

/// Errors raised while locating or reading the backing history.
///
/// Both variants are fatal for the session: without history there is
/// nothing to select from.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history file is missing or unreadable.
    #[error("failed to read history file {path:?}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither `--histfile`, `$HISTFILE` nor a home directory was available.
    #[error("could not determine the history file location; set HISTFILE or pass --histfile")]
    Unresolved,
}
