//! shist - an interactive shell history selector
//!
//! A replacement for the shell's reverse incremental search. The history file
//! is scanned lazily from newest to oldest, each command shown once, and the
//! result list is drawn bottom-up with the filter prompt below it:
//! - `history`: loading the history file and the deduplicating backward scan
//! - `ui`: the viewport controller, line fitting and the ratatui widgets
//! - `session`/`app`: key handling and the async event loop
//! - `shell`: handing the chosen command back to bash
//!
//! # Example
//!
//! ```
//! use shist::history::HistoryStore;
//!
//! let lines = vec!["ls".to_string(), "git log".to_string(), "ls".to_string()];
//! let mut store = HistoryStore::from_lines(lines);
//! store.set_filter("");
//!
//! let (entries, total) = store.fetch_up_to(10);
//! assert_eq!(total, 2);
//! assert_eq!(entries[0].text, "ls");
//! assert_eq!(entries[1].text, "git log");
//! ```

pub mod app;
pub mod config;
pub mod editor;
pub mod event;
pub mod history;
pub mod session;
pub mod shell;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::App;
pub use config::{Cli, Config, InjectMode};
pub use history::{HistoryEntry, HistoryError, HistoryStore, MatchSpan};
pub use session::{Outcome, Session};
pub use ui::viewport::{Redraw, Viewport};
