//! One interactive search session.
//!
//! The session owns the history store, the viewport over its results and the
//! filter editor, and turns user events into updates of all three. It knows
//! nothing about the terminal; `App` drives it and paints it.

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::config::Config;
use crate::editor::{EditOp, LineEditor};
use crate::event::keys::{intent_for, Action, Intent};
use crate::event::UserEvent;
use crate::history::{HistoryEntry, HistoryStore};
use crate::ui::terminal::list_capacity;
use crate::ui::viewport::{Redraw, Viewport};

/// What to hand back to the shell once the session is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub action: Action,
    /// Selected command, or the raw filter text when nothing matched.
    pub text: String,
    /// Cursor position within `text`, in characters.
    pub cursor: usize,
}

/// State of one run: what was typed, what is selected and how it ended.
#[derive(Debug)]
pub struct Session {
    store: HistoryStore,
    viewport: Viewport,
    editor: LineEditor,
    wrap: bool,
    action: Option<Action>,
}

impl Session {
    /// Start a session over `store` with room for `capacity` list rows.
    pub fn new(store: HistoryStore, config: &Config, capacity: usize) -> Self {
        let mut session = Self {
            store,
            viewport: Viewport::new(capacity),
            editor: LineEditor::new(&config.initial_line, config.initial_cursor),
            wrap: config.wrap,
            action: None,
        };
        session.filter_changed();
        session
    }

    /// Apply one terminal event.
    pub fn handle_user_event(&mut self, event: UserEvent) -> Redraw {
        match event {
            UserEvent::Key(key) => self.handle_key(key),
            UserEvent::Resize(_, rows) => self.viewport.on_resize(list_capacity(rows)),
            UserEvent::Paste(text) => {
                let mut changed = false;
                for c in text.chars().filter(|c| !c.is_control()) {
                    changed |= self.editor.apply(EditOp::Insert(c));
                }
                if changed {
                    self.filter_changed()
                } else {
                    Redraw::None
                }
            }
            _ => Redraw::None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Redraw {
        match intent_for(key) {
            Intent::Edit(op) => {
                if self.editor.apply(op) {
                    self.filter_changed()
                } else {
                    Redraw::None
                }
            }
            Intent::Move { delta, by_page } => {
                let wrap = self.wrap && !by_page;
                self.viewport.move_selection(&mut self.store, delta, by_page, wrap)
            }
            Intent::Finish(action) => {
                debug!("Finishing with {:?}", action);
                self.action = Some(action);
                Redraw::None
            }
            Intent::Ignore => Redraw::None,
        }
    }

    /// The list area can now show `capacity` rows.
    pub fn resize(&mut self, capacity: usize) -> Redraw {
        if capacity == self.viewport.capacity() {
            return Redraw::None;
        }
        self.viewport.on_resize(capacity)
    }

    pub fn is_finished(&self) -> bool {
        self.action.is_some()
    }

    /// Fetch whatever the window needs before painting.
    pub fn prepare_frame(&mut self) {
        self.viewport.prefetch(&mut self.store);
    }

    /// Entries currently in the window, bottom row first.
    pub fn visible_entries(&self) -> &[HistoryEntry] {
        self.viewport.visible(&self.store)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    /// The selected command, if anything matches.
    pub fn selection(&mut self) -> Option<&str> {
        self.viewport.current_selection(&mut self.store)
    }

    /// Result of the session, once an action was chosen.
    ///
    /// Falls back to the typed filter text when the result list is empty.
    pub fn outcome(&mut self) -> Option<Outcome> {
        let action = self.action?;
        let (text, cursor) = match self.viewport.current_selection(&mut self.store) {
            Some(selected) => (selected.to_string(), selected.chars().count()),
            None => (self.editor.text().to_string(), self.editor.cursor()),
        };
        Some(Outcome { action, text, cursor })
    }

    fn filter_changed(&mut self) -> Redraw {
        self.viewport
            .on_filter_changed(&mut self.store, self.editor.text(), self.editor.cursor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InjectMode;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::path::PathBuf;

    fn config(initial: &str) -> Config {
        Config {
            histfile: PathBuf::from("/dev/null"),
            inject_mode: InjectMode::Print,
            wrap: false,
            initial_line: initial.to_string(),
            initial_cursor: initial.chars().count(),
        }
    }

    fn session(lines: &[&str], initial: &str, capacity: usize) -> Session {
        let store = HistoryStore::from_lines(lines.iter().map(|s| s.to_string()).collect());
        Session::new(store, &config(initial), capacity)
    }

    fn key(code: KeyCode) -> UserEvent {
        UserEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.handle_user_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_filters_and_enter_selects() {
        let mut s = session(&["ls -la", "git status", "ls -la", "cd /tmp"], "", 5);
        type_text(&mut s, "git");
        assert_eq!(s.selection(), Some("git status"));

        s.handle_user_event(key(KeyCode::Enter));
        assert!(s.is_finished());
        let outcome = s.outcome().unwrap();
        assert_eq!(outcome.action, Action::Execute);
        assert_eq!(outcome.text, "git status");
        assert_eq!(outcome.cursor, 10);
    }

    #[test]
    fn test_up_selects_older_entry() {
        let mut s = session(&["a", "b", "c", "d", "e"], "", 2);
        let redraw = s.handle_user_event(key(KeyCode::Up));
        assert_eq!(redraw, Redraw::Rows { previous: 0, current: 1 });
        assert_eq!(s.selection(), Some("d"));
        assert_eq!(s.viewport().scroll(), 0);
    }

    #[test]
    fn test_no_match_falls_back_to_filter_text() {
        let mut s = session(&["ls"], "docker ps", 5);
        s.handle_user_event(key(KeyCode::Tab));
        let outcome = s.outcome().unwrap();
        assert_eq!(outcome.action, Action::Replace);
        assert_eq!(outcome.text, "docker ps");
        assert_eq!(outcome.cursor, 9);
    }

    #[test]
    fn test_initial_line_is_the_first_filter() {
        let mut s = session(&["make test", "make", "ls"], "make", 5);
        assert_eq!(s.selection(), Some("make"));
        s.handle_user_event(key(KeyCode::Up));
        assert_eq!(s.selection(), Some("make test"));
    }

    #[test]
    fn test_resize_event_changes_capacity() {
        let mut s = session(&["a", "b"], "", 5);
        assert_eq!(s.handle_user_event(UserEvent::Resize(80, 11)), Redraw::Full);
        assert_eq!(s.viewport().capacity(), 10);
        assert_eq!(s.resize(10), Redraw::None);
    }

    #[test]
    fn test_paste_inserts_text() {
        let mut s = session(&["cargo build", "cargo test"], "", 5);
        s.handle_user_event(UserEvent::Paste("build\n".to_string()));
        assert_eq!(s.editor().text(), "build");
        assert_eq!(s.selection(), Some("cargo build"));
    }

    #[test]
    fn test_no_outcome_before_finishing() {
        let mut s = session(&["a"], "", 5);
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn test_visible_entries_after_prepare() {
        let mut s = session(&["a", "b", "c"], "", 2);
        assert!(s.visible_entries().is_empty());
        s.prepare_frame();
        let visible: Vec<&str> = s.visible_entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(visible, vec!["c", "b"]);
    }
}
