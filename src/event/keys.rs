//! Key bindings for the history selector.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::EditOp;

/// How the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Put the selection on the command line and run it (Enter).
    Execute,
    /// Put the selection on the command line without running it (Tab).
    Replace,
    /// Leave the original command line alone (Esc, Ctrl-C).
    Restore,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Edit(EditOp),
    /// Positive `delta` moves toward older entries.
    Move { delta: isize, by_page: bool },
    Finish(Action),
    Ignore,
}

const OLDER: isize = 1;
const NEWER: isize = -1;

/// Map a key event to an [`Intent`].
pub fn intent_for(key: KeyEvent) -> Intent {
    if key.kind != KeyEventKind::Press {
        return Intent::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let row = |delta| Intent::Move { delta, by_page: false };
    let page = |delta| Intent::Move { delta, by_page: true };

    match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'r' | 'p' => row(OLDER),
            's' | 'n' => row(NEWER),
            'c' | 'g' => Intent::Finish(Action::Restore),
            'j' | 'm' => Intent::Finish(Action::Execute),
            'a' => Intent::Edit(EditOp::Home),
            'e' => Intent::Edit(EditOp::End),
            'b' => Intent::Edit(EditOp::Left),
            'f' => Intent::Edit(EditOp::Right),
            'd' => Intent::Edit(EditOp::Delete),
            'h' => Intent::Edit(EditOp::Backspace),
            'u' => Intent::Edit(EditOp::KillToStart),
            'k' => Intent::Edit(EditOp::KillToEnd),
            'w' => Intent::Edit(EditOp::DeleteWordBack),
            _ => Intent::Ignore,
        },
        KeyCode::Char(_) if alt => Intent::Ignore,
        KeyCode::Char(c) => Intent::Edit(EditOp::Insert(c)),

        KeyCode::Enter => Intent::Finish(Action::Execute),
        KeyCode::Tab => Intent::Finish(Action::Replace),
        KeyCode::Esc => Intent::Finish(Action::Restore),

        KeyCode::Up => row(OLDER),
        KeyCode::Down => row(NEWER),
        KeyCode::PageUp => page(OLDER),
        KeyCode::PageDown => page(NEWER),

        KeyCode::Left => Intent::Edit(EditOp::Left),
        KeyCode::Right => Intent::Edit(EditOp::Right),
        KeyCode::Home => Intent::Edit(EditOp::Home),
        KeyCode::End => Intent::Edit(EditOp::End),
        KeyCode::Backspace => Intent::Edit(EditOp::Backspace),
        KeyCode::Delete => Intent::Edit(EditOp::Delete),
        _ => Intent::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            intent_for(press(KeyCode::Up, KeyModifiers::NONE)),
            Intent::Move { delta: 1, by_page: false }
        );
        assert_eq!(
            intent_for(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Intent::Move { delta: 1, by_page: false }
        );
        assert_eq!(
            intent_for(press(KeyCode::PageDown, KeyModifiers::NONE)),
            Intent::Move { delta: -1, by_page: true }
        );
    }

    #[test]
    fn test_finishing_keys() {
        let plain = |code| intent_for(press(code, KeyModifiers::NONE));
        assert_eq!(plain(KeyCode::Enter), Intent::Finish(Action::Execute));
        assert_eq!(plain(KeyCode::Tab), Intent::Finish(Action::Replace));
        assert_eq!(
            intent_for(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Intent::Finish(Action::Restore)
        );
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(
            intent_for(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Intent::Edit(EditOp::Insert('G'))
        );
        assert_eq!(
            intent_for(press(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            Intent::Edit(EditOp::DeleteWordBack)
        );
        assert_eq!(intent_for(press(KeyCode::Char('x'), KeyModifiers::ALT)), Intent::Ignore);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(intent_for(key), Intent::Ignore);
    }
}
