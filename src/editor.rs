//! Single-line editor for the filter prompt.
//!
//! Owns the filter text and a cursor measured in characters. Every edit
//! reports whether the `(text, cursor)` pair changed so the caller knows
//! when to re-run the search.

/// An editing operation on the filter text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Ctrl-U
    KillToStart,
    /// Ctrl-K
    KillToEnd,
    /// Ctrl-W
    DeleteWordBack,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an editor holding `text` with the cursor clamped to its length.
    pub fn new(text: &str, cursor: usize) -> Self {
        let cursor = cursor.min(text.chars().count());
        Self {
            text: text.to_string(),
            cursor,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply `op`. Returns true if the text or the cursor changed.
    pub fn apply(&mut self, op: EditOp) -> bool {
        let before = (self.text.len(), self.cursor);
        let len = self.char_count();

        match op {
            EditOp::Insert(c) => {
                let at = self.byte_index(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                return true;
            }
            EditOp::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
            }
            EditOp::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
            }
            EditOp::Left => self.cursor = self.cursor.saturating_sub(1),
            EditOp::Right => self.cursor = (self.cursor + 1).min(len),
            EditOp::Home => self.cursor = 0,
            EditOp::End => self.cursor = len,
            EditOp::KillToStart => {
                let at = self.byte_index(self.cursor);
                self.text.replace_range(..at, "");
                self.cursor = 0;
            }
            EditOp::KillToEnd => {
                let at = self.byte_index(self.cursor);
                self.text.truncate(at);
            }
            EditOp::DeleteWordBack => {
                let chars: Vec<char> = self.text.chars().collect();
                let mut start = self.cursor;
                while start > 0 && chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                while start > 0 && !chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                let (from, to) = (self.byte_index(start), self.byte_index(self.cursor));
                self.text.replace_range(from..to, "");
                self.cursor = start;
            }
            EditOp::Backspace | EditOp::Delete => {}
        }

        before != (self.text.len(), self.cursor)
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
