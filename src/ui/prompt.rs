use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::editor::LineEditor;

const PROMPT: &str = "$ ";

/// The filter input row.
pub struct Prompt<'a> {
    editor: &'a LineEditor,
}

impl<'a> Prompt<'a> {
    pub fn new(editor: &'a LineEditor) -> Self {
        Self { editor }
    }

    /// Where the hardware cursor belongs when the prompt occupies `area`.
    pub fn cursor_position(&self, area: Rect) -> Position {
        let before: String = self.editor.text().chars().take(self.editor.cursor()).collect();
        let column = (PROMPT.width() + before.width()).min(area.width.saturating_sub(1) as usize);
        Position::new(area.x + column as u16, area.y)
    }
}

impl Widget for Prompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from(vec![Span::raw(PROMPT), Span::raw(self.editor.text())]).render(area, buf);
    }
}
