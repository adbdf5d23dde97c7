//! User interface module.
//!
//! This module contains terminal setup, the viewport controller that keeps the
//! selection visible, the line fitting renderer, and the widgets that paint a
//! [`Session`]: the result list on top and the filter prompt on the last row.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::widgets::Widget;

use crate::session::Session;

pub mod fit;
pub mod history_list;
pub mod prompt;
pub mod terminal;
pub mod viewport;

use history_list::HistoryList;
use prompt::Prompt;

/// Split the screen into the list area and the prompt row.
pub fn split_screen(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area)
}

/// Where the hardware cursor goes: inside the prompt.
pub fn cursor_position(session: &Session, area: Rect) -> Position {
    let [_, prompt_area] = split_screen(area);
    Prompt::new(session.editor()).cursor_position(prompt_area)
}

impl Widget for &Session {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [list_area, prompt_area] = split_screen(area);
        let viewport = self.viewport();
        HistoryList::new(self.visible_entries(), viewport.scroll(), viewport.selection())
            .render(list_area, buf);
        Prompt::new(self.editor()).render(prompt_area, buf);
    }
}
