//! Rendering of the result list above the prompt.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::history::HistoryEntry;
use crate::ui::fit::{fit_entry, Piece, SegmentKind};

const SELECTED_MARGIN: &str = "> ";
const MARGIN: &str = "  ";

/// The result list, newest entry on the bottom row.
pub struct HistoryList<'a> {
    entries: &'a [HistoryEntry],
    /// Result index of `entries[0]`.
    first_index: usize,
    selection: usize,
}

impl<'a> HistoryList<'a> {
    pub fn new(entries: &'a [HistoryEntry], first_index: usize, selection: usize) -> Self {
        Self {
            entries,
            first_index,
            selection,
        }
    }
}

impl Widget for HistoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_width = (area.width as usize).saturating_sub(MARGIN.len());

        for (offset, entry) in self.entries.iter().enumerate().take(area.height as usize) {
            let y = area.bottom() - 1 - offset as u16;
            let selected = self.first_index + offset == self.selection;

            let mut spans = vec![Span::raw(if selected { SELECTED_MARGIN } else { MARGIN })];
            spans.extend(fit_entry(entry, text_width).into_iter().map(piece_span));

            let mut line = Line::from(spans);
            if selected {
                line = line.style(Style::default().add_modifier(Modifier::BOLD));
            }
            line.render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

fn piece_span(piece: Piece) -> Span<'static> {
    let style = if piece.elided {
        Style::default().add_modifier(Modifier::DIM)
    } else if piece.kind == SegmentKind::Match {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    Span::styled(piece.text, style)
}
