//! Selection and scroll state over the lazily fetched result list.
//!
//! Row 0 of the result list is the most recent match. Positive move deltas
//! walk toward older entries. The controller only ever asks the store for as
//! many entries as the new selection needs, and reports how much of the
//! screen has to be repainted as a [`Redraw`].

use tracing::{debug, trace};

use crate::history::{HistoryEntry, HistoryStore};

/// Extra rows kept between a paged selection and the window edge.
pub const PAGE_MARGIN: usize = 2;

/// How much of the list needs repainting after a viewport operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Only the rows of the previous and the new selection changed.
    Rows { previous: usize, current: usize },
    Full,
}

/// The window of result rows on screen and the selected row within it.
///
/// `scroll` is the index of the entry on the bottom row and `selection` the
/// index of the highlighted entry. Every operation leaves
/// `scroll <= selection < scroll + capacity`, and `last_filter` remembers the
/// `(text, cursor)` pair of the last filter change so repeats are ignored.
#[derive(Debug, Clone)]
pub struct Viewport {
    capacity: usize,
    scroll: usize,
    selection: usize,
    last_filter: Option<(String, usize)>,
}

impl Viewport {
    /// Create a viewport showing `capacity` rows (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            scroll: 0,
            selection: 0,
            last_filter: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the result shown in the first (bottom) row.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    /// The filter text or its cursor changed.
    pub fn on_filter_changed(
        &mut self,
        store: &mut HistoryStore,
        pattern: &str,
        cursor: usize,
    ) -> Redraw {
        if let Some((last_pattern, last_cursor)) = &self.last_filter {
            if last_pattern == pattern && *last_cursor == cursor {
                return Redraw::None;
            }
        }

        self.last_filter = Some((pattern.to_string(), cursor));
        self.selection = 0;
        self.scroll = 0;
        store.set_filter(pattern);
        Redraw::Full
    }

    /// The list area now has room for `capacity` rows.
    pub fn on_resize(&mut self, capacity: usize) -> Redraw {
        self.capacity = capacity.max(1);
        self.scroll = self
            .scroll
            .max((self.selection + 1).saturating_sub(self.capacity))
            .min(self.selection);
        debug!("Viewport resized to {} rows (scroll {})", self.capacity, self.scroll);
        Redraw::Full
    }

    /// Move the selection by `delta` rows, or `delta` pages when `by_page`.
    ///
    /// With `wrap`, the selection cycles through the rows of the current
    /// window rather than the whole result list. Without it, moving past the
    /// oldest match returns to the newest one, and moving before the newest
    /// jumps to the oldest (which fetches the entire result list).
    pub fn move_selection(
        &mut self,
        store: &mut HistoryStore,
        delta: isize,
        by_page: bool,
        wrap: bool,
    ) -> Redraw {
        let previous = self.selection;
        let capacity = self.capacity as isize;
        let step = delta * if by_page { capacity } else { 1 };

        let mut target = previous as isize + step;
        if wrap {
            let scroll = self.scroll as isize;
            target = scroll + (target - scroll).rem_euclid(capacity);
        }

        let wanted = usize::try_from(target + 1).unwrap_or(0).max(1);
        let (_, mut total) = store.fetch_up_to(wanted);
        if total == 0 {
            self.selection = 0;
            return Redraw::None;
        }

        if target >= total as isize {
            // A short window: wrap lands on its first row instead.
            target = if wrap { self.scroll as isize } else { 0 };
        }
        if target < 0 {
            total = store.fetch_up_to(usize::MAX).1;
            target = total as isize - 1;
        }
        let target = usize::try_from(target).unwrap_or(0);

        let redraw = if target < self.scroll || target >= self.scroll + self.capacity {
            self.scroll = self.scroll_for(target, by_page);
            debug!("Scrolled to {} for selection {}", self.scroll, target);
            Redraw::Full
        } else if target != previous {
            Redraw::Rows {
                previous,
                current: target,
            }
        } else {
            Redraw::None
        };

        self.selection = target;
        debug_assert!(self.scroll <= self.selection);
        debug_assert!(self.selection < self.scroll + self.capacity);
        trace!("Selection {} -> {} ({:?})", previous, target, redraw);
        redraw
    }

    /// Text of the selected entry, or `None` when nothing matches.
    pub fn current_selection<'a>(&self, store: &'a mut HistoryStore) -> Option<&'a str> {
        let (items, total) = store.fetch_up_to(self.selection + 1);
        if total == 0 {
            return None;
        }
        debug_assert!(self.selection < total);
        items.get(self.selection).map(|entry| entry.text.as_str())
    }

    /// Fetch enough entries to fill the window.
    pub fn prefetch(&self, store: &mut HistoryStore) {
        store.fetch_up_to(self.scroll + self.capacity);
    }

    /// Cached entries that fall inside the window, bottom row first.
    pub fn visible<'a>(&self, store: &'a HistoryStore) -> &'a [HistoryEntry] {
        let entries = store.entries();
        let start = self.scroll.min(entries.len());
        let end = (self.scroll + self.capacity).min(entries.len());
        &entries[start..end]
    }

    /// Smallest scroll that shows `target`, padded by [`PAGE_MARGIN`] when paging.
    fn scroll_for(&self, target: usize, by_page: bool) -> usize {
        let margin = if by_page {
            PAGE_MARGIN.min(self.capacity.saturating_sub(1) / 2)
        } else {
            0
        };

        if target < self.scroll {
            target.saturating_sub(margin)
        } else {
            (target + 1 + margin).saturating_sub(self.capacity)
        }
    }
}
