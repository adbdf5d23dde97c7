//! Deduplicated, pattern-filtered result cache over the loaded history.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::{read_history_file, HistoryError};

/// Maximum number of match spans recorded per entry.
pub const MAX_MATCHES: usize = 4;

/// One located occurrence of the filter pattern inside an entry.
///
/// Offsets are byte offsets stored as `u8`; occurrences ending past byte 255
/// are not recorded at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchSpan {
    pub offset: u8,
    pub length: u8,
}

impl MatchSpan {
    pub fn start(&self) -> usize {
        self.offset as usize
    }

    pub fn end(&self) -> usize {
        self.offset as usize + self.length as usize
    }
}

/// A distinct command surfaced by the current filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub text: String,
    pub matches: Vec<MatchSpan>,
}

impl HistoryEntry {
    fn new(text: &str, pattern: &str) -> Self {
        Self {
            text: text.to_string(),
            matches: find_matches(text, pattern),
        }
    }
}

/// Locate non-overlapping occurrences of `pattern` in `text`, left to right.
///
/// At most [`MAX_MATCHES`] spans are returned. Scanning stops at the first
/// occurrence that cannot be represented in a `u8` span, since every later
/// one starts even further along.
pub fn find_matches(text: &str, pattern: &str) -> Vec<MatchSpan> {
    let mut matches = Vec::new();
    let Ok(length) = u8::try_from(pattern.len()) else {
        return matches;
    };
    if length == 0 {
        return matches;
    }

    let mut from = 0;
    while matches.len() < MAX_MATCHES {
        let Some(found) = text[from..].find(pattern) else {
            break;
        };
        let start = from + found;
        let end = start + pattern.len();
        if end > u8::MAX as usize {
            break;
        }
        let Ok(offset) = u8::try_from(start) else {
            break;
        };
        matches.push(MatchSpan { offset, length });
        from = end;
    }
    matches
}

/// Lazily materialized search results over an append-only history.
///
/// `lines` holds the backing history oldest first. Scanning walks backwards
/// from `cursor`, so the cache fills up in recency order: the newest
/// qualifying, not-yet-seen command is always appended next.
#[derive(Debug)]
pub struct HistoryStore {
    lines: Vec<String>,
    pattern: String,
    entries: Vec<HistoryEntry>,
    seen: HashSet<String>,
    /// Number of lines not yet scanned; the next candidate is `lines[cursor - 1]`.
    cursor: usize,
}

impl HistoryStore {
    /// Build a store over already-parsed history lines (oldest first).
    pub fn from_lines(lines: Vec<String>) -> Self {
        let cursor = lines.len();
        Self {
            lines,
            pattern: String::new(),
            entries: Vec::new(),
            seen: HashSet::new(),
            cursor,
        }
    }

    /// Read the history file at `path` and build a store over it.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        Ok(Self::from_lines(read_history_file(path)?))
    }

    /// Replace the active filter and restart the scan from the newest line.
    pub fn set_filter(&mut self, pattern: &str) {
        debug!("Filter set to {:?}", pattern);
        self.pattern.clear();
        self.pattern.push_str(pattern);
        self.entries.clear();
        self.seen.clear();
        self.cursor = self.lines.len();
    }

    /// Make sure at least `n` entries are cached, if that many exist.
    ///
    /// Returns the whole cache and its length. The length is the number of
    /// distinct matches found *so far*; it can still grow on a later call
    /// with a larger `n`. Calls with an `n` that is already satisfied only
    /// return the cache.
    pub fn fetch_up_to(&mut self, n: usize) -> (&[HistoryEntry], usize) {
        let before = self.entries.len();

        while self.entries.len() < n && self.cursor > 0 {
            self.cursor -= 1;
            let line = &self.lines[self.cursor];
            if !line.contains(self.pattern.as_str()) || self.seen.contains(line) {
                continue;
            }
            self.seen.insert(line.clone());
            self.entries.push(HistoryEntry::new(line, &self.pattern));
        }

        if self.entries.len() > before {
            debug!(
                "Fetched {} new entries ({} cached, {} lines left to scan)",
                self.entries.len() - before,
                self.entries.len(),
                self.cursor
            );
        }

        (&self.entries, self.entries.len())
    }

    /// Entries cached so far, without scanning.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The active filter pattern.
    #[cfg(test)]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True once every backing line has been scanned for the current filter.
    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matches_records_non_overlapping_spans() {
        let spans = find_matches("aaaa", "aa");
        assert_eq!(
            spans,
            vec![
                MatchSpan { offset: 0, length: 2 },
                MatchSpan { offset: 2, length: 2 }
            ]
        );
    }

    #[test]
    fn test_find_matches_caps_span_count() {
        let spans = find_matches("x x x x x x", "x");
        assert_eq!(spans.len(), MAX_MATCHES);
        assert_eq!(spans.last().map(MatchSpan::start), Some(6));
    }

    #[test]
    fn test_find_matches_drops_spans_past_byte_255() {
        let text = format!("{}git{}git", "a".repeat(250), "b".repeat(10));
        let spans = find_matches(&text, "git");
        assert_eq!(spans, vec![MatchSpan { offset: 250, length: 3 }]);

        // Ends exactly at 256: dropped.
        let text = format!("{}git", "a".repeat(253));
        assert!(find_matches(&text, "git").is_empty());
    }

    #[test]
    fn test_find_matches_empty_pattern() {
        assert!(find_matches("anything", "").is_empty());
    }

    #[test]
    fn test_long_line_still_qualifies_without_spans() {
        let long = format!("{} needle", "x".repeat(300));
        let mut store = HistoryStore::from_lines(vec![long.clone()]);
        store.set_filter("needle");
        let (items, total) = store.fetch_up_to(10);
        assert_eq!(total, 1);
        assert_eq!(items[0].text, long);
        assert!(items[0].matches.is_empty());
    }

    #[test]
    fn test_fetch_stops_at_requested_count() {
        let lines = (0..10).map(|i| format!("cmd {}", i)).collect();
        let mut store = HistoryStore::from_lines(lines);
        let (items, total) = store.fetch_up_to(3);
        assert_eq!(total, 3);
        assert_eq!(items[0].text, "cmd 9");
        assert!(!store.is_exhausted());

        let (_, total) = store.fetch_up_to(usize::MAX);
        assert_eq!(total, 10);
        assert!(store.is_exhausted());
    }

    #[test]
    fn test_set_filter_resets_cache() {
        let mut store = HistoryStore::from_lines(vec!["ls".into(), "pwd".into()]);
        assert_eq!(store.fetch_up_to(5).1, 2);
        store.set_filter("pw");
        assert!(store.entries().is_empty());
        assert_eq!(store.pattern(), "pw");
        let (items, total) = store.fetch_up_to(5);
        assert_eq!(total, 1);
        assert_eq!(items[0].text, "pwd");
    }

    #[test]
    fn test_empty_history() {
        let mut store = HistoryStore::from_lines(Vec::new());
        assert_eq!(store.fetch_up_to(10).1, 0);
        assert!(store.is_exhausted());
    }
}
