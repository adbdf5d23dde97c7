//! Fitting a highlighted history entry into a fixed number of columns.
//!
//! An entry is split into segments around its match spans. While the line is
//! too wide, every shortenable segment proposes collapsing an interior run
//! into an ellipsis, and the proposal that lowers the total score the most
//! wins. The score is the sum of `weight * width` over all segments, so heavy
//! and long segments are eaten first. Match text has weight zero and is never
//! touched.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::history::HistoryEntry;

/// Marker inserted where a segment was collapsed.
pub const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Text matching the filter pattern.
    Match,
    /// Text between two matches.
    Unique,
    /// Text before the first match (or the whole line when nothing matched).
    Start,
    /// Text after the last match.
    End,
    /// Text shared with neighbouring rows. Reserved: nothing classifies
    /// segments this way yet.
    Common,
}

impl SegmentKind {
    pub fn weight(self) -> usize {
        match self {
            SegmentKind::Match => 0,
            SegmentKind::Start | SegmentKind::End => 1,
            SegmentKind::Unique => 2,
            SegmentKind::Common => 4,
        }
    }
}

/// A piece of fitted output, ready to be styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: SegmentKind,
    pub text: String,
    /// True for the ellipsis marker of a collapsed segment.
    pub elided: bool,
}

#[derive(Debug, Clone)]
struct Segment {
    kind: SegmentKind,
    text: String,
    /// `(head, tail)` characters kept around the ellipsis once collapsed.
    kept: Option<(usize, usize)>,
}

impl Segment {
    fn new(kind: SegmentKind, text: &str) -> Self {
        Self {
            kind,
            text: sanitize(text),
            kept: None,
        }
    }

    fn width(&self) -> usize {
        match self.kept {
            None => self.text.width(),
            Some((head, tail)) => {
                let head_width: usize = self.text.chars().take(head).map(char_width).sum();
                let tail_width: usize = self.text.chars().rev().take(tail).map(char_width).sum();
                head_width + ELLIPSIS.width() + tail_width
            }
        }
    }

    fn score(&self) -> usize {
        self.kind.weight() * self.width()
    }

    /// This segment collapsed far enough to give up `excess` columns, or as
    /// many as it can while keeping the ellipsis and one character of
    /// context on each side.
    fn collapsed_by(&self, excess: usize) -> Option<Segment> {
        let count = self.text.chars().count();
        let current = self.width();
        let minimum = ELLIPSIS.width() + 2;
        if count < 3 || current <= minimum {
            return None;
        }

        let give = excess.min(current - minimum);
        let budget = current - give - ELLIPSIS.width();
        let head = columns_to_chars(self.text.chars(), budget.div_ceil(2)).max(1);
        let tail = columns_to_chars(self.text.chars().rev(), budget / 2).max(1);
        if head + tail >= count {
            return None;
        }

        Some(Segment {
            kept: Some((head, tail)),
            ..self.clone()
        })
    }

    fn into_pieces(self, out: &mut Vec<Piece>) {
        let kind = self.kind;
        match self.kept {
            None => out.push(Piece {
                kind,
                text: self.text,
                elided: false,
            }),
            Some((head, tail)) => {
                let count = self.text.chars().count();
                out.push(Piece {
                    kind,
                    text: self.text.chars().take(head).collect(),
                    elided: false,
                });
                out.push(Piece {
                    kind,
                    text: ELLIPSIS.to_string(),
                    elided: true,
                });
                out.push(Piece {
                    kind,
                    text: self.text.chars().skip(count - tail).collect(),
                    elided: false,
                });
            }
        }
    }
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Number of leading items of `chars` that fit in `columns`.
fn columns_to_chars(chars: impl Iterator<Item = char>, columns: usize) -> usize {
    let mut used = 0;
    let mut count = 0;
    for c in chars {
        used += char_width(c);
        if used > columns {
            break;
        }
        count += 1;
    }
    count
}

/// Control characters would move the terminal cursor; show them as spaces.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Split `text` into segments around `spans` (byte ranges, in order).
fn split_segments(text: &str, spans: &[(usize, usize)]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;
    let mut matched = false;

    for &(start, end) in spans {
        if start < pos
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            continue;
        }
        if start > pos {
            let kind = if matched { SegmentKind::Unique } else { SegmentKind::Start };
            segments.push(Segment::new(kind, &text[pos..start]));
        }
        segments.push(Segment::new(SegmentKind::Match, &text[start..end]));
        matched = true;
        pos = end;
    }

    if pos < text.len() {
        let kind = if matched { SegmentKind::End } else { SegmentKind::Start };
        segments.push(Segment::new(kind, &text[pos..]));
    }
    segments
}

/// Fit `text` with the given match byte ranges into `width` columns.
///
/// Best effort: if every shortenable segment is already at its minimum the
/// result can still be wider than `width`.
pub fn fit(text: &str, spans: &[(usize, usize)], width: usize) -> Vec<Piece> {
    let mut segments = split_segments(text, spans);

    loop {
        let current: usize = segments.iter().map(Segment::width).sum();
        if current <= width {
            break;
        }
        let excess = current - width;
        let score: usize = segments.iter().map(Segment::score).sum();

        let mut best: Option<(usize, usize, Segment)> = None;
        for (index, segment) in segments.iter().enumerate() {
            if segment.kind.weight() == 0 {
                continue;
            }
            let Some(candidate) = segment.collapsed_by(excess) else {
                continue;
            };
            let candidate_score = score - segment.score() + candidate.score();
            if best.as_ref().is_none_or(|(best_score, _, _)| candidate_score < *best_score) {
                best = Some((candidate_score, index, candidate));
            }
        }

        match best {
            Some((candidate_score, index, candidate)) if candidate_score < score => {
                segments[index] = candidate;
            }
            _ => break,
        }
    }

    let mut pieces = Vec::with_capacity(segments.len());
    for segment in segments {
        segment.into_pieces(&mut pieces);
    }
    pieces
}

/// Fit a history entry, highlighting its recorded match spans.
pub fn fit_entry(entry: &HistoryEntry, width: usize) -> Vec<Piece> {
    let spans: Vec<(usize, usize)> = entry.matches.iter().map(|m| (m.start(), m.end())).collect();
    fit(&entry.text, &spans, width)
}

/// Total display width of fitted pieces.
pub fn pieces_width(pieces: &[Piece]) -> usize {
    pieces.iter().map(|p| p.text.width()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn joined(pieces: &[Piece]) -> String {
        pieces.iter().map(|p| p.text.as_str()).collect()
    }

    fn match_texts(pieces: &[Piece]) -> Vec<&str> {
        pieces
            .iter()
            .filter(|p| p.kind == SegmentKind::Match)
            .map(|p| p.text.as_str())
            .collect()
    }

    #[test]
    fn test_short_line_is_untouched() {
        let pieces = fit("git status", &[(0, 3)], 40);
        assert_eq!(joined(&pieces), "git status");
        assert_eq!(pieces[0].kind, SegmentKind::Match);
        assert_eq!(pieces[1].kind, SegmentKind::End);
    }

    #[test]
    fn test_segment_kinds() {
        let segments = split_segments("a x b x c", &[(2, 3), (6, 7)]);
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Start,
                SegmentKind::Match,
                SegmentKind::Unique,
                SegmentKind::Match,
                SegmentKind::End
            ]
        );
    }

    #[test]
    fn test_collapse_keeps_context_on_both_sides() {
        let pieces = fit("abcdefghijklmnopqrst", &[], 10);
        assert_eq!(pieces_width(&pieces), 10);
        assert_eq!(joined(&pieces), "abcde…qrst");
        assert!(pieces[1].elided);
    }

    #[test]
    fn test_unique_gap_is_shortened_before_start_and_end() {
        let text = "aaaaaaaaaa MATCH bbbbbbbbbb MATCH cccccccccc";
        let spans = [(11, 16), (28, 33)];
        let full = text.len();
        let pieces = fit(text, &spans, full - 4);
        assert_eq!(pieces_width(&pieces), full - 4);
        let elided_kind = pieces.iter().find(|p| p.elided).map(|p| p.kind);
        assert_eq!(elided_kind, Some(SegmentKind::Unique));
        assert!(joined(&pieces).starts_with("aaaaaaaaaa MATCH"));
        assert!(joined(&pieces).ends_with("MATCH cccccccccc"));
    }

    #[test]
    fn test_matches_are_never_shortened() {
        let text = format!(
            "{} needle {} needle {}",
            "x".repeat(40),
            "y".repeat(40),
            "z".repeat(40)
        );
        let first = text.find("needle").unwrap();
        let second = text.rfind("needle").unwrap();
        let spans = [(first, first + 6), (second, second + 6)];
        for width in [5, 12, 20, 30, 60] {
            let pieces = fit(&text, &spans, width);
            assert_eq!(match_texts(&pieces), vec!["needle", "needle"]);
        }
    }

    #[test]
    fn test_equal_scores_collapse_the_leftmost_segment() {
        let text = "aaaaaaaaaa X bbbbbbbbbb";
        let pieces = fit(text, &[(11, 12)], text.len() - 3);
        let elided: Vec<SegmentKind> = pieces.iter().filter(|p| p.elided).map(|p| p.kind).collect();
        assert_eq!(elided, vec![SegmentKind::Start]);
        assert!(joined(&pieces).ends_with("X bbbbbbbbbb"));
    }

    /// Lowercase filler around uppercase matches, with the matches' byte ranges.
    fn highlighted_line() -> impl Strategy<Value = (String, Vec<(usize, usize)>)> {
        (prop::collection::vec(("[a-z ]{0,20}", "[A-Z]{1,5}"), 0..4), "[a-z ]{0,20}").prop_map(
            |(parts, tail)| {
                let mut text = String::new();
                let mut spans = Vec::new();
                for (filler, matched) in parts {
                    text.push_str(&filler);
                    spans.push((text.len(), text.len() + matched.len()));
                    text.push_str(&matched);
                }
                text.push_str(&tail);
                (text, spans)
            },
        )
    }

    /// Narrowest rendering reachable: matches intact, everything else down to
    /// one character either side of an ellipsis.
    fn narrowest(text: &str, spans: &[(usize, usize)]) -> usize {
        split_segments(text, spans)
            .iter()
            .map(|s| match s.kind {
                SegmentKind::Match => s.width(),
                _ => s.width().min(ELLIPSIS.width() + 2),
            })
            .sum()
    }

    proptest! {
        #[test]
        fn fitted_line_respects_width_and_keeps_matches(
            (text, spans) in highlighted_line(),
            width in 0usize..120,
        ) {
            let pieces = fit(&text, &spans, width);
            let rendered = pieces_width(&pieces);
            let floor = narrowest(&text, &spans);

            if text.len() <= width {
                prop_assert_eq!(joined(&pieces), text.clone());
            }
            if width >= floor {
                prop_assert!(rendered <= width, "width {} rendered {}", width, rendered);
            } else {
                prop_assert_eq!(rendered, floor);
            }

            let expected: Vec<&str> = spans.iter().map(|&(start, end)| &text[start..end]).collect();
            prop_assert_eq!(match_texts(&pieces), expected);
        }
    }

    #[test]
    fn test_wide_characters_are_measured_in_columns() {
        let text = "echo 日本語日本語日本語日本語";
        let pieces = fit(text, &[(0, 4)], 14);
        assert!(pieces_width(&pieces) <= 14);
        assert_eq!(match_texts(&pieces), vec!["echo"]);
    }

    #[test]
    fn test_control_characters_are_blanked() {
        let pieces = fit("a\tb\x1b[31m", &[], 40);
        assert_eq!(joined(&pieces), "a b [31m");
    }

    #[test]
    fn test_common_weight_is_reserved() {
        assert_eq!(SegmentKind::Common.weight(), 4);
        let segments = split_segments("git commit --amend", &[(0, 3), (4, 10)]);
        assert!(segments.iter().all(|s| s.kind != SegmentKind::Common));
    }
}
