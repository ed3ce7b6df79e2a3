//! Match collection and cursor-relative navigation

use std::ops::Range;

use tracing::{trace, warn};

use super::pattern::SearchPattern;

/// Most matches collected for one search
pub const MATCH_LIMIT: usize = 5000;

/// A located occurrence, as byte offsets into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Collect the non-overlapping matches of `pattern` in `document`, left to right
///
/// Collection stops once [`MATCH_LIMIT`] matches have been found.
pub fn find_all(document: &str, pattern: &SearchPattern) -> Vec<Match> {
    let (matches, truncated) = collect_matches(document, pattern);
    if truncated {
        warn!(limit = MATCH_LIMIT, "match limit reached, results truncated");
    }
    trace!(count = matches.len(), "collected matches");
    matches
}

/// Matches up to the limit, and whether any were left uncollected
fn collect_matches(document: &str, pattern: &SearchPattern) -> (Vec<Match>, bool) {
    let regex = pattern.regex();
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos <= document.len() {
        let Some(m) = regex.find_at(document, pos) else {
            break;
        };
        if matches.len() == MATCH_LIMIT {
            return (matches, true);
        }
        matches.push(Match::new(m.start(), m.end()));

        pos = if m.end() > m.start() {
            m.end()
        } else {
            // Zero-width match: step over one character to make progress
            next_boundary(document, m.end())
        };
    }

    (matches, false)
}

/// Byte offset of the char boundary after `pos` (or past the end)
fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}

/// Pick the match to select relative to the selection `[sel_start, sel_end]`
///
/// Forward picks the first match starting at or after `sel_end`, backward
/// the last match ending at or before `sel_start`; both wrap around when
/// nothing qualifies. Returns `None` only for an empty match list.
pub fn navigate(
    matches: &[Match],
    sel_start: usize,
    sel_end: usize,
    direction: SearchDirection,
) -> Option<usize> {
    if matches.is_empty() {
        return None;
    }

    let idx = match direction {
        SearchDirection::Forward => matches
            .iter()
            .position(|m| m.start >= sel_end)
            .unwrap_or(0),
        SearchDirection::Backward => matches
            .iter()
            .rposition(|m| m.end <= sel_start)
            .unwrap_or(matches.len() - 1),
    };
    Some(idx)
}

/// Match position indicator: `"{current}/{total}"`, 1-based, or `"0/0"`
pub fn indicator(current: Option<usize>, total: usize) -> String {
    match current {
        Some(idx) if total > 0 => format!("{}/{}", idx + 1, total),
        _ => "0/0".to_string(),
    }
}
