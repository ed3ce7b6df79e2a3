//! Find/replace session state
//!
//! One session backs one find widget: it holds the query, the toggles,
//! the last computed match list and which match is selected. Changing
//! the query, the options or the document throws the list away; it is
//! always recomputed wholesale, never patched.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use regex::NoExpand;
use tracing::debug;

use super::matches::{find_all, indicator, navigate, Match, SearchDirection};
use super::pattern::{compile, SearchOptions, SearchPattern};
use crate::document::Document;

/// State of one find/replace interaction
#[derive(Debug, Clone, Default)]
pub struct FindSession {
    query: String,
    replacement: String,
    options: SearchOptions,
    matches: Vec<Match>,
    current: Option<usize>,
    /// Hash of the text the match list was computed from
    searched: Option<u64>,
}

impl FindSession {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_match(&self) -> Option<Match> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    /// `"{current}/{total}"` for the find widget, `"0/0"` when nothing is selected
    pub fn indicator(&self) -> String {
        indicator(self.current, self.matches.len())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.invalidate();
        }
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.replacement = replacement.into();
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        if options != self.options {
            self.options = options;
            self.invalidate();
        }
    }

    /// Forget the match list and selection
    pub fn invalidate(&mut self) {
        self.matches.clear();
        self.current = None;
        self.searched = None;
    }

    /// Whether the match list was computed from a different text
    pub fn is_stale(&self, text: &str) -> bool {
        self.searched != Some(text_hash(text))
    }

    fn pattern(&self) -> Option<SearchPattern> {
        compile(&self.query, self.options)
    }

    /// Recompute matches and select the next one relative to the selection
    ///
    /// Returns the selected match, or `None` when the query is unusable
    /// or matches nothing; the session is then left with no matches.
    pub fn find(
        &mut self,
        text: &str,
        selection: (usize, usize),
        direction: SearchDirection,
    ) -> Option<Match> {
        self.invalidate();
        let pattern = self.pattern()?;

        self.matches = find_all(text, &pattern);
        self.searched = Some(text_hash(text));
        self.current = navigate(&self.matches, selection.0, selection.1, direction);
        debug!(query = %self.query, indicator = %self.indicator(), "find");
        self.current_match()
    }

    /// Replace the selected match, then select the next match after it
    ///
    /// Does nothing when no match is selected or the document changed
    /// since the last `find`.
    pub fn replace_one(&mut self, doc: &mut Document) -> Option<Match> {
        let pattern = self.pattern()?;
        if self.is_stale(doc.text()) {
            self.invalidate();
            return None;
        }
        let target = self.current_match()?;

        let replacement = self.replacement_for(&pattern, doc.text(), target);
        doc.replace_range(target.range(), &replacement).ok()?;

        let resume = target.start + replacement.len();
        self.find(doc.text(), (target.start, resume), SearchDirection::Forward)
    }

    /// Replace every match in the document; returns the number replaced
    pub fn replace_all(&mut self, doc: &mut Document) -> usize {
        self.invalidate();
        let Some(pattern) = self.pattern() else {
            return 0;
        };

        let regex = pattern.regex();
        let count = regex.find_iter(doc.text()).count();
        if count > 0 {
            let replaced = if pattern.expands_replacement() {
                regex.replace_all(doc.text(), self.replacement.as_str())
            } else {
                regex.replace_all(doc.text(), NoExpand(&self.replacement))
            }
            .into_owned();
            doc.set_text(replaced);
        }
        debug!(query = %self.query, count, "replace all");
        count
    }

    /// Replacement text for one match, with capture groups expanded in regex mode
    fn replacement_for(&self, pattern: &SearchPattern, text: &str, target: Match) -> String {
        if pattern.expands_replacement() {
            if let Some(caps) = pattern.regex().captures_at(text, target.start) {
                if caps.get(0).map(|m| m.range()) == Some(target.range()) {
                    let mut expanded = String::new();
                    caps.expand(&self.replacement, &mut expanded);
                    return expanded;
                }
            }
        }
        self.replacement.clone()
    }
}

fn text_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(query: &str, options: SearchOptions) -> FindSession {
        let mut session = FindSession::new(options);
        session.set_query(query);
        session
    }

    #[test]
    fn test_find_selects_relative_to_cursor() {
        let mut s = session("x", SearchOptions::literal());
        let text = "x..x.x";
        assert_eq!(s.find(text, (2, 2), SearchDirection::Forward), Some(Match::new(3, 4)));
        assert_eq!(s.indicator(), "2/3");
        assert_eq!(s.find(text, (2, 2), SearchDirection::Backward), Some(Match::new(0, 1)));
        assert_eq!(s.indicator(), "1/3");
    }

    #[test]
    fn test_find_steps_through_matches() {
        let mut s = session("x", SearchOptions::literal());
        let text = "x..x.x";
        let mut selection = (0, 0);
        let mut seen = Vec::new();
        for _ in 0..4 {
            let m = s.find(text, selection, SearchDirection::Forward).unwrap();
            selection = (m.start, m.end);
            seen.push(m.start);
        }
        assert_eq!(seen, vec![0, 3, 5, 0]);
    }

    #[test]
    fn test_invalid_query_is_neutral() {
        let mut s = session("(", SearchOptions::regex());
        assert_eq!(s.find("(((", (0, 0), SearchDirection::Forward), None);
        assert!(s.matches().is_empty());
        assert_eq!(s.indicator(), "0/0");

        let mut doc = Document::with_text("t", "(((");
        assert_eq!(s.replace_one(&mut doc), None);
        assert_eq!(s.replace_all(&mut doc), 0);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_no_matches_reports_zero() {
        let mut s = session("zzz", SearchOptions::literal());
        assert_eq!(s.find("abc", (0, 0), SearchDirection::Forward), None);
        assert_eq!(s.indicator(), "0/0");
    }

    #[test]
    fn test_option_change_invalidates() {
        let mut s = session("a", SearchOptions::literal());
        s.find("aA", (0, 0), SearchDirection::Forward);
        assert_eq!(s.matches().len(), 2);
        s.set_options(SearchOptions::literal().with_case_sensitive(true));
        assert!(s.matches().is_empty());
        assert_eq!(s.current_index(), None);
    }

    #[test]
    fn test_replace_one_moves_to_next_match() {
        let mut doc = Document::with_text("t", "cat cat cat");
        let mut s = session("cat", SearchOptions::literal());
        s.set_replacement("dog");

        s.find(doc.text(), (0, 0), SearchDirection::Forward);
        let next = s.replace_one(&mut doc);
        assert_eq!(doc.text(), "dog cat cat");
        assert!(doc.is_dirty());
        assert_eq!(next, Some(Match::new(4, 7)));
        assert_eq!(s.indicator(), "1/2");
    }

    #[test]
    fn test_replace_one_wraps_after_last() {
        let mut doc = Document::with_text("t", "cat x cat");
        let mut s = session("cat", SearchOptions::literal());
        s.set_replacement("cow");

        s.find(doc.text(), (5, 5), SearchDirection::Forward);
        assert_eq!(s.current_match(), Some(Match::new(6, 9)));
        let next = s.replace_one(&mut doc);
        assert_eq!(doc.text(), "cat x cow");
        assert_eq!(next, Some(Match::new(0, 3)));
    }

    #[test]
    fn test_replace_one_refuses_stale_matches() {
        let mut doc = Document::with_text("t", "cat");
        let mut s = session("cat", SearchOptions::literal());
        s.set_replacement("dog");
        s.find(doc.text(), (0, 0), SearchDirection::Forward);

        doc.set_text("a cat");
        assert_eq!(s.replace_one(&mut doc), None);
        assert_eq!(doc.text(), "a cat");
    }

    #[test]
    fn test_replace_one_expands_groups_in_regex_mode() {
        let mut doc = Document::with_text("t", "x = 1; y = 2");
        let mut s = session(r"(\w) = (\d)", SearchOptions::regex());
        s.set_replacement("$2 = $1");
        s.find(doc.text(), (0, 0), SearchDirection::Forward);
        s.replace_one(&mut doc);
        assert_eq!(doc.text(), "1 = x; y = 2");
    }

    #[test]
    fn test_replace_all() {
        let mut doc = Document::with_text("t", "cat cat");
        let mut s = session("cat", SearchOptions::literal());
        s.set_replacement("dog");
        s.find(doc.text(), (0, 0), SearchDirection::Forward);

        assert_eq!(s.replace_all(&mut doc), 2);
        assert_eq!(doc.text(), "dog dog");
        assert!(s.matches().is_empty());
        assert_eq!(s.current_index(), None);
        assert_eq!(s.indicator(), "0/0");
    }

    #[test]
    fn test_replace_all_literal_does_not_expand() {
        let mut doc = Document::with_text("t", "price");
        let mut s = session("price", SearchOptions::literal());
        s.set_replacement("$1.00");
        s.replace_all(&mut doc);
        assert_eq!(doc.text(), "$1.00");
    }

    #[test]
    fn test_replace_all_regex_expands() {
        let mut doc = Document::with_text("t", "def f(a, b)");
        let mut s = session(r"(\w+), (\w+)", SearchOptions::regex());
        s.set_replacement("$2, $1");
        assert_eq!(s.replace_all(&mut doc), 1);
        assert_eq!(doc.text(), "def f(b, a)");
    }

    #[test]
    fn test_replace_all_ignores_match_limit() {
        let mut doc = Document::with_text("t", "x".repeat(6000));
        let mut s = session("x", SearchOptions::literal());
        s.set_replacement("y");
        assert_eq!(s.replace_all(&mut doc), 6000);
        assert!(!doc.text().contains('x'));
    }

    #[test]
    fn test_whole_word_replace() {
        let mut doc = Document::with_text("t", "cat catalog cat");
        let mut s = session("cat", SearchOptions::literal().with_whole_word(true));
        s.set_replacement("dog");
        assert_eq!(s.replace_all(&mut doc), 2);
        assert_eq!(doc.text(), "dog catalog dog");
    }
}
