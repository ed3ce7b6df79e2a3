//! Search pattern compilation
//!
//! Turns the text typed into the find box, plus the three toggles, into a
//! compiled regex. Patterns that could match the empty string are refused
//! outright: a zero-width pattern would report a match at every position
//! of the document.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::PatternError;

/// Find options, as toggled in the find widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// Match case exactly
    pub case_sensitive: bool,
    /// Treat the pattern as a regular expression instead of literal text
    pub use_regex: bool,
    /// Only match whole words
    pub whole_word: bool,
}

impl SearchOptions {
    pub fn literal() -> Self {
        Self::default()
    }

    pub fn regex() -> Self {
        Self {
            use_regex: true,
            ..Self::default()
        }
    }

    pub fn with_case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    pub fn with_whole_word(mut self, on: bool) -> Self {
        self.whole_word = on;
        self
    }
}

/// A pattern ready for matching
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
    options: SearchOptions,
}

impl SearchPattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Whether replacement text should have `$1`-style groups expanded
    pub fn expands_replacement(&self) -> bool {
        self.options.use_regex
    }
}

/// Compile a find pattern, returning `None` when it cannot be searched with
pub fn compile(pattern: &str, options: SearchOptions) -> Option<SearchPattern> {
    match try_compile(pattern, options) {
        Ok(compiled) => Some(compiled),
        Err(err) => {
            debug!(pattern, ?options, %err, "search pattern rejected");
            None
        }
    }
}

/// Compile a find pattern, reporting why it was rejected
pub fn try_compile(pattern: &str, options: SearchOptions) -> Result<SearchPattern, PatternError> {
    if pattern.is_empty() && options.use_regex {
        return Err(PatternError::EmptyPattern);
    }

    let mut effective = if options.use_regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };
    if options.whole_word {
        effective = format!(r"\b(?:{})\b", effective);
    }

    let regex = RegexBuilder::new(&effective)
        .case_insensitive(!options.case_sensitive)
        .build()?;

    if can_match_empty(&effective) {
        return Err(PatternError::MatchesEmpty);
    }

    Ok(SearchPattern { regex, options })
}

/// Whether some input position admits a zero-length match
fn can_match_empty(pattern: &str) -> bool {
    match regex_syntax::parse(pattern) {
        Ok(hir) => hir.properties().minimum_len() == Some(0),
        // Parses with `regex` but not here; refuse rather than guess
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_escapes_metacharacters() {
        let pattern = compile("a.b(c)", SearchOptions::literal()).unwrap();
        assert!(pattern.regex().is_match("xa.b(c)y"));
        assert!(!pattern.regex().is_match("axb(c)"));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        assert!(matches!(
            try_compile("", SearchOptions::regex()),
            Err(PatternError::EmptyPattern)
        ));
        assert!(matches!(
            try_compile("", SearchOptions::literal()),
            Err(PatternError::MatchesEmpty)
        ));
        assert!(compile("", SearchOptions::literal().with_whole_word(true)).is_none());
    }

    #[test]
    fn test_empty_matching_regexes_rejected() {
        for pattern in ["a*", "x?", "^", "$", r"\b", "(?:)", "a|", r"\b\w*\b"] {
            assert!(
                compile(pattern, SearchOptions::regex()).is_none(),
                "{} should be rejected",
                pattern
            );
        }
        assert!(compile("a+", SearchOptions::regex()).is_some());
        assert!(compile(r"^\s*def\b", SearchOptions::regex()).is_some());
    }

    #[test]
    fn test_bounded_repetition_compiles() {
        for pattern in [r"\w{30}", r"\w{50}", r"\w{100}"] {
            assert!(
                compile(pattern, SearchOptions::regex()).is_some(),
                "{} should compile",
                pattern
            );
        }
    }

    #[test]
    fn test_invalid_regex_rejected() {
        assert!(matches!(
            try_compile("(unclosed", SearchOptions::regex()),
            Err(PatternError::Syntax(_))
        ));
        assert!(compile("[z-a]", SearchOptions::regex()).is_none());
        // The same text is fine as a literal
        assert!(compile("(unclosed", SearchOptions::literal()).is_some());
    }

    #[test]
    fn test_case_sensitivity() {
        let insensitive = compile("a", SearchOptions::literal()).unwrap();
        assert!(insensitive.regex().is_match("A"));
        let sensitive = compile("a", SearchOptions::literal().with_case_sensitive(true)).unwrap();
        assert!(!sensitive.regex().is_match("A"));
    }

    #[test]
    fn test_whole_word() {
        let pattern = compile("cat", SearchOptions::literal().with_whole_word(true)).unwrap();
        assert!(!pattern.regex().is_match("catalog"));
        assert_eq!(pattern.regex().find("the cat sat").map(|m| m.start()), Some(4));

        // Alternation is bounded as a whole
        let alt = compile("a|b", SearchOptions::regex().with_whole_word(true)).unwrap();
        assert!(!alt.regex().is_match("ab"));
        assert!(alt.regex().is_match("x b y"));
    }
}
