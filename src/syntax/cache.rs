//! Per-line highlighting cache
//!
//! Re-highlighting runs on every keystroke, but a keystroke usually
//! changes a single line. The cache remembers the token layout of each
//! distinct line content so untouched lines are not rescanned.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tracing::trace;

use super::scanner::{tokenize_line, Token};
use super::tokens::TokenKind;

/// Distinct lines remembered before the cache is emptied
const MAX_ENTRIES: usize = 10_000;

/// Token layout of a line, without borrowing its text
type Layout = Vec<(TokenKind, usize, usize)>;

/// Highlighting cache keyed by line content hash
#[derive(Debug, Default)]
pub struct HighlightCache {
    layouts: HashMap<u64, Layout>,
    hits: usize,
    misses: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct lines cached
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// (hits, misses) since creation or the last `clear`
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Drop every cached line
    pub fn clear(&mut self) {
        self.layouts.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Tokenize one line, reusing the cached layout when the content was seen before
    pub fn tokenize_line<'a>(&mut self, line: &'a str) -> Vec<Token<'a>> {
        let key = line_hash(line);

        if let Some(layout) = self.layouts.get(&key) {
            // A layout must cover the whole line; anything else is a hash collision
            let covers = layout.last().map_or(line.is_empty(), |&(_, _, end)| end == line.len());
            if covers {
                self.hits += 1;
                return layout
                    .iter()
                    .map(|&(kind, start, end)| Token {
                        kind,
                        text: &line[start..end],
                        start,
                        end,
                    })
                    .collect();
            }
        }

        self.misses += 1;
        let tokens = tokenize_line(line);
        if self.layouts.len() >= MAX_ENTRIES {
            trace!(entries = self.layouts.len(), "highlight cache full, clearing");
            self.layouts.clear();
        }
        self.layouts
            .insert(key, tokens.iter().map(|t| (t.kind, t.start, t.end)).collect());
        tokens
    }

    /// Tokenize every line of a document through the cache
    pub fn highlight_document<'a>(&mut self, document: &'a str) -> Vec<Vec<Token<'a>>> {
        let lines: Vec<_> = document.split('\n').map(|line| self.tokenize_line(line)).collect();
        trace!(lines = lines.len(), hits = self.hits, misses = self.misses, "highlighted document");
        lines
    }
}

fn line_hash(line: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    line.hash(&mut hasher);
    hasher.finish()
}
