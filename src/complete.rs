//! Keyword and builtin completion

use crate::syntax::cimple::{is_name_char, BUILTINS, KEYWORDS};

/// Most candidates offered at once
pub const MAX_CANDIDATES: usize = 10;

/// Completion candidates for the word ending at `cursor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completions {
    /// Byte offset where the word being completed starts
    pub start: usize,
    /// The partial word before the cursor
    pub prefix: String,
    /// Matching keywords then builtins, in definition order
    pub candidates: Vec<&'static str>,
}

/// Find completions for the word before `cursor` (a byte offset)
///
/// Words that are already complete are not offered again.
pub fn completions(text: &str, cursor: usize) -> Completions {
    let mut cursor = cursor.min(text.len());
    while cursor > 0 && !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    let start = text[..cursor]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_name_char(c))
        .last()
        .map_or(cursor, |(i, _)| i);
    let prefix = &text[start..cursor];

    let candidates = KEYWORDS
        .iter()
        .chain(BUILTINS)
        .copied()
        .filter(|word| word.starts_with(prefix) && *word != prefix)
        .take(MAX_CANDIDATES)
        .collect();

    Completions {
        start,
        prefix: prefix.to_string(),
        candidates,
    }
}

/// Insert `word` in place of the prefix, returning the new text and cursor
pub fn apply_completion(text: &str, completions: &Completions, word: &str) -> (String, usize) {
    let end = completions.start + completions.prefix.len();
    let mut out = String::with_capacity(text.len() + word.len());
    out.push_str(&text[..completions.start]);
    out.push_str(word);
    out.push_str(&text[end..]);
    (out, completions.start + word.len())
}
