//! Cimple language definition
//!
//! Cimple is a small Python-like language; its reserved words and
//! built-in names drive keyword classification and completion.

use std::path::Path;

/// Reserved words
pub const KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "in", "return", "yield",
    "break", "continue", "pass", "raise", "try", "except", "finally", "with", "as",
    "import", "from", "and", "or", "not", "True", "False", "None", "lambda", "assert",
    "global", "nonlocal", "del", "match", "case", "async", "await",
];

/// Built-in functions and types
pub const BUILTINS: &[&str] = &[
    "print", "len", "range", "str", "int", "float", "bool", "list", "dict", "set",
    "tuple", "input", "open", "type", "isinstance", "enumerate", "zip", "map",
    "filter", "sum", "min", "max", "abs", "round", "sorted", "reversed", "iter", "next",
    "super", "property", "staticmethod", "classmethod", "getattr", "setattr", "hasattr",
    "any", "all", "dir", "vars", "id", "hash",
];

/// File extensions treated as Cimple source
pub const EXTENSIONS: &[&str] = &["cimple", "cim"];

/// Whether `path` has a Cimple source extension (case-insensitive)
pub fn is_cimple_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_builtin(word: &str) -> bool {
    BUILTINS.contains(&word)
}

/// Characters that may start a name
pub fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Characters that may continue a name
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_operator(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '@'
    )
}

pub fn is_symbol(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ':' | ',' | '.' | ';')
}

/// Characters after which a numeric literal may begin
pub fn opens_number(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | '[' | '{' | ',' | '=' | ':')
}

/// Characters of the greedy numeric run (digits, dots, hex letters, `x`, `_`)
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_hexdigit() || matches!(c, '.' | 'x' | 'X' | '_')
}

/// Characters of a fractional/exponent suffix
pub fn is_fraction_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'e' | 'E' | '+' | '-')
}
