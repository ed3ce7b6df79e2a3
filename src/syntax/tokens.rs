//! Token kinds for syntax highlighting
//!
//! This module defines the classes the scanner assigns to pieces of
//! a line and their default visual styles.

use super::style::{Color, Style};

/// Classification of a token produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved words (def, if, return, ...)
    Keyword,
    /// Built-in functions and types (print, len, dict, ...)
    Builtin,
    /// Quoted string literals, including triple-quoted ones
    String,
    /// `#` comment running to end of line
    Comment,
    /// Numeric literals (accepted loosely, never validated)
    Number,
    /// Single operator characters, and the `@` of a decorator
    Operator,
    /// Brackets and punctuation
    Symbol,
    /// Name following a decorator `@`
    Decorator,
    /// Name following `def`
    Function,
    /// Name following `class`
    Class,
    /// Any other name (rendered unstyled)
    Identifier,
    /// Whitespace and unrecognized characters
    Plain,
}

impl TokenKind {
    /// Get the default style for this token kind
    pub fn default_style(&self) -> Style {
        match self {
            TokenKind::Keyword => Style::fg(Color::Magenta).with_bold(),
            TokenKind::Builtin => Style::fg(Color::Cyan),
            TokenKind::String => Style::fg(Color::Green),
            TokenKind::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenKind::Number => Style::fg(Color::Yellow),
            TokenKind::Operator => Style::fg(Color::BrightWhite),
            TokenKind::Symbol => Style::default(),
            TokenKind::Decorator => Style::fg(Color::BrightBlue),
            TokenKind::Function => Style::fg(Color::Blue),
            TokenKind::Class => Style::fg(Color::BrightCyan).with_bold(),
            TokenKind::Identifier => Style::default(),
            TokenKind::Plain => Style::default(),
        }
    }

    /// Markup class used as the style hook, `None` for unstyled text
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword => Some("hl-keyword"),
            TokenKind::Builtin => Some("hl-builtin"),
            TokenKind::String => Some("hl-string"),
            TokenKind::Comment => Some("hl-comment"),
            TokenKind::Number => Some("hl-number"),
            TokenKind::Operator => Some("hl-operator"),
            TokenKind::Symbol => Some("hl-symbol"),
            TokenKind::Decorator => Some("hl-decorator"),
            TokenKind::Function => Some("hl-function"),
            TokenKind::Class => Some("hl-class"),
            TokenKind::Identifier | TokenKind::Plain => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        assert!(!TokenKind::Comment.default_style().is_default());
        assert!(!TokenKind::String.default_style().is_default());
        assert!(!TokenKind::Keyword.default_style().is_default());
        // Identifiers and plain text stay unstyled
        assert!(TokenKind::Identifier.default_style().is_default());
        assert!(TokenKind::Plain.default_style().is_default());
    }

    #[test]
    fn test_unstyled_kinds_have_no_class() {
        assert_eq!(TokenKind::Identifier.css_class(), None);
        assert_eq!(TokenKind::Plain.css_class(), None);
        assert_eq!(TokenKind::Function.css_class(), Some("hl-function"));
    }
}
