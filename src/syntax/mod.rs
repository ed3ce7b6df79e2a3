//! Syntax highlighting module
//!
//! This module provides the Cimple tokenizer used for:
//! - Styled rendering of the edit surface (markup or terminal)
//! - Keyword and builtin completion

mod cache;
pub mod cimple;
mod scanner;
mod style;
mod tokens;

pub use cache::HighlightCache;
pub use scanner::{highlight, tokenize_line, Token};
pub use style::{Color, Style};
pub use tokens::TokenKind;
