//! cimple-edit - syntax highlighting and find/replace for the Cimple editor
//!
//! The editing surface hands this crate raw document text and cursor
//! offsets; it gets back classified tokens for styled rendering and match
//! lists for the find widget.

pub mod complete;
pub mod config;
pub mod document;
pub mod error;
pub mod overview;
pub mod render;
pub mod search;
pub mod syntax;

pub use error::{EditorError, PatternError, Result};
