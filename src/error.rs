//! Error types for cimple-edit

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    #[error("No active document")]
    NoActiveDocument,

    #[error("{0}")]
    Message(String),
}

/// Reasons a search pattern is refused by the match engine
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("empty pattern")]
    EmptyPattern,

    #[error(transparent)]
    Syntax(#[from] regex::Error),

    #[error("pattern can match the empty string")]
    MatchesEmpty,
}

impl From<PatternError> for EditorError {
    fn from(err: PatternError) -> Self {
        EditorError::InvalidPattern(err.to_string())
    }
}
