//! Find and replace
//!
//! Pattern compilation, match collection with a hard cap, cursor-relative
//! navigation and the session state behind the find widget.

mod matches;
mod pattern;
mod session;

pub use matches::{find_all, indicator, navigate, Match, SearchDirection, MATCH_LIMIT};
pub use pattern::{compile, try_compile, SearchOptions, SearchPattern};
pub use session::FindSession;
