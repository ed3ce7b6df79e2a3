//! Configuration file support
//!
//! Loads settings from ~/.cimple.toml (or %USERPROFILE%\.cimple.toml on Windows)
//!
//! Unknown keys are ignored and numbers are clamped to their valid range.
//!
//! Example:
//! ```toml
//! [find]
//! case-sensitive = false
//! regex = false
//! whole-word = false
//!
//! [editor]
//! highlight = true
//! tab-width = 4
//! color = true
//!
//! [overview]
//! max-lines = 1000
//! max-width = 100
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::error::{EditorError, Result};
use crate::search::SearchOptions;

/// Hard ceiling for overview lines
pub const OVERVIEW_LINE_CAP: usize = 1000;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial state of the find widget toggles
    pub find: SearchOptions,
    /// Whether syntax highlighting is enabled
    pub highlight: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Whether terminal output uses ANSI colors
    pub color: bool,
    /// Lines shown in the overview
    pub overview_max_lines: usize,
    /// Line width (in columns) drawn as a full-width overview bar
    pub overview_max_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            find: SearchOptions::default(),
            highlight: true,
            tab_width: 4,
            color: true,
            overview_max_lines: OVERVIEW_LINE_CAP,
            overview_max_width: 100,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".cimple.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".cimple.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let table = Self::parse(&contents).map_err(|source| EditorError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Config::default();
        config.apply(&table);
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config file contents into a TOML table
    fn parse(contents: &str) -> std::result::Result<Table, toml::de::Error> {
        contents.parse::<Table>()
    }

    /// Apply settings from a parsed config table
    fn apply(&mut self, table: &Table) {
        if let Some(find) = section(table, "find") {
            if let Some(on) = find.get("case-sensitive").and_then(bool_value) {
                self.find.case_sensitive = on;
            }
            if let Some(on) = find.get("regex").and_then(bool_value) {
                self.find.use_regex = on;
            }
            if let Some(on) = find.get("whole-word").and_then(bool_value) {
                self.find.whole_word = on;
            }
        }

        if let Some(editor) = section(table, "editor") {
            if let Some(on) = editor.get("highlight").and_then(bool_value) {
                self.highlight = on;
            }
            if let Some(on) = editor.get("color").and_then(bool_value) {
                self.color = on;
            }
            if let Some(n) = editor.get("tab-width").and_then(Value::as_integer) {
                self.tab_width = clamp(n, 1, 16);
            }
        }

        if let Some(overview) = section(table, "overview") {
            if let Some(n) = overview.get("max-lines").and_then(Value::as_integer) {
                self.overview_max_lines = clamp(n, 1, OVERVIEW_LINE_CAP);
            }
            if let Some(n) = overview.get("max-width").and_then(Value::as_integer) {
                self.overview_max_width = clamp(n, 10, 400);
            }
        }
    }

    /// Serialize the current settings as TOML
    pub fn to_toml(&self) -> String {
        let mut find = Table::new();
        find.insert("case-sensitive".into(), Value::Boolean(self.find.case_sensitive));
        find.insert("regex".into(), Value::Boolean(self.find.use_regex));
        find.insert("whole-word".into(), Value::Boolean(self.find.whole_word));

        let mut editor = Table::new();
        editor.insert("highlight".into(), Value::Boolean(self.highlight));
        editor.insert("tab-width".into(), Value::Integer(self.tab_width as i64));
        editor.insert("color".into(), Value::Boolean(self.color));

        let mut overview = Table::new();
        overview.insert("max-lines".into(), Value::Integer(self.overview_max_lines as i64));
        overview.insert("max-width".into(), Value::Integer(self.overview_max_width as i64));

        let mut root = Table::new();
        root.insert("find".into(), Value::Table(find));
        root.insert("editor".into(), Value::Table(editor));
        root.insert("overview".into(), Value::Table(overview));

        format!("# cimple configuration\n\n{}", root)
    }

    /// Save current configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            fs::write(path, self.to_toml())?;
        }
        Ok(())
    }
}

fn section<'a>(table: &'a Table, name: &str) -> Option<&'a Table> {
    table.get(name).and_then(Value::as_table)
}

/// Booleans may also be written as strings ("yes", "on", "1", ...)
fn bool_value(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => Some(parse_bool(s)),
        Value::Integer(n) => Some(*n != 0),
        _ => None,
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

fn clamp(n: i64, min: usize, max: usize) -> usize {
    n.clamp(min as i64, max as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let contents = r#"
# Comment
[find]
case-sensitive = true
whole-word = "yes"

[editor]
tab-width = 2
color = false

[overview]
max-lines = 50
        "#;

        let table = Config::parse(contents).unwrap();
        let mut config = Config::default();
        config.apply(&table);

        assert!(config.find.case_sensitive);
        assert!(!config.find.use_regex);
        assert!(config.find.whole_word);
        assert_eq!(config.tab_width, 2);
        assert!(!config.color);
        assert!(config.highlight);
        assert_eq!(config.overview_max_lines, 50);
        assert_eq!(config.overview_max_width, 100);
    }

    #[test]
    fn test_values_are_clamped() {
        let table = Config::parse("[editor]\ntab-width = 99\n[overview]\nmax-lines = 50000\nmax-width = 0").unwrap();
        let mut config = Config::default();
        config.apply(&table);
        assert_eq!(config.tab_width, 16);
        assert_eq!(config.overview_max_lines, OVERVIEW_LINE_CAP);
        assert_eq!(config.overview_max_width, 10);
    }

    #[test]
    fn test_wrong_types_are_ignored() {
        let table = Config::parse("editor = 3\n[find]\nregex = [1]").unwrap();
        let mut config = Config::default();
        config.apply(&table);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[find\nregex = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(EditorError::Config { .. })));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            find: SearchOptions::regex().with_whole_word(true),
            tab_width: 8,
            ..Config::default()
        };
        let table = Config::parse(&config.to_toml()).unwrap();
        let mut loaded = Config::default();
        loaded.apply(&table);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("anything"));
    }
}
