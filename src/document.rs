//! Documents and the tab strip
//!
//! A document is a text buffer with an optional backing file and a dirty
//! flag. Tabs keep the open documents in order and track the active one.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EditorError, Result};

/// An open text buffer
#[derive(Debug, Clone)]
pub struct Document {
    /// Title shown on the tab (file name or `Untitled-N`)
    title: String,
    /// Associated file path (None for unsaved buffers)
    path: Option<PathBuf>,
    /// Full text content
    text: String,
    /// Whether the buffer has unsaved changes
    dirty: bool,
}

impl Document {
    /// Create a new empty document with the given title
    pub fn new_untitled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: None,
            text: String::new(),
            dirty: false,
        }
    }

    /// Create a document holding `text`, not backed by a file
    pub fn with_text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new_untitled(title)
        }
    }

    /// Load a document from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        info!(path = %path.display(), bytes = text.len(), "opened document");
        Ok(Self {
            title: title_for(path),
            path: Some(path.to_path_buf()),
            text,
            dirty: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of lines (a trailing newline starts a new, empty line)
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Replace the whole text; marks the document dirty if it changed
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    /// Replace a byte range of the text
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) -> Result<()> {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return Err(EditorError::Message(format!(
                "Invalid edit range {}..{}",
                range.start, range.end
            )));
        }
        self.text.replace_range(range, with);
        self.dirty = true;
        Ok(())
    }

    /// Write the document back to its file
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| EditorError::Message("No file name".to_string()))?;
        self.write_to(&path)
    }

    /// Write the document to `path` and make it the backing file
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        self.title = title_for(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, &self.text)?;
        self.dirty = false;
        info!(path = %path.display(), bytes = self.text.len(), "saved document");
        Ok(())
    }
}

fn title_for(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string())
}

/// 1-based (line, column) of a byte offset; columns count chars
pub fn cursor_position(text: &str, offset: usize) -> (usize, usize) {
    let offset = floor_boundary(text, offset);
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Status-bar description of a selection, `None` when nothing is selected
pub fn selection_summary(text: &str, start: usize, end: usize) -> Option<String> {
    let (start, end) = (floor_boundary(text, start), floor_boundary(text, end));
    if start >= end {
        return None;
    }
    let selected = &text[start..end];
    let lines = selected.split('\n').count();
    if lines > 1 {
        Some(format!("{} lines selected", lines))
    } else {
        Some(format!("{} selected", selected.chars().count()))
    }
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut p = offset.min(text.len());
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Ordered set of open documents with one active tab
#[derive(Debug, Default)]
pub struct Tabs {
    docs: Vec<Document>,
    active: Option<usize>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|i| self.docs.get(i))
    }

    pub fn active_mut(&mut self) -> Result<&mut Document> {
        self.active
            .and_then(|i| self.docs.get_mut(i))
            .ok_or(EditorError::NoActiveDocument)
    }

    /// Add a new empty tab and make it active; returns its index
    pub fn add(&mut self, title: Option<&str>) -> usize {
        let title = match title {
            Some(t) => t.to_string(),
            None => format!("Untitled-{}", self.docs.len() + 1),
        };
        self.push(Document::new_untitled(title))
    }

    /// Open a document, focusing an existing tab for the same file instead
    pub fn open(&mut self, doc: Document) -> usize {
        if let Some(path) = doc.path() {
            if let Some(idx) = self.docs.iter().position(|d| d.path() == Some(path)) {
                self.active = Some(idx);
                return idx;
            }
        }
        self.push(doc)
    }

    fn push(&mut self, doc: Document) -> usize {
        self.docs.push(doc);
        let idx = self.docs.len() - 1;
        self.active = Some(idx);
        idx
    }

    /// Make tab `idx` active
    pub fn switch(&mut self, idx: usize) -> bool {
        if idx < self.docs.len() {
            self.active = Some(idx);
            true
        } else {
            false
        }
    }

    /// Close tab `idx`, returning its document
    ///
    /// Closing the active tab activates the one before it.
    pub fn close(&mut self, idx: usize) -> Option<Document> {
        if idx >= self.docs.len() {
            return None;
        }
        let doc = self.docs.remove(idx);
        self.active = match self.active {
            _ if self.docs.is_empty() => None,
            Some(a) if a == idx => Some(idx.saturating_sub(1)),
            Some(a) if a > idx => Some(a - 1),
            other => other,
        };
        Some(doc)
    }
}
