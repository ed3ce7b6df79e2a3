//! File overview (minimap)
//!
//! One bar per line, its length proportional to the line's display width.
//! Only the first lines of a file are shown, capped for very large files.

use unicode_width::UnicodeWidthStr;

use crate::config::OVERVIEW_LINE_CAP;

/// One overview bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewLine {
    /// 1-based source line number
    pub line: usize,
    /// Bar length relative to `max_width`, 0..=100
    pub width_percent: u8,
}

/// Build the overview bars for a document
pub fn overview(text: &str, max_lines: usize, max_width: usize) -> Vec<OverviewLine> {
    let max_lines = max_lines.min(OVERVIEW_LINE_CAP);
    let max_width = max_width.max(1);
    text.split('\n')
        .take(max_lines)
        .enumerate()
        .map(|(i, line)| OverviewLine {
            line: i + 1,
            width_percent: (line.width() * 100 / max_width).min(100) as u8,
        })
        .collect()
}

/// Byte offset of the start of 1-based `line`, for jumping from a clicked bar
///
/// Lines past the end map to the start of the last line.
pub fn overview_offset(text: &str, line: usize) -> usize {
    let mut offset = 0;
    for _ in 1..line {
        match text[offset..].find('\n') {
            Some(i) => offset += i + 1,
            None => break,
        }
    }
    offset
}

/// Render bars as text, one `#` per two percent
pub fn overview_text(bars: &[OverviewLine]) -> String {
    bars.iter()
        .map(|bar| format!("{:>5} {}\n", bar.line, "#".repeat(bar.width_percent as usize / 2)))
        .collect()
}
