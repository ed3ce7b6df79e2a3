//! Rendering of highlighted tokens
//!
//! Two consumers of the scanner output: escaped markup for a styled layer
//! drawn over the plain-text edit surface, and ANSI-styled terminal text.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{self, Attribute, Print, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthChar;

use crate::syntax::{self, Color, Style, Token};

/// Escape text for safe embedding in markup
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for one tokenized line
///
/// Styled tokens become `<span class="hl-KIND">…</span>`; identifiers and
/// plain characters are emitted bare.
pub fn line_markup(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        let text = escape_markup(token.text);
        match token.kind.css_class() {
            Some(class) => {
                out.push_str("<span class=\"");
                out.push_str(class);
                out.push_str("\">");
                out.push_str(&text);
                out.push_str("</span>");
            }
            None => out.push_str(&text),
        }
    }
    out
}

/// Highlight a whole document as markup, one output line per source line
pub fn render_markup(document: &str) -> String {
    syntax::highlight(document)
        .iter()
        .map(|tokens| line_markup(tokens))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Terminal rendering options
#[derive(Debug, Clone, Copy)]
pub struct AnsiOptions {
    /// Emit color and attribute escapes
    pub color: bool,
    /// Columns per tab stop
    pub tab_width: usize,
}

impl Default for AnsiOptions {
    fn default() -> Self {
        Self {
            color: true,
            tab_width: 4,
        }
    }
}

/// Write tokenized lines to a terminal, one line per row
pub fn render_ansi<W: Write>(
    out: &mut W,
    lines: &[Vec<Token<'_>>],
    options: AnsiOptions,
) -> io::Result<()> {
    for tokens in lines {
        let mut col = 0;
        for token in tokens {
            let text = expand_tabs(token.text, &mut col, options.tab_width);
            let style = token.style();
            if options.color && !style.is_default() {
                queue_style(out, style)?;
                queue!(out, Print(text), SetAttribute(Attribute::Reset))?;
            } else {
                queue!(out, Print(text))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

fn queue_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    if let Some(color) = terminal_color(style.fg) {
        queue!(out, SetForegroundColor(color))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

/// Replace tabs with spaces up to the next tab stop, tracking the display column
fn expand_tabs(text: &str, col: &mut usize, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\t' {
            let spaces = tab_width - (*col % tab_width);
            out.extend(std::iter::repeat(' ').take(spaces));
            *col += spaces;
        } else {
            out.push(c);
            *col += c.width().unwrap_or(0);
        }
    }
    out
}

/// Map a palette color onto crossterm
fn terminal_color(color: Color) -> Option<style::Color> {
    let mapped = match color {
        Color::Default => return None,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup(r#"a<b>&"c"'d'"#), "a&lt;b&gt;&amp;&quot;c&quot;&#39;d&#39;");
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_render_markup() {
        let html = render_markup("def f(x):\n  return x < 1 # <done>");
        let lines: Vec<_> = html.split('\n').collect();
        assert_eq!(
            lines[0],
            "<span class=\"hl-keyword\">def</span> <span class=\"hl-function\">f</span>\
             <span class=\"hl-symbol\">(</span>x<span class=\"hl-symbol\">)</span>\
             <span class=\"hl-symbol\">:</span>"
        );
        assert!(lines[1].contains("<span class=\"hl-operator\">&lt;</span>"));
        assert!(lines[1].ends_with("<span class=\"hl-comment\"># &lt;done&gt;</span>"));
    }

    #[test]
    fn test_markup_escapes_strings() {
        let html = render_markup("s = '<b>'");
        assert!(html.contains("<span class=\"hl-string\">&#39;&lt;b&gt;&#39;</span>"));
    }

    #[test]
    fn test_render_markup_keeps_line_count() {
        let doc = "a\n\n\nb";
        assert_eq!(render_markup(doc).split('\n').count(), 4);
    }

    #[test]
    fn test_render_ansi_plain() {
        let lines = syntax::highlight("if x:\n\tpass");
        let mut out = Vec::new();
        render_ansi(&mut out, &lines, AnsiOptions { color: false, tab_width: 4 }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "if x:\n    pass\n");
    }

    #[test]
    fn test_render_ansi_colored() {
        let lines = syntax::highlight("print(1)");
        let mut out = Vec::new();
        render_ansi(&mut out, &lines, AnsiOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("print"));
    }

    #[test]
    fn test_expand_tabs_tracks_columns() {
        let mut col = 0;
        assert_eq!(expand_tabs("ab\tc", &mut col, 4), "ab  c");
        assert_eq!(col, 5);
        assert_eq!(expand_tabs("\t", &mut col, 4), "   ");
        assert_eq!(col, 8);
    }
}
