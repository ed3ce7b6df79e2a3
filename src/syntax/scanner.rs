//! Single-pass line scanner
//!
//! Splits one line of Cimple source into classified tokens. The scanner
//! walks the line once, left to right, trying recognizers in a fixed
//! order at each position. It never fails: anything it does not
//! recognize becomes a one-character `Plain` token, so the tokens of a
//! line always concatenate back to the line itself.
//!
//! Lines are scanned independently. A triple-quoted string left open at
//! the end of a line is not continued on the next one.

use super::cimple;
use super::style::Style;
use super::tokens::TokenKind;

/// A classified slice of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character (inclusive)
    pub start: usize,
    /// Byte offset past the last character (exclusive)
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn style(&self) -> Style {
        self.kind.default_style()
    }
}

/// What the next name should be classified as after `def` or `class`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpectName {
    Nothing,
    Function,
    Class,
}

struct Scanner<'a> {
    line: &'a str,
    pos: usize,
    expect: ExpectName,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            expect: ExpectName::Nothing,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        let line = self.line;
        &line[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn prev_char(&self) -> Option<char> {
        self.line[..self.pos].chars().next_back()
    }

    /// Byte offset of the first char at or after `from` that fails `pred`
    fn run_while(&self, from: usize, pred: impl Fn(char) -> bool) -> usize {
        self.line[from..]
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.line.len(), |(i, _)| from + i)
    }

    fn emit(&mut self, kind: TokenKind, end: usize) {
        let line = self.line;
        self.tokens.push(Token {
            kind,
            text: &line[self.pos..end],
            start: self.pos,
            end,
        });
        self.pos = end;
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() && !cimple::is_name_start(c) {
                self.expect = ExpectName::Nothing;
            }

            if self.scan_triple_string()
                || self.scan_string(c)
                || self.scan_comment(c)
                || self.scan_number(c)
                || self.scan_decorator(c)
                || self.scan_name(c)
            {
                continue;
            }

            let kind = if cimple::is_operator(c) {
                TokenKind::Operator
            } else if cimple::is_symbol(c) {
                TokenKind::Symbol
            } else {
                TokenKind::Plain
            };
            self.emit(kind, self.pos + c.len_utf8());
        }
        self.tokens
    }

    fn scan_triple_string(&mut self) -> bool {
        let rest = self.rest();
        let delim = if rest.starts_with("\"\"\"") {
            "\"\"\""
        } else if rest.starts_with("'''") {
            "'''"
        } else {
            return false;
        };

        let body = self.pos + delim.len();
        let end = self.line[body..]
            .find(delim)
            .map_or(self.line.len(), |i| body + i + delim.len());
        self.emit(TokenKind::String, end);
        true
    }

    fn scan_string(&mut self, quote: char) -> bool {
        if quote != '"' && quote != '\'' {
            return false;
        }

        let body = self.pos + 1;
        let mut end = self.line.len();
        let mut chars = self.line[body..].char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == quote {
                end = body + i + 1;
                break;
            }
        }
        self.emit(TokenKind::String, end);
        true
    }

    fn scan_comment(&mut self, c: char) -> bool {
        if c != '#' {
            return false;
        }
        self.emit(TokenKind::Comment, self.line.len());
        true
    }

    fn scan_number(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '.') {
            return false;
        }
        if !self.prev_char().map_or(true, cimple::opens_number) {
            return false;
        }

        let mut end = self.run_while(self.pos, cimple::is_number_char);
        let mut tail = self.line[end..].chars();
        if tail.next() == Some('.') && tail.next().is_some_and(|d| d.is_ascii_digit()) {
            end = self.run_while(end + 1, cimple::is_fraction_char);
        }
        self.emit(TokenKind::Number, end);
        true
    }

    fn scan_decorator(&mut self, c: char) -> bool {
        if c != '@' || !self.prev_char().map_or(true, char::is_whitespace) {
            return false;
        }

        self.emit(TokenKind::Operator, self.pos + 1);
        let end = self.run_while(self.pos, cimple::is_name_char);
        if end > self.pos {
            self.emit(TokenKind::Decorator, end);
        }
        true
    }

    fn scan_name(&mut self, c: char) -> bool {
        if !cimple::is_name_start(c) {
            return false;
        }

        let line = self.line;
        let end = self.run_while(self.pos, cimple::is_name_char);
        let word = &line[self.pos..end];
        let kind = match self.expect {
            ExpectName::Function => TokenKind::Function,
            ExpectName::Class => TokenKind::Class,
            ExpectName::Nothing if cimple::is_keyword(word) => {
                self.expect = match word {
                    "def" => ExpectName::Function,
                    "class" => ExpectName::Class,
                    _ => ExpectName::Nothing,
                };
                self.emit(TokenKind::Keyword, end);
                return true;
            }
            ExpectName::Nothing if cimple::is_builtin(word) => TokenKind::Builtin,
            ExpectName::Nothing => TokenKind::Identifier,
        };
        self.expect = ExpectName::Nothing;
        self.emit(kind, end);
        true
    }
}

/// Tokenize one line (without its trailing newline)
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    Scanner::new(line).run()
}

/// Tokenize every `\n`-separated line of a document
pub fn highlight(document: &str) -> Vec<Vec<Token<'_>>> {
    document.split('\n').map(tokenize_line).collect()
}
