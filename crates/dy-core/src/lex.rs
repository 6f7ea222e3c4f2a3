//! Legacy text tokenizer for tilde-terminated Diku/Merc style files.
//!
//! A `Tokenizer` is a stateful cursor over one source file decoded as
//! Latin-1. All operations advance the cursor; none retract. End-of-input
//! is reported as a `TokenError`, never signalled by panicking or by an
//! in-band sentinel value.
//!
//! Color-code escapes (`#R`, `#x123`, `#tRRGGBB`, `##`, `#-`, `#+`) are
//! payload: the tokenizer preserves every byte between delimiters.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Tokenization failure. Carries the 1-based source line for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("unexpected end of input while reading {what} (line {line})")]
    UnexpectedEof { what: &'static str, line: usize },

    #[error("expected integer, found {found:?} (line {line})")]
    ExpectedInteger { found: String, line: usize },

    #[error("expected '#' record header, found {found:?} (line {line})")]
    ExpectedHeader { found: String, line: usize },
}

/// Read a file as Latin-1 text. Every byte maps to exactly one char, so
/// no input can fail to decode and re-encoding is byte-faithful.
pub fn read_latin1(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Stateful cursor over a decoded source file.
///
/// CRLF line endings are normalized to LF at construction, so captured
/// strings never contain a carriage return.
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        Tokenizer {
            chars: normalized.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    /// Current 1-based line number, for error reporting.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Look at the next character without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.peek_char()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Skip spaces, tabs and newlines.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Read characters (including newlines) until the next literal `~`.
    /// The tilde and at most one immediately following newline are
    /// consumed; the intervening text is returned verbatim.
    pub fn read_tilde_string(&mut self) -> Result<String, TokenError> {
        let start_line = self.line;
        let mut out = String::new();
        loop {
            match self.advance() {
                Some('~') => break,
                Some(ch) => out.push(ch),
                None => {
                    return Err(TokenError::UnexpectedEof {
                        what: "tilde-terminated string",
                        line: start_line,
                    });
                }
            }
        }
        if self.peek() == Some('\n') {
            self.advance();
        }
        Ok(out)
    }

    /// Read up to the next LF (consumed); trailing whitespace is trimmed.
    pub fn read_line(&mut self) -> Result<String, TokenError> {
        if self.at_end() {
            return Err(TokenError::UnexpectedEof {
                what: "line",
                line: self.line,
            });
        }
        let mut out = String::new();
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
            out.push(ch);
        }
        Ok(out.trim_end().to_string())
    }

    /// Skip whitespace and read one signed decimal integer.
    pub fn read_int(&mut self) -> Result<i64, TokenError> {
        self.skip_whitespace();
        let line = self.line;
        let mut text = String::new();
        if matches!(self.peek(), Some('+') | Some('-')) {
            text.push(self.advance().unwrap());
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            text.push(self.advance().unwrap());
        }
        if text.is_empty() || text == "+" || text == "-" {
            let found: String = self.chars[self.pos..]
                .iter()
                .take(12)
                .collect();
            return Err(TokenError::ExpectedInteger { found, line });
        }
        text.parse().map_err(|_| TokenError::ExpectedInteger {
            found: text,
            line,
        })
    }

    /// Read `n` whitespace-separated signed integers.
    pub fn read_ints(&mut self, n: usize) -> Result<Vec<i64>, TokenError> {
        (0..n).map(|_| self.read_int()).collect()
    }

    /// Skip whitespace and read one whitespace-delimited word. A word may
    /// be single-quoted to embed spaces (player-save convention).
    pub fn read_word(&mut self) -> Result<String, TokenError> {
        self.skip_whitespace();
        if self.at_end() {
            return Err(TokenError::UnexpectedEof {
                what: "word",
                line: self.line,
            });
        }
        let mut out = String::new();
        if self.peek() == Some('\'') {
            self.advance();
            while let Some(ch) = self.peek() {
                if ch == '\'' {
                    self.advance();
                    break;
                }
                out.push(self.advance().unwrap());
            }
            return Ok(out);
        }
        while matches!(self.peek(), Some(c) if !c.is_ascii_whitespace()) {
            out.push(self.advance().unwrap());
        }
        Ok(out)
    }

    /// Peek at the next section marker without consuming it: a line
    /// beginning with `#` followed by an uppercase word (`#MOBILES`,
    /// `#ROOMDATA`, ...). Leading blank space is skipped for the peek.
    pub fn peek_section(&self) -> Option<String> {
        let mut i = self.pos;
        while matches!(self.chars.get(i), Some(c) if c.is_ascii_whitespace()) {
            i += 1;
        }
        if self.chars.get(i) != Some(&'#') {
            return None;
        }
        i += 1;
        let mut word = String::new();
        while matches!(self.chars.get(i), Some(c) if c.is_ascii_uppercase()) {
            word.push(self.chars[i]);
            i += 1;
        }
        if word.is_empty() { None } else { Some(word) }
    }

    /// Consume a section marker previously observed via `peek_section`.
    pub fn read_section(&mut self) -> Result<String, TokenError> {
        self.skip_whitespace();
        let line = self.line;
        if self.peek() != Some('#') {
            return Err(TokenError::ExpectedHeader {
                found: self.context(),
                line,
            });
        }
        self.advance();
        let mut word = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_uppercase()) {
            word.push(self.advance().unwrap());
        }
        if word.is_empty() {
            return Err(TokenError::ExpectedHeader {
                found: self.context(),
                line,
            });
        }
        // Consume the remainder of the marker line.
        while matches!(self.peek(), Some(c) if c != '\n') {
            self.advance();
        }
        if self.peek() == Some('\n') {
            self.advance();
        }
        Ok(word)
    }

    /// Read a record header: `#` followed by an integer. Returns `None`
    /// for the `#0` section terminator.
    pub fn read_vnum_header(&mut self) -> Result<Option<i64>, TokenError> {
        self.skip_whitespace();
        let line = self.line;
        if self.peek() != Some('#') {
            return Err(TokenError::ExpectedHeader {
                found: self.context(),
                line,
            });
        }
        self.advance();
        let vnum = self.read_int()?;
        // Consume the rest of the header line.
        while matches!(self.peek(), Some(c) if c != '\n') {
            self.advance();
        }
        if self.peek() == Some('\n') {
            self.advance();
        }
        if vnum == 0 { Ok(None) } else { Ok(Some(vnum)) }
    }

    /// A short snippet of the upcoming input, for error messages.
    fn context(&self) -> String {
        self.chars[self.pos..]
            .iter()
            .take(16)
            .collect::<String>()
            .replace('\n', "\\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_string_is_verbatim_and_consumes_newline() {
        let mut tok = Tokenizer::new("a troll guard~\nnext~\n");
        assert_eq!(tok.read_tilde_string().unwrap(), "a troll guard");
        assert_eq!(tok.read_tilde_string().unwrap(), "next");
        assert!(tok.at_end());
    }

    #[test]
    fn tilde_string_preserves_newlines_and_color_codes() {
        let mut tok = Tokenizer::new("#RA red line#n\nsecond line~\n");
        assert_eq!(
            tok.read_tilde_string().unwrap(),
            "#RA red line#n\nsecond line"
        );
    }

    #[test]
    fn crlf_is_normalized() {
        let mut tok = Tokenizer::new("one\r\ntwo~\r\n3 4\r\n");
        assert_eq!(tok.read_tilde_string().unwrap(), "one\ntwo");
        assert_eq!(tok.read_ints(2).unwrap(), vec![3, 4]);
    }

    #[test]
    fn read_ints_handles_signs() {
        let mut tok = Tokenizer::new("  12 -7\n+3");
        assert_eq!(tok.read_ints(3).unwrap(), vec![12, -7, 3]);
    }

    #[test]
    fn read_int_rejects_garbage() {
        let mut tok = Tokenizer::new("abc");
        assert!(matches!(
            tok.read_int(),
            Err(TokenError::ExpectedInteger { .. })
        ));
    }

    #[test]
    fn tilde_at_eof_is_an_error() {
        let mut tok = Tokenizer::new("never terminated");
        assert!(matches!(
            tok.read_tilde_string(),
            Err(TokenError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn peek_section_does_not_consume() {
        let tok = Tokenizer::new("\n#MOBILES\n#100\n");
        assert_eq!(tok.peek_section().as_deref(), Some("MOBILES"));
        assert_eq!(tok.peek_section().as_deref(), Some("MOBILES"));
    }

    #[test]
    fn vnum_header_and_terminator() {
        let mut tok = Tokenizer::new("#100\nbody\n#0\n");
        assert_eq!(tok.read_vnum_header().unwrap(), Some(100));
        assert_eq!(tok.read_line().unwrap(), "body");
        assert_eq!(tok.read_vnum_header().unwrap(), None);
    }

    #[test]
    fn numeric_header_is_not_a_section() {
        let tok = Tokenizer::new("#100\n");
        assert_eq!(tok.peek_section(), None);
    }

    #[test]
    fn quoted_words() {
        let mut tok = Tokenizer::new("Skill 'cure light' 75\n");
        assert_eq!(tok.read_word().unwrap(), "Skill");
        assert_eq!(tok.read_word().unwrap(), "cure light");
        assert_eq!(tok.read_int().unwrap(), 75);
    }

    #[test]
    fn line_numbers_track_newlines() {
        let mut tok = Tokenizer::new("a\nb\nc~\n9");
        tok.read_tilde_string().unwrap();
        assert_eq!(tok.line(), 4);
    }
}
