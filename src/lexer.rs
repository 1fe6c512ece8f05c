//! Pull-based tokenization of TOML text.
//!
//! The [`Lexer`] owns an abstract line source and hands out one [`Token`]
//! at a time, on demand. It buffers nothing beyond the current line and
//! any in-progress multiline string. Line boundaries are surfaced to the
//! parser as synthetic `\n` mark tokens, since at top level a line break
//! is the pair delimiter.
//!
//! ```rust
//! use tomlite::{Lexer, Token};
//!
//! let mut lexer = Lexer::from_str("count = 3");
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::Unquoted("count".into())));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::Mark('=')));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::Unquoted("3".into())));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::Mark('\n')));
//! assert_eq!(lexer.next_token().unwrap(), None);
//! ```

use crate::error::{Error, Result};
use crate::escape;
use std::fmt;
use std::io;

/// One lexical unit of a document.
///
/// `Quoted` and `Unquoted` both carry literal text; the distinction
/// matters downstream, where quoted lexemes always coerce to strings.
/// `Mark` carries one structural character from `[ ] { } , =` or the
/// synthetic `\n` emitted at each line end.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Quoted(String),
    Unquoted(String),
    Mark(char),
}

impl Token {
    /// Returns `true` if this token is the given mark.
    #[inline]
    #[must_use]
    pub fn is_mark(&self, c: char) -> bool {
        matches!(self, Token::Mark(m) if *m == c)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Quoted(text) => write!(f, "\"{text}\""),
            Token::Unquoted(text) => write!(f, "{text}"),
            Token::Mark(c) => write!(f, "'{}'", c.escape_default()),
        }
    }
}

/// A lazy tokenizer over a fallible line source.
///
/// The source yields lines without their terminators, as
/// [`BufRead::lines`](std::io::BufRead::lines) does. Tokens are produced
/// strictly forward; once [`next_token`](Lexer::next_token) returns
/// `Ok(None)` it does so permanently.
pub struct Lexer<I> {
    lines: I,
    line: Vec<char>,
    cursor: usize,
    end_of_input: bool,
}

impl<'a> Lexer<std::iter::Map<std::str::Lines<'a>, fn(&str) -> io::Result<String>>> {
    /// Convenience constructor tokenizing an in-memory string.
    #[must_use]
    pub fn from_str(input: &'a str) -> Self {
        fn ok(line: &str) -> io::Result<String> {
            Ok(line.to_owned())
        }
        let lines = input.lines().map(ok as fn(&str) -> io::Result<String>);
        // an in-memory source cannot fail to read
        match Lexer::new(lines) {
            Ok(lexer) => lexer,
            Err(_) => unreachable!("in-memory line source failed"),
        }
    }
}

impl<I> Lexer<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Creates a lexer over `lines`, pulling the first line eagerly.
    ///
    /// Fails with [`Error::Io`] if that first read fails.
    pub fn new(lines: I) -> Result<Self> {
        let mut lexer = Lexer {
            lines,
            line: Vec::new(),
            cursor: 0,
            end_of_input: false,
        };
        if !lexer.advance_line()? {
            lexer.end_of_input = true;
        }
        Ok(lexer)
    }

    /// Produces the next token, or `None` once the input is exhausted.
    ///
    /// Scans forward from the cursor: quotes open (possibly multiline)
    /// strings, structural marks are emitted as-is after flushing any
    /// pending unquoted run, `#` discards the rest of the line, and
    /// whitespace separates runs. When the line is spent the pending run
    /// is flushed, then a synthetic `\n` mark is emitted and the next
    /// line is pulled.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.end_of_input {
            return Ok(None);
        }
        let len = self.line.len();
        let mut run_start = 0;
        let mut in_run = false;
        while self.cursor < len {
            let c = self.line[self.cursor];
            match c {
                '"' | '\'' => {
                    if in_run {
                        // leave the cursor on the quote for the next call
                        return self.flush_run(run_start, self.cursor).map(Some);
                    }
                    if len - self.cursor > 2
                        && self.line[self.cursor + 1] == c
                        && self.line[self.cursor + 2] == c
                    {
                        self.cursor += 3;
                        let content = self.scan_multiline(c)?;
                        return Ok(Some(Token::Quoted(content)));
                    }
                    let start = self.cursor + 1;
                    let (close, text) = if c == '"' {
                        let close = escape::find_escaped_strong(&self.line, start, &['"'])?;
                        let raw: String = self.line[start..close].iter().collect();
                        (close, escape::unescape(&raw)?)
                    } else {
                        let close = escape::find_plain_strong(&self.line, start, &['\''])?;
                        (close, self.line[start..close].iter().collect())
                    };
                    self.cursor = close + 1;
                    return Ok(Some(Token::Quoted(text)));
                }
                '[' | ']' | '{' | '}' | ',' | '=' => {
                    if in_run {
                        return self.flush_run(run_start, self.cursor).map(Some);
                    }
                    self.cursor += 1;
                    return Ok(Some(Token::Mark(c)));
                }
                '#' => break,
                _ => {
                    if c.is_whitespace() {
                        if in_run {
                            let end = self.cursor;
                            self.cursor += 1;
                            return self.flush_run(run_start, end).map(Some);
                        }
                    } else {
                        if !in_run {
                            run_start = self.cursor;
                        }
                        in_run = true;
                    }
                    if c == '\\' {
                        match self.line.get(self.cursor + 1) {
                            Some(&next) if escape::is_escape_letter(next) => self.cursor += 1,
                            _ => return Err(Error::invalid_control_code(&self.line, self.cursor)),
                        }
                    }
                    self.cursor += 1;
                }
            }
        }
        if in_run {
            // the cursor sits at the line end or at a comment hash
            return self.flush_run(run_start, self.cursor).map(Some);
        }
        if !self.advance_line()? {
            self.end_of_input = true;
        }
        Ok(Some(Token::Mark('\n')))
    }

    /// Closes a pending unquoted run as a token. Unquoted runs are
    /// escape-processed, so `keyA` and `keyA` tokenize identically.
    fn flush_run(&self, start: usize, end: usize) -> Result<Token> {
        let raw: String = self.line[start..end].iter().collect();
        Ok(Token::Unquoted(escape::unescape(&raw)?))
    }

    /// Accumulates a triple-quoted string opened just before the cursor,
    /// pulling lines until the 3-quote terminator is found.
    ///
    /// Each continuation line is trimmed of surrounding whitespace and
    /// appended with a line break, except that a line ending in an odd
    /// run of backslashes is a continuation: its content minus the final
    /// backslash is appended with no break. An even run keeps both the
    /// backslashes and the break. One leading and one trailing line break
    /// of the accumulated content are stripped, then double-quoted
    /// content is unescaped; single-quoted content stays verbatim.
    fn scan_multiline(&mut self, quote: char) -> Result<String> {
        let pattern = [quote; 3];
        let mut content = String::new();
        loop {
            let len = self.line.len();
            if self.cursor == 0 {
                while self.cursor < len && self.line[self.cursor].is_whitespace() {
                    self.cursor += 1;
                }
            }
            let from = self.cursor;
            if let Some(close) = escape::find_escaped_unchecked(&self.line, from, &pattern) {
                content.extend(&self.line[from..close]);
                self.cursor = close + 3;
                if content.starts_with('\n') {
                    content.remove(0);
                }
                if content.ends_with('\n') {
                    content.pop();
                }
                return if quote == '"' {
                    escape::unescape(&content)
                } else {
                    Ok(content)
                };
            }
            let mut end = len;
            while end > from && self.line[end - 1].is_whitespace() {
                end -= 1;
            }
            if end == from {
                // blank continuation line
                content.push('\n');
            } else if self.line[end - 1] == '\\' {
                let mut first = end - 1;
                while first > from && self.line[first - 1] == '\\' {
                    first -= 1;
                }
                if (end - first) % 2 == 1 {
                    // lone continuation backslash: splice, no line break
                    content.extend(&self.line[from..end - 1]);
                } else {
                    content.extend(&self.line[from..end]);
                    content.push('\n');
                }
            } else {
                content.extend(&self.line[from..end]);
                content.push('\n');
            }
            if !self.advance_line()? {
                self.end_of_input = true;
                let terminator: String = pattern.iter().collect();
                return Err(Error::unterminated_string(&self.line, 0, &terminator));
            }
        }
    }

    /// Pulls the next line into the buffer. Returns `false` when the
    /// source is exhausted, `Err` when it fails to read.
    fn advance_line(&mut self) -> Result<bool> {
        match self.lines.next() {
            None => Ok(false),
            Some(Err(e)) => Err(Error::io(&e.to_string())),
            Some(Ok(line)) => {
                self.line = line.chars().collect();
                self.cursor = 0;
                Ok(true)
            }
        }
    }
}
