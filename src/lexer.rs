//! This module splits line-oriented WaveFront text (`.obj` and `.mtl`) into
//! `(directive, argument tail)` statements.

use std::io::{self, BufRead};

/// Error raised by the OBJ and MTL readers. Authoring errors are fatal: the
/// first one aborts the parse.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: `{directive}` is missing a required argument")]
    MissingArgument { line: usize, directive: String },

    #[error("line {line}: `{value}` is not a valid number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: `{directive}` expects {expected} values, found {found}")]
    Arity {
        line: usize,
        directive: String,
        expected: &'static str,
        found: usize,
    },

    #[error("line {line}: index {index} is out of range for {len} {kind}")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        len: usize,
        kind: &'static str,
    },
}

/// Parse a float argument, reporting the offending text on failure.
pub(crate) fn parse_f32(value: &str, line: usize) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

/// A single logical line: the directive keyword plus the untouched remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based number of the line the statement started on.
    pub line: usize,
    pub directive: String,
    pub tail: String,
}

impl Statement {
    /// Re-tokenize the tail on runs of whitespace.
    pub fn args(&self) -> Vec<&str> {
        self.tail.split_whitespace().collect()
    }

    pub(crate) fn missing_argument(&self) -> ParseError {
        ParseError::MissingArgument {
            line: self.line,
            directive: self.directive.clone(),
        }
    }

    pub(crate) fn arity(&self, expected: &'static str, found: usize) -> ParseError {
        ParseError::Arity {
            line: self.line,
            directive: self.directive.clone(),
            expected,
            found,
        }
    }
}

/// Iterator over the statements of a text stream.
///
/// Blank lines and `#` comments are skipped, inline comments are cut off, and
/// a trailing backslash joins a line with the next one.
pub struct Lexer<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(strip_comment(&self.buf).to_string()))
    }

    fn next_statement(&mut self) -> io::Result<Option<Statement>> {
        let mut joined = String::new();
        let mut start_line = 0;
        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                // A dangling continuation at EOF still yields what it has.
                None if !joined.is_empty() => break,
                None => return Ok(None),
            };
            if line.is_empty() {
                if joined.is_empty() {
                    continue;
                }
                break;
            }
            if joined.is_empty() {
                start_line = self.line;
            } else {
                joined.push(' ');
            }
            match line.strip_suffix('\\') {
                Some(head) => joined.push_str(head.trim_end()),
                None => {
                    joined.push_str(&line);
                    break;
                }
            }
        }

        let joined = joined.trim();
        let (directive, tail) = match joined.split_once(char::is_whitespace) {
            Some((directive, tail)) => (directive, tail.trim()),
            None => (joined, ""),
        };
        Ok(Some(Statement {
            line: start_line,
            directive: directive.to_string(),
            tail: tail.to_string(),
        }))
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = io::Result<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_statement().transpose()
    }
}

/// Trim a raw line and drop everything from the first `#` on.
fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    match line.find('#') {
        Some(ix) => line[..ix].trim_end(),
        None => line,
    }
}
