//! Errors and diagnostics.
//!
//! Grounded on `tomllib::types::TOMLError` and `tomllib::types::ParseError`:
//! both are plain structs/enums with a hand-written `Display` and
//! `std::error::Error` impl, and `TOMLError::new` logs the message with
//! `warn!` at construction time. This module keeps that idiom — every
//! `Error` constructor below logs — but collapses `tomllib`'s large
//! per-situation `ParseError` enum (`MixedArray`, `DuplicateKey`,
//! `InvalidTable`, ...) down to the flat kind taxonomy spec.md §7 asks for,
//! since this decoder does not need per-caller programmatic recovery on a
//! per-situation basis, only a kind + position + message.

use std::fmt;

use log::warn;

/// A 1-based line/column position in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Position {
    pub(crate) fn start() -> Position {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The flat error taxonomy from spec.md §7. Every variant carries the
/// [`Position`] at which the failure was detected and a human-readable
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is not valid UTF-8.
    Encoding(Position, String),
    /// Unterminated string, invalid escape, illegal control character,
    /// malformed number/date/time literal, forbidden triple-quote run.
    Lexical(Position, String),
    /// Unexpected token, missing `=`, missing `]`/`]]`, missing newline
    /// after a header, trailing comma in an inline table, newline inside
    /// an inline table.
    Syntactic(Position, String),
    /// Duplicate key, attempt to redefine a table, attempt to extend an
    /// inline table/array, attempt to extend an explicit table via a
    /// dotted key, attempt to append to a name that is not an
    /// array-of-tables.
    Semantic(Position, String),
    /// Integer overflow, float parse failure.
    Numeric(Position, String),
    /// Reserved for an allocator that refused a request (spec.md §7).
    /// Never constructed by this crate: Rust's global allocator aborts the
    /// process on exhaustion rather than returning a recoverable error.
    /// See DESIGN.md Open Question 3.
    Allocation(Position, String),
}

impl Error {
    pub(crate) fn encoding(pos: Position, message: impl Into<String>) -> Error {
        let message = message.into();
        warn!("encoding error at {pos}: {message}");
        Error::Encoding(pos, message)
    }

    pub(crate) fn lexical(pos: Position, message: impl Into<String>) -> Error {
        let message = message.into();
        warn!("lexical error at {pos}: {message}");
        Error::Lexical(pos, message)
    }

    pub(crate) fn syntactic(pos: Position, message: impl Into<String>) -> Error {
        let message = message.into();
        warn!("syntax error at {pos}: {message}");
        Error::Syntactic(pos, message)
    }

    pub(crate) fn semantic(pos: Position, message: impl Into<String>) -> Error {
        let message = message.into();
        warn!("semantic error at {pos}: {message}");
        Error::Semantic(pos, message)
    }

    pub(crate) fn numeric(pos: Position, message: impl Into<String>) -> Error {
        let message = message.into();
        warn!("numeric error at {pos}: {message}");
        Error::Numeric(pos, message)
    }

    /// The position at which this error was detected.
    pub fn position(&self) -> Position {
        match self {
            Error::Encoding(p, _)
            | Error::Lexical(p, _)
            | Error::Syntactic(p, _)
            | Error::Semantic(p, _)
            | Error::Numeric(p, _)
            | Error::Allocation(p, _) => *p,
        }
    }

    /// The human-readable message, without position information.
    pub fn message(&self) -> &str {
        match self {
            Error::Encoding(_, m)
            | Error::Lexical(_, m)
            | Error::Syntactic(_, m)
            | Error::Semantic(_, m)
            | Error::Numeric(_, m)
            | Error::Allocation(_, m) => m,
        }
    }

    fn kind_str(&self) -> &'static str {
        match self {
            Error::Encoding(..) => "encoding",
            Error::Lexical(..) => "lexical",
            Error::Syntactic(..) => "syntactic",
            Error::Semantic(..) => "semantic",
            Error::Numeric(..) => "numeric",
            Error::Allocation(..) => "allocation",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} error at {}: {}", self.kind_str(), self.position(), self.message())
    }
}

impl std::error::Error for Error {}

/// A rendered diagnostic: the error's position, the offending input line,
/// and a caret pointing at the column, in the form spec.md §6 specifies:
///
/// ```text
/// error parsing TOML document on line L, column C
/// <snippet>
/// <spaces>^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// 1-based line number of the error.
    pub line: usize,
    /// 1-based column number of the error.
    pub column: usize,
    /// The full text of the offending line (no trailing newline).
    pub snippet: String,
    /// The error's message, without position information.
    pub message: String,
}

impl Diagnostics {
    /// Builds a [`Diagnostics`] from an [`Error`] and the original input it
    /// was produced from.
    pub fn new(error: &Error, input: &str) -> Diagnostics {
        let pos = error.position();
        let snippet = input.lines().nth(pos.line.saturating_sub(1)).unwrap_or("").to_string();
        Diagnostics { line: pos.line, column: pos.column, snippet, message: error.message().to_string() }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "error parsing TOML document on line {}, column {}", self.line, self.column)?;
        writeln!(f, "{}", self.snippet)?;
        let caret_offset = self.column.saturating_sub(1);
        writeln!(f, "{}^", " ".repeat(caret_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_render_caret_under_column() {
        let pos = Position { line: 2, column: 5 };
        let err = Error::Syntactic(pos, "missing '='".to_string());
        let input = "a = 1\nbad   value\n";
        let diag = Diagnostics::new(&err, input);
        let rendered = format!("{diag}");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "error parsing TOML document on line 2, column 5");
        assert_eq!(lines[1], "bad   value");
        assert_eq!(lines[2], "    ^");
    }

    #[test]
    fn error_display_includes_kind_and_position() {
        let err = Error::lexical(Position { line: 1, column: 1 }, "unterminated string");
        assert_eq!(format!("{err}"), "lexical error at line 1, column 1: unterminated string");
    }
}
