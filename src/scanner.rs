//! Single-pass tokenizer over UTF-8 input (spec.md §4.2).
//!
//! Grounded on the cursor/line-counting idiom in
//! `tomllib::internals::util::newline` (`self.line_count.set(...)`) for the
//! position bookkeeping, and on the general lexer shape — `peek`/`peek_next`,
//! explicit `line`/`column` fields, a `Result<Token, Error>`-returning
//! `next_token`-style entry point — of
//! `examples/other_examples/d4bf8033_coldielb-gizmo__src-lexer.rs.rs`. The
//! two-context (`key_mode` / value mode) split and the save/restore cursor
//! are specific to spec.md §4.2 and §9 and have no teacher precedent: they
//! exist because the parser needs to request a differently-typed token at
//! the same input position depending on whether it is reading a key or a
//! value, and because dotted-key parsing needs speculative lookahead for the
//! `.` separator.

use crate::error::{Error, Position};
use crate::value::{Date, Time};

/// A lexical token produced by the scanner.
///
/// String-form tokens carry the lexeme *between* the enclosing quotes —
/// escape translation and line-continuation trimming are the parser's job
/// (spec.md §4.3 "String normalization"), not the scanner's.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    Dot,
    Equals,
    Comma,
    LBracket,
    RBracket,
    LDoubleBracket,
    RDoubleBracket,
    LBrace,
    RBrace,
    BasicString(&'a str),
    MLBasicString(&'a str),
    LiteralString(&'a str),
    MLLiteralString(&'a str),
    /// An unquoted bare key (key mode only): `[A-Za-z0-9_-]+`.
    Literal(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
    LocalDate(Date),
    LocalTime(Time),
    LocalDateTime(Date, Time),
    OffsetDateTime(Date, Time, i16),
    LineFeed,
    Eof,
}

/// A saved scanner position, for the speculative dotted-key lookahead
/// described in spec.md §9 ("Lookback for `.` in dotted keys").
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor {
    pos: usize,
    line: usize,
    column: usize,
}

pub(crate) struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

fn is_control_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0A..=0x1F | 0x7F)
}

fn is_bare_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Scanner<'a> {
        Scanner { input, bytes: input.as_bytes(), pos: 0, line: 1, column: 1 }
    }

    pub(crate) fn position(&self) -> Position {
        Position { line: self.line, column: self.column }
    }

    pub(crate) fn save(&self) -> Cursor {
        Cursor { pos: self.pos, line: self.line, column: self.column }
    }

    pub(crate) fn restore(&mut self, cursor: Cursor) {
        self.pos = cursor.pos;
        self.line = cursor.line;
        self.column = cursor.column;
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        self.column += 1;
        b
    }

    fn bump_newline(&mut self) {
        // CRLF is normalized to a single reported '\n' (spec.md §4.2); a
        // lone '\r' is a control byte and is rejected elsewhere.
        if self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n') {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
        self.line += 1;
        self.column = 1;
    }

    fn skip_ws(&mut self) {
        while let Some(b' ') | Some(b'\t') = self.peek() {
            self.bump();
        }
    }

    /// Consumes a `#` comment through end-of-line, without consuming the
    /// terminating newline itself.
    fn skip_comment(&mut self) -> Result<(), Error> {
        self.bump(); // '#'
        while let Some(b) = self.peek() {
            if b == b'\n' || b == b'\r' {
                break;
            }
            if is_control_byte(b) && b != b'\t' {
                return Err(Error::lexical(self.position(), "control character in comment"));
            }
            self.bump();
        }
        Ok(())
    }

    pub(crate) fn next_key_token(&mut self) -> Result<Token<'a>, Error> {
        self.scan(true)
    }

    pub(crate) fn next_value_token(&mut self) -> Result<Token<'a>, Error> {
        self.scan(false)
    }

    fn scan(&mut self, key_mode: bool) -> Result<Token<'a>, Error> {
        self.skip_ws();
        if self.at_eof() {
            return Ok(Token::Eof);
        }
        let b = self.peek().unwrap();
        match b {
            b'\n' => {
                self.bump_newline();
                Ok(Token::LineFeed)
            },
            b'\r' if self.peek_at(1) == Some(b'\n') => {
                self.bump_newline();
                Ok(Token::LineFeed)
            },
            b'#' => {
                self.skip_comment()?;
                self.scan(key_mode)
            },
            b'.' => {
                self.bump();
                Ok(Token::Dot)
            },
            b'=' => {
                self.bump();
                Ok(Token::Equals)
            },
            b',' => {
                self.bump();
                Ok(Token::Comma)
            },
            b'[' => {
                self.bump();
                if key_mode && self.peek() == Some(b'[') {
                    self.bump();
                    Ok(Token::LDoubleBracket)
                } else {
                    Ok(Token::LBracket)
                }
            },
            b']' => {
                self.bump();
                if key_mode && self.peek() == Some(b']') {
                    self.bump();
                    Ok(Token::RDoubleBracket)
                } else {
                    Ok(Token::RBracket)
                }
            },
            b'{' => {
                self.bump();
                Ok(Token::LBrace)
            },
            b'}' => {
                self.bump();
                Ok(Token::RBrace)
            },
            b'"' => self.scan_basic_string(),
            b'\'' => self.scan_literal_string(),
            _ if is_control_byte(b) => {
                Err(Error::lexical(self.position(), format!("illegal control character 0x{b:02X}")))
            },
            _ if key_mode => self.scan_bare_key(),
            _ => self.scan_value_scalar(),
        }
    }

    fn scan_bare_key(&mut self) -> Result<Token<'a>, Error> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_bare_key_byte(b) {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            let b = self.peek().unwrap();
            return Err(Error::syntactic(self.position(), format!("unexpected character '{}'", b as char)));
        }
        Ok(Token::Literal(&self.input[start..self.pos]))
    }

    /// Counts a run of consecutive quote bytes starting at the current
    /// position without consuming them.
    fn count_quote_run(&self, quote: u8) -> usize {
        let mut n = 0;
        while self.peek_at(n) == Some(quote) {
            n += 1;
        }
        n
    }

    fn scan_basic_string(&mut self) -> Result<Token<'a>, Error> {
        if self.peek_at(1) == Some(b'"') && self.peek_at(2) == Some(b'"') {
            self.scan_multiline_string(b'"', true)
        } else {
            self.scan_singleline_string(b'"', true)
        }
    }

    fn scan_literal_string(&mut self) -> Result<Token<'a>, Error> {
        if self.peek_at(1) == Some(b'\'') && self.peek_at(2) == Some(b'\'') {
            self.scan_multiline_string(b'\'', false)
        } else {
            self.scan_singleline_string(b'\'', false)
        }
    }

    fn scan_singleline_string(&mut self, quote: u8, basic: bool) -> Result<Token<'a>, Error> {
        let start_pos = self.position();
        self.bump(); // opening quote
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(Error::lexical(start_pos, "unterminated string")),
                Some(b) if b == quote => {
                    let lexeme = &self.input[start..self.pos];
                    self.bump();
                    return Ok(if basic { Token::BasicString(lexeme) } else { Token::LiteralString(lexeme) });
                },
                Some(b'\n') | Some(b'\r') => return Err(Error::lexical(start_pos, "newline in single-line string")),
                Some(b) if is_control_byte(b) => {
                    return Err(Error::lexical(self.position(), "illegal control character in string"))
                },
                Some(b'\\') if basic => {
                    self.scan_escape_sequence()?;
                },
                Some(_) => {
                    self.bump();
                },
            }
        }
    }

    fn scan_multiline_string(&mut self, quote: u8, basic: bool) -> Result<Token<'a>, Error> {
        let start_pos = self.position();
        self.pos += 3;
        self.column += 3;
        // A leading newline immediately after the opening delimiter is trimmed.
        if self.peek() == Some(b'\n') {
            self.bump_newline();
        } else if self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n') {
            self.bump_newline();
        }
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(Error::lexical(start_pos, "unterminated multiline string")),
                Some(b) if b == quote => {
                    let run = self.count_quote_run(quote);
                    if run < 3 {
                        for _ in 0..run {
                            self.bump();
                        }
                        continue;
                    }
                    if run >= 6 {
                        return Err(Error::lexical(self.position(), "too many consecutive quotes at end of string"));
                    }
                    // Up to two of the run's quotes are trailing content.
                    for _ in 0..(run - 3) {
                        self.bump();
                    }
                    let lexeme = &self.input[start..self.pos];
                    for _ in 0..3 {
                        self.bump();
                    }
                    return Ok(if basic { Token::MLBasicString(lexeme) } else { Token::MLLiteralString(lexeme) });
                },
                Some(b'\n') => self.bump_newline(),
                Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.bump_newline(),
                Some(b) if is_control_byte(b) => {
                    return Err(Error::lexical(self.position(), "illegal control character in string"))
                },
                Some(b'\\') if basic => {
                    // Line-continuation backslash: validated here for shape
                    // (so unterminated-string/control-char errors are still
                    // caught); the actual trimming happens in the parser.
                    if self.is_line_continuation() {
                        self.bump();
                        self.skip_ws();
                        self.bump_newline();
                        while matches!(self.peek(), Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
                            if self.peek() == Some(b'\n') || self.peek() == Some(b'\r') {
                                self.bump_newline();
                            } else {
                                self.bump();
                            }
                        }
                    } else {
                        self.scan_escape_sequence()?;
                    }
                },
                Some(_) => {
                    self.bump();
                },
            }
        }
    }

    fn is_line_continuation(&self) -> bool {
        let mut i = 1;
        loop {
            match self.peek_at(i) {
                Some(b' ') | Some(b'\t') => i += 1,
                Some(b'\r') => return self.peek_at(i + 1) == Some(b'\n'),
                Some(b'\n') => return true,
                _ => return false,
            }
        }
    }

    /// Validates (but does not translate) one `\...` escape sequence,
    /// leaving the cursor just past it.
    fn scan_escape_sequence(&mut self) -> Result<(), Error> {
        let pos = self.position();
        self.bump(); // backslash
        match self.peek() {
            Some(b'"') | Some(b'\\') | Some(b'b') | Some(b'f') | Some(b'n') | Some(b'r') | Some(b't') => {
                self.bump();
                Ok(())
            },
            Some(b'u') => {
                self.bump();
                self.expect_hex_digits(4, pos)
            },
            Some(b'U') => {
                self.bump();
                self.expect_hex_digits(8, pos)
            },
            _ => Err(Error::lexical(pos, "invalid escape sequence")),
        }
    }

    fn expect_hex_digits(&mut self, count: usize, pos: Position) -> Result<(), Error> {
        for _ in 0..count {
            match self.peek() {
                Some(b) if b.is_ascii_hexdigit() => {
                    self.bump();
                },
                _ => return Err(Error::lexical(pos, format!("expected {count} hex digits after unicode escape"))),
            }
        }
        Ok(())
    }

    fn scan_value_scalar(&mut self) -> Result<Token<'a>, Error> {
        let pos = self.position();
        if self.looks_like_time() {
            return self.scan_time();
        }
        if self.looks_like_date() {
            return self.scan_date_or_datetime();
        }
        if self.match_keyword("true").is_some() {
            return Ok(Token::Bool(true));
        }
        if self.match_keyword("false").is_some() {
            return Ok(Token::Bool(false));
        }
        if self.match_keyword("inf").is_some() {
            return Ok(Token::Float(f64::INFINITY));
        }
        if self.match_keyword("+inf").is_some() {
            return Ok(Token::Float(f64::INFINITY));
        }
        if self.match_keyword("-inf").is_some() {
            return Ok(Token::Float(f64::NEG_INFINITY));
        }
        if self.match_keyword("nan").is_some() {
            return Ok(Token::Float(f64::NAN));
        }
        if self.match_keyword("+nan").is_some() {
            return Ok(Token::Float(f64::NAN));
        }
        if self.match_keyword("-nan").is_some() {
            return Ok(Token::Float(-f64::NAN));
        }
        self.scan_number(pos)
    }

    fn match_keyword(&mut self, kw: &str) -> Option<()> {
        let bytes = kw.as_bytes();
        if self.pos + bytes.len() > self.bytes.len() {
            return None;
        }
        if &self.bytes[self.pos..self.pos + bytes.len()] != bytes {
            return None;
        }
        // Must not be followed by another scalar-continuing byte (so
        // `infinity` isn't misread as `inf` + garbage).
        if let Some(next) = self.bytes.get(self.pos + bytes.len()) {
            if is_scalar_continuation(*next) {
                return None;
            }
        }
        for _ in 0..bytes.len() {
            self.bump();
        }
        Some(())
    }

    fn looks_like_time(&self) -> bool {
        self.peek().is_some_and(|b| b.is_ascii_digit())
            && self.peek_at(1).is_some_and(|b| b.is_ascii_digit())
            && self.peek_at(2) == Some(b':')
    }

    fn looks_like_date(&self) -> bool {
        (0..4).all(|i| self.peek_at(i).is_some_and(|b| b.is_ascii_digit())) && self.peek_at(4) == Some(b'-')
    }

    fn scan_digits(&mut self, count: usize, pos: Position) -> Result<u32, Error> {
        let start = self.pos;
        for _ in 0..count {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    self.bump();
                },
                _ => return Err(Error::lexical(pos, format!("expected {count} digits"))),
            }
        }
        self.input[start..self.pos].parse::<u32>().map_err(|_| Error::lexical(pos, "malformed numeric field"))
    }

    fn scan_time(&mut self) -> Result<Token<'a>, Error> {
        let (_, time) = self.scan_time_fields()?;
        Ok(Token::LocalTime(time))
    }

    fn scan_time_fields(&mut self) -> Result<(Position, Time), Error> {
        let pos = self.position();
        let hour = self.scan_digits(2, pos)? as u8;
        self.expect_byte(b':', pos)?;
        let minute = self.scan_digits(2, pos)? as u8;
        self.expect_byte(b':', pos)?;
        let second = self.scan_digits(2, pos)? as u8;
        let mut nanosecond = 0u32;
        if self.peek() == Some(b'.') {
            self.bump();
            let frac_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.bump();
            }
            let frac = &self.input[frac_start..self.pos];
            if frac.is_empty() {
                return Err(Error::lexical(pos, "expected digits after '.' in time"));
            }
            nanosecond = parse_fractional_seconds(frac);
        }
        Ok((pos, Time { hour, minute, second, nanosecond }))
    }

    fn expect_byte(&mut self, b: u8, pos: Position) -> Result<(), Error> {
        if self.peek() == Some(b) {
            self.bump();
            Ok(())
        } else {
            Err(Error::lexical(pos, format!("expected '{}'", b as char)))
        }
    }

    fn scan_date_or_datetime(&mut self) -> Result<Token<'a>, Error> {
        let pos = self.position();
        let year = self.scan_digits(4, pos)? as u16;
        self.expect_byte(b'-', pos)?;
        let month = self.scan_digits(2, pos)? as u8;
        self.expect_byte(b'-', pos)?;
        let day = self.scan_digits(2, pos)? as u8;
        let date = Date { year, month, day };

        let has_time = match self.peek() {
            Some(b'T') | Some(b't') => {
                self.bump();
                true
            },
            Some(b' ') => {
                self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) && {
                    self.bump();
                    true
                }
            },
            _ => false,
        };
        if !has_time {
            return Ok(Token::LocalDate(date));
        }

        let (_, time) = self.scan_time_fields()?;
        let offset = match self.peek() {
            Some(b'Z') | Some(b'z') => {
                self.bump();
                Some(0i16)
            },
            Some(b'+') | Some(b'-') => {
                let sign = if self.peek() == Some(b'-') { -1i16 } else { 1i16 };
                self.bump();
                let oh = self.scan_digits(2, pos)? as i16;
                self.expect_byte(b':', pos)?;
                let om = self.scan_digits(2, pos)? as i16;
                Some(sign * (oh * 60 + om))
            },
            _ => None,
        };
        match offset {
            Some(m) => Ok(Token::OffsetDateTime(date, time, m)),
            None => Ok(Token::LocalDateTime(date, time)),
        }
    }

    fn scan_number(&mut self, pos: Position) -> Result<Token<'a>, Error> {
        let start = self.pos;
        let mut sign_len = 0;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.bump();
            sign_len = 1;
        }
        let looks_like_radix =
            self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x') | Some(b'o') | Some(b'b'));
        if looks_like_radix {
            if sign_len > 0 {
                return Err(Error::lexical(pos, "sign not allowed on hex, octal, or binary integers"));
            }
            return self.scan_radix_integer(pos);
        }

        // Leading zeros are forbidden (except the literal "0") in the
        // integer part of both integers and floats.
        let int_part_start = self.pos;
        self.scan_decimal_digit_run(pos)?;
        let int_part = &self.input[int_part_start..self.pos];
        if int_part.len() > 1 && int_part.starts_with('0') {
            return Err(Error::lexical(pos, "leading zero in decimal number"));
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            is_float = true;
            self.bump();
            self.scan_decimal_digit_run(pos)?;
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let save = self.save();
            self.bump();
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.bump();
            }
            if self.peek().is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                self.scan_decimal_digit_run(pos)?;
            } else {
                self.restore(save);
            }
        }

        let lexeme = &self.input[start..self.pos];
        let body = &self.input[(start + sign_len)..self.pos];
        validate_underscore_placement(body, pos, |b| b.is_ascii_digit())?;
        let cleaned: String = lexeme.chars().filter(|&c| c != '_').collect();

        if is_float {
            cleaned.parse::<f64>().map(Token::Float).map_err(|_| Error::numeric(pos, "malformed float literal"))
        } else {
            cleaned.parse::<i64>().map(Token::Integer).map_err(|_| Error::numeric(pos, "integer overflow"))
        }
    }

    fn scan_decimal_digit_run(&mut self, pos: Position) -> Result<(), Error> {
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(Error::lexical(pos, "expected digit"));
        }
        while self.peek().is_some_and(|b| b.is_ascii_digit() || b == b'_') {
            self.bump();
        }
        Ok(())
    }

    fn scan_radix_integer(&mut self, pos: Position) -> Result<Token<'a>, Error> {
        self.bump(); // '0'
        let radix_byte = self.bump();
        let radix = match radix_byte {
            b'x' => 16,
            b'o' => 8,
            b'b' => 2,
            _ => unreachable!(),
        };
        let digits_start = self.pos;
        let valid_digit: fn(u8) -> bool = match radix {
            16 => |b: u8| b.is_ascii_hexdigit(),
            8 => |b: u8| (b'0'..=b'7').contains(&b),
            _ => |b: u8| b == b'0' || b == b'1',
        };
        if !self.peek().is_some_and(valid_digit) {
            return Err(Error::lexical(pos, "expected digit after radix prefix"));
        }
        while self.peek().is_some_and(|b| valid_digit(b) || b == b'_') {
            self.bump();
        }
        let digits = &self.input[digits_start..self.pos];
        validate_underscore_placement(digits, pos, valid_digit)?;
        let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
        let value = i64::from_str_radix(&cleaned, radix).map_err(|_| Error::numeric(pos, "integer overflow"))?;
        Ok(Token::Integer(value))
    }
}

fn is_scalar_continuation(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'+' || b == b'.'
}

/// Underscores are permitted only between two digits of the radix in play,
/// never leading, trailing, or adjacent to another underscore (spec.md
/// §4.2). `is_digit` is the radix's digit predicate, so `1_e10` (decimal)
/// is rejected even though `e` is alphanumeric, while `0xA_F` (hex) is
/// accepted.
fn validate_underscore_placement(s: &str, pos: Position, is_digit: fn(u8) -> bool) -> Result<(), Error> {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let prev_ok = i > 0 && is_digit(bytes[i - 1]);
        let next_ok = i + 1 < bytes.len() && is_digit(bytes[i + 1]);
        if !prev_ok || !next_ok {
            return Err(Error::lexical(pos, "underscore must be between two digits"));
        }
    }
    Ok(())
}

fn parse_fractional_seconds(frac: &str) -> u32 {
    let mut digits = frac.to_string();
    digits.truncate(9);
    while digits.len() < 9 {
        digits.push('0');
    }
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_value(input: &str) -> Vec<Token<'_>> {
        let mut s = Scanner::new(input);
        let mut out = vec![];
        loop {
            let t = s.next_value_token().unwrap();
            let done = t == Token::Eof;
            out.push(t);
            if done {
                break;
            }
        }
        out
    }

    fn tokens_key(input: &str) -> Vec<Token<'_>> {
        let mut s = Scanner::new(input);
        let mut out = vec![];
        loop {
            let t = s.next_key_token().unwrap();
            let done = t == Token::Eof;
            out.push(t);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn scans_integer_and_float() {
        assert_eq!(tokens_value("42"), vec![Token::Integer(42), Token::Eof]);
        assert_eq!(tokens_value("-17"), vec![Token::Integer(-17), Token::Eof]);
        assert_eq!(tokens_value("3.14"), vec![Token::Float(3.14), Token::Eof]);
        assert_eq!(tokens_value("1e10"), vec![Token::Float(1e10), Token::Eof]);
    }

    #[test]
    fn rejects_leading_zero() {
        let mut s = Scanner::new("007");
        assert!(s.next_value_token().is_err());
    }

    #[test]
    fn underscore_rules() {
        assert_eq!(tokens_value("1_000"), vec![Token::Integer(1000), Token::Eof]);
        let mut s = Scanner::new("_1");
        assert!(s.scan_bare_key().is_ok()); // bare key context: underscore leading is fine
        let mut s2 = Scanner::new("1_");
        assert!(s2.next_value_token().is_err());
    }

    #[test]
    fn radix_integers() {
        assert_eq!(tokens_value("0xFF"), vec![Token::Integer(255), Token::Eof]);
        assert_eq!(tokens_value("0o17"), vec![Token::Integer(15), Token::Eof]);
        assert_eq!(tokens_value("0b101"), vec![Token::Integer(5), Token::Eof]);
    }

    #[test]
    fn signed_radix_integer_is_rejected() {
        let mut s = Scanner::new("-0x10");
        assert!(s.next_value_token().is_err());
    }

    #[test]
    fn underscore_before_exponent_is_rejected() {
        let mut s = Scanner::new("1_e10");
        assert!(s.next_value_token().is_err());
    }

    #[test]
    fn bool_and_special_floats() {
        assert_eq!(tokens_value("true"), vec![Token::Bool(true), Token::Eof]);
        assert_eq!(tokens_value("false"), vec![Token::Bool(false), Token::Eof]);
        assert_eq!(tokens_value("inf"), vec![Token::Float(f64::INFINITY), Token::Eof]);
        assert_eq!(tokens_value("-inf"), vec![Token::Float(f64::NEG_INFINITY), Token::Eof]);
        assert!(matches!(tokens_value("nan")[0], Token::Float(f) if f.is_nan()));
    }

    #[test]
    fn local_date_time_and_offset() {
        assert_eq!(tokens_value("1979-05-27"), vec![
            Token::LocalDate(Date { year: 1979, month: 5, day: 27 }),
            Token::Eof
        ]);
        assert_eq!(tokens_value("07:32:00"), vec![
            Token::LocalTime(Time { hour: 7, minute: 32, second: 0, nanosecond: 0 }),
            Token::Eof
        ]);
        match &tokens_value("1979-05-27T07:32:00-08:00")[0] {
            Token::OffsetDateTime(d, t, off) => {
                assert_eq!(*d, Date { year: 1979, month: 5, day: 27 });
                assert_eq!(*t, Time { hour: 7, minute: 32, second: 0, nanosecond: 0 });
                assert_eq!(*off, -480);
            },
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[test]
    fn bracket_merging_is_key_mode_only() {
        assert_eq!(tokens_key("[[a]]"), vec![
            Token::LDoubleBracket,
            Token::Literal("a"),
            Token::RDoubleBracket,
            Token::Eof
        ]);
        assert_eq!(tokens_value("[1, 2]"), vec![
            Token::LBracket,
            Token::Integer(1),
            Token::Comma,
            Token::Integer(2),
            Token::RBracket,
            Token::Eof
        ]);
    }

    #[test]
    fn basic_string_lexeme_excludes_quotes() {
        assert_eq!(tokens_value("\"hello\""), vec![Token::BasicString("hello"), Token::Eof]);
        assert_eq!(tokens_value("'hello'"), vec![Token::LiteralString("hello"), Token::Eof]);
    }

    #[test]
    fn multiline_string_trims_leading_newline_and_allows_embedded_quotes() {
        assert_eq!(tokens_value("\"\"\"\nhi \"\" there\"\"\""), vec![
            Token::MLBasicString("hi \"\" there"),
            Token::Eof
        ]);
    }

    #[test]
    fn six_quotes_at_end_is_rejected() {
        let mut s = Scanner::new("\"\"\"abc\"\"\"\"\"\"");
        assert!(s.next_value_token().is_err());
    }

    #[test]
    fn save_and_restore_round_trip() {
        let mut s = Scanner::new("a.b");
        let before = s.save();
        let _ = s.next_key_token().unwrap();
        s.restore(before);
        assert_eq!(s.next_key_token().unwrap(), Token::Literal("a"));
    }

    #[test]
    fn crlf_counts_as_one_line_feed() {
        let mut s = Scanner::new("a\r\nb");
        assert_eq!(s.next_key_token().unwrap(), Token::Literal("a"));
        assert_eq!(s.next_key_token().unwrap(), Token::LineFeed);
        assert_eq!(s.position().line, 2);
    }
}
