//! The TOML value tree produced by a successful decode.
//!
//! `Value` is the tagged union described by the TOML 1.0.0 data model:
//! strings, integers, floats, booleans, the four date/time shapes, arrays,
//! and tables. Every `Value` returned from [`crate::parse`] owns its data —
//! no lifetime is threaded through this type, matching the decoder's
//! "no borrow of the input after returning" contract.
//!
//! The shape mirrors `tomllib::types::Value`, but drops the `StrType`/
//! `Cow<'a, str>` wrapping that existed there to support format-preserving
//! round trips; this decoder does not preserve formatting (see
//! `SPEC_FULL.md` §1 Non-goals), so strings are plain owned `String`s.

use std::fmt;
use std::fmt::Display;

use indexmap::IndexMap;

/// An insertion-ordered TOML table: key to [`Value`].
///
/// Insertion order is preserved using [`indexmap::IndexMap`] rather than a
/// `HashMap` or `BTreeMap`, because TOML tables are ordered maps (§3.1) and
/// the teacher's `HashMap`-based `ParseError::InvalidTable` payload predates
/// the decision to make `Table` itself ordered.
pub type Table = IndexMap<String, Value>;

/// A decoded TOML value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A UTF-8 string.
    String(String),
    /// A signed 64-bit integer.
    Integer(i64),
    /// An IEEE-754 binary64 float.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// An RFC 3339 date-time with a UTC offset.
    OffsetDateTime(DateTime),
    /// An RFC 3339 date-time with no offset.
    LocalDateTime(DateTime),
    /// A bare calendar date, no time or offset.
    LocalDate(Date),
    /// A bare time of day, no date or offset.
    LocalTime(Time),
    /// An ordered sequence of values. TOML 1.0.0 permits mixed-type arrays;
    /// no homogeneity check is performed (spec.md §9).
    Array(Vec<Value>),
    /// An insertion-ordered table.
    Table(Table),
}

impl Value {
    /// Returns `"string"`, `"integer"`, etc. — the type tag used by the
    /// `toml-test` JSON projection (spec.md §6).
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "bool",
            Value::OffsetDateTime(_) => "datetime",
            Value::LocalDateTime(_) => "datetime-local",
            Value::LocalDate(_) => "date-local",
            Value::LocalTime(_) => "time-local",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    /// Returns the table payload if this value is a `Value::Table`.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the array payload if this value is a `Value::Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

/// Formats a `Value` for diagnostics and tests only — this is not an
/// encoder (spec.md §4.1: "The formatter must not be relied upon as an
/// encoder").
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::OffsetDateTime(dt) => write!(f, "{dt}"),
            Value::LocalDateTime(dt) => write!(f, "{dt}"),
            Value::LocalDate(d) => write!(f, "{d}"),
            Value::LocalTime(t) => write!(f, "{t}"),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            },
            Value::Table(t) => {
                write!(f, "{{")?;
                for (i, (k, v)) in t.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k} = {v}")?;
                }
                write!(f, "}}")
            },
        }
    }
}

/// Renders an `f64` the way TOML float literals must look: always a decimal
/// point or exponent, `inf`/`-inf`/`nan` spelled out. Rust's own `Display`
/// for `f64` already produces the shortest round-tripping decimal; this only
/// adds the trailing `.0` TOML requires for whole-number floats.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return if v.is_sign_negative() { "-nan".to_string() } else { "nan".to_string() };
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf".to_string() } else { "inf".to_string() };
    }
    let s = format!("{v}");
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}

/// A calendar date: `year-month-day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    /// Four digit year.
    pub year: u16,
    /// 1 through 12.
    pub month: u8,
    /// 1 through the length of `month` in `year`.
    pub day: u8,
}

impl Date {
    /// `true` if `year` is a Gregorian leap year.
    pub fn is_leap_year(year: u16) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Number of days in `month` of `year`, or `0` if `month` is out of range.
    pub fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => if Date::is_leap_year(year) { 29 } else { 28 },
            _ => 0,
        }
    }

    /// Structural validity predicate from spec.md §3.1: month in `1..=12`,
    /// day within the month's length for `year`.
    pub fn is_valid(&self) -> bool {
        self.month >= 1 && self.month <= 12 && self.day >= 1 && self.day <= Date::days_in_month(self.year, self.month)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day: `hour:minute:second[.nanosecond]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    /// 0 through 23.
    pub hour: u8,
    /// 0 through 59.
    pub minute: u8,
    /// 0 through 59, or 60 for a leap second (only valid in combination
    /// with a date of 30 June or 31 December — see [`DateTime::is_valid`]).
    pub second: u8,
    /// Fractional seconds in nanoseconds, 0 through 999_999_999.
    pub nanosecond: u32,
}

impl Time {
    /// Structural validity predicate ignoring the leap-second/date
    /// interaction, which only applies to a `DateTime`. A standalone
    /// `local_time` value may not use second `60`.
    pub fn is_valid(&self) -> bool {
        self.hour <= 23 && self.minute <= 59 && self.second <= 59 && self.nanosecond <= 999_999_999
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanosecond > 0 {
            let mut frac = format!("{:09}", self.nanosecond);
            while frac.ends_with('0') {
                frac.pop();
            }
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

/// A date and time of day, with an optional UTC offset.
///
/// Used for both the `offset_datetime` and `local_datetime` `Value`
/// variants; the offset is only meaningful for the former, where it is
/// always `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    /// The calendar date.
    pub date: Date,
    /// The time of day.
    pub time: Time,
    /// Minutes offset from UTC, in `-1440..=1440`, or `None` for a local
    /// (offset-less) date-time.
    pub offset_minutes: Option<i16>,
}

impl DateTime {
    /// Structural validity predicate from spec.md §3.1, including the leap
    /// second exception (`second == 60` only on 30 June or 31 December) and
    /// the timezone offset range/decomposition check.
    pub fn is_valid(&self) -> bool {
        if !self.date.is_valid() {
            return false;
        }
        if self.time.hour > 23 || self.time.minute > 59 || self.time.nanosecond > 999_999_999 {
            return false;
        }
        let leap_ok = self.time.second <= 59
            || (self.time.second == 60 && self.date.month == 6 && self.date.day == 30)
            || (self.time.second == 60 && self.date.month == 12 && self.date.day == 31);
        if !leap_ok {
            return false;
        }
        match self.offset_minutes {
            None => true,
            Some(m) => {
                if !(-1440..=1440).contains(&m) {
                    return false;
                }
                let abs = m.unsigned_abs();
                let hh = abs / 60;
                let mm = abs % 60;
                hh <= 23 && mm <= 59
            },
        }
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)?;
        match self.offset_minutes {
            None => Ok(()),
            Some(0) => write!(f, "Z"),
            Some(m) => {
                let sign = if m < 0 { '-' } else { '+' };
                let abs = m.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rules() {
        assert!(Date::is_leap_year(2000));
        assert!(!Date::is_leap_year(1900));
        assert!(Date::is_leap_year(2024));
        assert!(!Date::is_leap_year(2023));
    }

    #[test]
    fn date_validity() {
        assert!(Date { year: 2024, month: 2, day: 29 }.is_valid());
        assert!(!Date { year: 2023, month: 2, day: 29 }.is_valid());
        assert!(!Date { year: 2023, month: 13, day: 1 }.is_valid());
        assert!(!Date { year: 2023, month: 4, day: 31 }.is_valid());
    }

    #[test]
    fn leap_second_only_on_boundary_days() {
        let base = Time { hour: 23, minute: 59, second: 60, nanosecond: 0 };
        let ok = DateTime { date: Date { year: 2016, month: 12, day: 31 }, time: base, offset_minutes: None };
        assert!(ok.is_valid());
        let bad = DateTime { date: Date { year: 2016, month: 12, day: 30 }, time: base, offset_minutes: None };
        assert!(!bad.is_valid());
    }

    #[test]
    fn offset_range() {
        let dt = DateTime {
            date: Date { year: 1979, month: 5, day: 27 },
            time: Time { hour: 7, minute: 32, second: 0, nanosecond: 0 },
            offset_minutes: Some(-480),
        };
        assert!(dt.is_valid());
        assert_eq!(format!("{dt}"), "1979-05-27T07:32:00-08:00");
    }

    #[test]
    fn float_formatting_always_has_point_or_exponent() {
        assert_eq!(format_float(5.0), "5.0");
        assert_eq!(format_float(5.5), "5.5");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert!(format_float(f64::NAN) == "nan" || format_float(f64::NAN) == "-nan");
    }

    #[test]
    fn array_and_table_display_are_bracket_delimited() {
        let arr = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(format!("{arr}"), "[1, 2]");
        let mut t = Table::new();
        t.insert("a".to_string(), Value::Integer(1));
        let tv = Value::Table(t);
        assert_eq!(format!("{tv}"), "{a = 1}");
    }
}
