//! Best-effort coercion of raw input into semantic types.
//!
//! Every coercion returns a [`Coerced`]: either the parsed value or the raw
//! input, untouched. Nothing in this module returns an error. A value that
//! does not parse stays available for validation, which is where the
//! human-readable failure is reported.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::time_of_day::TimeOfDay;
use crate::value::{AttributeType, Value};

/// The pattern date attributes are entered in.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Date-time layouts without an offset, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%b %d %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
];

/// Date-time layouts carrying an offset, tried after RFC 3339 and RFC 2822.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M %z",
];

/// Date-only layouts; the time is taken as midnight.
const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Time-only layouts; the date is taken as today.
const TIME_ONLY_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M%p",
];

/// The outcome of a coercion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// The input was converted to the declared semantic type.
    Parsed(Value),
    /// The input could not be converted and is kept as supplied.
    Raw(Value),
}

impl Coerced {
    /// The value to store, parsed or raw.
    pub const fn value(&self) -> &Value {
        match self {
            Self::Parsed(v) | Self::Raw(v) => v,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Parsed(v) | Self::Raw(v) => v,
        }
    }

    /// Returns `true` if the input was converted.
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

/// Coerces `raw` into `ty`.
///
/// `offset` is applied to times that carry no zone of their own.
pub fn coerce(ty: AttributeType, raw: &Value, offset: FixedOffset) -> Coerced {
    match ty {
        AttributeType::String => coerce_string(raw),
        AttributeType::Integer => coerce_integer(raw),
        AttributeType::Date => coerce_date(raw),
        AttributeType::Time => coerce_time(raw, offset),
        AttributeType::TimeOfDay => coerce_time_of_day(raw),
    }
}

/// Converts any input to its textual representation. Never fails.
///
/// `Null` becomes the empty string.
pub fn coerce_string(raw: &Value) -> Coerced {
    match raw {
        Value::String(_) => Coerced::Parsed(raw.clone()),
        other => Coerced::Parsed(Value::String(other.to_string())),
    }
}

/// Parses a base-10 integer.
///
/// Text may carry surrounding whitespace and a sign. Floats with no
/// fractional part are accepted; anything else is kept raw.
pub fn coerce_integer(raw: &Value) -> Coerced {
    match raw {
        Value::Int(_) => Coerced::Parsed(raw.clone()),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Coerced::Raw(raw.clone()), |n| Coerced::Parsed(Value::Int(n))),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            #[allow(clippy::cast_possible_truncation)]
            let n = *f as i64;
            Coerced::Parsed(Value::Int(n))
        }
        _ => Coerced::Raw(raw.clone()),
    }
}

/// Parses a date written as `mm/dd/yyyy`.
pub fn coerce_date(raw: &Value) -> Coerced {
    match raw {
        Value::Date(_) => Coerced::Parsed(raw.clone()),
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_or_else(|_| Coerced::Raw(raw.clone()), |d| Coerced::Parsed(Value::Date(d))),
        _ => Coerced::Raw(raw.clone()),
    }
}

/// Parses a time with [`parse_time`].
pub fn coerce_time(raw: &Value, offset: FixedOffset) -> Coerced {
    match raw {
        Value::Time(_) => Coerced::Parsed(raw.clone()),
        Value::String(s) => parse_time(s, offset)
            .map_or_else(|| Coerced::Raw(raw.clone()), |t| Coerced::Parsed(Value::Time(t))),
        _ => Coerced::Raw(raw.clone()),
    }
}

/// Parses a time of day with [`TimeOfDay::parse`].
pub fn coerce_time_of_day(raw: &Value) -> Coerced {
    match raw {
        Value::TimeOfDay(_) => Coerced::Parsed(raw.clone()),
        Value::String(s) => TimeOfDay::parse(s).map_or_else(
            |_| Coerced::Raw(raw.clone()),
            |t| Coerced::Parsed(Value::TimeOfDay(t)),
        ),
        _ => Coerced::Raw(raw.clone()),
    }
}

/// Parses a time string in any of the common layouts.
///
/// Tried in order: RFC 3339, RFC 2822, ISO-like date-times with an offset,
/// date-times without one (placed at `offset`), dates alone (midnight at
/// `offset`), and clock times alone (today at `offset`).
pub fn parse_time(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(s) {
        return Some(t);
    }
    if let Some(t) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(t);
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_ONLY_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .or_else(|| {
            TIME_ONLY_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
                .map(|t| Utc::now().with_timezone(&offset).date_naive().and_time(t))
        })?;

    offset.from_local_datetime(&naive).single()
}
