//! A wall-clock time without a date.
//!
//! [`TimeOfDay`] is the semantic type behind `time_of_day` attributes. It is
//! deliberately separate from [`chrono::NaiveTime`]: it has second precision,
//! and its parser accepts the loose spellings people type into forms
//! (`"9am"`, `"930 p.m."`, `"noon"`).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<hour>[0-9]{1,2})(?::?(?P<minute>[0-9]{2})(?::?(?P<second>[0-9]{2}))?)?\s*(?:(?P<meridian>[ap])\.?\s*m?\.?)?$",
    )
    .expect("valid regex")
});

/// Why a string could not be read as a [`TimeOfDay`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayParseError {
    /// The input was empty or whitespace.
    #[error("empty time of day")]
    Empty,
    /// The input does not look like a clock time.
    #[error("unrecognized time of day: {0:?}")]
    Unrecognized(String),
    /// The input looks like a clock time but a component is out of range.
    #[error("time of day out of range: {0:?}")]
    OutOfRange(String),
}

/// A time of day with second precision, `00:00:00` through `23:59:59`.
///
/// # Examples
///
/// ```
/// use formkit_forms::time_of_day::TimeOfDay;
///
/// let t = TimeOfDay::parse("9:30pm").unwrap();
/// assert_eq!(t, TimeOfDay::new(21, 30, 0).unwrap());
/// assert_eq!(t.to_string(), "21:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// Midnight, `00:00:00`.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Noon, `12:00:00`.
    pub const NOON: Self = Self {
        hour: 12,
        minute: 0,
        second: 0,
    };

    /// Creates a time of day, or `None` if a component is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
        })
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    pub const fn second(self) -> u8 {
        self.second
    }

    /// Seconds elapsed since midnight.
    pub const fn second_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Converts to a [`NaiveTime`].
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.second_of_day(), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Parses a loosely formatted time of day.
    ///
    /// Accepted forms, case-insensitive, surrounding whitespace ignored:
    /// 24-hour `"13:45"`, `"13:45:10"`, `"1345"`; 12-hour `"9am"`, `"9 pm"`,
    /// `"9:30 p.m."`, `"1230am"`; and the words `"noon"` and `"midnight"`.
    pub fn parse(input: &str) -> Result<Self, TimeOfDayParseError> {
        let normalized = input.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(TimeOfDayParseError::Empty);
        }
        match normalized.as_str() {
            "noon" => return Ok(Self::NOON),
            "midnight" => return Ok(Self::MIDNIGHT),
            _ => {}
        }

        let caps = CLOCK
            .captures(&normalized)
            .ok_or_else(|| TimeOfDayParseError::Unrecognized(input.to_string()))?;

        let component = |name: &str| -> Result<u8, TimeOfDayParseError> {
            caps.name(name).map_or(Ok(0), |m| {
                m.as_str()
                    .parse()
                    .map_err(|_| TimeOfDayParseError::Unrecognized(input.to_string()))
            })
        };
        let mut hour = component("hour")?;
        let minute = component("minute")?;
        let second = component("second")?;

        if let Some(meridian) = caps.name("meridian") {
            if !(1..=12).contains(&hour) {
                return Err(TimeOfDayParseError::OutOfRange(input.to_string()));
            }
            hour %= 12;
            if meridian.as_str() == "p" {
                hour += 12;
            }
        }

        Self::new(hour, minute, second)
            .ok_or_else(|| TimeOfDayParseError::OutOfRange(input.to_string()))
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            second: t.second() as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(h: u8, m: u8, s: u8) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0, 0).is_none());
        assert!(TimeOfDay::new(0, 60, 0).is_none());
        assert!(TimeOfDay::new(0, 0, 60).is_none());
        assert!(TimeOfDay::new(23, 59, 59).is_some());
    }

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(TimeOfDay::parse("13:45").unwrap(), tod(13, 45, 0));
        assert_eq!(TimeOfDay::parse("13:45:10").unwrap(), tod(13, 45, 10));
        assert_eq!(TimeOfDay::parse("1345").unwrap(), tod(13, 45, 0));
        assert_eq!(TimeOfDay::parse("00:00").unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(TimeOfDay::parse("7").unwrap(), tod(7, 0, 0));
    }

    #[test]
    fn test_parse_12_hour() {
        assert_eq!(TimeOfDay::parse("9am").unwrap(), tod(9, 0, 0));
        assert_eq!(TimeOfDay::parse("9 PM").unwrap(), tod(21, 0, 0));
        assert_eq!(TimeOfDay::parse("9:30 p.m.").unwrap(), tod(21, 30, 0));
        assert_eq!(TimeOfDay::parse("930pm").unwrap(), tod(21, 30, 0));
        assert_eq!(TimeOfDay::parse("12am").unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(TimeOfDay::parse("12pm").unwrap(), TimeOfDay::NOON);
        assert_eq!(TimeOfDay::parse("12:05:30 am").unwrap(), tod(0, 5, 30));
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(TimeOfDay::parse(" Noon ").unwrap(), TimeOfDay::NOON);
        assert_eq!(TimeOfDay::parse("midnight").unwrap(), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(TimeOfDay::parse("  "), Err(TimeOfDayParseError::Empty));
        assert!(matches!(
            TimeOfDay::parse("lunchtime"),
            Err(TimeOfDayParseError::Unrecognized(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("25:00"),
            Err(TimeOfDayParseError::OutOfRange(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("13pm"),
            Err(TimeOfDayParseError::OutOfRange(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("0am"),
            Err(TimeOfDayParseError::OutOfRange(_))
        ));
        assert!(matches!(
            TimeOfDay::parse("10:75"),
            Err(TimeOfDayParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        for input in ["٩", "١٢:٣٠", "９am", "1٢:30"] {
            assert!(
                matches!(TimeOfDay::parse(input), Err(TimeOfDayParseError::Unrecognized(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        assert_eq!(TimeOfDay::parse("\t 7:05 pm \n").unwrap(), tod(19, 5, 0));
        assert_eq!(TimeOfDay::parse("  0830  ").unwrap(), tod(8, 30, 0));
    }

    #[test]
    fn test_ordering_and_seconds() {
        assert!(tod(8, 0, 0) < tod(8, 0, 1));
        assert!(TimeOfDay::NOON > TimeOfDay::MIDNIGHT);
        assert_eq!(tod(1, 2, 3).second_of_day(), 3723);
    }

    #[test]
    fn test_naive_time_conversion() {
        let t = tod(17, 5, 9);
        assert_eq!(t.to_naive_time(), NaiveTime::from_hms_opt(17, 5, 9).unwrap());
        assert_eq!(TimeOfDay::from(t.to_naive_time()), t);
    }

    #[test]
    fn test_from_str_and_display() {
        let t: TimeOfDay = "6:07am".parse().unwrap();
        assert_eq!(t.to_string(), "06:07:00");
    }
}
