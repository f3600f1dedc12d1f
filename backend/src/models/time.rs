//! Time-of-day values and day-label parsing.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Reasons an `HH:MM` string is rejected by the strict parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("empty time string")]
    Empty,
    #[error("missing ':' separator in '{0}'")]
    MissingSeparator(String),
    #[error("invalid hour component '{0}'")]
    InvalidHour(String),
    #[error("invalid minute component '{0}'")]
    InvalidMinute(String),
    #[error("time {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },
}

/// Wall-clock hour and minute without a date.
///
/// Ordering compares hour first, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Build a time of day, rejecting out-of-range components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::OutOfRange { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Truncate a chrono time to minute precision.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// Forgiving reading used when a value fails strict parsing.
    ///
    /// Each component that is missing, non-numeric or out of range reads as `0`,
    /// so `"20"` is `20:00` and `"ab:cd"` is `00:00`.
    pub fn parse_lenient(raw: &str) -> Self {
        let mut parts = raw.trim().splitn(2, ':');
        let hour = parts
            .next()
            .and_then(|h| h.trim().parse::<u32>().ok())
            .filter(|h| *h <= 23)
            .unwrap_or(0);
        let minute = parts
            .next()
            .and_then(|m| m.trim().parse::<u32>().ok())
            .filter(|m| *m <= 59)
            .unwrap_or(0);
        Self {
            hour: hour as u8,
            minute: minute as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    /// Strict `H:MM` / `HH:MM` parser.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let (hour_str, minute_str) = trimmed
            .split_once(':')
            .ok_or_else(|| TimeParseError::MissingSeparator(trimmed.to_string()))?;

        if hour_str.is_empty()
            || hour_str.len() > 2
            || !hour_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(TimeParseError::InvalidHour(hour_str.to_string()));
        }
        if minute_str.len() != 2 || !minute_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeParseError::InvalidMinute(minute_str.to_string()));
        }

        let hour = hour_str
            .parse::<u32>()
            .map_err(|_| TimeParseError::InvalidHour(hour_str.to_string()))?;
        let minute = minute_str
            .parse::<u32>()
            .map_err(|_| TimeParseError::InvalidMinute(minute_str.to_string()))?;

        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn day_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("day number pattern is valid"))
}

/// Extract the day of month from a label such as `"Agenda - Viernes 27 de Junio de 2025"`.
///
/// Returns the first run of ASCII digits, or `None` when the label has no digits
/// (or the run does not fit in an `i64`).
pub fn extract_day_of_month(label: &str) -> Option<i64> {
    day_number_pattern()
        .find(label)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Resolve `day` within the given month, overflowing like calendar arithmetic.
///
/// Day 0 is the last day of the previous month and days past the end of the month
/// continue into the next one.
pub fn resolve_day_in_month(year: i32, month: u32, day: i64) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = Duration::try_days(day.checked_sub(1)?)?;
    first.checked_add_signed(offset)
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
