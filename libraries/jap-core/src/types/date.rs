//! Calendar dates and aggregation windows
//!
//! Entries are keyed by calendar day only. Any time-of-day carried by the
//! caller is dropped here, before a date ever reaches storage, so two
//! representations of the same day always collide.

use crate::error::{JapError, Result};
use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A calendar date with no time-of-day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    /// Wrap a chrono date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day
    ///
    /// # Errors
    ///
    /// Returns a validation error if the components do not form a real date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| JapError::validation(format!("Invalid date: {year}-{month}-{day}")))
    }

    /// Today's date on the machine running the computation
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` date, or a date-time whose date part is `YYYY-MM-DD`
    ///
    /// The time-of-day and any offset are discarded without conversion.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty or malformed input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(JapError::validation("Date is required"));
        }

        let invalid = || JapError::validation("Invalid date format. Use YYYY-MM-DD.");

        let (date_part, rest) = match (input.get(..10), input.get(10..)) {
            (Some(date_part), Some(rest)) if is_canonical_shape(date_part) => (date_part, rest),
            _ => return Err(invalid()),
        };

        let date = NaiveDate::parse_from_str(date_part, CANONICAL_FORMAT).map_err(|_| invalid())?;

        if rest.is_empty() {
            return Ok(Self(date));
        }

        if !rest.starts_with(['T', 't', ' ']) || !is_valid_datetime(input) {
            return Err(invalid());
        }

        Ok(Self(date))
    }

    /// The underlying chrono date
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-based
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

fn is_canonical_shape(s: &str) -> bool {
    s.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    })
}

fn is_valid_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for EntryDate {
    type Err = JapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntryDate {
    type Error = JapError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<EntryDate> for String {
    fn from(date: EntryDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for EntryDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Inclusive range of calendar days, `[start, last]`
///
/// Both bounds are real days inside the reference period, so their
/// `YYYY-MM-DD` renderings compare the same way as the dates do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day inside the window
    pub start: EntryDate,
    /// Last day inside the window
    pub last: EntryDate,
}

impl DateWindow {
    /// The single day `reference`
    pub fn day(reference: EntryDate) -> Self {
        Self {
            start: reference,
            last: reference,
        }
    }

    /// The calendar month containing `reference`
    pub fn month(reference: EntryDate) -> Self {
        let date = reference.as_naive();
        let start = date.with_day(1).unwrap_or(date);
        let last = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self::from_bounds(start, last)
    }

    /// The calendar year containing `reference`
    pub fn year(reference: EntryDate) -> Self {
        let date = reference.as_naive();
        let start = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(date);
        let last = NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(date);
        Self::from_bounds(start, last)
    }

    fn from_bounds(start: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: EntryDate(start),
            last: EntryDate(last),
        }
    }

    /// True if `date` falls inside the window
    pub fn contains(&self, date: EntryDate) -> bool {
        self.start <= date && date <= self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> EntryDate {
        EntryDate::parse(s).unwrap()
    }

    #[test]
    fn parses_canonical_dates() {
        let d = date("2024-01-05");
        assert_eq!(d, EntryDate::from_ymd(2024, 1, 5).unwrap());
        assert_eq!(d.to_string(), "2024-01-05");
    }

    #[test]
    fn datetime_collapses_to_its_calendar_day() {
        assert_eq!(date("2024-01-05T23:59:59Z"), date("2024-01-05"));
        assert_eq!(date("2024-01-05T00:00:01+05:30"), date("2024-01-05"));
        assert_eq!(date("2024-01-05 08:15:00"), date("2024-01-05"));
        assert_eq!(date("2024-01-05T08:15:00.123"), date("2024-01-05"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for input in [
            "",
            "   ",
            "2024-1-5",
            "05-01-2024",
            "2024/01/05",
            "2024-02-30",
            "2024-01-05garbage",
            "2024-01-05T25:00:00Z",
            "tomorrow",
        ] {
            assert!(EntryDate::parse(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn deserializes_from_json_string() {
        let d: EntryDate = serde_json::from_str("\"2024-03-09T10:00:00Z\"").unwrap();
        assert_eq!(d.to_string(), "2024-03-09");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-03-09\"");
    }

    #[test]
    fn day_window_covers_one_day() {
        let window = DateWindow::day(date("2024-01-31"));
        assert!(window.contains(date("2024-01-31")));
        assert!(!window.contains(date("2024-01-30")));
        assert!(!window.contains(date("2024-02-01")));
    }

    #[test]
    fn month_window_handles_year_rollover() {
        let window = DateWindow::month(date("2023-12-15"));
        assert_eq!(window.start, date("2023-12-01"));
        assert_eq!(window.last, date("2023-12-31"));
    }

    #[test]
    fn month_window_ends_on_last_day_of_february() {
        let window = DateWindow::month(date("2024-02-10"));
        assert_eq!(window.last, date("2024-02-29"));
    }

    #[test]
    fn windows_in_year_9999_stay_four_digit() {
        let reference = date("9999-12-31");
        for window in [
            DateWindow::day(reference),
            DateWindow::month(reference),
            DateWindow::year(reference),
        ] {
            assert_eq!(window.last.to_string(), "9999-12-31");
            assert!(window.contains(reference));
        }
    }

    #[test]
    fn year_window_spans_calendar_year() {
        let window = DateWindow::year(date("2024-02-29"));
        assert_eq!(window.start, date("2024-01-01"));
        assert_eq!(window.last, date("2024-12-31"));
        assert!(window.contains(date("2024-12-31")));
        assert!(!window.contains(date("2023-12-31")));
    }
}
