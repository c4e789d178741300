//! Calendar date value object for daily entitlement bookkeeping.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Timestamp;

/// A calendar date with no time component.
///
/// The entitlement gate only ever compares two of these for equality; which
/// timezone "today" is computed in is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from year, month, and day.
    ///
    /// Returns `None` for out-of-range components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date, shifted by a fixed UTC offset in minutes.
    ///
    /// The bot's daily entitlement resets at local midnight of the
    /// configured deployment timezone, expressed as an offset.
    pub fn today_at_offset(offset_minutes: i32) -> Self {
        Self::at_offset(&Timestamp::now(), offset_minutes)
    }

    /// The calendar date of `at`, shifted by a fixed UTC offset in minutes.
    pub fn at_offset(at: &Timestamp, offset_minutes: i32) -> Self {
        let shifted = *at.as_datetime() + Duration::minutes(offset_minutes as i64);
        Self(shifted.date_naive())
    }

    /// The following calendar date.
    pub fn next_day(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(NaiveDate::parse_from_str(s, "%Y-%m-%d")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_iso_date() {
        let date = CalendarDate::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(date.to_string(), "2024-01-01");
    }

    #[test]
    fn parses_iso_date() {
        let date: CalendarDate = "2024-01-02".parse().unwrap();
        assert_eq!(date, CalendarDate::from_ymd(2024, 1, 2).unwrap());
    }

    #[test]
    fn next_day_rolls_over_month() {
        let date = CalendarDate::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(date.next_day(), CalendarDate::from_ymd(2024, 2, 1).unwrap());
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(CalendarDate::from_ymd(2024, 13, 1).is_none());
    }

    #[test]
    fn offset_shifts_the_date_across_midnight() {
        // 2024-01-01 23:30 UTC is already the 2nd at UTC+2.
        let late_evening = Timestamp::from_unix_secs(1_704_151_800);
        assert_eq!(
            CalendarDate::at_offset(&late_evening, 120),
            CalendarDate::from_ymd(2024, 1, 2).unwrap()
        );
        assert_eq!(
            CalendarDate::at_offset(&late_evening, 0),
            CalendarDate::from_ymd(2024, 1, 1).unwrap()
        );
    }
}
