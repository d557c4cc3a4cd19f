use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RecurrenceError;

/// Storage and wire format of a calendar date.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Format accepted by the task search box.
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// A year/month/day triple with no time-of-day or timezone.
///
/// The textual form is always eight ASCII digits, `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the fixed-width `YYYYMMDD` form.
    pub fn parse(s: &str) -> Result<Self, RecurrenceError> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecurrenceError::InvalidDateFormat(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| RecurrenceError::InvalidDateFormat(s.to_string()))
    }

    /// Parses the `DD.MM.YYYY` form typed into the search box.
    pub fn parse_search(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(s, SEARCH_DATE_FORMAT).ok().map(Self)
    }

    /// Strictly later by (year, month, day). Equal dates are not after each other.
    pub fn is_after(&self, reference: &CalendarDate) -> bool {
        self.0 > reference.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Last day of this date's month: the day before the first of the next month.
    pub fn last_day_of_month(&self) -> Option<Self> {
        let first = self.0.with_day(1)?;
        first
            .checked_add_months(Months::new(1))?
            .pred_opt()
            .map(Self)
    }

    /// Days elapsed from `earlier` to `self`; negative when `self` is earlier.
    pub fn days_since(&self, earlier: &CalendarDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
