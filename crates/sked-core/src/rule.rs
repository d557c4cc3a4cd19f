//! Recurrence rule grammar.
//!
//! A rule is a short space-separated string:
//!
//! - `d <interval>`: every `interval` days, 1..=400
//! - `y`: every year on the same month and day
//! - `w <day>[,<day>...]`: on the listed weekdays, 1 = Monday .. 7 = Sunday
//! - `m <day>[,<day>...] [<month>[,<month>...]]`: on the listed days of the
//!   listed months; day -1 is the last day of a month, -2 the one before it

use chrono::Weekday;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_DAILY_INTERVAL: u32 = 400;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("repeat rule is empty")]
    EmptyRule,

    #[error("unsupported repeat rule: '{0}'")]
    UnsupportedRuleKind(String),

    #[error("invalid format for repeat rule '{0}'")]
    MalformedRule(String),

    #[error("invalid interval '{0}': must be between 1 and 400")]
    InvalidInterval(String),

    #[error("invalid weekday list '{0}': days must be between 1 and 7")]
    InvalidWeekdayList(String),

    #[error("invalid day list '{0}': days must be between 1 and 31, or -1, -2")]
    InvalidDayList(String),

    #[error("invalid month list '{0}': months must be between 1 and 12")]
    InvalidMonthList(String),
}

/// A validated recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    Daily { interval: u32 },
    Yearly,
    /// Weekday codes 1..=7, Monday first.
    Weekly { days: BTreeSet<u8> },
    /// `months` is `None` when every month is eligible.
    Monthly {
        days: BTreeSet<i32>,
        months: Option<BTreeSet<u32>>,
    },
}

/// Maps a rule weekday code (1 = Monday .. 7 = Sunday) onto chrono's weekday.
pub fn weekday_from_code(code: u8) -> Option<Weekday> {
    match code {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn parse(rule: &str) -> Result<RecurrenceRule, ParseError> {
    if rule.is_empty() {
        return Err(ParseError::EmptyRule);
    }

    let parts: Vec<&str> = rule.split(' ').collect();
    match parts[0] {
        "d" => {
            if parts.len() != 2 {
                return Err(ParseError::MalformedRule(rule.to_string()));
            }
            let interval: u32 = parts[1]
                .parse()
                .map_err(|_| ParseError::InvalidInterval(parts[1].to_string()))?;
            if !(1..=MAX_DAILY_INTERVAL).contains(&interval) {
                return Err(ParseError::InvalidInterval(parts[1].to_string()));
            }
            Ok(RecurrenceRule::Daily { interval })
        }
        // Anything after `y` is ignored.
        "y" => Ok(RecurrenceRule::Yearly),
        "w" => {
            if parts.len() != 2 {
                return Err(ParseError::MalformedRule(rule.to_string()));
            }
            let invalid = || ParseError::InvalidWeekdayList(parts[1].to_string());
            let days = parse_int_list(parts[1]).ok_or_else(invalid)?;
            if days.is_empty() || days.iter().any(|d| !(1..=7).contains(d)) {
                return Err(invalid());
            }
            Ok(RecurrenceRule::Weekly {
                days: days.into_iter().map(|d| d as u8).collect(),
            })
        }
        "m" => {
            if parts.len() < 2 {
                return Err(ParseError::MalformedRule(rule.to_string()));
            }
            let invalid_days = || ParseError::InvalidDayList(parts[1].to_string());
            let days = parse_int_list(parts[1]).ok_or_else(invalid_days)?;
            if days.is_empty() || days.iter().any(|&d| !is_valid_month_day(d)) {
                return Err(invalid_days());
            }

            let months = match parts.get(2) {
                Some(token) => {
                    let invalid_months = || ParseError::InvalidMonthList(token.to_string());
                    let months = parse_int_list(token).ok_or_else(invalid_months)?;
                    if months.iter().any(|m| !(1..=12).contains(m)) {
                        return Err(invalid_months());
                    }
                    months
                }
                None => Vec::new(),
            };

            Ok(RecurrenceRule::Monthly {
                days: days.into_iter().collect(),
                months: (!months.is_empty()).then(|| months.into_iter().map(|m| m as u32).collect()),
            })
        }
        other => Err(ParseError::UnsupportedRuleKind(other.to_string())),
    }
}

fn is_valid_month_day(day: i32) -> bool {
    (1..=31).contains(&day) || day == -1 || day == -2
}

/// Comma-separated integers; whitespace around items is trimmed and empty
/// items are skipped. `None` if any item is not an integer.
fn parse_int_list(s: &str) -> Option<Vec<i32>> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().ok())
        .collect()
}

impl FromStr for RecurrenceRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
            items
                .into_iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }

        match self {
            RecurrenceRule::Daily { interval } => write!(f, "d {}", interval),
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::Weekly { days } => write!(f, "w {}", join(days)),
            RecurrenceRule::Monthly { days, months } => {
                // Positive days first, then -1 before -2.
                let ordered = days
                    .iter()
                    .filter(|d| **d > 0)
                    .chain(days.iter().filter(|d| **d < 0).rev());
                write!(f, "m {}", join(ordered))?;
                if let Some(months) = months {
                    write!(f, " {}", join(months))?;
                }
                Ok(())
            }
        }
    }
}
