use chrono::Weekday;

use crate::date::CalendarDate;
use crate::error::RecurrenceError;
use crate::rule::{self, weekday_from_code, ParseError, RecurrenceRule};

/// Upper bound on the steps any single search may take.
///
/// One step per day from `00000101` to `99991231` fits under this bound, so
/// any valid rule between two `YYYYMMDD` dates finds its match. A rule that
/// can never match (`m 31 2`) hits it instead of spinning.
pub const MAX_SEARCH_STEPS: usize = 3_700_000;

/// Computes the next occurrence of `repeat` after `now`, starting from the
/// task's stored date `start`.
///
/// Both dates and the result use the `YYYYMMDD` form. The search always begins
/// at `start`, never at `now`, so a task that is far overdue catches up in
/// whole rule steps.
///
/// # Examples
///
/// ```
/// use sked_core::date::CalendarDate;
/// use sked_core::recurrence::next_date;
///
/// let now = CalendarDate::parse("20240105").unwrap();
/// assert_eq!(next_date(now, "20240101", "d 3").unwrap(), "20240107");
/// ```
pub fn next_date(now: CalendarDate, start: &str, repeat: &str) -> Result<String, RecurrenceError> {
    if repeat.is_empty() {
        return Err(ParseError::EmptyRule.into());
    }
    let start = CalendarDate::parse(start)?;
    let rule = rule::parse(repeat)?;
    next_occurrence(now, start, &rule).map(|date| date.to_string())
}

/// Typed form of [`next_date`].
pub fn next_occurrence(
    now: CalendarDate,
    start: CalendarDate,
    rule: &RecurrenceRule,
) -> Result<CalendarDate, RecurrenceError> {
    match rule {
        RecurrenceRule::Daily { interval } => {
            let interval = u64::from(*interval);
            advance_until(start, |d| d.add_days(interval), |d| d.is_after(&now))
        }
        RecurrenceRule::Yearly => {
            let (month, day) = (start.month(), start.day());
            advance_until(
                start,
                |d| {
                    let year = d.year().checked_add(1)?;
                    // 29 February rolls over to 1 March in common years.
                    CalendarDate::from_ymd(year, month, day)
                        .or_else(|| CalendarDate::from_ymd(year, 3, 1))
                },
                |d| d.is_after(&now),
            )
        }
        RecurrenceRule::Weekly { days } => {
            let weekdays: Vec<Weekday> = days.iter().filter_map(|&c| weekday_from_code(c)).collect();
            advance_until(
                start,
                |d| d.succ(),
                |d| d.is_after(&now) && weekdays.contains(&d.weekday()),
            )
        }
        RecurrenceRule::Monthly { days, months } => advance_until(
            start,
            |d| d.succ(),
            |d| {
                d.is_after(&now)
                    && months.as_ref().map_or(true, |m| m.contains(&d.month()))
                    && matches_month_day(d, days)
            },
        ),
    }
}

/// Steps from `start` until `accept` holds, taking at least one step.
///
/// Fails with [`RecurrenceError::SearchExhausted`] after [`MAX_SEARCH_STEPS`]
/// steps or when `step` leaves the representable date range.
pub fn advance_until<S, A>(start: CalendarDate, mut step: S, mut accept: A) -> Result<CalendarDate, RecurrenceError>
where
    S: FnMut(CalendarDate) -> Option<CalendarDate>,
    A: FnMut(&CalendarDate) -> bool,
{
    let mut current = start;
    for taken in 1..=MAX_SEARCH_STEPS {
        current = step(current).ok_or(RecurrenceError::SearchExhausted { steps: taken })?;
        if accept(&current) {
            return Ok(current);
        }
    }
    Err(RecurrenceError::SearchExhausted { steps: MAX_SEARCH_STEPS })
}

fn matches_month_day(date: &CalendarDate, days: &std::collections::BTreeSet<i32>) -> bool {
    let day = date.day() as i32;
    if days.contains(&day) {
        return true;
    }
    if !days.contains(&-1) && !days.contains(&-2) {
        return false;
    }
    let Some(last) = date.last_day_of_month().map(|d| d.day() as i32) else {
        return false;
    };
    (days.contains(&-1) && day == last) || (days.contains(&-2) && day == last - 1)
}
