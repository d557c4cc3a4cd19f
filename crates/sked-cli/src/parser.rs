use anyhow::{anyhow, Result};
use chrono::{Local, TimeZone};
use chrono_english::{parse_date_string, Dialect};
use sked_core::date::CalendarDate;

/// Accepts a stored `YYYYMMDD` date or a phrase such as "tomorrow" or "next friday".
pub fn parse_date_input(input: &str, today: CalendarDate) -> Result<CalendarDate> {
    let input = input.trim();
    if let Ok(date) = CalendarDate::parse(input) {
        return Ok(date);
    }

    let now = today
        .as_naive()
        .and_hms_opt(12, 0, 0)
        .and_then(|dt| Local.from_local_datetime(&dt).single())
        .ok_or_else(|| anyhow!("Cannot anchor '{}' to the local day", input))?;

    parse_date_string(input, now, Dialect::Uk)
        .map(|dt| CalendarDate::from(dt.date_naive()))
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> CalendarDate {
        CalendarDate::parse("20240110").unwrap()
    }

    #[rstest]
    #[case("20240301", "20240301")]
    #[case(" 20240301 ", "20240301")]
    #[case("today", "20240110")]
    #[case("tomorrow", "20240111")]
    fn test_parse_date_input(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_date_input(input, today()).unwrap().to_string(), expected);
    }

    #[test]
    fn test_parse_date_input_rejects_garbage() {
        assert!(parse_date_input("not a date at all", today()).is_err());
    }
}
