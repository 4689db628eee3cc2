//! The locale capability the panels render through.
//!
//! Formatting is owned by the surrounding layer; the core only needs a way to
//! turn a date into text and to know which weekday starts the week.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{DateValue, WeekStart};

pub trait DateLocale {
    fn format(&self, date: &DateValue, pattern: &str) -> String;

    fn first_day_of_week(&self) -> WeekStart;
}

/// Locale backed by chrono's strftime patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChronoLocale {
    pub week_start: WeekStart,
}

impl ChronoLocale {
    pub const fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }
}

impl DateLocale for ChronoLocale {
    fn format(&self, date: &DateValue, pattern: &str) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        // an invalid pattern renders as empty text
        if write!(out, "{}", date.naive().format(pattern)).is_err() {
            out.clear();
        }
        out
    }

    fn first_day_of_week(&self) -> WeekStart {
        self.week_start
    }
}

/// Parses typed text with `pattern`, accepting it only when formatting the
/// result back reproduces the text exactly.
///
/// Patterns coarser than a day fill the missing fields with the first
/// month/day at midnight.
pub fn parse_input(text: &str, pattern: &str, locale: &impl DateLocale) -> Option<DateValue> {
    let text = text.trim();
    let parsed = NaiveDateTime::parse_from_str(text, pattern)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, pattern).ok().map(|d| d.and_time(chrono::NaiveTime::MIN)))
        .or_else(|| parse_partial(text, pattern))
        .map(DateValue::from)?;
    (locale.format(&parsed, pattern) == text).then_some(parsed)
}

fn parse_partial(text: &str, pattern: &str) -> Option<NaiveDateTime> {
    // year-only and year-month patterns lack a day, which chrono requires
    let padded_text = format!("{text}|01|01");
    let padded_pattern = if pattern.contains("%m") {
        format!("{pattern}|%d|01")
    } else {
        format!("{pattern}|%m|%d")
    };
    NaiveDate::parse_from_str(&padded_text, &padded_pattern)
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_format() {
        let locale = ChronoLocale::default();
        assert_eq!(locale.format(&date(2024, 3, 5), "%Y-%m-%d"), "2024-03-05");
        assert_eq!(locale.format(&date(2024, 3, 5), "%b"), "Mar");
        assert_eq!(locale.first_day_of_week(), WeekStart::MONDAY);
    }

    #[test]
    fn test_parse_input_round_trip_only() {
        let locale = ChronoLocale::default();
        assert_eq!(parse_input("2024-03-05", "%Y-%m-%d", &locale), Some(date(2024, 3, 5)));
        assert_eq!(
            parse_input("2024-03-05 10:11:12", "%Y-%m-%d %H:%M:%S", &locale),
            Some(datetime(2024, 3, 5, 10, 11, 12))
        );
        // not zero padded, so formatting back differs
        assert_eq!(parse_input("2024-3-5", "%Y-%m-%d", &locale), None);
        assert_eq!(parse_input("2024-02-30", "%Y-%m-%d", &locale), None);
        assert_eq!(parse_input("garbage", "%Y-%m-%d", &locale), None);
    }

    #[test]
    fn test_parse_input_coarse_patterns() {
        let locale = ChronoLocale::default();
        assert_eq!(parse_input("2024-03", "%Y-%m", &locale), Some(date(2024, 3, 1)));
        assert_eq!(parse_input("2024", "%Y", &locale), Some(date(2024, 1, 1)));
    }
}
