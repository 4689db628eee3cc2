//! Shared builders for unit tests.

use crate::DateValue;
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> DateValue {
    datetime(year, month, day, 0, 0, 0)
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateValue {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .map(DateValue::from)
        .expect("test date must be valid")
}
