mod compare;
mod config;
mod consts;
mod events;
mod locale;
mod panel;
mod picker;
mod prelude;
mod range;
mod range_picker;
mod table;
#[cfg(test)]
mod test_utils;
mod types;
mod validate;

pub use compare::{is_before_day, is_before_month, is_before_year, is_same_date, is_same_range, override_hms};
pub use config::PickerConfig;
pub use consts::*;
pub use events::Emitter;
pub use locale::{ChronoLocale, DateLocale, parse_input};
pub use panel::{NavOutcome, PanelNavigator};
pub use picker::{DateEvent, DatePicker};
pub use range::{DateRange, RangeError, normalize_range_value};
pub use range_picker::{CalendarChange, RangeEvent, RangePicker};
pub use table::{CellContext, DateCell, date_cells, decade_cells, month_cells, year_cells};
pub use types::{Granularity, NavDirection, PanelMode, RangeSide, WeekStart};
pub use validate::{
    DisabledDateFn, DisabledTimeFn, DisabledTimePartial, TimeConfig, get_time_config, is_allowed_date,
    is_disabled_decade, is_disabled_month, is_disabled_year, is_time_valid, is_time_valid_by_config,
};

use crate::prelude::*;
use chrono::{
    DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Timelike,
};
use std::str::FromStr;
use types::days_in_month;

/// A single point in (local wall-clock) time with calendar arithmetic.
///
/// Every transformation returns a new value; nothing mutates in place, so the
/// same instant can back an anchor date, a hover preview and a committed value
/// at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue(NaiveDateTime);

/// Raw inputs a `DateValue` can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// No input: the current time
    Empty,
    /// An explicit instant, the preferred input
    Instant(NaiveDateTime),
    /// Text in one of the accepted ISO-8601 forms
    Text(&'a str),
    /// Unix timestamp in milliseconds
    Timestamp(i64),
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Self::Instant(value)
    }
}

impl From<Option<NaiveDateTime>> for DateInput<'_> {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Self::Empty, Self::Instant)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DateInput<'_> {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date input: {_0}")]
    InvalidInput(String),
    #[display(fmt = "Invalid month: {} (must be 0-{})", _0, MAX_MONTH0)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid year: {_0}")]
    InvalidYear(i32),
    #[display(fmt = "Invalid day {_0} for this month")]
    InvalidDay(u32),
    #[display(fmt = "Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },
    #[display(fmt = "Unknown granularity: {_0}")]
    UnknownGranularity(String),
    #[display(fmt = "Unknown panel mode: {_0}")]
    UnknownPanelMode(String),
}

impl std::error::Error for DateError {}

impl DateValue {
    /// Builds a value from any supported input.
    ///
    /// Text and numeric timestamps are accepted but discouraged; prefer an
    /// explicit instant.
    ///
    /// # Errors
    /// Returns `DateError::InvalidInput` if the text cannot be parsed or the
    /// timestamp is out of range.
    pub fn new<'a>(input: impl Into<DateInput<'a>>) -> Result<Self, DateError> {
        match input.into() {
            DateInput::Empty => Ok(Self::now()),
            DateInput::Instant(instant) => Ok(Self(instant)),
            DateInput::Text(text) if text.trim().is_empty() => Ok(Self::now()),
            DateInput::Text(text) => {
                tracing::warn!(input = text, "text date input is not recommended, pass an instant");
                text.parse()
            }
            DateInput::Timestamp(millis) => {
                tracing::warn!(millis, "numeric date input is not recommended, pass an instant");
                DateTime::from_timestamp_millis(millis)
                    .map(|utc| Self(utc.with_timezone(&Local).naive_local()))
                    .ok_or_else(|| DateError::InvalidInput(format!("timestamp {millis} out of range")))
            }
        }
    }

    /// The current local time.
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Wraps an optional instant, falling back to now.
    pub fn from_option(value: Option<NaiveDateTime>) -> Self {
        value.map_or_else(Self::now, Self)
    }

    #[inline]
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, starting from 0 for January
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    /// Day of the month, starting from 1
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Unix milliseconds of this wall-clock time in the local zone, `None`
    /// when the local time does not exist (e.g. skipped by a DST change).
    pub fn timestamp_millis(&self) -> Option<i64> {
        Local
            .from_local_datetime(&self.0)
            .earliest()
            .map(|local| local.timestamp_millis())
    }

    /// Replaces hour, minute and second, keeping the date and sub-second part.
    ///
    /// # Errors
    /// Returns `DateError::InvalidTime` if any component is out of range.
    pub fn set_hms(&self, hour: u32, minute: u32, second: u32) -> Result<Self, DateError> {
        if hour > MAX_HOUR || minute > MAX_MINUTE || second > MAX_MINUTE {
            return Err(DateError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        self.0
            .with_hour(hour)
            .and_then(|t| t.with_minute(minute))
            .and_then(|t| t.with_second(second))
            .map(Self)
            .ok_or(DateError::InvalidTime {
                hour,
                minute,
                second,
            })
    }

    /// Replaces the year, clamping Feb 29 to Feb 28 in a non-leap target.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the year is outside chrono's range.
    pub fn set_year(&self, year: i32) -> Result<Self, DateError> {
        self.with_year_month(year, self.0.month())
            .ok_or(DateError::InvalidYear(year))
    }

    /// Replaces the month (0-indexed), clamping the day to the target month's
    /// length so Jan 31 becomes Feb 28/29 rather than rolling into March.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if `month0` is greater than 11.
    pub fn set_month(&self, month0: u32) -> Result<Self, DateError> {
        if month0 > MAX_MONTH0 {
            return Err(DateError::InvalidMonth(month0));
        }
        self.with_year_month(self.0.year(), month0 + 1)
            .ok_or(DateError::InvalidMonth(month0))
    }

    /// Replaces the day of the month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the month has no such day.
    pub fn set_date(&self, day: u32) -> Result<Self, DateError> {
        self.0.with_day(day).map(Self).ok_or(DateError::InvalidDay(day))
    }

    fn with_year_month(&self, year: i32, month: u32) -> Option<Self> {
        let day = self.0.day().min(days_in_month(year, month));
        NaiveDate::from_ymd_opt(year, month, day).map(|date| Self(date.and_time(self.0.time())))
    }

    /// Shifts by whole years; saturates at the representable bounds.
    pub fn add_years(&self, amount: i32) -> Self {
        self.shift_months(i64::from(amount) * i64::from(MONTHS_IN_YEAR))
    }

    /// Shifts by whole months, clamping the day to the target month's length.
    pub fn add_months(&self, amount: i32) -> Self {
        self.shift_months(i64::from(amount))
    }

    fn shift_months(&self, amount: i64) -> Self {
        let months = Months::new(u32::try_from(amount.unsigned_abs()).unwrap_or(u32::MAX));
        let shifted = if amount >= 0 {
            self.0.checked_add_months(months)
        } else {
            self.0.checked_sub_months(months)
        };
        shifted.map_or_else(|| Self::saturated(amount >= 0), Self)
    }

    pub fn add_days(&self, amount: i64) -> Self {
        let days = Days::new(amount.unsigned_abs());
        let shifted = if amount >= 0 {
            self.0.checked_add_days(days)
        } else {
            self.0.checked_sub_days(days)
        };
        shifted.map_or_else(|| Self::saturated(amount >= 0), Self)
    }

    const fn saturated(forward: bool) -> Self {
        if forward {
            Self(NaiveDateTime::MAX)
        } else {
            Self(NaiveDateTime::MIN)
        }
    }

    /// Shifts by `amount` units of `mode`.
    ///
    /// Decades are ten years. Only decade, year and month are meaningful
    /// steps here; every finer granularity falls back to months.
    pub fn add(&self, amount: i32, mode: Granularity) -> Self {
        match mode {
            Granularity::Decade => self.add_years(amount.saturating_mul(DECADE_YEARS)),
            Granularity::Year => self.add_years(amount),
            Granularity::Month
            | Granularity::Day
            | Granularity::Hour
            | Granularity::Minute
            | Granularity::Second => self.add_months(amount),
        }
    }

    /// Whether both values fall in the same calendar unit of `grain`.
    ///
    /// Decade equality is loose: any two years less than 11 apart match.
    pub fn is_same(&self, other: &Self, grain: Granularity) -> bool {
        let (a, b) = (self.0, other.0);
        match grain {
            Granularity::Decade => (a.year() - b.year()).abs() < DECADE_SAME_THRESHOLD,
            Granularity::Year => a.year() == b.year(),
            Granularity::Month => a.year() == b.year() && a.month() == b.month(),
            Granularity::Day => a.date() == b.date(),
            Granularity::Hour => a.date() == b.date() && a.hour() == b.hour(),
            Granularity::Minute => {
                a.date() == b.date() && a.hour() == b.hour() && a.minute() == b.minute()
            }
            Granularity::Second => {
                a.date() == b.date()
                    && a.hour() == b.hour()
                    && a.minute() == b.minute()
                    && a.second() == b.second()
            }
        }
    }

    /// Midnight on the first day of this value's month.
    pub fn start_of_month(&self) -> Self {
        self.0
            .date()
            .with_day(1)
            .map_or(*self, |first| Self(first.and_time(chrono::NaiveTime::MIN)))
    }

    /// Midnight on the first cell of the month grid: the start of the week
    /// that contains the first day of the month.
    pub fn calendar_start(&self, week_start: WeekStart) -> Self {
        let first = self.start_of_month();
        let weekday = first.0.weekday().num_days_from_sunday();
        let back = (weekday + 7 - u32::from(week_start.get())) % 7;
        first.add_days(-i64::from(back))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.with_timezone(&Local).naive_local())
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(value: NaiveDate) -> Self {
        Self(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<DateValue> for NaiveDateTime {
    fn from(value: DateValue) -> Self {
        value.0
    }
}

impl TryFrom<&str> for DateValue {
    type Error = DateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for DateValue {
    type Error = DateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
    }
}

impl FromStr for DateValue {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::InvalidInput("empty date string".to_owned()));
        }

        for format in ACCEPTED_DATE_TIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(parsed));
            }
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, ACCEPTED_DATE_FORMAT) {
            return Ok(Self::from(parsed));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(Self::from)
            .map_err(|_| DateError::InvalidInput(trimmed.to_owned()))
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_new_from_instant_copies() {
        let instant = datetime(2024, 1, 10, 8, 30, 0).naive();
        let value = DateValue::new(instant).unwrap();
        assert_eq!(value.naive(), instant);
    }

    #[test]
    fn test_new_from_nothing_is_now() {
        let before = DateValue::now();
        let value = DateValue::new(DateInput::Empty).unwrap();
        let after = DateValue::now();
        assert!(before <= value && value <= after);

        let blank = DateValue::new("   ").unwrap();
        assert!(before <= blank);
    }

    #[test]
    fn test_new_from_text() {
        let value = DateValue::new("2024-01-10 08:30:15").unwrap();
        assert_eq!(value, datetime(2024, 1, 10, 8, 30, 15));

        let value = DateValue::new("2024-01-10").unwrap();
        assert_eq!(value, date(2024, 1, 10));

        let result = DateValue::new("not a date");
        assert!(matches!(result, Err(DateError::InvalidInput(_))));
    }

    #[test]
    fn test_new_from_timestamp() {
        assert!(DateValue::new(1_704_844_800_000_i64).is_ok());
        let result = DateValue::new(i64::MAX);
        assert!(matches!(result, Err(DateError::InvalidInput(_))));
    }

    #[test]
    fn test_timestamp_round_trip() {
        let value = datetime(2024, 1, 10, 8, 30, 0);
        let millis = value.timestamp_millis().unwrap();
        assert_eq!(DateValue::new(millis).unwrap(), value);
    }

    #[test]
    fn test_set_month_clamps_overflow() {
        let jan31 = date(2024, 1, 31);
        let feb = jan31.set_month(1).unwrap();
        assert_eq!(feb, date(2024, 2, 29));

        let jul31 = date(2018, 7, 31);
        assert_eq!(jul31.set_month(1).unwrap(), date(2018, 2, 28));

        assert!(matches!(jan31.set_month(12), Err(DateError::InvalidMonth(12))));
    }

    #[test]
    fn test_set_month_lands_in_target_month() {
        for day in [1, 15, 28, 29, 30, 31] {
            let base = date(2023, 1, day);
            for month0 in 0..12 {
                let moved = base.set_month(month0).unwrap();
                assert_eq!(moved.month0(), month0, "day {day} to month {month0}");
                assert_eq!(moved.year(), 2023);
            }
        }
    }

    #[test]
    fn test_set_year_preserves_other_fields() {
        let value = datetime(2024, 2, 29, 13, 45, 10);
        let moved = value.set_year(2023).unwrap();
        assert_eq!(moved, datetime(2023, 2, 28, 13, 45, 10));

        let moved = value.set_year(2028).unwrap();
        assert_eq!(moved, datetime(2028, 2, 29, 13, 45, 10));
    }

    #[test]
    fn test_set_hms() {
        let value = date(2024, 3, 5);
        assert_eq!(value.set_hms(23, 59, 58).unwrap(), datetime(2024, 3, 5, 23, 59, 58));
        assert!(matches!(value.set_hms(24, 0, 0), Err(DateError::InvalidTime { .. })));
        assert!(matches!(value.set_hms(0, 60, 0), Err(DateError::InvalidTime { minute: 60, .. })));
        assert!(matches!(value.set_hms(0, 0, 60), Err(DateError::InvalidTime { second: 60, .. })));
        // the receiver is untouched
        assert_eq!(value, date(2024, 3, 5));
    }

    #[test]
    fn test_add_months_clamps_end_of_month() {
        assert_eq!(date(2024, 1, 31).add_months(1), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).add_months(1), date(2023, 2, 28));
        assert_eq!(date(2024, 3, 31).add_months(-1), date(2024, 2, 29));
        assert_eq!(date(2024, 11, 15).add_months(3), date(2025, 2, 15));
    }

    #[test]
    fn test_add_months_inverse_without_clamping() {
        let base = date(2024, 5, 15);
        for n in -30..30 {
            let back = base.add_months(n).add_months(-n);
            assert!(back.is_same(&base, Granularity::Month), "n = {n}");
        }
    }

    #[test]
    fn test_add_years() {
        assert_eq!(date(2024, 2, 29).add_years(1), date(2025, 2, 28));
        assert_eq!(date(2024, 6, 1).add_years(-4), date(2020, 6, 1));
    }

    #[test]
    fn test_add_by_mode() {
        let base = date(2024, 6, 15);
        assert_eq!(base.add(1, Granularity::Decade), date(2034, 6, 15));
        assert_eq!(base.add(-1, Granularity::Year), date(2023, 6, 15));
        assert_eq!(base.add(2, Granularity::Month), date(2024, 8, 15));
        // finer granularities fall back to months
        assert_eq!(base.add(1, Granularity::Day), date(2024, 7, 15));
    }

    #[test]
    fn test_add_saturates() {
        let far = date(2024, 1, 1).add_years(i32::MAX);
        assert_eq!(far.naive(), NaiveDateTime::MAX);
    }

    #[test]
    fn test_is_same_reflexive() {
        let value = datetime(2024, 7, 4, 12, 30, 45);
        for grain in [
            Granularity::Decade,
            Granularity::Year,
            Granularity::Month,
            Granularity::Day,
            Granularity::Hour,
            Granularity::Minute,
            Granularity::Second,
        ] {
            assert!(value.is_same(&value, grain), "{grain}");
        }
    }

    #[test]
    fn test_is_same_grains() {
        let a = datetime(2024, 7, 4, 12, 30, 45);
        assert!(a.is_same(&datetime(2024, 7, 4, 12, 30, 59), Granularity::Minute));
        assert!(!a.is_same(&datetime(2024, 7, 4, 12, 31, 45), Granularity::Minute));
        assert!(a.is_same(&datetime(2024, 7, 4, 0, 0, 0), Granularity::Day));
        assert!(!a.is_same(&datetime(2023, 7, 4, 12, 30, 45), Granularity::Month));
        assert!(a.is_same(&date(2024, 1, 1), Granularity::Year));
    }

    #[test]
    fn test_is_same_decade_is_loose() {
        let a = date(2019, 1, 1);
        // adjacent decade buckets still match within ten years
        assert!(a.is_same(&date(2020, 1, 1), Granularity::Decade));
        assert!(a.is_same(&date(2029, 1, 1), Granularity::Decade));
        assert!(!a.is_same(&date(2030, 1, 1), Granularity::Decade));
    }

    #[test]
    fn test_calendar_start() {
        // 2024-03-01 is a Friday
        let march = date(2024, 3, 15);
        assert_eq!(march.calendar_start(WeekStart::MONDAY), date(2024, 2, 26));
        assert_eq!(march.calendar_start(WeekStart::SUNDAY), date(2024, 2, 25));
        // 2024-09-01 is a Sunday
        assert_eq!(date(2024, 9, 20).calendar_start(WeekStart::SUNDAY), date(2024, 9, 1));
    }

    #[test]
    fn test_display_and_parse() {
        let value = datetime(2024, 1, 10, 8, 5, 0);
        assert_eq!(value.to_string(), "2024-01-10T08:05:00");
        assert_eq!("2024-01-10T08:05:00".parse::<DateValue>().unwrap(), value);
    }

    #[test]
    fn test_serde() {
        let value = datetime(2024, 1, 10, 8, 5, 0);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""2024-01-10T08:05:00""#);
        let parsed: DateValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);

        let result: Result<DateValue, _> = serde_json::from_str(r#""2024-13-01""#);
        assert!(result.is_err());
    }
}
