//! Disabled-date and disabled-time validation.
//!
//! A candidate is allowed when no disabled-date rule vetoes it and its time of
//! day clears the disabled-time rule. Time checks cascade: a disabled hour
//! vetoes before minutes are consulted, and minutes before seconds.

use crate::{DateValue, RangeSide};
use std::fmt;
use std::rc::Rc;

/// `true` means "not selectable".
pub type DisabledDateFn = dyn Fn(&DateValue) -> bool;

/// Produces the disabled hours/minutes/seconds for a date, optionally for one
/// end of a range.
pub type DisabledTimeFn = dyn Fn(Option<&DateValue>, Option<RangeSide>) -> DisabledTimePartial;

type HoursFn = Rc<dyn Fn() -> Vec<u32>>;
type MinutesFn = Rc<dyn Fn(u32) -> Vec<u32>>;
type SecondsFn = Rc<dyn Fn(u32, u32) -> Vec<u32>>;

/// Caller-supplied disabled-time rule result. Any field left unset means
/// nothing is disabled at that level.
#[derive(Clone, Default)]
pub struct DisabledTimePartial {
    hours:   Option<HoursFn>,
    minutes: Option<MinutesFn>,
    seconds: Option<SecondsFn>,
}

impl DisabledTimePartial {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hours(mut self, f: impl Fn() -> Vec<u32> + 'static) -> Self {
        self.hours = Some(Rc::new(f));
        self
    }

    /// Disabled minutes given the already chosen hour.
    #[must_use]
    pub fn minutes(mut self, f: impl Fn(u32) -> Vec<u32> + 'static) -> Self {
        self.minutes = Some(Rc::new(f));
        self
    }

    /// Disabled seconds given the already chosen hour and minute.
    #[must_use]
    pub fn seconds(mut self, f: impl Fn(u32, u32) -> Vec<u32> + 'static) -> Self {
        self.seconds = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for DisabledTimePartial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisabledTimePartial")
            .field("hours", &self.hours.is_some())
            .field("minutes", &self.minutes.is_some())
            .field("seconds", &self.seconds.is_some())
            .finish()
    }
}

/// A fully resolved disabled-time rule: every level is present.
#[derive(Clone)]
pub struct TimeConfig {
    hours:   HoursFn,
    minutes: MinutesFn,
    seconds: SecondsFn,
}

impl TimeConfig {
    pub fn disabled_hours(&self) -> Vec<u32> {
        (self.hours)()
    }

    pub fn disabled_minutes(&self, hour: u32) -> Vec<u32> {
        (self.minutes)(hour)
    }

    pub fn disabled_seconds(&self, hour: u32, minute: u32) -> Vec<u32> {
        (self.seconds)(hour, minute)
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            hours:   Rc::new(Vec::<u32>::new),
            minutes: Rc::new(|_: u32| Vec::<u32>::new()),
            seconds: Rc::new(|_: u32, _: u32| Vec::<u32>::new()),
        }
    }
}

impl From<DisabledTimePartial> for TimeConfig {
    fn from(partial: DisabledTimePartial) -> Self {
        let defaults = Self::default();
        Self {
            hours:   partial.hours.unwrap_or(defaults.hours),
            minutes: partial.minutes.unwrap_or(defaults.minutes),
            seconds: partial.seconds.unwrap_or(defaults.seconds),
        }
    }
}

impl fmt::Debug for TimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeConfig").finish_non_exhaustive()
    }
}

/// Resolves the disabled-time rule for `value`, merging whatever the rule
/// supplies over the "nothing disabled" baseline field by field.
pub fn get_time_config(
    value: Option<&DateValue>,
    disabled_time: Option<&DisabledTimeFn>,
    side: Option<RangeSide>,
) -> TimeConfig {
    disabled_time
        .map(|rule| rule(value, side))
        .unwrap_or_default()
        .into()
}

pub fn is_time_valid_by_config(value: &DateValue, config: &TimeConfig) -> bool {
    let (hour, minute, second) = (value.hour(), value.minute(), value.second());
    if config.disabled_hours().contains(&hour) {
        return false;
    }
    if config.disabled_minutes(hour).contains(&minute) {
        return false;
    }
    !config.disabled_seconds(hour, minute).contains(&second)
}

pub fn is_time_valid(value: &DateValue, disabled_time: &DisabledTimeFn, side: Option<RangeSide>) -> bool {
    let config = get_time_config(Some(value), Some(disabled_time), side);
    is_time_valid_by_config(value, &config)
}

/// Whether `value` may be selected.
///
/// Unset candidates are never allowed. Date rules are evaluated in order and
/// the first veto wins; the time rule runs only if every date rule passed.
pub fn is_allowed_date(
    value: Option<&DateValue>,
    disabled_dates: &[&DisabledDateFn],
    disabled_time: Option<&DisabledTimeFn>,
    side: Option<RangeSide>,
) -> bool {
    let Some(value) = value else {
        return false;
    };
    if disabled_dates.iter().any(|disabled| disabled(value)) {
        return false;
    }
    disabled_time.is_none_or(|rule| is_time_valid(value, rule, side))
}

/// A month is disabled only when every one of its days is.
pub fn is_disabled_month(month: &DateValue, disabled_date: Option<&DisabledDateFn>) -> bool {
    let Some(disabled) = disabled_date else {
        return false;
    };
    let first = month.start_of_month();
    all_days_disabled(first, |day| day.month0() == first.month0(), disabled)
}

/// A year is disabled only when every one of its days is.
pub fn is_disabled_year(year: &DateValue, disabled_date: Option<&DisabledDateFn>) -> bool {
    let Some(disabled) = disabled_date else {
        return false;
    };
    let Ok(first) = year.start_of_month().set_month(0) else {
        return false;
    };
    all_days_disabled(first, |day| day.year() == first.year(), disabled)
}

/// A decade cell is disabled only when every year it spans is.
pub fn is_disabled_decade(decade: &DateValue, disabled_date: Option<&DisabledDateFn>) -> bool {
    if disabled_date.is_none() {
        return false;
    }
    let start = decade.add_years(-decade.year().rem_euclid(crate::DECADE_YEARS));
    (0..crate::DECADE_YEARS).all(|offset| is_disabled_year(&start.add_years(offset), disabled_date))
}

fn all_days_disabled(
    first: DateValue,
    in_unit: impl Fn(&DateValue) -> bool,
    disabled: &DisabledDateFn,
) -> bool {
    let mut day = first;
    while in_unit(&day) {
        if !disabled(&day) {
            return false;
        }
        let next = day.add_days(1);
        if next == day {
            break;
        }
        day = next;
    }
    true
}
