//! Calendar-unit comparisons between dates.
//!
//! The `is_before_*` predicates compare calendar periods, not instants, so
//! the time of day never affects a day-level answer.

use crate::{DateError, DateValue};
use chrono::Datelike;

/// `a`'s year is strictly earlier than `b`'s.
pub fn is_before_year(a: &DateValue, b: &DateValue) -> bool {
    a.year() < b.year()
}

/// `a`'s calendar month is strictly earlier than `b`'s.
pub fn is_before_month(a: &DateValue, b: &DateValue) -> bool {
    (a.year(), a.month0()) < (b.year(), b.month0())
}

/// `a`'s calendar day is strictly earlier than `b`'s.
pub fn is_before_day(a: &DateValue, b: &DateValue) -> bool {
    a.date().num_days_from_ce() < b.date().num_days_from_ce()
}

/// Same instant, or both unset.
pub fn is_same_date(previous: Option<&DateValue>, current: Option<&DateValue>) -> bool {
    previous == current
}

/// Position-wise `is_same_date` over `current`; missing positions in
/// `previous` count as unset.
pub fn is_same_range(previous: &[Option<DateValue>], current: &[Option<DateValue>]) -> bool {
    current
        .iter()
        .enumerate()
        .all(|(index, value)| is_same_date(previous.get(index).and_then(Option::as_ref), value.as_ref()))
}

/// Takes `old` (or now) and replaces its hour, minute and second with `new`'s.
///
/// # Errors
/// Never fails for components read from a valid `DateValue`; the `Result`
/// carries `set_hms` validation through.
pub fn override_hms(new: &DateValue, old: Option<&DateValue>) -> Result<DateValue, DateError> {
    let base = old.copied().unwrap_or_else(DateValue::now);
    base.set_hms(new.hour(), new.minute(), new.second())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_is_before_day_ignores_time() {
        let late = datetime(2024, 1, 10, 23, 59, 59);
        let early_next = datetime(2024, 1, 11, 0, 0, 0);
        assert!(is_before_day(&late, &early_next));
        assert!(!is_before_day(&early_next, &late));

        let morning = datetime(2024, 1, 10, 1, 0, 0);
        assert!(!is_before_day(&morning, &late));
        assert!(!is_before_day(&late, &morning));
    }

    #[test]
    fn test_is_before_month() {
        assert!(is_before_month(&date(2023, 12, 31), &date(2024, 1, 1)));
        assert!(!is_before_month(&date(2024, 1, 1), &date(2024, 1, 31)));
        assert!(is_before_month(&date(2024, 1, 31), &date(2024, 2, 1)));
    }

    #[test]
    fn test_is_before_year() {
        assert!(is_before_year(&date(2023, 12, 31), &date(2024, 1, 1)));
        assert!(!is_before_year(&date(2024, 1, 1), &date(2024, 12, 31)));
    }

    #[test]
    fn test_is_same_date() {
        let a = date(2024, 1, 10);
        assert!(is_same_date(Some(&a), Some(&date(2024, 1, 10))));
        assert!(!is_same_date(Some(&a), Some(&datetime(2024, 1, 10, 0, 0, 1))));
        assert!(is_same_date(None, None));
        assert!(!is_same_date(Some(&a), None));
    }

    #[test]
    fn test_is_same_range() {
        let a = date(2024, 1, 10);
        let b = date(2024, 2, 1);
        assert!(is_same_range(&[Some(a), Some(b)], &[Some(a), Some(b)]));
        assert!(!is_same_range(&[Some(a), None], &[Some(a), Some(b)]));
        assert!(is_same_range(&[], &[None, None]));
        assert!(!is_same_range(&[Some(a)], &[Some(b)]));
    }

    #[test]
    fn test_override_hms() {
        let time = datetime(1999, 9, 9, 14, 15, 16);
        let base = date(2024, 1, 10);
        let result = override_hms(&time, Some(&base)).unwrap();
        assert_eq!(result, datetime(2024, 1, 10, 14, 15, 16));
        // the inputs are not touched
        assert_eq!(base, date(2024, 1, 10));

        let from_now = override_hms(&time, None).unwrap();
        assert_eq!((from_now.hour(), from_now.minute(), from_now.second()), (14, 15, 16));
    }
}
