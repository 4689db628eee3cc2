use std::{ops::Index, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DateError, DateValue, Granularity, OPEN_RANGE_END, RANGE_SEPARATOR, RangeSide};

/// A two-ended range whose ends may each be unset.
///
/// Ordering of the ends is not enforced here: picks arrive one end at a time
/// and the range coordinator decides when the pair is consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Option<DateValue>,
    end:   Option<DateValue>,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Error parsing one of the ends.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    pub const fn new(start: Option<DateValue>, end: Option<DateValue>) -> Self {
        Self { start, end }
    }

    /// A range with both ends set.
    pub const fn closed(start: DateValue, end: DateValue) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub const fn empty() -> Self {
        Self::new(None, None)
    }

    /// A range with only `side` set.
    pub fn only(side: RangeSide, value: DateValue) -> Self {
        let mut range = Self::empty();
        range.set(side, Some(value));
        range
    }

    pub const fn start(&self) -> Option<DateValue> {
        self.start
    }

    pub const fn end(&self) -> Option<DateValue> {
        self.end
    }

    pub const fn get(&self, side: RangeSide) -> Option<DateValue> {
        match side {
            RangeSide::Start => self.start,
            RangeSide::End => self.end,
        }
    }

    pub const fn set(&mut self, side: RangeSide, value: Option<DateValue>) {
        match side {
            RangeSide::Start => self.start = value,
            RangeSide::End => self.end = value,
        }
    }

    /// Both ends, when both are set.
    pub const fn both(&self) -> Option<(DateValue, DateValue)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// The ends as a position-indexed array.
    pub const fn to_array(&self) -> [Option<DateValue>; 2] {
        [self.start, self.end]
    }

    /// The set ends in order, dropping unset ones.
    pub fn values(&self) -> Vec<DateValue> {
        self.to_array().into_iter().flatten().collect()
    }
}

impl Index<RangeSide> for DateRange {
    type Output = Option<DateValue>;

    fn index(&self, side: RangeSide) -> &Self::Output {
        match side {
            RangeSide::Start => &self.start,
            RangeSide::End => &self.end,
        }
    }
}

impl From<(DateValue, DateValue)> for DateRange {
    fn from((start, end): (DateValue, DateValue)) -> Self {
        Self::closed(start, end)
    }
}

impl From<[Option<DateValue>; 2]> for DateRange {
    fn from([start, end]: [Option<DateValue>; 2]) -> Self {
        Self::new(start, end)
    }
}

/// Derives the pair of dates two side-by-side navigation panels are anchored on.
///
/// Unset ends are filled from the set one (or from now) one `granularity` step
/// apart, or zero steps apart when a time panel is shown. When both ends are
/// set and there is no time panel, the result is forced one step apart so the
/// panels never show the same or an inverted period: anchored on the start
/// when the ends share a period or the start is being edited, on the end
/// otherwise. The selected range itself is not touched.
pub fn normalize_range_value(
    value: &DateRange,
    has_time_picker: bool,
    granularity: Granularity,
    active_side: RangeSide,
) -> [DateValue; 2] {
    let step = |from: DateValue, amount: i32| {
        if has_time_picker {
            from
        } else {
            from.add(amount, granularity)
        }
    };

    match (value.start, value.end) {
        (None, None) => {
            let start = DateValue::now();
            [start, step(start, 1)]
        }
        (Some(start), None) => [start, step(start, 1)],
        (None, Some(end)) => [step(end, -1), end],
        (Some(start), Some(end)) if has_time_picker => [start, end],
        (Some(start), Some(end)) => {
            if start.is_same(&end, granularity) || active_side == RangeSide::Start {
                [start, start.add(1, granularity)]
            } else {
                [end.add(-1, granularity), end]
            }
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let end_text = |value: Option<DateValue>| value.map_or_else(|| OPEN_RANGE_END.to_owned(), |v| v.to_string());
        write!(f, "{}{RANGE_SEPARATOR}{}", end_text(self.start), end_text(self.end))
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let Some((start_str, end_str)) = trimmed.split_once(RANGE_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            )));
        };
        if end_str.contains(RANGE_SEPARATOR) {
            let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            )));
        }
        Ok(Self::new(parse_end(start_str)?, parse_end(end_str)?))
    }
}

fn parse_end(text: &str) -> Result<Option<DateValue>, RangeError> {
    let text = text.trim();
    if text.is_empty() || text == OPEN_RANGE_END {
        return Ok(None);
    }
    Ok(Some(text.parse::<DateValue>()?))
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
