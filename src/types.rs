use crate::DateError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar precision at which two dates are compared or by which a date is shifted.
///
/// Variants are ordered from coarsest to finest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[display(fmt = "decade")]
    Decade,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

impl FromStr for Granularity {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decade" => Ok(Self::Decade),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" | "date" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            _ => Err(DateError::UnknownGranularity(s.to_owned())),
        }
    }
}

/// Which calendar table a panel is showing.
///
/// Variants are ordered from coarsest to finest; `Date` is the terminal state.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[display(fmt = "decade")]
    Decade,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[default]
    #[display(fmt = "date")]
    Date,
}

impl PanelMode {
    /// The next finer panel, or `None` for the terminal date panel.
    pub const fn finer(self) -> Option<Self> {
        match self {
            Self::Decade => Some(Self::Year),
            Self::Year => Some(Self::Month),
            Self::Month => Some(Self::Date),
            Self::Date => None,
        }
    }

    /// Granularity used to keep the two panels of a range picker apart.
    ///
    /// A date panel shows a month, so neighbouring panels differ by a month;
    /// a month panel shows a year, and so on. The decade panel has no parent
    /// and falls back to month steps.
    pub const fn parent_granularity(self) -> Granularity {
        match self {
            Self::Date | Self::Decade => Granularity::Month,
            Self::Month => Granularity::Year,
            Self::Year => Granularity::Decade,
        }
    }

    /// Granularity at which a cell of this panel is selected.
    pub const fn cell_granularity(self) -> Granularity {
        match self {
            Self::Decade => Granularity::Decade,
            Self::Year => Granularity::Year,
            Self::Month => Granularity::Month,
            Self::Date => Granularity::Day,
        }
    }
}

impl FromStr for PanelMode {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decade" => Ok(Self::Decade),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "date" | "day" => Ok(Self::Date),
            _ => Err(DateError::UnknownPanelMode(s.to_owned())),
        }
    }
}

/// One end of a two-ended range.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RangeSide {
    #[default]
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

impl RangeSide {
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }
}

/// Direction of a header navigation arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NavDirection {
    #[display(fmt = "previous")]
    Previous,
    #[display(fmt = "next")]
    Next,
}

/// First day of the week, `0..=6` with 0 meaning Sunday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Into, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{_0}")]
pub struct WeekStart(u8);

impl WeekStart {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);

    /// Creates a new `WeekStart`, validating that it names a weekday.
    ///
    /// # Errors
    /// Returns `DateError::InvalidInput` if the value is greater than 6.
    pub fn new(value: u8) -> Result<Self, DateError> {
        if value > 6 {
            return Err(DateError::InvalidInput(format!(
                "first day of week must be 0-6, got {value}"
            )));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The matching chrono weekday.
    pub const fn weekday(self) -> chrono::Weekday {
        match self.0 {
            0 => chrono::Weekday::Sun,
            1 => chrono::Weekday::Mon,
            2 => chrono::Weekday::Tue,
            3 => chrono::Weekday::Wed,
            4 => chrono::Weekday::Thu,
            5 => chrono::Weekday::Fri,
            _ => chrono::Weekday::Sat,
        }
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        Self::MONDAY
    }
}

impl TryFrom<u8> for WeekStart {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a 1-indexed month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("decade".parse::<Granularity>().unwrap(), Granularity::Decade);
        assert_eq!(" Month ".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!("date".parse::<Granularity>().unwrap(), Granularity::Day);
        assert!(matches!(
            "fortnight".parse::<Granularity>(),
            Err(DateError::UnknownGranularity(_))
        ));
    }

    #[test]
    fn test_granularity_ordering() {
        assert!(Granularity::Decade < Granularity::Year);
        assert!(Granularity::Day < Granularity::Second);
    }

    #[test]
    fn test_panel_mode_display_and_parse() {
        for mode in [
            PanelMode::Decade,
            PanelMode::Year,
            PanelMode::Month,
            PanelMode::Date,
        ] {
            assert_eq!(mode.to_string().parse::<PanelMode>().unwrap(), mode);
        }
        assert!("week".parse::<PanelMode>().is_err());
    }

    #[test]
    fn test_panel_mode_finer() {
        assert_eq!(PanelMode::Decade.finer(), Some(PanelMode::Year));
        assert_eq!(PanelMode::Year.finer(), Some(PanelMode::Month));
        assert_eq!(PanelMode::Month.finer(), Some(PanelMode::Date));
        assert_eq!(PanelMode::Date.finer(), None);
    }

    #[test]
    fn test_panel_mode_parent_granularity() {
        assert_eq!(PanelMode::Date.parent_granularity(), Granularity::Month);
        assert_eq!(PanelMode::Month.parent_granularity(), Granularity::Year);
        assert_eq!(PanelMode::Year.parent_granularity(), Granularity::Decade);
        assert_eq!(PanelMode::Decade.parent_granularity(), Granularity::Month);
    }

    #[test]
    fn test_range_side_other() {
        assert_eq!(RangeSide::Start.other(), RangeSide::End);
        assert_eq!(RangeSide::End.other(), RangeSide::Start);
        assert_eq!(RangeSide::End.index(), 1);
    }

    #[test]
    fn test_week_start_validation() {
        assert!(WeekStart::new(0).is_ok());
        assert!(WeekStart::new(6).is_ok());
        assert!(matches!(WeekStart::new(7), Err(DateError::InvalidInput(_))));
        assert_eq!(WeekStart::default().weekday(), chrono::Weekday::Mon);
        assert_eq!(WeekStart::SUNDAY.weekday(), chrono::Weekday::Sun);
        assert_eq!(*WeekStart::MONDAY, 1);
        assert_eq!(u8::from(WeekStart::SUNDAY), 0);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PanelMode::Month).unwrap();
        assert_eq!(json, r#""month""#);
        let side: RangeSide = serde_json::from_str(r#""end""#).unwrap();
        assert_eq!(side, RangeSide::End);
        let start: Result<WeekStart, _> = serde_json::from_str("9");
        assert!(start.is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
