//! Decade → year → month → date drill-down state for one calendar panel.

use crate::{CENTURY_YEARS, DECADE_YEARS, DateError, DateValue, NavDirection, PanelMode, RangeSide};

/// What a pick on a navigator resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The pick was coarser than the picker's mode: the panel drilled down.
    Drilled { anchor: DateValue, mode: PanelMode },
    /// The pick reached the picker's mode and selects this value.
    Commit(DateValue),
}

/// Navigation state for one panel: which table is shown and which date it is
/// centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelNavigator {
    picker_mode: PanelMode,
    mode:        PanelMode,
    anchor:      DateValue,
}

impl PanelNavigator {
    /// A navigator showing `picker_mode`'s table, centered on `anchor`.
    pub const fn new(picker_mode: PanelMode, anchor: DateValue) -> Self {
        Self {
            picker_mode,
            mode: picker_mode,
            anchor,
        }
    }

    pub const fn mode(&self) -> PanelMode {
        self.mode
    }

    pub const fn picker_mode(&self) -> PanelMode {
        self.picker_mode
    }

    pub const fn anchor(&self) -> DateValue {
        self.anchor
    }

    pub const fn set_anchor(&mut self, anchor: DateValue) {
        self.anchor = anchor;
    }

    /// Switches the shown table, e.g. when a header label is clicked.
    pub fn set_mode(&mut self, mode: PanelMode) {
        tracing::trace!(from = %self.mode, to = %mode, "panel mode changed");
        self.mode = mode;
    }

    /// Returns to the picker's own table, e.g. after a selection commits.
    pub fn reset_mode(&mut self) {
        self.mode = self.picker_mode;
    }

    /// Picks a decade cell: drilling re-anchors on its year.
    ///
    /// A commit leaves the panel untouched; the owner re-anchors once the
    /// value is accepted. The same holds for every pick below.
    ///
    /// # Errors
    /// Propagates `DateError::InvalidYear` from re-anchoring.
    pub fn pick_decade(&mut self, value: &DateValue) -> Result<NavOutcome, DateError> {
        let anchor = self.anchor.set_year(value.year())?;
        Ok(self.resolve(PanelMode::Decade, *value, anchor))
    }

    /// Picks a year cell: drilling re-anchors on that year.
    ///
    /// # Errors
    /// Propagates `DateError::InvalidYear` from re-anchoring.
    pub fn pick_year(&mut self, value: &DateValue) -> Result<NavOutcome, DateError> {
        let anchor = self.anchor.set_year(value.year())?;
        Ok(self.resolve(PanelMode::Year, *value, anchor))
    }

    /// Picks a month cell: drilling re-anchors on that month.
    ///
    /// # Errors
    /// Propagates `DateError` from re-anchoring.
    pub fn pick_month(&mut self, value: &DateValue) -> Result<NavOutcome, DateError> {
        let anchor = self.anchor.set_year(value.year())?.set_month(value.month0())?;
        Ok(self.resolve(PanelMode::Month, *value, anchor))
    }

    /// Picks a day cell. Days are terminal and always commit.
    pub const fn pick_date(value: &DateValue) -> NavOutcome {
        NavOutcome::Commit(*value)
    }

    fn resolve(&mut self, unit: PanelMode, value: DateValue, anchor: DateValue) -> NavOutcome {
        match unit.finer() {
            Some(finer) if unit < self.picker_mode => {
                self.anchor = anchor;
                self.set_mode(finer);
                NavOutcome::Drilled { anchor, mode: finer }
            },
            _ => NavOutcome::Commit(value),
        }
    }

    /// Years or months one arrow press moves the anchor by, as `(years, months)`.
    const fn step(mode: PanelMode, superior: bool) -> (i32, i32) {
        match (mode, superior) {
            (PanelMode::Decade, false) => (DECADE_YEARS, 0),
            (PanelMode::Decade, true) => (CENTURY_YEARS, 0),
            (PanelMode::Year, false) => (1, 0),
            (PanelMode::Year, true) => (DECADE_YEARS, 0),
            (PanelMode::Month | PanelMode::Date, false) => (0, 1),
            (PanelMode::Month | PanelMode::Date, true) => (1, 0),
        }
    }

    fn shift(&mut self, direction: NavDirection, superior: bool) -> DateValue {
        let sign = match direction {
            NavDirection::Previous => -1,
            NavDirection::Next => 1,
        };
        let (years, months) = Self::step(self.mode, superior);
        self.anchor = self.anchor.add_years(sign * years).add_months(sign * months);
        self.anchor
    }

    /// One unit back at the current table's granularity.
    pub fn previous(&mut self) -> DateValue {
        self.shift(NavDirection::Previous, false)
    }

    pub fn next(&mut self) -> DateValue {
        self.shift(NavDirection::Next, false)
    }

    /// One unit back at the next-coarser granularity.
    pub fn super_previous(&mut self) -> DateValue {
        self.shift(NavDirection::Previous, true)
    }

    pub fn super_next(&mut self) -> DateValue {
        self.shift(NavDirection::Next, true)
    }

    /// Whether an arrow should be offered on `side` of a dual range picker.
    ///
    /// The inner-facing arrows (start panel's next, end panel's previous) are
    /// hidden while both panels show the same table and no time panel is in
    /// play, so manual navigation cannot push the panels into overlap.
    pub fn enable_prev_next(
        &self,
        direction: NavDirection,
        side: Option<RangeSide>,
        other_mode: Option<PanelMode>,
        show_time: bool,
    ) -> bool {
        let inner_facing = matches!(
            (side, direction),
            (Some(RangeSide::Start), NavDirection::Next) | (Some(RangeSide::End), NavDirection::Previous)
        );
        !(!show_time && other_mode == Some(self.mode) && inner_facing)
    }

    /// First and last year shown by the year or decade table header.
    pub fn header_span(&self) -> Option<(i32, i32)> {
        let year = self.anchor.year();
        match self.mode {
            PanelMode::Year => {
                let start = year - year.rem_euclid(DECADE_YEARS);
                Some((start, start + DECADE_YEARS - 1))
            },
            PanelMode::Decade => {
                let start = year - year.rem_euclid(CENTURY_YEARS);
                Some((start, start + CENTURY_YEARS - 1))
            },
            PanelMode::Month | PanelMode::Date => None,
        }
    }
}
