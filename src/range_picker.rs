//! Two-ended range selection.
//!
//! Ends are picked one at a time. Once the first end is committed, the other
//! end is constrained so the range can never invert: a start may not fall
//! after the chosen end, and an end may not fall before the chosen start.
//! When both ends are checked and the pair validates, the range commits.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    CellContext, ChronoLocale, DateCell, DateError, DateLocale, DateRange, DateValue, DisabledDateFn,
    DisabledTimeFn, DisabledTimePartial, Emitter, NavDirection, NavOutcome, PanelMode, PanelNavigator, PickerConfig,
    RangeSide, TimeConfig, date_cells, decade_cells, get_time_config, is_allowed_date, is_before_day, month_cells,
    normalize_range_value, override_hms, year_cells,
};

/// Payload of a calendar change: one freshly picked end, or the whole range
/// once both ends are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarChange {
    Partial(DateValue),
    Complete(DateRange),
}

/// Notifications a `RangePicker` sends to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEvent {
    /// The pending range changed
    ValueChange(DateRange),
    CalendarChange(CalendarChange),
    /// The end the next pick lands on
    ActiveSideChange(RangeSide),
    PanelModeChange([PanelMode; 2]),
    /// The two panels are now centered on these dates
    AnchorChange([DateValue; 2]),
    /// The range was accepted, the overlay can close
    Commit(DateRange),
    Ok(DateRange),
}

/// Limit one end places on the other: picks for `side` must not cross
/// `pivot` at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CrossBound {
    side:  RangeSide,
    pivot: DateValue,
}

impl CrossBound {
    fn disallows(&self, candidate: &DateValue) -> bool {
        match self.side {
            RangeSide::Start => is_before_day(&self.pivot, candidate),
            RangeSide::End => is_before_day(candidate, &self.pivot),
        }
    }
}

pub struct RangePicker<L = ChronoLocale> {
    config:               PickerConfig,
    value:                DateRange,
    committed:            DateRange,
    checked:              [bool; 2],
    hover:                DateRange,
    active_side:          RangeSide,
    first_active_side:    RangeSide,
    inner:                Option<CrossBound>,
    navigators:           [PanelNavigator; 2],
    default_picker_value: Option<DateValue>,
    disabled_date:        Option<Rc<DisabledDateFn>>,
    disabled_time:        Option<Rc<DisabledTimeFn>>,
    locale:               L,
    events:               Emitter<RangeEvent>,
}

impl RangePicker {
    pub fn new(config: PickerConfig, value: DateRange) -> Self {
        let locale = ChronoLocale::new(config.week_start);
        Self::with_locale(config, value, locale)
    }
}

impl<L: DateLocale> RangePicker<L> {
    pub fn with_locale(config: PickerConfig, value: DateRange, locale: L) -> Self {
        let [start, end] = normalize_range_value(
            &value,
            config.show_time,
            config.mode.parent_granularity(),
            RangeSide::Start,
        );
        Self {
            navigators: [
                PanelNavigator::new(config.mode, start),
                PanelNavigator::new(config.mode, end),
            ],
            config,
            value,
            committed: value,
            checked: [false; 2],
            hover: DateRange::empty(),
            active_side: RangeSide::Start,
            first_active_side: RangeSide::Start,
            inner: None,
            default_picker_value: None,
            disabled_date: None,
            disabled_time: None,
            locale,
            events: Emitter::new(),
        }
    }

    #[must_use]
    pub fn with_disabled_date(mut self, rule: impl Fn(&DateValue) -> bool + 'static) -> Self {
        self.disabled_date = Some(Rc::new(rule));
        self
    }

    /// The rule is called with the end it is checking, so start and end may
    /// disable different times.
    #[must_use]
    pub fn with_disabled_time(
        mut self,
        rule: impl Fn(Option<&DateValue>, Option<RangeSide>) -> DisabledTimePartial + 'static,
    ) -> Self {
        self.disabled_time = Some(Rc::new(rule));
        self
    }

    /// Date the panels open on while the range is empty.
    #[must_use]
    pub fn with_default_picker_value(mut self, value: DateValue) -> Self {
        self.default_picker_value = Some(value);
        self.sync_anchors(RangeSide::Start);
        self
    }

    /// Which end the first pick lands on.
    #[must_use]
    pub fn with_first_active_side(mut self, side: RangeSide) -> Self {
        self.active_side = side;
        self.first_active_side = side;
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&RangeEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn value(&self) -> DateRange {
        self.value
    }

    pub const fn committed(&self) -> DateRange {
        self.committed
    }

    pub const fn hover(&self) -> DateRange {
        self.hover
    }

    pub const fn checked(&self) -> [bool; 2] {
        self.checked
    }

    pub const fn active_side(&self) -> RangeSide {
        self.active_side
    }

    pub const fn navigator(&self, side: RangeSide) -> &PanelNavigator {
        &self.navigators[side.index()]
    }

    pub fn anchors(&self) -> [DateValue; 2] {
        self.navigators.map(|navigator| navigator.anchor())
    }

    /// Whether `candidate` may be picked for `side`, including the limit the
    /// other end currently places on it.
    pub fn is_one_allowed(&self, candidate: &DateValue, side: RangeSide) -> bool {
        let bound = self.inner.filter(|bound| bound.side == side);
        let overlay = move |date: &DateValue| bound.is_some_and(|bound| bound.disallows(date));
        let mut rules: Vec<&DisabledDateFn> = self.disabled_date.as_deref().into_iter().collect();
        rules.push(&overlay);
        is_allowed_date(Some(candidate), &rules, self.disabled_time.as_deref(), Some(side))
    }

    /// Whether both ends are set, each selectable for its side, and in order.
    pub fn is_allowed(&self, range: &DateRange) -> bool {
        let Some((start, end)) = range.both() else {
            return false;
        };
        let rules: Vec<&DisabledDateFn> = self.disabled_date.as_deref().into_iter().collect();
        let disabled_time = self.disabled_time.as_deref();
        is_allowed_date(Some(&start), &rules, disabled_time, Some(RangeSide::Start))
            && is_allowed_date(Some(&end), &rules, disabled_time, Some(RangeSide::End))
            && !is_before_day(&end, &start)
    }

    /// Picks `value` for the active end.
    ///
    /// A disallowed candidate is ignored and `false` returned. Otherwise the
    /// end is set and checked. Without `emit` that is all: the pick is staged
    /// until `click_ok`. With `emit` the other end is cleared if it no longer
    /// fits, then a fully checked valid range commits, or focus moves to the
    /// other end.
    pub fn select_date(&mut self, value: DateValue, emit: bool) -> bool {
        let side = self.active_side;
        if !self.is_one_allowed(&value, side) {
            debug!(%value, %side, "range selection rejected");
            return false;
        }

        self.value.set(side, Some(value));
        self.checked[side.index()] = true;
        self.hover = self.value;

        let next = side.other();
        if emit {
            let bound = CrossBound {
                side:  next,
                pivot: value,
            };
            let invalidated = self.value.get(next).is_some_and(|other| bound.disallows(&other));
            if invalidated || (self.config.inline && next == RangeSide::End) {
                self.value.set(next, None);
                self.checked[next.index()] = false;
            }
        }
        self.events.emit(&RangeEvent::ValueChange(self.value));
        self.set_inner_disabled(next);

        if !emit {
            return true;
        }
        if self.checked.iter().all(|checked| *checked) && self.is_allowed(&self.value) {
            self.hover = DateRange::empty();
            self.events.emit(&RangeEvent::CalendarChange(CalendarChange::Complete(self.value)));
            self.commit();
        } else {
            self.events.emit(&RangeEvent::CalendarChange(CalendarChange::Partial(value)));
            self.set_active_side(next);
        }
        true
    }

    /// Recomputes the limit on `side` from the first-picked end.
    fn set_inner_disabled(&mut self, side: RangeSide) {
        let first = self.first_active_side;
        let pivot = self.value.get(first).filter(|_| side != first);
        if pivot.is_some_and(|pivot| self.is_one_allowed(&pivot, first)) {
            self.checked[first.index()] = true;
        }
        self.inner = pivot.map(|pivot| CrossBound { side, pivot });
    }

    /// Moves focus to `side`, e.g. when its input is clicked.
    pub fn set_active_side(&mut self, side: RangeSide) {
        if self.active_side != side {
            self.active_side = side;
            self.events.emit(&RangeEvent::ActiveSideChange(side));
        }
        self.set_inner_disabled(side);
    }

    /// Previews the range that picking `candidate` would produce.
    pub fn on_cell_hover(&mut self, candidate: &DateValue) -> bool {
        let side = self.active_side;
        if self.value.get(side.other()).is_none() || !self.is_one_allowed(candidate, side) {
            return false;
        }
        let mut preview = self.value;
        preview.set(side, Some(*candidate));
        self.hover = preview;
        true
    }

    pub fn clear_hover(&mut self) {
        self.hover = if self.value.is_complete() {
            DateRange::empty()
        } else {
            self.value
        };
    }

    pub fn hover_preset(&mut self, range: DateRange) {
        self.hover = range;
    }

    /// Applies a preset range and commits it if it validates.
    pub fn click_preset(&mut self, range: DateRange) -> bool {
        if !self.is_allowed(&range) {
            debug!(%range, "preset rejected");
            return false;
        }
        self.value = range;
        self.checked = [true; 2];
        self.hover = DateRange::empty();
        self.events.emit(&RangeEvent::ValueChange(range));
        self.sync_anchors(self.active_side);
        self.commit();
        true
    }

    /// Confirms the active end. Commits once both ends are confirmed,
    /// otherwise moves focus to the other end.
    pub fn click_ok(&mut self) -> bool {
        let side = self.active_side;
        let Some(value) = self.value.get(side) else {
            return false;
        };
        if !self.is_one_allowed(&value, side) {
            debug!(%value, %side, "ok ignored, end is not selectable");
            return false;
        }
        self.checked[side.index()] = true;
        if self.checked.iter().all(|checked| *checked) && self.is_allowed(&self.value) {
            self.hover = DateRange::empty();
            self.commit();
            self.events.emit(&RangeEvent::Ok(self.value));
        } else {
            self.set_active_side(side.other());
        }
        true
    }

    pub fn click_today(&mut self, now: DateValue) -> bool {
        self.select_date(now, true)
    }

    /// Applies the time of day of `time` to one end.
    ///
    /// # Errors
    /// Propagates `DateError::InvalidTime` from replacing the time.
    pub fn select_time(&mut self, time: &DateValue, side: RangeSide) -> Result<bool, DateError> {
        let value = override_hms(time, self.value.get(side).as_ref())?;
        if !self.is_one_allowed(&value, side) {
            debug!(%value, %side, "time selection rejected");
            return Ok(false);
        }
        self.value.set(side, Some(value));
        self.hover = self.value;
        self.events.emit(&RangeEvent::ValueChange(self.value));
        Ok(true)
    }

    /// # Errors
    /// Propagates `DateError` from re-anchoring the panel.
    pub fn pick_decade(&mut self, side: RangeSide, value: &DateValue) -> Result<bool, DateError> {
        let outcome = self.navigators[side.index()].pick_decade(value)?;
        Ok(self.apply(side, outcome))
    }

    /// # Errors
    /// Propagates `DateError` from re-anchoring the panel.
    pub fn pick_year(&mut self, side: RangeSide, value: &DateValue) -> Result<bool, DateError> {
        let outcome = self.navigators[side.index()].pick_year(value)?;
        Ok(self.apply(side, outcome))
    }

    /// # Errors
    /// Propagates `DateError` from re-anchoring the panel.
    pub fn pick_month(&mut self, side: RangeSide, value: &DateValue) -> Result<bool, DateError> {
        let outcome = self.navigators[side.index()].pick_month(value)?;
        Ok(self.apply(side, outcome))
    }

    /// Picks a day cell shown on `side`'s panel for the active end.
    pub fn pick_date(&mut self, side: RangeSide, value: &DateValue) -> bool {
        self.apply(side, PanelNavigator::pick_date(value))
    }

    fn apply(&mut self, side: RangeSide, outcome: NavOutcome) -> bool {
        match outcome {
            NavOutcome::Drilled { .. } => {
                self.events.emit(&RangeEvent::PanelModeChange(self.modes()));
                self.sync_panels(side);
                true
            },
            // with a time panel the day only stages the end until OK
            NavOutcome::Commit(value) => {
                if !self.select_date(value, !self.config.show_time) {
                    return false;
                }
                self.navigators[side.index()].set_anchor(value);
                // a pick on one panel must not drag that panel's anchor
                // away from what the other panel shows
                self.sync_panels(side);
                true
            },
        }
    }

    pub fn previous(&mut self, side: RangeSide) -> [DateValue; 2] {
        self.navigators[side.index()].previous();
        self.sync_panels(side)
    }

    pub fn next(&mut self, side: RangeSide) -> [DateValue; 2] {
        self.navigators[side.index()].next();
        self.sync_panels(side)
    }

    pub fn super_previous(&mut self, side: RangeSide) -> [DateValue; 2] {
        self.navigators[side.index()].super_previous();
        self.sync_panels(side)
    }

    pub fn super_next(&mut self, side: RangeSide) -> [DateValue; 2] {
        self.navigators[side.index()].super_next();
        self.sync_panels(side)
    }

    pub fn change_panel_mode(&mut self, side: RangeSide, mode: PanelMode) {
        self.navigators[side.index()].set_mode(mode);
        self.events.emit(&RangeEvent::PanelModeChange(self.modes()));
        self.sync_panels(side);
    }

    /// See [`PanelNavigator::enable_prev_next`].
    pub fn enable_prev_next(&self, side: RangeSide, direction: NavDirection) -> bool {
        let other = self.navigators[side.other().index()].mode();
        self.navigators[side.index()].enable_prev_next(direction, Some(side), Some(other), self.config.show_time)
    }

    pub fn time_config(&self, side: RangeSide) -> TimeConfig {
        get_time_config(self.value.get(side).as_ref(), self.disabled_time.as_deref(), Some(side))
    }

    /// Cells of the table `side`'s panel currently shows.
    pub fn cells(&self, side: RangeSide, today: Option<DateValue>) -> Vec<Vec<DateCell>> {
        let bound = self.inner.filter(|bound| bound.side == self.active_side);
        let overlay = move |date: &DateValue| bound.is_some_and(|bound| bound.disallows(date));
        let navigator = &self.navigators[side.index()];
        let ctx = CellContext {
            selected: Some(self.value),
            hover: Some(self.hover),
            disabled_date: self.disabled_date.as_deref(),
            inner_disabled_date: Some(&overlay),
            today,
            ..CellContext::default()
        };
        let anchor = navigator.anchor();
        match navigator.mode() {
            PanelMode::Decade => decade_cells(&anchor, &ctx),
            PanelMode::Year => year_cells(&anchor, &ctx, &self.locale),
            PanelMode::Month => month_cells(&anchor, &ctx, &self.locale),
            PanelMode::Date => date_cells(&anchor, &ctx, &self.locale),
        }
    }

    /// Starts a fresh interaction from the committed range, e.g. on open.
    pub fn reset(&mut self) {
        self.value = self.committed;
        self.reset_interaction();
        self.sync_anchors(self.first_active_side);
    }

    /// Overlay closed: keeps a valid pending range, otherwise reverts.
    pub fn close(&mut self) {
        if self.value != self.committed {
            if self.is_allowed(&self.value) {
                self.commit();
            } else {
                self.revert();
            }
        }
        self.reset_interaction();
    }

    pub fn cancel(&mut self) {
        self.revert();
        self.reset_interaction();
    }

    /// Empties and commits the range.
    pub fn clear(&mut self) {
        self.value = DateRange::empty();
        self.reset_interaction();
        self.events.emit(&RangeEvent::ValueChange(self.value));
        self.commit();
    }

    /// Sets the range from outside, e.g. a form binding. Only the panel
    /// anchors are announced.
    pub fn write_value(&mut self, range: DateRange) {
        self.value = range;
        self.committed = range;
        self.sync_anchors(self.active_side);
    }

    fn modes(&self) -> [PanelMode; 2] {
        self.navigators.map(|navigator| navigator.mode())
    }

    fn commit(&mut self) {
        self.committed = self.value;
        for navigator in &mut self.navigators {
            navigator.reset_mode();
        }
        debug!(range = %self.value, "range selection committed");
        self.events.emit(&RangeEvent::Commit(self.value));
    }

    fn revert(&mut self) {
        if self.value == self.committed {
            return;
        }
        debug!(pending = %self.value, committed = %self.committed, "reverting to committed range");
        self.value = self.committed;
        self.events.emit(&RangeEvent::ValueChange(self.value));
    }

    fn reset_interaction(&mut self) {
        self.checked = [false; 2];
        self.hover = DateRange::empty();
        self.active_side = self.first_active_side;
        self.inner = None;
        for navigator in &mut self.navigators {
            navigator.reset_mode();
        }
    }

    /// Re-derives both anchors from the selected range.
    fn sync_anchors(&mut self, side: RangeSide) -> [DateValue; 2] {
        let source = match (self.value.is_empty(), self.default_picker_value) {
            (true, Some(default)) => DateRange::only(RangeSide::Start, default),
            _ => self.value,
        };
        self.normalize_into_anchors(&source, side)
    }

    /// Re-derives both anchors after `side`'s panel moved, keeping that
    /// panel where it is.
    fn sync_panels(&mut self, side: RangeSide) -> [DateValue; 2] {
        let [start, end] = self.anchors();
        self.normalize_into_anchors(&DateRange::closed(start, end), side)
    }

    fn normalize_into_anchors(&mut self, source: &DateRange, side: RangeSide) -> [DateValue; 2] {
        let granularity = self.navigators[side.index()].mode().parent_granularity();
        let anchors = normalize_range_value(source, self.config.show_time, granularity, side);
        trace!(start = %anchors[0], end = %anchors[1], %granularity, "panel anchors normalized");
        for (navigator, anchor) in self.navigators.iter_mut().zip(anchors) {
            navigator.set_anchor(anchor);
        }
        self.events.emit(&RangeEvent::AnchorChange(anchors));
        anchors
    }
}
