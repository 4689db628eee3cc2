//! Selection state for a single-value date picker.

use std::rc::Rc;

use tracing::debug;

use crate::{
    CellContext, ChronoLocale, DateCell, DateError, DateLocale, DateValue, DisabledDateFn, DisabledTimeFn,
    DisabledTimePartial, Emitter, NavOutcome, PanelMode, PanelNavigator, PickerConfig, RangeSide, TimeConfig,
    date_cells, decade_cells, get_time_config, is_allowed_date, month_cells, override_hms, parse_input, year_cells,
};

/// Notifications a `DatePicker` sends to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEvent {
    /// The pending value changed; it is not committed yet
    ValueChange(Option<DateValue>),
    /// The panel is now centered on this date
    AnchorChange(DateValue),
    PanelModeChange(PanelMode),
    /// The value was accepted, the overlay can close
    Commit(Option<DateValue>),
    /// The OK button confirmed the value
    Ok(Option<DateValue>),
}

/// A single-value picker: pending value, last committed value and the
/// navigation state of its one panel.
pub struct DatePicker<L = ChronoLocale> {
    config:        PickerConfig,
    value:         Option<DateValue>,
    committed:     Option<DateValue>,
    navigator:     PanelNavigator,
    disabled_date: Option<Rc<DisabledDateFn>>,
    disabled_time: Option<Rc<DisabledTimeFn>>,
    locale:        L,
    events:        Emitter<DateEvent>,
}

impl DatePicker {
    pub fn new(config: PickerConfig, value: Option<DateValue>) -> Self {
        let locale = ChronoLocale::new(config.week_start);
        Self::with_locale(config, value, locale)
    }
}

impl<L: DateLocale> DatePicker<L> {
    pub fn with_locale(config: PickerConfig, value: Option<DateValue>, locale: L) -> Self {
        let anchor = value.unwrap_or_else(DateValue::now);
        Self {
            navigator: PanelNavigator::new(config.mode, anchor),
            config,
            value,
            committed: value,
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

    #[must_use]
    pub fn with_disabled_time(
        mut self,
        rule: impl Fn(Option<&DateValue>, Option<RangeSide>) -> DisabledTimePartial + 'static,
    ) -> Self {
        self.disabled_time = Some(Rc::new(rule));
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DateEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn value(&self) -> Option<DateValue> {
        self.value
    }

    pub const fn committed(&self) -> Option<DateValue> {
        self.committed
    }

    pub const fn navigator(&self) -> &PanelNavigator {
        &self.navigator
    }

    pub fn is_allowed(&self, value: Option<&DateValue>) -> bool {
        let rules: Vec<&DisabledDateFn> = self.disabled_date.as_deref().into_iter().collect();
        is_allowed_date(value, &rules, self.disabled_time.as_deref(), None)
    }

    /// Makes `value` the pending value if it is allowed, committing it right
    /// away when `emit` is set. Returns whether the value was taken.
    pub fn select_date(&mut self, value: DateValue, emit: bool) -> bool {
        if !self.is_allowed(Some(&value)) {
            debug!(%value, "date selection rejected");
            return false;
        }
        self.value = Some(value);
        self.navigator.set_anchor(value);
        self.events.emit(&DateEvent::ValueChange(self.value));
        if emit {
            self.commit();
        }
        true
    }

    /// Applies the time of day of `time` to the pending value (or today).
    ///
    /// # Errors
    /// Propagates `DateError::InvalidTime` from replacing the time.
    pub fn select_time(&mut self, time: &DateValue) -> Result<bool, DateError> {
        let value = override_hms(time, self.value.as_ref())?;
        Ok(self.select_date(value, false))
    }

    /// Confirms the pending value. Returns `false` if it is not selectable.
    pub fn click_ok(&mut self) -> bool {
        if !self.is_allowed(self.value.as_ref()) {
            debug!("ok ignored, pending value is not selectable");
            return false;
        }
        self.commit();
        self.events.emit(&DateEvent::Ok(self.value));
        true
    }

    pub fn click_today(&mut self, now: DateValue) -> bool {
        self.select_date(now, true)
    }

    /// # Errors
    /// Propagates `DateError` from re-anchoring the panel.
    pub fn pick_decade(&mut self, value: &DateValue) -> Result<bool, DateError> {
        let outcome = self.navigator.pick_decade(value)?;
        Ok(self.apply(outcome))
    }

    /// # Errors
    /// Propagates `DateError` from re-anchoring the panel.
    pub fn pick_year(&mut self, value: &DateValue) -> Result<bool, DateError> {
        let outcome = self.navigator.pick_year(value)?;
        Ok(self.apply(outcome))
    }

    /// # Errors
    /// Propagates `DateError` from re-anchoring the panel.
    pub fn pick_month(&mut self, value: &DateValue) -> Result<bool, DateError> {
        let outcome = self.navigator.pick_month(value)?;
        Ok(self.apply(outcome))
    }

    pub fn pick_date(&mut self, value: &DateValue) -> bool {
        self.apply(PanelNavigator::pick_date(value))
    }

    fn apply(&mut self, outcome: NavOutcome) -> bool {
        match outcome {
            NavOutcome::Drilled { anchor, mode } => {
                self.events.emit(&DateEvent::AnchorChange(anchor));
                self.events.emit(&DateEvent::PanelModeChange(mode));
                true
            },
            // with a time panel the day only stages the value until OK
            NavOutcome::Commit(value) => self.select_date(value, !self.config.show_time),
        }
    }

    pub fn previous(&mut self) -> DateValue {
        let anchor = self.navigator.previous();
        self.events.emit(&DateEvent::AnchorChange(anchor));
        anchor
    }

    pub fn next(&mut self) -> DateValue {
        let anchor = self.navigator.next();
        self.events.emit(&DateEvent::AnchorChange(anchor));
        anchor
    }

    pub fn super_previous(&mut self) -> DateValue {
        let anchor = self.navigator.super_previous();
        self.events.emit(&DateEvent::AnchorChange(anchor));
        anchor
    }

    pub fn super_next(&mut self) -> DateValue {
        let anchor = self.navigator.super_next();
        self.events.emit(&DateEvent::AnchorChange(anchor));
        anchor
    }

    pub fn change_panel_mode(&mut self, mode: PanelMode) {
        self.navigator.set_mode(mode);
        self.events.emit(&DateEvent::PanelModeChange(mode));
    }

    /// Handles text typed into the input. Blank text clears the value.
    ///
    /// Text that does not parse with the input pattern, or parses to a
    /// disabled date, is ignored and `false` is returned. `is_enter` commits.
    pub fn input_text(&mut self, text: &str, is_enter: bool) -> bool {
        if text.trim().is_empty() {
            self.value = None;
            self.events.emit(&DateEvent::ValueChange(None));
            if is_enter {
                self.commit();
            }
            return true;
        }
        match parse_input(text, self.config.input_format(), &self.locale) {
            Some(value) => self.select_date(value, is_enter),
            None => false,
        }
    }

    pub fn time_config(&self) -> TimeConfig {
        get_time_config(self.value.as_ref(), self.disabled_time.as_deref(), None)
    }

    /// Text shown in the input for the committed value.
    pub fn display_text(&self) -> String {
        self.committed
            .map(|value| self.locale.format(&value, self.config.input_format()))
            .unwrap_or_default()
    }

    /// Cells of the table the panel currently shows.
    pub fn cells(&self, today: Option<DateValue>) -> Vec<Vec<DateCell>> {
        let ctx = CellContext {
            value: self.value,
            disabled_date: self.disabled_date.as_deref(),
            today,
            ..CellContext::default()
        };
        let anchor = self.navigator.anchor();
        match self.navigator.mode() {
            PanelMode::Decade => decade_cells(&anchor, &ctx),
            PanelMode::Year => year_cells(&anchor, &ctx, &self.locale),
            PanelMode::Month => month_cells(&anchor, &ctx, &self.locale),
            PanelMode::Date => date_cells(&anchor, &ctx, &self.locale),
        }
    }

    /// Overlay closed: keeps a selectable pending value, otherwise reverts.
    pub fn close(&mut self) {
        if self.value != self.committed {
            if self.is_allowed(self.value.as_ref()) {
                self.commit();
            } else {
                self.revert();
            }
        }
        self.navigator.reset_mode();
    }

    pub fn cancel(&mut self) {
        self.revert();
        self.navigator.reset_mode();
    }

    /// Sets the value from outside, e.g. a form binding. No events are sent.
    pub fn write_value(&mut self, value: Option<DateValue>) {
        self.value = value;
        self.committed = value;
        if let Some(value) = value {
            self.navigator.set_anchor(value);
        }
    }

    fn commit(&mut self) {
        self.committed = self.value;
        self.navigator.reset_mode();
        debug!(value = ?self.value, "date selection committed");
        self.events.emit(&DateEvent::Commit(self.value));
    }

    fn revert(&mut self) {
        if self.value == self.committed {
            return;
        }
        debug!(pending = ?self.value, committed = ?self.committed, "reverting to committed date");
        self.value = self.committed;
        self.events.emit(&DateEvent::ValueChange(self.value));
    }
}
