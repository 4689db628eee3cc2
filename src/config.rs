use serde::{Deserialize, Serialize};

use crate::{
    DATE_FORMAT, DATE_TIME_INPUT_FORMAT, DEFAULT_PREFIX_CLASS, MONTH_FORMAT, PanelMode, WeekStart, YEAR_FORMAT,
};

/// Construction-time settings shared by the single and range pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Finest panel the user picks in; reaching it commits a selection.
    pub mode:         PanelMode,
    /// Whether a time-of-day panel is layered on top of the date panel.
    pub show_time:    bool,
    /// Inline pickers are always open and never close on commit.
    pub inline:       bool,
    /// Class prefix for the presentation layer.
    pub prefix_class: String,
    /// Input/display pattern override, in chrono strftime syntax.
    pub format:       Option<String>,
    pub week_start:   WeekStart,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode:         PanelMode::Date,
            show_time:    false,
            inline:       false,
            prefix_class: DEFAULT_PREFIX_CLASS.to_owned(),
            format:       None,
            week_start:   WeekStart::default(),
        }
    }
}

impl PickerConfig {
    pub fn with_mode(mode: PanelMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The pattern typed input is parsed and displayed with.
    pub fn input_format(&self) -> &str {
        if let Some(format) = &self.format {
            return format;
        }
        match self.mode {
            PanelMode::Decade | PanelMode::Year => YEAR_FORMAT,
            PanelMode::Month => MONTH_FORMAT,
            PanelMode::Date if self.show_time => DATE_TIME_INPUT_FORMAT,
            PanelMode::Date => DATE_FORMAT,
        }
    }

    /// Class name for a panel, e.g. `ant-picker-date-panel`.
    pub fn panel_class(&self, mode: PanelMode) -> String {
        format!("{}-{mode}-panel", self.prefix_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.mode, PanelMode::Date);
        assert_eq!(config.prefix_class, "ant-picker");
        assert_eq!(config.input_format(), "%Y-%m-%d");
        assert_eq!(config.panel_class(PanelMode::Month), "ant-picker-month-panel");
    }

    #[test]
    fn test_input_format_by_mode() {
        struct TestCase {
            mode:      PanelMode,
            show_time: bool,
            expected:  &'static str,
        }

        let cases = [
            TestCase {
                mode:      PanelMode::Year,
                show_time: false,
                expected:  "%Y",
            },
            TestCase {
                mode:      PanelMode::Month,
                show_time: false,
                expected:  "%Y-%m",
            },
            TestCase {
                mode:      PanelMode::Date,
                show_time: true,
                expected:  "%Y-%m-%d %H:%M:%S",
            },
        ];

        for case in &cases {
            let config = PickerConfig {
                show_time: case.show_time,
                ..PickerConfig::with_mode(case.mode)
            };
            assert_eq!(config.input_format(), case.expected);
        }

        let custom = PickerConfig {
            format: Some("%d/%m/%Y".to_owned()),
            ..PickerConfig::default()
        };
        assert_eq!(custom.input_format(), "%d/%m/%Y");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"mode": "month", "week_start": 0, "prefix_class": "my-picker"}"#).unwrap();
        assert_eq!(config.mode, PanelMode::Month);
        assert_eq!(config.week_start, WeekStart::SUNDAY);
        assert_eq!(config.prefix_class, "my-picker");
        assert!(!config.show_time);

        let bad: Result<PickerConfig, _> = serde_json::from_str(r#"{"week_start": 8}"#);
        assert!(bad.is_err());
    }
}
