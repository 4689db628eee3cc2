//! Cell models for the date, month, year and decade tables.
//!
//! Each builder walks the cells a table shows around an anchor date and
//! resolves the per-cell flags a renderer needs: disabled, selected, today,
//! and the range/hover highlighting used by range pickers.

use crate::{
    CENTURY_YEARS, DATE_TABLE_ROWS, DAYS_IN_WEEK, DECADE_YEARS, DateLocale, DateRange, DateValue, DisabledDateFn,
    Granularity, UNIT_TABLE_COLS, UNIT_TABLE_ROWS, is_before_day, is_before_month, is_before_year, is_disabled_decade,
    is_disabled_month, is_disabled_year,
};

/// Everything a table needs besides its anchor.
#[derive(Default)]
pub struct CellContext<'a> {
    /// The single value shown as selected
    pub value:               Option<DateValue>,
    /// Range pickers: the committed ends
    pub selected:            Option<DateRange>,
    /// Range pickers: the in-progress preview
    pub hover:               Option<DateRange>,
    pub disabled_date:       Option<&'a DisabledDateFn>,
    /// Range pickers: the cross-side overlay for the end being edited
    pub inner_disabled_date: Option<&'a DisabledDateFn>,
    /// Today's date; cells are compared against it at day granularity
    pub today:               Option<DateValue>,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCell {
    pub value:                DateValue,
    pub title:                String,
    pub content:              String,
    pub is_disabled:          bool,
    pub is_selected:          bool,
    pub is_today:             bool,
    /// Whether the cell belongs to the anchor's month (date table) or
    /// decade/century (year and decade tables)
    pub in_view:              bool,
    pub is_selected_start:    bool,
    pub is_selected_end:      bool,
    pub is_hover_start:       bool,
    pub is_hover_end:         bool,
    pub is_in_hover_range:    bool,
    pub is_in_selected_range: bool,
    pub is_start_single:      bool,
    pub is_end_single:        bool,
}

impl DateCell {
    fn new(value: DateValue, title: String, content: String) -> Self {
        Self {
            value,
            title,
            content,
            is_disabled: false,
            is_selected: false,
            is_today: false,
            in_view: true,
            is_selected_start: false,
            is_selected_end: false,
            is_hover_start: false,
            is_hover_end: false,
            is_in_hover_range: false,
            is_in_selected_range: false,
            is_start_single: false,
            is_end_single: false,
        }
    }
}

fn is_before(a: &DateValue, b: &DateValue, grain: Granularity) -> bool {
    match grain {
        Granularity::Decade => a.year().div_euclid(DECADE_YEARS) < b.year().div_euclid(DECADE_YEARS),
        Granularity::Year => is_before_year(a, b),
        Granularity::Month => is_before_month(a, b),
        Granularity::Day | Granularity::Hour | Granularity::Minute | Granularity::Second => is_before_day(a, b),
    }
}

fn same(a: Option<DateValue>, b: &DateValue, grain: Granularity) -> bool {
    a.is_some_and(|a| match grain {
        Granularity::Decade => a.year().div_euclid(DECADE_YEARS) == b.year().div_euclid(DECADE_YEARS),
        _ => a.is_same(b, grain),
    })
}

fn strictly_between(start: Option<DateValue>, cell: &DateValue, end: Option<DateValue>, grain: Granularity) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => is_before(&start, cell, grain) && is_before(cell, &end, grain),
        _ => false,
    }
}

fn apply_range_flags(cell: &mut DateCell, ctx: &CellContext<'_>, grain: Granularity) {
    let Some(selected) = ctx.selected else {
        cell.is_selected = same(ctx.value, &cell.value, grain);
        return;
    };
    let (start, end) = (selected.start(), selected.end());

    if same(start, &cell.value, grain) {
        cell.is_selected_start = true;
        cell.is_selected = true;
    }
    if same(end, &cell.value, grain) {
        cell.is_selected_end = true;
        cell.is_selected = true;
    }
    if let Some((hover_start, hover_end)) = ctx.hover.and_then(|hover| hover.both()) {
        cell.is_hover_start = same(Some(hover_start), &cell.value, grain);
        cell.is_hover_end = same(Some(hover_end), &cell.value, grain);
        cell.is_in_hover_range = strictly_between(Some(hover_start), &cell.value, Some(hover_end), grain);
    }
    cell.is_start_single = start.is_some() && end.is_none();
    cell.is_end_single = start.is_none() && end.is_some();
    cell.is_in_selected_range = strictly_between(start, &cell.value, end, grain);
}

/// The 6×7 day grid of the anchor's month, starting on the locale's first
/// day of the week.
pub fn date_cells(anchor: &DateValue, ctx: &CellContext<'_>, locale: &impl DateLocale) -> Vec<Vec<DateCell>> {
    let first = anchor.calendar_start(locale.first_day_of_week());
    (0..DATE_TABLE_ROWS)
        .map(|week| {
            (0..DAYS_IN_WEEK)
                .map(|weekday| {
                    let offset = week * DAYS_IN_WEEK + weekday;
                    let value = first.add_days(i64::try_from(offset).unwrap_or_default());
                    let mut cell =
                        DateCell::new(value, locale.format(&value, crate::DATE_FORMAT), value.day().to_string());
                    cell.in_view = value.is_same(anchor, Granularity::Month);
                    cell.is_today = same(ctx.today, &value, Granularity::Day);
                    cell.is_disabled = ctx.disabled_date.is_some_and(|disabled| disabled(&value))
                        || ctx.inner_disabled_date.is_some_and(|disabled| disabled(&value));
                    apply_range_flags(&mut cell, ctx, Granularity::Day);
                    cell
                })
                .collect()
        })
        .collect()
}

/// January to December of the anchor's year, in 4 rows of 3.
pub fn month_cells(anchor: &DateValue, ctx: &CellContext<'_>, locale: &impl DateLocale) -> Vec<Vec<DateCell>> {
    let cells = (0..UNIT_TABLE_ROWS * UNIT_TABLE_COLS)
        .filter_map(|month0| anchor.set_month(u32::try_from(month0).ok()?).ok())
        .map(|value| {
            let content = locale.format(&value, "%b");
            let mut cell = DateCell::new(value, content.clone(), content);
            cell.is_disabled = is_disabled_month(&value, ctx.disabled_date);
            apply_range_flags(&mut cell, ctx, Granularity::Month);
            cell
        });
    into_rows(cells)
}

/// Twelve years starting one before the anchor's decade, in 4 rows of 3.
pub fn year_cells(anchor: &DateValue, ctx: &CellContext<'_>, locale: &impl DateLocale) -> Vec<Vec<DateCell>> {
    let start_year = anchor.year() - anchor.year().rem_euclid(DECADE_YEARS);
    let cells = (0..UNIT_TABLE_ROWS * UNIT_TABLE_COLS)
        .filter_map(|offset| anchor.set_year(start_year - 1 + i32::try_from(offset).ok()?).ok())
        .map(|value| {
            let content = locale.format(&value, crate::YEAR_FORMAT);
            let mut cell = DateCell::new(value, content.clone(), content);
            cell.in_view = (start_year..start_year + DECADE_YEARS).contains(&value.year());
            cell.is_disabled = is_disabled_year(&value, ctx.disabled_date);
            apply_range_flags(&mut cell, ctx, Granularity::Year);
            cell
        });
    into_rows(cells)
}

/// Twelve decades starting one before the anchor's century, in 4 rows of 3.
pub fn decade_cells(anchor: &DateValue, ctx: &CellContext<'_>) -> Vec<Vec<DateCell>> {
    let start_year = anchor.year() - anchor.year().rem_euclid(CENTURY_YEARS);
    let cells = (0..UNIT_TABLE_ROWS * UNIT_TABLE_COLS)
        .filter_map(|offset| {
            let decade_start = start_year - DECADE_YEARS + i32::try_from(offset).ok()? * DECADE_YEARS;
            anchor.set_year(decade_start).ok()
        })
        .map(|value| {
            let label = format!("{}-{}", value.year(), value.year() + DECADE_YEARS - 1);
            let mut cell = DateCell::new(value, label.clone(), label);
            cell.in_view = (start_year..start_year + CENTURY_YEARS).contains(&value.year());
            cell.is_disabled = is_disabled_decade(&value, ctx.disabled_date);
            apply_range_flags(&mut cell, ctx, Granularity::Decade);
            cell
        });
    into_rows(cells)
}

fn into_rows(cells: impl Iterator<Item = DateCell>) -> Vec<Vec<DateCell>> {
    let cells: Vec<DateCell> = cells.collect();
    cells.chunks(UNIT_TABLE_COLS).map(<[DateCell]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use crate::{ChronoLocale, WeekStart};
    use chrono::{Datelike, Weekday};

    #[test]
    fn test_date_grid_shape_and_start() {
        let locale = ChronoLocale::new(WeekStart::MONDAY);
        let rows = date_cells(&date(2024, 3, 15), &CellContext::default(), &locale);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.len() == 7));
        assert_eq!(rows[0][0].value, date(2024, 2, 26));
        assert!(!rows[0][0].in_view);
        assert!(rows[0][4].in_view);
        assert_eq!(rows[0][4].content, "1");
        assert_eq!(rows[0][4].title, "2024-03-01");
    }

    #[test]
    fn test_date_cells_flags() {
        let locale = ChronoLocale::new(WeekStart::SUNDAY);
        let weekends: &DisabledDateFn = &|d| d.date().weekday() == Weekday::Sun;
        let ctx = CellContext {
            value: Some(date(2024, 9, 10)),
            disabled_date: Some(weekends),
            today: Some(date(2024, 9, 12)),
            ..CellContext::default()
        };
        let rows = date_cells(&date(2024, 9, 1), &ctx, &locale);
        // 2024-09-01 is a Sunday and starts the grid
        assert!(rows[0][0].is_disabled);
        assert!(!rows[0][1].is_disabled);
        assert!(rows[1][2].is_selected);
        assert!(rows[1][4].is_today);
    }

    #[test]
    fn test_date_cells_range_highlighting() {
        let locale = ChronoLocale::new(WeekStart::SUNDAY);
        let ctx = CellContext {
            selected: Some(DateRange::closed(date(2024, 9, 3), date(2024, 9, 6))),
            hover: Some(DateRange::closed(date(2024, 9, 3), date(2024, 9, 10))),
            ..CellContext::default()
        };
        let rows = date_cells(&date(2024, 9, 1), &ctx, &locale);
        let week = &rows[0];
        assert!(week[2].is_selected_start && week[2].is_selected);
        assert!(week[5].is_selected_end);
        assert!(week[3].is_in_selected_range && week[4].is_in_selected_range);
        assert!(!week[2].is_in_selected_range);
        assert!(week[2].is_hover_start);
        assert!(rows[1][2].is_hover_end);
        assert!(rows[1][1].is_in_hover_range);
        assert!(!week[2].is_start_single);
    }

    #[test]
    fn test_month_cells() {
        let locale = ChronoLocale::default();
        let march_off: &DisabledDateFn = &|d| d.month0() == 2;
        let ctx = CellContext {
            value: Some(date(2024, 5, 3)),
            disabled_date: Some(march_off),
            ..CellContext::default()
        };
        let rows = month_cells(&date(2024, 1, 31), &ctx, &locale);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][1].value, date(2024, 2, 29));
        assert_eq!(rows[0][2].content, "Mar");
        assert!(rows[0][2].is_disabled);
        assert!(!rows[1][0].is_disabled);
        assert!(rows[1][1].is_selected);
    }

    #[test]
    fn test_month_cells_single_start() {
        let locale = ChronoLocale::default();
        let ctx = CellContext {
            selected: Some(DateRange::new(Some(date(2024, 4, 1)), None)),
            ..CellContext::default()
        };
        let rows = month_cells(&date(2024, 1, 1), &ctx, &locale);
        assert!(rows[1][0].is_selected_start);
        assert!(rows[1][0].is_start_single);
    }

    #[test]
    fn test_year_cells() {
        let locale = ChronoLocale::default();
        let ctx = CellContext {
            value: Some(date(2025, 1, 1)),
            ..CellContext::default()
        };
        let rows = year_cells(&date(2024, 6, 1), &ctx, &locale);
        assert_eq!(rows[0][0].value.year(), 2019);
        assert!(!rows[0][0].in_view);
        assert!(rows[0][1].in_view);
        assert_eq!(rows[3][2].value.year(), 2030);
        assert!(!rows[3][2].in_view);
        assert!(rows[2][0].is_selected);
        assert_eq!(rows[2][0].content, "2025");
    }

    #[test]
    fn test_decade_cells() {
        let rows = decade_cells(&date(2024, 6, 1), &CellContext {
            value: Some(date(2023, 1, 1)),
            ..CellContext::default()
        });
        assert_eq!(rows[0][0].content, "1990-1999");
        assert!(!rows[0][0].in_view);
        assert_eq!(rows[1][0].content, "2020-2029");
        assert!(rows[1][0].is_selected);
        assert!(rows[1][0].in_view);
    }
}
