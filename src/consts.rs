/// Years spanned by one decade step
pub const DECADE_YEARS: i32 = 10;

/// Years spanned by one century step (the decade panel's super step)
pub const CENTURY_YEARS: i32 = 100;

/// Two dates count as the same decade when their years differ by less than this
pub const DECADE_SAME_THRESHOLD: i32 = 11;

/// Months in a year, used to express year arithmetic as month arithmetic
pub const MONTHS_IN_YEAR: u32 = 12;

/// Last valid 0-indexed month (December)
pub const MAX_MONTH0: u32 = 11;

/// Last valid hour of day
pub const MAX_HOUR: u32 = 23;
/// Last valid minute / second
pub const MAX_MINUTE: u32 = 59;

/// Days in a week, also the column count of the date table
pub const DAYS_IN_WEEK: usize = 7;
/// Week rows rendered by the date table
pub const DATE_TABLE_ROWS: usize = 6;

/// Rows of the month, year and decade tables
pub const UNIT_TABLE_ROWS: usize = 4;
/// Columns of the month, year and decade tables
pub const UNIT_TABLE_COLS: usize = 3;

/// Default class prefix handed to the presentation layer
pub const DEFAULT_PREFIX_CLASS: &str = "ant-picker";

/// Canonical text form of a `DateValue`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Text forms accepted when parsing a `DateValue`, tried in order
pub const ACCEPTED_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
/// Date-only text form accepted when parsing a `DateValue`
pub const ACCEPTED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default input pattern for year and decade pickers
pub const YEAR_FORMAT: &str = "%Y";
/// Default input pattern for month pickers
pub const MONTH_FORMAT: &str = "%Y-%m";
/// Default input pattern for date pickers
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Default input pattern for date pickers with a time panel
pub const DATE_TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separates the two ends of a serialized range (ISO 8601 interval)
pub const RANGE_SEPARATOR: char = '/';
/// Stands in for an unset end of a serialized range (ISO 8601-2 open interval)
pub const OPEN_RANGE_END: &str = "..";
