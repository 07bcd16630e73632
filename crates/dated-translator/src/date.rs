//! Calendar date parsing for interval bounds and query dates.

use chrono::NaiveDate;

/// Textual format of every date in a dataset (ISO 8601 calendar date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// Only the zero-padded four-digit-year form is accepted; chrono alone would
/// also take `2020-1-5` or `+2020-01-05`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !is_iso_date_shape(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
