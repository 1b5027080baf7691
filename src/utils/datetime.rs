//! Date and time utility functions
//!
//! Taiga sends plain dates (sprint bounds, due dates) as `YYYY-MM-DD`.

use chrono::NaiveDate;

/// Date format used by the Taiga API for plain dates
pub const TAIGA_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(TAIGA_DATE_FORMAT).to_string()
}

/// Format a sprint's date range, e.g. "Jan 15 - Jan 29" or with years
/// when the range crosses into another year.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    use chrono::Datelike;

    if start.year() == end.year() {
        format!("{} - {}", start.format("%b %d"), end.format("%b %d"))
    } else {
        format!("{} - {}", start.format("%b %d, %Y"), end.format("%b %d, %Y"))
    }
}
