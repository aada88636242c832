//! Date and time utility functions
//!
//! This module handles the timestamps exchanged with the GitHub API: parsing the
//! account creation date and building the per-year contribution windows.

use chrono::{DateTime, Datelike, Local, NaiveDateTime};

/// Parse an ISO-8601 timestamp and return its year
///
/// Accepts RFC 3339 timestamps with a trailing `Z` or a numeric offset, as well
/// as naive timestamps without any offset marker.
///
/// # Arguments
/// * `timestamp` - Timestamp such as `2015-03-07T18:22:41Z`
///
/// # Returns
/// * `Result<i32, chrono::ParseError>` - Year component or parse error
pub fn parse_year(timestamp: &str) -> Result<i32, chrono::ParseError> {
    let trimmed = timestamp.trim();
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => Ok(dt.year()),
        Err(rfc_err) => NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
            .map(|dt| dt.year())
            .map_err(|_| rfc_err),
    }
}

/// Current calendar year in local time
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Inclusive UTC window covering a whole calendar year
///
/// # Returns
/// * `(String, String)` - `YYYY-01-01T00:00:00Z` and `YYYY-12-31T23:59:59Z`
pub fn year_window(year: i32) -> (String, String) {
    (format!("{year:04}-01-01T00:00:00Z"), format!("{year:04}-12-31T23:59:59Z"))
}
