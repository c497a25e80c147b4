//! Lenient timestamp parsing for measurement `loggedAt` values.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a wire timestamp into a naive datetime.
///
/// Accepts:
/// - RFC3339 datetime (offset dropped, local wall-clock kept)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS
/// - Date-only YYYY-MM-DD (time set to 00:00:00)
///
/// Returns `None` for anything else; callers treat that as a data-quality
/// problem, not an error.
pub fn parse_logged_at(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}
