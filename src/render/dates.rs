//! Timestamp formatting for card footers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Mirrors a browser's en-US `toLocaleDateString() + ' ' + toLocaleTimeString()`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";

pub const UNKNOWN_DATE: &str = "Unknown date";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse the timestamp shapes the backend emits. Offsets are dropped: the
/// wall-clock time as written is what gets displayed.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_local());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a raw timestamp for display.
///
/// Absent or blank input yields [`UNKNOWN_DATE`]; input that does not parse
/// (or a `format` chrono rejects) yields the original string unchanged.
pub fn format_date(raw: Option<&str>, format: &str) -> String {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return UNKNOWN_DATE.to_string(),
    };
    let Some(dt) = parse_timestamp(raw) else {
        tracing::debug!(value = %raw, "unparseable date, showing raw value");
        return raw.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", dt.format(format)) {
        Ok(()) => out,
        Err(_) => {
            tracing::warn!(format = %format, "invalid date format string");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_timestamps() {
        assert_eq!(
            format_date(Some("2025-03-14T14:05:09"), DEFAULT_DATE_FORMAT),
            "3/14/2025 2:05:09 PM"
        );
        assert_eq!(
            format_date(Some("2025-03-14 09:05:09.123456"), DEFAULT_DATE_FORMAT),
            "3/14/2025 9:05:09 AM"
        );
    }

    #[test]
    fn keeps_wall_clock_of_offset_timestamps() {
        assert_eq!(
            format_date(Some("2025-01-02T23:30:00-08:00"), DEFAULT_DATE_FORMAT),
            "1/2/2025 11:30:00 PM"
        );
        assert_eq!(
            format_date(Some("Fri, 14 Mar 2025 14:05:09 GMT"), DEFAULT_DATE_FORMAT),
            "3/14/2025 2:05:09 PM"
        );
    }

    #[test]
    fn bare_dates_are_midnight() {
        assert_eq!(
            format_date(Some("2024-12-25"), DEFAULT_DATE_FORMAT),
            "12/25/2024 12:00:00 AM"
        );
    }

    #[test]
    fn malformed_falls_back_to_raw() {
        assert_eq!(format_date(Some("not-a-date"), DEFAULT_DATE_FORMAT), "not-a-date");
    }

    #[test]
    fn absent_is_unknown() {
        assert_eq!(format_date(None, DEFAULT_DATE_FORMAT), UNKNOWN_DATE);
        assert_eq!(format_date(Some("  "), DEFAULT_DATE_FORMAT), UNKNOWN_DATE);
    }

    #[test]
    fn custom_format() {
        assert_eq!(format_date(Some("2025-03-14T14:05:09Z"), "%Y-%m-%d"), "2025-03-14");
    }
}
