//! Timestamp canonicalization shared by both normalizer branches.

use crate::error::{MacroPlanError, MacroPlanResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike};

/// Datetime layouts without an offset, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Parse a timestamp in any of the layouts the two calendar formats
/// produce and re-render it as an ISO-8601 string.
///
/// Offset-carrying inputs (RFC 3339, compact ICS UTC forms like
/// `20240501T080000Z`) stay timezone-aware; naive inputs stay naive;
/// date-only inputs resolve to midnight.
pub fn canonicalize_timestamp(raw: &str) -> MacroPlanResult<String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false));
    }

    // Compact ICS UTC form: a naive layout with a trailing Z
    if let Some(stripped) = raw.strip_suffix('Z') {
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, format) {
                return Ok(dt.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, false));
            }
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(format_naive(dt));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
            // unwrap safe: midnight always exists
            return Ok(format_naive(d.and_hms_opt(0, 0, 0).unwrap()));
        }
    }

    Err(MacroPlanError::MalformedInput(format!(
        "Unparseable timestamp: {raw}"
    )))
}

fn format_naive(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_offset_preserved() {
        assert_eq!(
            canonicalize_timestamp("2024-05-01T08:00:00+02:00").unwrap(),
            "2024-05-01T08:00:00+02:00"
        );
    }

    #[test]
    fn test_utc_z_becomes_explicit_offset() {
        assert_eq!(
            canonicalize_timestamp("2024-05-01T08:00:00Z").unwrap(),
            "2024-05-01T08:00:00+00:00"
        );
    }

    #[test]
    fn test_compact_ics_utc_form() {
        assert_eq!(
            canonicalize_timestamp("20240501T080000Z").unwrap(),
            "2024-05-01T08:00:00+00:00"
        );
    }

    #[test]
    fn test_naive_datetime_stays_naive() {
        assert_eq!(
            canonicalize_timestamp("2024-05-01T08:00:00").unwrap(),
            "2024-05-01T08:00:00"
        );
    }

    #[test]
    fn test_compact_naive_datetime() {
        assert_eq!(
            canonicalize_timestamp("20240501T080000").unwrap(),
            "2024-05-01T08:00:00"
        );
    }

    #[test]
    fn test_date_only_resolves_to_midnight() {
        assert_eq!(
            canonicalize_timestamp("2024-05-01").unwrap(),
            "2024-05-01T00:00:00"
        );
        assert_eq!(
            canonicalize_timestamp("20240501").unwrap(),
            "2024-05-01T00:00:00"
        );
    }

    #[test]
    fn test_fractional_seconds_kept() {
        assert_eq!(
            canonicalize_timestamp("2024-05-01T08:00:00.250").unwrap(),
            "2024-05-01T08:00:00.250"
        );
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            canonicalize_timestamp("  2024-05-01  ").unwrap(),
            "2024-05-01T00:00:00"
        );
    }

    #[test]
    fn test_garbage_is_malformed_input() {
        let err = canonicalize_timestamp("not-a-date").unwrap_err();
        match err {
            MacroPlanError::MalformedInput(reason) => {
                assert!(reason.contains("not-a-date"), "Got: {}", reason);
            }
            other => panic!("Expected MalformedInput, got {:?}", other),
        }
    }
}
