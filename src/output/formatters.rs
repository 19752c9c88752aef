//! Reusable formatting utilities for CLI output
//!
//! Timestamps are rendered the way the incident platform stores them:
//! `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00`, with the fractional part only when
//! it is non-zero.

use chrono::{DateTime, Timelike, Utc};

/// Format a UTC instant as an ISO-8601 string with an explicit offset.
///
/// # Example output
/// - `2020-03-22T13:22:13.934000+00:00`
/// - `2022-01-01T12:00:00+00:00`
pub fn format_iso8601(dt: &DateTime<Utc>) -> String {
    let micros = dt.nanosecond() % 1_000_000_000 / 1_000;
    if micros == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
    } else {
        format!("{}.{:06}+00:00", dt.format("%Y-%m-%dT%H:%M:%S"), micros)
    }
}

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Placeholder for absent optional values in tables.
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("--")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_iso8601_whole_seconds() {
        let dt = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_iso8601(&dt), "2022-01-01T12:00:00+00:00");
    }

    #[test]
    fn test_format_iso8601_millis_as_micros() {
        let dt = DateTime::parse_from_rfc3339("2020-03-22T13:22:13.934Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_iso8601(&dt), "2020-03-22T13:22:13.934000+00:00");
    }

    #[test]
    fn test_format_iso8601_drops_sub_micro_precision() {
        let dt = DateTime::parse_from_rfc3339("2020-03-22T13:22:13.000000500Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_iso8601(&dt), "2020-03-22T13:22:13+00:00");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a much longer title", 10), "a much ...");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("x")), "x");
        assert_eq!(or_dash(Some("")), "--");
        assert_eq!(or_dash(None), "--");
    }
}
