//! Incremental-fetch watermark

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::{ConfigError, StateError};
use crate::output::formatters::format_iso8601;

/// Findings created at or after this instant have not been ingested yet.
///
/// Persisted as `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00`. Advancing never moves
/// the cursor backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(DateTime<Utc>);

impl Cursor {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The cursor one millisecond after `created_at`.
    pub fn past(created_at: DateTime<Utc>) -> Self {
        Self(created_at + Duration::milliseconds(1))
    }

    /// Move the cursor past `created_at` if that is later than the current position.
    pub fn advance_past(self, created_at: DateTime<Utc>) -> Self {
        self.max(Self::past(created_at))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_iso8601(&self.0))
    }
}

impl FromStr for Cursor {
    type Err = StateError;

    /// Accepts RFC 3339 timestamps and offset-less ISO timestamps (read as UTC).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| StateError::InvalidTimestamp(s.to_string()))
    }
}

/// Resolve the first-fetch setting into a start instant.
///
/// Accepts a relative span (`"15 days"`, `"3 hours"`, `"30 minutes"`,
/// `"2 weeks"`) counted back from `now`, or an absolute ISO timestamp.
pub fn first_fetch_start(setting: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ConfigError> {
    if let Ok(cursor) = setting.parse::<Cursor>() {
        return Ok(cursor.instant());
    }

    let invalid = || ConfigError::Invalid(format!("unrecognized first_fetch value {:?}", setting));

    let mut parts = setting.split_whitespace();
    let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let amount: i64 = amount.parse().map_err(|_| invalid())?;
    if amount < 0 {
        return Err(invalid());
    }

    let span = match unit.trim_end_matches('s').to_ascii_lowercase().as_str() {
        "minute" => Duration::try_minutes(amount),
        "hour" => Duration::try_hours(amount),
        "day" => Duration::try_days(amount),
        "week" => Duration::try_weeks(amount),
        _ => None,
    }
    .ok_or_else(invalid)?;

    now.checked_sub_signed(span).ok_or_else(invalid)
}
