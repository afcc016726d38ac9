//! TriggerTime value object and the iCalendar rule Folk expects for reminders.

use super::errors::ValidationError;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// A point in time supplied by the caller, normalized to UTC.
///
/// Accepts RFC 3339 (`2026-01-15T09:00:00Z`, `2026-01-15T01:00:00-08:00`) and,
/// leniently, a bare `2026-01-15T09:00:00` which is read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime(DateTime<Utc>);

impl TriggerTime {
    /// Parse a caller-supplied date-time.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
            .map(|naive| Self(naive.and_utc()))
            .map_err(|_| ValidationError::InvalidDateTime(value.to_string()))
    }

    /// RFC 3339 in UTC with a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// One-shot recurrence rule.
    ///
    /// Folk wants `TZID=UTC` on DTSTART rather than a `Z` suffix on the
    /// timestamp, and rejects an RRULE without FREQ.
    pub fn recurrence_rule(&self) -> String {
        format!(
            "DTSTART;TZID=UTC:{}\nRRULE:FREQ=DAILY;COUNT=1",
            self.0.format("%Y%m%dT%H%M%S")
        )
    }
}
