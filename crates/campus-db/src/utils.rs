//! Shared utility functions

use chrono::{DateTime, Utc};

/// Parse a datetime string (RFC3339 format) or return current time
///
/// This helper is used throughout the database layer to handle datetime parsing
/// with a fallback to the current time if parsing fails.
pub fn parse_datetime_or_now(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an optional datetime column (soft-delete markers are nullable)
pub fn parse_optional_datetime(s: Option<&str>) -> Option<DateTime<Utc>> {
    s.and_then(|v| {
        chrono::DateTime::parse_from_rfc3339(v)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}
