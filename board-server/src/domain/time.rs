//! Timestamps and the compact board time format.
//!
//! The provider sends scheduled times as RFC 3339 strings carrying the
//! station's UTC offset. We keep that offset so that formatting shows the
//! station's local wall clock, whatever timezone the server runs in.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};

/// An instant together with the offset the provider reported it in.
pub type Timestamp = DateTime<FixedOffset>;

/// Error returned when parsing an invalid timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

/// Parse a provider timestamp.
///
/// Accepts RFC 3339 (`2023-01-01T12:00:00-05:00`). A string with no offset
/// (`2023-01-01T12:00:00`) is read as UTC.
///
/// # Examples
///
/// ```
/// use board_server::domain::parse_timestamp;
///
/// let t = parse_timestamp("2023-01-01T12:00:00-05:00").unwrap();
/// assert_eq!(t.offset().local_minus_utc(), -5 * 3600);
///
/// let t = parse_timestamp("2023-01-01T12:00:00").unwrap();
/// assert_eq!(t.offset().local_minus_utc(), 0);
///
/// assert!(parse_timestamp("noon").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<Timestamp, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError {
            input: s.to_string(),
            reason: "empty string",
        });
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t);
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| TimeError {
            input: s.to_string(),
            reason: "expected RFC 3339 date-time",
        })
}

/// Single-letter meridiem: `a` for any hour before noon, `p` otherwise.
pub fn format_meridiem<Tz: TimeZone>(t: &DateTime<Tz>) -> char {
    if t.hour() < 12 { 'a' } else { 'p' }
}

/// Format a time the way station boards print it: `4:30p`, `12:05a`.
///
/// Hours are on a 12-hour clock without padding; minutes are two digits.
///
/// # Examples
///
/// ```
/// use board_server::domain::{format_board_time, parse_timestamp};
///
/// let t = parse_timestamp("2023-01-01T14:15:00-05:00").unwrap();
/// assert_eq!(format_board_time(&t), "2:15p");
///
/// let t = parse_timestamp("2023-01-01T00:05:00-05:00").unwrap();
/// assert_eq!(format_board_time(&t), "12:05a");
/// ```
pub fn format_board_time<Tz>(t: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{}{}", t.format("%-I:%M"), format_meridiem(t))
}

/// Format a "last updated" stamp: `4:30pm`.
pub fn format_updated_at<Tz>(t: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    t.format("%-I:%M%P").to_string()
}
