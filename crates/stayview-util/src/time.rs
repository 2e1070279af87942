//! Time utilities for stayview
//!
//! Provides the wall clock used when the caller does not inject a reference
//! instant, parsing of booking timestamps, calendar-day helpers, and the
//! absolute date formats shown on a reservation card.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `STAYVIEW_MOCK_TIME` environment variable can be set
//! to override the system time for all time-sensitive operations. This is
//! useful for checking how a list of bookings flips from upcoming to past.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! STAYVIEW_MOCK_TIME="2025-12-25 14:30:00" stayview --reservations bookings.json
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::{TimeParseError, TimeResult};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "STAYVIEW_MOCK_TIME";

/// Absolute format for stay dates: `Tue, May 14 2024`
pub const STAY_DATE_FORMAT: &str = "%a, %b %d %Y";

/// Absolute format for the booking creation time: `Tue, May 14 2024, 3:04 PM`
pub const BOOKED_AT_FORMAT: &str = "%a, %b %d %Y, %-I:%M %p";

/// Timestamp layouts with an explicit offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Timestamp layouts without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            let mock_time_str = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
            let Ok(naive_dt) = NaiveDateTime::parse_from_str(&mock_time_str, "%Y-%m-%d %H:%M:%S")
            else {
                tracing::warn!(
                    mock_time = %mock_time_str,
                    expected_format = "%Y-%m-%d %H:%M:%S",
                    "Invalid mock time format"
                );
                return None;
            };

            let Some(mock_dt) = Local.from_local_datetime(&naive_dt).single() else {
                tracing::warn!(
                    mock_time = %mock_time_str,
                    "Failed to convert mock time to local timezone"
                );
                return None;
            };

            let offset = mock_dt.signed_duration_since(chrono::Local::now());
            tracing::info!(
                mock_time = %mock_time_str,
                offset_secs = offset.num_seconds(),
                "Mock time enabled"
            );
            Some(offset)
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Parse a booking timestamp.
///
/// Accepts RFC 3339, ISO date-times with a short (`+00`) or long offset,
/// ISO date-times without an offset (read as UTC), and plain `YYYY-MM-DD`
/// dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> TimeResult<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| TimeParseError::timestamp(value))
}

/// Whether `instant` falls on the same calendar day as `reference`,
/// judged in the reference's time zone.
pub fn same_calendar_day<Tz: TimeZone>(instant: &DateTime<Utc>, reference: &DateTime<Tz>) -> bool {
    instant.with_timezone(&reference.timezone()).date_naive() == reference.date_naive()
}

/// Number of nights between check-in and check-out, counted in calendar days.
pub fn calendar_nights(start: &DateTime<Utc>, end: &DateTime<Utc>) -> i64 {
    end.date_naive()
        .signed_duration_since(start.date_naive())
        .num_days()
}

/// Format a stay date (check-in or check-out) for display.
pub fn format_stay_date<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    dt.format(STAY_DATE_FORMAT).to_string()
}

/// Format the moment a booking was made.
pub fn format_booked_at<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    dt.format(BOOKED_AT_FORMAT).to_string()
}

/// Format a DateTime with full date and time, for logs and diagnostics.
pub fn format_datetime_full<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Time zone in which calendar days are judged and labels are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local time zone
    #[default]
    Local,
    Utc,
    /// A fixed UTC offset such as `+05:30`
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Express an instant in this zone.
    pub fn localize(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).fixed_offset(),
            DisplayZone::Utc => instant.fixed_offset(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// The current instant in this zone (honours mock time).
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.localize(&now().with_timezone(&Utc))
    }
}

impl FromStr for DisplayZone {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => return Ok(DisplayZone::Local),
            "utc" | "z" => return Ok(DisplayZone::Utc),
            _ => {}
        }

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(TimeParseError::zone(s)),
        };

        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "00"));
        let all_digits = |part: &str| {
            (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !all_digits(hours) || !all_digits(minutes) {
            return Err(TimeParseError::zone(s));
        }

        let hours: i32 = hours.parse().map_err(|_| TimeParseError::zone(s))?;
        let minutes: i32 = minutes.parse().map_err(|_| TimeParseError::zone(s))?;
        if hours > 23 || minutes > 59 {
            return Err(TimeParseError::zone(s));
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(DisplayZone::Fixed)
            .ok_or_else(|| TimeParseError::zone(s))
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => write!(f, "local"),
            DisplayZone::Utc => write!(f, "utc"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}
