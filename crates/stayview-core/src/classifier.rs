//! Temporal classification of a stay

use chrono::{DateTime, TimeZone, Utc};
use stayview_api::{Classification, ReservationStatus};
use stayview_config::{is_valid_date_format, DisplaySettings, DEFAULT_TODAY_LABEL};
use stayview_util::{
    format_distance_concise, parse_timestamp, same_calendar_day, TimeParseError,
    STAY_DATE_FORMAT,
};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Classification failures. The classifier never guesses a status for
/// malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("Check-out {end} is not after check-in {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid {field} '{value}': {source}")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: TimeParseError,
    },
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Status of a stay starting at `start`, seen from `now`.
///
/// A check-in exactly at `now` is still upcoming.
pub fn status_at<Tz: TimeZone>(start: &DateTime<Utc>, now: &DateTime<Tz>) -> ReservationStatus {
    if *start < now.with_timezone(&Utc) {
        ReservationStatus::Past
    } else {
        ReservationStatus::Upcoming
    }
}

/// Labels a stay as past or upcoming and renders its dates
#[derive(Debug, Clone)]
pub struct TemporalClassifier {
    stay_date_format: String,
    today_label: String,
}

impl TemporalClassifier {
    pub fn new(stay_date_format: impl Into<String>, today_label: impl Into<String>) -> Self {
        let mut stay_date_format = stay_date_format.into();
        if !is_valid_date_format(&stay_date_format) {
            warn!(
                format = %stay_date_format,
                fallback = STAY_DATE_FORMAT,
                "Invalid stay date format, using default"
            );
            stay_date_format = STAY_DATE_FORMAT.to_string();
        }

        Self {
            stay_date_format,
            today_label: today_label.into(),
        }
    }

    pub fn from_settings(display: &DisplaySettings) -> Self {
        Self::new(display.stay_date_format.clone(), display.today_label.clone())
    }

    /// Classify a stay relative to `now`.
    ///
    /// Calendar days and labels are evaluated in `now`'s time zone.
    pub fn classify<Tz>(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        now: &DateTime<Tz>,
    ) -> ClassifyResult<Classification>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if end <= start {
            return Err(ClassifyError::InvalidRange {
                start: *start,
                end: *end,
            });
        }

        let zone = now.timezone();
        let relative_label = if same_calendar_day(start, now) {
            self.today_label.clone()
        } else {
            format_distance_concise(start, now)
        };

        Ok(Classification {
            status: status_at(start, now),
            start_label: self.format_date(&start.with_timezone(&zone)),
            end_label: self.format_date(&end.with_timezone(&zone)),
            relative_label,
        })
    }

    /// Classify a stay given its source timestamp strings.
    pub fn classify_str<Tz>(
        &self,
        start: &str,
        end: &str,
        now: &DateTime<Tz>,
    ) -> ClassifyResult<Classification>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let start = parse_date("startDate", start)?;
        let end = parse_date("endDate", end)?;
        self.classify(&start, &end, now)
    }

    fn format_date<Tz>(&self, dt: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        dt.format(&self.stay_date_format).to_string()
    }
}

impl Default for TemporalClassifier {
    fn default() -> Self {
        Self::new(STAY_DATE_FORMAT, DEFAULT_TODAY_LABEL)
    }
}

fn parse_date(field: &'static str, value: &str) -> ClassifyResult<DateTime<Utc>> {
    parse_timestamp(value).map_err(|source| ClassifyError::InvalidDate {
        field,
        value: value.to_string(),
        source,
    })
}

/// Classify a stay with the default labels.
pub fn classify<Tz>(
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
    now: &DateTime<Tz>,
) -> ClassifyResult<Classification>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    TemporalClassifier::default().classify(start, end, now)
}

/// Classify a stay against the wall clock (mock time aware).
pub fn classify_now(start: &DateTime<Utc>, end: &DateTime<Utc>) -> ClassifyResult<Classification> {
    classify(start, end, &stayview_util::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_range_must_be_positive() {
        let start = at(2025, 3, 10, 12, 0);
        let now = at(2025, 3, 1, 9, 0);

        let same = classify(&start, &start, &now);
        assert!(matches!(same, Err(ClassifyError::InvalidRange { .. })));

        let reversed = classify(&start, &(start - Duration::days(2)), &now);
        assert!(matches!(reversed, Err(ClassifyError::InvalidRange { .. })));

        assert!(classify(&start, &(start + Duration::seconds(1)), &now).is_ok());
    }

    #[test]
    fn test_past_iff_start_before_now() {
        let now = at(2025, 3, 10, 12, 0);
        let end = at(2025, 3, 20, 12, 0);

        let before = classify(&(now - Duration::seconds(1)), &end, &now).unwrap();
        assert_eq!(before.status, ReservationStatus::Past);

        let exact = classify(&now, &end, &now).unwrap();
        assert_eq!(exact.status, ReservationStatus::Upcoming);

        let after = classify(&(now + Duration::seconds(1)), &end, &now).unwrap();
        assert_eq!(after.status, ReservationStatus::Upcoming);
    }

    #[test]
    fn test_started_yesterday_is_past() {
        let now = at(2025, 3, 10, 12, 0);
        let result = classify(&(now - Duration::days(1)), &(now + Duration::days(1)), &now).unwrap();

        assert_eq!(result.status, ReservationStatus::Past);
        assert_eq!(result.relative_label, "1 day ago");
    }

    #[test]
    fn test_three_days_ahead() {
        let now = at(2025, 3, 10, 12, 0);
        let result = classify(&(now + Duration::days(3)), &(now + Duration::days(5)), &now).unwrap();

        assert_eq!(result.status, ReservationStatus::Upcoming);
        assert_eq!(result.relative_label, "in 3 days");
        assert_eq!(result.start_label, "Thu, Mar 13 2025");
        assert_eq!(result.end_label, "Sat, Mar 15 2025");
    }

    #[test]
    fn test_past_is_symmetric() {
        let now = at(2025, 3, 10, 12, 0);
        let result = classify(&(now - Duration::days(5)), &(now - Duration::days(2)), &now).unwrap();

        assert_eq!(result.status, ReservationStatus::Past);
        assert_eq!(result.relative_label, "5 days ago");
    }

    #[test]
    fn test_same_day_earlier_start_is_past_today() {
        // Check-in at 09:00, viewed at 14:30 the same day
        let now = at(2025, 3, 10, 14, 30);
        let start = at(2025, 3, 10, 9, 0);
        let result = classify(&start, &(start + Duration::days(2)), &now).unwrap();

        assert_eq!(result.status, ReservationStatus::Past);
        assert_eq!(result.relative_label, "Today");
    }

    #[test]
    fn test_same_day_later_start_is_upcoming_today() {
        let now = at(2025, 3, 10, 0, 10);
        let start = at(2025, 3, 10, 23, 55);
        let result = classify(&start, &(start + Duration::days(1)), &now).unwrap();

        assert_eq!(result.status, ReservationStatus::Upcoming);
        assert_eq!(result.relative_label, "Today");
    }

    #[test]
    fn test_midnight_boundary_is_not_today() {
        let now = at(2025, 3, 10, 23, 59);
        let start = at(2025, 3, 11, 0, 0);
        let result = classify(&start, &(start + Duration::days(1)), &now).unwrap();

        assert_eq!(result.status, ReservationStatus::Upcoming);
        assert_ne!(result.relative_label, "Today");
        assert_eq!(result.relative_label, "in 1 minute");
    }

    #[test]
    fn test_calendar_day_follows_now_zone() {
        // 22:00 UTC on the 10th is the morning of the 11th in UTC+05:30
        let start = at(2025, 3, 10, 22, 0);
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = ist.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap();

        let result = classify(&start, &(start + Duration::days(3)), &now).unwrap();
        assert_eq!(result.relative_label, "Today");
        assert_eq!(result.start_label, "Tue, Mar 11 2025");
    }

    #[test]
    fn test_custom_labels() {
        let classifier = TemporalClassifier::new("%d/%m/%Y", "Tonight");
        let now = at(2025, 3, 10, 8, 0);
        let start = at(2025, 3, 10, 18, 0);

        let result = classifier
            .classify(&start, &(start + Duration::days(1)), &now)
            .unwrap();
        assert_eq!(result.relative_label, "Tonight");
        assert_eq!(result.start_label, "10/03/2025");
        assert_eq!(result.end_label, "11/03/2025");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let classifier = TemporalClassifier::new("%Q", "Today");
        let now = at(2025, 3, 10, 8, 0);
        let start = at(2025, 5, 14, 12, 0);

        let result = classifier
            .classify(&start, &(start + Duration::days(1)), &now)
            .unwrap();
        assert_eq!(result.start_label, "Wed, May 14 2025");
    }

    #[test]
    fn test_classify_str_reports_bad_dates() {
        let classifier = TemporalClassifier::default();
        let now = at(2025, 3, 10, 8, 0);

        let result = classifier.classify_str("soon", "2025-03-12", &now);
        assert!(matches!(
            result,
            Err(ClassifyError::InvalidDate { field: "startDate", .. })
        ));

        let result = classifier.classify_str("2025-03-12", "", &now);
        assert!(matches!(
            result,
            Err(ClassifyError::InvalidDate { field: "endDate", .. })
        ));

        let ok = classifier
            .classify_str("2025-03-13T12:00:00Z", "2025-03-15", &now)
            .unwrap();
        assert_eq!(ok.status, ReservationStatus::Upcoming);
    }

    #[test]
    fn test_classify_now_uses_wall_clock() {
        let start = Utc::now() + Duration::days(30);
        let result = classify_now(&start, &(start + Duration::days(2))).unwrap();
        assert_eq!(result.status, ReservationStatus::Upcoming);
    }
}
