//! Reservation snapshots: raw wire records and their validated form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stayview_util::{calendar_nights, parse_timestamp, BookingId, GuestId, TimeParseError};
use thiserror::Error;

/// Booking record as delivered by the booking backend
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReservation {
    pub id: BookingId,

    pub guest_id: GuestId,

    /// Check-in timestamp
    pub start_date: String,

    /// Check-out timestamp
    pub end_date: String,

    /// Stored night count; derived from the dates when absent
    #[serde(default)]
    pub num_nights: Option<i64>,

    pub total_price: f64,

    pub num_guests: i64,

    /// Backend lifecycle label ("unconfirmed", "checked-in", ...), carried for display only
    #[serde(default)]
    pub status: Option<String>,

    #[serde(rename = "created_at")]
    pub created_at: String,

    #[serde(default)]
    pub is_paid: bool,

    /// Embedded accommodation unit
    pub cabins: RawCabin,
}

/// Accommodation unit embedded in a booking record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCabin {
    pub name: String,

    #[serde(default)]
    pub image: Option<String>,
}

/// Which timestamp of a snapshot failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
    CreatedAt,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateField::Start => write!(f, "startDate"),
            DateField::End => write!(f, "endDate"),
            DateField::CreatedAt => write!(f, "created_at"),
        }
    }
}

/// Field-level validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("numGuests must be at least 1 (got {0})")]
    NoGuests(i64),

    #[error("numGuests is out of range (got {0})")]
    TooManyGuests(i64),

    #[error("stay must cover at least one night (check-in and check-out are on the same day)")]
    NoNights,

    #[error("totalPrice must be a non-negative number (got {0})")]
    InvalidPrice(f64),

    #[error("numNights is {stored} but the stay spans {derived} nights")]
    NightsMismatch { stored: i64, derived: i64 },
}

/// Why a snapshot could not be turned into a [`Reservation`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("Invalid {field}: {source}")]
    InvalidDate {
        field: DateField,
        #[source]
        source: TimeParseError,
    },

    #[error("Check-out {end} is not after check-in {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Booking {booking_id} failed validation: {errors:?}")]
    Validation {
        booking_id: BookingId,
        errors: Vec<ValidationError>,
    },

    #[error("Malformed booking record: {0}")]
    Malformed(String),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Accommodation unit attached to a reservation; display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationUnit {
    pub name: String,
    pub image: Option<String>,
}

/// Validated, read-only reservation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: BookingId,
    pub guest_id: GuestId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub num_nights: u32,
    pub total_price: f64,
    pub num_guests: u32,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub backend_status: Option<String>,
    pub unit: AccommodationUnit,
}

impl Reservation {
    /// Validate a raw booking record.
    ///
    /// Dates are checked first (unparseable, then out of order); the
    /// remaining field checks are collected and reported together.
    pub fn from_raw(raw: RawReservation) -> SnapshotResult<Self> {
        let start = parse_field(&raw.start_date, DateField::Start)?;
        let end = parse_field(&raw.end_date, DateField::End)?;
        let created_at = parse_field(&raw.created_at, DateField::CreatedAt)?;

        if end <= start {
            return Err(SnapshotError::InvalidRange { start, end });
        }

        let mut errors = Vec::new();

        let num_guests = if raw.num_guests < 1 {
            errors.push(ValidationError::NoGuests(raw.num_guests));
            0
        } else {
            u32::try_from(raw.num_guests).unwrap_or_else(|_| {
                errors.push(ValidationError::TooManyGuests(raw.num_guests));
                0
            })
        };

        if !raw.total_price.is_finite() || raw.total_price < 0.0 {
            errors.push(ValidationError::InvalidPrice(raw.total_price));
        }

        let derived = calendar_nights(&start, &end);
        let stored = raw.num_nights.unwrap_or(derived);
        if derived < 1 {
            errors.push(ValidationError::NoNights);
        } else if stored != derived {
            errors.push(ValidationError::NightsMismatch { stored, derived });
        }
        // Calendar nights between two chrono dates always fit
        let num_nights = u32::try_from(derived).unwrap_or(0);

        if !errors.is_empty() {
            return Err(SnapshotError::Validation {
                booking_id: raw.id,
                errors,
            });
        }

        Ok(Self {
            id: raw.id,
            guest_id: raw.guest_id,
            start,
            end,
            num_nights,
            total_price: raw.total_price,
            num_guests,
            is_paid: raw.is_paid,
            created_at,
            backend_status: raw.status,
            unit: AccommodationUnit {
                name: raw.cabins.name,
                image: raw.cabins.image,
            },
        })
    }

    /// Parse and validate a single booking record from JSON.
    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        let raw: RawReservation =
            serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        Self::from_raw(raw)
    }
}

fn parse_field(value: &str, field: DateField) -> SnapshotResult<DateTime<Utc>> {
    parse_timestamp(value).map_err(|source| SnapshotError::InvalidDate { field, source })
}

/// Parse a JSON array of booking records, validating each one independently.
///
/// A malformed array fails as a whole; a record that fails validation is
/// returned as an error in its slot so the rest of the list still renders.
pub fn parse_snapshot_list(json: &str) -> SnapshotResult<Vec<SnapshotResult<Reservation>>> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))?;

    Ok(records
        .into_iter()
        .map(|value| {
            serde_json::from_value::<RawReservation>(value)
                .map_err(|e| SnapshotError::Malformed(e.to_string()))
                .and_then(Reservation::from_raw)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(start: &str, end: &str) -> String {
        format!(
            r#"{{
                "id": 12,
                "guestId": 3,
                "startDate": "{}",
                "endDate": "{}",
                "numNights": 3,
                "totalPrice": 1250,
                "numGuests": 2,
                "status": "unconfirmed",
                "created_at": "2024-04-30T09:15:00.000+00:00",
                "isPaid": false,
                "cabins": {{ "name": "001", "image": "https://img.example/cabin-001.jpg" }}
            }}"#,
            start, end
        )
    }

    #[test]
    fn parse_valid_record() {
        let reservation =
            Reservation::from_json(&record("2024-05-12T00:00:00", "2024-05-15T00:00:00")).unwrap();

        assert_eq!(reservation.id, BookingId::new(12));
        assert_eq!(reservation.guest_id.get(), 3);
        assert_eq!(reservation.start, Utc.with_ymd_and_hms(2024, 5, 12, 0, 0, 0).unwrap());
        assert_eq!(reservation.num_nights, 3);
        assert_eq!(reservation.num_guests, 2);
        assert_eq!(reservation.unit.name, "001");
        assert_eq!(reservation.backend_status.as_deref(), Some("unconfirmed"));
        assert!(!reservation.is_paid);
    }

    #[test]
    fn reject_unparseable_start() {
        let result = Reservation::from_json(&record("next tuesday", "2024-05-15T00:00:00"));
        assert!(matches!(
            result,
            Err(SnapshotError::InvalidDate {
                field: DateField::Start,
                ..
            })
        ));
    }

    #[test]
    fn reject_reversed_range() {
        let result = Reservation::from_json(&record("2024-05-15T00:00:00", "2024-05-12T00:00:00"));
        assert!(matches!(result, Err(SnapshotError::InvalidRange { .. })));
    }

    #[test]
    fn reject_zero_night_stay() {
        let result = Reservation::from_json(&record("2024-05-12T00:00:00", "2024-05-12T00:00:00"));
        assert!(matches!(result, Err(SnapshotError::InvalidRange { .. })));
    }

    #[test]
    fn reject_same_day_stay() {
        let result = Reservation::from_json(&record("2024-06-01T10:00:00Z", "2024-06-01T12:00:00Z"));
        match result {
            Err(SnapshotError::Validation { errors, .. }) => {
                assert_eq!(errors, vec![ValidationError::NoNights]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn reject_guest_count_out_of_range() {
        let json = r#"{
            "id": 2, "guestId": 1,
            "startDate": "2024-06-01", "endDate": "2024-06-03",
            "totalPrice": 100, "numGuests": 99999999999,
            "created_at": "2024-05-01T10:00:00Z",
            "cabins": { "name": "003" }
        }"#;

        match Reservation::from_json(json) {
            Err(SnapshotError::Validation { errors, .. }) => {
                assert_eq!(errors, vec![ValidationError::TooManyGuests(99_999_999_999)]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn collect_field_errors() {
        let raw = RawReservation {
            id: BookingId::new(5),
            guest_id: GuestId::new(1),
            start_date: "2024-05-12".into(),
            end_date: "2024-05-14".into(),
            num_nights: Some(4),
            total_price: -10.0,
            num_guests: 0,
            status: None,
            created_at: "2024-05-01".into(),
            is_paid: false,
            cabins: RawCabin {
                name: "002".into(),
                image: None,
            },
        };

        match Reservation::from_raw(raw) {
            Err(SnapshotError::Validation { booking_id, errors }) => {
                assert_eq!(booking_id, BookingId::new(5));
                assert_eq!(errors.len(), 3);
                assert!(errors.contains(&ValidationError::NoGuests(0)));
                assert!(errors.contains(&ValidationError::NightsMismatch {
                    stored: 4,
                    derived: 2
                }));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn derive_missing_night_count() {
        let json = r#"{
            "id": 1, "guestId": 1,
            "startDate": "2024-06-01", "endDate": "2024-06-08",
            "totalPrice": 0, "numGuests": 1,
            "created_at": "2024-05-01T10:00:00Z",
            "cabins": { "name": "008" }
        }"#;

        let reservation = Reservation::from_json(json).unwrap();
        assert_eq!(reservation.num_nights, 7);
        assert_eq!(reservation.unit.image, None);
        assert!(!reservation.is_paid);
    }

    #[test]
    fn snapshot_list_keeps_good_records() {
        let json = format!(
            "[{}, {}]",
            record("2024-05-12T00:00:00", "2024-05-15T00:00:00"),
            record("garbage", "2024-05-15T00:00:00")
        );

        let list = parse_snapshot_list(&json).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].is_ok());
        assert!(list[1].is_err());

        assert!(parse_snapshot_list("{ not json").is_err());
    }
}
