//! Status, action and presentation types

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stayview_util::BookingId;
use std::fmt;

/// Temporal status of a reservation relative to a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Check-in lies strictly before the reference instant
    Past,
    /// Check-in is at or after the reference instant
    Upcoming,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Past => "past",
            ReservationStatus::Upcoming => "upcoming",
        }
    }

    pub fn is_past(&self) -> bool {
        matches!(self, ReservationStatus::Past)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing action on a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationAction {
    Edit,
    Delete,
    Pay,
}

impl ReservationAction {
    pub const ALL: [ReservationAction; 3] = [
        ReservationAction::Edit,
        ReservationAction::Delete,
        ReservationAction::Pay,
    ];

    pub fn flag(&self) -> ActionSet {
        match self {
            ReservationAction::Edit => ActionSet::EDIT,
            ReservationAction::Delete => ActionSet::DELETE,
            ReservationAction::Pay => ActionSet::PAY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationAction::Edit => "edit",
            ReservationAction::Delete => "delete",
            ReservationAction::Pay => "pay",
        }
    }
}

impl fmt::Display for ReservationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of actions a reservation currently allows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActionSet: u8 {
        const EDIT = 1 << 0;
        const DELETE = 1 << 1;
        const PAY = 1 << 2;
    }
}

impl ActionSet {
    pub fn allows(&self, action: ReservationAction) -> bool {
        self.contains(action.flag())
    }

    /// Actions in display order (edit, delete, pay)
    pub fn actions(&self) -> Vec<ReservationAction> {
        ReservationAction::ALL
            .into_iter()
            .filter(|action| self.allows(*action))
            .collect()
    }
}

impl FromIterator<ReservationAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ReservationAction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ActionSet::empty(), |set, action| set | action.flag())
    }
}

/// Result of resolving which actions a reservation allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub actions: ActionSet,
    /// Display-only "Paid" marker. Occupies the delete/pay slot and never
    /// coexists with either action.
    pub paid_indicator: bool,
}

impl Eligibility {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn allows(&self, action: ReservationAction) -> bool {
        self.actions.allows(action)
    }
}

/// Output of the temporal classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: ReservationStatus,
    pub start_label: String,
    pub end_label: String,
    /// "Today" on the check-in day, otherwise a relative phrase
    pub relative_label: String,
}

/// Structured reasons an action request was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DenialReason {
    /// The stay has already started
    ReservationPast { start: DateTime<Utc> },
    /// Payment is recorded, so delete/pay are replaced by the paid marker
    AlreadyPaid,
    /// The booking is not among the reservations on display
    UnknownBooking { booking_id: BookingId },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::ReservationPast { start } => {
                write!(f, "reservation started at {}", start)
            }
            DenialReason::AlreadyPaid => write!(f, "reservation is already paid"),
            DenialReason::UnknownBooking { booking_id } => {
                write!(f, "booking {} is not on display", booking_id)
            }
        }
    }
}

/// Everything needed to draw one reservation card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationView {
    pub booking_id: BookingId,
    /// "3 nights in Cabin 001"
    pub title: String,
    pub image: Option<String>,
    pub image_alt: String,
    pub status: ReservationStatus,
    pub start_label: String,
    pub end_label: String,
    pub relative_label: String,
    /// "Tue, May 14 2024 (in 3 days) — Fri, May 17 2024"
    pub date_line: String,
    /// Currency-prefixed total, e.g. "₹450"
    pub price: String,
    /// "1 guest", "4 guests"
    pub guests: String,
    /// Price-row badge shown whenever payment is recorded
    pub paid_badge: bool,
    /// "Booked Tue, May 14 2024, 3:04 PM"
    pub booked_at: String,
    pub actions: Vec<ReservationAction>,
    pub paid_indicator: bool,
    /// Present only when editing is allowed
    pub edit_route: Option<String>,
}
