//! Action eligibility

use chrono::{DateTime, Utc};
use stayview_api::{
    ActionSet, DenialReason, Eligibility, ReservationAction, ReservationStatus,
};

/// Decide which actions a reservation allows.
///
/// Past stays allow nothing. Upcoming stays can always be edited; unpaid
/// ones can also be deleted or paid, while paid ones show the paid marker
/// in that slot instead.
pub fn resolve_actions(status: ReservationStatus, is_paid: bool) -> Eligibility {
    match (status, is_paid) {
        (ReservationStatus::Past, _) => Eligibility::none(),
        (ReservationStatus::Upcoming, false) => Eligibility {
            actions: ActionSet::EDIT | ActionSet::DELETE | ActionSet::PAY,
            paid_indicator: false,
        },
        (ReservationStatus::Upcoming, true) => Eligibility {
            actions: ActionSet::EDIT,
            paid_indicator: true,
        },
    }
}

/// Explain why `action` is not allowed, or return an empty list if it is.
pub fn denial_reasons(
    action: ReservationAction,
    status: ReservationStatus,
    is_paid: bool,
    start: DateTime<Utc>,
) -> Vec<DenialReason> {
    if resolve_actions(status, is_paid).allows(action) {
        return Vec::new();
    }

    let mut reasons = Vec::new();
    if status.is_past() {
        reasons.push(DenialReason::ReservationPast { start });
    }
    if is_paid && matches!(action, ReservationAction::Delete | ReservationAction::Pay) {
        reasons.push(DenialReason::AlreadyPaid);
    }
    reasons
}
