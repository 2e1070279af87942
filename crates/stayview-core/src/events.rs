//! Core events emitted when delegated actions complete

use stayview_actions::{ActionError, PaymentRedirect};
use stayview_util::BookingId;

/// Completion notifications for delegated actions
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// The backend confirmed the booking is gone; drop it from the list
    ReservationDeleted { booking_id: BookingId },

    /// Deletion was refused or failed; the booking stays on display
    DeletionFailed {
        booking_id: BookingId,
        error: ActionError,
    },

    /// The payment flow is ready; send the user to `redirect`
    PaymentStarted {
        booking_id: BookingId,
        redirect: PaymentRedirect,
    },

    /// The payment flow could not be started
    PaymentFailed {
        booking_id: BookingId,
        error: ActionError,
    },
}

impl CoreEvent {
    pub fn booking_id(&self) -> BookingId {
        match self {
            CoreEvent::ReservationDeleted { booking_id }
            | CoreEvent::DeletionFailed { booking_id, .. }
            | CoreEvent::PaymentStarted { booking_id, .. }
            | CoreEvent::PaymentFailed { booking_id, .. } => *booking_id,
        }
    }
}
