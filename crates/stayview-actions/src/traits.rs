//! Collaborator traits

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stayview_util::{BookingId, GuestId, PaymentRequestId};
use thiserror::Error;

/// Errors reported by collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    #[error("Deletion failed: {0}")]
    DeleteFailed(String),

    #[error("Payment could not be started: {0}")]
    PaymentFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Who is paying
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestIdentity {
    pub guest_id: GuestId,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GuestIdentity {
    pub fn new(guest_id: GuestId) -> Self {
        Self {
            guest_id,
            name: None,
            email: None,
        }
    }
}

/// A request to start the payment flow for a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub request_id: PaymentRequestId,
    pub booking_id: BookingId,
    /// Amount due, in the booking's currency
    pub amount: f64,
    pub payer: GuestIdentity,
}

/// Where the user should be sent to complete payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRedirect {
    pub request_id: PaymentRequestId,
    pub url: String,
}

/// Removes bookings from the booking backend
#[async_trait]
pub trait ReservationDeleter: Send + Sync {
    /// Delete a booking. Completes once the backend has confirmed removal.
    async fn delete(&self, booking_id: BookingId) -> ActionResult<()>;
}

/// Starts an external payment flow
#[async_trait]
pub trait PaymentInitiator: Send + Sync {
    async fn initiate(&self, request: PaymentRequest) -> ActionResult<PaymentRedirect>;
}

/// Resolves where the edit screen for a booking lives
pub trait EditNavigator: Send + Sync {
    fn edit_route(&self, booking_id: BookingId) -> String;
}
