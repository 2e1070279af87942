//! Dispatching eligible actions to collaborators

use chrono::{DateTime, Utc};
use serde::Serialize;
use stayview_actions::{
    EditNavigator, GuestIdentity, PaymentInitiator, PaymentRequest, ReservationDeleter,
};
use stayview_api::{DenialReason, Reservation, ReservationAction};
use stayview_util::{BookingId, PaymentRequestId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{denial_reasons, status_at, CoreEvent};

/// Outcome of an action request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ActionDecision {
    /// Handed to a collaborator; completion arrives as a [`CoreEvent`]
    Dispatched {
        booking_id: BookingId,
        action: ReservationAction,
    },
    /// Go to the edit screen
    Navigate { route: String },
    Denied { reasons: Vec<DenialReason> },
}

/// Re-checks eligibility and hands actions to collaborators without waiting
/// for them to finish.
///
/// Delete and pay requests spawn onto the current Tokio runtime, so they
/// must be issued from within one.
pub struct ActionDispatcher {
    deleter: Arc<dyn ReservationDeleter>,
    payments: Arc<dyn PaymentInitiator>,
    navigator: Arc<dyn EditNavigator>,
    events: mpsc::UnboundedSender<CoreEvent>,
}

impl ActionDispatcher {
    /// Create a dispatcher and the receiving end of its completion events
    pub fn new(
        deleter: Arc<dyn ReservationDeleter>,
        payments: Arc<dyn PaymentInitiator>,
        navigator: Arc<dyn EditNavigator>,
    ) -> (Self, mpsc::UnboundedReceiver<CoreEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                deleter,
                payments,
                navigator,
                events,
            },
            rx,
        )
    }

    fn check(
        &self,
        action: ReservationAction,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> Result<(), Vec<DenialReason>> {
        let status = status_at(&reservation.start, &now);
        let reasons = denial_reasons(action, status, reservation.is_paid, reservation.start);
        if reasons.is_empty() {
            Ok(())
        } else {
            debug!(
                booking_id = %reservation.id,
                action = %action,
                reasons = ?reasons,
                "Action denied"
            );
            Err(reasons)
        }
    }

    /// Request navigation to the edit screen
    pub fn request_edit(&self, reservation: &Reservation, now: DateTime<Utc>) -> ActionDecision {
        if let Err(reasons) = self.check(ReservationAction::Edit, reservation, now) {
            return ActionDecision::Denied { reasons };
        }

        ActionDecision::Navigate {
            route: self.navigator.edit_route(reservation.id),
        }
    }

    /// Request deletion. On success a [`CoreEvent::ReservationDeleted`]
    /// follows, and the caller should drop the booking from its list.
    pub fn request_delete(&self, reservation: &Reservation, now: DateTime<Utc>) -> ActionDecision {
        if let Err(reasons) = self.check(ReservationAction::Delete, reservation, now) {
            return ActionDecision::Denied { reasons };
        }

        let booking_id = reservation.id;
        let deleter = Arc::clone(&self.deleter);
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match deleter.delete(booking_id).await {
                Ok(()) => {
                    info!(booking_id = %booking_id, "Reservation deleted");
                    CoreEvent::ReservationDeleted { booking_id }
                }
                Err(error) => {
                    warn!(booking_id = %booking_id, error = %error, "Reservation deletion failed");
                    CoreEvent::DeletionFailed { booking_id, error }
                }
            };
            let _ = events.send(event);
        });

        info!(booking_id = %booking_id, "Deletion requested");
        ActionDecision::Dispatched {
            booking_id,
            action: ReservationAction::Delete,
        }
    }

    /// Request the payment flow for the reservation's total price
    pub fn request_payment(
        &self,
        reservation: &Reservation,
        payer: GuestIdentity,
        now: DateTime<Utc>,
    ) -> ActionDecision {
        if let Err(reasons) = self.check(ReservationAction::Pay, reservation, now) {
            return ActionDecision::Denied { reasons };
        }

        let booking_id = reservation.id;
        let request = PaymentRequest {
            request_id: PaymentRequestId::new(),
            booking_id,
            amount: reservation.total_price,
            payer,
        };
        let request_id = request.request_id.clone();
        let payments = Arc::clone(&self.payments);
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match payments.initiate(request).await {
                Ok(redirect) => {
                    info!(booking_id = %booking_id, url = %redirect.url, "Payment flow started");
                    CoreEvent::PaymentStarted {
                        booking_id,
                        redirect,
                    }
                }
                Err(error) => {
                    warn!(booking_id = %booking_id, error = %error, "Payment initiation failed");
                    CoreEvent::PaymentFailed { booking_id, error }
                }
            };
            let _ = events.send(event);
        });

        info!(
            booking_id = %booking_id,
            request_id = %request_id,
            amount = reservation.total_price,
            "Payment requested"
        );
        ActionDecision::Dispatched {
            booking_id,
            action: ReservationAction::Pay,
        }
    }
}
