//! Mock collaborators for testing

use async_trait::async_trait;
use stayview_util::BookingId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{
    ActionError, ActionResult, PaymentInitiator, PaymentRedirect, PaymentRequest,
    ReservationDeleter,
};

/// In-memory stand-in for the booking backend and payment provider
#[derive(Clone, Default)]
pub struct MockBackend {
    bookings: Arc<Mutex<HashSet<BookingId>>>,
    deleted: Arc<Mutex<Vec<BookingId>>>,
    payments: Arc<Mutex<Vec<PaymentRequest>>>,

    /// Configure delete to fail
    pub fail_delete: Arc<Mutex<bool>>,

    /// Configure payment initiation to fail
    pub fail_payment: Arc<Mutex<bool>>,

    /// Simulated backend latency
    pub latency: Arc<Mutex<Option<Duration>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already knows the given bookings
    pub fn with_bookings(ids: impl IntoIterator<Item = BookingId>) -> Self {
        let backend = Self::new();
        backend.bookings.lock().unwrap().extend(ids);
        backend
    }

    /// Bookings deleted so far, in order
    pub fn deleted(&self) -> Vec<BookingId> {
        self.deleted.lock().unwrap().clone()
    }

    /// Payment requests received so far, in order
    pub fn payments(&self) -> Vec<PaymentRequest> {
        self.payments.lock().unwrap().clone()
    }

    pub fn contains(&self, booking_id: BookingId) -> bool {
        self.bookings.lock().unwrap().contains(&booking_id)
    }

    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock().unwrap() = latency;
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ReservationDeleter for MockBackend {
    async fn delete(&self, booking_id: BookingId) -> ActionResult<()> {
        self.simulate_latency().await;

        if *self.fail_delete.lock().unwrap() {
            return Err(ActionError::DeleteFailed("Mock delete failure".into()));
        }

        if !self.bookings.lock().unwrap().remove(&booking_id) {
            return Err(ActionError::BookingNotFound(booking_id));
        }

        self.deleted.lock().unwrap().push(booking_id);
        Ok(())
    }
}

#[async_trait]
impl PaymentInitiator for MockBackend {
    async fn initiate(&self, request: PaymentRequest) -> ActionResult<PaymentRedirect> {
        self.simulate_latency().await;

        if *self.fail_payment.lock().unwrap() {
            return Err(ActionError::PaymentFailed("Mock payment failure".into()));
        }

        if !self.contains(request.booking_id) {
            return Err(ActionError::BookingNotFound(request.booking_id));
        }

        let redirect = PaymentRedirect {
            request_id: request.request_id.clone(),
            url: format!("https://pay.example/checkout/{}", request.request_id),
        };
        self.payments.lock().unwrap().push(request);
        Ok(redirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuestIdentity;
    use stayview_util::{GuestId, PaymentRequestId};

    #[tokio::test]
    async fn mock_delete_removes_once() {
        let backend = MockBackend::with_bookings([BookingId::new(1), BookingId::new(2)]);

        backend.delete(BookingId::new(1)).await.unwrap();
        assert_eq!(backend.deleted(), vec![BookingId::new(1)]);
        assert!(!backend.contains(BookingId::new(1)));

        let again = backend.delete(BookingId::new(1)).await;
        assert_eq!(again, Err(ActionError::BookingNotFound(BookingId::new(1))));
    }

    #[tokio::test]
    async fn mock_delete_failure() {
        let backend = MockBackend::with_bookings([BookingId::new(1)]);
        *backend.fail_delete.lock().unwrap() = true;

        assert!(backend.delete(BookingId::new(1)).await.is_err());
        assert!(backend.contains(BookingId::new(1)));
    }

    #[tokio::test]
    async fn mock_payment_redirect() {
        let backend = MockBackend::with_bookings([BookingId::new(7)]);
        let request = PaymentRequest {
            request_id: PaymentRequestId::new(),
            booking_id: BookingId::new(7),
            amount: 980.0,
            payer: GuestIdentity::new(GuestId::new(2)),
        };

        let redirect = backend.initiate(request.clone()).await.unwrap();
        assert_eq!(redirect.request_id, request.request_id);
        assert!(redirect.url.ends_with(&request.request_id.to_string()));
        assert_eq!(backend.payments(), vec![request]);
    }
}
