//! The list of reservations currently on display

use chrono::{DateTime, Utc};
use stayview_api::{Reservation, ReservationView};
use stayview_util::BookingId;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{CoreEvent, ReservationStateEngine};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Booking {0} is not on the board")]
    UnknownBooking(BookingId),

    #[error("Booking {0} was paid; a snapshot cannot mark it unpaid")]
    PaymentRegressed(BookingId),
}

/// What changed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardChange {
    Added(BookingId),
    Updated(BookingId),
    Removed(BookingId),
}

/// Ordered collection of reservation snapshots.
///
/// Keeps the order snapshots arrived in. A booking leaves the board only
/// when its deletion is confirmed.
#[derive(Debug, Clone, Default)]
pub struct ReservationBoard {
    reservations: Vec<Reservation>,
}

impl ReservationBoard {
    pub fn new(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let mut board = Self::default();
        for reservation in reservations {
            if let Err(e) = board.apply_snapshot(reservation) {
                warn!(error = %e, "Ignoring snapshot");
            }
        }
        board
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, booking_id: BookingId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == booking_id)
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Insert a new snapshot or replace the one with the same id.
    ///
    /// Payment is one-way: a snapshot that reports a paid booking as unpaid
    /// is rejected.
    pub fn apply_snapshot(&mut self, reservation: Reservation) -> Result<BoardChange, BoardError> {
        let booking_id = reservation.id;

        match self.reservations.iter_mut().find(|r| r.id == booking_id) {
            Some(existing) => {
                if existing.is_paid && !reservation.is_paid {
                    return Err(BoardError::PaymentRegressed(booking_id));
                }
                *existing = reservation;
                debug!(booking_id = %booking_id, "Snapshot updated");
                Ok(BoardChange::Updated(booking_id))
            }
            None => {
                self.reservations.push(reservation);
                debug!(booking_id = %booking_id, "Snapshot added");
                Ok(BoardChange::Added(booking_id))
            }
        }
    }

    /// Drop a booking from the board
    pub fn remove(&mut self, booking_id: BookingId) -> Result<Reservation, BoardError> {
        let index = self
            .reservations
            .iter()
            .position(|r| r.id == booking_id)
            .ok_or(BoardError::UnknownBooking(booking_id))?;

        info!(booking_id = %booking_id, "Reservation removed from board");
        Ok(self.reservations.remove(index))
    }

    /// Apply a completion event. Only a confirmed deletion changes the board.
    pub fn handle_event(&mut self, event: &CoreEvent) -> Option<BoardChange> {
        match event {
            CoreEvent::ReservationDeleted { booking_id } => match self.remove(*booking_id) {
                Ok(_) => Some(BoardChange::Removed(*booking_id)),
                Err(e) => {
                    debug!(error = %e, "Deletion event for booking not on board");
                    None
                }
            },
            CoreEvent::DeletionFailed { .. }
            | CoreEvent::PaymentStarted { .. }
            | CoreEvent::PaymentFailed { .. } => None,
        }
    }

    /// Card payloads for everything on the board
    pub fn views(&self, engine: &ReservationStateEngine, now: DateTime<Utc>) -> Vec<ReservationView> {
        engine.present_all(&self.reservations, now)
    }
}
