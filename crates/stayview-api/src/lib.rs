//! Reservation types shared by stayview crates
//!
//! This crate defines the stable data model between the booking backend,
//! the state engine and whatever presents a reservation:
//! - Snapshots (raw wire records and validated reservations)
//! - Status, action and eligibility types
//! - Presentation payloads

mod reservation;
mod types;

pub use reservation::*;
pub use types::*;

/// Current payload version for serialized views
pub const VIEW_VERSION: u32 = 1;
