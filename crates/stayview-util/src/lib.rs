//! Shared utilities for stayview
//!
//! This crate provides:
//! - ID types (BookingId, GuestId, PaymentRequestId)
//! - Time utilities (mockable wall clock, timestamp parsing, calendar helpers)
//! - Relative time phrasing ("in 3 days", "5 days ago")
//! - Error types
//! - Default paths for the config file

mod error;
mod ids;
mod paths;
mod relative;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use relative::*;
pub use time::*;
