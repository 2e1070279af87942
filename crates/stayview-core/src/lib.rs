//! Reservation state engine for stayview
//!
//! This crate is the heart of stayview, containing:
//! - Temporal classification (past vs. upcoming, absolute and relative labels)
//! - Action eligibility (edit, delete, pay, paid marker)
//! - Card assembly from a snapshot and the two decisions above
//! - Action dispatch to collaborators with out-of-band completion events
//! - The list of reservations on display

mod board;
mod classifier;
mod dispatch;
mod display;
mod eligibility;
mod engine;
mod events;

pub use board::*;
pub use classifier::*;
pub use dispatch::*;
pub use display::*;
pub use eligibility::*;
pub use engine::*;
pub use events::*;
