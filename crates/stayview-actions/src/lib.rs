//! Collaborator interfaces for stayview
//!
//! The state engine decides which actions are legal; carrying them out is
//! delegated to the booking backend and payment provider through the traits
//! defined here. This crate contains no backend code itself.

mod mock;
mod navigation;
mod traits;

pub use mock::*;
pub use navigation::*;
pub use traits::*;
