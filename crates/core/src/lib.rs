//! # Slotbook Core
//!
//! Shared data model and error taxonomy for the interview-slot booking engine.
//! Nothing in this crate performs I/O; the store and engine crates build on it.

/// Error types returned by every scheduling operation
pub mod errors;
/// Availability templates, settings, slots, bookings and pages
pub mod models;

pub use errors::{SchedulingError, SchedulingResult};
