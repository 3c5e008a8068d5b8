//! # Slotbook Engine
//!
//! The slot-generation and booking-state engine behind the interview booking
//! application. Presentation code talks only to [`scheduler::Scheduler`].
//!
//! ## Architecture
//!
//! The engine is layered leaf-first:
//!
//! - **Grid**: expands weekly availability into 30-minute slots over a two-week window
//! - **Pagination**: serves unbooked slots as cursor-ordered pages
//! - **Ledger**: book, cancel and reschedule transitions with their preconditions
//! - **Calendar**: per-day summaries for calendar views
//! - **Scheduler**: the facade that owns the store and composes the layers above
//!
//! Time and simulated contention are injected through [`clock::Clock`] and
//! [`fault::ConflictSimulator`] so the engine can run deterministically in tests.

/// Per-day read model for calendar views
pub mod calendar;
/// Source of "now" and "today"
pub mod clock;
/// Environment-driven engine configuration
pub mod config;
/// Injectable simulation of last-instant booking conflicts
pub mod fault;
/// Availability to slot materialization
pub mod grid;
/// Booking state transitions and weekly cap accounting
pub mod ledger;
/// Mock implementations of the engine seams
pub mod mock;
/// Cursor-based pagination over unbooked slots
pub mod pagination;
/// The scheduling facade
pub mod scheduler;

pub use scheduler::{Scheduler, SchedulingSnapshot};
