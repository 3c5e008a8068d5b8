use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{booking::BookingStatus, slot::SlotId};

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Slot not found: {0}")]
    SlotNotFound(SlotId),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Slot {0} has already been booked. Please select another slot.")]
    SlotAlreadyBooked(SlotId),

    #[error("Maximum of {limit} interviews for the week of {week_start} has been reached")]
    WeeklyLimitReached { week_start: NaiveDate, limit: u32 },

    #[error("Another user just booked slot {0}. Please refresh and try again.")]
    ConcurrentBookingConflict(SlotId),

    #[error("Booking {id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),
}

impl SchedulingError {
    /// True when the caller's view of the slot grid is stale and should be reloaded
    pub fn requires_refresh(&self) -> bool {
        matches!(
            self,
            Self::SlotNotFound(_) | Self::SlotAlreadyBooked(_) | Self::ConcurrentBookingConflict(_)
        )
    }

    /// True when repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentBookingConflict(_))
    }
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
