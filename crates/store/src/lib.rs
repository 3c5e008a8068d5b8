//! # Slotbook Store
//!
//! In-memory state owned by the scheduling facade: the interviewer's settings,
//! the append-only booking ledger and per-slot version counters. Callers hold
//! the store by value (or behind a lock) and mutate it only through
//! [`repositories`].

pub mod repositories;

use std::collections::HashMap;

use slotbook_core::models::{booking::Booking, settings::InterviewerSettings, slot::SlotId};

/// First version carried by a slot that has never been claimed or released
pub const INITIAL_SLOT_VERSION: u64 = 1;

#[derive(Debug, Clone, Default)]
pub struct SchedulingStore {
    pub(crate) settings: InterviewerSettings,
    pub(crate) bookings: Vec<Booking>,
    pub(crate) slot_versions: HashMap<SlotId, u64>,
}

impl SchedulingStore {
    pub fn new(settings: InterviewerSettings) -> Self {
        Self {
            settings,
            bookings: Vec::new(),
            slot_versions: HashMap::new(),
        }
    }
}
