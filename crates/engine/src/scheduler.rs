//! # Scheduling Facade
//!
//! [`Scheduler`] owns the store and is the only way to read or change scheduling
//! state. It is a cheap, cloneable handle: clones share the same store, so
//! several concurrent callers can hold one.
//!
//! ## Concurrency
//!
//! Mutating operations first suspend the caller for a configured latency,
//! modelling a network round trip. Validation and commit then run together
//! under the store's write lock, so two callers racing for one slot can never
//! both win. `book_slot` additionally records the slot version it saw before
//! suspending and reports a conflict if that version moved in the meantime.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use serde::{Deserialize, Serialize};
use slotbook_core::{
    errors::SchedulingResult,
    models::{
        availability::{WeeklyAvailability, validate_availability},
        booking::{Booking, Candidate},
        page::{Page, PageRequest},
        settings::{InterviewerSettings, SettingsUpdate, sorted_by_day},
        slot::{InterviewSlot, SlotId},
    },
};
use slotbook_store::{
    SchedulingStore,
    repositories::{booking, settings, slot_version},
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    calendar::{self, DaySummary},
    clock::{Clock, SystemClock},
    config::{EngineConfig, Latency},
    fault::{ConflictSimulator, RandomConflicts},
    grid,
    ledger::{self, BookingAttempt},
    pagination,
};

/// A consistent read model taken under a single lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingSnapshot {
    pub settings: InterviewerSettings,
    pub slots: Vec<InterviewSlot>,
    pub bookings: Vec<Booking>,
    pub weekly_booking_count: usize,
}

/// Decrements the in-flight counter when an operation resolves, however it ends.
struct Pending(Arc<AtomicUsize>);

impl Pending {
    fn start(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct Scheduler {
    store: Arc<RwLock<SchedulingStore>>,
    clock: Arc<dyn Clock>,
    conflicts: Arc<dyn ConflictSimulator>,
    latency: Latency,
    in_flight: Arc<AtomicUsize>,
}

impl Scheduler {
    /// Creates a scheduler on the system clock with random conflict injection
    /// and latency taken from `config`.
    pub fn new(settings: InterviewerSettings, config: &EngineConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(SchedulingStore::new(settings))),
            clock: Arc::new(SystemClock),
            conflicts: Arc::new(RandomConflicts::new(config.conflict_probability)),
            latency: config.latency,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_conflicts(mut self, conflicts: impl ConflictSimulator + 'static) -> Self {
        self.conflicts = Arc::new(conflicts);
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// The grid for the current store state, stamped with each slot's version.
    fn slots_for(&self, store: &SchedulingStore) -> Vec<InterviewSlot> {
        let mut slots = grid::generate_slots(
            settings::get_settings(store),
            booking::list_bookings(store),
            self.clock.today(),
        );
        for slot in &mut slots {
            slot.version = slot_version::get_slot_version(store, &slot.id);
        }
        slots
    }

    fn current_week_count(&self, store: &SchedulingStore) -> usize {
        let week = ledger::week_start(self.clock.today());
        ledger::weekly_booking_count(booking::list_bookings(store), week)
    }

    // --- Reads ---

    pub async fn get_settings(&self) -> InterviewerSettings {
        let store = self.store.read().await;
        settings::get_settings(&store).clone()
    }

    pub async fn get_slots(&self) -> Vec<InterviewSlot> {
        let store = self.store.read().await;
        self.slots_for(&store)
    }

    /// Every booking ever made, cancelled ones included.
    pub async fn get_bookings(&self) -> Vec<Booking> {
        let store = self.store.read().await;
        booking::list_bookings(&store).to_vec()
    }

    pub async fn active_bookings(&self) -> Vec<Booking> {
        let store = self.store.read().await;
        booking::list_bookings(&store)
            .iter()
            .filter(|b| b.is_active())
            .cloned()
            .collect()
    }

    pub async fn booking_for_slot(&self, slot_id: &SlotId) -> Option<Booking> {
        let store = self.store.read().await;
        booking::get_active_booking_for_slot(&store, slot_id).cloned()
    }

    /// Active bookings in the week (Sunday to Saturday) containing today.
    pub async fn get_weekly_booking_count(&self) -> usize {
        let store = self.store.read().await;
        self.current_week_count(&store)
    }

    pub async fn snapshot(&self) -> SchedulingSnapshot {
        let store = self.store.read().await;
        SchedulingSnapshot {
            settings: settings::get_settings(&store).clone(),
            slots: self.slots_for(&store),
            bookings: booking::list_bookings(&store).to_vec(),
            weekly_booking_count: self.current_week_count(&store),
        }
    }

    pub async fn day_summaries(&self) -> Vec<DaySummary> {
        let store = self.store.read().await;
        calendar::summarize_days(&self.slots_for(&store), &store)
    }

    pub async fn get_paginated_slots(&self, request: &PageRequest) -> SchedulingResult<Page<InterviewSlot>> {
        let store = self.store.read().await;
        let page = pagination::paginate(&self.slots_for(&store), request)?;
        debug!(
            "Served page: returned={}, total={}, has_more={}",
            page.data.len(),
            page.total_count,
            page.has_more
        );
        Ok(page)
    }

    /// Number of booking operations currently suspended.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    // --- Configuration updates ---

    /// Overwrites the fields present in `update`; last write wins.
    pub async fn update_settings(&self, update: SettingsUpdate) -> SchedulingResult<InterviewerSettings> {
        update.validate()?;

        let mut store = self.store.write().await;
        let mut next = settings::get_settings(&store).clone();
        update.apply_to(&mut next);
        settings::replace_settings(&mut store, next.clone());

        info!(
            "Settings updated: max_per_week={}, days={}",
            next.max_interviews_per_week,
            next.weekly_availability.len()
        );
        Ok(next)
    }

    /// Replaces the whole weekly availability.
    pub async fn update_availability(&self, availability: Vec<WeeklyAvailability>) -> SchedulingResult<()> {
        if let Err(e) = validate_availability(&availability) {
            warn!("Rejected availability update: {}", e);
            return Err(e);
        }

        let mut store = self.store.write().await;
        settings::replace_availability(&mut store, sorted_by_day(availability));
        info!("Availability replaced");
        Ok(())
    }

    // --- Booking operations ---

    pub async fn book_slot(&self, slot_id: SlotId, candidate: Candidate) -> SchedulingResult<Booking> {
        let _pending = Pending::start(&self.in_flight);
        let started_at = self.clock.now();
        let observed_version = {
            let store = self.store.read().await;
            slot_version::get_slot_version(&store, &slot_id)
        };

        tokio::time::sleep(self.latency.book).await;

        let mut store = self.store.write().await;
        let slots = self.slots_for(&store);
        let attempt = BookingAttempt {
            slot_id: slot_id.clone(),
            candidate,
            observed_version,
            started_at,
        };

        match ledger::book_slot(&mut store, &slots, attempt, self.conflicts.as_ref()) {
            Ok(created) => {
                info!("Slot booked: slot_id={}, booking_id={}", created.slot_id, created.id);
                Ok(created)
            }
            Err(e) => {
                warn!("Booking rejected: slot_id={}, reason={}", slot_id, e);
                Err(e)
            }
        }
    }

    pub async fn cancel_booking(&self, booking_id: Uuid) -> SchedulingResult<Booking> {
        let _pending = Pending::start(&self.in_flight);

        tokio::time::sleep(self.latency.cancel).await;

        let mut store = self.store.write().await;
        match ledger::cancel_booking(&mut store, booking_id, self.clock.now()) {
            Ok(cancelled) => {
                info!("Booking cancelled: booking_id={}, slot_id={}", cancelled.id, cancelled.slot_id);
                Ok(cancelled)
            }
            Err(e) => {
                warn!("Cancellation rejected: booking_id={}, reason={}", booking_id, e);
                Err(e)
            }
        }
    }

    pub async fn reschedule_booking(&self, booking_id: Uuid, new_slot_id: SlotId) -> SchedulingResult<Booking> {
        let _pending = Pending::start(&self.in_flight);

        tokio::time::sleep(self.latency.reschedule).await;

        let mut store = self.store.write().await;
        let slots = self.slots_for(&store);
        match ledger::reschedule_booking(&mut store, &slots, booking_id, &new_slot_id, self.clock.now()) {
            Ok(moved) => {
                info!("Booking rescheduled: booking_id={}, slot_id={}", moved.id, moved.slot_id);
                Ok(moved)
            }
            Err(e) => {
                warn!(
                    "Reschedule rejected: booking_id={}, slot_id={}, reason={}",
                    booking_id, new_slot_id, e
                );
                Err(e)
            }
        }
    }
}
