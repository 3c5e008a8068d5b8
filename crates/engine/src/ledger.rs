//! Booking state transitions.
//!
//! Every function here runs inside the facade's exclusive critical section and
//! receives the slot grid generated from the same store state, so checks and
//! commits see one consistent view.
//!
//! Status machine: `confirmed <-> rescheduled`, either to `cancelled`, and
//! nothing leaves `cancelled`.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use slotbook_core::{
    errors::{SchedulingError, SchedulingResult},
    models::{
        booking::{Booking, BookingStatus, Candidate},
        slot::{InterviewSlot, SlotId},
    },
};
use slotbook_store::{
    SchedulingStore,
    repositories::{booking, settings, slot_version},
};
use uuid::Uuid;

use crate::fault::ConflictSimulator;

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Active bookings whose slot falls in the seven days starting at `week_start`.
///
/// The slot date is read from the slot id, so a booking keeps counting even
/// when availability no longer generates its slot.
pub fn bookings_in_week(bookings: &[Booking], week_start: NaiveDate) -> impl Iterator<Item = &Booking> {
    let week_end = week_start.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
    bookings.iter().filter(move |booking| {
        booking.is_active()
            && booking
                .slot_id
                .date()
                .is_some_and(|date| date >= week_start && date < week_end)
    })
}

pub fn weekly_booking_count(bookings: &[Booking], week_start: NaiveDate) -> usize {
    bookings_in_week(bookings, week_start).count()
}

fn find_slot<'a>(slots: &'a [InterviewSlot], slot_id: &SlotId) -> SchedulingResult<&'a InterviewSlot> {
    slots
        .iter()
        .find(|slot| &slot.id == slot_id)
        .ok_or_else(|| SchedulingError::SlotNotFound(slot_id.clone()))
}

fn find_booking(store: &SchedulingStore, id: Uuid) -> SchedulingResult<&Booking> {
    booking::get_booking_by_id(store, id).ok_or(SchedulingError::BookingNotFound(id))
}

fn ensure_transition(current: &Booking, next: BookingStatus) -> SchedulingResult<()> {
    if current.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(SchedulingError::InvalidStateTransition {
            id: current.id,
            from: current.status,
            to: next,
        })
    }
}

/// A booking request as observed by the caller when the operation started.
#[derive(Debug, Clone)]
pub struct BookingAttempt {
    pub slot_id: SlotId,
    pub candidate: Candidate,
    /// Slot version read before the caller was suspended
    pub observed_version: u64,
    pub started_at: DateTime<Utc>,
}

/// Books a slot. Checks run in order and the first failure wins:
/// unknown slot, slot already held, weekly cap for the slot's week, then a
/// conflict (simulated, or the slot version moved since `observed_version`).
pub fn book_slot(
    store: &mut SchedulingStore,
    slots: &[InterviewSlot],
    attempt: BookingAttempt,
    conflicts: &dyn ConflictSimulator,
) -> SchedulingResult<Booking> {
    let slot = find_slot(slots, &attempt.slot_id)?;

    if slot.is_booked {
        return Err(SchedulingError::SlotAlreadyBooked(slot.id.clone()));
    }

    let week = week_start(slot.date);
    let limit = settings::get_settings(store).max_interviews_per_week;
    if weekly_booking_count(booking::list_bookings(store), week) >= limit as usize {
        return Err(SchedulingError::WeeklyLimitReached {
            week_start: week,
            limit,
        });
    }

    let current_version = slot_version::get_slot_version(store, &slot.id);
    if conflicts.should_conflict(&slot.id) || current_version != attempt.observed_version {
        return Err(SchedulingError::ConcurrentBookingConflict(slot.id.clone()));
    }

    let created = booking::insert_booking(
        store,
        Booking::confirmed(attempt.slot_id, attempt.candidate, attempt.started_at),
    );
    slot_version::bump_slot_version(store, &created.slot_id);

    Ok(created)
}

/// Cancels a booking; its slot becomes free on the next grid read.
pub fn cancel_booking(store: &mut SchedulingStore, id: Uuid, now: DateTime<Utc>) -> SchedulingResult<Booking> {
    let current = find_booking(store, id)?;
    ensure_transition(current, BookingStatus::Cancelled)?;
    let released = current.slot_id.clone();

    let cancelled = booking::update_booking(store, id, BookingStatus::Cancelled, None, now)?;
    slot_version::bump_slot_version(store, &released);

    Ok(cancelled)
}

/// Moves a booking to `new_slot_id`. The origin slot is released implicitly,
/// since booked state derives from active bookings' current slot.
pub fn reschedule_booking(
    store: &mut SchedulingStore,
    slots: &[InterviewSlot],
    id: Uuid,
    new_slot_id: &SlotId,
    now: DateTime<Utc>,
) -> SchedulingResult<Booking> {
    let current = find_booking(store, id)?;
    ensure_transition(current, BookingStatus::Rescheduled)?;
    let origin = current.slot_id.clone();

    let target = find_slot(slots, new_slot_id)?;
    if target.is_booked {
        return Err(SchedulingError::SlotAlreadyBooked(target.id.clone()));
    }

    let moved = booking::update_booking(
        store,
        id,
        BookingStatus::Rescheduled,
        Some(target.id.clone()),
        now,
    )?;
    slot_version::bump_slot_version(store, &origin);
    slot_version::bump_slot_version(store, &moved.slot_id);

    Ok(moved)
}
