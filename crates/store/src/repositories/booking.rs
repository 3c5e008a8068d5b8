use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use slotbook_core::models::{
    booking::{Booking, BookingStatus},
    slot::SlotId,
};
use uuid::Uuid;

use crate::SchedulingStore;

pub fn insert_booking(store: &mut SchedulingStore, booking: Booking) -> Booking {
    tracing::debug!(
        "Inserting booking: id={}, slot_id={}, status={}",
        booking.id,
        booking.slot_id,
        booking.status
    );
    store.bookings.push(booking.clone());
    booking
}

/// All bookings in insertion order, cancelled ones included.
pub fn list_bookings(store: &SchedulingStore) -> &[Booking] {
    &store.bookings
}

pub fn get_booking_by_id(store: &SchedulingStore, id: Uuid) -> Option<&Booking> {
    store.bookings.iter().find(|booking| booking.id == id)
}

pub fn get_active_booking_for_slot<'a>(
    store: &'a SchedulingStore,
    slot_id: &SlotId,
) -> Option<&'a Booking> {
    store
        .bookings
        .iter()
        .find(|booking| booking.is_active() && &booking.slot_id == slot_id)
}

/// Moves a booking to `status`, optionally pointing it at a new slot.
///
/// Only `status`, `slot_id` and `updated_at` ever change after creation.
pub fn update_booking(
    store: &mut SchedulingStore,
    id: Uuid,
    status: BookingStatus,
    slot_id: Option<SlotId>,
    now: DateTime<Utc>,
) -> Result<Booking> {
    let booking = store
        .bookings
        .iter_mut()
        .find(|booking| booking.id == id)
        .ok_or_else(|| eyre!("Booking {} not found", id))?;

    booking.status = status;
    if let Some(slot_id) = slot_id {
        booking.slot_id = slot_id;
    }
    booking.updated_at = now;

    tracing::debug!(
        "Booking updated: id={}, slot_id={}, status={}",
        booking.id,
        booking.slot_id,
        booking.status
    );
    Ok(booking.clone())
}
