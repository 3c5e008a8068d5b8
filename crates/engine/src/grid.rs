//! Expands recurring weekly availability into concrete 30-minute slots.
//!
//! Slots are never stored: the grid is recomputed from the settings and the
//! bookings on every read. Slot ids are derived from `(date, start_time)`, so
//! identical inputs always produce an identical grid.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use slotbook_core::models::{
    availability::{TimeRange, minutes_of_day, weekday_index},
    booking::Booking,
    settings::InterviewerSettings,
    slot::{InterviewSlot, SlotId},
};
use slotbook_store::INITIAL_SLOT_VERSION;

/// Width of every generated slot
pub const SLOT_MINUTES: u32 = 30;
/// Number of days after today covered by the grid
pub const HORIZON_DAYS: u64 = 14;

/// The dates covered by the grid: tomorrow through `HORIZON_DAYS` days ahead.
pub fn window(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (1..=HORIZON_DAYS).filter_map(move |offset| today.checked_add_days(Days::new(offset)))
}

/// Ids of slots held by an active booking.
pub fn booked_slot_ids(bookings: &[Booking]) -> HashSet<&SlotId> {
    bookings
        .iter()
        .filter(|booking| booking.is_active())
        .map(|booking| &booking.slot_id)
        .collect()
}

/// Splits a range into back-to-back `SLOT_MINUTES` steps.
///
/// A trailing remainder shorter than one step is dropped; `start >= end` yields nothing.
pub fn split_range(range: &TimeRange) -> impl Iterator<Item = (NaiveTime, NaiveTime)> {
    let start = minutes_of_day(range.start_time);
    let end = minutes_of_day(range.end_time);

    (start..end)
        .step_by(SLOT_MINUTES as usize)
        .take_while(move |minute| minute + SLOT_MINUTES <= end)
        .filter_map(|minute| Some((time_at(minute)?, time_at(minute + SLOT_MINUTES)?)))
}

fn time_at(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Generates every slot in the rolling window, flagging those held by active bookings.
///
/// Output is ordered by date, then by the order of ranges within the day.
/// Overlapping ranges may produce slots that overlap in time; a slot id that
/// would be emitted twice is kept once.
pub fn generate_slots(
    settings: &InterviewerSettings,
    bookings: &[Booking],
    today: NaiveDate,
) -> Vec<InterviewSlot> {
    let booked = booked_slot_ids(bookings);
    let mut seen = HashSet::new();
    let mut slots = Vec::new();

    for date in window(today) {
        let Some(day) = settings.availability_for(weekday_index(date.weekday())) else {
            continue;
        };

        for range in &day.slots {
            for (start_time, end_time) in split_range(range) {
                let id = SlotId::new(date, start_time);
                if !seen.insert(id.clone()) {
                    continue;
                }

                slots.push(InterviewSlot {
                    is_booked: booked.contains(&id),
                    id,
                    interviewer_id: settings.id.clone(),
                    date,
                    start_time,
                    end_time,
                    version: INITIAL_SLOT_VERSION,
                });
            }
        }
    }

    slots
}
