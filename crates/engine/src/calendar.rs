use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{availability::weekday_index, booking::Booking, slot::InterviewSlot};
use slotbook_store::{SchedulingStore, repositories::booking};

/// What a calendar cell shows for one date of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub day_of_week: u8,
    pub total_slots: usize,
    pub available: usize,
    pub booked: usize,
    /// Active bookings held on this date's slots
    pub bookings: Vec<Booking>,
}

/// One summary per date that has at least one slot, in date order.
pub fn summarize_days(slots: &[InterviewSlot], store: &SchedulingStore) -> Vec<DaySummary> {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();

    for slot in slots {
        let day = days.entry(slot.date).or_insert_with(|| DaySummary {
            date: slot.date,
            day_of_week: weekday_index(slot.date.weekday()),
            total_slots: 0,
            available: 0,
            booked: 0,
            bookings: Vec::new(),
        });

        day.total_slots += 1;
        if slot.is_booked {
            day.booked += 1;
        } else {
            day.available += 1;
        }
        if let Some(booking) = booking::get_active_booking_for_slot(store, &slot.id) {
            day.bookings.push(booking.clone());
        }
    }

    days.into_values().collect()
}
