use pretty_assertions::assert_eq;
use slotbook_core::models::{booking::BookingStatus, settings::InterviewerSettings};
use tokio_test::assert_ok;

use crate::test_utils::{TestContext, candidate, monday_morning, slot_id};

#[tokio::test]
async fn test_default_settings_fill_two_working_weeks() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(InterviewerSettings::default());

    let slots = scheduler.get_slots().await;

    // Mon 12 + Tue 10 + Wed 12 + Thu 12 + Fri 10 slots, twice
    assert_eq!(slots.len(), 112);
    assert!(slots.iter().all(|s| s.interviewer_id == "interviewer-1"));
    assert!(slots.iter().all(|s| s.date > ctx.clock.today));
}

#[tokio::test]
async fn test_regenerated_grid_is_identical() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(InterviewerSettings::default());
    assert_ok!(scheduler.book_slot(slot_id(4, 15, 0), candidate()).await);

    assert_eq!(scheduler.get_slots().await, scheduler.get_slots().await);
}

#[tokio::test]
async fn test_snapshot_matches_individual_reads() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(5));
    assert_ok!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);
    assert_ok!(scheduler.book_slot(slot_id(9, 9, 0), candidate()).await);

    let snapshot = scheduler.snapshot().await;

    assert_eq!(snapshot.settings, scheduler.get_settings().await);
    assert_eq!(snapshot.slots, scheduler.get_slots().await);
    assert_eq!(snapshot.bookings, scheduler.get_bookings().await);
    assert_eq!(snapshot.weekly_booking_count, 1);
    assert_eq!(scheduler.get_weekly_booking_count().await, 1);
}

#[tokio::test]
async fn test_rescheduled_bookings_read_consistently() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(5));
    let booking = assert_ok!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);
    assert_ok!(scheduler.reschedule_booking(booking.id, slot_id(2, 9, 30)).await);

    let slots = scheduler.get_slots().await;
    let booked: Vec<_> = slots.iter().filter(|s| s.is_booked).map(|s| s.id.clone()).collect();
    assert_eq!(booked, vec![slot_id(2, 9, 30)]);

    let holder = scheduler.booking_for_slot(&slot_id(2, 9, 30)).await.unwrap();
    assert_eq!(holder.status, BookingStatus::Rescheduled);
    assert!(scheduler.booking_for_slot(&slot_id(2, 9, 0)).await.is_none());

    let summaries = scheduler.day_summaries().await;
    let monday = summaries.iter().find(|d| d.date == slot_id(2, 9, 0).date().unwrap()).unwrap();
    assert_eq!((monday.total_slots, monday.available, monday.booked), (2, 1, 1));
    assert_eq!(monday.bookings.len(), 1);

    assert_eq!(scheduler.get_weekly_booking_count().await, 1);
    assert_eq!(scheduler.active_bookings().await.len(), 1);
}

#[tokio::test]
async fn test_day_summaries_cover_days_with_slots() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(InterviewerSettings::default());

    let summaries = scheduler.day_summaries().await;

    assert_eq!(summaries.len(), 10);
    assert!(summaries.iter().all(|d| (1..=5).contains(&d.day_of_week)));
    assert_eq!(summaries.iter().map(|d| d.total_slots).sum::<usize>(), 112);
}
