use std::time::Duration;

use pretty_assertions::assert_eq;
use slotbook_core::{
    errors::SchedulingError,
    models::{booking::BookingStatus, settings::InterviewerSettings},
};
use slotbook_engine::mock::{MockClock, MockConflictSimulator};
use slotbook_store::INITIAL_SLOT_VERSION;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use crate::test_utils::{TestContext, candidate, monday_morning, slot_id};

#[test_log::test(tokio::test)]
async fn test_monday_hour_cap_of_one() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(1));

    let first_monday: Vec<_> = scheduler
        .get_slots()
        .await
        .into_iter()
        .filter(|slot| slot.date == slot_id(2, 9, 0).date().unwrap())
        .map(|slot| {
            format!(
                "{}-{}",
                slot.start_time.format("%H:%M"),
                slot.end_time.format("%H:%M")
            )
        })
        .collect();
    assert_eq!(first_monday, vec!["09:00-09:30", "09:30-10:00"]);

    assert_ok!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);
    let second = scheduler.book_slot(slot_id(2, 9, 30), candidate()).await;

    assert!(matches!(
        second,
        Err(SchedulingError::WeeklyLimitReached { limit: 1, .. })
    ));
    assert_eq!(scheduler.get_bookings().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_cap_counts_each_week_separately() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(2));

    for id in [slot_id(2, 9, 0), slot_id(2, 9, 30), slot_id(9, 9, 0), slot_id(9, 9, 30)] {
        assert_ok!(scheduler.book_slot(id, candidate()).await);
    }

    assert_eq!(scheduler.get_weekly_booking_count().await, 2);
}

#[test_log::test(tokio::test)]
async fn test_nth_plus_one_booking_fails() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(InterviewerSettings {
        max_interviews_per_week: 3,
        ..InterviewerSettings::default()
    });

    // Tuesday 2026-03-03 runs 10:00-12:00 and 13:00-16:00 by default
    for (hour, minute) in [(10, 0), (10, 30), (11, 0)] {
        assert_ok!(scheduler.book_slot(slot_id(3, hour, minute), candidate()).await);
    }
    let fourth = scheduler.book_slot(slot_id(3, 11, 30), candidate()).await;

    assert!(matches!(fourth, Err(SchedulingError::WeeklyLimitReached { limit: 3, .. })));
}

#[test_log::test(tokio::test)]
async fn test_concurrent_bookings_for_one_slot_have_one_winner() {
    let ctx = TestContext::new();
    let scheduler = ctx.slow_scheduler(monday_morning(5), Duration::from_millis(20));
    let target = slot_id(2, 9, 0);

    let (a, b) = tokio::join!(
        scheduler.book_slot(target.clone(), candidate()),
        scheduler.book_slot(target.clone(), candidate()),
    );

    let outcomes = [a, b];
    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(SchedulingError::SlotAlreadyBooked(_)) | Err(SchedulingError::ConcurrentBookingConflict(_))
    )));

    let active_on_target = scheduler
        .active_bookings()
        .await
        .into_iter()
        .filter(|booking| booking.slot_id == target)
        .count();
    assert_eq!(active_on_target, 1);
}

#[test_log::test(tokio::test)]
async fn test_spawned_tasks_never_double_book() {
    let ctx = TestContext::new();
    let scheduler = ctx.slow_scheduler(monday_morning(50), Duration::from_millis(5));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.book_slot(slot_id(9, 9, 30), candidate()).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
}

#[test_log::test(tokio::test)]
async fn test_injected_conflict_is_reported_and_retryable() {
    let ctx = TestContext::new();
    let mut conflicts = MockConflictSimulator::new();
    conflicts.expect_should_conflict().times(1).return_const(true);
    let scheduler = ctx.scheduler(monday_morning(5)).with_conflicts(conflicts);

    let error = assert_err!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);

    assert!(matches!(error, SchedulingError::ConcurrentBookingConflict(_)));
    assert!(error.is_retryable());
    assert!(error.requires_refresh());
    assert!(scheduler.get_bookings().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_conflict_hook_is_not_consulted_when_earlier_checks_fail() {
    let ctx = TestContext::new();
    let mut conflicts = MockConflictSimulator::new();
    conflicts.expect_should_conflict().never();
    let scheduler = ctx.scheduler(monday_morning(5)).with_conflicts(conflicts);

    let error = assert_err!(scheduler.book_slot(slot_id(3, 9, 0), candidate()).await);

    assert!(matches!(error, SchedulingError::SlotNotFound(_)));
}

#[test_log::test(tokio::test)]
async fn test_booking_is_stamped_when_the_attempt_starts() {
    let ctx = TestContext::new();
    let mut clock = MockClock::new();
    clock.expect_now().times(1).return_const(ctx.clock.now);
    clock.expect_today().return_const(ctx.clock.today);
    let scheduler = ctx
        .slow_scheduler(monday_morning(5), Duration::from_millis(20))
        .with_clock(clock);

    let booking = assert_ok!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);

    assert_eq!(booking.created_at, ctx.clock.now);
    assert_eq!(booking.updated_at, ctx.clock.now);
}

#[test_log::test(tokio::test)]
async fn test_slot_versions_follow_claims_and_releases() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(5));
    let target = slot_id(2, 9, 0);
    let version = |slots: Vec<slotbook_core::models::slot::InterviewSlot>| {
        slots.into_iter().find(|s| s.id == target).map(|s| s.version)
    };

    assert_eq!(version(scheduler.get_slots().await), Some(INITIAL_SLOT_VERSION));

    let booking = assert_ok!(scheduler.book_slot(target.clone(), candidate()).await);
    assert_eq!(version(scheduler.get_slots().await), Some(INITIAL_SLOT_VERSION + 1));

    assert_ok!(scheduler.cancel_booking(booking.id).await);
    assert_eq!(version(scheduler.get_slots().await), Some(INITIAL_SLOT_VERSION + 2));
}

#[test_log::test(tokio::test)]
async fn test_reschedule_frees_origin() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(5));
    let origin = slot_id(2, 9, 0);
    let target = slot_id(9, 9, 30);

    let booking = assert_ok!(scheduler.book_slot(origin.clone(), candidate()).await);
    let moved = assert_ok!(scheduler.reschedule_booking(booking.id, target.clone()).await);

    assert_eq!(moved.id, booking.id);
    assert_eq!(moved.status, BookingStatus::Rescheduled);

    let slots = scheduler.get_slots().await;
    let is_booked = |id| slots.iter().find(|s| s.id == id).map(|s| s.is_booked);
    assert_eq!(is_booked(origin.clone()), Some(false));
    assert_eq!(is_booked(target.clone()), Some(true));

    // The freed origin can be booked again
    assert_ok!(scheduler.book_slot(origin, candidate()).await);
}

#[test_log::test(tokio::test)]
async fn test_cancel_nonexistent_booking_leaves_ledger_unchanged() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(5));
    assert_ok!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);
    let before = scheduler.get_bookings().await;

    let error = assert_err!(scheduler.cancel_booking(Uuid::new_v4()).await);

    assert!(matches!(error, SchedulingError::BookingNotFound(_)));
    assert_eq!(scheduler.get_bookings().await, before);
}

#[test_log::test(tokio::test)]
async fn test_cancel_keeps_history() {
    let ctx = TestContext::new();
    let scheduler = ctx.scheduler(monday_morning(5));
    let booking = assert_ok!(scheduler.book_slot(slot_id(2, 9, 0), candidate()).await);

    let cancelled = assert_ok!(scheduler.cancel_booking(booking.id).await);

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(scheduler.get_bookings().await, vec![cancelled]);
    assert!(scheduler.active_bookings().await.is_empty());

    let again = assert_err!(scheduler.cancel_booking(booking.id).await);
    assert!(matches!(again, SchedulingError::InvalidStateTransition { .. }));
}

#[test_log::test(tokio::test)]
async fn test_in_flight_tracks_suspended_operations() {
    let ctx = TestContext::new();
    let scheduler = ctx.slow_scheduler(monday_morning(5), Duration::from_millis(100));
    assert!(!scheduler.is_busy());

    let background = scheduler.clone();
    let handle = tokio::spawn(async move { background.book_slot(slot_id(2, 9, 0), candidate()).await });

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(scheduler.in_flight(), 1);

    assert_ok!(handle.await.unwrap());
    assert!(!scheduler.is_busy());
}
