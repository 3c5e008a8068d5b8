use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use slotbook_core::models::slot::SlotId;

use crate::{clock::Clock, fault::ConflictSimulator};

// Mock seams for testing
mock! {
    pub Clock {}

    impl Clock for Clock {
        fn now(&self) -> DateTime<Utc>;
        fn today(&self) -> NaiveDate;
    }
}

mock! {
    pub ConflictSimulator {}

    impl ConflictSimulator for ConflictSimulator {
        fn should_conflict(&self, slot_id: &SlotId) -> bool;
    }
}
