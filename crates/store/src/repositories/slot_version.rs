use slotbook_core::models::slot::SlotId;

use crate::{INITIAL_SLOT_VERSION, SchedulingStore};

pub fn get_slot_version(store: &SchedulingStore, slot_id: &SlotId) -> u64 {
    store
        .slot_versions
        .get(slot_id)
        .copied()
        .unwrap_or(INITIAL_SLOT_VERSION)
}

/// Records a claim or release of `slot_id` and returns the new version.
pub fn bump_slot_version(store: &mut SchedulingStore, slot_id: &SlotId) -> u64 {
    let version = store
        .slot_versions
        .entry(slot_id.clone())
        .or_insert(INITIAL_SLOT_VERSION);
    *version += 1;

    tracing::debug!("Slot version bumped: slot_id={}, version={}", slot_id, version);
    *version
}
