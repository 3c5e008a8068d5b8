use rand::Rng;
use slotbook_core::models::slot::SlotId;

/// Default chance that a booking loses a simulated race
pub const DEFAULT_CONFLICT_PROBABILITY: f64 = 0.05;

/// Decides whether a booking attempt should lose a simulated last-instant race.
///
/// This only injects faults; real contention is detected through slot versions.
pub trait ConflictSimulator: Send + Sync {
    fn should_conflict(&self, slot_id: &SlotId) -> bool;
}

/// Fires with a fixed probability on every booking attempt.
#[derive(Debug, Clone, Copy)]
pub struct RandomConflicts {
    probability: f64,
}

impl RandomConflicts {
    /// `probability` is clamped to `0.0..=1.0`.
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for RandomConflicts {
    fn default() -> Self {
        Self::new(DEFAULT_CONFLICT_PROBABILITY)
    }
}

impl ConflictSimulator for RandomConflicts {
    fn should_conflict(&self, _slot_id: &SlotId) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}

/// Never injects a conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConflicts;

impl ConflictSimulator for NoConflicts {
    fn should_conflict(&self, _slot_id: &SlotId) -> bool {
        false
    }
}
