use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    settings::{validate_email, validate_name},
    slot::SlotId,
};
use crate::errors::SchedulingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Rescheduled,
}

impl BookingStatus {
    /// Confirmed and rescheduled bookings occupy their slot.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// `confirmed <-> rescheduled`, either to `cancelled`; nothing leaves `cancelled`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        match (self, next) {
            (Self::Cancelled, _) => false,
            (_, Self::Confirmed) => self == Self::Rescheduled,
            _ => true,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub slot_id: SlotId,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// A fresh confirmed booking with both timestamps set to `now`.
    pub fn confirmed(slot_id: SlotId, candidate: Candidate, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            slot_id,
            candidate_id: Uuid::new_v4(),
            candidate_name: candidate.name,
            candidate_email: candidate.email,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Contact details a candidate submits when booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub email: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Form-level check for collaborators; the ledger does not require it.
    pub fn validate(&self) -> SchedulingResult<()> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}
