use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::availability::hhmm;
use crate::errors::SchedulingError;

const PREFIX: &str = "slot-";

/// Deterministic slot identity of the form `slot-YYYY-MM-DD-HH:MM`.
///
/// The id is derived from the slot's date and start time, so regenerating the
/// grid from the same availability always yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(date: NaiveDate, start_time: NaiveTime) -> Self {
        Self(format!(
            "{PREFIX}{}-{}",
            date.format("%Y-%m-%d"),
            start_time.format(hhmm::FORMAT)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recovers the date and start time encoded in the id.
    pub fn parts(&self) -> Option<(NaiveDate, NaiveTime)> {
        let rest = self.0.strip_prefix(PREFIX)?;
        let (date, time) = rest.split_at_checked(10)?;
        let time = time.strip_prefix('-')?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        Some((date, hhmm::parse(time)?))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.parts().map(|(date, _)| date)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SlotId {
    type Err = SchedulingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let id = Self(value.to_string());
        match id.parts() {
            Some(_) => Ok(id),
            None => Err(SchedulingError::Validation(format!("Malformed slot id: {value}"))),
        }
    }
}

impl From<&str> for SlotId {
    /// Wraps an id as-is; lookups against the grid decide whether it exists.
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSlot {
    pub id: SlotId,
    pub interviewer_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub version: u64,
}

impl InterviewSlot {
    /// Canonical ordering key: date, then start time, then id as tie-breaker.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime, &SlotId) {
        (self.date, self.start_time, &self.id)
    }
}
