use std::collections::HashSet;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{SchedulingError, SchedulingResult};

/// "HH:MM" 24-hour wire format for times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(value: &str) -> Option<NaiveTime> {
        // fixed width keeps lexicographic and chronological order identical
        if value.len() != 5 {
            return None;
        }
        NaiveTime::parse_from_str(value, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid HH:MM time: {raw}")))
    }
}

/// Minutes elapsed since midnight.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl TimeRange {
    /// Builds a range from two "HH:MM" strings without checking their order.
    pub fn parse(start_time: &str, end_time: &str) -> SchedulingResult<Self> {
        let parse = |value: &str| {
            hhmm::parse(value)
                .ok_or_else(|| SchedulingError::Validation(format!("Invalid time of day: {value}")))
        };

        Ok(Self {
            start_time: parse(start_time)?,
            end_time: parse(end_time)?,
        })
    }

    pub fn validate(&self) -> SchedulingResult<()> {
        match self.order_problem() {
            Some(problem) => Err(SchedulingError::Validation(problem)),
            None => Ok(()),
        }
    }

    fn order_problem(&self) -> Option<String> {
        (self.start_time >= self.end_time).then(|| {
            format!(
                "Start time {} must be before end time {}",
                self.start_time.format(hhmm::FORMAT),
                self.end_time.format(hhmm::FORMAT),
            )
        })
    }

    pub fn duration_minutes(&self) -> u32 {
        minutes_of_day(self.end_time).saturating_sub(minutes_of_day(self.start_time))
    }
}

/// Recurring availability for one day of the week.
///
/// `day_of_week` counts from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub day_of_week: u8,
    pub slots: Vec<TimeRange>,
}

impl WeeklyAvailability {
    pub fn new(day_of_week: u8, slots: Vec<TimeRange>) -> Self {
        Self { day_of_week, slots }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_index(self.day_of_week)
    }
}

pub fn weekday_from_index(day_of_week: u8) -> Option<Weekday> {
    match day_of_week {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Checks a full availability list before it replaces the current one.
///
/// Rejects unknown days, days listed twice and ranges that do not end after they start.
pub fn validate_availability(availability: &[WeeklyAvailability]) -> SchedulingResult<()> {
    let mut seen = HashSet::new();

    for day in availability {
        let weekday = day.weekday().ok_or_else(|| {
            SchedulingError::Validation(format!("Day of week must be 0-6, got {}", day.day_of_week))
        })?;

        if !seen.insert(day.day_of_week) {
            return Err(SchedulingError::Validation(format!(
                "{weekday} is listed more than once"
            )));
        }

        if let Some(problem) = day.slots.iter().find_map(TimeRange::order_problem) {
            return Err(SchedulingError::Validation(format!("{weekday}: {problem}")));
        }
    }

    Ok(())
}
