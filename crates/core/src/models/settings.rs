use serde::{Deserialize, Serialize};

use super::availability::{TimeRange, WeeklyAvailability, validate_availability};
use crate::errors::{SchedulingError, SchedulingResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewerSettings {
    pub id: String,
    pub name: String,
    pub email: String,
    pub max_interviews_per_week: u32,
    pub weekly_availability: Vec<WeeklyAvailability>,
}

impl InterviewerSettings {
    pub fn availability_for(&self, day_of_week: u8) -> Option<&WeeklyAvailability> {
        self.weekly_availability
            .iter()
            .find(|day| day.day_of_week == day_of_week)
    }

    pub fn validate(&self) -> SchedulingResult<()> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_weekly_limit(self.max_interviews_per_week)?;
        validate_availability(&self.weekly_availability)
    }
}

impl Default for InterviewerSettings {
    fn default() -> Self {
        let day = |day_of_week, ranges: &[(&str, &str)]| {
            WeeklyAvailability::new(
                day_of_week,
                ranges
                    .iter()
                    .filter_map(|(start, end)| TimeRange::parse(start, end).ok())
                    .collect(),
            )
        };

        Self {
            id: "interviewer-1".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@company.com".to_string(),
            max_interviews_per_week: 20,
            weekly_availability: vec![
                day(1, &[("09:00", "12:00"), ("14:00", "17:00")]),
                day(2, &[("10:00", "12:00"), ("13:00", "16:00")]),
                day(3, &[("09:00", "11:00"), ("14:00", "18:00")]),
                day(4, &[("09:00", "12:00"), ("14:00", "17:00")]),
                day(5, &[("10:00", "15:00")]),
            ],
        }
    }
}

/// Partial settings update; only the fields that are present are overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub max_interviews_per_week: Option<u32>,
    pub weekly_availability: Option<Vec<WeeklyAvailability>>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> SchedulingResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(limit) = self.max_interviews_per_week {
            validate_weekly_limit(limit)?;
        }
        if let Some(availability) = &self.weekly_availability {
            validate_availability(availability)?;
        }
        Ok(())
    }

    /// Shallow overwrite of `settings` with the present fields.
    pub fn apply_to(self, settings: &mut InterviewerSettings) {
        if let Some(name) = self.name {
            settings.name = name;
        }
        if let Some(email) = self.email {
            settings.email = email;
        }
        if let Some(limit) = self.max_interviews_per_week {
            settings.max_interviews_per_week = limit;
        }
        if let Some(availability) = self.weekly_availability {
            settings.weekly_availability = sorted_by_day(availability);
        }
    }
}

pub fn sorted_by_day(mut availability: Vec<WeeklyAvailability>) -> Vec<WeeklyAvailability> {
    availability.sort_by_key(|day| day.day_of_week);
    availability
}

pub(crate) fn validate_name(name: &str) -> SchedulingResult<()> {
    if name.trim().is_empty() {
        return Err(SchedulingError::Validation("Name must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> SchedulingResult<()> {
    if !email.contains('@') {
        return Err(SchedulingError::Validation(format!("Invalid email address: {email}")));
    }
    Ok(())
}

fn validate_weekly_limit(limit: u32) -> SchedulingResult<()> {
    if limit == 0 {
        return Err(SchedulingError::Validation(
            "Maximum interviews per week must be at least 1".to_string(),
        ));
    }
    Ok(())
}
