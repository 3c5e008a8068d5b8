use slotbook_core::models::{availability::WeeklyAvailability, settings::InterviewerSettings};

use crate::SchedulingStore;

pub fn get_settings(store: &SchedulingStore) -> &InterviewerSettings {
    &store.settings
}

pub fn replace_settings(store: &mut SchedulingStore, settings: InterviewerSettings) {
    tracing::debug!(
        "Replacing settings: id={}, max_per_week={}, days={}",
        settings.id,
        settings.max_interviews_per_week,
        settings.weekly_availability.len()
    );
    store.settings = settings;
}

pub fn replace_availability(store: &mut SchedulingStore, availability: Vec<WeeklyAvailability>) {
    tracing::debug!("Replacing weekly availability: days={}", availability.len());
    store.settings.weekly_availability = availability;
}
