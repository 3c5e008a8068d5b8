//! Line-oriented JSON front end over a [`Scheduler`].
//!
//! Each input line is one command object tagged by `op`. Every command gets
//! exactly one response line: `{"ok": ...}` on success or `{"error": "..."}`
//! on failure.

use chrono::NaiveDate;
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use slotbook_core::{
    errors::{SchedulingError, SchedulingResult},
    models::{
        availability::WeeklyAvailability,
        booking::Candidate,
        page::{DEFAULT_PAGE_LIMIT, PageRequest},
        settings::SettingsUpdate,
        slot::SlotId,
    },
};
use slotbook_engine::Scheduler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Command {
    Settings,
    Slots,
    Bookings,
    ActiveBookings,
    WeeklyCount,
    Summary,
    Page {
        cursor: Option<SlotId>,
        #[serde(default = "default_limit")]
        limit: usize,
        date: Option<NaiveDate>,
    },
    Book {
        slot_id: SlotId,
        name: String,
        email: String,
    },
    Cancel {
        booking_id: Uuid,
    },
    Reschedule {
        booking_id: Uuid,
        slot_id: SlotId,
    },
    UpdateSettings(SettingsUpdate),
    UpdateAvailability {
        availability: Vec<WeeklyAvailability>,
    },
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn payload<T: Serialize>(value: T) -> SchedulingResult<Value> {
    serde_json::to_value(value).map_err(|e| SchedulingError::Store(e.into()))
}

async fn execute(scheduler: &Scheduler, command: Command) -> SchedulingResult<Value> {
    match command {
        Command::Settings => payload(scheduler.get_settings().await),
        Command::Slots => payload(scheduler.get_slots().await),
        Command::Bookings => payload(scheduler.get_bookings().await),
        Command::ActiveBookings => payload(scheduler.active_bookings().await),
        Command::WeeklyCount => payload(scheduler.get_weekly_booking_count().await),
        Command::Summary => payload(scheduler.day_summaries().await),
        Command::Page { cursor, limit, date } => {
            let request = PageRequest {
                cursor,
                limit,
                date_filter: date,
            };
            payload(scheduler.get_paginated_slots(&request).await?)
        }
        Command::Book { slot_id, name, email } => {
            let candidate = Candidate::new(name, email);
            candidate.validate()?;
            payload(scheduler.book_slot(slot_id, candidate).await?)
        }
        Command::Cancel { booking_id } => payload(scheduler.cancel_booking(booking_id).await?),
        Command::Reschedule { booking_id, slot_id } => {
            payload(scheduler.reschedule_booking(booking_id, slot_id).await?)
        }
        Command::UpdateSettings(update) => payload(scheduler.update_settings(update).await?),
        Command::UpdateAvailability { availability } => {
            scheduler.update_availability(availability).await?;
            payload(scheduler.get_settings().await)
        }
    }
}

/// Answers a single input line.
pub async fn handle_line(scheduler: &Scheduler, line: &str) -> Value {
    let command: Command = match serde_json::from_str(line) {
        Ok(command) => command,
        Err(e) => {
            warn!("Malformed command: {}", e);
            return json!({ "error": format!("Malformed command: {e}") });
        }
    };
    debug!("Executing {:?}", command);

    match execute(scheduler, command).await {
        Ok(value) => json!({ "ok": value }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// Processes commands until `input` reaches end of file.
pub async fn run<R, W>(scheduler: &Scheduler, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(scheduler, &line).await;
        output.write_all(response.to_string().as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    Ok(())
}
