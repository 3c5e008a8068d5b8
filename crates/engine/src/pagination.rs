use slotbook_core::{
    errors::{SchedulingError, SchedulingResult},
    models::{
        page::{Page, PageRequest},
        slot::InterviewSlot,
    },
};

/// Serves the unbooked part of `slots` as one page in canonical order.
///
/// Canonical order is `(date, start_time, id)`. A cursor that is no longer in
/// the filtered set (for example, the slot was booked between two requests)
/// restarts pagination from the first element.
pub fn paginate(slots: &[InterviewSlot], request: &PageRequest) -> SchedulingResult<Page<InterviewSlot>> {
    if request.limit == 0 {
        return Err(SchedulingError::Validation(
            "Page limit must be at least 1".to_string(),
        ));
    }

    let mut candidates: Vec<&InterviewSlot> = slots
        .iter()
        .filter(|slot| !slot.is_booked)
        .filter(|slot| request.date_filter.is_none_or(|date| slot.date == date))
        .collect();
    candidates.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let start = request
        .cursor
        .as_ref()
        .and_then(|cursor| candidates.iter().position(|slot| &slot.id == cursor))
        .map_or(0, |index| index + 1);

    let data: Vec<InterviewSlot> = candidates
        .iter()
        .skip(start)
        .take(request.limit)
        .map(|slot| (*slot).clone())
        .collect();

    let has_more = data.len() == request.limit && start + request.limit < candidates.len();
    let cursor = if has_more {
        data.last().map(|slot| slot.id.clone())
    } else {
        None
    };

    Ok(Page {
        data,
        cursor,
        has_more,
        total_count: candidates.len(),
    })
}
