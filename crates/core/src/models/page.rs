use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::slot::SlotId;

pub const DEFAULT_PAGE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Id of the last slot the caller has seen
    pub cursor: Option<SlotId>,
    pub limit: usize,
    pub date_filter: Option<NaiveDate>,
}

impl PageRequest {
    pub fn first(limit: usize) -> Self {
        Self {
            cursor: None,
            limit,
            date_filter: None,
        }
    }

    pub fn after(cursor: SlotId, limit: usize) -> Self {
        Self {
            cursor: Some(cursor),
            limit,
            date_filter: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date_filter = Some(date);
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Cursor for the next page, present only when `has_more` is true
    pub cursor: Option<SlotId>,
    pub has_more: bool,
    /// Size of the whole filtered set, independent of the page position
    pub total_count: usize,
}
