//! Sorting and filtering of cached events for display.
//!
//! These never touch the cache; they work on copies handed out by the
//! coordinator.

use crate::event::{Event, EventStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    StartDateAsc,
    StartDateDesc,
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EventStatus),
}

impl StatusFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => event.status == *status,
        }
    }
}

/// Return a sorted copy of `events`. Ties keep their original order.
pub fn sort_events(events: &[Event], sort_by: SortBy) -> Vec<Event> {
    let mut sorted = events.to_vec();
    match sort_by {
        SortBy::StartDateAsc => sorted.sort_by_key(|e| e.start_date),
        SortBy::StartDateDesc => sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortBy::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
    sorted
}

pub fn filter_events(events: &[Event], filter: StatusFilter) -> Vec<Event> {
    events.iter().filter(|e| filter.matches(e)).cloned().collect()
}
