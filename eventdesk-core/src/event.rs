//! Event types as exchanged with the events API.
//!
//! Field names follow the wire format (`startDate`, `endDate`) and
//! timestamps are ISO-8601 instants in UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event identifier. Server-assigned ids are positive; the cache uses
/// negative ids for events it has not yet heard back about.
pub type EventId = i64;

/// An event as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price: f64,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Started,
    Paused,
    Completed,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Started,
        EventStatus::Paused,
        EventStatus::Completed,
    ];

    /// Wire name (`STARTED`, `PAUSED`, `COMPLETED`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Started => "STARTED",
            EventStatus::Paused => "PAUSED",
            EventStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown status '{s}'. Expected one of: STARTED, PAUSED, COMPLETED")
            })
    }
}

/// Payload for creating an event (an event without its id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price: f64,
    pub status: EventStatus,
}

impl NewEvent {
    /// The event this payload describes once it is given `id`.
    pub fn with_id(&self, id: EventId) -> Event {
        Event {
            id,
            title: self.title.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            price: self.price,
            status: self.status,
        }
    }
}

/// Partial update payload. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

impl EventPatch {
    /// A patch that only changes the status.
    pub fn status_only(status: EventStatus) -> Self {
        EventPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &EventPatch::default()
    }

    /// Apply the set fields onto `event`, leaving the rest untouched.
    pub fn merge_into(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(start) = self.start_date {
            event.start_date = start;
        }
        if let Some(end) = self.end_date {
            event.end_date = end;
        }
        if let Some(price) = self.price {
            event.price = price;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
    }
}
