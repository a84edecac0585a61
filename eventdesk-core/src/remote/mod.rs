//! The events backend as seen by the coordinator.
//!
//! [`EventsApi`] is the seam between the cache logic and the network:
//! [`http::HttpEventsApi`] talks to the real REST API, tests plug in
//! in-memory fakes.

pub mod http;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::event::{Event, EventId, EventPatch, NewEvent};

#[async_trait]
pub trait EventsApi: Send + Sync {
    /// GET /api/events
    async fn list(&self) -> ApiResult<Vec<Event>>;

    /// POST /api/events
    async fn create(&self, input: &NewEvent) -> ApiResult<Event>;

    /// PATCH /api/events/{id}
    async fn update(&self, id: EventId, patch: &EventPatch) -> ApiResult<Event>;

    /// DELETE /api/events/{id}
    async fn remove(&self, id: EventId) -> ApiResult<()>;
}

#[async_trait]
impl<T: EventsApi + ?Sized> EventsApi for std::sync::Arc<T> {
    async fn list(&self) -> ApiResult<Vec<Event>> {
        (**self).list().await
    }

    async fn create(&self, input: &NewEvent) -> ApiResult<Event> {
        (**self).create(input).await
    }

    async fn update(&self, id: EventId, patch: &EventPatch) -> ApiResult<Event> {
        (**self).update(id, patch).await
    }

    async fn remove(&self, id: EventId) -> ApiResult<()> {
        (**self).remove(id).await
    }
}
