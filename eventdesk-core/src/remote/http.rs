//! HTTP client for the events REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::DeskConfig;
use crate::error::{ApiError, ApiResult};
use crate::event::{Event, EventId, EventPatch, NewEvent};
use crate::remote::EventsApi;
use crate::validate::{validate_event, validate_new_event, validate_patch};

const EVENTS_PATH: &str = "/api/events";

/// [`EventsApi`] over HTTP.
///
/// Payloads are validated before sending and every successful body is
/// checked against the event shape before it is handed back.
pub struct HttpEventsApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEventsApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DeskConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, EVENTS_PATH)
    }

    fn item_url(&self, id: EventId) -> String {
        format!("{}{}/{}", self.base_url, EVENTS_PATH, id)
    }

    /// Send a request and return its JSON body (`None` for 204 or a body
    /// that is not JSON). Non-2xx statuses become transport errors.
    async fn send(&self, request: RequestBuilder) -> ApiResult<Option<Value>> {
        let response = request.send().await.map_err(ApiError::unreachable)?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "events API returned an error");
            // An unreadable error body still carries the status.
            let body = match response.bytes().await {
                Ok(bytes) => serde_json::from_slice::<Value>(&bytes).ok(),
                Err(e) => {
                    tracing::debug!(error = %e, "could not read error body");
                    None
                }
            };
            return Err(ApiError::from_response(status.as_u16(), body.as_ref()));
        }

        let bytes = response.bytes().await.map_err(ApiError::unreachable)?;
        Ok(serde_json::from_slice(&bytes).ok())
    }
}

/// Decode a successful body into `T`, or report a shape error.
fn decode<T: DeserializeOwned>(body: Option<Value>) -> ApiResult<T> {
    let body = body.ok_or_else(|| ApiError::ResponseShape("empty or non-JSON body".into()))?;
    serde_json::from_value(body).map_err(|e| ApiError::ResponseShape(e.to_string()))
}

fn decode_event(body: Option<Value>) -> ApiResult<Event> {
    let event: Event = decode(body)?;
    validate_event(&event).map_err(|e| ApiError::ResponseShape(format!("{}: {}", e.field, e)))?;
    Ok(event)
}

fn decode_events(body: Option<Value>) -> ApiResult<Vec<Event>> {
    let events: Vec<Event> = decode(body)?;
    for event in &events {
        validate_event(event).map_err(|e| {
            ApiError::ResponseShape(format!("event {}: {}: {}", event.id, e.field, e))
        })?;
    }
    Ok(events)
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    async fn list(&self) -> ApiResult<Vec<Event>> {
        tracing::debug!("GET {}", EVENTS_PATH);
        let body = self.send(self.http.get(self.collection_url())).await?;
        decode_events(body)
    }

    async fn create(&self, input: &NewEvent) -> ApiResult<Event> {
        validate_new_event(input)?;
        tracing::debug!("POST {}", EVENTS_PATH);
        let body = self
            .send(self.http.post(self.collection_url()).json(input))
            .await?;
        decode_event(body)
    }

    async fn update(&self, id: EventId, patch: &EventPatch) -> ApiResult<Event> {
        validate_patch(patch)?;
        tracing::debug!("PATCH {}/{}", EVENTS_PATH, id);
        let body = self.send(self.http.patch(self.item_url(id)).json(patch)).await?;
        decode_event(body)
    }

    async fn remove(&self, id: EventId) -> ApiResult<()> {
        tracing::debug!("DELETE {}/{}", EVENTS_PATH, id);
        self.send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}
