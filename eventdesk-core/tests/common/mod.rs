//! Shared helpers for eventdesk-core integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use eventdesk_core::remote::EventsApi;
use eventdesk_core::{ApiError, ApiResult, Event, EventId, EventPatch, EventStatus, NewEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Update,
    Remove,
}

/// Holds one call after the server has decided its answer, until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// In-memory events backend with failure injection.
pub struct FakeEventsApi {
    server: Mutex<Vec<Event>>,
    next_id: Mutex<EventId>,
    failures: Mutex<HashMap<Op, ApiError>>,
    gates: Mutex<HashMap<Op, Arc<Gate>>>,
    calls: AtomicUsize,
}

impl FakeEventsApi {
    pub fn new(events: Vec<Event>) -> Self {
        let next_id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        FakeEventsApi {
            server: Mutex::new(events),
            next_id: Mutex::new(next_id),
            failures: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Id the next created event will get.
    pub fn set_next_id(&self, id: EventId) {
        *self.next_id.lock().unwrap() = id;
    }

    /// Make the next call of `op` fail with `error` without touching state.
    pub fn fail_next(&self, op: Op, error: ApiError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    /// Hold the next call of `op` until the returned gate is released.
    pub fn hold_next(&self, op: Op) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().unwrap().insert(op, gate.clone());
        gate
    }

    pub fn server_events(&self) -> Vec<Event> {
        self.server.lock().unwrap().clone()
    }

    /// Replace server state behind the client's back.
    pub fn set_server_events(&self, events: Vec<Event>) {
        *self.server.lock().unwrap() = events;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn injected(&self, op: Op) -> Option<ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failures.lock().unwrap().remove(&op)
    }

    async fn wait_at_gate(&self, op: Op) {
        let gate = self.gates.lock().unwrap().remove(&op);
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }

    fn answer<T>(&self, op: Op, compute: impl FnOnce() -> ApiResult<T>) -> ApiResult<T> {
        match self.injected(op) {
            Some(error) => Err(error),
            None => compute(),
        }
    }
}

fn not_found() -> ApiError {
    ApiError::Transport {
        status: 404,
        message: "Event not found".to_string(),
    }
}

#[async_trait]
impl EventsApi for FakeEventsApi {
    async fn list(&self) -> ApiResult<Vec<Event>> {
        let result = self.answer(Op::List, || Ok(self.server_events()));
        self.wait_at_gate(Op::List).await;
        result
    }

    async fn create(&self, input: &NewEvent) -> ApiResult<Event> {
        let result = self.answer(Op::Create, || {
            let mut next_id = self.next_id.lock().unwrap();
            let event = input.with_id(*next_id);
            *next_id += 1;
            self.server.lock().unwrap().push(event.clone());
            Ok(event)
        });
        self.wait_at_gate(Op::Create).await;
        result
    }

    async fn update(&self, id: EventId, patch: &EventPatch) -> ApiResult<Event> {
        let result = self.answer(Op::Update, || {
            let mut server = self.server.lock().unwrap();
            let event = server.iter_mut().find(|e| e.id == id).ok_or_else(not_found)?;
            let mut updated = event.clone();
            patch.merge_into(&mut updated);
            if updated.end_date <= updated.start_date {
                return Err(ApiError::Transport {
                    status: 400,
                    message: "End date must be after start date".to_string(),
                });
            }
            *event = updated.clone();
            Ok(updated)
        });
        self.wait_at_gate(Op::Update).await;
        result
    }

    async fn remove(&self, id: EventId) -> ApiResult<()> {
        let result = self.answer(Op::Remove, || {
            let mut server = self.server.lock().unwrap();
            let index = server.iter().position(|e| e.id == id).ok_or_else(not_found)?;
            server.remove(index);
            Ok(())
        });
        self.wait_at_gate(Op::Remove).await;
        result
    }
}

pub fn server_error(status: u16) -> ApiError {
    ApiError::Transport {
        status,
        message: "Network error occurred".to_string(),
    }
}

pub fn make_event(id: EventId, title: &str, price: f64, status: EventStatus) -> Event {
    Event {
        id,
        title: title.to_string(),
        start_date: Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2026, 3, 17, 18, 0, 0).unwrap(),
        price,
        status,
    }
}

pub fn make_new_event(title: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        start_date: Utc.with_ymd_and_hms(2026, 4, 20, 8, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2026, 4, 22, 20, 0, 0).unwrap(),
        price: 0.0,
        status: EventStatus::Started,
    }
}

pub fn ids(events: &[Event]) -> Vec<EventId> {
    events.iter().map(|e| e.id).collect()
}
