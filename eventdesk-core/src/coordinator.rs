//! Optimistic event cache in front of the events API.
//!
//! Every mutation follows the same lifecycle:
//!
//! 1. validate the input locally (nothing is sent or changed on failure),
//! 2. snapshot the cache and apply the change optimistically,
//! 3. call the server,
//! 4. on success write the server's version of the event into the cache,
//!    on failure restore the snapshot,
//! 5. resync the whole list from the server, best effort.
//!
//! The cache mutex is never held across an `.await`. Starting a mutation
//! supersedes any `list` still in flight, so a stale read cannot overwrite
//! the optimistic state. Dropping a mutation future before the server
//! answered rolls the cache back as if the call had failed.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cache::EventCache;
use crate::error::ApiResult;
use crate::event::{Event, EventId, EventPatch, NewEvent};
use crate::remote::EventsApi;
use crate::validate::{validate_new_event, validate_patch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create = 0,
    Update = 1,
    Delete = 2,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::Update => write!(f, "update"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

fn lock(cache: &Mutex<EventCache>) -> MutexGuard<'_, EventCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One in-flight mutation: the snapshot to roll back to, if it applied
/// anything.
///
/// Dropping it while still armed restores the snapshot.
struct PendingMutation<'a> {
    kind: MutationKind,
    cache: &'a Mutex<EventCache>,
    in_flight: &'a AtomicUsize,
    snapshot: Option<Vec<Event>>,
}

impl PendingMutation<'_> {
    /// The server confirmed; keep the optimistic state.
    fn confirm(mut self) {
        self.snapshot = None;
    }

    /// The server refused; put the cache back.
    fn roll_back(mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            lock(self.cache).restore(snapshot);
        }
    }
}

impl Drop for PendingMutation<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            lock(self.cache).restore(snapshot);
            tracing::warn!(kind = %self.kind, "mutation abandoned before the server answered, rolled back");
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owns the event cache and routes every change through the API.
pub struct EventCoordinator<A> {
    api: A,
    cache: Mutex<EventCache>,
    /// Bumped whenever a mutation starts; a `list` that saw an older value
    /// does not write its result.
    read_epoch: AtomicU64,
    in_flight: [AtomicUsize; 3],
}

impl<A: EventsApi> EventCoordinator<A> {
    pub fn new(api: A) -> Self {
        Self::with_cache(api, EventCache::new())
    }

    pub fn with_cache(api: A, cache: EventCache) -> Self {
        EventCoordinator {
            api,
            cache: Mutex::new(cache),
            read_epoch: AtomicU64::new(0),
            in_flight: Default::default(),
        }
    }

    /// Current cache contents, in server order.
    pub fn events(&self) -> Vec<Event> {
        lock(&self.cache).snapshot()
    }

    pub fn get(&self, id: EventId) -> Option<Event> {
        lock(&self.cache).get(id).cloned()
    }

    /// Number of mutations of `kind` waiting on the server.
    pub fn in_flight(&self, kind: MutationKind) -> usize {
        self.in_flight[kind as usize].load(Ordering::SeqCst)
    }

    /// Fetch the full collection and make it the cache.
    ///
    /// On failure the cache is left as it was. If a mutation started while
    /// the request was out, the fetched list is returned but not cached.
    pub async fn list(&self) -> ApiResult<Vec<Event>> {
        let epoch = self.read_epoch.load(Ordering::SeqCst);
        let events = self.api.list().await?;

        if self.read_epoch.load(Ordering::SeqCst) == epoch {
            lock(&self.cache).replace_all(events.clone());
        } else {
            tracing::debug!("list superseded by a mutation, not cached");
        }

        Ok(events)
    }

    /// Resynchronize the cache with the server.
    pub async fn refresh(&self) -> ApiResult<()> {
        self.list().await.map(|_| ())
    }

    async fn resync(&self) {
        if let Err(e) = self.list().await {
            tracing::warn!(status = e.status(), "resync after mutation failed: {e}");
        }
    }

    fn begin(&self, kind: MutationKind) -> PendingMutation<'_> {
        self.read_epoch.fetch_add(1, Ordering::SeqCst);
        let in_flight = &self.in_flight[kind as usize];
        in_flight.fetch_add(1, Ordering::SeqCst);
        PendingMutation {
            kind,
            cache: &self.cache,
            in_flight,
            snapshot: None,
        }
    }

    /// Create an event. A placeholder with a temporary negative id is
    /// cached until the server answers, then swapped for the real event.
    pub async fn create(&self, input: &NewEvent) -> ApiResult<Event> {
        validate_new_event(input)?;

        let mut pending = self.begin(MutationKind::Create);
        let temp_id = {
            let mut cache = lock(&self.cache);
            pending.snapshot = Some(cache.snapshot());
            let temp_id = cache.next_temp_id();
            cache.upsert(input.with_id(temp_id));
            temp_id
        };

        let result = self.api.create(input).await;

        match &result {
            Ok(created) => {
                pending.confirm();
                lock(&self.cache).reconcile(temp_id, created.clone());
                tracing::info!(id = created.id, temp_id, "event created");
            }
            Err(e) => {
                pending.roll_back();
                tracing::warn!(status = e.status(), "create failed, rolled back: {e}");
            }
        }

        self.resync().await;
        result
    }

    /// Update an event with the fields set in `patch`.
    ///
    /// If `id` is not cached nothing is applied locally, but the request is
    /// still sent and its outcome reported.
    pub async fn update(&self, id: EventId, patch: &EventPatch) -> ApiResult<Event> {
        validate_patch(patch)?;

        let mut pending = self.begin(MutationKind::Update);
        {
            let mut cache = lock(&self.cache);
            if cache.contains(id) {
                pending.snapshot = Some(cache.snapshot());
                cache.merge(id, patch);
            } else {
                tracing::debug!(id, "update target not cached, sending anyway");
            }
        }

        let result = self.api.update(id, patch).await;

        match &result {
            Ok(updated) => {
                pending.confirm();
                if !lock(&self.cache).replace(updated.clone()) {
                    tracing::debug!(id = updated.id, "updated event not cached, resync will add it");
                }
                tracing::info!(id, "event updated");
            }
            Err(e) => {
                pending.roll_back();
                tracing::warn!(id, status = e.status(), "update failed, rolled back: {e}");
            }
        }

        self.resync().await;
        result
    }

    /// Delete an event. It disappears from the cache immediately and comes
    /// back in its old position if the server refuses.
    pub async fn remove(&self, id: EventId) -> ApiResult<()> {
        let mut pending = self.begin(MutationKind::Delete);
        {
            let mut cache = lock(&self.cache);
            pending.snapshot = Some(cache.snapshot());
            if cache.remove(id).is_none() {
                tracing::debug!(id, "delete target not cached, sending anyway");
            }
        }

        let result = self.api.remove(id).await;

        match &result {
            Ok(()) => {
                pending.confirm();
                tracing::info!(id, "event deleted");
            }
            Err(e) => {
                pending.roll_back();
                tracing::warn!(id, status = e.status(), "delete failed, rolled back: {e}");
            }
        }

        self.resync().await;
        result
    }
}
