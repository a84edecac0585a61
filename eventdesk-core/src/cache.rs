//! In-memory store of the events the console knows about.
//!
//! The cache keeps server order and never holds two events with the same id.
//! Events created locally but not yet confirmed carry negative ids handed
//! out by [`EventCache::next_temp_id`], so they can never collide with an id
//! the server assigned.

use crate::event::{Event, EventId, EventPatch};

#[derive(Debug, Clone, Default)]
pub struct EventCache {
    events: Vec<Event>,
    last_temp_id: EventId,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    /// Copy of the current contents, for a later [`EventCache::restore`].
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Put back a snapshot taken earlier. The temp id counter is left alone.
    pub fn restore(&mut self, snapshot: Vec<Event>) {
        self.events = snapshot;
    }

    /// Replace everything with a fresh server listing.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Hand out a temporary id: negative and never reused by this cache.
    pub fn next_temp_id(&mut self) -> EventId {
        self.last_temp_id -= 1;
        self.last_temp_id
    }

    /// Append an event, replacing any event already stored under its id.
    pub fn upsert(&mut self, event: Event) {
        match self.position(event.id) {
            Some(index) => self.events[index] = event,
            None => self.events.push(event),
        }
    }

    /// Overwrite the event stored under `event.id`. Returns false if there
    /// is none.
    pub fn replace(&mut self, event: Event) -> bool {
        match self.position(event.id) {
            Some(index) => {
                self.events[index] = event;
                true
            }
            None => false,
        }
    }

    /// Merge a patch onto the event with `id`. Returns false if there is none.
    pub fn merge(&mut self, id: EventId, patch: &EventPatch) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                patch.merge_into(event);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        self.position(id).map(|index| self.events.remove(index))
    }

    /// Swap the placeholder stored under `temp_id` for the confirmed event.
    ///
    /// Lookup is by id: other mutations may have reordered the cache since
    /// the placeholder went in. If the confirmed id is already cached (a
    /// resync got there first) that entry wins and the placeholder is
    /// dropped. If neither is present the confirmed event is appended.
    pub fn reconcile(&mut self, temp_id: EventId, confirmed: Event) {
        let temp = self.position(temp_id);
        let real = self.position(confirmed.id);

        match (temp, real) {
            (Some(t), None) => self.events[t] = confirmed,
            (Some(t), Some(r)) => {
                self.events[r] = confirmed;
                self.events.remove(t);
            }
            (None, Some(r)) => self.events[r] = confirmed,
            (None, None) => self.events.push(confirmed),
        }
    }
}
