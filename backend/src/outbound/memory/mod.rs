//! Process-local `EventRepository` implementation.
//!
//! Used when the server starts without a database URL and by integration
//! tests. State lives for the lifetime of the value; clones share it.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use events_dto::EventId;
use tokio::sync::RwLock;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, NewEvent};

#[derive(Debug, Default)]
struct Store {
    events: BTreeMap<EventId, Event>,
    last_id: i64,
}

impl Store {
    fn next_id(&mut self) -> Result<EventId, EventRepositoryError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| EventRepositoryError::query("event id sequence exhausted"))?;
        let id = EventId::new(next)
            .map_err(|err| EventRepositoryError::query(format!("invalid event id: {err}")))?;
        self.last_id = next;
        Ok(id)
    }
}

/// In-memory event store with a monotonically increasing id sequence.
///
/// Ids are never reused, even after removal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, EventRepositoryError> {
        let mut store = self.store.write().await;
        let id = store.next_id()?;
        let created = Event::from_new(id, event);
        store.events.insert(id, created.clone());
        Ok(created)
    }

    async fn find(&self) -> Result<Vec<Event>, EventRepositoryError> {
        let store = self.store.read().await;
        Ok(store.events.values().cloned().collect())
    }

    async fn find_one(&self, id: EventId) -> Result<Option<Event>, EventRepositoryError> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn save(&self, event: &Event) -> Result<Event, EventRepositoryError> {
        let mut store = self.store.write().await;
        let id = event.id();
        store.last_id = store.last_id.max(id.get());
        store.events.insert(id, event.clone());
        Ok(event.clone())
    }

    async fn remove(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut store = self.store.write().await;
        store.events.remove(&event.id());
        Ok(())
    }
}
