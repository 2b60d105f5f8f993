//! Event use-cases.
//!
//! Every operation asserts its input against the shared DTO schemas before
//! touching the repository, so nothing invalid can reach storage regardless of
//! which adapter calls in.

use std::sync::Arc;

use events_dto::{
    CreateEventDto, EventDto, EventId, UpdateEventDto, create_event_assertion,
    update_event_assertion,
};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::EventRepository;
use crate::domain::{Error, Event, EventChanges, NewEvent};

/// Events service over a repository port.
#[derive(Clone)]
pub struct EventsService {
    repository: Arc<dyn EventRepository>,
}

impl EventsService {
    /// Create a new service with the given repository.
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Validate a create payload, store it and return the stored event.
    pub async fn create(&self, payload: Value) -> Result<EventDto, Error> {
        let dto: CreateEventDto = create_event_assertion().parse(payload)?;
        let event = self.repository.create(NewEvent::try_from(dto)?).await?;
        debug!(id = %event.id(), "event created");
        Ok(event.to_dto())
    }

    /// Every stored event in ascending id order.
    pub async fn find_all(&self) -> Result<Vec<EventDto>, Error> {
        let events = self.repository.find().await?;
        Ok(events.iter().map(Event::to_dto).collect())
    }

    /// Fetch one event; an unknown id is a bad request.
    pub async fn find_one(&self, id: EventId) -> Result<EventDto, Error> {
        self.load(id).await.map(|event| event.to_dto())
    }

    /// Apply the fields present in `payload` to an existing event.
    pub async fn update(&self, id: EventId, payload: Value) -> Result<EventDto, Error> {
        let dto: UpdateEventDto = update_event_assertion().parse(payload)?;
        let changes = EventChanges::try_from(dto)?;
        let mut event = self.load(id).await?;
        event.apply(changes);
        let saved = self.repository.save(&event).await?;
        debug!(id = %saved.id(), "event updated");
        Ok(saved.to_dto())
    }

    /// Delete an existing event and return what was removed.
    pub async fn remove(&self, id: EventId) -> Result<EventDto, Error> {
        let event = self.load(id).await?;
        self.repository.remove(&event).await?;
        debug!(id = %id, "event removed");
        Ok(event.to_dto())
    }

    async fn load(&self, id: EventId) -> Result<Event, Error> {
        self.repository
            .find_one(id)
            .await?
            .ok_or_else(|| Error::event_not_found(id))
    }
}

#[cfg(test)]
#[path = "events_service_tests.rs"]
mod tests;
