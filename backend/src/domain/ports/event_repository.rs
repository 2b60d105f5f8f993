//! Port abstraction for event persistence adapters and their errors.

use async_trait::async_trait;
use events_dto::EventId;

use crate::domain::{Event, NewEvent};

/// Persistence errors raised by event repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventRepositoryError {
    /// Repository connection could not be established.
    #[error("event repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("event repository query failed: {message}")]
    Query { message: String },
}

impl EventRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Store of events keyed by numeric id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event and return it with its assigned id.
    async fn create(&self, event: NewEvent) -> Result<Event, EventRepositoryError>;

    /// Every stored event, ascending by id.
    async fn find(&self) -> Result<Vec<Event>, EventRepositoryError>;

    /// Fetch a single event.
    async fn find_one(&self, id: EventId) -> Result<Option<Event>, EventRepositoryError>;

    /// Insert or replace the event with the same id.
    async fn save(&self, event: &Event) -> Result<Event, EventRepositoryError>;

    /// Delete the event with the same id. Deleting a missing event is a no-op.
    async fn remove(&self, event: &Event) -> Result<(), EventRepositoryError>;
}
