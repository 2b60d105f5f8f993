//! Client-side view of the event collection.
//!
//! Fetches are tagged with a ticket from a monotonically increasing
//! generation counter. A completed fetch is applied only when its ticket is
//! still the latest issued, so a slow, superseded response can never
//! overwrite a newer one regardless of arrival order.
//!
//! Mutations change the local view optimistically, call the API, then always
//! refetch so the view converges on the server's state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use events_dto::{CreateEventDto, EventDto, EventId, UpdateEventDto};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::endpoints::EventsApi;
use crate::response::ApiResponse;

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was the latest issued and is now visible.
    Applied,
    /// A newer fetch was issued meanwhile; the response was dropped.
    Superseded,
}

/// Point-in-time copy of the store's visible state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsSnapshot {
    /// A fetch is in flight.
    pub is_fetching: bool,
    /// Events in server order, plus any optimistic changes.
    pub events: Vec<EventDto>,
    /// Failure of the latest applied fetch, rendered for display.
    pub error: Option<String>,
    /// Failure of the most recent mutation, rendered for display.
    pub last_mutation_error: Option<String>,
}

/// Event collection kept in sync with the API.
pub struct EventsStore<A: ?Sized> {
    api: Arc<A>,
    generation: AtomicU64,
    state: RwLock<EventsSnapshot>,
}

impl<A: EventsApi + ?Sized> EventsStore<A> {
    /// Wrap `api`. Call [`EventsStore::refresh`] for the initial load.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
            state: RwLock::new(EventsSnapshot {
                is_fetching: true,
                ..EventsSnapshot::default()
            }),
        }
    }

    /// Copy of the visible state.
    pub async fn snapshot(&self) -> EventsSnapshot {
        self.state.read().await.clone()
    }

    /// Refetch every event.
    ///
    /// A failed fetch clears the list and records the failure.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        {
            let mut state = self.state.write().await;
            state.is_fetching = true;
            state.error = None;
        }

        let response = self.api.get_all_events().await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::Acquire) != ticket {
            debug!(ticket, "dropping superseded events response");
            return RefreshOutcome::Superseded;
        }
        match response {
            ApiResponse::Success(envelope) => state.events = envelope.into_data(),
            ApiResponse::Error(failure) => {
                state.events.clear();
                state.error = Some(failure.to_string());
            }
        }
        state.is_fetching = false;
        RefreshOutcome::Applied
    }

    /// Append `event` with a provisional id, create it, then refetch.
    pub async fn create_event(&self, event: CreateEventDto) -> ApiResponse<EventDto> {
        {
            let mut state = self.state.write().await;
            let next = state
                .events
                .last()
                .map_or(Some(1), |last| last.id.get().checked_add(1))
                .and_then(|id| EventId::new(id).ok());
            if let Some(id) = next {
                state.events.push(EventDto {
                    id,
                    first_name: event.first_name.clone(),
                    last_name: event.last_name.clone(),
                    email: event.email.clone(),
                    date: event.date.clone(),
                });
            }
        }
        let result = self.api.create_event(&event).await;
        self.reconcile("create", result).await
    }

    /// Merge `changes` into the local event, update it, then refetch.
    pub async fn update_event(
        &self,
        id: EventId,
        changes: UpdateEventDto,
    ) -> ApiResponse<EventDto> {
        {
            let mut state = self.state.write().await;
            for event in state.events.iter_mut().filter(|event| event.id == id) {
                event.apply(&changes);
            }
        }
        let result = self.api.update_event(id, &changes).await;
        self.reconcile("update", result).await
    }

    /// Drop the local event, delete it, then refetch.
    pub async fn delete_event(&self, id: EventId) -> ApiResponse<EventDto> {
        self.state
            .write()
            .await
            .events
            .retain(|event| event.id != id);
        let result = self.api.delete_event(id).await;
        self.reconcile("delete", result).await
    }

    async fn reconcile(
        &self,
        operation: &'static str,
        result: ApiResponse<EventDto>,
    ) -> ApiResponse<EventDto> {
        let mutation_error = match &result {
            ApiResponse::Success(_) => None,
            ApiResponse::Error(failure) => {
                warn!(operation, error = %failure, "event mutation failed");
                Some(failure.to_string())
            }
        };
        self.state.write().await.last_mutation_error = mutation_error;
        self.refresh().await;
        result
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
