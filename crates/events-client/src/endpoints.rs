//! Typed event endpoints.

use async_trait::async_trait;
use events_dto::{
    CreateEventDto, EventDto, EventId, UpdateEventDto, event_assertion, events_array_assertion,
};

use crate::api_client::ApiClient;
use crate::response::ApiResponse;

/// Event operations offered by the REST API.
///
/// [`crate::EventsStore`] depends on this port rather than on
/// [`ApiClient`], so tests can control when responses arrive.
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// `GET /events`.
    async fn get_all_events(&self) -> ApiResponse<Vec<EventDto>>;

    /// `GET /events/{id}`.
    async fn get_event(&self, id: EventId) -> ApiResponse<EventDto>;

    /// `POST /events`.
    async fn create_event(&self, event: &CreateEventDto) -> ApiResponse<EventDto>;

    /// `PATCH /events/{id}`.
    async fn update_event(&self, id: EventId, changes: &UpdateEventDto) -> ApiResponse<EventDto>;

    /// `DELETE /events/{id}`. Returns the removed record.
    async fn delete_event(&self, id: EventId) -> ApiResponse<EventDto>;
}

fn event_path(id: EventId) -> String {
    format!("events/{id}")
}

#[async_trait]
impl EventsApi for ApiClient {
    async fn get_all_events(&self) -> ApiResponse<Vec<EventDto>> {
        self.get("events", events_array_assertion()).await
    }

    async fn get_event(&self, id: EventId) -> ApiResponse<EventDto> {
        self.get(&event_path(id), event_assertion()).await
    }

    async fn create_event(&self, event: &CreateEventDto) -> ApiResponse<EventDto> {
        self.post("events", event, event_assertion()).await
    }

    async fn update_event(&self, id: EventId, changes: &UpdateEventDto) -> ApiResponse<EventDto> {
        self.patch(&event_path(id), changes, event_assertion()).await
    }

    async fn delete_event(&self, id: EventId) -> ApiResponse<EventDto> {
        self.delete(&event_path(id), event_assertion()).await
    }
}
