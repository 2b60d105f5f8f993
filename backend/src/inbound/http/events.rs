//! Events API handlers.
//!
//! ```text
//! POST   /events        {"firstName":"Joe","lastName":"Doe","email":"mail@mail.com","date":"2022-04-13T20:00:00.000Z"}
//! GET    /events
//! GET    /events/1
//! PATCH  /events/1      {"email":"other@mail.com"}
//! DELETE /events/1
//! ```
//!
//! Bodies arrive as raw JSON and are asserted by the use-cases, so schema
//! failures carry the DTO name and the failing path.

use actix_web::{delete, get, patch, post, web};
use events_dto::{EventDto, EventId};
use serde_json::Value;

use super::envelope::Envelope;
use super::error::ApiResult;
use super::state::HttpState;

fn parse_id(raw: &str) -> ApiResult<EventId> {
    Ok(EventId::from_path(raw)?)
}

/// Create an event.
#[utoipa::path(
    post,
    path = "/events",
    request_body = crate::inbound::http::schemas::CreateEventDtoSchema,
    responses(
        (status = 201, description = "Event created", body = crate::inbound::http::schemas::EventEnvelopeSchema),
        (status = 400, description = "Invalid payload", body = crate::inbound::http::schemas::ApiErrorResponseSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<Envelope<EventDto>> {
    let event = state.events.create(payload.into_inner()).await?;
    Ok(Envelope::created(event))
}

/// List every event in ascending id order.
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "All events", body = crate::inbound::http::schemas::EventsEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(state: web::Data<HttpState>) -> ApiResult<Envelope<Vec<EventDto>>> {
    Ok(Envelope::ok(state.events.find_all().await?))
}

/// Fetch one event. Unknown ids are reported as 400.
#[utoipa::path(
    get,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Positive integer event id")),
    responses(
        (status = 200, description = "The event", body = crate::inbound::http::schemas::EventEnvelopeSchema),
        (status = 400, description = "Invalid or unknown id", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    ),
    tags = ["events"],
    operation_id = "getEvent"
)]
#[get("/events/{id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<Envelope<EventDto>> {
    let id = parse_id(&id)?;
    Ok(Envelope::ok(state.events.find_one(id).await?))
}

/// Change the fields present in the body.
#[utoipa::path(
    patch,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Positive integer event id")),
    request_body = crate::inbound::http::schemas::UpdateEventDtoSchema,
    responses(
        (status = 200, description = "The updated event", body = crate::inbound::http::schemas::EventEnvelopeSchema),
        (status = 400, description = "Invalid payload or unknown id", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    ),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[patch("/events/{id}")]
pub async fn update_event(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<Envelope<EventDto>> {
    let id = parse_id(&id)?;
    let event = state.events.update(id, payload.into_inner()).await?;
    Ok(Envelope::ok(event))
}

/// Delete an event and return the removed record.
#[utoipa::path(
    delete,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Positive integer event id")),
    responses(
        (status = 200, description = "The removed event", body = crate::inbound::http::schemas::EventEnvelopeSchema),
        (status = 400, description = "Invalid or unknown id", body = crate::inbound::http::schemas::ApiErrorResponseSchema)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<Envelope<EventDto>> {
    let id = parse_id(&id)?;
    Ok(Envelope::ok(state.events.remove(id).await?))
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
