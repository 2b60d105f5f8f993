//! OpenAPI schema definitions for the shared DTOs and envelopes.
//!
//! The DTO crate stays free of utoipa. These wrappers mirror the wire shapes
//! and register them under the DTO crate's type paths.

use utoipa::ToSchema;

/// OpenAPI schema for [`events_dto::EventDto`].
#[derive(ToSchema)]
#[schema(as = events_dto::EventDto, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EventDtoSchema {
    /// Positive integer assigned by the store.
    #[schema(example = 1, minimum = 1)]
    id: i64,
    #[schema(example = "Joe")]
    first_name: String,
    #[schema(example = "Doe")]
    last_name: String,
    #[schema(example = "mail@mail.com", format = "email")]
    email: String,
    /// ISO-8601 UTC instant with millisecond precision.
    #[schema(example = "2022-04-13T20:00:00.000Z", format = "date-time")]
    date: String,
}

/// OpenAPI schema for [`events_dto::CreateEventDto`].
#[derive(ToSchema)]
#[schema(as = events_dto::CreateEventDto, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateEventDtoSchema {
    #[schema(example = "Joe")]
    first_name: String,
    #[schema(example = "Doe")]
    last_name: String,
    #[schema(example = "mail@mail.com", format = "email")]
    email: String,
    /// Any date string the server can parse; stored and echoed as ISO-8601.
    #[schema(example = "2022-04-13T20:00:00.000Z")]
    date: String,
}

/// OpenAPI schema for [`events_dto::UpdateEventDto`]. Every field is optional
/// and `id` is rejected.
#[derive(ToSchema)]
#[schema(as = events_dto::UpdateEventDto, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateEventDtoSchema {
    first_name: Option<String>,
    last_name: Option<String>,
    #[schema(format = "email")]
    email: Option<String>,
    date: Option<String>,
}

/// OpenAPI schema for [`events_dto::ApiErrorDto`].
#[derive(ToSchema)]
#[schema(as = events_dto::ApiErrorDto)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApiErrorSchema {
    /// Error class, e.g. `BadRequest` or `InternalServerException`.
    #[schema(example = "BadRequest")]
    name: String,
    #[schema(example = "Event with id '3' doesn't exist.")]
    message: String,
}

/// OpenAPI schema for [`events_dto::ApiErrorResponseDto`].
#[derive(ToSchema)]
#[schema(as = events_dto::ApiErrorResponseDto, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApiErrorResponseSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    #[schema(example = 400)]
    status_code: u16,
    error: ApiErrorSchema,
}

/// Success envelope carrying one event.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EventEnvelopeSchema {
    /// Always `true`.
    #[schema(example = true)]
    success: bool,
    #[schema(example = 200)]
    status_code: u16,
    data: EventDtoSchema,
}

/// Success envelope carrying every event.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EventsEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = 200)]
    status_code: u16,
    data: Vec<EventDtoSchema>,
}

/// Success envelope carrying a probe status.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProbeEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = 200)]
    status_code: u16,
    data: super::health::ProbeStatus,
}
