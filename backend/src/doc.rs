//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the event and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which describe the
//! shared DTOs without coupling the DTO crate to utoipa.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ApiErrorResponseSchema, ApiErrorSchema, CreateEventDtoSchema, EventDtoSchema,
    EventEnvelopeSchema, EventsEnvelopeSchema, ProbeEnvelopeSchema, UpdateEventDtoSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        description = "CRUD over events. Every response is a success or error envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::get_event,
        crate::inbound::http::events::update_event,
        crate::inbound::http::events::delete_event,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EventDtoSchema,
        CreateEventDtoSchema,
        UpdateEventDtoSchema,
        ApiErrorSchema,
        ApiErrorResponseSchema,
        EventEnvelopeSchema,
        EventsEnvelopeSchema,
        ProbeEnvelopeSchema
    )),
    tags(
        (name = "events", description = "Event CRUD"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const EVENT_SCHEMA_NAME: &str = "events_dto.EventDto";
    const ERROR_RESPONSE_SCHEMA_NAME: &str = "events_dto.ApiErrorResponseDto";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn event_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let event = schemas.get(EVENT_SCHEMA_NAME).expect("EventDto schema");

        for field in ["id", "firstName", "lastName", "email", "date"] {
            assert_object_schema_has_field(event, field);
        }
    }

    #[test]
    fn error_envelope_schema_has_status_and_error() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let envelope = schemas
            .get(ERROR_RESPONSE_SCHEMA_NAME)
            .expect("ApiErrorResponseDto schema");

        assert_object_schema_has_field(envelope, "success");
        assert_object_schema_has_field(envelope, "statusCode");
        assert_object_schema_has_field(envelope, "error");
    }

    #[test]
    fn every_event_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/events"));
        assert!(paths.contains_key("/events/{id}"));
        assert!(paths.contains_key("/health/ready"));
    }
}
