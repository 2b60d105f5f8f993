//! Shared event DTOs, validators and the response envelope.
//!
//! Both the backend and the client assert payloads with the functions in this
//! crate, so a value accepted on one side is accepted on the other.

pub mod assertion;
pub mod envelope;
pub mod events;
pub mod schema;
pub mod validators;

pub use assertion::{AssertionFn, DtoAssertionError, create_assertion_fn};
pub use envelope::{
    ApiErrorDto, ApiErrorResponseDto, ApiSuccessResponseDto, SuccessFlag,
    api_error_response_dto_schema, api_success_response_dto_schema,
    api_success_response_schema_with, assert_api_error_response_dto,
    assert_api_success_response_dto,
};
pub use events::{
    CreateEventDto, EventDto, EventId, UpdateEventDto, assert_create_event_dto, assert_event_dto,
    assert_event_id, assert_events_array_dto, assert_update_event_dto, create_event_assertion,
    event_assertion, event_id_assertion, events_array_assertion, update_event_assertion,
};
