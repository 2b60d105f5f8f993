//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter classifies them into
//! response envelopes; nothing here knows about status codes.

use events_dto::{DtoAssertionError, EventId};

use super::ports::EventRepositoryError;

/// Failure raised by the events use-cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A payload did not match its DTO schema.
    #[error(transparent)]
    Assertion(#[from] DtoAssertionError),
    /// The request was well-formed but cannot be served.
    #[error("{message}")]
    BadRequest { message: String },
    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] EventRepositoryError),
}

impl Error {
    /// Build a [`Error::BadRequest`].
    ///
    /// # Examples
    /// ```
    /// use events_backend::domain::Error;
    ///
    /// let err = Error::bad_request("nope");
    /// assert_eq!(err.to_string(), "nope");
    /// ```
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Lookup of an id with no stored event.
    ///
    /// Reported as a bad request rather than a distinct not-found kind so
    /// clients see a 400 for unknown ids.
    pub fn event_not_found(id: EventId) -> Self {
        Self::bad_request(format!("Event with id '{id}' doesn't exist."))
    }
}
