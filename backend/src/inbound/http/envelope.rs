//! Success envelope responder.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, Responder};
use events_dto::ApiSuccessResponseDto;
use serde::Serialize;

/// Handler result wrapped as `{success: true, statusCode, data}`.
///
/// The body's `statusCode` is always the status the response is sent with.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use events_backend::inbound::http::envelope::Envelope;
///
/// let created = Envelope::created(vec![1, 2]);
/// assert_eq!(created.status(), StatusCode::CREATED);
/// ```
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    status: StatusCode,
    data: T,
    no_store: bool,
}

impl<T> Envelope<T> {
    /// Wrap `data` for sending with `status`.
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data,
            no_store: false,
        }
    }

    /// 200 OK.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    /// 201 Created.
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    /// Forbid caches from storing the response.
    #[must_use]
    pub fn no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    /// Status used for both the transport and `statusCode`.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Payload written to `data`.
    pub fn data(&self) -> &T {
        &self.data
    }
}

impl<T: Serialize> Responder for Envelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut builder = HttpResponse::build(self.status);
        if self.no_store {
            builder.insert_header((header::CACHE_CONTROL, HeaderValue::from_static("no-store")));
        }
        builder.json(ApiSuccessResponseDto::new(self.status.as_u16(), self.data))
    }
}
