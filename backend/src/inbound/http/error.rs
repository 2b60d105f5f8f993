//! HTTP adapter mapping for every failure a request can produce.
//!
//! Purpose: route handler errors, framework errors (bad JSON, unmatched
//! routes) and domain errors through one classification so every failed
//! response is an error envelope whose `statusCode` equals the transport
//! status.
//!
//! Classification order:
//! 1. [`HttpException`] passes through with its own status, name and message.
//! 2. Assertion failures and domain bad requests become 400 `BadRequest`.
//! 3. Anything else is logged and becomes a generic 500.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use events_dto::{ApiErrorDto, ApiErrorResponseDto, DtoAssertionError};
use tracing::error;

use crate::domain::Error;
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

const BAD_REQUEST_NAME: &str = "BadRequest";
const INTERNAL_NAME: &str = "InternalServerException";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Transport-level failure carrying its own status and name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct HttpException {
    status: StatusCode,
    name: &'static str,
    message: String,
}

impl HttpException {
    /// Build an exception with an explicit status.
    pub fn new(status: StatusCode, name: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            name,
            message: message.into(),
        }
    }

    /// No route matched the request.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFoundException", message)
    }

    /// The request could not be read (malformed JSON, wrong content type).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequestException", message)
    }

    /// A probe reported the service as unavailable.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "ServiceUnavailableException",
            message,
        )
    }

    /// Transport status the exception is sent with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Exception name written to `error.name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable message written to `error.message`.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Every failure an HTTP handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Framework or routing failure with a fixed status.
    #[error(transparent)]
    Http(#[from] HttpException),
    /// Payload or path id rejected by a DTO schema.
    #[error(transparent)]
    Assertion(#[from] DtoAssertionError),
    /// Use-case failure.
    #[error(transparent)]
    Domain(#[from] Error),
    /// Unexpected failure promoted from the framework.
    #[error("{0}")]
    Unexpected(String),
}

/// Outcome of [`ApiError::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    status: StatusCode,
    error: ApiErrorDto,
    unexpected: bool,
}

impl Classified {
    fn new(status: StatusCode, name: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiErrorDto::new(name, message),
            unexpected: false,
        }
    }

    fn internal() -> Self {
        Self {
            unexpected: true,
            ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_NAME, INTERNAL_MESSAGE)
        }
    }

    /// Status the error response is sent with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Name and message for the envelope's `error` field.
    pub fn error(&self) -> &ApiErrorDto {
        &self.error
    }

    /// Wire body for this classification.
    pub fn to_envelope(&self) -> ApiErrorResponseDto {
        ApiErrorResponseDto::new(self.status.as_u16(), self.error.clone())
    }
}

impl ApiError {
    /// Map this error onto a status and error body.
    ///
    /// # Examples
    /// ```
    /// use actix_web::http::StatusCode;
    /// use events_backend::domain::Error;
    /// use events_backend::inbound::http::error::ApiError;
    ///
    /// let classified = ApiError::from(Error::bad_request("nope")).classify();
    /// assert_eq!(classified.status(), StatusCode::BAD_REQUEST);
    /// assert_eq!(classified.error().name, "BadRequest");
    /// assert_eq!(classified.error().message, "nope");
    /// ```
    pub fn classify(&self) -> Classified {
        match self {
            Self::Http(exception) => {
                Classified::new(exception.status, exception.name, exception.message.clone())
            }
            Self::Assertion(err) | Self::Domain(Error::Assertion(err)) => {
                Classified::new(StatusCode::BAD_REQUEST, BAD_REQUEST_NAME, err.to_string())
            }
            Self::Domain(Error::BadRequest { message }) => {
                Classified::new(StatusCode::BAD_REQUEST, BAD_REQUEST_NAME, message.clone())
            }
            Self::Domain(Error::Repository(_)) | Self::Unexpected(_) => Classified::internal(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.classify().status
    }

    fn error_response(&self) -> HttpResponse {
        let classified = self.classify();
        if classified.unexpected {
            let trace_id = TraceId::current().map(|id| id.to_string());
            error!(error = %self, detail = ?self, trace_id = ?trace_id, "unexpected error");
        }
        HttpResponse::build(classified.status).json(classified.to_envelope())
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

/// `JsonConfig` error handler: unreadable bodies become 400 envelopes.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::from(HttpException::bad_request(err.to_string())).into()
}

/// `PathConfig` error handler: undecodable path segments become 400 envelopes.
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::from(HttpException::bad_request(err.to_string())).into()
}

/// Default service: unmatched routes become 404 envelopes.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(HttpException::not_found(format!("Cannot {} {}", req.method(), req.path())).into())
}
