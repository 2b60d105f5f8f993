//! Outcome of a single API call.

use std::fmt;

use events_dto::{ApiErrorDto, ApiErrorResponseDto, ApiSuccessResponseDto};

/// Error name used when a failure carries none of its own.
pub const UNEXPECTED_ERROR_NAME: &str = "UnexpectedError";

/// Error message used when a failure carries none of its own.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error";

/// A failed call: either the server's error envelope or a local failure.
///
/// `status_code` is `None` when no valid envelope was received, which covers
/// timeouts, network failures and bodies that match neither envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    status_code: Option<u16>,
    error: ApiErrorDto,
}

impl ApiFailure {
    /// A failure that never produced a valid envelope.
    ///
    /// Empty names and messages fall back to [`UNEXPECTED_ERROR_NAME`] and
    /// [`UNEXPECTED_ERROR_MESSAGE`].
    #[must_use]
    pub fn local(name: &str, message: &str) -> Self {
        let name = if name.is_empty() {
            UNEXPECTED_ERROR_NAME
        } else {
            name
        };
        let message = if message.is_empty() {
            UNEXPECTED_ERROR_MESSAGE
        } else {
            message
        };
        Self {
            status_code: None,
            error: ApiErrorDto::new(name, message),
        }
    }

    /// Status from the error envelope, if one was received.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Error name and message.
    #[must_use]
    pub const fn error(&self) -> &ApiErrorDto {
        &self.error
    }
}

impl From<ApiErrorResponseDto> for ApiFailure {
    fn from(envelope: ApiErrorResponseDto) -> Self {
        Self {
            status_code: Some(envelope.status_code()),
            error: envelope.into_error(),
        }
    }
}

/// Renders as `(<status> status) <name> : <message>`, with `NaN` standing in
/// for a missing status.
impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "({status} status) ")?,
            None => f.write_str("(NaN status) ")?,
        }
        write!(f, "{} : {}", self.error.name, self.error.message)
    }
}

/// Result of an API call. Callers match on it; nothing is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// A success envelope whose data passed the DTO assertion.
    Success(ApiSuccessResponseDto<T>),
    /// An error envelope or a local failure.
    Error(ApiFailure),
}

impl<T> ApiResponse<T> {
    /// Whether the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Envelope status, `None` for local failures.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success(envelope) => Some(envelope.status_code()),
            Self::Error(failure) => failure.status_code(),
        }
    }

    /// Borrow the data of a successful call.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(envelope) => Some(envelope.data()),
            Self::Error(_) => None,
        }
    }

    /// Convert into a plain `Result`.
    ///
    /// # Errors
    /// Returns the [`ApiFailure`] of a failed call.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            Self::Success(envelope) => Ok(envelope.into_data()),
            Self::Error(failure) => Err(failure),
        }
    }
}
