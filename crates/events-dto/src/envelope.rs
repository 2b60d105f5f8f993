//! Uniform response envelope.
//!
//! Every response body is exactly one of two shapes, told apart by the literal
//! `success` flag:
//!
//! ```json
//! { "success": true,  "statusCode": 200, "data": { } }
//! { "success": false, "statusCode": 400, "error": { "name": "BadRequest", "message": "..." } }
//! ```

use std::fmt;
use std::sync::OnceLock;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::assertion::{AssertionFn, DtoAssertionError, create_assertion_fn};
use crate::schema::{ObjectShape, Schema};

/// Boolean that only (de)serializes as `SUCCESS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SuccessFlag<const SUCCESS: bool>;

impl<const SUCCESS: bool> SuccessFlag<SUCCESS> {
    /// The literal carried by this flag.
    pub const fn value(self) -> bool {
        SUCCESS
    }
}

impl<const SUCCESS: bool> Serialize for SuccessFlag<SUCCESS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(SUCCESS)
    }
}

impl<'de, const SUCCESS: bool> Deserialize<'de> for SuccessFlag<SUCCESS> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flag = bool::deserialize(deserializer)?;
        if flag == SUCCESS {
            Ok(Self)
        } else {
            Err(de::Error::invalid_value(
                de::Unexpected::Bool(flag),
                &if SUCCESS { "true" } else { "false" },
            ))
        }
    }
}

/// Successful response wrapping `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApiSuccessResponseDto<T> {
    success: SuccessFlag<true>,
    status_code: u16,
    data: T,
}

impl<T> ApiSuccessResponseDto<T> {
    /// Wrap `data` for a response sent with `status_code`.
    pub const fn new(status_code: u16, data: T) -> Self {
        Self {
            success: SuccessFlag,
            status_code,
            data,
        }
    }

    /// Transport status mirrored in the body.
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Borrow the payload.
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Take the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Name and message describing a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiErrorDto {
    /// Failure category, e.g. `BadRequest`.
    pub name: String,
    /// Human-readable description.
    pub message: String,
}

impl ApiErrorDto {
    /// Build an error body.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiErrorDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApiErrorResponseDto {
    success: SuccessFlag<false>,
    status_code: u16,
    error: ApiErrorDto,
}

impl ApiErrorResponseDto {
    /// Build an error envelope for a response sent with `status_code`.
    pub const fn new(status_code: u16, error: ApiErrorDto) -> Self {
        Self {
            success: SuccessFlag,
            status_code,
            error,
        }
    }

    /// Transport status mirrored in the body.
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Failure detail.
    pub const fn error(&self) -> &ApiErrorDto {
        &self.error
    }

    /// Take the failure detail.
    pub fn into_error(self) -> ApiErrorDto {
        self.error
    }
}

fn error_shape() -> ObjectShape {
    ObjectShape::new()
        .required("name", Schema::string())
        .required("message", Schema::string())
}

/// Success envelope whose `data` must match `data_schema`.
pub fn api_success_response_schema_with(data_schema: Schema) -> Schema {
    Schema::object(
        ObjectShape::new()
            .required("success", Schema::literal(true))
            .required("statusCode", Schema::integer())
            .required("data", data_schema),
    )
}

/// Success envelope carrying any object or array.
pub fn api_success_response_dto_schema() -> Schema {
    api_success_response_schema_with(Schema::union_of(vec![
        Schema::record(Schema::unknown()),
        Schema::array_of(Schema::unknown()),
    ]))
}

/// Error envelope.
pub fn api_error_response_dto_schema() -> Schema {
    Schema::object(
        ObjectShape::new()
            .required("success", Schema::literal(false))
            .required("statusCode", Schema::integer())
            .required("error", Schema::object(error_shape())),
    )
}

/// Assert a generic success envelope.
///
/// # Errors
/// Returns [`DtoAssertionError`] when `value` is not a success envelope.
pub fn assert_api_success_response_dto(value: &Value) -> Result<(), DtoAssertionError> {
    static ASSERTION: OnceLock<AssertionFn> = OnceLock::new();
    ASSERTION
        .get_or_init(|| {
            create_assertion_fn("ApiSuccessResponseDto", api_success_response_dto_schema())
        })
        .assert(value)
}

/// Assert an error envelope.
///
/// # Errors
/// Returns [`DtoAssertionError`] when `value` is not an error envelope.
pub fn assert_api_error_response_dto(value: &Value) -> Result<(), DtoAssertionError> {
    static ASSERTION: OnceLock<AssertionFn> = OnceLock::new();
    ASSERTION
        .get_or_init(|| create_assertion_fn("ApiErrorResponseDto", api_error_response_dto_schema()))
        .assert(value)
}
