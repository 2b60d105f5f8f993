//! Assert-or-fail wrappers around [`Schema`] values.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::schema::{Failure, Schema};

/// A payload did not match the schema of the named DTO.
///
/// Every schema reports through this one error kind; inspect
/// [`DtoAssertionError::failures`] for structured detail rather than the
/// message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{dto}: {message}")]
pub struct DtoAssertionError {
    dto: &'static str,
    message: String,
    failures: Vec<Failure>,
}

impl DtoAssertionError {
    fn from_failures(dto: &'static str, failures: Vec<Failure>) -> Self {
        let message = failures
            .first()
            .map_or_else(|| "Invalid value".to_owned(), ToString::to_string);
        Self {
            dto,
            message,
            failures,
        }
    }

    fn decode(dto: &'static str, error: &serde_json::Error) -> Self {
        Self {
            dto,
            message: error.to_string(),
            failures: Vec::new(),
        }
    }

    /// Name of the DTO whose assertion failed.
    pub const fn dto(&self) -> &'static str {
        self.dto
    }

    /// Human-readable description of the first failure.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Every failure found, in traversal order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

/// A named schema that either accepts a value or returns a
/// [`DtoAssertionError`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFn {
    name: &'static str,
    schema: Schema,
}

/// Bind `schema` to the DTO `name` used in error messages.
///
/// # Examples
/// ```
/// use events_dto::assertion::create_assertion_fn;
/// use events_dto::schema::Schema;
/// use serde_json::json;
///
/// let assert_name = create_assertion_fn("NameDto", Schema::string().nonempty());
/// assert!(assert_name.assert(&json!("Ada")).is_ok());
/// let err = assert_name.assert(&json!("")).unwrap_err();
/// assert_eq!(err.dto(), "NameDto");
/// ```
pub const fn create_assertion_fn(name: &'static str, schema: Schema) -> AssertionFn {
    AssertionFn { name, schema }
}

impl AssertionFn {
    /// DTO name reported on failure.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Underlying schema.
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Succeed iff `value` satisfies the schema. Never modifies `value`.
    ///
    /// # Errors
    /// Returns [`DtoAssertionError`] listing every failure found.
    pub fn assert(&self, value: &Value) -> Result<(), DtoAssertionError> {
        let failures = self.schema.validate(value);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DtoAssertionError::from_failures(self.name, failures))
        }
    }

    /// Error for a value already known not to match.
    pub(crate) fn reject(&self, value: &Value) -> DtoAssertionError {
        DtoAssertionError::from_failures(self.name, self.schema.validate(value))
    }

    /// Assert `value`, then deserialize it into `T`.
    ///
    /// # Errors
    /// Returns [`DtoAssertionError`] if the assertion fails or the accepted
    /// value does not deserialize into `T`.
    pub fn parse<T: DeserializeOwned>(&self, value: Value) -> Result<T, DtoAssertionError> {
        self.assert(&value)?;
        serde_json::from_value(value).map_err(|err| DtoAssertionError::decode(self.name, &err))
    }
}
