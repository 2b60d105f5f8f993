//! Event DTO catalogue.
//!
//! The create and update shapes are derived from the full event shape so the
//! three can never drift apart: create omits `id`, update makes every create
//! field optional.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assertion::{AssertionFn, DtoAssertionError, create_assertion_fn};
use crate::schema::{ObjectShape, Schema};
use crate::validators::{is_email, is_valid_date_string, parse_js_number};

/// Largest magnitude a JS number holds without losing integer precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Positive integer identifying a stored event.
pub fn event_id_schema() -> Schema {
    Schema::integer().refine("positive", |value| value.as_i64().is_some_and(|id| id > 0))
}

fn email_schema() -> Schema {
    Schema::string().refine("email", |value| value.as_str().is_some_and(is_email))
}

fn date_schema() -> Schema {
    Schema::string().refine("date", |value| {
        value.as_str().is_some_and(is_valid_date_string)
    })
}

/// Shape of a stored event, `id` included.
pub fn event_shape() -> ObjectShape {
    ObjectShape::new()
        .required("id", event_id_schema())
        .required("firstName", Schema::string().nonempty())
        .required("lastName", Schema::string().nonempty())
        .required("email", email_schema())
        .required("date", date_schema())
}

/// Full event as returned by the API.
pub fn event_dto_schema() -> Schema {
    Schema::object(event_shape())
}

/// Event without `id`, as accepted on create.
pub fn create_event_dto_schema() -> Schema {
    Schema::object(event_shape().omit(&["id"]))
}

/// Any subset of the create fields, as accepted on update.
pub fn update_event_dto_schema() -> Schema {
    Schema::object(event_shape().omit(&["id"]).partial())
}

/// Ordered list of full events.
pub fn events_array_dto_schema() -> Schema {
    Schema::array_of(event_dto_schema())
}

macro_rules! cached_assertion {
    ($(#[$meta:meta])* $fn_name:ident, $cache:ident, $dto:literal, $schema:expr) => {
        #[doc = concat!("Cached [`AssertionFn`] for `", $dto, "`.")]
        pub fn $cache() -> &'static AssertionFn {
            static ASSERTION: OnceLock<AssertionFn> = OnceLock::new();
            ASSERTION.get_or_init(|| create_assertion_fn($dto, $schema))
        }

        $(#[$meta])*
        ///
        /// # Errors
        /// Returns [`DtoAssertionError`] when `value` does not match.
        pub fn $fn_name(value: &Value) -> Result<(), DtoAssertionError> {
            $cache().assert(value)
        }
    };
}

cached_assertion!(
    /// Assert a bare event id.
    assert_event_id,
    event_id_assertion,
    "EventIdDto",
    event_id_schema()
);
cached_assertion!(
    /// Assert a full event.
    assert_event_dto,
    event_assertion,
    "EventDto",
    event_dto_schema()
);
cached_assertion!(
    /// Assert a create payload.
    assert_create_event_dto,
    create_event_assertion,
    "CreateEventDto",
    create_event_dto_schema()
);
cached_assertion!(
    /// Assert an update payload.
    assert_update_event_dto,
    update_event_assertion,
    "UpdateEventDto",
    update_event_dto_schema()
);
cached_assertion!(
    /// Assert a list of full events.
    assert_events_array_dto,
    events_array_assertion,
    "EventsArrayDto",
    events_array_dto_schema()
);

/// Validated event identifier. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EventId(i64);

impl EventId {
    /// Wrap `id` after checking it against the event id schema.
    ///
    /// # Errors
    /// Returns [`DtoAssertionError`] when `id` is zero or negative.
    pub fn new(id: i64) -> Result<Self, DtoAssertionError> {
        assert_event_id(&Value::from(id))?;
        Ok(Self(id))
    }

    /// Coerce a raw path segment the way `Number(segment)` would in a
    /// browser, then assert it.
    ///
    /// # Examples
    /// ```
    /// use events_dto::EventId;
    ///
    /// assert_eq!(EventId::from_path("12").map(EventId::get), Ok(12));
    /// assert_eq!(EventId::from_path("0x10").map(EventId::get), Ok(16));
    /// assert!(EventId::from_path("1.5").is_err());
    /// assert!(EventId::from_path("abc").is_err());
    /// ```
    ///
    /// # Errors
    /// Returns [`DtoAssertionError`] for non-numeric, fractional or
    /// non-positive segments.
    pub fn from_path(raw: &str) -> Result<Self, DtoAssertionError> {
        let candidate = coerce_path_number(raw);
        match candidate.as_i64() {
            Some(id) => Self::new(id),
            None => Err(event_id_assertion().reject(&candidate)),
        }
    }

    /// Inner integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

fn coerce_path_number(raw: &str) -> Value {
    if let Ok(id) = raw.trim().parse::<i64>() {
        return Value::from(id);
    }
    match parse_js_number(raw) {
        Some(number) if number.fract().abs() < f64::EPSILON && number.abs() <= MAX_SAFE_INTEGER => {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "whole number bounded by MAX_SAFE_INTEGER"
            )]
            let whole = number as i64;
            Value::from(whole)
        }
        Some(number) => serde_json::Number::from_f64(number)
            .map_or_else(|| Value::String(raw.to_owned()), Value::Number),
        None => Value::String(raw.to_owned()),
    }
}

impl TryFrom<i64> for EventId {
    type Error = DtoAssertionError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full event as exchanged over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventDto {
    /// Server-assigned identifier.
    pub id: EventId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
    /// ISO-8601 timestamp.
    pub date: String,
}

/// Payload accepted when creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEventDto {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
    /// Any date string the validators accept.
    pub date: String,
}

/// Payload accepted when updating an event. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateEventDto {
    /// Replacement given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Replacement family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Replacement contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl UpdateEventDto {
    /// `true` when no field is present.
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.date.is_none()
    }
}

impl EventDto {
    /// Overwrite the fields present in `update`.
    pub fn apply(&mut self, update: &UpdateEventDto) {
        if let Some(first_name) = &update.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &update.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(email) = &update.email {
            self.email.clone_from(email);
        }
        if let Some(date) = &update.date {
            self.date.clone_from(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn valid_event() -> Value {
        json!({
            "id": 1,
            "firstName": "Rafael",
            "lastName": "Nadal",
            "email": "test@test.es",
            "date": "2022-04-13T20:00:00.082Z",
        })
    }

    #[fixture]
    fn valid_create() -> Value {
        json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "johndoe@mail.com",
            "date": "Sat Apr 09 2022 21:42:30 GMT+0200",
        })
    }

    #[rstest]
    fn create_accepts_valid_payload(valid_create: Value) {
        assert!(assert_create_event_dto(&valid_create).is_ok());
    }

    #[rstest]
    fn create_rejects_extra_key(mut valid_create: Value) {
        if let Some(object) = valid_create.as_object_mut() {
            object.insert("extraProp".into(), json!("x"));
        }
        let err = assert_create_event_dto(&valid_create).expect_err("extra key");
        assert_eq!(err.dto(), "CreateEventDto");
        assert_eq!(
            err.failures().first().map(|f| f.path().join(".")),
            Some("extraProp".to_owned())
        );
    }

    #[rstest]
    fn create_rejects_id(valid_event: Value) {
        assert!(assert_create_event_dto(&valid_event).is_err());
    }

    #[rstest]
    #[case("id")]
    #[case("firstName")]
    #[case("lastName")]
    #[case("email")]
    #[case("date")]
    fn event_requires_every_key(valid_event: Value, #[case] key: &str) {
        let mut without = valid_event.clone();
        if let Some(object) = without.as_object_mut() {
            object.remove(key);
        }
        assert!(assert_event_dto(&without).is_err());

        let mut nulled = valid_event;
        if let Some(object) = nulled.as_object_mut() {
            object.insert(key.to_owned(), Value::Null);
        }
        assert!(assert_event_dto(&nulled).is_err());
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"firstName": "Ann"}))]
    #[case(json!({"email": "a@b.io", "date": "2022-04-10"}))]
    fn update_accepts_subsets(#[case] payload: Value) {
        assert!(assert_update_event_dto(&payload).is_ok());
    }

    #[rstest]
    #[case(json!({"firstName": ""}))]
    #[case(json!({"email": "abc@abc.123"}))]
    #[case(json!({"date": "12"}))]
    #[case(json!({"date": "+10000-01-01"}))]
    #[case(json!({"date": "-0005-01-01"}))]
    #[case(json!({"lastName": null}))]
    #[case(json!({"id": 3}))]
    fn update_rejects_invalid_present_fields(#[case] payload: Value) {
        assert!(assert_update_event_dto(&payload).is_err());
    }

    #[rstest]
    fn derived_shapes_follow_the_full_shape() {
        let full = event_shape();
        let create = create_event_dto_schema();
        let update = update_event_dto_schema();
        let create_shape = create.as_object().expect("object");
        let update_shape = update.as_object().expect("object");

        assert_eq!(create_shape.fields().len() + 1, full.fields().len());
        assert!(create_shape.field("id").is_none());
        for field in create_shape.fields() {
            assert_eq!(Some(field), full.field(field.name()));
            assert!(!field.is_optional());
            let partial = update_shape.field(field.name()).expect("same key");
            assert!(partial.is_optional());
            assert_eq!(partial.schema(), field.schema());
        }
        assert_eq!(update_shape.fields().len(), create_shape.fields().len());
    }

    #[rstest]
    fn event_id_rejects_non_positive() {
        assert!(assert_event_id(&json!(1)).is_ok());
        assert!(assert_event_id(&json!(0)).is_err());
        assert!(assert_event_id(&json!(-4)).is_err());
        assert!(assert_event_id(&json!(1.5)).is_err());
        assert!(assert_event_id(&json!("1")).is_err());
        assert!(EventId::new(0).is_err());
        assert_eq!(EventId::new(7).map(EventId::get), Ok(7));
    }

    #[rstest]
    #[case("5", Some(5))]
    #[case(" 5 ", Some(5))]
    #[case("5.0", Some(5))]
    #[case("1e2", Some(100))]
    #[case("0b11", Some(3))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("2.5", None)]
    #[case("", None)]
    #[case("Infinity", None)]
    #[case("abc", None)]
    fn from_path_coerces_like_number(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(EventId::from_path(raw).ok().map(EventId::get), expected);
    }

    #[rstest]
    fn accepted_event_round_trips(valid_event: Value) {
        let typed: EventDto = serde_json::from_value(valid_event.clone()).expect("typed");
        let encoded = serde_json::to_value(&typed).expect("encode");
        assert_eq!(encoded, valid_event);
        assert!(assert_event_dto(&encoded).is_ok());
    }

    #[rstest]
    fn typed_event_rejects_zero_id(mut valid_event: Value) {
        if let Some(object) = valid_event.as_object_mut() {
            object.insert("id".into(), json!(0));
        }
        assert!(serde_json::from_value::<EventDto>(valid_event).is_err());
    }

    #[rstest]
    fn update_serializes_present_fields_only() {
        let update = UpdateEventDto {
            email: Some("x@y.com".into()),
            ..UpdateEventDto::default()
        };
        assert_eq!(
            serde_json::to_value(&update).expect("encode"),
            json!({"email": "x@y.com"})
        );
        assert!(!update.is_empty());
        assert!(UpdateEventDto::default().is_empty());
    }

    #[rstest]
    fn apply_overwrites_present_fields(valid_event: Value) {
        let mut event: EventDto = serde_json::from_value(valid_event).expect("typed");
        event.apply(&UpdateEventDto {
            first_name: Some("Carlos".into()),
            ..UpdateEventDto::default()
        });
        assert_eq!(event.first_name, "Carlos");
        assert_eq!(event.last_name, "Nadal");
    }

    #[rstest]
    fn events_array_checks_each_item(valid_event: Value) {
        assert!(assert_events_array_dto(&json!([])).is_ok());
        assert!(assert_events_array_dto(&json!([valid_event.clone()])).is_ok());
        let err = assert_events_array_dto(&json!([valid_event, {"id": 2}])).expect_err("bad item");
        assert!(err.message().starts_with("At path: 1."));
    }
}
