//! Composable shape descriptions for JSON payloads.
//!
//! A [`Schema`] is plain data: derived DTOs are produced by transforming a
//! base value (see [`ObjectShape::omit`] and [`ObjectShape::partial`]) rather
//! than by declaring parallel structs. Validation walks the whole value and
//! reports every [`Failure`] with the path at which it occurred.

use std::fmt;

use serde_json::{Map, Value};

/// Named predicate attached to a [`Schema::Refinement`].
pub type Predicate = fn(&Value) -> bool;

/// Primitive JSON kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Any JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part that fits in `i64`.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Any value at all.
    Unknown,
}

impl Primitive {
    /// Type name used in failure messages.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.as_i64().is_some(),
            Self::Boolean => value.is_boolean(),
            Self::Unknown => true,
        }
    }
}

/// Base schema paired with a named predicate that must also hold.
#[derive(Debug, Clone)]
pub struct Refinement {
    base: Box<Schema>,
    name: &'static str,
    predicate: Predicate,
}

impl Refinement {
    /// Schema the value must satisfy before the predicate runs.
    pub fn base(&self) -> &Schema {
        &self.base
    }

    /// Name reported when the predicate fails.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Refinements compare by name and base; predicates are identified by name.
impl PartialEq for Refinement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.base == other.base
    }
}

/// A single field of an [`ObjectShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    schema: Schema,
    optional: bool,
}

impl Field {
    /// Key the field occupies in the JSON object.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Schema applied to the field's value when present.
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Whether the key may be absent.
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Closed object description: listed keys only, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    fields: Vec<Field>,
}

impl ObjectShape {
    /// Start an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key that must be present.
    #[must_use]
    pub fn required(self, name: impl Into<String>, schema: Schema) -> Self {
        self.with_field(name.into(), schema, false)
    }

    /// Add a key that may be absent.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, schema: Schema) -> Self {
        self.with_field(name.into(), schema, true)
    }

    fn with_field(mut self, name: String, schema: Schema, optional: bool) -> Self {
        self.fields.retain(|field| field.name != name);
        self.fields.push(Field {
            name,
            schema,
            optional,
        });
        self
    }

    /// Copy of this shape without the listed keys.
    ///
    /// # Examples
    /// ```
    /// use events_dto::schema::{ObjectShape, Schema};
    ///
    /// let full = ObjectShape::new()
    ///     .required("id", Schema::integer())
    ///     .required("name", Schema::string());
    /// let without_id = full.omit(&["id"]);
    /// assert!(without_id.field("id").is_none());
    /// assert!(without_id.field("name").is_some());
    /// ```
    #[must_use]
    pub fn omit(&self, keys: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|field| !keys.contains(&field.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Copy of this shape with every key optional.
    ///
    /// Present values are still checked against the original field schema.
    #[must_use]
    pub fn partial(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|field| Field {
                    optional: true,
                    ..field.clone()
                })
                .collect(),
        }
    }

    /// Look up a field by key.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn collect(&self, object: &Map<String, Value>, path: &mut Vec<String>, out: &mut Vec<Failure>) {
        for field in &self.fields {
            path.push(field.name.clone());
            match object.get(&field.name) {
                Some(value) => field.schema.collect(value, path, out),
                None if field.optional => {}
                None => out.push(Failure::new(path, field.schema.expectation(), None)),
            }
            path.pop();
        }

        for (key, value) in object {
            if self.field(key).is_none() {
                path.push(key.clone());
                out.push(Failure::new(path, "a value of type `never`".to_owned(), Some(value)));
                path.pop();
            }
        }
    }
}

/// Shape a JSON value must have.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// A primitive kind.
    Primitive(Primitive),
    /// Exactly this value.
    Literal(Value),
    /// A closed object.
    Object(ObjectShape),
    /// Any object whose values all match the inner schema.
    Record(Box<Schema>),
    /// An array whose items all match the inner schema.
    ArrayOf(Box<Schema>),
    /// At least one member must match.
    UnionOf(Vec<Schema>),
    /// A base schema plus a named predicate.
    Refinement(Refinement),
}

impl Schema {
    /// Any string.
    pub const fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    /// Any number.
    pub const fn number() -> Self {
        Self::Primitive(Primitive::Number)
    }

    /// Any integer representable as `i64`.
    pub const fn integer() -> Self {
        Self::Primitive(Primitive::Integer)
    }

    /// `true` or `false`.
    pub const fn boolean() -> Self {
        Self::Primitive(Primitive::Boolean)
    }

    /// Anything.
    pub const fn unknown() -> Self {
        Self::Primitive(Primitive::Unknown)
    }

    /// Exactly `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// A closed object with the given shape.
    pub const fn object(shape: ObjectShape) -> Self {
        Self::Object(shape)
    }

    /// An open object whose values all satisfy `values`.
    pub fn record(values: Self) -> Self {
        Self::Record(Box::new(values))
    }

    /// An array whose items all satisfy `items`.
    pub fn array_of(items: Self) -> Self {
        Self::ArrayOf(Box::new(items))
    }

    /// Any of `members`.
    pub const fn union_of(members: Vec<Self>) -> Self {
        Self::UnionOf(members)
    }

    /// Narrow this schema with a named predicate.
    ///
    /// # Examples
    /// ```
    /// use events_dto::schema::Schema;
    /// use serde_json::json;
    ///
    /// let even = Schema::integer().refine("even", |v| v.as_i64().is_some_and(|n| n % 2 == 0));
    /// assert!(even.is_valid(&json!(4)));
    /// assert!(!even.is_valid(&json!(3)));
    /// assert!(!even.is_valid(&json!("4")));
    /// ```
    #[must_use]
    pub fn refine(self, name: &'static str, predicate: Predicate) -> Self {
        Self::Refinement(Refinement {
            base: Box::new(self),
            name,
            predicate,
        })
    }

    /// Reject empty strings, arrays and objects.
    #[must_use]
    pub fn nonempty(self) -> Self {
        self.refine("nonempty", |value| match value {
            Value::String(text) => !text.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => true,
        })
    }

    /// The object shape, when this schema is a closed object.
    pub const fn as_object(&self) -> Option<&ObjectShape> {
        match self {
            Self::Object(shape) => Some(shape),
            _ => None,
        }
    }

    /// Short label used inside failure messages.
    pub fn label(&self) -> String {
        match self {
            Self::Primitive(primitive) => primitive.type_name().to_owned(),
            Self::Literal(value) => value.to_string(),
            Self::Object(_) => "object".to_owned(),
            Self::Record(_) => "record".to_owned(),
            Self::ArrayOf(_) => "array".to_owned(),
            Self::UnionOf(members) => members
                .iter()
                .map(Self::label)
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Refinement(refinement) => refinement.name.to_owned(),
        }
    }

    fn expectation(&self) -> String {
        match self {
            Self::Literal(value) => format!("the literal `{value}`"),
            Self::Object(_) | Self::Record(_) => "an object".to_owned(),
            Self::ArrayOf(_) => "an array value".to_owned(),
            Self::UnionOf(_) => format!("the value to satisfy a union of `{}`", self.label()),
            Self::Primitive(_) | Self::Refinement(_) => {
                format!("a value of type `{}`", self.label())
            }
        }
    }

    /// Check `value`, returning every failure found. Empty means valid.
    pub fn validate(&self, value: &Value) -> Vec<Failure> {
        let mut failures = Vec::new();
        self.collect(value, &mut Vec::new(), &mut failures);
        failures
    }

    /// `true` when [`Schema::validate`] reports nothing.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_empty()
    }

    fn collect(&self, value: &Value, path: &mut Vec<String>, out: &mut Vec<Failure>) {
        match self {
            Self::Primitive(primitive) => {
                if !primitive.accepts(value) {
                    out.push(Failure::new(path, self.expectation(), Some(value)));
                }
            }
            Self::Literal(expected) => {
                if value != expected {
                    out.push(Failure::new(path, self.expectation(), Some(value)));
                }
            }
            Self::Object(shape) => match value.as_object() {
                Some(object) => shape.collect(object, path, out),
                None => out.push(Failure::new(path, self.expectation(), Some(value))),
            },
            Self::Record(values) => match value.as_object() {
                Some(object) => {
                    for (key, item) in object {
                        path.push(key.clone());
                        values.collect(item, path, out);
                        path.pop();
                    }
                }
                None => out.push(Failure::new(path, self.expectation(), Some(value))),
            },
            Self::ArrayOf(items) => match value.as_array() {
                Some(array) => {
                    for (index, item) in array.iter().enumerate() {
                        path.push(index.to_string());
                        items.collect(item, path, out);
                        path.pop();
                    }
                }
                None => out.push(Failure::new(path, self.expectation(), Some(value))),
            },
            Self::UnionOf(members) => {
                if !members.iter().any(|member| member.is_valid(value)) {
                    out.push(Failure::new(path, self.expectation(), Some(value)));
                }
            }
            Self::Refinement(refinement) => {
                let before = out.len();
                refinement.base.collect(value, path, out);
                if out.len() == before && !(refinement.predicate)(value) {
                    out.push(Failure::new(path, self.expectation(), Some(value)));
                }
            }
        }
    }
}

/// One mismatch between a value and a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    path: Vec<String>,
    expected: String,
    received: String,
}

impl Failure {
    fn new(path: &[String], expected: String, received: Option<&Value>) -> Self {
        Self {
            path: path.to_vec(),
            expected,
            received: received.map_or_else(|| "undefined".to_owned(), Value::to_string),
        }
    }

    /// Keys and array indices leading to the offending value.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// What the schema expected, e.g. ``a value of type `email` ``.
    pub fn expected(&self) -> &str {
        self.expected.as_str()
    }

    /// JSON rendering of the offending value, or `undefined` for a missing key.
    pub fn received(&self) -> &str {
        self.received.as_str()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.path.is_empty() {
            write!(f, "At path: {} -- ", self.path.join("."))?;
        }
        write!(
            f,
            "Expected {}, but received: `{}`",
            self.expected, self.received
        )
    }
}
