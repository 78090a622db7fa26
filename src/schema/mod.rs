//! Schema definitions.
//!
//! Leaf schemas (string, integer, number, boolean, any) validate single
//! values. [`ObjectSchema`] and [`ArraySchema`] compose them, validating every
//! member in one pass and aggregating all failures. [`Schema`] is the shared,
//! immutable handle composites use to hold their children.
//!
//! # Example
//!
//! ```rust
//! use strata::{ArrayItem, Schema, SchemaExt, SchemaLike};
//! use serde_json::json;
//!
//! // [string, ...integer, boolean]
//! let row = Schema::tuple([
//!     ArrayItem::single(Schema::string()),
//!     ArrayItem::rest(Schema::integer()),
//!     ArrayItem::single(Schema::boolean()),
//! ])
//! .unwrap();
//!
//! assert!(row.safe_parse(&json!(["total", 1, 2, 3, true])).is_success());
//! assert!(row.safe_parse(&json!(["total", true])).is_success());
//! assert!(row.safe_parse(&json!(["total", 1])).is_failure());
//! ```

mod array;
mod modifiers;
mod numeric;
mod object;
mod primitive;
mod stratify;
mod string;
mod traits;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{DefinitionError, ParseError, SchemaErrors};
use crate::path::JsonPath;

pub use array::{ArrayItem, ArraySchema};
pub use modifiers::{NullableSchema, NullishSchema, OptionalSchema};
pub use numeric::{IntegerSchema, NumberSchema};
pub use object::{ObjectSchema, UnmatchedProperties};
pub use primitive::{AnySchema, BooleanSchema};
pub use stratify::StratifiedSchema;
pub use string::StringSchema;
pub use traits::{SchemaExt, SchemaLike};

/// A shared, immutable schema.
///
/// Cloning a `Schema` is cheap and never copies the underlying definition.
/// Every derivation (`optional`, `required`, `deep_partial`, ...) returns a
/// new handle and leaves the receiver untouched.
///
/// `Schema` also hosts the factory functions for every schema type.
///
/// # Example
///
/// ```rust
/// use strata::{Schema, SchemaExt};
/// use serde_json::json;
///
/// let age = Schema::integer().positive().into_schema();
/// let maybe_age = age.optional();
///
/// assert!(!age.is_optional());
/// assert!(maybe_age.is_optional());
/// assert!(!maybe_age.required().is_optional());
/// assert!(age.safe_parse(&json!(3)).is_success());
/// ```
#[derive(Clone)]
pub struct Schema(Arc<dyn SchemaLike>);

impl Schema {
    /// Wraps a concrete schema.
    pub fn new<S: SchemaLike + 'static>(schema: S) -> Self {
        Self(Arc::new(schema))
    }

    /// Creates a string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates an integer schema. Floats are rejected.
    pub fn integer() -> IntegerSchema {
        IntegerSchema::new()
    }

    /// Creates a schema accepting any JSON number.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema
    }

    /// Creates a schema that accepts every value.
    pub fn any() -> AnySchema {
        AnySchema
    }

    /// Creates an empty, strict object schema.
    ///
    /// ```rust
    /// use strata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string())
    ///     .optional_field("email", Schema::string());
    ///
    /// assert!(schema.safe_parse(&json!({"name": "Ada"})).is_success());
    /// // Undeclared keys are rejected unless a policy says otherwise.
    /// assert!(schema.safe_parse(&json!({"name": "Ada", "x": 1})).is_failure());
    /// ```
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an array schema whose elements all match `item`.
    pub fn array(item: impl Into<Schema>) -> ArraySchema {
        ArraySchema::of(item)
    }

    /// Creates an array schema from a tuple-with-rest declaration.
    ///
    /// Fails if the declaration cannot be stratified.
    pub fn tuple<I>(items: I) -> Result<ArraySchema, DefinitionError>
    where
        I: IntoIterator,
        I::Item: Into<ArrayItem>,
    {
        ArraySchema::tuple(items)
    }

    /// Human-readable label for this schema's shape.
    pub fn type_name(&self) -> String {
        self.0.type_name()
    }

    /// Whether an enclosing composite may omit this member.
    pub fn is_optional(&self) -> bool {
        self.0.is_optional()
    }

    /// Validates `value`, reporting failures relative to `path`.
    pub fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        self.0.validate(value, path)
    }

    /// Validates `value` at the root path without raising.
    pub fn safe_parse<'v>(&self, value: &'v Value) -> Validation<&'v Value, SchemaErrors> {
        self.0.safe_parse(value)
    }

    /// Validates `value` at the root path, returning the report on failure.
    pub fn parse<'v>(&self, value: &'v Value) -> Result<&'v Value, ParseError> {
        self.0.parse(value)
    }

    /// This schema with absence allowed. Already-optional schemas are
    /// returned as they are.
    pub fn optional(&self) -> Schema {
        if self.is_optional() {
            self.clone()
        } else {
            Schema::new(OptionalSchema::new(self.clone()))
        }
    }

    /// This schema with `null` allowed.
    pub fn nullable(&self) -> Schema {
        Schema::new(NullableSchema::new(self.clone()))
    }

    /// This schema with absence and `null` allowed.
    pub fn nullish(&self) -> Schema {
        Schema::new(NullishSchema::new(self.required()))
    }

    /// This schema with absence no longer allowed.
    ///
    /// `Optional(S)` becomes `S`, `Nullish(S)` becomes `Nullable(S)`; other
    /// schemas are returned as they are.
    pub fn required(&self) -> Schema {
        let mut current = self.clone();
        while let Some(inner) = current.0.unwrap_optional() {
            current = inner;
        }
        current
    }

    /// Recursively optional form: nested objects and arrays become deep
    /// partial, and the schema itself becomes optional.
    pub fn deep_partial(&self) -> Result<Schema, DefinitionError> {
        Ok(self.deepen_partial()?.optional())
    }

    /// Recursively required form: optional wrappers are removed here and in
    /// every nested object and array.
    pub fn deep_required(&self) -> Result<Schema, DefinitionError> {
        self.required().deepen_required()
    }

    /// Read access to an object declaration, looking through nothing else.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        self.0.as_object()
    }

    /// Read access to an array declaration.
    pub fn as_array(&self) -> Option<&ArraySchema> {
        self.0.as_array()
    }

    /// Returns true if both handles point at the same definition.
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The deep-partial shape without making the schema itself optional.
    pub(crate) fn deepen_partial(&self) -> Result<Schema, DefinitionError> {
        Ok(self.0.to_deep_partial()?.unwrap_or_else(|| self.clone()))
    }

    /// The deep-required shape without unwrapping this schema.
    pub(crate) fn deepen_required(&self) -> Result<Schema, DefinitionError> {
        Ok(self.0.to_deep_required()?.unwrap_or_else(|| self.clone()))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Schema").field(&self.type_name()).finish()
    }
}

impl<S: SchemaLike + 'static> From<S> for Schema {
    fn from(schema: S) -> Self {
        Schema::new(schema)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
    assert_send::<ObjectSchema>();
    assert_sync::<ObjectSchema>();
    assert_send::<ArraySchema>();
    assert_sync::<ArraySchema>();
};

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
