//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is the capability set every schema implements, leaf or
//! composite. Composites store their children as [`Schema`] handles, so any
//! implementor can be nested inside an object or array.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{DefinitionError, ParseError, SchemaErrors};
use crate::path::JsonPath;

use super::array::ArraySchema;
use super::object::ObjectSchema;
use super::Schema;

/// A validator for one value shape.
///
/// `validate` never copies or coerces: on success it hands back the very
/// reference it was given. The `Send + Sync` bound lets one schema be shared
/// across threads behind an `Arc`.
///
/// The remaining methods are hooks for the derived-schema algebra and have
/// defaults suitable for leaf schemas.
///
/// # Example
///
/// ```rust
/// use strata::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::integer().positive());
///
/// let value = json!({"name": "Ada", "age": 36});
/// let parsed = schema.parse(&value).unwrap();
/// assert!(std::ptr::eq(parsed, &value));
/// ```
pub trait SchemaLike: Send + Sync {
    /// Human-readable label for this schema's shape.
    fn type_name(&self) -> String;

    /// Validates `value`, reporting failures relative to `path`.
    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors>;

    /// Whether the enclosing composite may omit this member entirely.
    fn is_optional(&self) -> bool {
        false
    }

    /// For optional wrappers, the same schema with absence no longer allowed.
    fn unwrap_optional(&self) -> Option<Schema> {
        None
    }

    /// The deep-partial form of this schema, if it has one.
    ///
    /// Returns `Ok(None)` for schemas without nested members.
    fn to_deep_partial(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(None)
    }

    /// The deep-required form of this schema, if it has one.
    fn to_deep_required(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(None)
    }

    /// Read access to an object declaration.
    fn as_object(&self) -> Option<&ObjectSchema> {
        None
    }

    /// Read access to an array declaration.
    fn as_array(&self) -> Option<&ArraySchema> {
        None
    }

    /// Validates `value` at the root path. Never fails; errors are returned
    /// as `Validation::Failure`.
    fn safe_parse<'v>(&self, value: &'v Value) -> Validation<&'v Value, SchemaErrors> {
        self.validate(value, &JsonPath::root())
    }

    /// Validates `value` at the root path, returning the full report as an
    /// error on failure.
    fn parse<'v>(&self, value: &'v Value) -> Result<&'v Value, ParseError> {
        self.safe_parse(value)
            .into_result()
            .map_err(|errors| ParseError::new(value.clone(), errors))
    }
}

/// Wrapping helpers available on every concrete schema.
///
/// ```rust
/// use strata::{Schema, SchemaExt};
///
/// let nickname = Schema::string().min_len(2).optional();
/// assert!(nickname.is_optional());
/// ```
pub trait SchemaExt: SchemaLike + Sized + 'static {
    /// Moves this schema into a shareable [`Schema`] handle.
    fn into_schema(self) -> Schema {
        Schema::new(self)
    }

    /// This schema, with absence allowed.
    fn optional(self) -> Schema {
        self.into_schema().optional()
    }

    /// This schema, with `null` allowed.
    fn nullable(self) -> Schema {
        self.into_schema().nullable()
    }

    /// This schema, with absence and `null` allowed.
    fn nullish(self) -> Schema {
        self.into_schema().nullish()
    }
}

impl<S: SchemaLike + 'static> SchemaExt for S {}
