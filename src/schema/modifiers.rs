//! Optional, nullable and nullish wrappers.
//!
//! These are usually built through [`Schema::optional`], [`Schema::nullable`]
//! and [`Schema::nullish`]. Absence is decided by the enclosing composite,
//! which consults [`SchemaLike::is_optional`]; `null` is decided here.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{DefinitionError, SchemaErrors};
use crate::path::JsonPath;

use super::array::ArraySchema;
use super::object::ObjectSchema;
use super::traits::SchemaLike;
use super::Schema;

/// A member that may be absent. Present values go to the inner schema.
#[derive(Clone, Debug)]
pub struct OptionalSchema {
    inner: Schema,
}

impl OptionalSchema {
    /// Wraps `inner`.
    pub fn new(inner: Schema) -> Self {
        Self { inner }
    }

    /// The wrapped schema.
    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl SchemaLike for OptionalSchema {
    fn type_name(&self) -> String {
        format!("{}?", self.inner.type_name())
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        self.inner.validate(value, path)
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn unwrap_optional(&self) -> Option<Schema> {
        Some(self.inner.clone())
    }

    fn to_deep_partial(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(self.inner.deepen_partial()?.optional()))
    }

    fn to_deep_required(&self) -> Result<Option<Schema>, DefinitionError> {
        self.inner.deep_required().map(Some)
    }

    fn as_object(&self) -> Option<&ObjectSchema> {
        self.inner.as_object()
    }

    fn as_array(&self) -> Option<&ArraySchema> {
        self.inner.as_array()
    }
}

/// A member whose value may be `null`.
#[derive(Clone, Debug)]
pub struct NullableSchema {
    inner: Schema,
}

impl NullableSchema {
    /// Wraps `inner`.
    pub fn new(inner: Schema) -> Self {
        Self { inner }
    }

    /// The wrapped schema.
    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl SchemaLike for NullableSchema {
    fn type_name(&self) -> String {
        format!("{} | null", self.inner.type_name())
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        if value.is_null() {
            Validation::Success(value)
        } else {
            self.inner.validate(value, path)
        }
    }

    fn is_optional(&self) -> bool {
        self.inner.is_optional()
    }

    fn unwrap_optional(&self) -> Option<Schema> {
        if self.inner.is_optional() {
            Some(self.inner.required().nullable())
        } else {
            None
        }
    }

    fn to_deep_partial(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(self.inner.deepen_partial()?.nullable()))
    }

    fn to_deep_required(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(self.inner.deepen_required()?.nullable()))
    }

    fn as_object(&self) -> Option<&ObjectSchema> {
        self.inner.as_object()
    }

    fn as_array(&self) -> Option<&ArraySchema> {
        self.inner.as_array()
    }
}

/// A member that may be absent or `null`.
#[derive(Clone, Debug)]
pub struct NullishSchema {
    inner: Schema,
}

impl NullishSchema {
    /// Wraps `inner`.
    pub fn new(inner: Schema) -> Self {
        Self { inner }
    }

    /// The wrapped schema.
    pub fn inner(&self) -> &Schema {
        &self.inner
    }
}

impl SchemaLike for NullishSchema {
    fn type_name(&self) -> String {
        format!("({} | null)?", self.inner.type_name())
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        if value.is_null() {
            Validation::Success(value)
        } else {
            self.inner.validate(value, path)
        }
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn unwrap_optional(&self) -> Option<Schema> {
        Some(self.inner.nullable())
    }

    fn to_deep_partial(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(self.inner.deepen_partial()?.nullish()))
    }

    fn to_deep_required(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(self.inner.deep_required()?.nullable()))
    }

    fn as_object(&self) -> Option<&ObjectSchema> {
        self.inner.as_object()
    }

    fn as_array(&self) -> Option<&ArraySchema> {
        self.inner.as_array()
    }
}
