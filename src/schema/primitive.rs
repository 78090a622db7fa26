//! Boolean and catch-all schemas.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::value_type_name;

/// Accepts `true` and `false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanSchema;

impl SchemaLike for BooleanSchema {
    fn type_name(&self) -> String {
        "boolean".to_string()
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        if value.is_boolean() {
            Validation::Success(value)
        } else {
            Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "expected boolean")
                    .with_code(codes::INVALID_TYPE)
                    .with_got(value_type_name(value))
                    .with_expected("boolean"),
            ))
        }
    }
}

/// Accepts every value, including `null`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnySchema;

impl SchemaLike for AnySchema {
    fn type_name(&self) -> String {
        "any".to_string()
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        _path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        Validation::Success(value)
    }
}
