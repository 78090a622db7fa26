//! Numeric schemas.
//!
//! [`IntegerSchema`] accepts whole numbers only; [`NumberSchema`] accepts any
//! JSON number. Both report every broken constraint.

use std::ops::RangeInclusive;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::value_type_name;

#[derive(Clone, Debug)]
enum IntegerConstraint {
    Min { value: i64, message: Option<String> },
    Max { value: i64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
    Negative { message: Option<String> },
}

/// A schema for integer values.
///
/// # Example
///
/// ```rust
/// use strata::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::integer().range(1..=10);
///
/// assert!(schema.validate(&json!(5), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(11), &JsonPath::root()).is_failure());
/// // Floats are rejected even when whole.
/// assert!(schema.validate(&json!(5.0), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone, Debug, Default)]
pub struct IntegerSchema {
    constraints: Vec<IntegerConstraint>,
    type_error_message: Option<String>,
}

impl IntegerSchema {
    /// Creates an integer schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a value of at least `value`.
    pub fn min(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Requires a value of at most `value`.
    pub fn max(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Shorthand for `.min(start).max(end)`.
    pub fn range(self, range: RangeInclusive<i64>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    /// Requires a value greater than zero.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::Positive { message: None });
        self
    }

    /// Requires a value of zero or more.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::NonNegative { message: None });
        self
    }

    /// Requires a value less than zero.
    pub fn negative(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::Negative { message: None });
        self
    }

    /// Sets the message of the most recent constraint, or of the type error
    /// if no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(IntegerConstraint::Min { message: m, .. })
            | Some(IntegerConstraint::Max { message: m, .. })
            | Some(IntegerConstraint::Positive { message: m })
            | Some(IntegerConstraint::NonNegative { message: m })
            | Some(IntegerConstraint::Negative { message: m }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates `value`, returning it unchanged on success.
    pub fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        let n = match value {
            Value::Number(num) => match (num.as_i64(), num.as_u64()) {
                (Some(n), _) => n,
                (None, Some(u)) => {
                    let message = self
                        .type_error_message
                        .clone()
                        .unwrap_or_else(|| "integer value too large for i64".to_string());
                    return Validation::Failure(SchemaErrors::single(
                        SchemaError::new(path.clone(), message)
                            .with_code("overflow")
                            .with_got(u.to_string())
                            .with_expected("integer in i64 range"),
                    ));
                }
                (None, None) => {
                    let message = self
                        .type_error_message
                        .clone()
                        .unwrap_or_else(|| "expected integer, got float".to_string());
                    return Validation::Failure(SchemaErrors::single(
                        SchemaError::new(path.clone(), message)
                            .with_code(codes::INVALID_TYPE)
                            .with_got("float")
                            .with_expected("integer"),
                    ));
                }
            },
            _ => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected integer".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code(codes::INVALID_TYPE)
                        .with_got(value_type_name(value))
                        .with_expected("integer"),
                ));
            }
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_integer(c, n, path))
            .collect();

        match SchemaErrors::try_from_vec(errors) {
            None => Validation::Success(value),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl SchemaLike for IntegerSchema {
    fn type_name(&self) -> String {
        "integer".to_string()
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        self.validate(value, path)
    }
}

fn check_integer(
    constraint: &IntegerConstraint,
    value: i64,
    path: &JsonPath,
) -> Option<SchemaError> {
    let (failed, code, default_message, expected, message) = match constraint {
        IntegerConstraint::Min {
            value: min,
            message,
        } => (
            value < *min,
            "min_value",
            format!("must be at least {}, got {}", min, value),
            format!("at least {}", min),
            message,
        ),
        IntegerConstraint::Max {
            value: max,
            message,
        } => (
            value > *max,
            "max_value",
            format!("must be at most {}, got {}", max, value),
            format!("at most {}", max),
            message,
        ),
        IntegerConstraint::Positive { message } => (
            value <= 0,
            "positive",
            format!("must be positive, got {}", value),
            "value > 0".to_string(),
            message,
        ),
        IntegerConstraint::NonNegative { message } => (
            value < 0,
            "non_negative",
            format!("must be non-negative, got {}", value),
            "value >= 0".to_string(),
            message,
        ),
        IntegerConstraint::Negative { message } => (
            value >= 0,
            "negative",
            format!("must be negative, got {}", value),
            "value < 0".to_string(),
            message,
        ),
    };

    failed.then(|| {
        SchemaError::new(path.clone(), message.clone().unwrap_or(default_message))
            .with_code(code)
            .with_expected(expected)
            .with_got(value.to_string())
    })
}

/// A schema for any JSON number, integer or float.
///
/// ```rust
/// use strata::{JsonPath, Schema};
/// use serde_json::json;
///
/// let ratio = Schema::number().min(0.0).max(1.0);
/// assert!(ratio.validate(&json!(0.25), &JsonPath::root()).is_success());
/// assert!(ratio.validate(&json!(1), &JsonPath::root()).is_success());
/// assert!(ratio.validate(&json!("0.5"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone, Debug, Default)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a number schema with no bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the message used when the value is not a number.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Validates `value`, returning it unchanged on success.
    pub fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        let Some(n) = value.as_f64() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| "expected number".to_string());
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), message)
                    .with_code(codes::INVALID_TYPE)
                    .with_got(value_type_name(value))
                    .with_expected("number"),
            ));
        };

        let mut errors = Vec::new();
        if let Some(min) = self.min.filter(|min| n < *min) {
            errors.push(
                SchemaError::new(path.clone(), format!("must be at least {}, got {}", min, n))
                    .with_code("min_value")
                    .with_expected(format!("at least {}", min))
                    .with_got(n.to_string()),
            );
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            errors.push(
                SchemaError::new(path.clone(), format!("must be at most {}, got {}", max, n))
                    .with_code("max_value")
                    .with_expected(format!("at most {}", max))
                    .with_got(n.to_string()),
            );
        }

        match SchemaErrors::try_from_vec(errors) {
            None => Validation::Success(value),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl SchemaLike for NumberSchema {
    fn type_name(&self) -> String {
        "number".to_string()
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        self.validate(value, path)
    }
}
