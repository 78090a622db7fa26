//! String schema.
//!
//! [`StringSchema`] checks that a value is a string and applies length and
//! pattern constraints, reporting every broken constraint.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::value_type_name;

#[derive(Clone, Debug)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A schema for string values.
///
/// # Example
///
/// ```rust
/// use strata::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// // Both constraints fail and both are reported.
/// let errors = schema.validate(&json!("AB"), &JsonPath::root()).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a string schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires a match of the regex `pattern`.
    ///
    /// Fails if `pattern` does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets the message of the most recent constraint, or of the type error
    /// if no constraint has been added yet.
    ///
    /// ```rust
    /// use strata::{JsonPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(5).error("too short");
    /// let errors = schema.validate(&json!("hi"), &JsonPath::root()).into_result().unwrap_err();
    /// assert_eq!(errors.first().message, "too short");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
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
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected string".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code(codes::INVALID_TYPE)
                        .with_got(value_type_name(value))
                        .with_expected("string"),
                ));
            }
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        match SchemaErrors::try_from_vec(errors) {
            None => Validation::Success(value),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl SchemaLike for StringSchema {
    fn type_name(&self) -> String {
        "string".to_string()
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        self.validate(value, path)
    }
}

fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &JsonPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                SchemaError::new(path.clone(), msg)
                    .with_code("min_length")
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                SchemaError::new(path.clone(), msg)
                    .with_code("max_length")
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must match pattern '{}'", regex.as_str()));
            SchemaError::new(path.clone(), msg)
                .with_code("pattern")
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_got(value.to_string())
        }),
    }
}
