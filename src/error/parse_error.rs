//! The error returned by `parse`.

use serde_json::Value;

use super::SchemaErrors;

/// The `{input, errors}` report for a value that failed validation.
///
/// `input` is a snapshot of the rejected value; `errors` holds every failure
/// found in the single validation pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{errors}")]
pub struct ParseError {
    /// The value that was rejected.
    pub input: Value,
    /// All failures found while validating `input`.
    pub errors: SchemaErrors,
}

impl ParseError {
    /// Creates a report for `input`.
    pub fn new(input: Value, errors: SchemaErrors) -> Self {
        Self { input, errors }
    }

    /// One formatted line per failing key or index, each embedding that
    /// child's own detail.
    ///
    /// ```rust
    /// use strata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string())
    ///     .field("age", Schema::integer());
    ///
    /// let err = schema.parse(&json!({"age": "x", "extra": 1})).unwrap_err();
    /// let lines = err.messages();
    /// assert_eq!(lines.len(), 3);
    /// assert!(lines[0].starts_with("name: required property 'name' is missing"));
    /// assert!(lines[1].starts_with("age: expected integer"));
    /// assert!(lines[2].starts_with("extra: unknown property 'extra'"));
    /// ```
    pub fn messages(&self) -> Vec<String> {
        self.errors.messages()
    }
}
