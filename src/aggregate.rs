//! Error aggregation for composite schemas.
//!
//! A composite validates every child in one pass and hands each outcome to an
//! [`ErrorCollector`]. The collector never short-circuits: it keeps exactly one
//! entry per failing child and, when finished, produces either the untouched
//! input or a single aggregate error embedding those entries.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{codes, SchemaError, SchemaErrors};
use crate::path::JsonPath;

/// Collects per-key or per-index failures of one composite validation.
///
/// # Example
///
/// ```rust
/// use strata::{ErrorCollector, JsonPath, SchemaError};
/// use serde_json::json;
///
/// let value = json!([1, 2]);
/// let root = JsonPath::root();
/// let mut collector = ErrorCollector::new(&root);
/// collector.push(
///     SchemaError::new(root.push_index(2), "required element at index 2 is missing")
///         .with_code("missing_element"),
/// );
///
/// let errors = collector
///     .finish(&value, "invalid_elements", |n| format!("{} invalid element(s)", n))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().causes.len(), 1);
/// ```
#[derive(Debug)]
pub struct ErrorCollector {
    path: JsonPath,
    entries: Vec<SchemaError>,
}

impl ErrorCollector {
    /// Starts collecting for the composite at `path`.
    pub fn new(path: &JsonPath) -> Self {
        Self {
            path: path.clone(),
            entries: Vec::new(),
        }
    }

    /// Records a failure synthesized by the composite itself.
    pub fn push(&mut self, error: SchemaError) {
        self.entries.push(error);
    }

    /// Records the failure of the child at `child_path`.
    ///
    /// A child that reported a single error is embedded as that error. Several
    /// errors from the same child are grouped under one `nested` entry.
    pub fn push_child(&mut self, child_path: JsonPath, errors: SchemaErrors) {
        let mut errors = errors.into_vec();
        if errors.len() == 1 {
            self.entries.extend(errors.pop());
        } else {
            let message = format!("{} errors", errors.len());
            self.entries.push(
                SchemaError::new(child_path, message)
                    .with_code(codes::NESTED)
                    .with_causes(errors),
            );
        }
    }

    /// Records a child outcome; successes are ignored.
    pub fn record(&mut self, child_path: JsonPath, outcome: Validation<&Value, SchemaErrors>) {
        if let Validation::Failure(errors) = outcome {
            self.push_child(child_path, errors);
        }
    }

    /// Number of failing children so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true while no child has failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Completes the pass.
    ///
    /// Returns `value` itself when nothing failed, otherwise one aggregate
    /// error with the given `code` whose causes are the collected entries.
    pub fn finish<'v, F>(
        self,
        value: &'v Value,
        code: &str,
        message: F,
    ) -> Validation<&'v Value, SchemaErrors>
    where
        F: FnOnce(usize) -> String,
    {
        if self.entries.is_empty() {
            return Validation::Success(value);
        }

        tracing::trace!(
            path = %self.path,
            code,
            failures = self.entries.len(),
            "composite validation failed"
        );

        let count = self.entries.len();
        Validation::Failure(SchemaErrors::single(
            SchemaError::new(self.path, message(count))
                .with_code(code)
                .with_causes(self.entries),
        ))
    }
}
