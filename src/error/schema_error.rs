//! Validation failure types.
//!
//! A [`SchemaError`] describes one failing member. Composite schemas report a
//! single aggregate error whose `causes` embed the failing children, so the
//! full provenance (which key, which index, how deep) survives aggregation.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// Error codes produced by the composite schemas.
///
/// Leaf schemas use their own codes (`min_length`, `positive`, ...), which
/// classify as [`ErrorKind::Constraint`].
pub mod codes {
    /// The value is not of the expected JSON kind.
    pub const INVALID_TYPE: &str = "invalid_type";
    /// A required object property is absent.
    pub const MISSING_PROPERTY: &str = "missing_property";
    /// A required array element is absent.
    pub const MISSING_ELEMENT: &str = "missing_element";
    /// An undeclared property was rejected by a strict object.
    pub const EXTRA_PROPERTY: &str = "extra_property";
    /// A closed tuple received more elements than it declares.
    pub const EXTRA_ITEM: &str = "extra_item";
    /// Aggregate of an object's failing properties.
    pub const INVALID_PROPERTIES: &str = "invalid_properties";
    /// Aggregate of an array's failing elements.
    pub const INVALID_ELEMENTS: &str = "invalid_elements";
    /// Groups several errors reported by one child.
    pub const NESTED: &str = "nested";
}

/// Coarse classification of an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong top-level kind (not an object, not an array, ...).
    Structural,
    /// A required member is absent.
    Missing,
    /// A member is present that the schema does not allow.
    Extra,
    /// Wraps the errors of one or more children.
    Nested,
    /// A leaf constraint failed.
    Constraint,
}

impl ErrorKind {
    /// Classifies an error code.
    pub fn of(code: &str) -> Self {
        match code {
            codes::INVALID_TYPE => ErrorKind::Structural,
            codes::MISSING_PROPERTY | codes::MISSING_ELEMENT => ErrorKind::Missing,
            codes::EXTRA_PROPERTY | codes::EXTRA_ITEM => ErrorKind::Extra,
            codes::INVALID_PROPERTIES | codes::INVALID_ELEMENTS | codes::NESTED => {
                ErrorKind::Nested
            }
            _ => ErrorKind::Constraint,
        }
    }
}

/// A single validation failure.
///
/// - **path**: where the failure occurred
/// - **message**: human-readable description
/// - **got** / **expected**: optional detail
/// - **code**: machine-readable identifier (see [`codes`])
/// - **causes**: child failures embedded by value, for aggregate errors
///
/// # Example
///
/// ```rust
/// use strata::{ErrorKind, JsonPath, SchemaError};
///
/// let error = SchemaError::new(JsonPath::root().push_field("email"), "expected string")
///     .with_code("invalid_type")
///     .with_got("number")
///     .with_expected("string");
///
/// assert_eq!(error.kind(), ErrorKind::Structural);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// The path to the value that failed validation.
    pub path: JsonPath,
    /// Human-readable error message.
    pub message: String,
    /// The value that was received, formatted.
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code.
    pub code: String,
    /// Embedded child failures, in the order they were found.
    pub causes: Vec<SchemaError>,
}

impl SchemaError {
    /// Creates an error with the default code `validation_error`.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
            causes: Vec::new(),
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" detail.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" detail.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Attaches embedded child failures.
    pub fn with_causes(mut self, causes: Vec<SchemaError>) -> Self {
        self.causes = causes;
        self
    }

    /// Taxonomy of this error's code.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::of(&self.code)
    }

    /// Returns true if this error embeds child failures.
    pub fn has_causes(&self) -> bool {
        !self.causes.is_empty()
    }

    /// This error on one line, with any embedded causes rendered in
    /// brackets after it.
    ///
    /// ```rust
    /// use strata::{JsonPath, SchemaError};
    ///
    /// let tags = JsonPath::from_field("tags");
    /// let error = SchemaError::new(tags.clone(), "1 invalid element(s)").with_causes(vec![
    ///     SchemaError::new(tags.push_index(1), "expected string"),
    /// ]);
    /// assert_eq!(
    ///     error.summary(),
    ///     "tags: 1 invalid element(s) [tags[1]: expected string]"
    /// );
    /// ```
    pub fn summary(&self) -> String {
        if self.causes.is_empty() {
            return self.to_string();
        }
        let causes: Vec<String> = self.causes.iter().map(SchemaError::summary).collect();
        format!("{} [{}]", self, causes.join("; "))
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a SchemaError>) {
        if self.causes.is_empty() {
            out.push(self);
        } else {
            for cause in &self.causes {
                cause.collect_leaves(out);
            }
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for cause in &self.causes {
            writeln!(f, "{:indent$}- {}", "", cause, indent = depth * 2)?;
            cause.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty, ordered collection of validation failures.
///
/// Composite schemas return exactly one aggregate entry; leaf schemas may
/// return several (one per broken constraint).
///
/// ```rust
/// use strata::{JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let a = SchemaErrors::single(SchemaError::new(JsonPath::from_field("a"), "missing"));
/// let b = SchemaErrors::single(SchemaError::new(JsonPath::from_field("b"), "missing"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// A collection holding one error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps an existing `NonEmptyVec`.
    pub fn from_non_empty(errors: NonEmptyVec<SchemaError>) -> Self {
        Self(errors)
    }

    /// Builds a collection from a vec, or `None` if the vec is empty.
    pub fn try_from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Top-level entries at `path`.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Top-level entries with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// The first entry.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Every error without causes, depth-first, in report order.
    ///
    /// Aggregates are walked through; grouped leaf errors are returned
    /// individually with their own paths.
    pub fn leaves(&self) -> Vec<&SchemaError> {
        let mut out = Vec::new();
        for error in self.0.iter() {
            error.collect_leaves(&mut out);
        }
        out
    }

    /// One formatted line per failing child.
    ///
    /// An aggregate entry contributes one line per cause, each with its own
    /// nested detail embedded (see [`SchemaError::summary`]). Leaf and
    /// structural entries contribute one line each.
    pub fn messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|error| {
                if error.has_causes() {
                    error.causes.iter().map(SchemaError::summary).collect()
                } else {
                    vec![error.summary()]
                }
            })
            .collect()
    }

    /// Converts into a plain vec of top-level entries.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// The underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<SchemaError> {
        &self.0
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
            error.write_tree(f, 2)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a SchemaError;
    type IntoIter = Box<dyn Iterator<Item = &'a SchemaError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate() -> SchemaError {
        let root = JsonPath::root();
        SchemaError::new(root.clone(), "object has 2 invalid properties")
            .with_code(codes::INVALID_PROPERTIES)
            .with_causes(vec![
                SchemaError::new(root.push_field("name"), "required property 'name' is missing")
                    .with_code(codes::MISSING_PROPERTY),
                SchemaError::new(root.push_field("tags"), "array has 1 invalid elements")
                    .with_code(codes::INVALID_ELEMENTS)
                    .with_causes(vec![SchemaError::new(
                        root.push_field("tags").push_index(1),
                        "expected string",
                    )
                    .with_code(codes::INVALID_TYPE)]),
            ])
    }

    #[test]
    fn test_schema_error_defaults() {
        let error = SchemaError::new(JsonPath::from_field("name"), "bad");
        assert_eq!(error.code, "validation_error");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
        assert!(!error.has_causes());
        assert_eq!(error.kind(), ErrorKind::Constraint);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(ErrorKind::of(codes::INVALID_TYPE), ErrorKind::Structural);
        assert_eq!(ErrorKind::of(codes::MISSING_ELEMENT), ErrorKind::Missing);
        assert_eq!(ErrorKind::of(codes::EXTRA_ITEM), ErrorKind::Extra);
        assert_eq!(ErrorKind::of(codes::INVALID_ELEMENTS), ErrorKind::Nested);
        assert_eq!(ErrorKind::of(codes::NESTED), ErrorKind::Nested);
        assert_eq!(ErrorKind::of("min_length"), ErrorKind::Constraint);
    }

    #[test]
    fn test_display_root() {
        let error = SchemaError::new(JsonPath::root(), "expected object")
            .with_expected("object")
            .with_got("null");
        assert_eq!(
            error.to_string(),
            "(root): expected object (expected: object) (got: null)"
        );
    }

    #[test]
    fn test_leaves_walk_through_aggregates() {
        let errors = SchemaErrors::single(aggregate());
        let leaves: Vec<_> = errors.leaves().iter().map(|e| e.path.to_string()).collect();
        assert_eq!(leaves, vec!["name", "tags[1]"]);
    }

    #[test]
    fn test_display_renders_causes_indented() {
        let display = SchemaErrors::single(aggregate()).to_string();
        assert!(display.contains("1 error(s)"));
        assert!(display.contains("    - name: required property 'name' is missing"));
        assert!(display.contains("      - tags[1]: expected string"));
    }

    #[test]
    fn test_try_from_vec() {
        assert!(SchemaErrors::try_from_vec(Vec::new()).is_none());
        let errors =
            SchemaErrors::try_from_vec(vec![SchemaError::new(JsonPath::root(), "x")]).unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_combine_preserves_order() {
        let e1 = SchemaErrors::single(SchemaError::new(JsonPath::root(), "1"));
        let e2 = SchemaErrors::single(SchemaError::new(JsonPath::root(), "2"));
        let e3 = SchemaErrors::single(SchemaError::new(JsonPath::root(), "3"));

        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        let right = e1.combine(e2.combine(e3));
        let left_msgs: Vec<_> = left.iter().map(|e| e.message.clone()).collect();
        let right_msgs: Vec<_> = right.iter().map(|e| e.message.clone()).collect();
        assert_eq!(left_msgs, vec!["1", "2", "3"]);
        assert_eq!(left_msgs, right_msgs);
    }

    #[test]
    fn test_messages_one_line_per_failing_child() {
        let errors = SchemaErrors::single(aggregate());
        assert_eq!(
            errors.messages(),
            vec![
                "name: required property 'name' is missing".to_string(),
                "tags: array has 1 invalid elements [tags[1]: expected string]".to_string(),
            ]
        );
    }

    #[test]
    fn test_messages_for_leaf_entries() {
        let errors = SchemaErrors::single(SchemaError::new(JsonPath::root(), "expected object"))
            .combine(SchemaErrors::single(SchemaError::new(
                JsonPath::from_field("a"),
                "too short",
            )));
        assert_eq!(
            errors.messages(),
            vec!["(root): expected object".to_string(), "a: too short".to_string()]
        );
    }
}
