//! # Strata
//!
//! Structural validation for JSON values that reports every violation in one
//! pass instead of stopping at the first.
//!
//! ## Overview
//!
//! Schemas describe objects (named properties plus a policy for undeclared
//! ones) and arrays (a fixed head, at most one variadic rest segment and a
//! fixed tail). Validating a value walks its whole declared shape and either
//! hands back the very same reference or a single aggregate error whose causes
//! name every failing key or index. Values are never copied or coerced.
//!
//! Schemas are immutable. The derived-schema algebra (`pick`, `omit`,
//! `merge`, `extend`, `partial`, `deep_partial`, `required`, `deep_required`,
//! `catch_all`, `pass_through`, `strict`) builds new schemas from existing
//! ones, rejecting impossible declarations with a [`DefinitionError`] at
//! construction time.
//!
//! ## Core Types
//!
//! - [`Schema`]: shared schema handle and factory for every schema type
//! - [`ObjectSchema`], [`ArraySchema`]: the composite engines
//! - [`SchemaError`], [`SchemaErrors`]: validation failures with their paths
//! - [`JsonPath`]: location of a value in a nested structure (e.g. `users[0].email`)
//! - [`ErrorMessages`]: configurable message templates
//!
//! ## Example
//!
//! ```rust
//! use strata::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("name", Schema::string().min_len(1))
//!     .field("tags", Schema::array(Schema::string()));
//!
//! let value = json!({"name": "", "tags": ["a", 1]});
//! let err = user.parse(&value).unwrap_err();
//!
//! // One aggregate error with one cause per failing property.
//! assert_eq!(err.errors.len(), 1);
//! assert_eq!(err.errors.first().causes.len(), 2);
//!
//! // Derived schemas leave the original untouched.
//! let patch = user.deep_partial().unwrap();
//! assert!(patch.safe_parse(&json!({})).is_success());
//! assert!(user.safe_parse(&json!({})).is_failure());
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod path;
pub mod schema;

pub use aggregate::ErrorCollector;
pub use config::ErrorMessages;
pub use error::{codes, DefinitionError, ErrorKind, ParseError, SchemaError, SchemaErrors};
pub use path::{JsonPath, PathSegment};
pub use schema::{
    AnySchema, ArrayItem, ArraySchema, BooleanSchema, IntegerSchema, NullableSchema,
    NullishSchema, NumberSchema, ObjectSchema, OptionalSchema, Schema, SchemaExt, SchemaLike,
    StratifiedSchema, StringSchema, UnmatchedProperties,
};

/// Outcome of validating a borrowed value.
pub type ValidationResult<'v> = stillwater::Validation<&'v serde_json::Value, SchemaErrors>;
