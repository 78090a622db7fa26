//! Error types.
//!
//! Validation failures ([`SchemaError`], [`SchemaErrors`], [`ParseError`]) are
//! kept apart from composition failures ([`DefinitionError`]), which are
//! raised while a schema is being built.

mod definition_error;
mod parse_error;
mod schema_error;

pub use definition_error::DefinitionError;
pub use parse_error::ParseError;
pub use schema_error::{codes, ErrorKind, SchemaError, SchemaErrors};
