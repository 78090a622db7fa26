//! Errors raised while composing schemas.
//!
//! These indicate a mistake in the schema definition itself and are returned
//! immediately by the constructor or derivation that detected them, never at
//! validation time.

/// A schema could not be built from the given declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// A second rest segment was declared, directly or through a spread.
    #[error("declaration item {index}: a rest element cannot follow another rest element")]
    RestCantFollowRest {
        /// Position of the offending item in the declaration.
        index: usize,
    },

    /// A required element was declared after an optional one, before any rest.
    #[error("declaration item {index}: element must be optional because an earlier element is optional")]
    ElementMustBeOptional {
        /// Position of the offending item in the declaration.
        index: usize,
    },

    /// An optional element was declared after the rest segment.
    #[error("declaration item {index}: an optional element cannot follow a rest element")]
    OptionalElementCantFollowRest {
        /// Position of the offending item in the declaration.
        index: usize,
    },

    /// A key named in a keyed derivation is not declared by the object.
    #[error("property '{key}' is not declared by the object schema")]
    UnknownKey {
        /// The undeclared key.
        key: String,
    },

    /// A position named in an array derivation lies past the declaration.
    #[error("declaration index {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of items in the declaration.
        len: usize,
    },
}

impl DefinitionError {
    /// The declaration position this error refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            DefinitionError::RestCantFollowRest { index }
            | DefinitionError::ElementMustBeOptional { index }
            | DefinitionError::OptionalElementCantFollowRest { index }
            | DefinitionError::IndexOutOfRange { index, .. } => Some(*index),
            DefinitionError::UnknownKey { .. } => None,
        }
    }
}
