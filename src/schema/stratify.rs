//! Stratification of array declarations.
//!
//! A flat declaration such as `[A, B?, ...R, Z]` is split once, at
//! construction, into a fixed head (`[A, B?]`), at most one rest segment
//! (`R`) and a fixed tail (`[Z]`). Spread items contribute their own buckets
//! inline. Declarations that cannot be split are rejected immediately.

use crate::error::DefinitionError;

use super::array::ArrayItem;
use super::Schema;

/// The head, rest and tail buckets of an array declaration.
///
/// Invariants, enforced by [`StratifiedSchema::new`]:
///
/// - there is at most one rest segment, even through nested spreads;
/// - once a head item is optional, every later head item is optional;
/// - tail items are never optional.
///
/// ```rust
/// use strata::{ArrayItem, Schema, SchemaExt, StratifiedSchema};
///
/// let strata = StratifiedSchema::new(&[
///     ArrayItem::single(Schema::string()),
///     ArrayItem::single(Schema::integer().optional()),
///     ArrayItem::rest(Schema::boolean()),
///     ArrayItem::single(Schema::string()),
/// ])
/// .unwrap();
///
/// assert_eq!(strata.head().len(), 2);
/// assert!(strata.rest().is_some());
/// assert_eq!(strata.tail().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StratifiedSchema {
    head: Vec<Schema>,
    rest: Option<Schema>,
    tail: Vec<Schema>,
}

impl StratifiedSchema {
    /// Splits `items` into buckets.
    ///
    /// Errors carry the position of the offending item in `items`; for a
    /// spread that is the position of the spread itself.
    pub fn new(items: &[ArrayItem]) -> Result<Self, DefinitionError> {
        let mut strata = Self::default();
        for (index, item) in items.iter().enumerate() {
            strata.place(item, index).inspect_err(|err| {
                tracing::debug!(index, error = %err, "array declaration rejected");
            })?;
        }
        Ok(strata)
    }

    /// Buckets of a plain variadic array.
    pub(crate) fn rest_only(item: Schema) -> Self {
        Self {
            head: Vec::new(),
            rest: Some(item),
            tail: Vec::new(),
        }
    }

    /// Positional schemas before the rest segment.
    pub fn head(&self) -> &[Schema] {
        &self.head
    }

    /// The variadic segment, if any.
    pub fn rest(&self) -> Option<&Schema> {
        self.rest.as_ref()
    }

    /// Positional schemas after the rest segment, matched against the end of
    /// the value.
    pub fn tail(&self) -> &[Schema] {
        &self.tail
    }

    /// Returns true if no rest segment exists.
    pub fn is_closed(&self) -> bool {
        self.rest.is_none()
    }

    fn place(&mut self, item: &ArrayItem, index: usize) -> Result<(), DefinitionError> {
        match item {
            ArrayItem::Single(schema) => self.place_single(schema, index),
            ArrayItem::Rest(schema) => self.place_rest(schema, index),
            ArrayItem::Spread(sub) => {
                let inner = sub.stratified();
                for schema in inner.head() {
                    self.place_single(schema, index)?;
                }
                if let Some(rest) = inner.rest() {
                    self.place_rest(rest, index)?;
                }
                for schema in inner.tail() {
                    self.place_single(schema, index)?;
                }
                Ok(())
            }
        }
    }

    fn place_single(&mut self, schema: &Schema, index: usize) -> Result<(), DefinitionError> {
        if self.rest.is_some() {
            if schema.is_optional() {
                return Err(DefinitionError::OptionalElementCantFollowRest { index });
            }
            self.tail.push(schema.clone());
            return Ok(());
        }

        let after_optional = self.head.last().is_some_and(Schema::is_optional);
        if after_optional && !schema.is_optional() {
            return Err(DefinitionError::ElementMustBeOptional { index });
        }
        self.head.push(schema.clone());
        Ok(())
    }

    fn place_rest(&mut self, schema: &Schema, index: usize) -> Result<(), DefinitionError> {
        if self.rest.is_some() {
            return Err(DefinitionError::RestCantFollowRest { index });
        }
        self.rest = Some(schema.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, SchemaExt};

    fn required() -> ArrayItem {
        ArrayItem::single(Schema::string())
    }

    fn optional() -> ArrayItem {
        ArrayItem::single(Schema::string().optional())
    }

    fn rest() -> ArrayItem {
        ArrayItem::rest(Schema::integer())
    }

    #[test]
    fn test_empty_declaration() {
        let strata = StratifiedSchema::new(&[]).unwrap();
        assert!(strata.head().is_empty());
        assert!(strata.is_closed());
        assert!(strata.tail().is_empty());
    }

    #[test]
    fn test_items_after_rest_go_to_tail() {
        let strata = StratifiedSchema::new(&[required(), rest(), required(), required()]).unwrap();
        assert_eq!(strata.head().len(), 1);
        assert_eq!(strata.tail().len(), 2);
    }

    #[test]
    fn test_optional_then_required_rejected() {
        let err = StratifiedSchema::new(&[required(), optional(), required()]).unwrap_err();
        assert_eq!(err, DefinitionError::ElementMustBeOptional { index: 2 });
    }

    #[test]
    fn test_optional_then_rest_allowed() {
        let strata = StratifiedSchema::new(&[optional(), rest()]).unwrap();
        assert_eq!(strata.head().len(), 1);
        assert!(!strata.is_closed());
    }

    #[test]
    fn test_optional_after_rest_rejected() {
        let err = StratifiedSchema::new(&[rest(), optional()]).unwrap_err();
        assert_eq!(err, DefinitionError::OptionalElementCantFollowRest { index: 1 });
    }

    #[test]
    fn test_second_rest_rejected() {
        let err = StratifiedSchema::new(&[rest(), required(), rest()]).unwrap_err();
        assert_eq!(err, DefinitionError::RestCantFollowRest { index: 2 });
    }

    #[test]
    fn test_spread_flattens_buckets() {
        let inner = ArraySchema::tuple([required(), rest(), required()]).unwrap();
        let strata = StratifiedSchema::new(&[required(), inner.spread(), required()]).unwrap();
        assert_eq!(strata.head().len(), 2);
        assert!(strata.rest().is_some());
        assert_eq!(strata.tail().len(), 2);
    }

    #[test]
    fn test_transitive_second_rest_rejected_at_spread_index() {
        let inner = ArraySchema::of(Schema::boolean());
        let err = StratifiedSchema::new(&[rest(), inner.spread()]).unwrap_err();
        assert_eq!(err, DefinitionError::RestCantFollowRest { index: 1 });
    }
}
