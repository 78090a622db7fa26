//! Tests for splitting array declarations into head, rest and tail.

use rstest::rstest;
use strata::{ArrayItem, ArraySchema, DefinitionError, Schema, SchemaExt, StratifiedSchema};

fn req() -> ArrayItem {
    ArrayItem::single(Schema::string())
}

fn opt() -> ArrayItem {
    ArrayItem::single(Schema::string().optional())
}

fn rest() -> ArrayItem {
    ArrayItem::rest(Schema::integer())
}

fn spread_with_rest() -> ArrayItem {
    ArrayItem::spread(ArraySchema::of(Schema::boolean()))
}

/// `(head, has_rest, tail)`
fn shape(strata: &StratifiedSchema) -> (usize, bool, usize) {
    (strata.head().len(), strata.rest().is_some(), strata.tail().len())
}

#[rstest]
#[case::plain_list(vec![rest()], (0, true, 0))]
#[case::closed_tuple(vec![req(), req()], (2, false, 0))]
#[case::trailing_optionals(vec![req(), opt(), opt()], (3, false, 0))]
#[case::head_rest_tail(vec![req(), rest(), req()], (1, true, 1))]
#[case::optional_head_then_rest(vec![req(), opt(), rest(), req()], (2, true, 1))]
#[case::spread_supplies_rest(vec![req(), spread_with_rest(), req()], (1, true, 1))]
fn test_valid_declarations(#[case] items: Vec<ArrayItem>, #[case] expected: (usize, bool, usize)) {
    let strata = StratifiedSchema::new(&items).unwrap();
    assert_eq!(shape(&strata), expected);
}

#[rstest]
#[case::two_rests(vec![rest(), rest()], DefinitionError::RestCantFollowRest { index: 1 })]
#[case::rest_then_spread(vec![rest(), req(), spread_with_rest()], DefinitionError::RestCantFollowRest { index: 2 })]
#[case::required_after_optional(vec![opt(), req()], DefinitionError::ElementMustBeOptional { index: 1 })]
#[case::optional_in_tail(vec![req(), rest(), opt()], DefinitionError::OptionalElementCantFollowRest { index: 2 })]
fn test_invalid_declarations(#[case] items: Vec<ArrayItem>, #[case] expected: DefinitionError) {
    assert_eq!(StratifiedSchema::new(&items).unwrap_err(), expected);
}

#[test]
fn test_rejected_at_construction() {
    let result = Schema::tuple([rest(), rest()]);
    assert!(matches!(result, Err(DefinitionError::RestCantFollowRest { .. })));
}

#[test]
fn test_nested_spread_rest_counts() {
    let inner = Schema::tuple([req(), spread_with_rest()]).unwrap();
    let outer = Schema::tuple([inner.spread()]).unwrap();
    assert_eq!(shape(outer.stratified()), (1, true, 0));

    let err = Schema::tuple([inner.spread(), inner.spread()]).unwrap_err();
    assert_eq!(err, DefinitionError::RestCantFollowRest { index: 1 });
}

#[test]
fn test_spread_optional_head_into_tail_rejected() {
    let optional_pair = Schema::tuple([opt(), opt()]).unwrap();
    let err = Schema::tuple([rest(), optional_pair.spread()]).unwrap_err();
    assert_eq!(err, DefinitionError::OptionalElementCantFollowRest { index: 1 });
    assert_eq!(err.index(), Some(1));
}

#[test]
fn test_spread_keeps_bucket_order() {
    let inner = Schema::tuple([
        ArrayItem::single(Schema::integer()),
        ArrayItem::rest(Schema::boolean()),
        ArrayItem::single(Schema::number()),
    ])
    .unwrap();
    let outer = Schema::tuple([req(), inner.spread(), req()]).unwrap();
    let strata = outer.stratified();

    let head: Vec<_> = strata.head().iter().map(|s| s.type_name()).collect();
    let tail: Vec<_> = strata.tail().iter().map(|s| s.type_name()).collect();
    assert_eq!(head, vec!["string", "integer"]);
    assert_eq!(tail, vec!["number", "string"]);
}

#[test]
fn test_error_messages_name_position() {
    let err = StratifiedSchema::new(&[opt(), req()]).unwrap_err();
    assert!(err.to_string().contains("item 1"));
}
