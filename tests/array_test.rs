//! Integration tests for array schema validation.

use rstest::rstest;
use serde_json::{json, Value};
use strata::{codes, ArrayItem, ArraySchema, ErrorMessages, JsonPath, Schema, SchemaExt, SchemaLike};
use std::sync::Arc;

/// Helper to extract the success value from a Validation
fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

/// Helper to extract the error value from a Validation
fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

/// `(path, code)` for each entry of the aggregate error.
fn entries(errors: &strata::SchemaErrors) -> Vec<(String, String)> {
    errors
        .first()
        .causes
        .iter()
        .map(|e| (e.path.to_string(), e.code.clone()))
        .collect()
}

/// `[string, integer, ...boolean, number]`
fn head_rest_tail() -> ArraySchema {
    Schema::tuple([
        ArrayItem::single(Schema::string()),
        ArrayItem::single(Schema::integer()),
        ArrayItem::rest(Schema::boolean()),
        ArrayItem::single(Schema::number()),
    ])
    .unwrap()
}

#[test]
fn test_array_of_strings() {
    let schema = Schema::array(Schema::string().min_len(1));
    let value = json!(["hello", "world"]);
    let out = unwrap_success(schema.safe_parse(&value));
    assert!(std::ptr::eq(out, &value));
}

#[test]
fn test_every_bad_element_reported() {
    let schema = Schema::array(Schema::integer().positive());
    let errors = unwrap_failure(schema.safe_parse(&json!([1, -2, 3, 0, "x"])));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, codes::INVALID_ELEMENTS);
    assert_eq!(errors.first().message, "3 invalid element(s)");
    assert_eq!(
        entries(&errors),
        vec![
            ("[1]".to_string(), "positive".to_string()),
            ("[3]".to_string(), "positive".to_string()),
            ("[4]".to_string(), codes::INVALID_TYPE.to_string()),
        ]
    );
}

#[rstest]
#[case(json!({}))]
#[case(json!("[]"))]
#[case(json!(null))]
fn test_structural_error(#[case] value: Value) {
    let errors = unwrap_failure(head_rest_tail().safe_parse(&value));
    assert_eq!(errors.first().code, codes::INVALID_TYPE);
    assert_eq!(errors.first().expected.as_deref(), Some("array"));
    assert!(errors.first().causes.is_empty());
}

#[test]
fn test_empty_rest_sweep() {
    let value = json!(["a", 1, 2.5]);
    assert!(head_rest_tail().safe_parse(&value).is_success());
}

#[test]
fn test_rest_elements_validated() {
    assert!(head_rest_tail()
        .safe_parse(&json!(["a", 1, true, false, 2.5]))
        .is_success());

    let errors = unwrap_failure(head_rest_tail().safe_parse(&json!(["a", 1, true, "no", 2.5])));
    assert_eq!(
        entries(&errors),
        vec![("[3]".to_string(), codes::INVALID_TYPE.to_string())]
    );
}

#[test]
fn test_tail_aligned_to_end() {
    // The last element is checked against the tail, never the rest.
    let errors = unwrap_failure(head_rest_tail().safe_parse(&json!(["a", 1, true, true])));
    assert_eq!(
        entries(&errors),
        vec![("[3]".to_string(), codes::INVALID_TYPE.to_string())]
    );
    assert_eq!(errors.first().causes[0].expected.as_deref(), Some("number"));
}

#[rstest]
#[case::empty(json!([]), vec![0, 1, 2])]
#[case::one(json!(["a"]), vec![1, 2])]
#[case::two(json!(["a", 1]), vec![2])]
fn test_shortfall_synthesizes_each_missing_slot(#[case] value: Value, #[case] missing: Vec<usize>) {
    let errors = unwrap_failure(head_rest_tail().safe_parse(&value));
    let expected: Vec<_> = missing
        .iter()
        .map(|i| (format!("[{}]", i), codes::MISSING_ELEMENT.to_string()))
        .collect();
    assert_eq!(entries(&errors), expected);
}

#[test]
fn test_shortfall_still_checks_present_head() {
    let errors = unwrap_failure(head_rest_tail().safe_parse(&json!([7])));
    assert_eq!(
        entries(&errors),
        vec![
            ("[0]".to_string(), codes::INVALID_TYPE.to_string()),
            ("[1]".to_string(), codes::MISSING_ELEMENT.to_string()),
            ("[2]".to_string(), codes::MISSING_ELEMENT.to_string()),
        ]
    );
}

#[test]
fn test_closed_tuple_extra_items() {
    let schema = Schema::tuple([Schema::string(), Schema::string()]).unwrap();
    assert!(schema.safe_parse(&json!(["a", "b"])).is_success());

    let errors = unwrap_failure(schema.safe_parse(&json!(["a", "b", 1, null, "c"])));
    let codes_seen: Vec<_> = errors.first().causes.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes_seen, vec![codes::EXTRA_ITEM; 3]);
    assert_eq!(errors.first().causes[0].message, "unexpected element at index 2");
    assert_eq!(errors.first().causes[1].got.as_deref(), Some("null"));
}

#[test]
fn test_closed_tuple_missing_required() {
    let schema = Schema::tuple([Schema::string().into_schema(), Schema::integer().into_schema()]).unwrap();
    let errors = unwrap_failure(schema.safe_parse(&json!(["a"])));
    assert_eq!(
        entries(&errors),
        vec![("[1]".to_string(), codes::MISSING_ELEMENT.to_string())]
    );
    assert_eq!(
        errors.first().causes[0].message,
        "required element at index 1 is missing"
    );
}

#[test]
fn test_optional_trailing_elements() {
    let schema = Schema::tuple([
        Schema::string().into_schema(),
        Schema::integer().optional(),
        Schema::boolean().optional(),
    ])
    .unwrap();

    assert!(schema.safe_parse(&json!(["a"])).is_success());
    assert!(schema.safe_parse(&json!(["a", 1])).is_success());
    assert!(schema.safe_parse(&json!(["a", 1, false])).is_success());
    assert!(schema.safe_parse(&json!(["a", null])).is_failure());
}

#[test]
fn test_optional_head_before_rest() {
    let schema = Schema::tuple([
        ArrayItem::single(Schema::string().optional()),
        ArrayItem::rest(Schema::integer()),
    ])
    .unwrap();
    assert!(schema.safe_parse(&json!([])).is_success());
    assert!(schema.safe_parse(&json!(["a", 1, 2])).is_success());
    assert!(schema.safe_parse(&json!([1, 2])).is_failure());
}

#[test]
fn test_spread_validates_inline() {
    let pair = Schema::tuple([Schema::integer(), Schema::integer()]).unwrap();
    let schema = Schema::tuple([
        ArrayItem::single(Schema::string()),
        pair.spread(),
        ArrayItem::rest(Schema::boolean()),
    ])
    .unwrap();

    assert!(schema.safe_parse(&json!(["p", 1, 2])).is_success());
    assert!(schema.safe_parse(&json!(["p", 1, 2, true, false])).is_success());
    let errors = unwrap_failure(schema.safe_parse(&json!(["p", 1, "2"])));
    assert_eq!(
        entries(&errors),
        vec![("[2]".to_string(), codes::INVALID_TYPE.to_string())]
    );
}

#[test]
fn test_nested_array_errors_embedded() {
    let schema = Schema::array(Schema::array(Schema::integer()));
    let errors = unwrap_failure(schema.safe_parse(&json!([[1], [2, "a", "b"]])));

    let outer = errors.first();
    assert_eq!(outer.causes.len(), 1);
    let inner = &outer.causes[0];
    assert_eq!(inner.path.to_string(), "[1]");
    assert_eq!(inner.code, codes::INVALID_ELEMENTS);
    assert_eq!(inner.causes.len(), 2);
}

#[test]
fn test_custom_messages() {
    let messages = Arc::new(
        ErrorMessages::default()
            .with_expected_array("liste erwartet")
            .with_missing_element("element {index} fehlt"),
    );
    let schema = Schema::tuple([Schema::string()])
        .unwrap()
        .with_messages(messages);

    let errors = unwrap_failure(schema.safe_parse(&json!(1)));
    assert_eq!(errors.first().message, "liste erwartet");
    let errors = unwrap_failure(schema.safe_parse(&json!([])));
    assert_eq!(errors.first().causes[0].message, "element 0 fehlt");

    let explicit = schema.error("explicit");
    let errors = unwrap_failure(explicit.safe_parse(&json!(1)));
    assert_eq!(errors.first().message, "explicit");
}

#[test]
fn test_introspection() {
    let schema = head_rest_tail();
    assert_eq!(schema.declaration().len(), 4);
    let strata = schema.stratified();
    assert_eq!(strata.head().len(), 2);
    assert_eq!(strata.rest().map(|r| r.type_name()), Some("boolean".to_string()));
    assert_eq!(strata.tail().len(), 1);
    assert_eq!(schema.type_name(), "[string, integer, ...boolean, number]");

    let handle = schema.clone().into_schema();
    assert!(handle.as_array().is_some());
    assert!(handle.as_object().is_none());
}
