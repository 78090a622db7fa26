//! Tests for optional, nullable and nullish members.

use rstest::rstest;
use serde_json::{json, Value};
use strata::{codes, Schema, SchemaExt, SchemaLike};

#[rstest]
#[case::optional(Schema::string().optional(), true, false)]
#[case::nullable(Schema::string().nullable(), false, true)]
#[case::nullish(Schema::string().nullish(), true, true)]
#[case::plain(Schema::string().into_schema(), false, false)]
fn test_absent_and_null(#[case] member: Schema, #[case] absent_ok: bool, #[case] null_ok: bool) {
    let schema = Schema::object().field("v", member);
    assert_eq!(schema.safe_parse(&json!({})).is_success(), absent_ok);
    assert_eq!(schema.safe_parse(&json!({"v": null})).is_success(), null_ok);
    assert!(schema.safe_parse(&json!({"v": "x"})).is_success());
}

#[rstest]
#[case(Schema::string().optional(), "string?")]
#[case(Schema::string().nullable(), "string | null")]
#[case(Schema::string().nullish(), "(string | null)?")]
#[case(Schema::string().optional().nullable(), "string? | null")]
fn test_type_names(#[case] schema: Schema, #[case] expected: &str) {
    assert_eq!(schema.type_name(), expected);
}

#[test]
fn test_optional_is_idempotent() {
    let once = Schema::integer().optional();
    let twice = once.optional();
    assert!(once.ptr_eq(&twice));
    assert_eq!(twice.type_name(), "integer?");
}

#[test]
fn test_required_undoes_optional() {
    let base = Schema::integer().positive().into_schema();
    assert!(base.optional().required().ptr_eq(&base));
    assert!(base.required().ptr_eq(&base));
}

#[test]
fn test_nullish_of_optional_collapses() {
    let schema = Schema::string().optional().nullish();
    assert_eq!(schema.type_name(), "(string | null)?");
    assert_eq!(schema.required().type_name(), "string | null");
}

#[test]
fn test_wrappers_delegate_validation_errors() {
    let schema = Schema::integer().positive().nullable();
    let errors = schema.safe_parse(&json!(-1)).into_result().unwrap_err();
    assert_eq!(errors.first().code, "positive");

    let errors = Schema::integer()
        .optional()
        .safe_parse(&json!(null))
        .into_result()
        .unwrap_err();
    assert_eq!(errors.first().code, codes::INVALID_TYPE);
}

#[test]
fn test_missing_optional_element_vs_null() {
    let schema = Schema::tuple([
        Schema::string().into_schema(),
        Schema::integer().nullish(),
    ])
    .unwrap();
    for value in [json!(["a"]), json!(["a", null]), json!(["a", 1])] {
        assert!(schema.safe_parse(&value).is_success(), "{}", value);
    }
}

#[rstest]
#[case(json!(null))]
#[case(json!("x"))]
fn test_nullable_returns_same_reference(#[case] value: Value) {
    let schema = Schema::string().nullable();
    let out = schema.parse(&value).unwrap();
    assert!(std::ptr::eq(out, &value));
}
