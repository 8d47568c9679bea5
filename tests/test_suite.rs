//! A small, hand-written draft-04 conformance suite, covering the core keywords
//! end to end through the public API rather than per-keyword unit tests.
use draft4_validator::JSONSchema;
use serde_json::{json, Value};
use test_case::test_case;

#[test_case(json!({"type": "integer"}), json!(1), true)]
#[test_case(json!({"type": "integer"}), json!(1.5), false)]
#[test_case(json!({"type": ["integer", "string"]}), json!("foo"), true)]
#[test_case(json!({"maximum": 10, "exclusiveMaximum": true}), json!(10), false)]
#[test_case(json!({"maximum": 10, "exclusiveMaximum": true}), json!(9), true)]
#[test_case(json!({"minimum": 1.1}), json!(1), false)]
#[test_case(json!({"multipleOf": 1.5}), json!(3), true)]
#[test_case(json!({"multipleOf": 1.5}), json!(4), false)]
#[test_case(json!({"pattern": "^a*$"}), json!("aaa"), true)]
#[test_case(json!({"pattern": "^a*$"}), json!("aaab"), false)]
#[test_case(json!({"maxLength": 2}), json!("héllo"), false)]
#[test_case(json!({"minItems": 1, "uniqueItems": true}), json!([1, 1.0]), false)]
#[test_case(json!({"properties": {"a": {"type": "integer"}}, "required": ["a"]}), json!({"a": 1}), true)]
#[test_case(json!({"properties": {"a": {"type": "integer"}}, "required": ["a"]}), json!({}), false)]
#[test_case(json!({"additionalProperties": false, "properties": {"a": {}}}), json!({"a": 1, "b": 2}), false)]
#[test_case(json!({"patternProperties": {"^a": {"type": "integer"}}}), json!({"ab": 1}), true)]
#[test_case(json!({"dependencies": {"a": ["b"]}}), json!({"a": 1}), false)]
#[test_case(json!({"dependencies": {"a": {"required": ["b"]}}}), json!({"a": 1, "b": 2}), true)]
#[test_case(json!({"items": [{"type": "integer"}], "additionalItems": false}), json!([1, 2]), false)]
#[test_case(json!({"allOf": [{"minimum": 1}, {"maximum": 10}]}), json!(5), true)]
#[test_case(json!({"anyOf": [{"type": "integer"}, {"type": "string"}]}), json!(1.5), false)]
#[test_case(json!({"oneOf": [{"minimum": 0}, {"maximum": 10}]}), json!(5), false)]
#[test_case(json!({"not": {"type": "null"}}), json!(1), true)]
#[test_case(json!({"enum": [1, "one"]}), json!(1.0), true)]
#[test_case(json!({"enum": [1, "one"]}), json!(2), false)]
fn conformance(schema: Value, instance: Value, expected_valid: bool) {
    let compiled = JSONSchema::compile(&schema).expect("a valid schema");
    assert_eq!(compiled.is_valid(&instance), expected_valid);
    assert_eq!(compiled.validate(&instance).is_ok(), expected_valid);
}

#[test]
fn ref_resolves_against_the_preregistered_draft4_meta_schema() {
    let schema = json!({"$ref": "http://json-schema.org/draft-04/schema#"});
    let compiled = JSONSchema::compile(&schema).expect("meta-schema ref should resolve by default");
    assert!(compiled.is_valid(&json!({"type": "object"})));
    assert!(!compiled.is_valid(&json!({"type": "not-a-type"})));
}

#[test]
fn invalid_schema_reports_a_schema_error() {
    let schema = json!({"required": "not-an-array"});
    let error = JSONSchema::compile(&schema).expect_err("required must be an array of strings");
    assert!(error.to_string().contains("Schema error"));
}
