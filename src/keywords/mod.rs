pub(crate) mod additional_items;
pub(crate) mod additional_properties;
pub(crate) mod all_of;
pub(crate) mod any_of;
pub(crate) mod boolean;
pub(crate) mod dependencies;
pub(crate) mod enum_;
pub(crate) mod helpers;
pub(crate) mod items;
pub(crate) mod legacy;
pub(crate) mod max_items;
pub(crate) mod max_length;
pub(crate) mod max_properties;
pub(crate) mod maximum;
pub(crate) mod min_items;
pub(crate) mod min_length;
pub(crate) mod min_properties;
pub(crate) mod minimum;
pub(crate) mod multiple_of;
pub(crate) mod not;
pub(crate) mod one_of;
pub(crate) mod pattern;
pub(crate) mod pattern_properties;
pub(crate) mod properties;
pub(crate) mod ref_;
pub(crate) mod required;
pub(crate) mod unique_items;

use crate::error;

pub(crate) type CompilationResult<'a> = Result<crate::validator::BoxedValidator, error::ValidationError<'a>>;
pub(crate) use crate::validator::{format_key_value_validators, format_validators, format_vec_of_validators};

#[cfg(test)]
mod tests {
    use crate::compilation::JSONSchema;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"additionalItems": false, "items": [{"type": "string"}]}), "additionalItems: false")]
    #[test_case(&json!({"additionalItems": {"type": "integer"}, "items": [{"type": "string"}]}), "additionalItems: {type: integer}")]
    #[test_case(&json!({"additionalProperties": {"type": "string"}}), "additionalProperties: {type: string}")]
    #[test_case(&json!({"additionalProperties": false}), "additionalProperties: false")]
    #[test_case(&json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}), "allOf: [{type: integer}, {minimum: 2}]")]
    #[test_case(&json!({"anyOf": [{"type": "integer"}, {"minimum": 2}]}), "anyOf: [{type: integer}, {minimum: 2}]")]
    #[test_case(&json!(false), "false")]
    #[test_case(&json!({"dependencies": {"bar": ["foo"]}}), "dependencies: {bar: {required: [foo]}}")]
    #[test_case(&json!({"enum": [1]}), "enum: [1]")]
    #[test_case(&json!({"exclusiveMaximum": true, "maximum": 1}), "{exclusiveMaximum: 1, maximum: 1}")]
    #[test_case(&json!({"items": [{"type": "string"}]}), "items: [{type: string}]")]
    #[test_case(&json!({"items": {"type": "integer"}}), "items: {type: integer}")]
    #[test_case(&json!({"maxItems": 1}), "maxItems: 1")]
    #[test_case(&json!({"maxLength": 1}), "maxLength: 1")]
    #[test_case(&json!({"maxProperties": 1}), "maxProperties: 1")]
    #[test_case(&json!({"maximum": 1}), "maximum: 1")]
    #[test_case(&json!({"minItems": 1}), "minItems: 1")]
    #[test_case(&json!({"minLength": 1}), "minLength: 1")]
    #[test_case(&json!({"minProperties": 1}), "minProperties: 1")]
    #[test_case(&json!({"minimum": 1}), "minimum: 1")]
    #[test_case(&json!({"multipleOf": 1}), "multipleOf: 1")]
    #[test_case(&json!({"multipleOf": 1.5}), "multipleOf: 1.5")]
    #[test_case(&json!({"not": true}), "not: {}")]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), "oneOf: [{type: integer}, {minimum: 2}]")]
    #[test_case(&json!({"pattern": "^a*$"}), "pattern: ^a*$")]
    #[test_case(&json!({"patternProperties": {"f.*o": {"type": "integer"}}}), "patternProperties: {f.*o: {type: integer}}")]
    #[test_case(&json!({"properties": {"foo": {}}}), "properties: {foo: {}}")]
    #[test_case(&json!({"required": ["foo"]}), "required: [foo]")]
    #[test_case(&json!({"type": "null"}), "type: null")]
    #[test_case(&json!({"type": "integer"}), "type: integer")]
    #[test_case(&json!({"type": ["integer", "null"]}), "type: [integer, null]")]
    #[test_case(&json!({"uniqueItems": true}), "uniqueItems: true")]
    fn debug_representation(schema: &Value, expected: &str) {
        let compiled = JSONSchema::compile(schema).unwrap();
        assert_eq!(format!("{:?}", compiled.node.validators()[0]), expected);
    }

    #[test_case(&json!({"items": [{}], "additionalItems": {"type": "integer"}}), &json!([ null, 2, 3, "foo" ]), r#"'"foo"' is not of type 'integer'"#)]
    #[test_case(&json!({"items": [{}, {}, {}], "additionalItems": false}), &json!([ 1, 2, 3, 4 ]), r#"Additional items are not allowed (4 was unexpected)"#)]
    #[test_case(&json!({"items": [{}, {}, {}], "additionalItems": false}), &json!([ 1, 2, 3, 4, 5 ]), r#"Additional items are not allowed (4, 5 were unexpected)"#)]
    #[test_case(&json!({"properties": {"foo": {}, "bar": {}}, "patternProperties": { "^v": {} }, "additionalProperties": false}), &json!({"foo" : 1, "bar" : 2, "quux" : "boom"}), r#"Additional property 'quux' is not allowed"#)]
    #[test_case(&json!({"anyOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1.5), r#"'1.5' is not valid under any of the given schemas"#)]
    #[test_case(&json!({"enum": [1, 2, 3]}), &json!(4), r#"'4' is not one of '[1,2,3]'"#)]
    #[test_case(&json!({"exclusiveMaximum": true, "maximum": 3.0}), &json!(3.0), r#"3.0 is greater than or equal to the maximum of 3"#)]
    #[test_case(&json!({"exclusiveMinimum": true, "minimum": 1.1}), &json!(1.1), r#"1.1 is less than or equal to the minimum of 1.1"#)]
    #[test_case(&json!({"maximum": 3.0}), &json!(3.5), r#"3.5 is greater than the maximum of 3"#)]
    #[test_case(&json!({"maxItems": 2}), &json!([1, 2, 3]), r#"[1,2,3] has more than 2 items"#)]
    #[test_case(&json!({"maxLength": 2}), &json!("foo"), r#"'"foo"' is longer than 2 characters"#)]
    #[test_case(&json!({"maxProperties": 2}), &json!({"bar": 1, "baz": 2, "foo": 3}), r#"{"bar":1,"baz":2,"foo":3} has more than 2 properties"#)]
    #[test_case(&json!({"minimum": 1.1}), &json!(0.6), r#"0.6 is less than the minimum of 1.1"#)]
    #[test_case(&json!({"minItems": 1}), &json!([]), r#"[] has less than 1 item"#)]
    #[test_case(&json!({"minLength": 2}), &json!("f"), r#"'"f"' is shorter than 2 characters"#)]
    #[test_case(&json!({"minProperties": 1}), &json!({}), r#"{} has less than 1 property"#)]
    #[test_case(&json!({"multipleOf": 2}), &json!(7), r#"7 is not a multiple of 2"#)]
    #[test_case(&json!({"not": {"type": "integer"}}), &json!(1), r#"{"type":"integer"} is not allowed for 1"#)]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1.1), r#"'1.1' is not valid under any of the given schemas"#)]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(3), r#"'3' is valid under more than one of the given schemas (matched: 0, 1)"#)]
    #[test_case(&json!({"pattern": "^a*$"}), &json!("abc"), r#"'"abc"' does not match '^a*$'"#)]
    #[test_case(&json!({"properties": {"foo": {}, "bar": {}}, "required": ["foo"]}), &json!({"bar": 1}), r#"'foo' is a required property"#)]
    #[test_case(&json!({"type": "integer"}), &json!(1.1), r#"'1.1' is not of type 'integer'"#)]
    #[test_case(&json!({"type": ["integer", "string"]}), &json!(null), r#"'null' is not of types 'integer', 'string'"#)]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1]), r#"'[1,1]' has non-unique elements"#)]
    fn error_message(schema: &Value, instance: &Value, expected: &str) {
        let compiled = JSONSchema::compile(schema).unwrap();
        let errors: Vec<_> = compiled
            .validate(instance)
            .unwrap_err()
            .collect();
        assert_eq!(errors[0].to_string(), expected);
    }

    // Extra cases not covered by JSON test suite
    #[test_case(&json!({"additionalProperties": {"type": "string"}}))]
    #[test_case(&json!({"additionalProperties": false}))]
    #[test_case(&json!({"additionalItems": false, "items": [{"type": "string"}]}))]
    #[test_case(&json!({"additionalItems": {"type": "integer"}, "items": [{"type": "string"}]}))]
    #[test_case(&json!({"dependencies": {"bar": ["foo"]}}))]
    #[test_case(&json!({"exclusiveMaximum": true, "maximum": 5}))]
    #[test_case(&json!({"exclusiveMinimum": true, "minimum": 5}))]
    #[test_case(&json!({"maximum": 2}))]
    #[test_case(&json!({"maxItems": 2}))]
    #[test_case(&json!({"maxProperties": 2}))]
    #[test_case(&json!({"minProperties": 2}))]
    #[test_case(&json!({"multipleOf": 2.5}))]
    #[test_case(&json!({"multipleOf": 2}))]
    #[test_case(&json!({"required": ["a"]}))]
    #[test_case(&json!({"pattern": "^a"}))]
    #[test_case(&json!({"patternProperties": {"f.*o": {"type": "integer"}}}))]
    fn is_valid_another_type(schema: &Value) {
        let instance = json!(null);
        let compiled = JSONSchema::compile(schema).unwrap();
        assert!(compiled.is_valid(&instance))
    }

    #[test_case(&json!({"additionalProperties": false}), &json!({}))]
    #[test_case(&json!({"additionalItems": false, "items": true}), &json!([]))]
    fn is_valid(schema: &Value, instance: &Value) {
        let compiled = JSONSchema::compile(schema).unwrap();
        assert!(compiled.is_valid(instance))
    }

    #[test_case(&json!({"type": "number"}), &json!(42))]
    #[test_case(&json!({"type": ["number", "null"]}), &json!(42))]
    fn integer_is_valid_number_multi_type(schema: &Value, instance: &Value) {
        let compiled = JSONSchema::compile(schema).unwrap();
        assert!(compiled.is_valid(instance))
    }

    // enum: Number
    #[test_case(&json!({"enum": [0.0]}), &json!(0))]
    // enum: Array
    #[test_case(&json!({"enum": [[1.0]]}), &json!([1]))]
    // enum: Object
    #[test_case(&json!({"enum": [{"a": 1.0}]}), &json!({"a": 1}))]
    fn numeric_equivalence(schema: &Value, instance: &Value) {
        let compiled = JSONSchema::compile(schema).unwrap();
        assert!(compiled.is_valid(instance))
    }

    #[test]
    fn required_all_properties() {
        let schema = json!({"required": ["foo", "bar"]});
        let instance = json!({});
        let compiled = JSONSchema::compile(&schema).unwrap();
        let errors: Vec<_> = compiled
            .validate(&instance)
            .expect_err("Validation errors")
            .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), r#"'foo' is a required property"#);
        assert_eq!(errors[1].to_string(), r#"'bar' is a required property"#);
    }
}
