use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    schema_node::SchemaNode,
    validator::Validate,
};
use serde_json::{Map, Value};

pub(crate) struct OneOfValidator {
    schemas: Vec<SchemaNode>,
    schema_path: JSONPointer,
}

impl OneOfValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, context: &CompilationContext) -> CompilationResult<'a> {
        if let Value::Array(items) = schema {
            let keyword_context = context.with_path("oneOf");
            let mut schemas = Vec::with_capacity(items.len());
            for item in items {
                schemas.push(compile_validators(item, &keyword_context)?);
            }
            Ok(Box::new(OneOfValidator {
                schemas,
                schema_path: keyword_context.into_pointer(),
            }))
        } else {
            Err(CompilationError::new(context.schema_path().clone(), "oneOf must be an array").into())
        }
    }

    fn get_first_valid(&self, instance: &Value) -> Option<usize> {
        self.schemas.iter().position(|node| node.is_valid(instance))
    }

    #[allow(clippy::integer_arithmetic)]
    fn are_others_valid(&self, instance: &Value, idx: usize) -> bool {
        self.schemas.iter().skip(idx + 1).any(|node| node.is_valid(instance))
    }
}

impl Validate for OneOfValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        self.get_first_valid(instance)
            .map_or(false, |idx| !self.are_others_valid(instance, idx))
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Some(idx) = self.get_first_valid(instance) {
            if self.are_others_valid(instance, idx) {
                let matched: Vec<usize> = self
                    .schemas
                    .iter()
                    .enumerate()
                    .filter(|(_, node)| node.is_valid(instance))
                    .map(|(i, _)| i)
                    .collect();
                return error(ValidationError::one_of_multiple_valid(
                    instance_path.into(),
                    self.schema_path.clone(),
                    instance,
                    matched,
                ));
            }
            no_error()
        } else {
            error(ValidationError::one_of_not_valid(
                instance_path.into(),
                self.schema_path.clone(),
                instance,
            ))
        }
    }
}

impl core::fmt::Display for OneOfValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "oneOf: [{}]",
            self.schemas.iter().map(|node| node.to_string()).collect::<Vec<_>>().join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile<'a>(
    _: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    Some(OneOfValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"oneOf": [{"type": "string"}]}), &json!(0), "/oneOf")]
    #[test_case(&json!({"oneOf": [{"type": "string"}, {"maxLength": 3}]}), &json!(""), "/oneOf")]
    fn schema_path(schema: &Value, instance: &Value, expected: &str) {
        tests_util::assert_schema_path(schema, instance, expected)
    }
}
