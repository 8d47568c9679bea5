use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    schema_node::SchemaNode,
    validator::Validate,
};
use serde_json::{Map, Value};

pub(crate) struct AnyOfValidator {
    schemas: Vec<SchemaNode>,
    schema_path: JSONPointer,
}

impl AnyOfValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, context: &CompilationContext) -> CompilationResult<'a> {
        if let Value::Array(items) = schema {
            let keyword_context = context.with_path("anyOf");
            let mut schemas = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                schemas.push(compile_validators(item, &keyword_context.with_path(idx))?);
            }
            Ok(Box::new(AnyOfValidator {
                schemas,
                schema_path: keyword_context.into_pointer(),
            }))
        } else {
            Err(CompilationError::new(context.schema_path().clone(), "anyOf must be an array").into())
        }
    }
}

impl Validate for AnyOfValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        self.schemas.iter().any(|node| node.is_valid(instance))
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if self.is_valid(instance) {
            no_error()
        } else {
            error(ValidationError::any_of(instance_path.into(), self.schema_path.clone(), instance))
        }
    }
}

impl core::fmt::Display for AnyOfValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "anyOf: [{}]",
            self.schemas.iter().map(SchemaNode::to_string).collect::<Vec<_>>().join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile<'a>(
    _: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    Some(AnyOfValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn any_branch_may_hold() {
        let schema = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});
        tests_util::is_valid(&schema, &json!("a"));
        tests_util::is_valid(&schema, &json!(1));
        tests_util::is_not_valid(&schema, &json!(1.5));
    }
}
