use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{CompilationError, ErrorIterator},
    keywords::CompilationResult,
    paths::InstancePath,
    schema_node::SchemaNode,
    validator::Validate,
};
use serde_json::{Map, Value};

pub(crate) struct AllOfValidator {
    schemas: Vec<SchemaNode>,
}

impl AllOfValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, context: &CompilationContext) -> CompilationResult<'a> {
        if let Value::Array(items) = schema {
            let keyword_context = context.with_path("allOf");
            let mut schemas = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                schemas.push(compile_validators(item, &keyword_context.with_path(idx))?);
            }
            Ok(Box::new(AllOfValidator { schemas }))
        } else {
            Err(CompilationError::new(context.schema_path().clone(), "allOf must be an array").into())
        }
    }
}

impl Validate for AllOfValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        self.schemas.iter().all(|node| node.is_valid(instance))
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        let errors: Vec<_> = self
            .schemas
            .iter()
            .flat_map(|node| node.validate(instance, instance_path))
            .collect();
        Box::new(errors.into_iter())
    }
}

impl core::fmt::Display for AllOfValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "allOf: [{}]",
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
    Some(AllOfValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn all_branches_must_hold() {
        let schema = json!({"allOf": [{"type": "integer"}, {"minimum": 5}]});
        tests_util::is_valid(&schema, &json!(6));
        tests_util::is_not_valid(&schema, &json!(3));
        tests_util::is_not_valid(&schema, &json!("a"));
    }
}
