use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{required::RequiredValidator, CompilationResult},
    paths::InstancePath,
    schema_node::SchemaNode,
    validator::Validate,
};
use serde_json::{Map, Value};

pub(crate) struct DependenciesValidator {
    dependencies: Vec<(String, SchemaNode)>,
}

impl DependenciesValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, context: &CompilationContext) -> CompilationResult<'a> {
        if let Value::Object(map) = schema {
            let keyword_context = context.with_path("dependencies");
            let mut dependencies = Vec::with_capacity(map.len());
            for (key, subschema) in map {
                let property_context = keyword_context.with_path(key.as_str());
                let node = match subschema {
                    Value::Array(items) => {
                        let required_path = property_context.as_pointer_with("required");
                        let validator = RequiredValidator::compile(items, required_path)?;
                        SchemaNode::new_from_keywords(&property_context, vec![validator])
                    }
                    _ => compile_validators(subschema, &property_context)?,
                };
                dependencies.push((key.clone(), node));
            }
            Ok(Box::new(DependenciesValidator { dependencies }))
        } else {
            Err(CompilationError::new(context.schema_path().clone(), "dependencies must be an object").into())
        }
    }
}

impl Validate for DependenciesValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.dependencies
                .iter()
                .filter(|(property, _)| item.contains_key(property))
                .all(|(_, node)| node.is_valid(instance))
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = self
                .dependencies
                .iter()
                .filter(|(property, _)| item.contains_key(property))
                .flat_map(|(_, node)| node.validate(instance, instance_path))
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}

impl core::fmt::Display for DependenciesValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dependencies: {{{}}}",
            self.dependencies
                .iter()
                .map(|(name, node)| format!("{}: {}", name, node))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile<'a>(
    _: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    Some(DependenciesValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn schema_dependency() {
        let schema = json!({"dependencies": {"bar": {"properties": {"foo": {"type": "integer"}}}}});
        tests_util::is_valid(&schema, &json!({"bar": 1, "foo": 1}));
        tests_util::is_not_valid(&schema, &json!({"bar": 1, "foo": "a"}));
    }

    #[test]
    fn array_dependency() {
        let schema = json!({"dependencies": {"bar": ["foo"]}});
        tests_util::is_valid(&schema, &json!({"bar": 1, "foo": 1}));
        tests_util::is_not_valid(&schema, &json!({"bar": 1}));
    }
}
