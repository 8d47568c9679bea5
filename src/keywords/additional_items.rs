use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{
        boolean::{FalseValidator, TrueValidator},
        CompilationResult,
    },
    paths::{InstancePath, JSONPointer},
    schema_node::SchemaNode,
    validator::Validate,
};
use serde_json::{Map, Value};

pub(crate) struct AdditionalItemsObjectValidator {
    node: SchemaNode,
    items_count: usize,
}
impl AdditionalItemsObjectValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        schema: &'a Value,
        items_count: usize,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        let node = compile_validators(schema, context)?;
        Ok(Box::new(AdditionalItemsObjectValidator { node, items_count }))
    }
}
impl Validate for AdditionalItemsObjectValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.iter().skip(self.items_count).all(|item| self.node.is_valid(item))
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Array(items) = instance {
            let mut errors = vec![];
            for (idx, item) in items.iter().enumerate().skip(self.items_count) {
                instance_path.push(idx);
                errors.extend(self.node.validate(item, instance_path));
                instance_path.pop();
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl core::fmt::Display for AdditionalItemsObjectValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalItems: {}", self.node)
    }
}

pub(crate) struct AdditionalItemsBooleanValidator {
    items_count: usize,
    schema_path: JSONPointer,
}
impl AdditionalItemsBooleanValidator {
    #[inline]
    pub(crate) fn compile<'a>(items_count: usize, schema_path: JSONPointer) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalItemsBooleanValidator { items_count, schema_path }))
    }
}
impl Validate for AdditionalItemsBooleanValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.len() <= self.items_count
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Array(items) = instance {
            if items.len() > self.items_count {
                return error(ValidationError::additional_items(
                    instance_path.into(),
                    self.schema_path.clone(),
                    instance,
                    self.items_count,
                ));
            }
        }
        no_error()
    }
}
impl core::fmt::Display for AdditionalItemsBooleanValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalItems: false")
    }
}

#[inline]
pub(crate) fn compile<'a>(
    parent: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    let schema_path = context.as_pointer_with("additionalItems");
    if let Some(items) = parent.get("items") {
        match items {
            Value::Object(_) => Some(TrueValidator::compile()),
            Value::Array(items) => {
                let items_count = items.len();
                match schema {
                    Value::Object(_) => Some(AdditionalItemsObjectValidator::compile(schema, items_count, context)),
                    Value::Bool(true) => Some(TrueValidator::compile()),
                    Value::Bool(false) => Some(AdditionalItemsBooleanValidator::compile(items_count, schema_path)),
                    _ => None,
                }
            }
            Value::Bool(value) => {
                if *value {
                    Some(TrueValidator::compile())
                } else {
                    Some(FalseValidator::compile(schema_path))
                }
            }
            _ => Some(Err(CompilationError::new(schema_path, "items has an invalid type").into())),
        }
    } else {
        Some(TrueValidator::compile())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn rejects_extra_items() {
        let schema = json!({"items": [{"type": "integer"}], "additionalItems": false});
        tests_util::is_valid(&schema, &json!([1]));
        tests_util::is_not_valid(&schema, &json!([1, 2]));
    }

    #[test]
    fn validates_extra_items_against_schema() {
        let schema = json!({"items": [{"type": "integer"}], "additionalItems": {"type": "string"}});
        tests_util::is_valid(&schema, &json!([1, "a", "b"]));
        tests_util::is_not_valid(&schema, &json!([1, 2]));
    }
}
