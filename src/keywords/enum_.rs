use crate::{
    compilation::context::CompilationContext,
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{helpers, CompilationResult},
    paths::{InstancePath, JSONPointer},
    primitive_type::{PrimitiveType, PrimitiveTypesBitMap},
    validator::Validate,
};
use serde_json::{Map, Value};

pub(crate) struct EnumValidator {
    options: Value,
    // Types that occur among the enum's options
    types: PrimitiveTypesBitMap,
    items: Vec<Value>,
    schema_path: JSONPointer,
}

impl EnumValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, schema_path: JSONPointer) -> CompilationResult<'a> {
        if let Value::Array(items) = schema {
            let mut types = PrimitiveTypesBitMap::new();
            for item in items {
                for type_ in PrimitiveType::of(item).iter() {
                    types.insert(type_);
                }
            }
            Ok(Box::new(EnumValidator {
                options: schema.clone(),
                items: items.clone(),
                types,
                schema_path,
            }))
        } else {
            Err(CompilationError::new(schema_path, "enum must be an array").into())
        }
    }
}

impl Validate for EnumValidator {
    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if self.is_valid(instance) {
            no_error()
        } else {
            error(ValidationError::enumeration(
                instance_path.into(),
                self.schema_path.clone(),
                instance,
                &self.options,
            ))
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        // If the input value's type does not occur among the enum options, there is no
        // reason to compare it against every item.
        if self.types.intersects(&PrimitiveType::of(instance)) {
            self.items.iter().any(|item| helpers::equal(instance, item))
        } else {
            false
        }
    }
}

impl core::fmt::Display for EnumValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "enum: [{}]",
            self.items.iter().map(Value::to_string).collect::<Vec<String>>().join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile<'a>(
    _: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    Some(EnumValidator::compile(schema, context.as_pointer_with("enum")))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn matches_one_of_the_options() {
        let schema = json!({"enum": [1, "a", true]});
        tests_util::is_valid(&schema, &json!(1));
        tests_util::is_valid(&schema, &json!("a"));
        tests_util::is_not_valid(&schema, &json!(2));
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(&json!({"enum": [1, 2]}), &json!(3), "/enum")
    }
}
