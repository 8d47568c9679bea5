use crate::{
    compilation::context::CompilationContext,
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    primitive_type::{is_mathematical_integer, PrimitiveType, PrimitiveTypesBitMap},
    validator::Validate,
};
use serde_json::{Map, Value};

macro_rules! single_type_validator {
    ($validator:ident, $type_:expr, $matches:expr) => {
        pub(crate) struct $validator {
            schema_path: JSONPointer,
        }

        impl $validator {
            #[inline]
            pub(crate) fn compile<'a>(schema_path: JSONPointer) -> CompilationResult<'a> {
                Ok(Box::new($validator { schema_path }))
            }
        }

        impl Validate for $validator {
            fn is_valid(&self, instance: &Value) -> bool {
                $matches(instance)
            }

            fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
                if self.is_valid(instance) {
                    no_error()
                } else {
                    error(ValidationError::single_type_error(
                        instance_path.into(),
                        self.schema_path.clone(),
                        instance,
                        $type_,
                    ))
                }
            }
        }

        impl core::fmt::Display for $validator {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "type: {}", $type_)
            }
        }
    };
}

single_type_validator!(ArrayTypeValidator, PrimitiveType::Array, |i: &Value| matches!(i, Value::Array(_)));
single_type_validator!(BooleanTypeValidator, PrimitiveType::Boolean, |i: &Value| matches!(i, Value::Bool(_)));
single_type_validator!(NullTypeValidator, PrimitiveType::Null, |i: &Value| matches!(i, Value::Null));
single_type_validator!(NumberTypeValidator, PrimitiveType::Number, |i: &Value| matches!(i, Value::Number(_)));
single_type_validator!(ObjectTypeValidator, PrimitiveType::Object, |i: &Value| matches!(i, Value::Object(_)));
single_type_validator!(StringTypeValidator, PrimitiveType::String, |i: &Value| matches!(i, Value::String(_)));

pub(crate) struct IntegerTypeValidator {
    schema_path: JSONPointer,
}

impl IntegerTypeValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema_path: JSONPointer) -> CompilationResult<'a> {
        Ok(Box::new(IntegerTypeValidator { schema_path }))
    }
}

impl Validate for IntegerTypeValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Number(num) = instance {
            is_mathematical_integer(num)
        } else {
            false
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if self.is_valid(instance) {
            no_error()
        } else {
            error(ValidationError::single_type_error(
                instance_path.into(),
                self.schema_path.clone(),
                instance,
                PrimitiveType::Integer,
            ))
        }
    }
}

impl core::fmt::Display for IntegerTypeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "type: integer")
    }
}

pub(crate) struct MultipleTypesValidator {
    types: PrimitiveTypesBitMap,
    schema_path: JSONPointer,
}

impl MultipleTypesValidator {
    #[inline]
    pub(crate) fn compile<'a>(items: &'a [Value], schema_path: JSONPointer) -> CompilationResult<'a> {
        let mut types = PrimitiveTypesBitMap::new();
        for item in items {
            match item {
                Value::String(string) => {
                    if let Some(primitive_type) = PrimitiveType::parse(string.as_str()) {
                        types.insert(primitive_type);
                    } else {
                        return Err(CompilationError::new(schema_path, format!("unknown type: {}", string)).into());
                    }
                }
                _ => return Err(CompilationError::new(schema_path, "type entries must be strings").into()),
            }
        }
        Ok(Box::new(MultipleTypesValidator { types, schema_path }))
    }
}

impl Validate for MultipleTypesValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        match instance {
            Value::Array(_) => self.types.contains(PrimitiveType::Array),
            Value::Bool(_) => self.types.contains(PrimitiveType::Boolean),
            Value::Null => self.types.contains(PrimitiveType::Null),
            Value::Number(num) => {
                self.types.contains(PrimitiveType::Number)
                    || (self.types.contains(PrimitiveType::Integer) && is_mathematical_integer(num))
            }
            Value::Object(_) => self.types.contains(PrimitiveType::Object),
            Value::String(_) => self.types.contains(PrimitiveType::String),
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if self.is_valid(instance) {
            no_error()
        } else {
            error(ValidationError::multiple_type_error(
                instance_path.into(),
                self.schema_path.clone(),
                instance,
                self.types,
            ))
        }
    }
}

impl core::fmt::Display for MultipleTypesValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "type: [{}]",
            self.types.iter().map(|type_| type_.to_string()).collect::<Vec<String>>().join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile<'a>(
    _: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    let schema_path = context.as_pointer_with("type");
    match schema {
        Value::String(item) => Some(compile_single_type(item.as_str(), schema_path)),
        Value::Array(items) => {
            if items.len() == 1 {
                if let Some(Value::String(item)) = items.iter().next() {
                    Some(compile_single_type(item.as_str(), schema_path))
                } else {
                    Some(Err(CompilationError::new(schema_path, "type entries must be strings").into()))
                }
            } else {
                Some(MultipleTypesValidator::compile(items, schema_path))
            }
        }
        _ => Some(Err(CompilationError::new(schema_path, "type must be a string or an array of strings").into())),
    }
}

fn compile_single_type<'a>(item: &str, schema_path: JSONPointer) -> CompilationResult<'a> {
    match PrimitiveType::parse(item) {
        Some(PrimitiveType::Array) => ArrayTypeValidator::compile(schema_path),
        Some(PrimitiveType::Boolean) => BooleanTypeValidator::compile(schema_path),
        Some(PrimitiveType::Integer) => IntegerTypeValidator::compile(schema_path),
        Some(PrimitiveType::Null) => NullTypeValidator::compile(schema_path),
        Some(PrimitiveType::Number) => NumberTypeValidator::compile(schema_path),
        Some(PrimitiveType::Object) => ObjectTypeValidator::compile(schema_path),
        Some(PrimitiveType::String) => StringTypeValidator::compile(schema_path),
        None => Err(CompilationError::new(schema_path, format!("unknown type: {}", item)).into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn single_type() {
        let schema = json!({"type": "integer"});
        tests_util::is_valid(&schema, &json!(1));
        tests_util::is_not_valid(&schema, &json!(1.5));
        tests_util::is_not_valid(&schema, &json!("a"));
    }

    #[test]
    fn multiple_types() {
        let schema = json!({"type": ["integer", "null"]});
        tests_util::is_valid(&schema, &json!(1));
        tests_util::is_valid(&schema, &json!(null));
        tests_util::is_not_valid(&schema, &json!("a"));
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(&json!({"type": "integer"}), &json!("a"), "/type")
    }
}
