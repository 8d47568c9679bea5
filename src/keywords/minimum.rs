use crate::{
    compilation::context::CompilationContext,
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    validator::Validate,
};
use num_cmp::NumCmp;
use serde_json::{Map, Value};

pub(crate) struct MinimumU64Validator {
    limit: u64,
    exclusive: bool,
    schema_path: JSONPointer,
}
pub(crate) struct MinimumI64Validator {
    limit: i64,
    exclusive: bool,
    schema_path: JSONPointer,
}
pub(crate) struct MinimumF64Validator {
    limit: f64,
    exclusive: bool,
    schema_path: JSONPointer,
}

macro_rules! validate {
    ($validator:ty) => {
        impl Validate for $validator {
            fn is_valid(&self, instance: &Value) -> bool {
                if let Value::Number(item) = instance {
                    return if let Some(item) = item.as_u64() {
                        compare(item, self.limit, self.exclusive)
                    } else if let Some(item) = item.as_i64() {
                        compare(item, self.limit, self.exclusive)
                    } else {
                        let item = item.as_f64().expect("Always valid");
                        compare(item, self.limit, self.exclusive)
                    };
                }
                true
            }

            fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
                if self.is_valid(instance) {
                    no_error()
                } else if self.exclusive {
                    error(ValidationError::exclusive_minimum(
                        instance_path.into(),
                        self.schema_path.clone(),
                        instance,
                        self.limit as f64,
                    ))
                } else {
                    error(ValidationError::minimum(
                        instance_path.into(),
                        self.schema_path.clone(),
                        instance,
                        self.limit as f64,
                    ))
                }
            }
        }
        impl core::fmt::Display for $validator {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "minimum: {}", self.limit)
            }
        }
    };
}

#[inline]
fn compare<T: NumCmp<L>, L: Copy>(item: T, limit: L, exclusive: bool) -> bool {
    if exclusive {
        !NumCmp::num_le(item, limit)
    } else {
        !NumCmp::num_lt(item, limit)
    }
}

validate!(MinimumU64Validator);
validate!(MinimumI64Validator);
validate!(MinimumF64Validator);

#[inline]
pub(crate) fn compile<'a>(
    parent: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    if let Value::Number(limit) = schema {
        let schema_path = context.as_pointer_with("minimum");
        let exclusive = matches!(parent.get("exclusiveMinimum"), Some(Value::Bool(true)));
        if let Some(limit) = limit.as_u64() {
            Some(Ok(Box::new(MinimumU64Validator {
                limit,
                exclusive,
                schema_path,
            })))
        } else if let Some(limit) = limit.as_i64() {
            Some(Ok(Box::new(MinimumI64Validator {
                limit,
                exclusive,
                schema_path,
            })))
        } else {
            let limit = limit.as_f64().expect("Always valid");
            Some(Ok(Box::new(MinimumF64Validator {
                limit,
                exclusive,
                schema_path,
            })))
        }
    } else {
        let schema_path = context.as_pointer_with("minimum");
        Some(Err(CompilationError::new(schema_path, "minimum must be a number").into()))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"minimum": 1_u64 << 54}), &json!((1_u64 << 54) - 1))]
    #[test_case(&json!({"minimum": 1_i64 << 54}), &json!((1_i64 << 54) - 1))]
    fn is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn exclusive_minimum_sibling() {
        let schema = json!({"minimum": 1.1, "exclusiveMinimum": true});
        tests_util::is_valid(&schema, &json!(1.2));
        tests_util::is_not_valid(&schema, &json!(1.1));
    }

    #[test_case(&json!({"minimum": 5}), &json!(1), "/minimum")]
    #[test_case(&json!({"minimum": 6}), &json!(1), "/minimum")]
    #[test_case(&json!({"minimum": 7}), &json!(1), "/minimum")]
    fn schema_path(schema: &Value, instance: &Value, expected: &str) {
        tests_util::assert_schema_path(schema, instance, expected)
    }
}
