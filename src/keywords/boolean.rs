use crate::{
    error::{error, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    validator::Validate,
};
use serde_json::Value;

/// The `false` schema: rejects every instance.
pub(crate) struct FalseValidator {
    schema_path: JSONPointer,
}

impl FalseValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema_path: JSONPointer) -> CompilationResult<'a> {
        Ok(Box::new(FalseValidator { schema_path }))
    }
}

impl Validate for FalseValidator {
    fn is_valid(&self, _instance: &Value) -> bool {
        false
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        error(ValidationError::false_schema(
            instance_path.into(),
            self.schema_path.clone(),
            instance,
        ))
    }
}

impl core::fmt::Display for FalseValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        "false".fmt(f)
    }
}

/// The `true` schema: accepts every instance. Used where a boolean subschema appears
/// somewhere other than the document root (e.g. `additionalItems: true`), so it still
/// needs a concrete validator rather than an empty validator list.
pub(crate) struct TrueValidator {}

impl TrueValidator {
    #[inline]
    pub(crate) fn compile<'a>() -> CompilationResult<'a> {
        Ok(Box::new(TrueValidator {}))
    }
}

impl Validate for TrueValidator {
    fn is_valid(&self, _instance: &Value) -> bool {
        true
    }

    fn validate<'a>(&self, _instance: &'a Value, _instance_path: &InstancePath) -> ErrorIterator<'a> {
        Box::new(std::iter::empty())
    }
}

impl core::fmt::Display for TrueValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        "true".fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(&json!(false), &json!(1), "")
    }
}
