use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{no_error, CompilationError, ErrorIterator},
    keywords::CompilationResult,
    paths::InstancePath,
    schema_node::SchemaNode,
    validator::Validate,
};
use regex::Regex;
use serde_json::{Map, Value};

pub(crate) struct PatternPropertiesValidator {
    patterns: Vec<(Regex, SchemaNode)>,
}

impl PatternPropertiesValidator {
    #[inline]
    pub(crate) fn compile<'a>(map: &'a Map<String, Value>, context: &CompilationContext) -> CompilationResult<'a> {
        let mut patterns = Vec::with_capacity(map.len());
        for (pattern, subschema) in map {
            let compiled_pattern = Regex::new(pattern)
                .map_err(|e| CompilationError::new(context.schema_path().clone(), e.to_string()))?;
            let pattern_context = context.with_path(pattern.as_str());
            patterns.push((compiled_pattern, compile_validators(subschema, &pattern_context)?));
        }
        Ok(Box::new(PatternPropertiesValidator { patterns }))
    }
}

impl Validate for PatternPropertiesValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.patterns.iter().all(|(re, node)| {
                item.iter()
                    .filter(|(key, _)| re.is_match(key))
                    .all(|(_, value)| node.is_valid(value))
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (re, node) in &self.patterns {
                for (key, value) in item.iter().filter(|(key, _)| re.is_match(key)) {
                    instance_path.push(key.clone());
                    errors.extend(node.validate(value, instance_path));
                    instance_path.pop();
                }
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}

impl core::fmt::Display for PatternPropertiesValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "patternProperties: {{{}}}",
            self.patterns
                .iter()
                .map(|(key, node)| format!("{}: {}", key, node))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

pub(crate) struct SingleValuePatternPropertiesValidator {
    pattern: Regex,
    node: SchemaNode,
}

impl SingleValuePatternPropertiesValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        pattern: &str,
        schema: &'a Value,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        let compiled_pattern =
            Regex::new(pattern).map_err(|e| CompilationError::new(context.schema_path().clone(), e.to_string()))?;
        let pattern_context = context.with_path(pattern);
        Ok(Box::new(SingleValuePatternPropertiesValidator {
            pattern: compiled_pattern,
            node: compile_validators(schema, &pattern_context)?,
        }))
    }
}

impl Validate for SingleValuePatternPropertiesValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter()
                .filter(|(key, _)| self.pattern.is_match(key))
                .all(|(_, value)| self.node.is_valid(value))
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (key, value) in item.iter().filter(|(key, _)| self.pattern.is_match(key)) {
                instance_path.push(key.clone());
                errors.extend(self.node.validate(value, instance_path));
                instance_path.pop();
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}

impl core::fmt::Display for SingleValuePatternPropertiesValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "patternProperties: {{{}: {}}}", self.pattern, self.node)
    }
}

#[inline]
pub(crate) fn compile<'a>(
    parent: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    match parent.get("additionalProperties") {
        // This `additionalProperties` validator handles `patternProperties` logic by itself.
        Some(Value::Bool(false)) | Some(Value::Object(_)) => None,
        _ => {
            let keyword_context = context.with_path("patternProperties");
            if let Value::Object(map) = schema {
                if map.len() == 1 {
                    let (key, value) = map.iter().next().expect("map is not empty");
                    Some(SingleValuePatternPropertiesValidator::compile(key, value, &keyword_context))
                } else {
                    Some(PatternPropertiesValidator::compile(map, &keyword_context))
                }
            } else {
                Some(Err(CompilationError::new(keyword_context.schema_path().clone(), "patternProperties must be an object").into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn single_pattern() {
        let schema = json!({"patternProperties": {"^x-": {"type": "integer"}}});
        tests_util::is_valid(&schema, &json!({"x-foo": 1}));
        tests_util::is_not_valid(&schema, &json!({"x-foo": "a"}));
    }

    #[test]
    fn multiple_patterns() {
        let schema = json!({"patternProperties": {"^x-": {"minimum": 5}, "-y$": {"maximum": 10}}});
        tests_util::is_valid(&schema, &json!({"x-foo": 6, "bar-y": 7}));
        tests_util::is_not_valid(&schema, &json!({"x-foo": 1}));
    }
}
