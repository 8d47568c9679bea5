use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{no_error, ErrorIterator},
    keywords::CompilationResult,
    paths::InstancePath,
    schema_node::SchemaNode,
    validator::Validate,
};
use serde_json::{Map, Value};

/// One compiled `properties` entry: the sub-schema to validate the named property
/// against, plus the `default` value to substitute when the property is absent and
/// default-substitution is enabled.
struct PropertyValidator {
    name: String,
    node: SchemaNode,
    default: Option<Value>,
}

pub(crate) struct PropertiesValidator {
    properties: Vec<PropertyValidator>,
}

impl PropertiesValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, context: &CompilationContext) -> CompilationResult<'a> {
        match schema {
            Value::Object(map) => {
                let keyword_context = context.with_path("properties");
                let mut properties = Vec::with_capacity(map.len());
                for (name, subschema) in map {
                    let property_context = keyword_context.with_path(name.as_str());
                    let node = compile_validators(subschema, &property_context)?;
                    let default = if context.apply_defaults() {
                        subschema.get("default").cloned()
                    } else {
                        None
                    };
                    properties.push(PropertyValidator {
                        name: name.clone(),
                        node,
                        default,
                    });
                }
                Ok(Box::new(PropertiesValidator { properties }))
            }
            _ => Ok(Box::new(PropertiesValidator { properties: Vec::new() })),
        }
    }
}

impl Validate for PropertiesValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.properties.iter().all(|property| match item.get(&property.name) {
                Some(value) => property.node.is_valid(value),
                None => property
                    .default
                    .as_ref()
                    .map_or(true, |default| property.node.is_valid(default)),
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = Vec::new();
            for property in &self.properties {
                match item.get(&property.name) {
                    Some(value) => {
                        instance_path.push(property.name.clone());
                        errors.extend(property.node.validate(value, instance_path));
                        instance_path.pop();
                    }
                    None => {
                        // A substituted default is validated at the same instance path
                        // as the (absent) property would have been, purely to surface
                        // errors against an invalid default - it is never written back
                        // into the instance.
                        if let Some(default) = &property.default {
                            instance_path.push(property.name.clone());
                            errors.extend(property.node.validate(default, instance_path).map(|e| e.into_owned()));
                            instance_path.pop();
                        }
                    }
                }
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}

impl core::fmt::Display for PropertiesValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "properties: {{{}}}",
            self.properties
                .iter()
                .map(|property| format!("{}: {}", property.name, property.node))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile<'a>(
    parent: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    match parent.get("additionalProperties") {
        // This type of `additionalProperties` validator handles `properties` logic
        // together with `patternProperties`; see `additional_properties::compile`.
        Some(Value::Bool(false)) | Some(Value::Object(_)) => None,
        _ => Some(PropertiesValidator::compile(schema, context)),
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(
            &json!({"properties": {"foo": {"type": "string"}}}),
            &json!({"foo": 1}),
            "/properties/foo/type",
        )
    }

    #[test]
    fn default_not_applied_when_disabled() {
        let schema = json!({"properties": {"name": {"type": "string", "default": 1}}});
        tests_util::is_valid(&schema, &json!({}));
    }
}
