//! Schema compilation.
//! The main idea is to compile the input JSON Schema to a validators tree that will contain
//! everything needed to perform such validation in runtime.
pub(crate) mod context;
pub mod options;

use crate::{
    error::ErrorIterator,
    keywords,
    paths::{InstancePath, JSONPointer},
    primitive_type::{PrimitiveType, PrimitiveTypesBitMap},
    schema_node::SchemaNode,
    validator::Validate,
    Draft, ValidationError,
};
use context::CompilationContext;
use options::CompilationOptions;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

pub(crate) const DEFAULT_ROOT_URL: &str = "json-schema:///";

/// The recursion depth `validate` will traverse before giving up with a
/// `DepthExceeded` error. Not configurable: a schema that needs more than this is
/// almost certainly cyclic through `$ref`.
const DEFAULT_MAX_DEPTH: usize = 1024;

lazy_static::lazy_static! {
    pub(crate) static ref DEFAULT_SCOPE: Url = Url::parse(DEFAULT_ROOT_URL).expect("Is a valid URL");
}

/// The structure that holds a JSON Schema compiled into a validation tree.
pub struct JSONSchema {
    pub(crate) node: SchemaNode,
    config: Arc<CompilationOptions>,
}

impl JSONSchema {
    /// Return a default `CompilationOptions` that can configure
    /// `JSONSchema` compilation flow.
    ///
    /// ```rust
    /// # use draft4_validator::JSONSchema;
    /// # let schema = serde_json::json!({});
    /// let maybe_jsonschema: Result<JSONSchema, _> = JSONSchema::options()
    ///     .with_apply_defaults(true)
    ///     .compile(&schema);
    /// ```
    #[must_use]
    pub fn options() -> CompilationOptions {
        CompilationOptions::default()
    }

    /// Compile the input schema into a validation tree.
    ///
    /// The method is equivalent to `JSONSchema::options().compile(schema)`.
    pub fn compile(schema: &Value) -> Result<JSONSchema, ValidationError> {
        Self::options().compile(schema)
    }

    /// Run validation against `instance` and return an iterator over `ValidationError` in the error case.
    #[inline]
    pub fn validate<'instance>(&self, instance: &'instance Value) -> Result<(), ErrorIterator<'instance>> {
        let instance_path = InstancePath::new(DEFAULT_MAX_DEPTH);
        let errors: Vec<_> = self.node.validate(instance, &instance_path).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Box::new(errors.into_iter()))
        }
    }

    /// Run validation against `instance` but return a boolean result instead of an iterator.
    /// It is useful for cases, where it is important to only know the fact if the data is valid or not.
    /// This approach is much faster, than `validate`.
    #[must_use]
    #[inline]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.node.is_valid(instance)
    }

    /// The [`Draft`] this schema was compiled against. Always [`Draft::Draft4`].
    #[must_use]
    pub fn draft(&self) -> Draft {
        self.config.draft()
    }

    /// The [`CompilationOptions`] that were used to compile this schema.
    #[must_use]
    pub fn config(&self) -> Arc<CompilationOptions> {
        Arc::clone(&self.config)
    }
}

impl std::fmt::Debug for JSONSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node)
    }
}

/// Compile a JSON document (sub)tree into a tree of validators.
#[inline]
pub(crate) fn compile_validators<'a>(
    schema: &'a Value,
    context: &CompilationContext,
) -> Result<SchemaNode, ValidationError<'a>> {
    let context = context.push(schema)?;
    match schema {
        Value::Bool(true) => Ok(SchemaNode::new_from_boolean(&context, None)),
        Value::Bool(false) => {
            let schema_path = context.schema_path().clone();
            Ok(SchemaNode::new_from_boolean(
                &context,
                Some(
                    keywords::boolean::FalseValidator::compile(schema_path)
                        .expect("FalseValidator::compile never fails"),
                ),
            ))
        }
        Value::Object(object) => {
            if let Some(Value::String(reference)) = object.get("$ref") {
                let validator = keywords::ref_::compile(reference, &context)?;
                Ok(SchemaNode::new_from_keywords(&context, vec![validator]))
            } else if object.contains_key("$ref") {
                Err(ValidationError::single_type_error(
                    JSONPointer::default(),
                    context.schema_path().clone(),
                    &object["$ref"],
                    PrimitiveType::String,
                ))
            } else {
                let mut validators = Vec::with_capacity(object.len());
                for (keyword, subschema) in object {
                    if let Some(validator) = Draft::Draft4
                        .get_validator(keyword)
                        .and_then(|compile| compile(object, subschema, &context))
                    {
                        validators.push(validator?);
                    }
                }
                Ok(SchemaNode::new_from_keywords(&context, validators))
            }
        }
        _ => Err(ValidationError::multiple_type_error(
            JSONPointer::default(),
            context.schema_path().clone(),
            schema,
            {
                let mut types = PrimitiveTypesBitMap::new();
                types.insert(PrimitiveType::Boolean);
                types.insert(PrimitiveType::Object);
                types
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::JSONSchema;
    use crate::error::ValidationError;
    use serde_json::json;

    #[test]
    fn only_keyword() {
        // When only one keyword is specified, there should be exactly one validator
        // in the compiled node.
        let schema = json!({"type": "string"});
        let compiled = JSONSchema::compile(&schema).unwrap();
        let value1 = json!("AB");
        let value2 = json!(1);
        assert_eq!(compiled.node.validators().len(), 1);
        assert!(compiled.validate(&value1).is_ok());
        assert!(compiled.validate(&value2).is_err());
    }

    #[test]
    fn validate_ref() {
        let schema = json!({
            "id": "http://example.com/self.json",
            "definitions": {"positive": {"minimum": 0}},
            "properties": {"bar": {"$ref": "#/definitions/positive"}},
        });
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.validate(&json!({"bar": 3})).is_ok());
        assert!(compiled.validate(&json!({"bar": -1})).is_err());
    }

    #[test]
    fn wrong_schema_type() {
        let schema = json!([1]);
        let compiled = JSONSchema::compile(&schema);
        assert!(compiled.is_err());
    }

    #[test]
    fn multiple_errors() {
        let schema = json!({"minProperties": 2, "required": ["a", "b"]});
        let value = json!({"a": 3});
        let compiled = JSONSchema::compile(&schema).unwrap();
        let result = compiled.validate(&value);
        let errors: Vec<ValidationError> = result.unwrap_err().collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), r#"{"a":3} has less than 2 properties"#);
        assert_eq!(errors[1].to_string(), r#"'b' is a required property"#);
    }
}
