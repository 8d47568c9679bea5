use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema, DEFAULT_SCOPE},
    error::CompilationError,
    resolver::{DefaultResolver, Resolver, SchemaResolver},
    schemas::{self, Draft},
    ValidationError,
};
use serde_json::Value;
use std::{borrow::Cow, fmt, sync::Arc};

/// Configuration for compiling a schema. Use [`JSONSchema::options`] to obtain one.
#[derive(Clone)]
pub struct CompilationOptions {
    external_resolver: Arc<dyn SchemaResolver>,
    apply_defaults: bool,
}

impl fmt::Debug for CompilationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilationOptions")
            .field("apply_defaults", &self.apply_defaults)
            .finish()
    }
}

impl Default for CompilationOptions {
    fn default() -> Self {
        CompilationOptions {
            external_resolver: Arc::new(DefaultResolver),
            apply_defaults: false,
        }
    }
}

impl CompilationOptions {
    /// Use a custom resolver for external (non-local) `$ref`s.
    ///
    /// ```rust
    /// # use draft4_validator::JSONSchema;
    /// let schema = serde_json::json!({"maxLength": 5});
    /// let compiled = JSONSchema::options().compile(&schema).unwrap();
    /// assert!(compiled.is_valid(&serde_json::json!("short")));
    /// ```
    pub fn with_resolver(&mut self, resolver: impl SchemaResolver + 'static) -> &mut Self {
        self.external_resolver = Arc::new(resolver);
        self
    }

    /// When set, a missing object property whose `properties` subschema carries a
    /// `default` is validated as if that default value were present, instead of
    /// being skipped. The instance passed to `validate`/`is_valid` is never mutated.
    pub fn with_apply_defaults(&mut self, value: bool) -> &mut Self {
        self.apply_defaults = value;
        self
    }

    pub(crate) fn apply_defaults(&self) -> bool {
        self.apply_defaults
    }

    /// The draft this schema is compiled against. Always [`Draft::Draft4`].
    #[must_use]
    pub fn draft(&self) -> Draft {
        Draft::Draft4
    }

    /// Compile `schema` into a [`JSONSchema`] using the options accumulated so far.
    pub fn compile<'a>(&self, schema: &'a Value) -> Result<JSONSchema, ValidationError<'a>> {
        let scope = match schemas::id_of(Draft::Draft4, schema) {
            Some(id) => DEFAULT_SCOPE.join(id).map_err(CompilationError::from)?,
            None => DEFAULT_SCOPE.clone(),
        };
        let resolver = Resolver::new(Arc::clone(&self.external_resolver), &scope, Arc::new(schema.clone()))?;
        let context = CompilationContext::new(Cow::Owned(scope), Arc::new(resolver), self.apply_defaults);
        let node = compile_validators(schema, &context)?;
        Ok(JSONSchema {
            node,
            config: Arc::new(self.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_does_not_apply_defaults() {
        assert!(!CompilationOptions::default().apply_defaults());
    }

    #[test]
    fn with_apply_defaults_is_threaded_through() {
        let mut options = CompilationOptions::default();
        options.with_apply_defaults(true);
        let schema = json!({
            "properties": {"name": {"type": "string", "default": "unnamed"}},
        });
        let compiled = options.compile(&schema).unwrap();
        assert!(compiled.is_valid(&json!({})));
    }

    #[test]
    fn draft_is_always_draft4() {
        assert_eq!(CompilationOptions::default().draft(), Draft::Draft4);
    }
}
