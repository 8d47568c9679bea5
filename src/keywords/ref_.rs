use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{error, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    resolver::Resolver,
    schema_node::SchemaNode,
    validator::Validate,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::{borrow::Cow, sync::Arc};
use url::Url;

/// `$ref` overrides every sibling keyword: the compiled object holds nothing but
/// this one validator.
///
/// The referenced schema is compiled lazily, on first use, rather than eagerly at
/// compile time: a schema referencing itself (directly or through a cycle of
/// `$ref`s) would otherwise recurse forever during compilation. Compiling lazily
/// means the cycle is only ever walked at validation time, where the depth guard on
/// [`SchemaNode`] can catch it.
pub(crate) struct RefValidator {
    reference: Url,
    original: String,
    resolver: Arc<Resolver>,
    apply_defaults: bool,
    sub_node: RwLock<Option<SchemaNode>>,
    schema_path: JSONPointer,
}

impl RefValidator {
    #[inline]
    pub(crate) fn compile<'a>(reference: &str, context: &CompilationContext) -> CompilationResult<'a> {
        let url = context.build_url(reference)?;
        Ok(Box::new(RefValidator {
            reference: url,
            original: reference.to_string(),
            resolver: Arc::clone(context.resolver()),
            apply_defaults: context.apply_defaults(),
            sub_node: RwLock::new(None),
            schema_path: context.schema_path().clone(),
        }))
    }

    /// Compile the referenced sub-schema the first time it's needed and cache it.
    /// Returns `None` if the reference could not be resolved or the resolved schema
    /// itself fails to compile.
    fn resolve(&self) -> Option<()> {
        if self.sub_node.read().is_some() {
            return Some(());
        }
        let (scope, resolved) = self.resolver.resolve_fragment(&self.reference, &self.original).ok()?;
        let context = CompilationContext::new(Cow::Owned(scope), Arc::clone(&self.resolver), self.apply_defaults);
        let node = compile_validators(&resolved, &context).ok()?;
        *self.sub_node.write() = Some(node);
        Some(())
    }
}

impl Validate for RefValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if self.resolve().is_none() {
            return false;
        }
        self.sub_node
            .read()
            .as_ref()
            .map_or(false, |node| node.is_valid(instance))
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if self.resolve().is_none() {
            return error(ValidationError::unresolvable_reference(
                instance_path.into(),
                self.schema_path.clone(),
                instance,
                self.original.clone(),
            ));
        }
        let schema_path = self.schema_path.clone();
        let errors: Vec<_> = self
            .sub_node
            .read()
            .as_ref()
            .expect("just resolved")
            .validate(instance, instance_path)
            .map(move |mut err| {
                err.schema_path = schema_path.extend_with(err.schema_path.as_slice());
                err
            })
            .collect();
        Box::new(errors.into_iter())
    }
}

impl core::fmt::Display for RefValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "$ref: {}", self.reference)
    }
}

#[inline]
pub(crate) fn compile<'a>(reference: &str, context: &CompilationContext) -> CompilationResult<'a> {
    RefValidator::compile(reference, context)
}
