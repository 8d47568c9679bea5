use crate::{
    error::CompilationError,
    paths::{JSONPointer, PathChunk},
    resolver::Resolver,
    schemas,
};
use serde_json::Value;
use std::{borrow::Cow, sync::Arc};
use url::Url;

/// Threaded through `compile_validators` as it descends into a schema document.
/// Carries everything a keyword's `compile` function needs that is not already on
/// its own slice of the schema: the current base URI (for resolving relative
/// `$ref`s), the shared reference resolver, whether `default` substitution is
/// enabled, and a running JSON Pointer back to the keyword being compiled (used to
/// stamp `schema_path` onto every `ValidationError` it can produce).
#[derive(Clone)]
pub(crate) struct CompilationContext<'a> {
    scope: Cow<'a, Url>,
    resolver: Arc<Resolver>,
    apply_defaults: bool,
    schema_path: JSONPointer,
}

impl<'a> CompilationContext<'a> {
    pub(crate) fn new(scope: Cow<'a, Url>, resolver: Arc<Resolver>, apply_defaults: bool) -> Self {
        CompilationContext {
            scope,
            resolver,
            apply_defaults,
            schema_path: JSONPointer::default(),
        }
    }

    pub(crate) fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    pub(crate) fn apply_defaults(&self) -> bool {
        self.apply_defaults
    }

    pub(crate) fn scope(&self) -> &Url {
        &self.scope
    }

    pub(crate) fn schema_path(&self) -> &JSONPointer {
        &self.schema_path
    }

    /// A context for a child node one keyword deeper, with `chunk` appended to
    /// `schema_path`.
    pub(crate) fn with_path(&self, chunk: impl Into<PathChunk>) -> CompilationContext<'a> {
        CompilationContext {
            scope: self.scope.clone(),
            resolver: Arc::clone(&self.resolver),
            apply_defaults: self.apply_defaults,
            schema_path: self.schema_path.extend_with(&[chunk.into()]),
        }
    }

    /// `schema_path` with `chunk` appended, without building a whole new context.
    pub(crate) fn as_pointer_with(&self, chunk: impl Into<PathChunk>) -> JSONPointer {
        self.schema_path.extend_with(&[chunk.into()])
    }

    pub(crate) fn into_pointer(self) -> JSONPointer {
        self.schema_path
    }

    /// A context entering `schema`, updating the base URI if `schema` carries its
    /// own `id`.
    #[allow(clippy::doc_markdown)]
    pub(crate) fn push(&self, schema: &Value) -> Result<CompilationContext<'a>, CompilationError> {
        if let Some(id) = schemas::id_of(schemas::Draft::Draft4, schema) {
            let scope = Cow::Owned(self.build_url(id)?);
            Ok(CompilationContext {
                scope,
                resolver: Arc::clone(&self.resolver),
                apply_defaults: self.apply_defaults,
                schema_path: self.schema_path.clone(),
            })
        } else {
            Ok(self.clone())
        }
    }

    /// Resolve `reference` against the current scope. Used by `$ref` compilation
    /// to keep full, absolute paths.
    pub(crate) fn build_url(&self, reference: &str) -> Result<Url, CompilationError> {
        Url::options()
            .base_url(Some(&self.scope))
            .parse(reference)
            .map_err(CompilationError::from)
    }
}
