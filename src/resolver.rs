//! Reference resolver. Implements the logic required by the `$ref` keyword.
use crate::{
    compilation::DEFAULT_ROOT_URL,
    error::CompilationError,
    schemas::{id_of, DRAFT4_META_SCHEMA_ID},
};
use ahash::AHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::{fmt, sync::Arc};
use url::Url;

lazy_static::lazy_static! {
    /// The draft-04 meta-schema, embedded so `{"$ref": "http://json-schema.org/draft-04/schema#"}`
    /// resolves without a network call under the default configuration.
    static ref META_SCHEMAS: AHashMap<&'static str, Arc<Value>> = {
        let mut store = AHashMap::with_capacity(1);
        store.insert(
            DRAFT4_META_SCHEMA_ID,
            Arc::new(
                serde_json::from_str(include_str!("../meta_schemas/draft4.json"))
                    .expect("Invalid meta-schema"),
            ),
        );
        store
    };
}

/// An opaque error type returned by resolvers on resolution failures.
pub type SchemaResolverError = Box<dyn std::error::Error + Send + Sync>;

/// A resolver that resolves external schema references.
///
/// Internal references such as `#/definitions` and JSON pointers are handled
/// internally and never reach this trait. All operations are blocking.
///
/// # Example
///
/// ```no_run
/// # use serde_json::Value;
/// # use draft4_validator::SchemaResolver;
/// # use std::sync::Arc;
/// # use url::Url;
/// struct NoNetworkResolver;
///
/// impl SchemaResolver for NoNetworkResolver {
///     fn resolve(
///         &self,
///         _root_schema: &Value,
///         url: &Url,
///         _original_reference: &str,
///     ) -> Result<Arc<Value>, Box<dyn std::error::Error + Send + Sync>> {
///         Err(format!("cannot resolve '{}': no network access configured", url).into())
///     }
/// }
/// ```
pub trait SchemaResolver: Send + Sync {
    /// Resolve an external schema via a URL.
    ///
    /// The original reference string is also passed along; in most cases it is not
    /// needed, but it preserves information (such as relative paths) that is lost
    /// once the URL has been built.
    fn resolve(
        &self,
        root_schema: &Value,
        url: &Url,
        original_reference: &str,
    ) -> Result<Arc<Value>, SchemaResolverError>;
}

pub(crate) struct DefaultResolver;

impl SchemaResolver for DefaultResolver {
    fn resolve(
        &self,
        _root_schema: &Value,
        url: &Url,
        _original_reference: &str,
    ) -> Result<Arc<Value>, SchemaResolverError> {
        Err(format!(
            "resolving external schemas requires a custom resolver (via `with_resolver`); \
             could not resolve '{}'",
            url
        )
        .into())
    }
}

pub(crate) struct Resolver {
    external_resolver: Arc<dyn SchemaResolver>,
    root_schema: Arc<Value>,
    // canonical_id -> sub-schema, composed with the root document id (or
    // `DEFAULT_ROOT_URL` if the root carries none)
    schemas: AHashMap<String, Arc<Value>>,
    store: RwLock<AHashMap<String, Arc<Value>>>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("root_schema", &self.root_schema)
            .field("schemas", &self.schemas)
            .finish()
    }
}

impl Resolver {
    pub(crate) fn new(
        external_resolver: Arc<dyn SchemaResolver>,
        scope: &Url,
        schema: Arc<Value>,
    ) -> Result<Resolver, CompilationError> {
        let mut schemas: AHashMap<String, Arc<Value>> = AHashMap::new();
        find_schemas(&schema, scope, &mut |id, schema| {
            schemas.insert(id, Arc::new(schema.clone()));
            None
        })
        .map_err(CompilationError::from)?;
        Ok(Resolver {
            external_resolver,
            root_schema: schema,
            schemas,
            store: RwLock::new(AHashMap::new()),
        })
    }

    /// Load a document for the given `url`. It may be the root document, a named
    /// sub-schema stored in `self.schemas`, or a document from a remote location.
    fn resolve_url(&self, url: &Url, orig_ref: &str) -> Result<Arc<Value>, SchemaResolverError> {
        match url.as_str() {
            DEFAULT_ROOT_URL => Ok(Arc::clone(&self.root_schema)),
            url_str => match self.schemas.get(url_str).or_else(|| META_SCHEMAS.get(url_str)) {
                Some(value) => Ok(Arc::clone(value)),
                None => {
                    if let Some(cached) = self.store.read().get(url_str) {
                        return Ok(Arc::clone(cached));
                    }
                    let resolved = self
                        .external_resolver
                        .resolve(&self.root_schema, url, orig_ref)?;
                    self.store
                        .write()
                        .insert(url.to_string(), Arc::clone(&resolved));
                    Ok(resolved)
                }
            },
        }
    }

    /// Resolve a URL possibly containing a fragment to a `serde_json::Value`.
    ///
    /// Note that this copies the fragment from the underlying schema, so if you
    /// are memory constrained you may want to cache the result of this call.
    pub(crate) fn resolve_fragment(
        &self,
        url: &Url,
        orig_ref: &str,
    ) -> Result<(Url, Arc<Value>), SchemaResolverError> {
        let mut resource = url.clone();
        resource.set_fragment(None);
        let fragment =
            percent_encoding::percent_decode_str(url.fragment().unwrap_or("")).decode_utf8()?;

        // Location-independent identifiers are searched before trying to resolve by
        // the fragment-less URL.
        if let Some(document) = self.schemas.get(url.as_str()) {
            return Ok((resource, Arc::clone(document)));
        }

        let document = self.resolve_url(&resource, orig_ref)?;
        if fragment.is_empty() {
            return Ok((resource, document));
        }
        match pointer(&document, fragment.as_ref()) {
            Some((folders, resolved)) => {
                let joined_folders = join_folders(resource, &folders)?;
                Ok((joined_folders, Arc::new(resolved.clone())))
            }
            None => Err(format!("Reference '{}' could not be resolved", url).into()),
        }
    }
}

fn join_folders(mut resource: Url, folders: &[&str]) -> Result<Url, url::ParseError> {
    if folders.len() > 1 {
        for i in folders.iter().skip(1) {
            resource = resource.join(i)?;
        }
    }
    Ok(resource)
}

/// Find all sub-schemas in the document and run `callback` on each of them.
#[inline]
pub(crate) fn find_schemas<'a, F>(
    schema: &'a Value,
    base_url: &Url,
    callback: &mut F,
) -> Result<Option<&'a Value>, url::ParseError>
where
    F: FnMut(String, &'a Value) -> Option<&'a Value>,
{
    match schema {
        Value::Object(item) => {
            if let Some(url) = id_of(crate::schemas::Draft::Draft4, schema) {
                let mut new_url = base_url.join(url)?;
                // Empty fragments are discouraged and are not distinguishable from
                // absent ones.
                if let Some("") = new_url.fragment() {
                    new_url.set_fragment(None);
                }
                if let Some(x) = callback(new_url.to_string(), schema) {
                    return Ok(Some(x));
                }
                for (key, subschema) in item {
                    if key == "enum" {
                        continue;
                    }
                    let result = find_schemas(subschema, &new_url, callback)?;
                    if result.is_some() {
                        return Ok(result);
                    }
                }
            } else {
                for (key, subschema) in item {
                    if key == "enum" {
                        continue;
                    }
                    let result = find_schemas(subschema, base_url, callback)?;
                    if result.is_some() {
                        return Ok(result);
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                let result = find_schemas(item, base_url, callback)?;
                if result.is_some() {
                    return Ok(result);
                }
            }
        }
        _ => {}
    }
    Ok(None)
}

/// Like `serde_json`'s pointer resolution, but tracks the `id`-bearing folders
/// traversed along the way, so a joined `$ref` resolves relative to the right one.
pub(crate) fn pointer<'a>(document: &'a Value, pointer: &str) -> Option<(Vec<&'a str>, &'a Value)> {
    if !pointer.starts_with('/') {
        return None;
    }
    let tokens = pointer
        .split('/')
        .skip(1)
        .map(|x| x.replace("~1", "/").replace("~0", "~"));
    let mut target = document;
    let mut folders = vec![];

    for token in tokens {
        let target_opt = match *target {
            Value::Object(ref map) => {
                if let Some(id) = id_of(crate::schemas::Draft::Draft4, target) {
                    folders.push(id);
                }
                map.get(&token)
            }
            Value::Array(ref list) => parse_index(&token).and_then(|x| list.get(x)),
            _ => return None,
        };
        if let Some(t) = target_opt {
            target = t;
        } else {
            return None;
        }
    }
    Some((folders, target))
}

fn parse_index(s: &str) -> Option<usize> {
    if s.starts_with('+') || (s.starts_with('0') && s.len() != 1) {
        None
    } else {
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use url::Url;

    fn make_resolver(schema: &Value) -> Resolver {
        Resolver::new(
            Arc::new(DefaultResolver),
            &Url::parse("json-schema:///").unwrap(),
            Arc::new(schema.clone()),
        )
        .unwrap()
    }

    #[test]
    fn only_keyword() {
        let schema = json!({"type": "string"});
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 0);
    }

    #[test]
    fn sub_schema_in_object() {
        let schema = json!({
            "allOf": [{"$ref": "#foo"}],
            "definitions": {
                "A": {"id": "#foo", "type": "integer"}
            }
        });
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 1);
        assert_eq!(
            resolver.schemas.get("json-schema:///#foo").map(AsRef::as_ref),
            schema.pointer("/definitions/A")
        );
    }

    #[test]
    fn sub_schemas_in_array() {
        let schema = json!({
            "definitions": {
                "A": [
                    {"id": "#foo", "type": "integer"},
                    {"id": "#bar", "type": "string"}
                ]
            }
        });
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 2);
        assert_eq!(
            resolver.schemas.get("json-schema:///#foo").map(AsRef::as_ref),
            schema.pointer("/definitions/A/0")
        );
        assert_eq!(
            resolver.schemas.get("json-schema:///#bar").map(AsRef::as_ref),
            schema.pointer("/definitions/A/1")
        );
    }

    #[test]
    fn root_schema_id() {
        let schema = json!({
            "id": "http://localhost:1234/tree",
            "definitions": {
                "node": {
                    "id": "http://localhost:1234/node",
                    "properties": {
                        "subtree": {"$ref": "tree"},
                        "value": {"type": "number"}
                    },
                    "required": ["value"],
                    "type": "object"
                }
            },
            "properties": {
                "meta": {"type": "string"},
                "nodes": {
                    "items": {"$ref": "node"},
                    "type": "array"
                }
            },
            "required": ["meta", "nodes"],
            "type": "object"
        });
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 2);
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/tree")
                .map(AsRef::as_ref),
            schema.pointer("")
        );
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/node")
                .map(AsRef::as_ref),
            schema.pointer("/definitions/node")
        );
    }

    #[test]
    fn location_independent_with_absolute_uri() {
        let schema = json!({
            "allOf": [{"$ref": "http://localhost:1234/bar#foo"}],
            "definitions": {
                "A": {"id": "http://localhost:1234/bar#foo", "type": "integer"}
            }
        });
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 1);
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/bar#foo")
                .map(AsRef::as_ref),
            schema.pointer("/definitions/A")
        );
    }

    #[test]
    fn base_uri_change() {
        let schema = json!({
            "id": "http://localhost:1234/",
            "items": {
                "id": "folder/",
                "items": {"$ref": "folderInteger.json"}
            }
        });
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 2);
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/")
                .map(AsRef::as_ref),
            schema.pointer("")
        );
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/folder/")
                .map(AsRef::as_ref),
            schema.pointer("/items")
        );
    }

    #[test]
    fn base_uri_change_folder() {
        let schema = json!({
            "id": "http://localhost:1234/scope_change_defs1.json",
            "definitions": {
                "baz": {
                    "id": "folder/",
                    "items": {"$ref": "folderInteger.json"},
                    "type": "array"
                }
            },
            "properties": {
                "list": {"$ref": "#/definitions/baz"}
            },
            "type": "object"
        });
        let resolver = make_resolver(&schema);
        assert_eq!(resolver.schemas.len(), 2);
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/scope_change_defs1.json")
                .map(AsRef::as_ref),
            schema.pointer("")
        );
        assert_eq!(
            resolver
                .schemas
                .get("http://localhost:1234/folder/")
                .map(AsRef::as_ref),
            schema.pointer("/definitions/baz")
        );
    }

    #[test]
    fn resolve_ref() {
        let schema = json!({
            "$ref": "#/definitions/c",
            "definitions": {
                "a": {"type": "integer"},
                "b": {"$ref": "#/definitions/a"},
                "c": {"$ref": "#/definitions/b"}
            }
        });
        let resolver = make_resolver(&schema);
        let url = Url::parse("json-schema:///#/definitions/a").unwrap();
        let (resource, resolved) = resolver.resolve_fragment(&url, "#/definitions/a").unwrap();
        assert_eq!(resource, Url::parse("json-schema:///").unwrap());
        assert_eq!(resolved.as_ref(), schema.pointer("/definitions/a").unwrap());
    }

    #[test]
    fn resolves_draft4_meta_schema_without_a_custom_resolver() {
        let schema = json!({"$ref": "http://json-schema.org/draft-04/schema#"});
        let resolver = make_resolver(&schema);
        let url = Url::parse("http://json-schema.org/draft-04/schema#").unwrap();
        let (_, resolved) = resolver.resolve_fragment(&url, "http://json-schema.org/draft-04/schema#").unwrap();
        assert_eq!(resolved.get("id").and_then(Value::as_str), Some("http://json-schema.org/draft-04/schema#"));
    }
}
