use crate::{compilation::context::CompilationContext, keywords};
use serde_json::{Map, Value};

/// JSON Schema draft tag. Only draft-04 is recognized; the field exists (rather than
/// being dropped entirely) because it is threaded through compilation the same way the
/// multi-draft ancestor of this crate threads its `Draft` enum, and it is what a caller
/// checks a compiled schema against.
#[derive(Debug, PartialEq, Copy, Clone, Hash, Eq)]
pub enum Draft {
    /// JSON Schema Draft 4
    Draft4,
}

impl Default for Draft {
    fn default() -> Self {
        Draft::Draft4
    }
}

type CompileFunc<'a> =
    fn(&'a Map<String, Value>, &'a Value, &CompilationContext) -> Option<keywords::CompilationResult<'a>>;

impl Draft {
    pub(crate) fn get_validator(self, keyword: &str) -> Option<CompileFunc> {
        match keyword {
            "additionalItems" => Some(keywords::additional_items::compile),
            "allOf" => Some(keywords::all_of::compile),
            "anyOf" => Some(keywords::any_of::compile),
            "dependencies" => Some(keywords::dependencies::compile),
            "enum" => Some(keywords::enum_::compile),
            "items" => Some(keywords::items::compile),
            "maximum" => Some(keywords::maximum::compile),
            "maxItems" => Some(keywords::max_items::compile),
            "maxLength" => Some(keywords::max_length::compile),
            "maxProperties" => Some(keywords::max_properties::compile),
            "minimum" => Some(keywords::minimum::compile),
            "minItems" => Some(keywords::min_items::compile),
            "minLength" => Some(keywords::min_length::compile),
            "minProperties" => Some(keywords::min_properties::compile),
            "multipleOf" => Some(keywords::multiple_of::compile),
            "not" => Some(keywords::not::compile),
            "oneOf" => Some(keywords::one_of::compile),
            "pattern" => Some(keywords::pattern::compile),
            "patternProperties" => Some(keywords::pattern_properties::compile),
            // `properties` also governs the properties/patternProperties/additionalProperties
            // three-way interaction; see keywords::properties for why all three keys are
            // inspected from this one entry point.
            "properties" => Some(keywords::properties::compile),
            "required" => Some(keywords::required::compile),
            "type" => Some(keywords::legacy::type_draft_4::compile),
            "uniqueItems" => Some(keywords::unique_items::compile),
            _ => None,
        }
    }
}

/// `Draft` from a `$schema` URL, recognizing only the draft-04 meta-schema URI.
#[inline]
pub(crate) fn draft_from_url(url: &str) -> Option<Draft> {
    match url {
        "http://json-schema.org/draft-04/schema#" => Some(Draft::Draft4),
        _ => None,
    }
}

/// `Draft` from a schema's own `$schema` keyword, if present and recognized.
#[inline]
pub(crate) fn draft_from_schema(schema: &Value) -> Option<Draft> {
    schema.get("$schema").and_then(Value::as_str).and_then(draft_from_url)
}

/// The draft-04 scope-defining keyword is `id` (not `$id`, which is draft-06+).
#[inline]
pub(crate) fn id_of(_draft: Draft, schema: &Value) -> Option<&str> {
    if let Value::Object(object) = schema {
        object.get("id").and_then(Value::as_str)
    } else {
        None
    }
}

/// The URI under which the draft-04 meta-schema is pre-registered, with no network
/// access required to resolve it.
pub(crate) const DRAFT4_META_SCHEMA_ID: &str = "http://json-schema.org/draft-04/schema";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"$schema": "http://json-schema.org/draft-04/schema#"}), Some(Draft::Draft4))]
    #[test_case(&json!({"$schema": "http://example.com/custom/schema#"}), None)]
    fn test_draft_from_schema(schema: &Value, draft: Option<Draft>) {
        assert_eq!(draft_from_schema(schema), draft)
    }

    #[test]
    fn test_default() {
        assert_eq!(Draft::default(), Draft::Draft4)
    }

    #[test]
    fn test_id_of_uses_legacy_keyword() {
        let schema = json!({"id": "http://example.com/schema#", "$id": "ignored"});
        assert_eq!(id_of(Draft::Draft4, &schema), Some("http://example.com/schema#"));
    }
}
