//! Validators for the `additionalProperties` keyword.
//!
//! The goal here is to compute intersections with the other keywords that affect
//! properties validation - `properties` and `patternProperties` - so each valid
//! combination of these three keywords has its own validator below.
use crate::{
    compilation::{compile_validators, context::CompilationContext},
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::{InstancePath, JSONPointer},
    schema_node::SchemaNode,
    validator::Validate,
};
use ahash::AHashMap;
use regex::Regex;
use serde_json::{Map, Value};

pub(crate) type PatternedValidators = Vec<(Regex, SchemaNode)>;

/// Provide mapping API to get a property's compiled sub-schema from the underlying storage.
pub(crate) trait PropertiesValidatorsMap: Send + Sync {
    fn get_node(&self, property: &str) -> Option<&SchemaNode>;
    fn get_key_node(&self, property: &str) -> Option<(&String, &SchemaNode)>;
}

// Iterating over a small vector and comparing strings is faster than a map lookup
const MAP_SIZE_THRESHOLD: usize = 40;
pub(crate) type SmallValidatorsMap = Vec<(String, SchemaNode)>;
pub(crate) type BigValidatorsMap = AHashMap<String, SchemaNode>;

impl PropertiesValidatorsMap for SmallValidatorsMap {
    #[inline]
    fn get_node(&self, property: &str) -> Option<&SchemaNode> {
        self.iter().find(|(prop, _)| prop == property).map(|(_, node)| node)
    }
    #[inline]
    fn get_key_node(&self, property: &str) -> Option<(&String, &SchemaNode)> {
        self.iter().find(|(prop, _)| prop == property).map(|(prop, node)| (prop, node))
    }
}

impl PropertiesValidatorsMap for BigValidatorsMap {
    #[inline]
    fn get_node(&self, property: &str) -> Option<&SchemaNode> {
        self.get(property)
    }
    #[inline]
    fn get_key_node(&self, property: &str) -> Option<(&String, &SchemaNode)> {
        self.get_key_value(property)
    }
}

macro_rules! dynamic_map {
    ($validator:tt, $properties:ident, $context:ident, $( $arg:tt ),* $(,)*) => {{
        if let Value::Object(map) = $properties {
            if map.len() < MAP_SIZE_THRESHOLD {
                Some($validator::<SmallValidatorsMap>::compile(map, $($arg, )* &$context))
            } else {
                Some($validator::<BigValidatorsMap>::compile(map, $($arg, )* &$context))
            }
        } else {
            Some(Err(CompilationError::new($context.schema_path().clone(), "properties must be an object").into()))
        }
    }};
}

fn compile_small_map<'a>(
    map: &'a Map<String, Value>,
    context: &CompilationContext,
) -> Result<SmallValidatorsMap, crate::error::ValidationError<'a>> {
    let mut properties = Vec::with_capacity(map.len());
    for (key, subschema) in map {
        properties.push((key.clone(), compile_validators(subschema, context)?));
    }
    Ok(properties)
}
fn compile_big_map<'a>(
    map: &'a Map<String, Value>,
    context: &CompilationContext,
) -> Result<BigValidatorsMap, crate::error::ValidationError<'a>> {
    let mut properties = AHashMap::with_capacity(map.len());
    for (key, subschema) in map {
        properties.insert(key.clone(), compile_validators(subschema, context)?);
    }
    Ok(properties)
}

/// `additionalProperties: {<schema>}` with no `properties`/`patternProperties` sibling.
pub(crate) struct AdditionalPropertiesValidator {
    node: SchemaNode,
}
impl AdditionalPropertiesValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema: &'a Value, context: &CompilationContext) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesValidator {
            node: compile_validators(schema, context)?,
        }))
    }
}
impl Validate for AdditionalPropertiesValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.values().all(|value| self.node.is_valid(value))
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = item
                .iter()
                .flat_map(|(name, value)| {
                    instance_path.push(name.clone());
                    let errors: Vec<_> = self.node.validate(value, instance_path).collect();
                    instance_path.pop();
                    errors
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl core::fmt::Display for AdditionalPropertiesValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: {}", self.node)
    }
}

/// `additionalProperties: false` with no `properties`/`patternProperties` sibling.
pub(crate) struct AdditionalPropertiesFalseValidator {
    schema_path: JSONPointer,
}
impl AdditionalPropertiesFalseValidator {
    #[inline]
    pub(crate) fn compile<'a>(schema_path: JSONPointer) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesFalseValidator { schema_path }))
    }
}
impl Validate for AdditionalPropertiesFalseValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.is_empty()
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = item
                .keys()
                .map(|property| {
                    ValidationError::additional_properties(
                        instance_path.into(),
                        self.schema_path.clone(),
                        instance,
                        property.clone(),
                    )
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl core::fmt::Display for AdditionalPropertiesFalseValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: false")
    }
}

/// `additionalProperties: false` alongside `properties` (no `patternProperties`).
pub(crate) struct AdditionalPropertiesNotEmptyFalseValidator<M: PropertiesValidatorsMap> {
    properties: M,
    schema_path: JSONPointer,
}
impl AdditionalPropertiesNotEmptyFalseValidator<SmallValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesNotEmptyFalseValidator {
            properties: compile_small_map(map, context)?,
            schema_path: context.schema_path().clone(),
        }))
    }
}
impl AdditionalPropertiesNotEmptyFalseValidator<BigValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesNotEmptyFalseValidator {
            properties: compile_big_map(map, context)?,
            schema_path: context.schema_path().clone(),
        }))
    }
}
impl<M: PropertiesValidatorsMap> Validate for AdditionalPropertiesNotEmptyFalseValidator<M> {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter().all(|(property, value)| {
                self.properties.get_node(property).map_or(false, |node| node.is_valid(value))
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (property, value) in item {
                if let Some((name, node)) = self.properties.get_key_node(property) {
                    instance_path.push(name.clone());
                    errors.extend(node.validate(value, instance_path));
                    instance_path.pop();
                } else {
                    errors.push(ValidationError::additional_properties(
                        instance_path.into(),
                        self.schema_path.clone(),
                        instance,
                        property.clone(),
                    ));
                }
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl<M: PropertiesValidatorsMap> core::fmt::Display for AdditionalPropertiesNotEmptyFalseValidator<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: false")
    }
}

/// `additionalProperties: {<schema>}` alongside `properties` (no `patternProperties`).
pub(crate) struct AdditionalPropertiesNotEmptyValidator<M: PropertiesValidatorsMap> {
    node: SchemaNode,
    properties: M,
}
impl AdditionalPropertiesNotEmptyValidator<SmallValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        schema: &'a Value,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesNotEmptyValidator {
            properties: compile_small_map(map, context)?,
            node: compile_validators(schema, context)?,
        }))
    }
}
impl AdditionalPropertiesNotEmptyValidator<BigValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        schema: &'a Value,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesNotEmptyValidator {
            properties: compile_big_map(map, context)?,
            node: compile_validators(schema, context)?,
        }))
    }
}
impl<M: PropertiesValidatorsMap> Validate for AdditionalPropertiesNotEmptyValidator<M> {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(map) = instance {
            map.iter().all(|(property, value)| match self.properties.get_node(property) {
                Some(node) => node.is_valid(value),
                None => self.node.is_valid(value),
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(map) = instance {
            let mut errors = vec![];
            for (property, value) in map {
                instance_path.push(property.clone());
                if let Some((_, node)) = self.properties.get_key_node(property) {
                    errors.extend(node.validate(value, instance_path));
                } else {
                    errors.extend(self.node.validate(value, instance_path));
                }
                instance_path.pop();
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl<M: PropertiesValidatorsMap> core::fmt::Display for AdditionalPropertiesNotEmptyValidator<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: {}", self.node)
    }
}

/// `additionalProperties: {<schema>}` alongside `patternProperties` (no `properties`).
pub(crate) struct AdditionalPropertiesWithPatternsValidator {
    node: SchemaNode,
    patterns: PatternedValidators,
}
impl AdditionalPropertiesWithPatternsValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        schema: &'a Value,
        patterns: PatternedValidators,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesWithPatternsValidator {
            node: compile_validators(schema, context)?,
            patterns,
        }))
    }
}
impl Validate for AdditionalPropertiesWithPatternsValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter().all(|(property, value)| {
                let mut has_match = false;
                for (re, node) in &self.patterns {
                    if re.is_match(property) {
                        has_match = true;
                        if !node.is_valid(value) {
                            return false;
                        }
                    }
                }
                has_match || self.node.is_valid(value)
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (property, value) in item.iter() {
                instance_path.push(property.clone());
                let mut has_match = false;
                for (re, node) in &self.patterns {
                    if re.is_match(property) {
                        has_match = true;
                        errors.extend(node.validate(value, instance_path));
                    }
                }
                if !has_match {
                    errors.extend(self.node.validate(value, instance_path));
                }
                instance_path.pop();
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl core::fmt::Display for AdditionalPropertiesWithPatternsValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: {}", self.node)
    }
}

/// `additionalProperties: false` alongside `patternProperties` (no `properties`).
pub(crate) struct AdditionalPropertiesWithPatternsFalseValidator {
    patterns: PatternedValidators,
    schema_path: JSONPointer,
}
impl AdditionalPropertiesWithPatternsFalseValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        patterns: PatternedValidators,
        schema_path: JSONPointer,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesWithPatternsFalseValidator { patterns, schema_path }))
    }
}
impl Validate for AdditionalPropertiesWithPatternsFalseValidator {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter().all(|(property, value)| {
                let mut has_match = false;
                for (re, node) in &self.patterns {
                    if re.is_match(property) {
                        has_match = true;
                        if !node.is_valid(value) {
                            return false;
                        }
                    }
                }
                has_match
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (property, value) in item {
                instance_path.push(property.clone());
                let mut has_match = false;
                for (re, node) in &self.patterns {
                    if re.is_match(property) {
                        has_match = true;
                        errors.extend(node.validate(value, instance_path));
                    }
                }
                instance_path.pop();
                if !has_match {
                    errors.push(ValidationError::additional_properties(
                        instance_path.into(),
                        self.schema_path.clone(),
                        instance,
                        property.clone(),
                    ));
                }
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl core::fmt::Display for AdditionalPropertiesWithPatternsFalseValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: false")
    }
}

/// `additionalProperties: {<schema>}` alongside both `properties` and `patternProperties`.
pub(crate) struct AdditionalPropertiesWithPatternsNotEmptyValidator<M: PropertiesValidatorsMap> {
    node: SchemaNode,
    properties: M,
    patterns: PatternedValidators,
}
impl AdditionalPropertiesWithPatternsNotEmptyValidator<SmallValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        schema: &'a Value,
        patterns: PatternedValidators,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesWithPatternsNotEmptyValidator {
            node: compile_validators(schema, context)?,
            properties: compile_small_map(map, context)?,
            patterns,
        }))
    }
}
impl AdditionalPropertiesWithPatternsNotEmptyValidator<BigValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        schema: &'a Value,
        patterns: PatternedValidators,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesWithPatternsNotEmptyValidator {
            node: compile_validators(schema, context)?,
            properties: compile_big_map(map, context)?,
            patterns,
        }))
    }
}
impl<M: PropertiesValidatorsMap> Validate for AdditionalPropertiesWithPatternsNotEmptyValidator<M> {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter().all(|(property, value)| {
                if let Some(node) = self.properties.get_node(property) {
                    if !node.is_valid(value) {
                        return false;
                    }
                    for (re, node) in &self.patterns {
                        if re.is_match(property) && !node.is_valid(value) {
                            return false;
                        }
                    }
                    true
                } else {
                    let mut has_match = false;
                    for (re, node) in &self.patterns {
                        if re.is_match(property) {
                            has_match = true;
                            if !node.is_valid(value) {
                                return false;
                            }
                        }
                    }
                    has_match || self.node.is_valid(value)
                }
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (property, value) in item.iter() {
                instance_path.push(property.clone());
                if let Some((_, node)) = self.properties.get_key_node(property) {
                    errors.extend(node.validate(value, instance_path));
                    for (re, node) in self.patterns.iter().filter(|(re, _)| re.is_match(property)) {
                        let _ = re;
                        errors.extend(node.validate(value, instance_path));
                    }
                } else {
                    let mut has_match = false;
                    for (re, node) in &self.patterns {
                        if re.is_match(property) {
                            has_match = true;
                            errors.extend(node.validate(value, instance_path));
                        }
                    }
                    if !has_match {
                        errors.extend(self.node.validate(value, instance_path));
                    }
                }
                instance_path.pop();
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl<M: PropertiesValidatorsMap> core::fmt::Display for AdditionalPropertiesWithPatternsNotEmptyValidator<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: {}", self.node)
    }
}

/// `additionalProperties: false` alongside both `properties` and `patternProperties`.
pub(crate) struct AdditionalPropertiesWithPatternsNotEmptyFalseValidator<M: PropertiesValidatorsMap> {
    properties: M,
    patterns: PatternedValidators,
    schema_path: JSONPointer,
}
impl AdditionalPropertiesWithPatternsNotEmptyFalseValidator<SmallValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        patterns: PatternedValidators,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesWithPatternsNotEmptyFalseValidator {
            properties: compile_small_map(map, context)?,
            patterns,
            schema_path: context.schema_path().clone(),
        }))
    }
}
impl AdditionalPropertiesWithPatternsNotEmptyFalseValidator<BigValidatorsMap> {
    #[inline]
    pub(crate) fn compile<'a>(
        map: &'a Map<String, Value>,
        patterns: PatternedValidators,
        context: &CompilationContext,
    ) -> CompilationResult<'a> {
        Ok(Box::new(AdditionalPropertiesWithPatternsNotEmptyFalseValidator {
            properties: compile_big_map(map, context)?,
            patterns,
            schema_path: context.schema_path().clone(),
        }))
    }
}
impl<M: PropertiesValidatorsMap> Validate for AdditionalPropertiesWithPatternsNotEmptyFalseValidator<M> {
    fn is_valid(&self, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter().all(|(property, value)| {
                if let Some(node) = self.properties.get_node(property) {
                    if !node.is_valid(value) {
                        return false;
                    }
                    for (re, node) in &self.patterns {
                        if re.is_match(property) && !node.is_valid(value) {
                            return false;
                        }
                    }
                    true
                } else {
                    let mut has_match = false;
                    for (re, node) in &self.patterns {
                        if re.is_match(property) {
                            has_match = true;
                            if !node.is_valid(value) {
                                return false;
                            }
                        }
                    }
                    has_match
                }
            })
        } else {
            true
        }
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let mut errors = vec![];
            for (property, value) in item.iter() {
                instance_path.push(property.clone());
                if let Some((_, node)) = self.properties.get_key_node(property) {
                    errors.extend(node.validate(value, instance_path));
                    for (re, node) in self.patterns.iter().filter(|(re, _)| re.is_match(property)) {
                        let _ = re;
                        errors.extend(node.validate(value, instance_path));
                    }
                    instance_path.pop();
                } else {
                    let mut has_match = false;
                    for (re, node) in &self.patterns {
                        if re.is_match(property) {
                            has_match = true;
                            errors.extend(node.validate(value, instance_path));
                        }
                    }
                    instance_path.pop();
                    if !has_match {
                        errors.push(ValidationError::additional_properties(
                            instance_path.into(),
                            self.schema_path.clone(),
                            instance,
                            property.clone(),
                        ));
                    }
                }
            }
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }
}
impl<M: PropertiesValidatorsMap> core::fmt::Display for AdditionalPropertiesWithPatternsNotEmptyFalseValidator<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "additionalProperties: false")
    }
}

#[inline]
pub(crate) fn compile<'a>(
    parent: &'a Map<String, Value>,
    schema: &'a Value,
    context: &CompilationContext,
) -> Option<CompilationResult<'a>> {
    let keyword_context = context.with_path("additionalProperties");
    let properties = parent.get("properties");
    if let Some(patterns) = parent.get("patternProperties") {
        if let Value::Object(obj) = patterns {
            let compiled_patterns = match compile_patterns(obj, &context.with_path("patternProperties")) {
                Ok(patterns) => patterns,
                Err(e) => return Some(Err(e)),
            };
            match schema {
                Value::Bool(true) => None,
                Value::Bool(false) => {
                    if let Some(properties) = properties {
                        dynamic_map!(
                            AdditionalPropertiesWithPatternsNotEmptyFalseValidator,
                            properties,
                            keyword_context,
                            compiled_patterns,
                        )
                    } else {
                        Some(AdditionalPropertiesWithPatternsFalseValidator::compile(
                            compiled_patterns,
                            keyword_context.into_pointer(),
                        ))
                    }
                }
                _ => {
                    if let Some(properties) = properties {
                        dynamic_map!(
                            AdditionalPropertiesWithPatternsNotEmptyValidator,
                            properties,
                            keyword_context,
                            schema,
                            compiled_patterns,
                        )
                    } else {
                        Some(AdditionalPropertiesWithPatternsValidator::compile(
                            schema,
                            compiled_patterns,
                            &keyword_context,
                        ))
                    }
                }
            }
        } else {
            Some(Err(CompilationError::new(context.schema_path().clone(), "patternProperties must be an object").into()))
        }
    } else {
        match schema {
            Value::Bool(true) => None,
            Value::Bool(false) => {
                if let Some(properties) = properties {
                    dynamic_map!(AdditionalPropertiesNotEmptyFalseValidator, properties, keyword_context,)
                } else {
                    Some(AdditionalPropertiesFalseValidator::compile(keyword_context.into_pointer()))
                }
            }
            _ => {
                if let Some(properties) = properties {
                    dynamic_map!(AdditionalPropertiesNotEmptyValidator, properties, keyword_context, schema,)
                } else {
                    Some(AdditionalPropertiesValidator::compile(schema, &keyword_context))
                }
            }
        }
    }
}

/// Compile a pattern/sub-schema pair for each key of `patternProperties`.
#[inline]
fn compile_patterns<'a>(
    obj: &'a Map<String, Value>,
    context: &CompilationContext,
) -> Result<PatternedValidators, ValidationError<'a>> {
    let mut compiled_patterns = Vec::with_capacity(obj.len());
    for (pattern, subschema) in obj {
        let compiled_pattern = Regex::new(pattern)
            .map_err(|e| CompilationError::new(context.schema_path().clone(), e.to_string()))?;
        let pattern_context = context.with_path(pattern.as_str());
        let node = compile_validators(subschema, &pattern_context)?;
        compiled_patterns.push((compiled_pattern, node));
    }
    Ok(compiled_patterns)
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    fn schema_1() -> Value {
        // `AdditionalPropertiesWithPatternsNotEmptyFalseValidator`
        json!({
            "additionalProperties": false,
            "properties": {
                "foo": {"type": "string"},
                "barbaz": {"type": "integer", "multipleOf": 3},
            },
            "patternProperties": {
                "^bar": {"type": "integer", "minimum": 5},
                "spam$": {"type": "integer", "maximum": 10},
            }
        })
    }

    #[test_case(&json!([1]))]
    #[test_case(&json!({}))]
    #[test_case(&json!({"foo": "a"}))]
    #[test_case(&json!({"barbaz": 6}))]
    #[test_case(&json!({"bar": 6}))]
    #[test_case(&json!({"spam": 7}))]
    #[test_case(&json!({"bar": 6, "spam": 7}))]
    #[test_case(&json!({"barspam": 7}))]
    #[test_case(&json!({"barspam": 7, "bar": 6, "spam": 7, "foo": "a", "barbaz": 6}))]
    fn schema_1_valid(instance: &Value) {
        tests_util::is_valid(&schema_1(), instance)
    }

    #[test_case(&json!({"foo": 3}))]
    #[test_case(&json!({"faz": 1}))]
    #[test_case(&json!({"foo": 3, "bar": 4}))]
    fn schema_1_invalid(instance: &Value) {
        tests_util::is_not_valid(&schema_1(), instance)
    }

    fn schema_3() -> Value {
        // `AdditionalPropertiesNotEmptyFalseValidator`
        json!({
            "additionalProperties": false,
            "properties": {"foo": {"type": "string"}}
        })
    }

    #[test_case(&json!([1]))]
    #[test_case(&json!({}))]
    #[test_case(&json!({"foo": "a"}))]
    fn schema_3_valid(instance: &Value) {
        tests_util::is_valid(&schema_3(), instance)
    }

    #[test_case(&json!({"foo": 3}))]
    #[test_case(&json!({"faz": "a"}))]
    fn schema_3_invalid(instance: &Value) {
        tests_util::is_not_valid(&schema_3(), instance)
    }

    fn schema_4() -> Value {
        // `AdditionalPropertiesNotEmptyValidator`
        json!({
            "additionalProperties": {"type": "integer"},
            "properties": {"foo": {"type": "string"}}
        })
    }

    #[test_case(&json!({}))]
    #[test_case(&json!({"foo": "a"}))]
    #[test_case(&json!({"bar": 4}))]
    #[test_case(&json!({"foo": "a", "bar": 4}))]
    fn schema_4_valid(instance: &Value) {
        tests_util::is_valid(&schema_4(), instance)
    }

    #[test_case(&json!({"foo": 3}))]
    #[test_case(&json!({"bar": "a"}))]
    fn schema_4_invalid(instance: &Value) {
        tests_util::is_not_valid(&schema_4(), instance)
    }
}
