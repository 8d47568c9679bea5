//! Error types returned by schema compilation and instance validation.
use crate::{
    paths::JSONPointer,
    primitive_type::{PrimitiveType, PrimitiveTypesBitMap},
};
use serde_json::Value;
use std::{
    borrow::Cow,
    error, fmt,
    iter::{empty, once},
};

/// An error raised while compiling a schema: the schema document itself does not
/// conform to draft-04's own shape requirements (not its meta-schema - just the parts
/// this crate needs to interpret, e.g. `required` must be an array of strings).
#[derive(Debug, PartialEq, Eq)]
pub struct CompilationError {
    /// Pointer, within the schema document, to the offending keyword.
    pub path: JSONPointer,
    /// Human-readable reason the keyword was rejected.
    pub reason: String,
}

impl CompilationError {
    pub(crate) fn new(path: JSONPointer, reason: impl Into<String>) -> Self {
        CompilationError {
            path,
            reason: reason.into(),
        }
    }
}

impl error::Error for CompilationError {}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema error at '{}': {}", self.path, self.reason)
    }
}

impl From<regex::Error> for CompilationError {
    fn from(err: regex::Error) -> Self {
        CompilationError::new(JSONPointer::default(), err.to_string())
    }
}

impl From<url::ParseError> for CompilationError {
    fn from(err: url::ParseError) -> Self {
        CompilationError::new(JSONPointer::default(), err.to_string())
    }
}

/// An error produced while resolving a `$ref`.
#[derive(Debug)]
pub struct RefError {
    /// The `$ref` string that could not be resolved.
    pub reference: String,
    pub(crate) reason: String,
}

impl error::Error for RefError {}

impl fmt::Display for RefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not resolve reference '{}': {}", self.reference, self.reason)
    }
}

/// One violation found while validating an instance against a compiled schema.
#[derive(Debug)]
pub struct ValidationError<'a> {
    /// The offending value (the sub-instance the failing keyword was applied to).
    pub instance: Cow<'a, Value>,
    /// Pointer into the instance that was being validated.
    pub instance_path: JSONPointer,
    /// Pointer into the schema to the keyword that produced this error.
    pub schema_path: JSONPointer,
    /// The kind of failure.
    pub kind: ValidationErrorKind,
}

/// A (possibly empty) stream of validation errors for one `validate` call.
pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError<'a>> + Send + Sync + 'a>;

pub(crate) fn no_error<'a>() -> ErrorIterator<'a> {
    Box::new(empty())
}

pub(crate) fn error(err: ValidationError) -> ErrorIterator {
    Box::new(once(err))
}

/// The reason a `ValidationError` was produced.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    AdditionalItems { limit: usize },
    AdditionalProperties { property: String },
    AnyOf,
    Dependencies { property: String, missing: Vec<String> },
    Enum { options: Value },
    FalseSchema,
    Maximum { limit: f64 },
    ExclusiveMaximum { limit: f64 },
    Minimum { limit: f64 },
    ExclusiveMinimum { limit: f64 },
    MaxItems { limit: u64 },
    MinItems { limit: u64 },
    MaxLength { limit: u64 },
    MinLength { limit: u64 },
    MaxProperties { limit: u64 },
    MinProperties { limit: u64 },
    MultipleOf { multiple_of: f64 },
    Not { schema: Value },
    OneOfMultipleValid { matched: Vec<usize> },
    OneOfNotValid,
    Pattern { pattern: String },
    Required { property: String },
    Type { kind: TypeKind },
    UniqueItems,
    UnresolvableReference { reference: String },
    DepthExceeded { limit: usize },
    /// A schema failed to compile; carries the reason reported by `CompilationError`.
    Schema(String),
}

#[derive(Debug)]
#[allow(missing_docs)]
pub enum TypeKind {
    Single(PrimitiveType),
    Multiple(PrimitiveTypesBitMap),
}

impl<'a> ValidationError<'a> {
    pub(crate) fn into_owned(self) -> ValidationError<'static> {
        ValidationError {
            instance: Cow::Owned(self.instance.into_owned()),
            instance_path: self.instance_path,
            schema_path: self.schema_path,
            kind: self.kind,
        }
    }

    fn new(
        instance: &'a Value,
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        kind: ValidationErrorKind,
    ) -> Self {
        ValidationError {
            instance: Cow::Borrowed(instance),
            instance_path,
            schema_path,
            kind,
        }
    }

    pub(crate) fn additional_items(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: usize,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::AdditionalItems { limit })
    }
    pub(crate) fn additional_properties(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        property: String,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::AdditionalProperties { property },
        )
    }
    pub(crate) fn any_of(instance_path: JSONPointer, schema_path: JSONPointer, instance: &'a Value) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::AnyOf)
    }
    pub(crate) fn dependencies(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        property: String,
        missing: Vec<String>,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::Dependencies { property, missing },
        )
    }
    pub(crate) fn enumeration(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        options: &Value,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::Enum { options: options.clone() },
        )
    }
    pub(crate) fn false_schema(instance_path: JSONPointer, schema_path: JSONPointer, instance: &'a Value) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::FalseSchema)
    }
    pub(crate) fn maximum(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::Maximum { limit })
    }
    pub(crate) fn exclusive_maximum(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::ExclusiveMaximum { limit })
    }
    pub(crate) fn minimum(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::Minimum { limit })
    }
    pub(crate) fn exclusive_minimum(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: f64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::ExclusiveMinimum { limit })
    }
    pub(crate) fn max_items(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MaxItems { limit })
    }
    pub(crate) fn min_items(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MinItems { limit })
    }
    pub(crate) fn max_length(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MaxLength { limit })
    }
    pub(crate) fn min_length(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MinLength { limit })
    }
    pub(crate) fn max_properties(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MaxProperties { limit })
    }
    pub(crate) fn min_properties(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: u64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MinProperties { limit })
    }
    pub(crate) fn multiple_of(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        multiple_of: f64,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::MultipleOf { multiple_of })
    }
    pub(crate) fn not(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        schema: Value,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::Not { schema })
    }
    pub(crate) fn one_of_multiple_valid(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        matched: Vec<usize>,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::OneOfMultipleValid { matched },
        )
    }
    pub(crate) fn one_of_not_valid(instance_path: JSONPointer, schema_path: JSONPointer, instance: &'a Value) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::OneOfNotValid)
    }
    pub(crate) fn pattern(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        pattern: String,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::Pattern { pattern })
    }
    pub(crate) fn required(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        property: String,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::Required { property })
    }
    pub(crate) fn single_type_error(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        type_: PrimitiveType,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::Type { kind: TypeKind::Single(type_) },
        )
    }
    pub(crate) fn multiple_type_error(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        types: PrimitiveTypesBitMap,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::Type { kind: TypeKind::Multiple(types) },
        )
    }
    pub(crate) fn unique_items(instance_path: JSONPointer, schema_path: JSONPointer, instance: &'a Value) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::UniqueItems)
    }
    pub(crate) fn unresolvable_reference(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        reference: String,
    ) -> Self {
        Self::new(
            instance,
            instance_path,
            schema_path,
            ValidationErrorKind::UnresolvableReference { reference },
        )
    }
    pub(crate) fn depth_exceeded(
        instance_path: JSONPointer,
        schema_path: JSONPointer,
        instance: &'a Value,
        limit: usize,
    ) -> Self {
        Self::new(instance, instance_path, schema_path, ValidationErrorKind::DepthExceeded { limit })
    }
    pub(crate) fn schema(schema_path: JSONPointer, reason: impl Into<String>) -> Self {
        ValidationError {
            instance: Cow::Owned(Value::Null),
            instance_path: JSONPointer::default(),
            schema_path,
            kind: ValidationErrorKind::Schema(reason.into()),
        }
    }
}

impl From<CompilationError> for ValidationError<'_> {
    fn from(err: CompilationError) -> Self {
        ValidationError::schema(err.path, err.reason)
    }
}

impl error::Error for ValidationError<'_> {}

impl fmt::Display for ValidationError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::AdditionalItems { limit } => {
                let extras: Vec<&Value> = self.instance.as_array().expect("checked by caller").iter().skip(*limit).collect();
                let verb = if extras.len() == 1 { "was" } else { "were" };
                write!(
                    f,
                    "Additional items are not allowed ({} {} unexpected)",
                    extras.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", "),
                    verb
                )
            }
            ValidationErrorKind::AdditionalProperties { property } => {
                write!(f, "Additional property '{}' is not allowed", property)
            }
            ValidationErrorKind::AnyOf | ValidationErrorKind::OneOfNotValid => {
                write!(f, "'{}' is not valid under any of the given schemas", self.instance)
            }
            ValidationErrorKind::Dependencies { property, missing } => write!(
                f,
                "'{}' is present, but required propert{} {} missing",
                property,
                if missing.len() == 1 { "y" } else { "ies" },
                missing.join(", ")
            ),
            ValidationErrorKind::Enum { options } => write!(f, "'{}' is not one of '{}'", self.instance, options),
            ValidationErrorKind::FalseSchema => write!(f, "False schema does not allow '{}'", self.instance),
            ValidationErrorKind::Maximum { limit } => {
                write!(f, "{} is greater than the maximum of {}", self.instance, limit)
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => {
                write!(f, "{} is greater than or equal to the maximum of {}", self.instance, limit)
            }
            ValidationErrorKind::Minimum { limit } => {
                write!(f, "{} is less than the minimum of {}", self.instance, limit)
            }
            ValidationErrorKind::ExclusiveMinimum { limit } => {
                write!(f, "{} is less than or equal to the minimum of {}", self.instance, limit)
            }
            ValidationErrorKind::MaxItems { limit } => {
                write!(f, "{} has more than {} item{}", self.instance, limit, if *limit == 1 { "" } else { "s" })
            }
            ValidationErrorKind::MinItems { limit } => {
                write!(f, "{} has less than {} item{}", self.instance, limit, if *limit == 1 { "" } else { "s" })
            }
            ValidationErrorKind::MaxLength { limit } => write!(
                f,
                "'{}' is longer than {} character{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MinLength { limit } => write!(
                f,
                "'{}' is shorter than {} character{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MaxProperties { limit } => write!(
                f,
                "{} has more than {} propert{}",
                self.instance,
                limit,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MinProperties { limit } => write!(
                f,
                "{} has less than {} propert{}",
                self.instance,
                limit,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {}", self.instance, multiple_of)
            }
            ValidationErrorKind::Not { schema } => write!(f, "{} is not allowed for {}", schema, self.instance),
            ValidationErrorKind::OneOfMultipleValid { matched } => write!(
                f,
                "'{}' is valid under more than one of the given schemas (matched: {})",
                self.instance,
                matched.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
            ),
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "'{}' does not match '{}'", self.instance, pattern)
            }
            ValidationErrorKind::Required { property } => write!(f, "'{}' is a required property", property),
            ValidationErrorKind::Type { kind: TypeKind::Single(type_) } => {
                write!(f, "'{}' is not of type '{}'", self.instance, type_)
            }
            ValidationErrorKind::Type { kind: TypeKind::Multiple(types) } => write!(
                f,
                "'{}' is not of types {}",
                self.instance,
                types.into_iter().map(|t| format!("'{}'", t)).collect::<Vec<_>>().join(", ")
            ),
            ValidationErrorKind::UniqueItems => write!(f, "'{}' has non-unique elements", self.instance),
            ValidationErrorKind::UnresolvableReference { reference } => {
                write!(f, "Reference '{}' could not be resolved", reference)
            }
            ValidationErrorKind::DepthExceeded { limit } => {
                write!(f, "Validation recursion exceeded the depth limit of {}", limit)
            }
            ValidationErrorKind::Schema(reason) => {
                write!(f, "Schema error at '{}': {}", self.schema_path, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_type_error() {
        let instance = json!(42);
        let err = ValidationError::single_type_error(
            JSONPointer::default(),
            JSONPointer::default(),
            &instance,
            PrimitiveType::String,
        );
        assert_eq!(err.to_string(), "'42' is not of type 'string'");
    }

    #[test]
    fn multiple_types_error() {
        let instance = json!(42);
        let err = ValidationError::multiple_type_error(
            JSONPointer::default(),
            JSONPointer::default(),
            &instance,
            vec![PrimitiveType::String, PrimitiveType::Number].into(),
        );
        assert_eq!(err.to_string(), "'42' is not of types 'number', 'string'");
    }
}
