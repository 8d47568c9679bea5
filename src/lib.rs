//! # draft4-validator
//!
//! A validator for JSON Schema draft-04. It is fast because a schema is compiled once
//! into a tree of validator objects, which removes the cost of re-inspecting keyword
//! shapes on every call.
//!
//! ## Usage
//! ```rust
//! use draft4_validator::JSONSchema;
//! use serde_json::json;
//!
//! let schema = json!({"maxLength": 5});
//! let compiled = JSONSchema::compile(&schema).expect("a valid schema");
//! assert!(compiled.is_valid(&json!("foo")));
//! assert!(!compiled.is_valid(&json!("too long")));
//! ```
//!
//! Custom compile-time settings go through the builder:
//! ```rust
//! use draft4_validator::JSONSchema;
//! use serde_json::json;
//!
//! let schema = json!({"type": "integer"});
//! let compiled = JSONSchema::options()
//!     .with_apply_defaults(true)
//!     .compile(&schema)
//!     .expect("a valid schema");
//! if let Err(errors) = compiled.validate(&json!("not an integer")) {
//!     for error in errors {
//!         println!("Validation error: {}", error);
//!     }
//! }
//! ```
#![warn(
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unreachable_pub
)]
#![allow(clippy::unnecessary_wraps, clippy::upper_case_acronyms)]
mod compilation;
pub mod error;
mod keywords;
mod paths;
pub mod primitive_type;
mod resolver;
mod schema_node;
mod schemas;
mod validator;

pub use compilation::{options::CompilationOptions, JSONSchema};
pub use error::{CompilationError, ErrorIterator, RefError, ValidationError};
pub use resolver::SchemaResolver;
pub use schemas::Draft;

use serde_json::Value;

/// A shortcut for validating `instance` against `schema`, both given as JSON text.
/// Parses both inputs, compiles the schema, and runs validation.
///
/// ```rust
/// use draft4_validator::validate_str;
///
/// assert!(validate_str(r#"{"maxLength": 5}"#, r#""foo""#).is_ok());
/// assert!(validate_str(r#"{"maxLength": 5}"#, r#""too long""#).is_err());
/// ```
pub fn validate_str(schema_text: &str, instance_text: &str) -> Result<(), String> {
    let schema: Value = serde_json::from_str(schema_text).map_err(|e| e.to_string())?;
    let instance: Value = serde_json::from_str(instance_text).map_err(|e| e.to_string())?;
    let compiled = JSONSchema::compile(&schema).map_err(|e| e.to_string())?;
    compiled
        .validate(&instance)
        .map_err(|errors| errors.map(|e| e.to_string()).collect::<Vec<_>>().join("; "))
}

/// A shortcut for validating `instance` against `schema` without keeping the compiled
/// schema around. Panics if `schema` does not compile.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = JSONSchema::compile(schema).expect("Invalid schema");
    compiled.is_valid(instance)
}

#[cfg(test)]
pub(crate) mod tests_util {
    use super::JSONSchema;
    use crate::paths::JSONPointer;
    use serde_json::Value;

    pub(crate) fn is_not_valid(schema: &Value, instance: &Value) {
        let compiled = JSONSchema::compile(schema).unwrap();
        assert!(!compiled.is_valid(instance), "{} should not be valid (via is_valid)", instance);
        assert!(compiled.validate(instance).is_err(), "{} should not be valid (via validate)", instance);
    }

    pub(crate) fn is_valid(schema: &Value, instance: &Value) {
        let compiled = JSONSchema::compile(schema).unwrap();
        assert!(compiled.is_valid(instance), "{} should be valid (via is_valid)", instance);
        assert!(compiled.validate(instance).is_ok(), "{} should be valid (via validate)", instance);
    }

    pub(crate) fn assert_schema_path(schema: &Value, instance: &Value, expected: &str) {
        let compiled = JSONSchema::compile(schema).unwrap();
        let result = compiled.validate(instance);
        let errors: Vec<_> = result.expect_err("should have failed").collect();
        assert_eq!(errors[0].schema_path.to_string(), expected);
    }

    pub(crate) fn assert_pointer(path: &JSONPointer, expected: &[&str]) {
        assert_eq!(path.clone().into_vec(), expected);
    }
}
