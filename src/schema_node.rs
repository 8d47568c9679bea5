//! The compiled representation of one schema (sub)document: a flat list of keyword
//! validators, plus the recursion-depth guard that every compiled node passes
//! through on the `validate` path. `$ref` resolution and array `items` both wrap a
//! nested schema as a `SchemaNode` rather than a raw `Validators` list, so that the
//! depth guard applies uniformly no matter how the node was reached.
use crate::{
    compilation::context::CompilationContext,
    error::{ErrorIterator, ValidationError},
    paths::{InstancePath, JSONPointer},
    validator::{format_validators, BoxedValidator, Validate, Validators},
};
use serde_json::Value;
use std::fmt;

pub(crate) struct SchemaNode {
    validators: Validators,
    schema_path: JSONPointer,
}

impl SchemaNode {
    pub(crate) fn new_from_keywords(context: &CompilationContext, validators: Validators) -> Self {
        SchemaNode {
            validators,
            schema_path: context.schema_path().clone(),
        }
    }

    pub(crate) fn new_from_boolean(
        context: &CompilationContext,
        validator: Option<BoxedValidator>,
    ) -> Self {
        SchemaNode {
            validators: validator.into_iter().collect(),
            schema_path: context.schema_path().clone(),
        }
    }

    pub(crate) fn validators(&self) -> &Validators {
        &self.validators
    }
}

impl Validate for SchemaNode {
    fn is_valid(&self, instance: &Value) -> bool {
        self.validators
            .iter()
            .all(|validator| validator.is_valid(instance))
    }

    fn validate<'a>(&self, instance: &'a Value, instance_path: &InstancePath) -> ErrorIterator<'a> {
        if !instance_path.try_enter() {
            return Box::new(std::iter::once(ValidationError::depth_exceeded(
                instance_path.into(),
                self.schema_path.clone(),
                instance,
                instance_path.max_depth(),
            )));
        }
        let errors: Vec<_> = self
            .validators
            .iter()
            .flat_map(|validator| validator.validate(instance, instance_path))
            .collect();
        instance_path.leave();
        Box::new(errors.into_iter())
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_validators(&self.validators))
    }
}
