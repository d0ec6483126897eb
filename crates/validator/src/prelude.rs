//! Prelude module for convenient imports.
//!
//! `use dtokit_validator::prelude::*;` brings in the core types, the
//! built-in rule factories and the [`rules!`](crate::rules!) macro.

// ============================================================================
// CORE: values, errors, rules, classes
// ============================================================================

pub use crate::{
    ClassDescriptor, ClassId, ClassRegistry, DefinitionError, FieldFailurePolicy, Object,
    PostCheck, Rule, RuleContext, RuleRef, ValidateError, Validator, ValidatorConfig, Value,
    ValueKind, register_class, validate_value, validate_value_async,
};

// ============================================================================
// RULES: built-in factories
// ============================================================================

pub use crate::rules::{
    EnumDescriptor, custom, custom_async, is_array, is_object, nullable, optional, to_boolean,
    to_enum, to_number, to_string,
};

pub use crate::rules;
