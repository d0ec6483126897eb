//! Error types
//!
//! [`ValidateError`] is the single failure kind raised while validating a
//! value: coercion failures, enum membership, missing class registrations and
//! post-check rejections all surface through it. It carries a stable `code`
//! for programmatic handling, a human-readable `message`, the path of the
//! failing field and any nested causes.
//!
//! [`DefinitionError`] covers mistakes made while *declaring* classes and enum
//! descriptors. Those are caught before any validation traffic runs.

use crate::context::{FieldPath, PathSegment};
use crate::value::ValueKind;
use std::borrow::Cow;
use std::fmt;

/// Error codes produced by the built-in rules.
pub mod codes {
    pub const TYPE_MISMATCH: &str = "type_mismatch";
    pub const NOT_IN_ENUM: &str = "not_in_enum";
    pub const UNREGISTERED_CLASS: &str = "unregistered_class";
    pub const OBJECT_INVALID: &str = "object_invalid";
    pub const ARRAY_INVALID: &str = "array_invalid";
    pub const MAX_DEPTH_EXCEEDED: &str = "max_depth_exceeded";
    pub const CUSTOM: &str = "custom";
}

// ============================================================================
// VALIDATE ERROR
// ============================================================================

/// A structured validation failure.
///
/// # Examples
///
/// ```rust
/// use dtokit_validator::ValidateError;
///
/// let error = ValidateError::custom("name is reserved")
///     .at_key("name")
///     .at_key("owner");
///
/// assert_eq!(error.path.to_string(), "owner.name");
/// assert_eq!(error.to_string(), "[owner.name] custom: name is reserved");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateError {
    /// Error code, e.g. `type_mismatch`.
    pub code: Cow<'static, str>,

    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Where the failure happened. Empty for the root value.
    pub path: FieldPath,

    /// Template parameters (`expected`, `actual`, ...).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Causes, populated by aggregate object/array failures.
    pub nested: Vec<ValidateError>,
}

impl ValidateError {
    /// Creates an error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: FieldPath::root(),
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the nested causes.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidateError>) -> Self {
        self.nested = errors;
        self
    }

    /// Sets the full path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: FieldPath) -> Self {
        self.path = path;
        self
    }

    /// Prefixes the path with an object key.
    ///
    /// Called while the error travels up through enclosing objects, so the
    /// innermost key is added first.
    #[must_use = "builder methods must be chained or built"]
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path.prepend(PathSegment::Key(key.into()));
        self
    }

    /// Prefixes the path with an array index.
    #[must_use = "builder methods must be chained or built"]
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.prepend(PathSegment::Index(index));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Rendered field path, `None` at the root.
    #[must_use]
    pub fn field(&self) -> Option<String> {
        (!self.path.is_root()).then(|| self.path.to_string())
    }

    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Number of errors including nested ones.
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(ValidateError::total_error_count)
            .sum::<usize>()
    }

    /// Flattens the error tree depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidateError> {
        let mut result = vec![self];
        for nested in &self.nested {
            result.extend(nested.flatten());
        }
        result
    }

    /// JSON rendering for API responses and logs.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "field": self.field(),
            "params": params,
            "nested": self.nested.iter().map(ValidateError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}: {}", self.code, self.message)?;
        } else {
            write!(f, "[{}] {}: {}", self.path, self.code, self.message)?;
        }

        if !self.nested.is_empty() {
            write!(f, "\n  Nested errors:")?;
            for (i, error) in self.nested.iter().enumerate() {
                write!(f, "\n    {}. {}", i + 1, error)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidateError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidateError {
    /// The value has the wrong shape for the rule.
    pub fn type_mismatch(expected: &'static str, actual: ValueKind) -> Self {
        Self::new(
            codes::TYPE_MISMATCH,
            format!("Expected {expected}, got {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual.as_str())
    }

    /// The value is not one of the permitted enum members.
    pub fn not_in_enum(allowed: impl Into<Cow<'static, str>>) -> Self {
        Self::new(codes::NOT_IN_ENUM, "Value is not a member of the enum")
            .with_param("allowed", allowed)
    }

    /// `is_object` was pointed at a class with no registration.
    pub fn unregistered_class(class: impl Into<Cow<'static, str>>) -> Self {
        let class = class.into();
        Self::new(
            codes::UNREGISTERED_CLASS,
            format!("Class '{class}' has no validator registration"),
        )
        .with_param("class", class)
    }

    /// Nesting went deeper than the configured limit.
    pub fn max_depth_exceeded(max_depth: usize) -> Self {
        Self::new(
            codes::MAX_DEPTH_EXCEEDED,
            format!("Nesting exceeds the maximum depth of {max_depth}"),
        )
        .with_param("max_depth", max_depth.to_string())
    }

    /// Aggregate of per-field failures.
    pub fn object_invalid(class: impl Into<Cow<'static, str>>, errors: Vec<ValidateError>) -> Self {
        let class = class.into();
        Self::new(
            codes::OBJECT_INVALID,
            format!("{} field(s) of '{class}' failed validation", errors.len()),
        )
        .with_param("class", class)
        .with_nested(errors)
    }

    /// Aggregate of per-element failures.
    pub fn array_invalid(errors: Vec<ValidateError>) -> Self {
        Self::new(
            codes::ARRAY_INVALID,
            format!("{} element(s) failed validation", errors.len()),
        )
        .with_nested(errors)
    }

    /// A caller-defined failure, typically raised by a post-check hook.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(codes::CUSTOM, message)
    }
}

// ============================================================================
// DEFINITION ERROR
// ============================================================================

/// Errors raised while declaring classes or enum descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// The class already has a registration.
    #[error("class '{0}' is already registered")]
    DuplicateClass(String),

    /// A field was declared twice on the same class.
    #[error("field '{field}' is declared more than once on class '{class}'")]
    DuplicateField { class: String, field: String },

    /// More than one post-check hook was attached to a class.
    #[error("class '{0}' already has a post-check hook")]
    DuplicatePostCheck(String),

    /// An enum mapping had no usable members.
    #[error("enum descriptor has no members")]
    EmptyEnum,

    /// An enum mapping was not a keyed structure.
    #[error("enum mapping must be an object, got '{kind}'")]
    EnumNotObject { kind: ValueKind },

    /// An enum member value was neither a number nor a string.
    #[error("enum member '{name}' has unsupported value kind '{kind}'")]
    UnsupportedEnumMember { name: String, kind: ValueKind },

    /// The class identifier was empty.
    #[error("class identifier must not be empty")]
    EmptyClassId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidateError::new("test", "Test error");
        assert_eq!(error.code, "test");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_path_is_built_inside_out() {
        let error = ValidateError::custom("bad").at_index(3).at_key("items");
        assert_eq!(error.field().as_deref(), Some("items[3]"));
    }

    #[test]
    fn test_with_path_replaces_and_at_key_extends() {
        let path = FieldPath::root().key("items").index(1);
        let error = ValidateError::custom("bad").at_key("stale").with_path(path);
        assert_eq!(error.field().as_deref(), Some("items[1]"));
        assert_eq!(error.at_key("order").field().as_deref(), Some("order.items[1]"));
    }

    #[test]
    fn test_enum_not_object_display() {
        let error = DefinitionError::EnumNotObject { kind: ValueKind::Array };
        assert_eq!(error.to_string(), "enum mapping must be an object, got 'array'");
    }

    #[test]
    fn test_type_mismatch_params() {
        let error = ValidateError::type_mismatch("object", ValueKind::String);
        assert_eq!(error.code, codes::TYPE_MISMATCH);
        assert_eq!(error.param("expected"), Some("object"));
        assert_eq!(error.param("actual"), Some("string"));
    }

    #[test]
    fn test_nested_counts_and_flatten() {
        let error = ValidateError::object_invalid(
            "UserDto",
            vec![
                ValidateError::custom("a").at_key("name"),
                ValidateError::array_invalid(vec![ValidateError::custom("b").at_index(0)])
                    .at_key("tags"),
            ],
        );

        assert_eq!(error.total_error_count(), 4);
        assert_eq!(error.flatten().len(), 4);
        assert!(error.has_nested());
    }

    #[test]
    fn test_display_with_nested() {
        let error = ValidateError::object_invalid(
            "UserDto",
            vec![ValidateError::custom("too short").at_key("name")],
        );
        let display = error.to_string();
        assert!(display.starts_with("object_invalid: 1 field(s) of 'UserDto'"));
        assert!(display.contains("1. [name] custom: too short"));
    }

    #[test]
    fn test_json_rendering() {
        let error = ValidateError::not_in_enum("0, 1").at_key("status");
        let json = error.to_json_value();
        assert_eq!(json["code"], "not_in_enum");
        assert_eq!(json["field"], "status");
        assert_eq!(json["params"]["allowed"], "0, 1");
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidateError::custom("static message");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_definition_error_display() {
        let error = DefinitionError::DuplicateField {
            class: "UserDto".into(),
            field: "name".into(),
        };
        assert_eq!(
            error.to_string(),
            "field 'name' is declared more than once on class 'UserDto'"
        );
    }
}
