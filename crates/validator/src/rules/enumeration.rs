//! Enum membership
//!
//! An [`EnumDescriptor`] is built from an enum-like mapping of member names
//! to literal values. Validation compares against the *values* only, with
//! strict equality: a numeric enum accepts `0` but not the member name
//! `"SOMETHING"`, and never matches case-insensitively.

use crate::context::RuleContext;
use crate::error::{DefinitionError, ValidateError};
use crate::rule::Rule;
use crate::rules::string::render_number;
use crate::value::{Object, Value};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A permitted enum value.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    Number(f64),
    String(String),
}

impl EnumValue {
    fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Number(a), Value::Number(b)) => a == b,
            (Self::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// The permitted values of an enum-like mapping.
///
/// # Examples
///
/// ```rust
/// use dtokit_validator::rules::EnumDescriptor;
/// use dtokit_validator::Value;
///
/// let mixed = EnumDescriptor::new([
///     ("SOMETHING", Value::from(0)),
///     ("OTHER", Value::from("other-value")),
/// ])
/// .unwrap();
///
/// assert!(mixed.contains(&Value::from(0)));
/// assert!(mixed.contains(&Value::from("other-value")));
/// assert!(!mixed.contains(&Value::from("OTHER")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    members: Vec<(String, EnumValue)>,
}

impl EnumDescriptor {
    /// Builds a descriptor from `(name, value)` pairs.
    ///
    /// Values must be numbers or strings. Reverse entries of numeric members
    /// (`"0" -> "SOMETHING"` next to `"SOMETHING" -> 0`) are skipped, so
    /// mappings shaped like compiled TypeScript enums work as is.
    pub fn new<K, V, I>(entries: I) -> Result<Self, DefinitionError>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut members = Vec::with_capacity(entries.len());
        for (name, value) in &entries {
            if is_reverse_entry(name, value, &entries) {
                continue;
            }
            let member = match value {
                Value::Number(n) => EnumValue::Number(*n),
                Value::String(s) => EnumValue::String(s.clone()),
                other => {
                    return Err(DefinitionError::UnsupportedEnumMember {
                        name: name.clone(),
                        kind: other.kind(),
                    });
                }
            };
            members.push((name.clone(), member));
        }

        if members.is_empty() {
            return Err(DefinitionError::EmptyEnum);
        }
        Ok(Self { members })
    }

    /// Builds a descriptor from an object value.
    pub fn from_object(object: &Object) -> Result<Self, DefinitionError> {
        Self::new(object.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Builds a descriptor from a JSON object.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, DefinitionError> {
        match Value::from(json.clone()) {
            Value::Object(object) => Self::from_object(&object),
            other => Err(DefinitionError::EnumNotObject { kind: other.kind() }),
        }
    }

    /// Strict membership test.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.iter().any(|(_, member)| member.matches(value))
    }

    /// Member names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(name, _)| name.as_str())
    }

    /// Permitted values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &EnumValue> {
        self.members.iter().map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn allowed(&self) -> String {
        self.values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// A reverse entry is keyed by the canonical text of the target's number
// ("1", never "1.0" or "01").
fn is_reverse_entry(name: &str, value: &Value, entries: &[(String, Value)]) -> bool {
    let Value::String(target) = value else {
        return false;
    };
    entries.iter().any(|(k, v)| match v {
        Value::Number(n) if k == target => render_number(*n) == name,
        _ => false,
    })
}

// ============================================================================
// RULE
// ============================================================================

/// Accepts values that are members of an [`EnumDescriptor`].
#[derive(Debug, Clone)]
pub struct EnumMember {
    descriptor: Arc<EnumDescriptor>,
}

impl EnumMember {
    #[must_use]
    pub fn descriptor(&self) -> &EnumDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl Rule for EnumMember {
    fn name(&self) -> &str {
        "to_enum"
    }

    async fn apply(&self, value: Value, _ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        if self.descriptor.contains(&value) {
            Ok(value)
        } else {
            Err(ValidateError::not_in_enum(self.descriptor.allowed())
                .with_param("actual", value.kind().as_str()))
        }
    }
}

/// Creates an [`EnumMember`] rule.
pub fn to_enum(descriptor: impl Into<Arc<EnumDescriptor>>) -> EnumMember {
    EnumMember {
        descriptor: descriptor.into(),
    }
}
