//! Boolean coercion

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::rule::Rule;
use crate::value::Value;
use async_trait::async_trait;

/// Accepts booleans and the exact strings `"true"` / `"false"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoerceBoolean;

#[async_trait]
impl Rule for CoerceBoolean {
    fn name(&self) -> &str {
        "to_boolean"
    }

    async fn apply(&self, value: Value, _ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        match &value {
            Value::Bool(_) => Ok(value),
            Value::String(s) if s == "true" => Ok(Value::Bool(true)),
            Value::String(s) if s == "false" => Ok(Value::Bool(false)),
            other => Err(ValidateError::type_mismatch("boolean", other.kind())),
        }
    }
}

/// Creates a [`CoerceBoolean`] rule.
#[must_use]
pub fn to_boolean() -> CoerceBoolean {
    CoerceBoolean
}
