//! String coercion

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::rule::Rule;
use crate::value::Value;
use async_trait::async_trait;

/// Coerces primitives to a string.
///
/// | input | output |
/// |---|---|
/// | string | unchanged |
/// | finite number | shortest round-trip decimal (`1`, `0.5`, `-3`; `-0` becomes `0`) |
/// | boolean | `"true"` / `"false"` |
/// | anything else | `type_mismatch` |
///
/// Decimals, dates, symbols, arrays, objects, `null` and `undefined` are
/// rejected rather than stringified.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoerceString;

#[async_trait]
impl Rule for CoerceString {
    fn name(&self) -> &str {
        "to_string"
    }

    async fn apply(&self, value: Value, _ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        coerce(value)
    }
}

fn coerce(value: Value) -> Result<Value, ValidateError> {
    match value {
        Value::String(_) => Ok(value),
        Value::Number(n) if n.is_finite() => Ok(Value::String(render_number(n))),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(ValidateError::type_mismatch("string", other.kind())),
    }
}

/// Shortest round-trip text of a number, with `-0` written as `0`.
pub(crate) fn render_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

/// Creates a [`CoerceString`] rule.
#[must_use]
pub fn to_string() -> CoerceString {
    CoerceString
}
