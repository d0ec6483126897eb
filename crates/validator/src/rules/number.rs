//! Number coercion

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::rule::Rule;
use crate::value::Value;
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;

/// Coerces to a finite number.
///
/// | input | output |
/// |---|---|
/// | finite number | unchanged |
/// | string | parsed after trimming; must be a finite decimal/float literal |
/// | decimal | nearest `f64` |
/// | anything else | `type_mismatch` |
#[derive(Debug, Clone, Copy, Default)]
pub struct CoerceNumber;

#[async_trait]
impl Rule for CoerceNumber {
    fn name(&self) -> &str {
        "to_number"
    }

    async fn apply(&self, value: Value, _ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        coerce(value)
    }
}

fn coerce(value: Value) -> Result<Value, ValidateError> {
    let number = match &value {
        Value::Number(n) => Some(*n),
        Value::String(s) => parse(s),
        Value::Decimal(d) => d.to_f64(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(Value::Number(n)),
        _ => Err(ValidateError::type_mismatch("number", value.kind())),
    }
}

fn parse(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    // `f64::from_str` also accepts "inf" and "NaN"; only digits-based
    // literals count as numbers here.
    if trimmed.is_empty() || !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Creates a [`CoerceNumber`] rule.
#[must_use]
pub fn to_number() -> CoerceNumber {
    CoerceNumber
}
