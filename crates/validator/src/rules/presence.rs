//! Optional and nullable wrappers

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::executor::run_chain;
use crate::rule::{Rule, RuleRef};
use crate::value::Value;
use async_trait::async_trait;

/// Passes `undefined` through untouched; anything else runs the inner chain.
///
/// Inside [`is_object`](crate::rules::is_object) a field that stays
/// `undefined` is left out of the result.
#[derive(Clone)]
pub struct Optional {
    rules: Vec<RuleRef>,
}

#[async_trait]
impl Rule for Optional {
    fn name(&self) -> &str {
        "optional"
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        if value.is_undefined() {
            return Ok(value);
        }
        run_chain(value, &self.rules, ctx).await
    }
}

/// Passes `null` through untouched; anything else runs the inner chain.
#[derive(Clone)]
pub struct Nullable {
    rules: Vec<RuleRef>,
}

#[async_trait]
impl Rule for Nullable {
    fn name(&self) -> &str {
        "nullable"
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        if value.is_null() {
            return Ok(value);
        }
        run_chain(value, &self.rules, ctx).await
    }
}

/// Creates an [`Optional`] wrapper.
#[must_use]
pub fn optional(rules: Vec<RuleRef>) -> Optional {
    Optional { rules }
}

/// Creates a [`Nullable`] wrapper.
#[must_use]
pub fn nullable(rules: Vec<RuleRef>) -> Nullable {
    Nullable { rules }
}
