//! The rule abstraction
//!
//! A [`Rule`] takes one value and either returns a (possibly coerced) value
//! or fails with a [`ValidateError`]. Rules are composed into ordered chains;
//! each rule receives the previous rule's output.

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::value::Value;
use async_trait::async_trait;
use std::sync::Arc;

/// One step of a validation chain.
///
/// Rules may suspend, e.g. to consult an external service. The executor never
/// runs two rules of the same chain concurrently.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use dtokit_validator::{Rule, RuleContext, ValidateError, Value};
///
/// struct Trim;
///
/// #[async_trait]
/// impl Rule for Trim {
///     fn name(&self) -> &str {
///         "trim"
///     }
///
///     async fn apply(&self, value: Value, _ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
///         match value {
///             Value::String(s) => Ok(Value::String(s.trim().to_owned())),
///             other => Ok(other),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Rule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Checks or transforms `value`.
    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError>;
}

/// Shared, type-erased rule.
pub type RuleRef = Arc<dyn Rule>;

#[async_trait]
impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        (**self).apply(value, ctx).await
    }
}

#[async_trait]
impl<R: Rule + ?Sized> Rule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        (**self).apply(value, ctx).await
    }
}

/// Builds a `Vec<RuleRef>` from rule values.
///
/// ```rust
/// use dtokit_validator::rules;
/// use dtokit_validator::rules::{optional, to_string};
///
/// let chain = rules![optional(rules![to_string()])];
/// assert_eq!(chain.len(), 1);
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        ::std::vec::Vec::<$crate::RuleRef>::new()
    };
    ($($rule:expr),+ $(,)?) => {
        ::std::vec![$(::std::sync::Arc::new($rule) as $crate::RuleRef),+]
    };
}
