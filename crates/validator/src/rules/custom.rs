//! Closure-backed rules

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::rule::Rule;
use crate::value::Value;
use async_trait::async_trait;
use std::borrow::Cow;
use std::marker::PhantomData;

/// A rule backed by a synchronous closure.
pub struct Custom<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> std::fmt::Debug for Custom<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Rule for Custom<F>
where
    F: Fn(Value, &RuleContext<'_>) -> Result<Value, ValidateError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        (self.f)(value, ctx)
    }
}

/// A rule backed by a closure returning a future.
///
/// The closure only receives the value: the future must be `'static` so it
/// cannot borrow the context.
pub struct CustomAsync<F, Fut> {
    name: Cow<'static, str>,
    f: F,
    _future: PhantomData<fn() -> Fut>,
}

impl<F, Fut> std::fmt::Debug for CustomAsync<F, Fut> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomAsync").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> Rule for CustomAsync<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ValidateError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, _ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        (self.f)(value).await
    }
}

/// Creates a [`Custom`] rule.
///
/// ```rust
/// use dtokit_validator::{rules, ValidateError, Value};
/// use dtokit_validator::rules::{custom, to_string};
///
/// let chain = rules![
///     to_string(),
///     custom("not_blank", |value, _ctx| match value.as_str() {
///         Some(s) if s.trim().is_empty() => Err(ValidateError::custom("must not be blank")),
///         _ => Ok(value),
///     }),
/// ];
/// assert_eq!(chain.len(), 2);
/// ```
pub fn custom<F>(name: impl Into<Cow<'static, str>>, f: F) -> Custom<F>
where
    F: Fn(Value, &RuleContext<'_>) -> Result<Value, ValidateError> + Send + Sync,
{
    Custom {
        name: name.into(),
        f,
    }
}

/// Creates a [`CustomAsync`] rule.
pub fn custom_async<F, Fut>(name: impl Into<Cow<'static, str>>, f: F) -> CustomAsync<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ValidateError>> + Send + 'static,
{
    CustomAsync {
        name: name.into(),
        f,
        _future: PhantomData,
    }
}
