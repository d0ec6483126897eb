//! Validation executor
//!
//! Runs a value through an ordered rule chain. Rules execute strictly one
//! after another; the first failure aborts the chain and is returned as is.
//! The input is never modified: the chain works on its own copy and every
//! coercion produces a new value.

use crate::config::ValidatorConfig;
use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::registry::{ClassRegistry, global_registry};
use crate::rule::RuleRef;
use crate::value::Value;
use futures::future::BoxFuture;
use std::sync::{Arc, LazyLock};
use tracing::{Instrument, debug, debug_span, trace};

static DEFAULT: LazyLock<Validator> = LazyLock::new(Validator::default);

/// Applies `rules` to `value` in order.
///
/// The first failing rule aborts the chain; no partial result is returned.
pub(crate) async fn run_chain(
    value: Value,
    rules: &[RuleRef],
    ctx: &RuleContext<'_>,
) -> Result<Value, ValidateError> {
    let mut current = value;
    for (step, rule) in rules.iter().enumerate() {
        trace!(rule = rule.name(), step, path = %ctx.path(), "applying rule");
        current = rule.apply(current, ctx).await.inspect_err(|error| {
            debug!(rule = rule.name(), step, path = %ctx.path(), code = %error.code, "rule failed");
        })?;
    }
    Ok(current)
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// A registry handle plus configuration.
///
/// Cheap to clone; clones share the registry.
///
/// # Examples
///
/// ```rust
/// use dtokit_validator::{rules, Validator, ValidatorConfig, Value};
/// use dtokit_validator::rules::to_string;
///
/// # futures::executor::block_on(async {
/// let validator = Validator::new(ValidatorConfig::default());
/// let out = validator.validate(&Value::from(42), &rules![to_string()]).await.unwrap();
/// assert_eq!(out, Value::from("42"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<ClassRegistry>,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    /// Validator over the process-wide registry.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_registry(global_registry(), config)
    }

    /// Validator over a specific registry.
    #[must_use]
    pub fn with_registry(registry: Arc<ClassRegistry>, config: ValidatorConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a borrowed value.
    pub async fn validate(&self, value: &Value, rules: &[RuleRef]) -> Result<Value, ValidateError> {
        let span = debug_span!("validate", rules = rules.len(), kind = %value.kind());
        async {
            let ctx = RuleContext::new(&self.registry, &self.config);
            let result = run_chain(value.clone(), rules, &ctx).await;
            match &result {
                Ok(_) => debug!("validation succeeded"),
                Err(error) => debug!(code = %error.code, field = ?error.field(), "validation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Validates an owned value; the returned future owns everything it
    /// needs and can be spawned.
    pub fn validate_owned(
        &self,
        value: Value,
        rules: Vec<RuleRef>,
    ) -> BoxFuture<'static, Result<Value, ValidateError>> {
        let this = self.clone();
        Box::pin(async move { this.validate(&value, &rules).await })
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Validates `value` against `rules` with the default configuration and the
/// process-wide registry.
///
/// ```rust
/// use dtokit_validator::{rules, validate_value, Value};
/// use dtokit_validator::rules::to_string;
///
/// # futures::executor::block_on(async {
/// let out = validate_value(&Value::from(true), &rules![to_string()]).await.unwrap();
/// assert_eq!(out, Value::from("true"));
/// # });
/// ```
pub async fn validate_value(value: &Value, rules: &[RuleRef]) -> Result<Value, ValidateError> {
    DEFAULT.validate(value, rules).await
}

/// Owned-argument variant of [`validate_value`].
///
/// The returned future is `Send + 'static`, so it can be handed to an
/// executor (`tokio::spawn`) or stored.
pub fn validate_value_async(
    value: Value,
    rules: Vec<RuleRef>,
) -> BoxFuture<'static, Result<Value, ValidateError>> {
    DEFAULT.validate_owned(value, rules)
}
