//! Element-wise array validation

use crate::context::RuleContext;
use crate::error::ValidateError;
use crate::executor::run_chain;
use crate::rule::{Rule, RuleRef};
use crate::rules::check_depth;
use crate::value::Value;
use async_trait::async_trait;

/// Runs every element of an array through the same rule chain and returns
/// the new array.
///
/// Element failures carry the index in their path. The field failure policy
/// decides between returning the first failure and an `array_invalid`
/// aggregate.
#[derive(Clone)]
pub struct IsArray {
    rules: Vec<RuleRef>,
}

impl std::fmt::Debug for IsArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("IsArray").field("rules", &names).finish()
    }
}

#[async_trait]
impl Rule for IsArray {
    fn name(&self) -> &str {
        "is_array"
    }

    async fn apply(&self, value: Value, ctx: &RuleContext<'_>) -> Result<Value, ValidateError> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(ValidateError::type_mismatch("array", other.kind())),
        };
        check_depth(ctx)?;

        let collect_all = ctx.config().collects_all();
        let mut output = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            match run_chain(item, &self.rules, &ctx.element(index)).await {
                Ok(validated) => output.push(validated),
                Err(error) => {
                    let error = error.at_index(index);
                    if !collect_all {
                        return Err(error);
                    }
                    errors.push(error);
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Array(output))
        } else {
            Err(ValidateError::array_invalid(errors))
        }
    }
}

/// Creates an [`IsArray`] rule.
#[must_use]
pub fn is_array(rules: Vec<RuleRef>) -> IsArray {
    IsArray { rules }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldFailurePolicy, ValidatorConfig};
    use crate::error::codes;
    use crate::registry::ClassRegistry;
    use crate::rules;
    use crate::rules::to_string;
    use serde_json::json;

    async fn run(config: ValidatorConfig, input: serde_json::Value) -> Result<Value, ValidateError> {
        let registry = ClassRegistry::new();
        let ctx = RuleContext::new(&registry, &config);
        is_array(rules![to_string()]).apply(Value::from(input), &ctx).await
    }

    #[tokio::test]
    async fn test_coerces_each_element() {
        let out = run(ValidatorConfig::default(), json!([1, "a", true])).await.unwrap();
        assert_eq!(out, Value::from(json!(["1", "a", "true"])));
    }

    #[tokio::test]
    async fn test_rejects_non_array() {
        let err = run(ValidatorConfig::default(), json!({"0": 1})).await.unwrap_err();
        assert_eq!(err.code, codes::TYPE_MISMATCH);
        assert_eq!(err.param("expected"), Some("array"));
    }

    #[tokio::test]
    async fn test_fail_fast_reports_index() {
        let err = run(ValidatorConfig::default(), json!(["a", null, null]))
            .await
            .unwrap_err();
        assert_eq!(err.field().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_collect_all() {
        let config = ValidatorConfig::default().with_field_failure(FieldFailurePolicy::CollectAll);
        let err = run(config, json!(["a", null, {}])).await.unwrap_err();
        assert_eq!(err.code, codes::ARRAY_INVALID);
        assert_eq!(err.nested.len(), 2);
        assert_eq!(err.nested[1].field().as_deref(), Some("[2]"));
    }
}
