//! Validator configuration
//!
//! Configuration is plain data: build it in code, deserialize it from any
//! serde format, or read overrides from the environment with
//! [`ValidatorConfig::from_env`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Environment variable selecting the [`FieldFailurePolicy`].
pub const ENV_FIELD_FAILURE: &str = "DTOKIT_VALIDATOR_FIELD_FAILURE";

/// Environment variable overriding [`ValidatorConfig::max_depth`].
pub const ENV_MAX_DEPTH: &str = "DTOKIT_VALIDATOR_MAX_DEPTH";

/// What object and array validation does when an entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFailurePolicy {
    /// Stop at the first failing entry and return its error.
    #[default]
    FailFast,
    /// Validate every entry and return one aggregate error.
    CollectAll,
}

impl FromStr for FieldFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_fast" | "fail-fast" | "failfast" => Ok(Self::FailFast),
            "collect_all" | "collect-all" | "collectall" => Ok(Self::CollectAll),
            other => Err(format!("unknown field failure policy '{other}'")),
        }
    }
}

/// Engine settings shared by every call made through one
/// [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Failure policy for object fields and array elements.
    pub field_failure: FieldFailurePolicy,

    /// Maximum object/array nesting before validation fails. `0` rejects
    /// every object and array.
    pub max_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            field_failure: FieldFailurePolicy::FailFast,
            max_depth: 32,
        }
    }
}

impl ValidatorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail fast with a shallow depth limit.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            field_failure: FieldFailurePolicy::FailFast,
            max_depth: 16,
        }
    }

    /// Report every failing field at once.
    #[must_use]
    pub fn diagnostic() -> Self {
        Self {
            field_failure: FieldFailurePolicy::CollectAll,
            ..Self::default()
        }
    }

    /// Defaults overridden by `DTOKIT_VALIDATOR_*` environment variables.
    ///
    /// Unparsable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FIELD_FAILURE) {
            match raw.parse() {
                Ok(policy) => config.field_failure = policy,
                Err(error) => warn!(var = ENV_FIELD_FAILURE, %error, "ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(depth) => config.max_depth = depth,
                Err(error) => warn!(var = ENV_MAX_DEPTH, value = %raw, %error, "ignoring invalid value"),
            }
        }

        config
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_field_failure(mut self, policy: FieldFailurePolicy) -> Self {
        self.field_failure = policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn collects_all(&self) -> bool {
        self.field_failure == FieldFailurePolicy::CollectAll
    }
}
