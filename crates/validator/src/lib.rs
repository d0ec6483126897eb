//! # dtokit-validator
//!
//! Declarative validation and coercion of loosely-typed input values against
//! class descriptors.
//!
//! ## Quick Start
//!
//! ```rust
//! use dtokit_validator::prelude::*;
//! use serde_json::json;
//!
//! let registry = std::sync::Arc::new(ClassRegistry::new());
//! registry
//!     .register(
//!         ClassDescriptor::builder("SignupDto")
//!             .field("name", rules![to_string()])
//!             .field("age", rules![optional(rules![to_number()])])
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let validator = Validator::with_registry(registry, ValidatorConfig::default());
//! let input = Value::from(json!({"name": 7, "admin": true}));
//!
//! # futures::executor::block_on(async {
//! let out = validator
//!     .validate(&input, &rules![is_object(|| ClassId::new("SignupDto"))])
//!     .await
//!     .unwrap();
//! assert_eq!(out, Value::from(json!({"name": "7"})));
//! # });
//! ```
//!
//! ## Concepts
//!
//! - A [`Rule`] maps one [`Value`] to a new value or a [`ValidateError`].
//!   Rules are chained; each sees the previous rule's output.
//! - A [`ClassDescriptor`] declares ordered fields, each with its own chain,
//!   and an optional post-check hook. Descriptors live in a [`ClassRegistry`].
//! - [`Validator`] runs a chain against a registry and a [`ValidatorConfig`].
//!   [`validate_value`] and [`validate_value_async`] use the process-wide
//!   registry.
//!
//! ## Built-in Rules
//!
//! See [`rules`].

// ValidateError is returned from every rule; boxing it would add an
// allocation per failure for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod class;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod value;

pub use class::{ClassDescriptor, ClassDescriptorBuilder, ClassId, FieldDescriptor, PostCheck};
pub use config::{FieldFailurePolicy, ValidatorConfig};
pub use context::{FieldPath, PathSegment, RuleContext};
pub use error::{DefinitionError, ValidateError, codes};
pub use executor::{Validator, validate_value, validate_value_async};
pub use registry::{ClassRegistry, global_registry, register_class};
pub use rule::{Rule, RuleRef};
pub use value::{Object, Symbol, Value, ValueKind};
