//! Shared helpers for the integration suite.

use dtokit_validator::prelude::*;
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A validator over a fresh registry holding the classes used across tests.
pub fn validator() -> Validator {
    init_tracing();
    let registry = Arc::new(ClassRegistry::new());

    registry
        .register(
            ClassDescriptor::builder("BasicDto")
                .field("name", rules![to_string()])
                .build()
                .unwrap(),
        )
        .unwrap();

    registry
        .register(
            ClassDescriptor::builder("CheckedDto")
                .field("name", rules![to_string()])
                .class_validate(|object| {
                    if object.get("name").and_then(Value::as_str) == Some("InvalidName") {
                        return Err(ValidateError::custom("name 'InvalidName' is not allowed"));
                    }
                    Ok(Value::Object(object))
                })
                .build()
                .unwrap(),
        )
        .unwrap();

    // Self-referencing class; resolved lazily through the thunk.
    registry
        .register(
            ClassDescriptor::builder("Node")
                .field("label", rules![to_string()])
                .field(
                    "next",
                    rules![optional(rules![is_object(|| ClassId::new("Node"))])],
                )
                .build()
                .unwrap(),
        )
        .unwrap();

    Validator::with_registry(registry, ValidatorConfig::default())
}

pub fn class(name: &'static str) -> Vec<RuleRef> {
    rules![is_object(move || ClassId::new(name))]
}
