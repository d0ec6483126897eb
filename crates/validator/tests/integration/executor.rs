use crate::common::{class, validator};
use dtokit_validator::prelude::*;
use dtokit_validator::{codes, global_registry};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn input_is_not_mutated() {
    let input = Value::from(json!({"name": 12, "extra": [1, 2]}));
    let snapshot = input.clone();

    let out = validator().validate(&input, &class("BasicDto")).await.unwrap();

    assert_eq!(input, snapshot);
    assert_eq!(out, Value::from(json!({"name": "12"})));
}

#[tokio::test]
async fn repeated_calls_agree() {
    let v = validator();
    let input = Value::from(json!({"label": 3, "next": {"label": false}}));
    let first = v.validate(&input, &class("Node")).await;
    let second = v.validate(&input, &class("Node")).await;
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_are_independent() {
    let v = validator();
    let handles: Vec<_> = (0..64)
        .map(|i| {
            let input = Value::from(json!({"name": i, "extra": true}));
            tokio::spawn(v.validate_owned(input, class("BasicDto")))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.await.unwrap().unwrap();
        assert_eq!(out, Value::from(json!({"name": i.to_string()})));
    }
}

#[tokio::test]
async fn global_registry_roundtrip() {
    register_class(
        ClassDescriptor::builder("executor::GlobalDto")
            .field("id", rules![to_number()])
            .build()
            .unwrap(),
    )
    .unwrap();

    let chain = rules![is_object(|| ClassId::new("executor::GlobalDto"))];
    let input = Value::from(json!({"id": "17"}));

    let a = validate_value(&input, &chain).await.unwrap();
    let b = validate_value_async(input, chain).await.unwrap();
    assert_eq!(a, Value::from(json!({"id": 17})));
    assert_eq!(a, b);
    assert!(global_registry().contains(&ClassId::new("executor::GlobalDto")));
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let build = || {
        ClassDescriptor::builder("executor::Once")
            .field("a", rules![])
            .build()
            .unwrap()
    };
    register_class(build()).unwrap();
    let err = register_class(build()).unwrap_err();
    assert_eq!(err, DefinitionError::DuplicateClass("executor::Once".into()));
}

#[tokio::test]
async fn collect_all_reports_every_field() {
    let v = validator();
    let diagnostic = Validator::with_registry(v.registry().clone(), ValidatorConfig::diagnostic());

    let input = Value::from(json!({"label": null, "next": "nope"}));
    let err = diagnostic.validate(&input, &class("Node")).await.unwrap_err();

    assert_eq!(err.code, codes::OBJECT_INVALID);
    assert_eq!(err.nested.len(), 2);
    let json = err.to_json_value();
    assert_eq!(json["nested"][0]["field"], "label");
    assert_eq!(json["nested"][1]["field"], "next");
}
