use crate::common::{class, validator};
use chrono::Utc;
use dtokit_validator::prelude::*;
use dtokit_validator::{Symbol, codes};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn strips_extra_fields() {
    let input = Value::from(json!({"name": "name", "extra": ""}));
    let out = validator().validate(&input, &class("BasicDto")).await.unwrap();
    assert_eq!(out, Value::from(json!({"name": "name"})));
}

#[tokio::test]
async fn post_check_rejects() {
    let input = Value::from(json!({"name": "InvalidName"}));
    let err = validator()
        .validate(&input, &class("CheckedDto"))
        .await
        .unwrap_err();
    assert_eq!(err.code, codes::CUSTOM);
    assert!(err.message.contains("InvalidName"));
}

#[tokio::test]
async fn post_check_accepts() {
    let input = Value::from(json!({"name": "Ada"}));
    let out = validator().validate(&input, &class("CheckedDto")).await.unwrap();
    assert_eq!(out, input);
}

#[rstest]
#[case::null(Value::Null)]
#[case::undefined(Value::Undefined)]
#[case::date(Value::from(Utc::now()))]
#[case::symbol(Value::from(Symbol::new("test")))]
#[case::decimal(Value::from(Decimal::new(5, 0)))]
#[case::string(Value::from("test"))]
#[case::string_with_digits(Value::from("201x"))]
#[case::number(Value::from(1))]
#[case::array(Value::from(json!([{"name": "x"}])))]
#[tokio::test]
async fn rejects_non_objects(#[case] input: Value) {
    let err = validator()
        .validate(&input, &class("BasicDto"))
        .await
        .unwrap_err();
    assert_eq!(err.code, codes::TYPE_MISMATCH);
    assert_eq!(err.param("expected"), Some("object"));
}

#[tokio::test]
async fn unregistered_class_fails() {
    struct NotRegistered;

    let err = validator()
        .validate(
            &Value::from(json!({})),
            &rules![is_object(ClassId::of::<NotRegistered>)],
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, codes::UNREGISTERED_CLASS);
}

#[tokio::test]
async fn recursive_class() {
    let input = Value::from(json!({
        "label": 1,
        "next": {"label": "two", "next": {"label": true, "junk": 0}}
    }));
    let out = validator().validate(&input, &class("Node")).await.unwrap();
    assert_eq!(
        out,
        Value::from(json!({
            "label": "1",
            "next": {"label": "two", "next": {"label": "true"}}
        }))
    );
}

#[tokio::test]
async fn nested_failure_path() {
    let input = Value::from(json!({"label": "a", "next": {"label": "b", "next": {"label": null}}}));
    let err = validator().validate(&input, &class("Node")).await.unwrap_err();
    assert_eq!(err.field().as_deref(), Some("next.next.label"));
}

#[tokio::test]
async fn depth_guard_stops_runaway_nesting() {
    let mut input = json!({"label": "leaf"});
    for _ in 0..8 {
        input = json!({"label": "n", "next": input});
    }

    let v = validator();
    let shallow = Validator::with_registry(
        v.registry().clone(),
        ValidatorConfig::default().with_max_depth(4),
    );
    let err = shallow
        .validate(&Value::from(input.clone()), &class("Node"))
        .await
        .unwrap_err();
    assert_eq!(err.code, codes::MAX_DEPTH_EXCEEDED);

    assert!(v.validate(&Value::from(input), &class("Node")).await.is_ok());
}

/// `Account` and `Owner` refer to each other; `Account` is registered while
/// `Owner` does not exist yet. `Account` carries an async post-check.
fn mutual() -> Validator {
    crate::common::init_tracing();
    let registry = Arc::new(ClassRegistry::new());

    registry
        .register(
            ClassDescriptor::builder("Account")
                .field("name", rules![to_string()])
                .field(
                    "owner",
                    rules![optional(rules![is_object(|| ClassId::new("Owner"))])],
                )
                .class_validate_async(|mut account: Object| async move {
                    tokio::task::yield_now().await;
                    if account.get("name").and_then(Value::as_str) == Some("root") {
                        return Err(ValidateError::custom("account name 'root' is reserved"));
                    }
                    account.insert("checked".to_owned(), Value::Bool(true));
                    Ok(Value::Object(account))
                })
                .build()
                .unwrap(),
        )
        .unwrap();

    registry
        .register(
            ClassDescriptor::builder("Owner")
                .field(
                    "account",
                    rules![optional(rules![is_object(|| ClassId::new("Account"))])],
                )
                .build()
                .unwrap(),
        )
        .unwrap();

    Validator::with_registry(registry, ValidatorConfig::default())
}

#[tokio::test]
async fn async_post_check_transforms() {
    let input = Value::from(json!({"name": 5, "extra": 1}));
    let out = mutual().validate(&input, &class("Account")).await.unwrap();
    assert_eq!(out, Value::from(json!({"name": "5", "checked": true})));
}

#[tokio::test]
async fn async_post_check_rejects() {
    let input = Value::from(json!({"name": "root"}));
    let err = mutual().validate(&input, &class("Account")).await.unwrap_err();
    assert_eq!(err.code, codes::CUSTOM);
    assert_eq!(err.field(), None);
}

#[tokio::test]
async fn mutual_classes_resolve_both_ways() {
    let input = Value::from(json!({
        "name": "a",
        "owner": {"account": {"name": "b", "owner": {}}, "junk": true}
    }));
    let out = mutual().validate(&input, &class("Account")).await.unwrap();
    assert_eq!(
        out,
        Value::from(json!({
            "name": "a",
            "owner": {"account": {"name": "b", "owner": {}, "checked": true}},
            "checked": true
        }))
    );
}

#[tokio::test]
async fn nested_async_post_check_keeps_path() {
    let input = Value::from(json!({"name": "a", "owner": {"account": {"name": "root"}}}));
    let err = mutual().validate(&input, &class("Account")).await.unwrap_err();
    assert_eq!(err.code, codes::CUSTOM);
    assert_eq!(err.field().as_deref(), Some("owner.account"));
}
