use dtokit_validator::prelude::*;
use dtokit_validator::codes;
use rstest::rstest;
use serde_json::json;

fn numeric() -> Vec<RuleRef> {
    let descriptor = EnumDescriptor::new([("SOMETHING", 0), ("OTHER", 1)]).unwrap();
    rules![to_enum(descriptor)]
}

fn mixed() -> Vec<RuleRef> {
    let descriptor =
        EnumDescriptor::from_json(&json!({"SOMETHING": 0, "OTHER": "other-value"})).unwrap();
    rules![to_enum(descriptor)]
}

async fn check(rules: Vec<RuleRef>, input: Value) -> Result<Value, ValidateError> {
    crate::common::validator().validate(&input, &rules).await
}

#[rstest]
#[case(Value::from(0))]
#[case(Value::from(1))]
#[tokio::test]
async fn numeric_accepts(#[case] input: Value) {
    assert_eq!(check(numeric(), input.clone()).await.unwrap(), input);
}

#[rstest]
#[case(Value::from("SOMETHING"))]
#[case(Value::from("OTHER"))]
#[case(Value::from(2))]
#[case(Value::from(-1))]
#[case(Value::from("0"))]
#[tokio::test]
async fn numeric_rejects(#[case] input: Value) {
    let err = check(numeric(), input).await.unwrap_err();
    assert_eq!(err.code, codes::NOT_IN_ENUM);
}

#[rstest]
#[case(Value::from(0))]
#[case(Value::from("other-value"))]
#[tokio::test]
async fn mixed_accepts(#[case] input: Value) {
    assert_eq!(check(mixed(), input.clone()).await.unwrap(), input);
}

#[rstest]
#[case(Value::from("SOMETHING"))]
#[case(Value::from("OTHER"))]
#[case(Value::from(2))]
#[case(Value::from(-1))]
#[tokio::test]
async fn mixed_rejects(#[case] input: Value) {
    assert!(check(mixed(), input).await.is_err());
}

#[tokio::test]
async fn reverse_mapped_enum() {
    let compiled = json!({"0": "SOMETHING", "1": "OTHER", "SOMETHING": 0, "OTHER": 1});
    let descriptor = EnumDescriptor::from_json(&compiled).unwrap();
    assert_eq!(descriptor.len(), 2);

    let rules = rules![to_enum(descriptor)];
    assert!(check(rules.clone(), Value::from(1)).await.is_ok());
    assert!(check(rules, Value::from("SOMETHING")).await.is_err());
}
