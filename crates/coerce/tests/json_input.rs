//! Structured JSON input: unwrapping scalars and deserializing complex shapes.

use chrono::NaiveDate;
use nebula_coerce::prelude::*;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Endpoint {
    host: String,
    port: u16,
    #[serde(default)]
    tags: Vec<String>,
}
coercible_complex!(Endpoint);

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Service {
    name: String,
    endpoint: Endpoint,
}
coercible_complex!(Service);

fn shared() -> &'static CoercionOptions {
    CoercionOptions::shared()
}

// ============================================================================
// COMPLEX SHAPES
// ============================================================================

#[test]
fn object_fields_match_ignoring_case() {
    let node = json!({ "HOST": "db.local", "Port": 5432, "tags": ["primary"] });
    let endpoint: Endpoint = coerce_as(&Value::Json(node), shared()).unwrap();
    assert_eq!(
        endpoint,
        Endpoint {
            host: "db.local".to_owned(),
            port: 5432,
            tags: vec!["primary".to_owned()],
        }
    );
}

#[test]
fn nested_objects_match_ignoring_case() {
    let node = json!({
        "Name": "billing",
        "ENDPOINT": { "host": "10.0.0.2", "PORT": 8443 }
    });
    let service: Service = coerce_as(&Value::Json(node), shared()).unwrap();
    assert_eq!(service.name, "billing");
    assert_eq!(service.endpoint.port, 8443);
    assert!(service.endpoint.tags.is_empty());
}

#[test]
fn array_into_vec() {
    let numbers: Vec<i32> = coerce_as(&Value::Json(json!([1, 2, 3])), shared()).unwrap();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn nullable_complex_accepts_object() {
    let node = json!({ "host": "h", "port": 1 });
    let endpoint: Option<Endpoint> = coerce_as(&Value::Json(node), shared()).unwrap();
    assert_eq!(endpoint.map(|e| e.host), Some("h".to_owned()));
}

#[test]
fn malformed_structure_is_invalid_format() {
    let node = json!({ "host": 5, "port": 1 });
    let outcome = try_coerce_as::<Endpoint>(&Value::Json(node), shared());
    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code(), ErrorCode::InvalidFormat);
    assert!(outcome.message().contains("(serde_json::Value)"), "{}", outcome.message());
    assert!(outcome.cause().is_some());
}

#[test]
fn object_into_scalar_is_unsupported() {
    let outcome = try_coerce(
        &Value::Json(json!({ "a": 1 })),
        &TargetType::Number(NumberKind::I32),
        shared(),
    );
    assert_eq!(outcome.error_code(), ErrorCode::UnsupportedSourceType);
    assert_eq!(
        outcome.message(),
        "cannot convert JSON object to non-complex type 'i32'"
    );

    let array = try_coerce(&Value::Json(json!(["a"])), &TargetType::String, shared());
    assert_eq!(array.error_code(), ErrorCode::UnsupportedSourceType);
    assert!(array.message().starts_with("cannot convert JSON array"));
}

// ============================================================================
// SCALARS
// ============================================================================

#[test]
fn json_null() {
    let nullable = try_coerce(
        &Value::Json(json!(null)),
        &TargetType::nullable(TargetType::Number(NumberKind::I64)),
        shared(),
    );
    assert!(nullable.is_success());
    assert_eq!(nullable.value(), None);

    let strict = try_coerce(&Value::Json(json!(null)), &TargetType::Bool, shared());
    assert_eq!(strict.error_code(), ErrorCode::ConversionFailed);
}

#[test]
fn json_numbers_take_the_target_width() {
    let small = try_coerce(
        &Value::Json(json!(42)),
        &TargetType::Number(NumberKind::U8),
        shared(),
    );
    assert_eq!(small.into_value(), Some(Value::U8(42)));

    let fast = try_coerce(
        &Value::Json(json!(300)),
        &TargetType::Number(NumberKind::U8),
        shared(),
    );
    assert_eq!(fast.error_code(), ErrorCode::InvalidFormat);

    let precise = CoercionOptions::new().with_fast_numeric_parsing(false);
    let wide = try_coerce(
        &Value::Json(json!(300)),
        &TargetType::Number(NumberKind::U8),
        &precise,
    );
    assert_eq!(wide.error_code(), ErrorCode::Overflow);

    let fraction = try_coerce(
        &Value::Json(json!(2.5)),
        &TargetType::Number(NumberKind::I32),
        &precise,
    );
    assert_eq!(fraction.error_code(), ErrorCode::InvalidFormat);

    let float = try_coerce(
        &Value::Json(json!(2.5)),
        &TargetType::Number(NumberKind::F64),
        shared(),
    );
    assert_eq!(float.into_value(), Some(Value::F64(2.5)));
}

#[test]
fn json_number_into_string_keeps_its_text() {
    let outcome = try_coerce(&Value::Json(json!(12.75)), &TargetType::String, shared());
    assert_eq!(outcome.into_value(), Some(Value::from("12.75")));
}

#[test]
fn json_strings_and_booleans_are_reissued() {
    let date: NaiveDate = coerce_as(&Value::Json(json!("2024-02-29")), shared()).unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

    let flag: bool = coerce_as(&Value::Json(json!(true)), shared()).unwrap();
    assert!(flag);

    let text: String = coerce_as(&Value::Json(json!(false)), shared()).unwrap();
    assert_eq!(text, "false");
}

#[test]
fn json_target_keeps_the_node() {
    let node = json!({ "keep": ["me"] });
    let kept: serde_json::Value = coerce_as(&Value::Json(node.clone()), shared()).unwrap();
    assert_eq!(kept, node);
}
