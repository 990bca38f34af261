//! Typed entry points and user types opting in through the macros.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use nebula_coerce::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Draft,
    Review,
    Published,
}
coercible_enum!(Stage { Draft, Review, Published });

fn shared() -> &'static CoercionOptions {
    CoercionOptions::shared()
}

#[rstest]
#[case::draft("draft", Stage::Draft)]
#[case::review("Review", Stage::Review)]
#[case::published(" PUBLISHED ", Stage::Published)]
fn enum_members_by_name(#[case] text: &str, #[case] expected: Stage) {
    let stage: Stage = coerce_as(&Value::from(text), shared()).unwrap();
    assert_eq!(stage, expected);
}

#[test]
fn enum_ordinals_are_rejected() {
    let err = coerce_as::<Stage>(&Value::from("2"), shared()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidEnumMember);
    let err = coerce_as::<Stage>(&Value::U8(2), shared()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedSourceType);
}

#[test]
fn enum_type_describes_the_members() {
    assert_eq!(Stage::ENUM_TYPE.name(), "Stage");
    assert_eq!(Stage::ENUM_TYPE.members(), &["Draft", "Review", "Published"]);
    assert_eq!(Stage::target_type().name(), "Stage");
}

#[test]
fn optional_enum_accepts_null() {
    let absent: Option<Stage> = coerce_as(&Value::Null, shared()).unwrap();
    assert_eq!(absent, None);
    let present: Option<Stage> = coerce_as(&Value::from("review"), shared()).unwrap();
    assert_eq!(present, Some(Stage::Review));
}

#[test]
fn typed_scalars() {
    assert_eq!(coerce_as::<i64>(&Value::from("-42"), shared()).unwrap(), -42);
    assert_eq!(coerce_as::<f32>(&Value::from("0.25"), shared()).unwrap(), 0.25);
    assert_eq!(
        coerce_as::<Decimal>(&Value::from("19.99"), shared()).unwrap(),
        Decimal::new(1999, 2)
    );
    assert_eq!(coerce_as::<char>(&Value::from("x"), shared()).unwrap(), 'x');
    assert_eq!(coerce_as::<String>(&Value::I32(7), shared()).unwrap(), "7");
}

#[test]
fn typed_temporal() {
    let naive: NaiveDateTime = coerce_as(&Value::from("2024-03-01T08:30:00"), shared()).unwrap();
    assert_eq!(naive.to_string(), "2024-03-01 08:30:00");

    let stamped: DateTime<FixedOffset> =
        coerce_as(&Value::from("2024-03-01T08:30:00+02:00"), shared()).unwrap();
    assert_eq!(stamped.offset().local_minus_utc(), 7_200);

    let span: TimeDelta = coerce_as(&Value::from("-01:30:00"), shared()).unwrap();
    assert_eq!(span, -TimeDelta::minutes(90));
}

#[test]
fn typed_failure_keeps_code_and_message() {
    let outcome = try_coerce_as::<u16>(&Value::from("port"), shared());
    assert!(!outcome.is_success());
    assert_eq!(outcome.value(), None);
    assert_eq!(outcome.error_code(), ErrorCode::InvalidFormat);
    assert!(outcome.message().starts_with("cannot convert 'port' (String) to type 'u16'"));

    let err = coerce_as::<u16>(&Value::from("port"), shared()).unwrap_err();
    assert_eq!(err.message(), outcome.message());
    assert_eq!(err.to_string(), outcome.message());
}

#[test]
fn typed_outcome_converts_to_untyped() {
    let typed = try_coerce_as::<bool>(&Value::from("false"), shared());
    let untyped: Outcome = typed.into();
    assert_eq!(untyped, Outcome::value_of(false));

    let failed: Outcome = try_coerce_as::<bool>(&Value::from("nope"), shared()).into();
    assert!(!failed.is_success());
    assert_eq!(failed.error_code(), ErrorCode::InvalidFormat);
}

/// Answers every `u8` request with a fixed value.
#[derive(Debug)]
struct Constant(u8);

impl Converter for Constant {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn try_coerce(
        &self,
        _value: &Value,
        effective: &TargetType,
        _declared: &TargetType,
        _options: &CoercionOptions,
    ) -> Outcome {
        if *effective == TargetType::Number(NumberKind::U8) {
            Outcome::value_of(self.0)
        } else {
            Outcome::fail("only u8", ErrorCode::UnsupportedSourceType)
        }
    }
}

#[test]
fn typed_calls_use_the_given_pipeline() {
    let options = CoercionOptions::new().with_converter_first(Arc::new(Constant(9)));
    assert_eq!(coerce_as::<u8>(&Value::from("anything"), &options).unwrap(), 9);
    assert_eq!(coerce_as::<u16>(&Value::from("10"), &options).unwrap(), 10);
}
