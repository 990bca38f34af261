//! Converters for the temporal shapes.
//!
//! Timestamps accept only text and the other timestamp shapes, and decline
//! everything else. Dates, times and durations parse text and hand any
//! other source to the fallback converter.

use std::sync::Arc;

use chrono::NaiveTime;

use super::FallbackConverter;
use crate::converter::Converter;
use crate::error::{ConversionFault, ErrorCode};
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::temporal;
use crate::value::Value;

fn from_parse<T: Into<Value>>(
    parsed: Result<T, ConversionFault>,
    value: &Value,
    declared: &TargetType,
    options: &CoercionOptions,
) -> Outcome {
    match parsed {
        Ok(parsed) => Outcome::value_of(parsed),
        Err(fault) => Outcome::from_fault(value, declared, fault, &options.culture),
    }
}

// ============================================================================
// TIMESTAMPS
// ============================================================================

/// Wall-clock timestamps (`NaiveDateTime`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeConverter;

impl Converter for DateTimeConverter {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::DateTime {
            return super::not_mine(effective, "NaiveDateTime");
        }

        match value {
            Value::String(text) => from_parse(
                temporal::parse_datetime(text, &options.culture),
                value,
                declared,
                options,
            ),
            Value::DateTimeOffset(stamp) => Outcome::value_of(stamp.naive_local()),
            Value::Date(date) => Outcome::value_of(date.and_time(NaiveTime::MIN)),
            other => Outcome::fail(
                format!(
                    "cannot convert {} to NaiveDateTime; supported source types: String, DateTime<FixedOffset>, NaiveDate",
                    other.type_name()
                ),
                ErrorCode::UnsupportedSourceType,
            ),
        }
    }
}

/// Timestamps with a fixed offset (`DateTime<FixedOffset>`).
///
/// Sources without an offset are taken as UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeOffsetConverter;

impl Converter for DateTimeOffsetConverter {
    fn name(&self) -> &'static str {
        "datetime_offset"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::DateTimeOffset {
            return super::not_mine(effective, "DateTime<FixedOffset>");
        }

        match value {
            Value::String(text) => from_parse(
                temporal::parse_datetime_offset(text, &options.culture),
                value,
                declared,
                options,
            ),
            Value::DateTime(naive) => Outcome::value_of(naive.and_utc().fixed_offset()),
            Value::Date(date) => {
                Outcome::value_of(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            }
            other => Outcome::fail(
                format!(
                    "cannot convert {} to DateTime<FixedOffset>; supported source types: String, NaiveDateTime, NaiveDate",
                    other.type_name()
                ),
                ErrorCode::UnsupportedSourceType,
            ),
        }
    }
}

// ============================================================================
// DATE / TIME / DURATION
// ============================================================================

/// Calendar dates (`NaiveDate`). Timestamps lose their time of day.
#[derive(Debug, Clone)]
pub struct DateConverter {
    fallback: Arc<FallbackConverter>,
}

impl DateConverter {
    pub fn new(fallback: Arc<FallbackConverter>) -> Self {
        Self { fallback }
    }
}

impl Converter for DateConverter {
    fn name(&self) -> &'static str {
        "date"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::Date {
            return super::not_mine(effective, "NaiveDate");
        }

        match value {
            Value::String(text) => from_parse(
                temporal::parse_date(text, &options.culture),
                value,
                declared,
                options,
            ),
            Value::DateTime(naive) => Outcome::value_of(naive.date()),
            Value::DateTimeOffset(stamp) => Outcome::value_of(stamp.date_naive()),
            other => self.fallback.try_coerce(other, effective, declared, options),
        }
    }
}

/// Times of day (`NaiveTime`).
#[derive(Debug, Clone)]
pub struct TimeConverter {
    fallback: Arc<FallbackConverter>,
}

impl TimeConverter {
    pub fn new(fallback: Arc<FallbackConverter>) -> Self {
        Self { fallback }
    }
}

impl Converter for TimeConverter {
    fn name(&self) -> &'static str {
        "time"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::Time {
            return super::not_mine(effective, "NaiveTime");
        }

        match value {
            Value::String(text) => from_parse(temporal::parse_time(text), value, declared, options),
            other => self.fallback.try_coerce(other, effective, declared, options),
        }
    }
}

/// Signed durations (`TimeDelta`).
#[derive(Debug, Clone)]
pub struct DurationConverter {
    fallback: Arc<FallbackConverter>,
}

impl DurationConverter {
    pub fn new(fallback: Arc<FallbackConverter>) -> Self {
        Self { fallback }
    }
}

impl Converter for DurationConverter {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::Duration {
            return super::not_mine(effective, "TimeDelta");
        }

        match value {
            Value::String(text) => {
                from_parse(temporal::parse_duration(text), value, declared, options)
            }
            other => self.fallback.try_coerce(other, effective, declared, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    use super::*;

    fn run(converter: &dyn Converter, value: Value, target: TargetType) -> Outcome {
        converter.try_coerce(&value, &target, &target, CoercionOptions::shared())
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_datetime_sources() {
        let parsed = run(&DateTimeConverter, Value::from("2024-03-10T12:00:00"), TargetType::DateTime);
        assert_eq!(parsed.value(), Some(&Value::DateTime(noon())));

        let from_date = run(
            &DateTimeConverter,
            Value::Date(noon().date()),
            TargetType::DateTime,
        );
        assert_eq!(
            from_date.value(),
            Some(&Value::DateTime(noon().date().and_time(NaiveTime::MIN)))
        );

        let bad = run(&DateTimeConverter, Value::from("yesterday"), TargetType::DateTime);
        assert_eq!(bad.error_code(), ErrorCode::InvalidFormat);
        assert!(bad.cause().is_some());
        assert!(
            bad.message()
                .starts_with("cannot convert 'yesterday' (String) to type 'NaiveDateTime': "),
            "{}",
            bad.message()
        );

        let unsupported = run(&DateTimeConverter, Value::I64(0), TargetType::DateTime);
        assert_eq!(unsupported.error_code(), ErrorCode::UnsupportedSourceType);
    }

    #[test]
    fn test_offset_keeps_local_clock() {
        let stamp = chrono::DateTime::parse_from_rfc3339("2024-03-10T12:00:00+05:00").unwrap();
        let outcome = run(&DateTimeConverter, Value::DateTimeOffset(stamp), TargetType::DateTime);
        assert_eq!(outcome.value(), Some(&Value::DateTime(noon())));
    }

    #[test]
    fn test_datetime_offset_from_wall_clock_is_utc() {
        let outcome = run(
            &DateTimeOffsetConverter,
            Value::DateTime(noon()),
            TargetType::DateTimeOffset,
        );
        let Some(Value::DateTimeOffset(stamp)) = outcome.value() else {
            panic!("expected offset timestamp, got {outcome:?}");
        };
        assert_eq!(stamp.offset().local_minus_utc(), 0);
        assert_eq!(stamp.naive_local(), noon());

        let bad = run(
            &DateTimeOffsetConverter,
            Value::from("noon-ish"),
            TargetType::DateTimeOffset,
        );
        assert_eq!(bad.error_code(), ErrorCode::InvalidFormat);
        assert!(bad.cause().is_some());
    }

    #[test]
    fn test_date_truncates_timestamps() {
        let fallback = Arc::new(FallbackConverter);
        let outcome = run(
            &DateConverter::new(fallback),
            Value::DateTime(noon()),
            TargetType::Date,
        );
        assert_eq!(outcome.value(), Some(&Value::Date(noon().date())));
    }

    #[test]
    fn test_date_text_fault_is_invalid_format() {
        let fallback = Arc::new(FallbackConverter);
        let outcome = run(&DateConverter::new(fallback), Value::from("31/31/2024"), TargetType::Date);
        assert_eq!(outcome.error_code(), ErrorCode::InvalidFormat);
        assert!(outcome.cause().is_some());
    }

    #[test]
    fn test_time_delegates_non_text() {
        let fallback = Arc::new(FallbackConverter);
        let outcome = run(&TimeConverter::new(fallback), Value::I32(5), TargetType::Time);
        assert_eq!(outcome.error_code(), ErrorCode::ConversionFailed);
    }

    #[test]
    fn test_duration_overflow_component() {
        let fallback = Arc::new(FallbackConverter);
        let converter = DurationConverter::new(fallback);
        assert_eq!(
            run(&converter, Value::from("1.02:03:04"), TargetType::Duration).value(),
            Some(&Value::Duration(
                TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(3) + TimeDelta::seconds(4)
            ))
        );
        assert_eq!(
            run(&converter, Value::from("25:00:00"), TargetType::Duration).error_code(),
            ErrorCode::Overflow
        );
    }
}
