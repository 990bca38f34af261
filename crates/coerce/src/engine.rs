//! The dispatch engine.
//!
//! Order of evaluation for every call:
//!
//! 1. JSON nodes are unwrapped (unless the node itself is wanted).
//! 2. Null succeeds as absence for nullable targets and fails otherwise.
//! 3. A value that already is an instance of the effective target is
//!    returned unchanged.
//! 4. Enumeration targets go to the enumeration converter and nowhere else.
//! 5. The remaining converters are tried in order. The first success wins;
//!    the first failure that is not `UnsupportedSourceType` is final.
//! 6. If every converter declines, the call fails with `ConversionFailed`.

use crate::converter::ConverterRole;
use crate::error::{CoercionError, ErrorCode};
use crate::json;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::Value;

/// Coerces `value` to `target` without failing loudly.
///
/// Never panics. Every failure is reported through the returned [`Outcome`].
pub fn try_coerce(value: &Value, target: &TargetType, options: &CoercionOptions) -> Outcome {
    if let Value::Json(node) = value
        && *target.effective() != TargetType::Json
    {
        return json::coerce_json(node, target, options);
    }

    if value.is_null() {
        return if target.accepts_null() {
            Outcome::ok(None)
        } else {
            Outcome::fail(
                format!("cannot convert null to non-nullable type '{}'", target.name()),
                ErrorCode::ConversionFailed,
            )
        };
    }

    let effective = target.effective();
    if effective.is_instance(value) {
        return Outcome::ok(Some(value.clone()));
    }

    if effective.is_enum()
        && let Some(converter) = options
            .converters
            .iter()
            .find(|c| c.role() == ConverterRole::Enumeration)
    {
        return converter.try_coerce(value, effective, target, options);
    }

    for converter in options
        .converters
        .iter()
        .filter(|c| c.role() != ConverterRole::Enumeration)
    {
        let outcome = converter.try_coerce(value, effective, target, options);
        if outcome.is_success() {
            return outcome;
        }
        if outcome.error_code() != ErrorCode::UnsupportedSourceType {
            tracing::debug!(
                converter = converter.name(),
                source = value.type_name(),
                target = %target,
                code = %outcome.error_code(),
                "converter rejected value"
            );
            return outcome;
        }
        tracing::trace!(
            converter = converter.name(),
            source = value.type_name(),
            target = %target,
            "converter declined"
        );
    }

    tracing::debug!(
        source = value.type_name(),
        target = %target,
        code = %ErrorCode::ConversionFailed,
        "no converter matched"
    );
    Outcome::fail(
        format!(
            "no coercer found for source type '{}' and target type '{}'",
            value.type_name(),
            target.name()
        ),
        ErrorCode::ConversionFailed,
    )
}

/// Coerces `value` to `target`, returning the failure as an error.
///
/// `Ok(None)` is the absent value produced by a nullable target.
pub fn coerce(
    value: &Value,
    target: &TargetType,
    options: &CoercionOptions,
) -> Result<Option<Value>, CoercionError> {
    let outcome = try_coerce(value, target, options);
    if outcome.is_success() {
        return Ok(outcome.into_value());
    }
    let (_, message, code, cause) = outcome.into_parts();
    Err(match cause {
        Some(cause) => CoercionError::with_cause(message, code, cause),
        None => CoercionError::new(message, code),
    })
}
