//! Result objects returned by the non-throwing entry points.

use std::sync::Arc;

use crate::culture::Culture;
use crate::error::{ConversionFault, ErrorCode, classify, preview};
use crate::target::TargetType;
use crate::typed::Coercible;
use crate::value::Value;

// ============================================================================
// UNTYPED OUTCOME
// ============================================================================

/// Outcome of an untyped coercion.
///
/// A success carries `ErrorCode::None` and an empty message; a failure
/// carries a non-empty message, a failure code and no value. The value of a
/// success may itself be absent (null into a nullable target).
#[derive(Debug, Clone)]
pub struct Outcome {
    success: bool,
    value: Option<Value>,
    message: String,
    error_code: ErrorCode,
    cause: Option<Arc<ConversionFault>>,
}

impl Outcome {
    pub fn ok(value: Option<Value>) -> Self {
        Self {
            success: true,
            value,
            message: String::new(),
            error_code: ErrorCode::None,
            cause: None,
        }
    }

    /// Shorthand for a success carrying a present value.
    pub fn value_of(value: impl Into<Value>) -> Self {
        Self::ok(Some(value.into()))
    }

    /// A failure without an underlying fault.
    ///
    /// `ErrorCode::None` is not a failure code and is recorded as
    /// `ConversionFailed`.
    pub fn fail(message: impl Into<String>, code: ErrorCode) -> Self {
        let code = if code.is_failure() {
            code
        } else {
            ErrorCode::ConversionFailed
        };
        let mut message = message.into();
        if message.is_empty() {
            message = format!("coercion failed ({code})");
        }
        Self {
            success: false,
            value: None,
            message,
            error_code: code,
            cause: None,
        }
    }

    pub fn fail_with_cause(
        message: impl Into<String>,
        code: ErrorCode,
        cause: Arc<ConversionFault>,
    ) -> Self {
        Self {
            cause: Some(cause),
            ..Self::fail(message, code)
        }
    }

    /// Builds a failure from a conversion fault, classifying it and
    /// formatting the standard message with a preview of `value`.
    pub fn from_fault(
        value: &Value,
        declared: &TargetType,
        fault: ConversionFault,
        culture: &Culture,
    ) -> Self {
        let code = classify(&fault);
        let message = format!(
            "cannot convert '{}' ({}) to type '{}': {}",
            preview(&value.to_text(culture)),
            value.type_name(),
            declared.name(),
            fault,
        );
        Self::fail_with_cause(message, code, Arc::new(fault))
    }

    pub const fn is_success(&self) -> bool {
        self.success
    }

    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn cause(&self) -> Option<&Arc<ConversionFault>> {
        self.cause.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<Value>, String, ErrorCode, Option<Arc<ConversionFault>>) {
        (self.value, self.message, self.error_code, self.cause)
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        self.success == other.success
            && self.value == other.value
            && self.message == other.message
            && self.error_code == other.error_code
    }
}

// ============================================================================
// TYPED OUTCOME
// ============================================================================

/// Outcome of a typed coercion to `T`.
#[derive(Debug, Clone)]
pub struct TypedOutcome<T> {
    success: bool,
    value: Option<T>,
    message: String,
    error_code: ErrorCode,
    cause: Option<Arc<ConversionFault>>,
}

impl<T> TypedOutcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            success: true,
            value: Some(value),
            message: String::new(),
            error_code: ErrorCode::None,
            cause: None,
        }
    }

    pub fn fail(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::from_failure(Outcome::fail(message, code))
    }

    /// Carries the failure of an untyped outcome over to `T`.
    pub(crate) fn from_failure(outcome: Outcome) -> Self {
        let (_, message, error_code, cause) = outcome.into_parts();
        Self {
            success: false,
            value: None,
            message,
            error_code,
            cause,
        }
    }

    pub const fn is_success(&self) -> bool {
        self.success
    }

    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn cause(&self) -> Option<&Arc<ConversionFault>> {
        self.cause.as_ref()
    }

    pub(crate) fn into_cause(self) -> Option<Arc<ConversionFault>> {
        self.cause
    }
}

impl<T: PartialEq> PartialEq for TypedOutcome<T> {
    fn eq(&self, other: &Self) -> bool {
        self.success == other.success
            && self.value == other.value
            && self.message == other.message
            && self.error_code == other.error_code
    }
}

impl<T: Coercible> From<TypedOutcome<T>> for Outcome {
    fn from(typed: TypedOutcome<T>) -> Self {
        Self {
            success: typed.success,
            value: typed.value.and_then(Coercible::into_value),
            message: typed.message,
            error_code: typed.error_code,
            cause: typed.cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::NumberKind;

    #[test]
    fn test_success_invariant() {
        let ok = Outcome::value_of(5_i32);
        assert!(ok.is_success());
        assert_eq!(ok.error_code(), ErrorCode::None);
        assert!(ok.message().is_empty());

        let absent = Outcome::ok(None);
        assert!(absent.is_success());
        assert!(absent.value().is_none());
    }

    #[test]
    fn test_fail_never_reports_none() {
        let failed = Outcome::fail("", ErrorCode::None);
        assert!(!failed.is_success());
        assert_eq!(failed.error_code(), ErrorCode::ConversionFailed);
        assert!(!failed.message().is_empty());
    }

    #[test]
    fn test_from_fault_message() {
        let outcome = Outcome::from_fault(
            &Value::from("abc"),
            &TargetType::Number(NumberKind::I32),
            ConversionFault::format("invalid digit"),
            &Culture::invariant(),
        );
        assert_eq!(outcome.error_code(), ErrorCode::InvalidFormat);
        assert_eq!(
            outcome.message(),
            "cannot convert 'abc' (String) to type 'i32': invalid digit"
        );
        assert!(outcome.cause().is_some());
        assert!(outcome.value().is_none());
    }

    #[test]
    fn test_equality_ignores_cause() {
        let with = Outcome::fail_with_cause(
            "x",
            ErrorCode::Overflow,
            Arc::new(ConversionFault::overflow("x")),
        );
        let without = Outcome::fail("x", ErrorCode::Overflow);
        assert_eq!(with, without);
    }

    #[test]
    fn test_typed_widens_to_untyped() {
        let typed = TypedOutcome::ok(7_u8);
        let untyped: Outcome = typed.into();
        assert_eq!(untyped, Outcome::value_of(7_u8));

        let failed: Outcome = TypedOutcome::<u8>::fail("nope", ErrorCode::Overflow).into();
        assert_eq!(failed.error_code(), ErrorCode::Overflow);
        assert!(failed.value().is_none());
    }
}
