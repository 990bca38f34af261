//! Error model: categorized codes, low-level faults and the throwing error.
//!
//! Three layers:
//!
//! - [`ConversionFault`] is what a primitive conversion step raises.
//! - [`classify`] maps a fault onto an [`ErrorCode`].
//! - [`CoercionError`] is returned by the `Result`-returning entry points and
//!   keeps the fault as its [`source`](std::error::Error::source).

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR CODE
// ============================================================================

/// Category of a coercion outcome.
///
/// `None` marks success; every failure carries one of the other codes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    #[default]
    None,
    /// The converter does not handle this source/target combination.
    ///
    /// The only code that lets the engine keep scanning.
    UnsupportedSourceType,
    /// Text or structure does not match the expected format.
    InvalidFormat,
    /// The value does not fit the target's range.
    Overflow,
    /// Generic failure: null into a non-nullable target, no converter, bad cast.
    ConversionFailed,
    /// Input is not a member name of the target enumeration.
    InvalidEnumMember,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::UnsupportedSourceType => "unsupported_source_type",
            Self::InvalidFormat => "invalid_format",
            Self::Overflow => "overflow",
            Self::ConversionFailed => "conversion_failed",
            Self::InvalidEnumMember => "invalid_enum_member",
        }
    }

    pub const fn is_failure(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONVERSION FAULT
// ============================================================================

/// A fault raised by a primitive conversion step.
#[derive(Debug, thiserror::Error)]
pub enum ConversionFault {
    #[error("{0}")]
    Format(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Overflow(String),

    #[error("{0}")]
    NotSupported(String),

    #[error("{0}")]
    InvalidCast(String),
}

impl ConversionFault {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::Overflow(message.into())
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported(message.into())
    }

    pub fn invalid_cast(message: impl Into<String>) -> Self {
        Self::InvalidCast(message.into())
    }

    pub fn error_code(&self) -> ErrorCode {
        classify(self)
    }
}

/// Maps a fault onto the code reported to callers.
pub fn classify(fault: &ConversionFault) -> ErrorCode {
    match fault {
        ConversionFault::Format(_) | ConversionFault::Json(_) => ErrorCode::InvalidFormat,
        ConversionFault::Overflow(_) => ErrorCode::Overflow,
        ConversionFault::NotSupported(_) => ErrorCode::UnsupportedSourceType,
        ConversionFault::InvalidCast(_) => ErrorCode::ConversionFailed,
    }
}

// ============================================================================
// COERCION ERROR
// ============================================================================

/// Error returned by [`coerce`](crate::coerce) and [`coerce_as`](crate::coerce_as).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CoercionError {
    message: String,
    code: ErrorCode,
    #[source]
    cause: Option<Arc<ConversionFault>>,
}

impl CoercionError {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            cause: None,
        }
    }

    pub fn with_cause(
        message: impl Into<String>,
        code: ErrorCode,
        cause: Arc<ConversionFault>,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            cause: Some(cause),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn cause(&self) -> Option<&ConversionFault> {
        self.cause.as_deref()
    }
}

const PREVIEW_LIMIT: usize = 50;

/// Cuts `text` to the preview limit, marking the cut with an ellipsis.
pub(crate) fn preview(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(&ConversionFault::format("x")),
            ErrorCode::InvalidFormat
        );
        assert_eq!(classify(&ConversionFault::overflow("x")), ErrorCode::Overflow);
        assert_eq!(
            classify(&ConversionFault::not_supported("x")),
            ErrorCode::UnsupportedSourceType
        );
        assert_eq!(
            classify(&ConversionFault::invalid_cast("x")),
            ErrorCode::ConversionFailed
        );

        let json = serde_json::from_str::<i32>("nope").unwrap_err();
        assert_eq!(
            ConversionFault::from(json).error_code(),
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        let long = "é".repeat(60);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), PREVIEW_LIMIT + 1);
        assert!(cut.ends_with('…'));

        let exact = "a".repeat(PREVIEW_LIMIT);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_error_source_is_cause() {
        let plain = CoercionError::new("boom", ErrorCode::ConversionFailed);
        assert!(plain.source().is_none());
        assert_eq!(plain.to_string(), "boom");

        let caused = CoercionError::with_cause(
            "boom",
            ErrorCode::Overflow,
            Arc::new(ConversionFault::overflow("too big")),
        );
        assert_eq!(caused.source().map(ToString::to_string).as_deref(), Some("too big"));
        assert_eq!(caused.code(), ErrorCode::Overflow);
    }

    #[test]
    fn test_error_code_serde_names() {
        let json = serde_json::to_string(&ErrorCode::InvalidEnumMember).unwrap();
        assert_eq!(json, "\"invalid_enum_member\"");
    }
}
