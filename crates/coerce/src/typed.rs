//! Typed entry points.
//!
//! [`Coercible`] ties a Rust type to its [`TargetType`] and knows how to
//! unwrap a coerced [`Value`] back into itself. It is implemented for the
//! scalar, temporal and identifier types, for `Option<T>` (a nullable
//! target) and for `Vec<T>` (a complex target). User enumerations and
//! structs opt in with [`coercible_enum!`](crate::coercible_enum) and
//! [`coercible_complex!`](crate::coercible_complex).
//!
//! ```
//! use nebula_coerce::{CoercionOptions, Value, coerce_as, try_coerce_as};
//!
//! let options = CoercionOptions::shared();
//! assert_eq!(coerce_as::<u16>(&"8080".into(), options).unwrap(), 8080);
//! assert_eq!(coerce_as::<Option<u16>>(&Value::Null, options).unwrap(), None);
//! assert!(!try_coerce_as::<u8>(&"256".into(), options).is_success());
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::engine;
use crate::error::{CoercionError, ErrorCode};
use crate::options::CoercionOptions;
use crate::outcome::TypedOutcome;
use crate::target::{NumberKind, TargetType};
use crate::value::Value;

/// A Rust type that values can be coerced into.
pub trait Coercible: Sized {
    /// The declared target for this type.
    fn target_type() -> TargetType;

    /// Unwraps a coerced value. `None` input is the absent value.
    fn from_value(value: Option<Value>) -> Option<Self>;

    /// Wraps `self` as a dynamic value; `None` is absence.
    fn into_value(self) -> Option<Value>;
}

/// Coerces `value` to `T` without failing loudly.
pub fn try_coerce_as<T: Coercible>(value: &Value, options: &CoercionOptions) -> TypedOutcome<T> {
    let target = T::target_type();
    let outcome = engine::try_coerce(value, &target, options);
    if !outcome.is_success() {
        return TypedOutcome::from_failure(outcome);
    }
    match T::from_value(outcome.into_value()) {
        Some(typed) => TypedOutcome::ok(typed),
        None => TypedOutcome::fail(
            format!("coerced value does not unwrap as '{}'", target.name()),
            ErrorCode::ConversionFailed,
        ),
    }
}

/// Coerces `value` to `T`, returning the failure as an error.
pub fn coerce_as<T: Coercible>(value: &Value, options: &CoercionOptions) -> Result<T, CoercionError> {
    let outcome = try_coerce_as::<T>(value, options);
    if !outcome.is_success() {
        let message = outcome.message().to_owned();
        let code = outcome.error_code();
        return Err(match outcome.into_cause() {
            Some(cause) => CoercionError::with_cause(message, code, cause),
            None => CoercionError::new(message, code),
        });
    }
    outcome.into_value().ok_or_else(|| {
        CoercionError::new("coercion succeeded without a value", ErrorCode::ConversionFailed)
    })
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

macro_rules! coercible_scalar {
    ($($ty:ty => $variant:ident, $target:expr;)+) => {
        $(
            impl Coercible for $ty {
                fn target_type() -> TargetType {
                    $target
                }

                fn from_value(value: Option<Value>) -> Option<Self> {
                    match value? {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn into_value(self) -> Option<Value> {
                    Some(Value::$variant(self))
                }
            }
        )+
    };
}

coercible_scalar! {
    bool => Bool, TargetType::Bool;
    char => Char, TargetType::Char;
    u8 => U8, TargetType::Number(NumberKind::U8);
    i8 => I8, TargetType::Number(NumberKind::I8);
    i16 => I16, TargetType::Number(NumberKind::I16);
    u16 => U16, TargetType::Number(NumberKind::U16);
    i32 => I32, TargetType::Number(NumberKind::I32);
    u32 => U32, TargetType::Number(NumberKind::U32);
    i64 => I64, TargetType::Number(NumberKind::I64);
    u64 => U64, TargetType::Number(NumberKind::U64);
    f32 => F32, TargetType::Number(NumberKind::F32);
    f64 => F64, TargetType::Number(NumberKind::F64);
    Decimal => Decimal, TargetType::Number(NumberKind::Decimal);
    String => String, TargetType::String;
    Uuid => Uuid, TargetType::Uuid;
    NaiveDateTime => DateTime, TargetType::DateTime;
    DateTime<FixedOffset> => DateTimeOffset, TargetType::DateTimeOffset;
    NaiveDate => Date, TargetType::Date;
    NaiveTime => Time, TargetType::Time;
    TimeDelta => Duration, TargetType::Duration;
    serde_json::Value => Json, TargetType::Json;
}

impl<T: Coercible> Coercible for Option<T> {
    fn target_type() -> TargetType {
        TargetType::nullable(T::target_type())
    }

    fn from_value(value: Option<Value>) -> Option<Self> {
        match value {
            None => Some(None),
            present => T::from_value(present).map(Some),
        }
    }

    fn into_value(self) -> Option<Value> {
        self.and_then(T::into_value)
    }
}

impl<T> Coercible for Vec<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn target_type() -> TargetType {
        TargetType::complex::<Self>()
    }

    fn from_value(value: Option<Value>) -> Option<Self> {
        extract_opaque(value)
    }

    fn into_value(self) -> Option<Value> {
        Some(Value::opaque(self))
    }
}

/// Clones a `T` out of an opaque value.
#[doc(hidden)]
pub fn extract_opaque<T: Clone + 'static>(value: Option<Value>) -> Option<T> {
    match value? {
        Value::Opaque(opaque) => opaque.downcast_ref::<T>().cloned(),
        _ => None,
    }
}

/// Implements [`Coercible`] for a fieldless enum, matched by member name.
///
/// ```
/// use nebula_coerce::{CoercionOptions, coerce_as, coercible_enum};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Level { Low, High }
/// coercible_enum!(Level { Low, High });
///
/// let level = coerce_as::<Level>(&"high".into(), CoercionOptions::shared()).unwrap();
/// assert_eq!(level, Level::High);
/// ```
#[macro_export]
macro_rules! coercible_enum {
    ($ty:ident { $($member:ident),+ $(,)? }) => {
        impl $ty {
            #[doc(hidden)]
            pub const ENUM_TYPE: $crate::EnumType =
                $crate::EnumType::new(stringify!($ty), &[$(stringify!($member)),+]);
        }

        impl $crate::Coercible for $ty {
            fn target_type() -> $crate::TargetType {
                $crate::TargetType::Enum(Self::ENUM_TYPE)
            }

            fn from_value(value: Option<$crate::Value>) -> Option<Self> {
                match value? {
                    $crate::Value::Enum(member) if *member.enum_type() == Self::ENUM_TYPE => {
                        match member.name() {
                            $(stringify!($member) => Some(Self::$member),)+
                            _ => None,
                        }
                    }
                    _ => None,
                }
            }

            fn into_value(self) -> Option<$crate::Value> {
                let name = match self {
                    $(Self::$member => stringify!($member),)+
                };
                $crate::EnumValue::from_name(Self::ENUM_TYPE, name).map($crate::Value::Enum)
            }
        }
    };
}

/// Implements [`Coercible`] for a deserializable, cloneable type that JSON
/// objects or arrays are coerced into.
#[macro_export]
macro_rules! coercible_complex {
    ($ty:ty) => {
        impl $crate::Coercible for $ty {
            fn target_type() -> $crate::TargetType {
                $crate::TargetType::complex::<$ty>()
            }

            fn from_value(value: Option<$crate::Value>) -> Option<Self> {
                $crate::typed::extract_opaque::<$ty>(value)
            }

            fn into_value(self) -> Option<$crate::Value> {
                Some($crate::Value::opaque(self))
            }
        }
    };
}
