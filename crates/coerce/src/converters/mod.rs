//! Built-in converters.
//!
//! [`builtin`] returns them in dispatch order:
//!
//! | # | Converter | Handles |
//! |---|-----------|---------|
//! | 1 | [`StringConverter`] | `String` |
//! | 2 | [`BooleanConverter`] | `bool` |
//! | 3 | [`UuidConverter`] | `Uuid` |
//! | 4 | [`EnumConverter`] | enumerations (routed, not scanned) |
//! | 5 | [`DateTimeConverter`] | `NaiveDateTime` |
//! | 6 | [`DateTimeOffsetConverter`] | `DateTime<FixedOffset>` |
//! | 7 | [`DateConverter`] | `NaiveDate` |
//! | 8 | [`TimeConverter`] | `NaiveTime` |
//! | 9 | [`DurationConverter`] | `TimeDelta` |
//! | 10 | [`NumericConverter`] | every number width |
//! | 11 | [`FallbackConverter`] | anything generic conversion accepts |

mod boolean;
mod enumeration;
mod fallback;
mod identifier;
mod numeric;
mod string;
mod temporal;

use std::sync::Arc;

pub use boolean::BooleanConverter;
pub use enumeration::EnumConverter;
pub use fallback::FallbackConverter;
pub use identifier::UuidConverter;
pub use numeric::NumericConverter;
pub use string::StringConverter;
pub use temporal::{
    DateConverter, DateTimeConverter, DateTimeOffsetConverter, DurationConverter, TimeConverter,
};

use crate::converter::Converter;
use crate::error::ErrorCode;
use crate::outcome::Outcome;
use crate::target::TargetType;

/// The built-in converters in their default order.
///
/// The delegating converters share one [`FallbackConverter`].
pub fn builtin() -> Vec<Arc<dyn Converter>> {
    let fallback = Arc::new(FallbackConverter);
    vec![
        Arc::new(StringConverter),
        Arc::new(BooleanConverter),
        Arc::new(UuidConverter::new(Arc::clone(&fallback))),
        Arc::new(EnumConverter),
        Arc::new(DateTimeConverter),
        Arc::new(DateTimeOffsetConverter),
        Arc::new(DateConverter::new(Arc::clone(&fallback))),
        Arc::new(TimeConverter::new(Arc::clone(&fallback))),
        Arc::new(DurationConverter::new(Arc::clone(&fallback))),
        Arc::new(NumericConverter),
        fallback,
    ]
}

/// The decline answer: lets the engine try the next converter.
fn not_mine(effective: &TargetType, handled: &str) -> Outcome {
    Outcome::fail(
        format!("target '{}' is not {handled}", effective.name()),
        ErrorCode::UnsupportedSourceType,
    )
}
