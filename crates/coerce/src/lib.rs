//! # nebula-coerce
//!
//! Non-throwing coercion of loosely typed values into statically typed ones,
//! with categorized diagnostics.
//!
//! Inputs that arrive as text, numbers of the wrong width or JSON trees
//! (config files, query parameters, dynamic payloads) are turned into the
//! requested shape by an ordered pipeline of converters. The default entry
//! point never fails loudly: it returns an [`Outcome`] telling apart success,
//! a recoverable mismatch and a hard failure, each failure tagged with an
//! [`ErrorCode`].
//!
//! ## Quick Start
//!
//! ```
//! use nebula_coerce::prelude::*;
//!
//! let options = CoercionOptions::shared();
//!
//! let port = try_coerce(&Value::from("8080"), &TargetType::Number(NumberKind::U16), options);
//! assert_eq!(port.value(), Some(&Value::U16(8080)));
//!
//! let bad = try_coerce(&Value::from("eighty"), &TargetType::Number(NumberKind::U16), options);
//! assert_eq!(bad.error_code(), ErrorCode::InvalidFormat);
//!
//! let flag: bool = coerce_as(&Value::from("TRUE"), options).unwrap();
//! assert!(flag);
//! ```
//!
//! ## Dispatch
//!
//! See [`engine`] for the order of evaluation. Converters implement
//! [`Converter`]; the built-in set lives in [`converters`] and is assembled by
//! [`CoercionOptions::new`]. Custom converters are pushed onto an owned
//! [`CoercionOptions`]; the [`shared`](CoercionOptions::shared) default is
//! immutable.
//!
//! ## Error model
//!
//! | Code | Meaning |
//! |------|---------|
//! | [`UnsupportedSourceType`](ErrorCode::UnsupportedSourceType) | the converter does not handle this pair; dispatch continues |
//! | [`InvalidFormat`](ErrorCode::InvalidFormat) | text or structure does not parse |
//! | [`Overflow`](ErrorCode::Overflow) | the value does not fit the target |
//! | [`ConversionFailed`](ErrorCode::ConversionFailed) | null into a non-nullable target, nothing matched, bad cast |
//! | [`InvalidEnumMember`](ErrorCode::InvalidEnumMember) | not a member name of the enumeration |
//!
//! [`coerce`] and [`coerce_as`] return the same failures as a
//! [`CoercionError`] whose `source()` carries the underlying [`ConversionFault`].

pub mod convert;
pub mod converter;
pub mod converters;
pub mod culture;
pub mod engine;
pub mod error;
pub mod json;
pub mod options;
pub mod outcome;
pub mod prelude;
pub mod target;
pub mod temporal;
pub mod typed;
pub mod value;

pub use converter::{Converter, ConverterRole};
pub use culture::{Culture, DateOrder};
pub use engine::{coerce, try_coerce};
pub use error::{CoercionError, ConversionFault, ErrorCode, classify};
pub use options::{CoercionOptions, CoercionSettings, SettingsError};
pub use outcome::{Outcome, TypedOutcome};
pub use target::{ComplexType, EnumType, NumberKind, TargetType};
pub use typed::{Coercible, coerce_as, try_coerce_as};
pub use value::{EnumValue, OpaqueValue, Value};
