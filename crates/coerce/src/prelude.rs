//! Prelude module for convenient imports.
//!
//! ```
//! use nebula_coerce::prelude::*;
//!
//! let level: Option<u8> = coerce_as(&Value::Null, CoercionOptions::shared()).unwrap();
//! assert_eq!(level, None);
//! ```

pub use crate::converter::{Converter, ConverterRole};
pub use crate::culture::Culture;
pub use crate::engine::{coerce, try_coerce};
pub use crate::error::{CoercionError, ErrorCode};
pub use crate::options::CoercionOptions;
pub use crate::outcome::{Outcome, TypedOutcome};
pub use crate::target::{EnumType, NumberKind, TargetType};
pub use crate::typed::{Coercible, coerce_as, try_coerce_as};
pub use crate::value::Value;
pub use crate::{coercible_complex, coercible_enum};
