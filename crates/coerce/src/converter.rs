//! The capability every converter implements.

use core::fmt::Debug;

use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::Value;

/// How the engine treats a converter during dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConverterRole {
    /// Takes part in the ordered scan.
    #[default]
    General,
    /// Owns enumeration targets. The engine routes every enum target to the
    /// first converter with this role and skips it during the ordinary scan.
    Enumeration,
}

/// A single conversion strategy.
///
/// Converters are stateless and shared across threads. A converter that does
/// not handle the requested combination must answer with
/// [`ErrorCode::UnsupportedSourceType`](crate::ErrorCode::UnsupportedSourceType)
/// so the engine moves on; any other failure ends the scan.
///
/// `effective` is `declared` with the nullable wrapper stripped. Converters
/// decide on `effective` and report failures against `declared`.
pub trait Converter: Send + Sync + Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn role(&self) -> ConverterRole {
        ConverterRole::General
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome;
}
