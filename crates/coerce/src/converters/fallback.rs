use crate::convert;
use crate::converter::Converter;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::Value;

/// Last resort: generic conversion for any target.
///
/// Never declines; a pair generic conversion cannot handle ends the scan
/// with `ConversionFailed`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackConverter;

impl Converter for FallbackConverter {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        match convert::change_type(value, effective, &options.culture) {
            Ok(converted) => Outcome::ok(Some(converted)),
            Err(fault) => Outcome::from_fault(value, declared, fault, &options.culture),
        }
    }
}
