use crate::convert;
use crate::converter::Converter;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::Value;

/// Booleans from strict `true` / `false` text or from numbers.
///
/// Numbers map non-zero to `true`. Enumerations reject numbers outright;
/// booleans deliberately do not.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanConverter;

impl Converter for BooleanConverter {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::Bool {
            return super::not_mine(effective, "bool");
        }

        let converted = match value {
            Value::String(text) => convert::parse_bool(text).map(Value::Bool),
            other => convert::change_type(other, effective, &options.culture),
        };
        match converted {
            Ok(converted) => Outcome::ok(Some(converted)),
            Err(fault) => Outcome::from_fault(value, declared, fault, &options.culture),
        }
    }
}
