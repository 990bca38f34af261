use crate::converter::Converter;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::Value;

/// Renders any value as culture-aware text.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl Converter for StringConverter {
    fn name(&self) -> &'static str {
        "string"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        _declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::String {
            return super::not_mine(effective, "String");
        }
        Outcome::value_of(value.to_text(&options.culture))
    }
}
