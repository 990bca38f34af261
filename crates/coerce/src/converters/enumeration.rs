use crate::converter::{Converter, ConverterRole};
use crate::error::ErrorCode;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::{EnumValue, Value};

/// Enumeration members from their names, matched ignoring case.
///
/// Only names are accepted. Native numbers are declined and numeric text is
/// rejected, so an ordinal can never select a member.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumConverter;

impl Converter for EnumConverter {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn role(&self) -> ConverterRole {
        ConverterRole::Enumeration
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        _declared: &TargetType,
        _options: &CoercionOptions,
    ) -> Outcome {
        let TargetType::Enum(enum_type) = effective else {
            return super::not_mine(effective, "an enumeration");
        };
        let type_name = enum_type.name();

        let Value::String(text) = value else {
            return Outcome::fail(
                format!(
                    "enum values must be string names only; received '{value}' ({}) for enum type '{type_name}'",
                    value.type_name()
                ),
                ErrorCode::UnsupportedSourceType,
            );
        };

        let candidate = text.trim();
        if candidate.is_empty() {
            return Outcome::fail(
                format!(
                    "enum values must be string names only; received empty value for enum type '{type_name}'"
                ),
                ErrorCode::InvalidEnumMember,
            );
        }
        if candidate.parse::<i64>().is_ok() {
            return Outcome::fail(
                format!(
                    "enum values must be string names only; numeric value '{candidate}' is not allowed for enum type '{type_name}'"
                ),
                ErrorCode::InvalidEnumMember,
            );
        }

        match enum_type
            .find_member(candidate)
            .and_then(|index| EnumValue::new(*enum_type, index))
        {
            Some(member) => Outcome::value_of(member),
            None => Outcome::fail(
                format!("'{candidate}' is not a valid member of enum type '{type_name}'"),
                ErrorCode::InvalidEnumMember,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::target::EnumType;

    const STATUS: EnumType = EnumType::new("Status", &["Active", "Inactive", "Pending"]);

    fn coerce(value: Value) -> Outcome {
        let target = TargetType::Enum(STATUS);
        EnumConverter.try_coerce(&value, &target, &target, CoercionOptions::shared())
    }

    #[rstest]
    #[case::exact("Active", 0)]
    #[case::lower("inactive", 1)]
    #[case::upper("PENDING", 2)]
    #[case::padded("  Active  ", 0)]
    fn test_member_names(#[case] input: &str, #[case] index: usize) {
        let outcome = coerce(Value::from(input));
        assert_eq!(
            outcome.value(),
            Some(&Value::Enum(EnumValue::new(STATUS, index).unwrap()))
        );
    }

    #[rstest]
    #[case::ordinal("1")]
    #[case::negative("-1")]
    #[case::signed("+2")]
    #[case::empty("")]
    #[case::blank("   ")]
    fn test_non_names_are_invalid_members(#[case] input: &str) {
        let outcome = coerce(Value::from(input));
        assert_eq!(outcome.error_code(), ErrorCode::InvalidEnumMember);
        assert!(
            outcome
                .message()
                .starts_with("enum values must be string names only")
        );
    }

    #[test]
    fn test_unknown_name() {
        let outcome = coerce(Value::from("Deleted"));
        assert_eq!(outcome.error_code(), ErrorCode::InvalidEnumMember);
        assert_eq!(
            outcome.message(),
            "'Deleted' is not a valid member of enum type 'Status'"
        );
    }

    #[test]
    fn test_native_number_is_unsupported() {
        let outcome = coerce(Value::I32(1));
        assert_eq!(outcome.error_code(), ErrorCode::UnsupportedSourceType);
        assert!(
            outcome
                .message()
                .starts_with("enum values must be string names only")
        );
    }

    #[test]
    fn test_role() {
        assert_eq!(EnumConverter.role(), ConverterRole::Enumeration);
    }
}
