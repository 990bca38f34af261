use std::sync::Arc;

use uuid::Uuid;

use super::FallbackConverter;
use crate::converter::Converter;
use crate::error::ConversionFault;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::TargetType;
use crate::value::Value;

/// Identifiers from text in any form `Uuid::parse_str` reads.
#[derive(Debug, Clone)]
pub struct UuidConverter {
    fallback: Arc<FallbackConverter>,
}

impl UuidConverter {
    pub fn new(fallback: Arc<FallbackConverter>) -> Self {
        Self { fallback }
    }
}

impl Converter for UuidConverter {
    fn name(&self) -> &'static str {
        "uuid"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        if *effective != TargetType::Uuid {
            return super::not_mine(effective, "Uuid");
        }

        let Value::String(text) = value else {
            return self.fallback.try_coerce(value, effective, declared, options);
        };
        match Uuid::parse_str(text.trim()) {
            Ok(id) => Outcome::value_of(id),
            Err(err) => Outcome::from_fault(
                value,
                declared,
                ConversionFault::format(err.to_string()),
                &options.culture,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn converter() -> UuidConverter {
        UuidConverter::new(Arc::new(FallbackConverter))
    }

    #[test]
    fn test_parses_hyphenated_and_simple() {
        let expected = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        for text in [
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "67e5504410b1426f9247bb680e5fe0c8",
            "{67e55044-10b1-426f-9247-bb680e5fe0c8}",
        ] {
            let outcome = converter().try_coerce(
                &Value::from(text),
                &TargetType::Uuid,
                &TargetType::Uuid,
                CoercionOptions::shared(),
            );
            assert_eq!(outcome.value(), Some(&Value::Uuid(expected)), "{text}");
        }
    }

    #[test]
    fn test_bad_text_is_invalid_format() {
        let outcome = converter().try_coerce(
            &Value::from("nope"),
            &TargetType::Uuid,
            &TargetType::Uuid,
            CoercionOptions::shared(),
        );
        assert_eq!(outcome.error_code(), ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_non_text_delegates_to_fallback() {
        let outcome = converter().try_coerce(
            &Value::I32(5),
            &TargetType::Uuid,
            &TargetType::Uuid,
            CoercionOptions::shared(),
        );
        assert_eq!(outcome.error_code(), ErrorCode::ConversionFailed);
        assert!(outcome.message().contains("invalid cast"));
    }
}
