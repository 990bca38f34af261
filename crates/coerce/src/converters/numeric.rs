use core::fmt::Display;
use core::str::FromStr;

use rust_decimal::Decimal;

use crate::convert;
use crate::converter::Converter;
use crate::culture::Culture;
use crate::error::ConversionFault;
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::{NumberKind, TargetType};
use crate::value::Value;

/// Every member of the numeric family.
///
/// With [`fast_numeric_parsing`](CoercionOptions::fast_numeric_parsing) on,
/// text is parsed straight into the target width and every parse failure,
/// out-of-range included, is reported as `InvalidFormat`. Otherwise text goes
/// through generic conversion, which tells `Overflow` apart from
/// `InvalidFormat`. Non-text sources always take generic conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericConverter;

impl Converter for NumericConverter {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn try_coerce(
        &self,
        value: &Value,
        effective: &TargetType,
        declared: &TargetType,
        options: &CoercionOptions,
    ) -> Outcome {
        let TargetType::Number(kind) = effective else {
            return super::not_mine(effective, "numeric");
        };

        let converted = match value {
            Value::String(text) if options.fast_numeric_parsing => {
                parse_width(text, *kind, &options.culture)
            }
            other => convert::change_type(other, effective, &options.culture),
        };
        match converted {
            Ok(converted) => Outcome::ok(Some(converted)),
            Err(fault) => Outcome::from_fault(value, declared, fault, &options.culture),
        }
    }
}

fn parse_width(text: &str, kind: NumberKind, culture: &Culture) -> Result<Value, ConversionFault> {
    if kind.is_integer() {
        let text = culture.normalize_integer(text);
        return match kind {
            NumberKind::I8 => parse(&text).map(Value::I8),
            NumberKind::U8 => parse(&text).map(Value::U8),
            NumberKind::I16 => parse(&text).map(Value::I16),
            NumberKind::U16 => parse(&text).map(Value::U16),
            NumberKind::I32 => parse(&text).map(Value::I32),
            NumberKind::U32 => parse(&text).map(Value::U32),
            NumberKind::I64 => parse(&text).map(Value::I64),
            _ => parse(&text).map(Value::U64),
        };
    }

    let text = culture.normalize_number(text);
    match kind {
        NumberKind::F32 => parse::<f32>(&text)
            .and_then(|n| in_range(n.is_infinite(), n, &text))
            .map(Value::F32),
        NumberKind::F64 => parse::<f64>(&text)
            .and_then(|n| in_range(n.is_infinite(), n, &text))
            .map(Value::F64),
        _ => parse::<Decimal>(&text).map(Value::Decimal),
    }
}

/// Rejects text that only parsed by saturating to infinity.
fn in_range<T>(infinite: bool, parsed: T, text: &str) -> Result<T, ConversionFault> {
    if infinite && !convert::names_infinity(text) {
        return Err(ConversionFault::format(format!(
            "'{text}' is outside the range of the target type"
        )));
    }
    Ok(parsed)
}

fn parse<T>(text: &str) -> Result<T, ConversionFault>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse::<T>()
        .map_err(|err| ConversionFault::format(err.to_string()))
}
