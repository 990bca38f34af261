//! Generic "change type" conversion.
//!
//! This is the catch-all used by the fallback converter and by the precise
//! numeric mode. It raises [`ConversionFault`]s and never panics: integers
//! are range-checked, floats round half to even and non-finite floats
//! overflow.

use core::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::culture::Culture;
use crate::error::ConversionFault;
use crate::target::{NumberKind, TargetType};
use crate::temporal;
use crate::value::Value;

/// Converts `value` into `target`, which must already be the effective type.
pub fn change_type(
    value: &Value,
    target: &TargetType,
    culture: &Culture,
) -> Result<Value, ConversionFault> {
    if target.is_instance(value) {
        return Ok(value.clone());
    }

    match target {
        TargetType::String => Ok(Value::String(value.to_text(culture))),
        TargetType::Number(kind) => to_number(value, *kind, culture),
        TargetType::Bool => to_bool(value).map(Value::Bool),
        TargetType::Char => to_char(value).map(Value::Char),
        TargetType::DateTime => match value {
            Value::String(text) => temporal::parse_datetime(text, culture).map(Value::DateTime),
            other => Err(invalid_cast(other, target)),
        },
        other => Err(invalid_cast(value, other)),
    }
}

fn invalid_cast(value: &Value, target: &TargetType) -> ConversionFault {
    ConversionFault::invalid_cast(format!(
        "invalid cast from '{}' to '{}'",
        value.type_name(),
        target.name()
    ))
}

/// Parses `true` or `false`, ignoring case and surrounding whitespace.
pub fn parse_bool(text: &str) -> Result<bool, ConversionFault> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConversionFault::format(format!(
            "'{trimmed}' is not a valid boolean"
        )))
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

/// Intermediate numeric form shared by every width.
#[derive(Copy, Clone, Debug)]
enum Numeric {
    Int(i128),
    Float(f64),
    Decimal(Decimal),
}

fn to_number(value: &Value, kind: NumberKind, culture: &Culture) -> Result<Value, ConversionFault> {
    let numeric = match value {
        Value::I8(v) => Numeric::Int(i128::from(*v)),
        Value::U8(v) => Numeric::Int(i128::from(*v)),
        Value::I16(v) => Numeric::Int(i128::from(*v)),
        Value::U16(v) => Numeric::Int(i128::from(*v)),
        Value::I32(v) => Numeric::Int(i128::from(*v)),
        Value::U32(v) => Numeric::Int(i128::from(*v)),
        Value::I64(v) => Numeric::Int(i128::from(*v)),
        Value::U64(v) => Numeric::Int(i128::from(*v)),
        Value::F32(v) => Numeric::Float(f64::from(*v)),
        Value::F64(v) => Numeric::Float(*v),
        Value::Decimal(v) => Numeric::Decimal(*v),
        Value::Bool(v) => Numeric::Int(i128::from(*v)),
        Value::Char(c) if kind.is_integer() => Numeric::Int(i128::from(u32::from(*c))),
        Value::String(text) => parse_numeric(text, kind, culture)?,
        other => return Err(invalid_cast(other, &TargetType::Number(kind))),
    };
    narrow(numeric, kind)
}

fn parse_numeric(text: &str, kind: NumberKind, culture: &Culture) -> Result<Numeric, ConversionFault> {
    let malformed = || {
        ConversionFault::format(format!(
            "'{}' is not a valid {kind} number",
            text.trim()
        ))
    };

    if kind.is_integer() {
        let normalized = culture.normalize_integer(text);
        return match normalized.parse::<i128>() {
            Ok(parsed) => Ok(Numeric::Int(parsed)),
            Err(err) => match err.kind() {
                core::num::IntErrorKind::PosOverflow | core::num::IntErrorKind::NegOverflow => {
                    Err(out_of_range(&normalized, kind))
                }
                _ => Err(malformed()),
            },
        };
    }

    let normalized = culture.normalize_number(text);
    if kind.is_float() {
        let parsed = normalized.parse::<f64>().map_err(|_| malformed())?;
        if parsed.is_infinite() && !names_infinity(&normalized) {
            return Err(out_of_range(&normalized, kind));
        }
        return Ok(Numeric::Float(parsed));
    }

    match Decimal::from_str(&normalized) {
        Ok(parsed) => Ok(Numeric::Decimal(parsed)),
        Err(_) if looks_decimal(&normalized) => Err(out_of_range(&normalized, kind)),
        Err(_) => Err(malformed()),
    }
}

/// Plain `[sign]digits[.digits]` text, the shape a decimal parse rejects
/// only when the value is out of range.
fn looks_decimal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `text` spells infinity rather than a finite value too large to hold.
pub(crate) fn names_infinity(text: &str) -> bool {
    let digits = text.trim().trim_start_matches(['-', '+']);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

fn out_of_range(shown: &str, kind: NumberKind) -> ConversionFault {
    ConversionFault::overflow(format!("value {shown} is out of range for {kind}"))
}

fn narrow(numeric: Numeric, kind: NumberKind) -> Result<Value, ConversionFault> {
    match kind {
        NumberKind::F32 => Ok(Value::F32(match numeric {
            Numeric::Int(i) => i as f32,
            Numeric::Float(f) => {
                let narrowed = f as f32;
                if narrowed.is_infinite() && f.is_finite() {
                    return Err(out_of_range(&f.to_string(), kind));
                }
                narrowed
            }
            Numeric::Decimal(d) => d.to_f32().ok_or_else(|| out_of_range(&d.to_string(), kind))?,
        })),
        NumberKind::F64 => Ok(Value::F64(match numeric {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
            Numeric::Decimal(d) => d.to_f64().ok_or_else(|| out_of_range(&d.to_string(), kind))?,
        })),
        NumberKind::Decimal => match numeric {
            Numeric::Int(i) => Decimal::try_from_i128_with_scale(i, 0)
                .map(Value::Decimal)
                .map_err(|_| out_of_range(&i.to_string(), kind)),
            Numeric::Float(f) => Decimal::from_f64(f)
                .map(Value::Decimal)
                .ok_or_else(|| out_of_range(&f.to_string(), kind)),
            Numeric::Decimal(d) => Ok(Value::Decimal(d)),
        },
        integer => narrow_integer(to_integer(numeric, integer)?, integer),
    }
}

fn to_integer(numeric: Numeric, kind: NumberKind) -> Result<i128, ConversionFault> {
    match numeric {
        Numeric::Int(i) => Ok(i),
        Numeric::Float(f) => {
            let rounded = f.round_ties_even();
            if !rounded.is_finite() || rounded < i128::MIN as f64 || rounded >= i128::MAX as f64 {
                return Err(out_of_range(&f.to_string(), kind));
            }
            Ok(rounded as i128)
        }
        Numeric::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i128()
            .ok_or_else(|| out_of_range(&d.to_string(), kind)),
    }
}

fn narrow_integer(value: i128, kind: NumberKind) -> Result<Value, ConversionFault> {
    let overflow = |_| out_of_range(&value.to_string(), kind);
    Ok(match kind {
        NumberKind::I8 => Value::I8(i8::try_from(value).map_err(overflow)?),
        NumberKind::U8 => Value::U8(u8::try_from(value).map_err(overflow)?),
        NumberKind::I16 => Value::I16(i16::try_from(value).map_err(overflow)?),
        NumberKind::U16 => Value::U16(u16::try_from(value).map_err(overflow)?),
        NumberKind::I32 => Value::I32(i32::try_from(value).map_err(overflow)?),
        NumberKind::U32 => Value::U32(u32::try_from(value).map_err(overflow)?),
        NumberKind::I64 => Value::I64(i64::try_from(value).map_err(overflow)?),
        NumberKind::U64 => Value::U64(u64::try_from(value).map_err(overflow)?),
        NumberKind::F32 | NumberKind::F64 | NumberKind::Decimal => {
            return Err(ConversionFault::invalid_cast(format!(
                "{kind} is not an integer width"
            )));
        }
    })
}

// ============================================================================
// BOOL / CHAR
// ============================================================================

fn to_bool(value: &Value) -> Result<bool, ConversionFault> {
    Ok(match value {
        Value::String(text) => return parse_bool(text),
        Value::I8(v) => *v != 0,
        Value::U8(v) => *v != 0,
        Value::I16(v) => *v != 0,
        Value::U16(v) => *v != 0,
        Value::I32(v) => *v != 0,
        Value::U32(v) => *v != 0,
        Value::I64(v) => *v != 0,
        Value::U64(v) => *v != 0,
        Value::F32(v) => *v != 0.0,
        Value::F64(v) => *v != 0.0,
        Value::Decimal(v) => !v.is_zero(),
        other => return Err(invalid_cast(other, &TargetType::Bool)),
    })
}

fn to_char(value: &Value) -> Result<char, ConversionFault> {
    if let Value::String(text) = value {
        let mut chars = text.chars();
        return match (chars.next(), chars.next()) {
            (Some(single), None) => Ok(single),
            _ => Err(ConversionFault::format(
                "text must be exactly one character long",
            )),
        };
    }

    let code = match value {
        Value::I8(v) => i128::from(*v),
        Value::U8(v) => i128::from(*v),
        Value::I16(v) => i128::from(*v),
        Value::U16(v) => i128::from(*v),
        Value::I32(v) => i128::from(*v),
        Value::U32(v) => i128::from(*v),
        Value::I64(v) => i128::from(*v),
        Value::U64(v) => i128::from(*v),
        other => return Err(invalid_cast(other, &TargetType::Char)),
    };
    u32::try_from(code)
        .ok()
        .filter(|code| *code <= 0xFFFF)
        .and_then(char::from_u32)
        .ok_or_else(|| {
            ConversionFault::overflow(format!("{code} is not a valid character code point"))
        })
}
