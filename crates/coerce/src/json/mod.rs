//! Structured JSON input.
//!
//! A [`Value::Json`] node is unwrapped before dispatch: scalars are re-issued
//! through the engine as their native values, and objects and arrays are
//! deserialized into [`TargetType::Complex`] shapes.

mod de;

use core::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value as Json};

pub use de::CaseInsensitive;

use crate::engine;
use crate::error::{ConversionFault, ErrorCode};
use crate::options::CoercionOptions;
use crate::outcome::Outcome;
use crate::target::{NumberKind, TargetType};
use crate::value::Value;

/// Coerces a JSON node to `declared`.
pub(crate) fn coerce_json(node: &Json, declared: &TargetType, options: &CoercionOptions) -> Outcome {
    match node {
        Json::String(text) => engine::try_coerce(&Value::String(text.clone()), declared, options),
        Json::Bool(flag) => engine::try_coerce(&Value::Bool(*flag), declared, options),
        Json::Null => engine::try_coerce(&Value::Null, declared, options),
        Json::Number(number) => {
            let value = match declared.effective() {
                TargetType::Number(kind) => extract_number(number, *kind),
                _ => None,
            }
            .unwrap_or_else(|| Value::String(number.to_string()));
            engine::try_coerce(&value, declared, options)
        }
        Json::Object(_) | Json::Array(_) => deserialize_complex(node, declared, options),
    }
}

/// Reads `number` as exactly `kind`, if it fits.
fn extract_number(number: &Number, kind: NumberKind) -> Option<Value> {
    match kind {
        NumberKind::U8 => number.as_u64().and_then(|n| u8::try_from(n).ok()).map(Value::U8),
        NumberKind::I8 => number.as_i64().and_then(|n| i8::try_from(n).ok()).map(Value::I8),
        NumberKind::I16 => number.as_i64().and_then(|n| i16::try_from(n).ok()).map(Value::I16),
        NumberKind::U16 => number.as_u64().and_then(|n| u16::try_from(n).ok()).map(Value::U16),
        NumberKind::I32 => number.as_i64().and_then(|n| i32::try_from(n).ok()).map(Value::I32),
        NumberKind::U32 => number.as_u64().and_then(|n| u32::try_from(n).ok()).map(Value::U32),
        NumberKind::I64 => number.as_i64().map(Value::I64),
        NumberKind::U64 => number.as_u64().map(Value::U64),
        NumberKind::Decimal => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
                .map(Value::Decimal)
        }
        NumberKind::F64 => number.as_f64().map(Value::F64),
        NumberKind::F32 => number
            .as_f64()
            .map(|n| n as f32)
            .filter(|n| n.is_finite())
            .map(Value::F32),
    }
}

fn deserialize_complex(node: &Json, declared: &TargetType, options: &CoercionOptions) -> Outcome {
    let kind = if node.is_array() { "array" } else { "object" };
    let TargetType::Complex(shape) = declared.effective() else {
        return Outcome::fail(
            format!(
                "cannot convert JSON {kind} to non-complex type '{}'",
                declared.name()
            ),
            ErrorCode::UnsupportedSourceType,
        );
    };

    match shape.deserialize(node) {
        Ok(value) => Outcome::ok(Some(value)),
        Err(err) => Outcome::from_fault(
            &Value::Json(node.clone()),
            declared,
            ConversionFault::from(err),
            &options.culture,
        ),
    }
}
