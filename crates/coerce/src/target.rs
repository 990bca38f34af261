//! Target type descriptors.
//!
//! A [`TargetType`] names the shape a caller wants a [`Value`] coerced into.
//! Rust has no runtime `Type` handle that covers every shape, so the engine
//! works against this closed descriptor instead; typed callers get one for
//! free through [`Coercible::target_type`](crate::Coercible::target_type).
//!
//! Two notions of target travel through every conversion:
//!
//! - the **declared** target, exactly what the caller asked for (possibly
//!   wrapped in [`TargetType::Nullable`]);
//! - the **effective** target, the declared one with the nullable wrapper
//!   stripped. Converters reason about this one.

use core::any::TypeId;
use core::fmt;

use serde::de::DeserializeOwned;

use crate::value::{OpaqueValue, Value};

// ============================================================================
// NUMBER KIND
// ============================================================================

/// Members of the numeric family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
}

impl NumberKind {
    /// Rust spelling of the type, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "Decimal",
        }
    }

    /// Whether this kind is one of the eight integer widths.
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::F32 | Self::F64 | Self::Decimal)
    }

    /// Whether this kind is a binary floating point width.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// ENUM TYPE
// ============================================================================

/// Descriptor of an enumeration: its name and the names of its members.
///
/// Members are matched case-insensitively by the enumeration converter;
/// numeric ordinals are never accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: &'static str,
    members: &'static [&'static str],
}

impl EnumType {
    /// Creates a descriptor. `members` is the declaration order.
    pub const fn new(name: &'static str, members: &'static [&'static str]) -> Self {
        Self { name, members }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn members(&self) -> &'static [&'static str] {
        self.members
    }

    /// Index of the member whose name matches `candidate`, ignoring ASCII case.
    pub fn find_member(&self, candidate: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|member| member.eq_ignore_ascii_case(candidate))
    }
}

// ============================================================================
// COMPLEX TYPE
// ============================================================================

type DeserializeFn = fn(&serde_json::Value) -> Result<Value, serde_json::Error>;

/// Descriptor of a structured shape that JSON objects and arrays can be
/// deserialized into.
///
/// Built with [`ComplexType::of`]; the deserialized value is carried as a
/// [`Value::Opaque`]. Struct members are matched case-insensitively.
#[derive(Copy, Clone)]
pub struct ComplexType {
    name: &'static str,
    type_id: TypeId,
    deserialize: DeserializeFn,
}

impl ComplexType {
    /// Descriptor for any deserializable `T`.
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        Self {
            name: core::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            deserialize: deserialize_into::<T>,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Deserializes `node` into this shape.
    pub fn deserialize(&self, node: &serde_json::Value) -> Result<Value, serde_json::Error> {
        (self.deserialize)(node)
    }
}

fn deserialize_into<T>(node: &serde_json::Value) -> Result<Value, serde_json::Error>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    T::deserialize(crate::json::CaseInsensitive::new(node))
        .map(|value| Value::Opaque(OpaqueValue::new(value)))
}

impl PartialEq for ComplexType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComplexType {}

impl fmt::Debug for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TARGET TYPE
// ============================================================================

/// The shape a value is coerced into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetType {
    /// Accepts every value unchanged, including absence.
    Any,
    String,
    Bool,
    Char,
    Number(NumberKind),
    Uuid,
    /// Wall-clock timestamp without offset (`NaiveDateTime`).
    DateTime,
    /// Timestamp with a fixed UTC offset (`DateTime<FixedOffset>`).
    DateTimeOffset,
    /// Calendar date without time (`NaiveDate`).
    Date,
    /// Time of day without date (`NaiveTime`).
    Time,
    /// Signed span of time (`TimeDelta`).
    Duration,
    Enum(EnumType),
    /// The structured tree node itself; JSON input is passed through untouched.
    Json,
    Complex(ComplexType),
    /// Optional wrapper: accepts absence, otherwise behaves like the inner type.
    Nullable(Box<TargetType>),
}

impl TargetType {
    /// Wraps `inner` in [`TargetType::Nullable`].
    pub fn nullable(inner: Self) -> Self {
        match inner {
            nullable @ Self::Nullable(_) => nullable,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Shorthand for [`TargetType::Complex`] of `T`.
    pub fn complex<T>() -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        Self::Complex(ComplexType::of::<T>())
    }

    /// The declared type with any nullable wrapper stripped.
    pub fn effective(&self) -> &Self {
        match self {
            Self::Nullable(inner) => inner.effective(),
            other => other,
        }
    }

    /// Whether absence is a valid value of this type.
    pub const fn accepts_null(&self) -> bool {
        matches!(self, Self::Nullable(_) | Self::Any)
    }

    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Whether JSON objects and arrays may be deserialized into this type.
    ///
    /// Only [`TargetType::Complex`] qualifies: primitives, text, decimals,
    /// enums, temporal shapes, identifiers and `Any` never take structure.
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// Whether `value` already is an instance of this type.
    ///
    /// Call on the effective type; a nullable wrapper is not unwrapped here.
    pub fn is_instance(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Self::Any, _) => true,
            (Self::String, Value::String(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::Char, Value::Char(_))
            | (Self::Uuid, Value::Uuid(_))
            | (Self::DateTime, Value::DateTime(_))
            | (Self::DateTimeOffset, Value::DateTimeOffset(_))
            | (Self::Date, Value::Date(_))
            | (Self::Time, Value::Time(_))
            | (Self::Duration, Value::Duration(_))
            | (Self::Json, Value::Json(_)) => true,
            (Self::Number(kind), value) => value.number_kind() == Some(*kind),
            (Self::Enum(ty), Value::Enum(member)) => member.enum_type() == ty,
            (Self::Complex(ty), Value::Opaque(opaque)) => opaque.type_id() == ty.type_id(),
            _ => false,
        }
    }

    /// Human-readable type name used in diagnostics.
    pub fn name(&self) -> String {
        match self {
            Self::Nullable(inner) => format!("Option<{}>", inner.name()),
            other => other.simple_name().to_owned(),
        }
    }

    fn simple_name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "String",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Number(kind) => kind.name(),
            Self::Uuid => "Uuid",
            Self::DateTime => "NaiveDateTime",
            Self::DateTimeOffset => "DateTime<FixedOffset>",
            Self::Date => "NaiveDate",
            Self::Time => "NaiveTime",
            Self::Duration => "TimeDelta",
            Self::Enum(ty) => ty.name(),
            Self::Json => "serde_json::Value",
            Self::Complex(ty) => ty.name(),
            Self::Nullable(_) => "Option",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<NumberKind> for TargetType {
    fn from(kind: NumberKind) -> Self {
        Self::Number(kind)
    }
}

impl From<EnumType> for TargetType {
    fn from(ty: EnumType) -> Self {
        Self::Enum(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEKDAY: EnumType = EnumType::new("Weekday", &["Monday", "Tuesday"]);

    #[test]
    fn test_effective_strips_nullable() {
        let declared = TargetType::nullable(TargetType::Number(NumberKind::I32));
        assert_eq!(declared.effective(), &TargetType::Number(NumberKind::I32));
        assert_eq!(declared.name(), "Option<i32>");
    }

    #[test]
    fn test_nullable_does_not_double_wrap() {
        let once = TargetType::nullable(TargetType::Bool);
        let twice = TargetType::nullable(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_accepts_null() {
        assert!(TargetType::Any.accepts_null());
        assert!(TargetType::nullable(TargetType::Date).accepts_null());
        assert!(!TargetType::String.accepts_null());
        assert!(!TargetType::complex::<Vec<i32>>().accepts_null());
    }

    #[test]
    fn test_only_complex_is_complex() {
        assert!(TargetType::complex::<Vec<String>>().is_complex());
        for primitive in [
            TargetType::Any,
            TargetType::String,
            TargetType::Number(NumberKind::Decimal),
            TargetType::Uuid,
            TargetType::Duration,
            TargetType::Enum(WEEKDAY),
        ] {
            assert!(!primitive.is_complex(), "{primitive} must not be complex");
        }
    }

    #[test]
    fn test_is_instance() {
        assert!(TargetType::Number(NumberKind::I64).is_instance(&Value::I64(1)));
        assert!(!TargetType::Number(NumberKind::I64).is_instance(&Value::I32(1)));
        assert!(TargetType::Any.is_instance(&Value::from("x")));
        assert!(!TargetType::Any.is_instance(&Value::Null));
        assert!(TargetType::Enum(WEEKDAY).is_instance(&Value::Enum(
            crate::value::EnumValue::new(WEEKDAY, 1).unwrap()
        )));
    }

    #[test]
    fn test_find_member_ignores_case() {
        assert_eq!(WEEKDAY.find_member("tUESDAY"), Some(1));
        assert_eq!(WEEKDAY.find_member("Sunday"), None);
    }
}
