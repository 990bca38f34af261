//! The dynamic runtime value that coercion starts from.

use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::culture::Culture;
use crate::target::{EnumType, NumberKind};
use crate::temporal;

// ============================================================================
// VALUE
// ============================================================================

/// A loosely typed input value.
///
/// `Null` stands for absence. `Json` carries a structured tree node that the
/// engine unwraps before dispatch; `Opaque` carries any other Rust value,
/// typically the result of deserializing into a complex shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    String(String),
    Uuid(Uuid),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time(NaiveTime),
    Duration(TimeDelta),
    Enum(EnumValue),
    Json(serde_json::Value),
    Opaque(OpaqueValue),
}

impl Value {
    /// Wraps an arbitrary Rust value.
    pub fn opaque<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Opaque(OpaqueValue::new(value))
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the text of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// The numeric width of this value, if it is a number.
    pub const fn number_kind(&self) -> Option<NumberKind> {
        Some(match self {
            Self::I8(_) => NumberKind::I8,
            Self::U8(_) => NumberKind::U8,
            Self::I16(_) => NumberKind::I16,
            Self::U16(_) => NumberKind::U16,
            Self::I32(_) => NumberKind::I32,
            Self::U32(_) => NumberKind::U32,
            Self::I64(_) => NumberKind::I64,
            Self::U64(_) => NumberKind::U64,
            Self::F32(_) => NumberKind::F32,
            Self::F64(_) => NumberKind::F64,
            Self::Decimal(_) => NumberKind::Decimal,
            _ => return None,
        })
    }

    /// Name of the runtime type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        if let Some(kind) = self.number_kind() {
            return kind.name();
        }
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::String(_) => "String",
            Self::Uuid(_) => "Uuid",
            Self::DateTime(_) => "NaiveDateTime",
            Self::DateTimeOffset(_) => "DateTime<FixedOffset>",
            Self::Date(_) => "NaiveDate",
            Self::Time(_) => "NaiveTime",
            Self::Duration(_) => "TimeDelta",
            Self::Enum(member) => member.enum_type().name(),
            Self::Json(_) => "serde_json::Value",
            Self::Opaque(opaque) => opaque.type_name(),
            _ => "number",
        }
    }

    /// Renders the value as text using `culture` for numbers.
    ///
    /// Temporal values always render as ISO 8601 so the text parses back to
    /// an equal value under any culture.
    pub fn to_text(&self, culture: &Culture) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Char(v) => v.to_string(),
            Self::I8(v) => v.to_string(),
            Self::U8(v) => v.to_string(),
            Self::I16(v) => v.to_string(),
            Self::U16(v) => v.to_string(),
            Self::I32(v) => v.to_string(),
            Self::U32(v) => v.to_string(),
            Self::I64(v) => v.to_string(),
            Self::U64(v) => v.to_string(),
            Self::F32(v) => culture.localize_number(&v.to_string()),
            Self::F64(v) => culture.localize_number(&v.to_string()),
            Self::Decimal(v) => culture.localize_number(&v.to_string()),
            Self::String(v) => v.clone(),
            Self::Uuid(v) => v.hyphenated().to_string(),
            Self::DateTime(v) => temporal::format_datetime(v),
            Self::DateTimeOffset(v) => temporal::format_datetime_offset(v),
            Self::Date(v) => temporal::format_date(v),
            Self::Time(v) => temporal::format_time(v),
            Self::Duration(v) => temporal::format_duration(v),
            Self::Enum(v) => v.name().to_owned(),
            Self::Json(v) => v.to_string(),
            Self::Opaque(v) => v.type_name().to_owned(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(&Culture::INVARIANT))
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from! {
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => String,
    Uuid => Uuid,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
    TimeDelta => Duration,
    EnumValue => Enum,
    serde_json::Value => Json,
    OpaqueValue => Opaque,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// ENUM VALUE
// ============================================================================

/// A member of an [`EnumType`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_type: EnumType,
    index: usize,
    name: &'static str,
}

impl EnumValue {
    /// The member at `index`, or `None` when out of range.
    pub fn new(enum_type: EnumType, index: usize) -> Option<Self> {
        let name = enum_type.members().get(index)?;
        Some(Self {
            enum_type,
            index,
            name,
        })
    }

    /// The member named exactly `name`.
    pub fn from_name(enum_type: EnumType, name: &str) -> Option<Self> {
        let index = enum_type.members().iter().position(|m| *m == name)?;
        Self::new(enum_type, index)
    }

    pub const fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }

    /// Position of the member in declaration order.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Declared spelling of the member.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// ============================================================================
// OPAQUE VALUE
// ============================================================================

/// A type-erased Rust value.
///
/// Cloning shares the allocation; equality is identity of that allocation.
#[derive(Clone)]
pub struct OpaqueValue {
    type_name: &'static str,
    type_id: TypeId,
    inner: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            inner: Arc::new(value),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}
