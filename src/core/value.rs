// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded field value representation.
//!
//! A [`FieldValue`] is what typed value dispatch hands to a construction
//! strategy. Strings borrow from the caller's buffer, arrays are lazy views
//! over their raw span, and nested classes arrive fully constructed behind
//! a type-erased box.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::encoding::json::decoder::ArrayValue;

/// Target numeric representation of a number member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl NumberKind {
    /// Check if this kind is a signed integer.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            NumberKind::Int8 | NumberKind::Int16 | NumberKind::Int32 | NumberKind::Int64
        )
    }

    /// Check if this kind is an unsigned integer.
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            NumberKind::UInt8 | NumberKind::UInt16 | NumberKind::UInt32 | NumberKind::UInt64
        )
    }

    /// Check if this kind is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, NumberKind::Float32 | NumberKind::Float64)
    }

    /// Rust name of the representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberKind::Int8 => "i8",
            NumberKind::Int16 => "i16",
            NumberKind::Int32 => "i32",
            NumberKind::Int64 => "i64",
            NumberKind::UInt8 => "u8",
            NumberKind::UInt16 => "u16",
            NumberKind::UInt32 => "u32",
            NumberKind::UInt64 => "u64",
            NumberKind::Float32 => "f32",
            NumberKind::Float64 => "f64",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single decoded member value, borrowing from the input buffer.
pub enum FieldValue<'a> {
    /// Absent nullable member or a literal `null`
    Null,

    Bool(bool),

    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    Float32(f32),
    Float64(f64),

    /// Raw string content between the quotes, escapes left as written
    String(&'a str),

    Date(DateTime<Utc>),

    /// Lazily decoded array elements
    Array(ArrayValue<'a>),

    /// A nested class, already constructed
    Class(Box<dyn Any + Send>),
}

impl<'a> FieldValue<'a> {
    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int8(_) => "i8",
            FieldValue::Int16(_) => "i16",
            FieldValue::Int32(_) => "i32",
            FieldValue::Int64(_) => "i64",
            FieldValue::UInt8(_) => "u8",
            FieldValue::UInt16(_) => "u16",
            FieldValue::UInt32(_) => "u32",
            FieldValue::UInt64(_) => "u64",
            FieldValue::Float32(_) => "f32",
            FieldValue::Float64(_) => "f64",
            FieldValue::String(_) => "string",
            FieldValue::Date(_) => "date",
            FieldValue::Array(_) => "array",
            FieldValue::Class(_) => "class",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get the numeric kind of this value, if it is a number.
    pub fn number_kind(&self) -> Option<NumberKind> {
        match self {
            FieldValue::Int8(_) => Some(NumberKind::Int8),
            FieldValue::Int16(_) => Some(NumberKind::Int16),
            FieldValue::Int32(_) => Some(NumberKind::Int32),
            FieldValue::Int64(_) => Some(NumberKind::Int64),
            FieldValue::UInt8(_) => Some(NumberKind::UInt8),
            FieldValue::UInt16(_) => Some(NumberKind::UInt16),
            FieldValue::UInt32(_) => Some(NumberKind::UInt32),
            FieldValue::UInt64(_) => Some(NumberKind::UInt64),
            FieldValue::Float32(_) => Some(NumberKind::Float32),
            FieldValue::Float64(_) => Some(NumberKind::Float64),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            FieldValue::Int8(v) => f.debug_tuple("Int8").field(v).finish(),
            FieldValue::Int16(v) => f.debug_tuple("Int16").field(v).finish(),
            FieldValue::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            FieldValue::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            FieldValue::UInt8(v) => f.debug_tuple("UInt8").field(v).finish(),
            FieldValue::UInt16(v) => f.debug_tuple("UInt16").field(v).finish(),
            FieldValue::UInt32(v) => f.debug_tuple("UInt32").field(v).finish(),
            FieldValue::UInt64(v) => f.debug_tuple("UInt64").field(v).finish(),
            FieldValue::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            FieldValue::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            FieldValue::String(v) => f.debug_tuple("String").field(v).finish(),
            FieldValue::Date(v) => f.debug_tuple("Date").field(v).finish(),
            FieldValue::Array(v) => f.debug_tuple("Array").field(&v.raw()).finish(),
            FieldValue::Class(_) => f.write_str("Class(..)"),
        }
    }
}

/// Rust number types usable as number members.
pub trait JsonNumber: Copy + Send + Sync + 'static {
    /// Declared representation.
    const KIND: NumberKind;

    /// Extract a number of exactly this representation.
    fn from_value(value: &FieldValue<'_>) -> Option<Self>;
}

macro_rules! impl_json_number {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl JsonNumber for $ty {
                const KIND: NumberKind = NumberKind::$variant;

                fn from_value(value: &FieldValue<'_>) -> Option<Self> {
                    match value {
                        FieldValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_json_number!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
);
