// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar and nested-class conversions.

use chrono::{DateTime, Utc};

use super::{mismatch, FieldStrategy, FromField};
use crate::core::error::{JsonLinkError, Result};
use crate::core::value::{FieldValue, JsonNumber};
use crate::schema::contract::JsonClass;
use crate::schema::member::TypeTag;

macro_rules! impl_number_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                const STRATEGY: FieldStrategy = FieldStrategy::Scalar;

                fn accepts(tag: &TypeTag, nullable: bool) -> bool {
                    !nullable
                        && matches!(tag, TypeTag::Number { kind, .. } if *kind == <$ty as JsonNumber>::KIND)
                }

                fn from_field(value: FieldValue<'_>) -> Result<Self> {
                    <$ty as JsonNumber>::from_value(&value).ok_or_else(|| mismatch::<$ty>(&value))
                }
            }
        )*
    };
}

impl_number_field!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl FromField for bool {
    const STRATEGY: FieldStrategy = FieldStrategy::Scalar;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        !nullable && *tag == TypeTag::Bool
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        match value {
            FieldValue::Bool(v) => Ok(v),
            other => Err(mismatch::<bool>(&other)),
        }
    }
}

impl FromField for String {
    const STRATEGY: FieldStrategy = FieldStrategy::Scalar;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        !nullable && *tag == TypeTag::String
    }

    /// Copies the raw text; escapes are kept as written.
    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        match value {
            FieldValue::String(text) => Ok(text.to_string()),
            other => Err(mismatch::<String>(&other)),
        }
    }
}

impl FromField for DateTime<Utc> {
    const STRATEGY: FieldStrategy = FieldStrategy::Scalar;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        !nullable && *tag == TypeTag::Date
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        match value {
            FieldValue::Date(v) => Ok(v),
            other => Err(mismatch::<DateTime<Utc>>(&other)),
        }
    }
}

impl<T: JsonClass> FromField for T {
    const STRATEGY: FieldStrategy = FieldStrategy::Class;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        !nullable && matches!(tag, TypeTag::Class(class) if class.is::<T>())
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        match value {
            FieldValue::Class(boxed) => boxed
                .downcast::<T>()
                .map(|v| *v)
                .map_err(|_| {
                    JsonLinkError::Other(format!(
                        "cannot build {} from a different class",
                        std::any::type_name::<T>()
                    ))
                }),
            other => Err(mismatch::<T>(&other)),
        }
    }
}
