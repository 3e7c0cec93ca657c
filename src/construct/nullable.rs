// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Nullable construction.
//!
//! A nullable type has an empty state and a value-bearing state. An absent
//! member or a literal `null` builds the empty state; anything else builds
//! the inner value and wraps it. `Option<T>` is the built-in nullable type.
//! Other wrappers implement [`Nullable`] and forward their [`FromField`]
//! impl to [`accepts`] and [`construct`]:
//!
//! ```
//! use jsonlink::construct::{nullable, FieldStrategy, FromField, Nullable};
//! use jsonlink::{FieldValue, Result, TypeTag};
//!
//! #[derive(Debug, PartialEq)]
//! enum Maybe<T> {
//!     Nothing,
//!     Just(T),
//! }
//!
//! impl<T: FromField> Nullable for Maybe<T> {
//!     type Value = T;
//!
//!     fn empty() -> Self {
//!         Maybe::Nothing
//!     }
//!
//!     fn from_value(value: T) -> Self {
//!         Maybe::Just(value)
//!     }
//! }
//!
//! impl<T: FromField> FromField for Maybe<T> {
//!     const STRATEGY: FieldStrategy = FieldStrategy::Nullable;
//!
//!     fn accepts(tag: &TypeTag, nullable: bool) -> bool {
//!         nullable::accepts::<Self>(tag, nullable)
//!     }
//!
//!     fn from_field(value: FieldValue<'_>) -> Result<Self> {
//!         nullable::construct::<Self>(value)
//!     }
//! }
//!
//! assert_eq!(Maybe::<bool>::from_field(FieldValue::Null).unwrap(), Maybe::Nothing);
//! assert_eq!(
//!     Maybe::<bool>::from_field(FieldValue::Bool(true)).unwrap(),
//!     Maybe::Just(true)
//! );
//! ```

use super::{FieldStrategy, FromField};
use crate::core::error::Result;
use crate::core::value::FieldValue;
use crate::schema::member::TypeTag;

/// A type with an empty state and a value-bearing state.
pub trait Nullable: Sized {
    /// Type of the wrapped value.
    type Value: FromField;

    /// The empty state.
    fn empty() -> Self;

    /// Wrap a present value.
    fn from_value(value: Self::Value) -> Self;
}

/// Binding check for nullable types: the member must be declared nullable
/// and the inner type must accept it as a required one. Array elements are
/// never nullable, so nullable types cannot be sequence elements.
pub fn accepts<N: Nullable>(tag: &TypeTag, nullable: bool) -> bool {
    nullable && N::Value::accepts(tag, false)
}

/// Build the empty state for `null`, otherwise the wrapped inner value.
pub fn construct<N: Nullable>(value: FieldValue<'_>) -> Result<N> {
    if value.is_null() {
        return Ok(N::empty());
    }
    N::Value::from_field(value).map(N::from_value)
}

impl<T: FromField> Nullable for Option<T> {
    type Value = T;

    fn empty() -> Self {
        None
    }

    fn from_value(value: T) -> Self {
        Some(value)
    }
}

impl<T: FromField> FromField for Option<T> {
    const STRATEGY: FieldStrategy = FieldStrategy::Nullable;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        accepts::<Self>(tag, nullable)
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        construct::<Self>(value)
    }
}
