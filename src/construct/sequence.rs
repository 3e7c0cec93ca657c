// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequence construction.
//!
//! Array members build growable (`Vec<T>`) or fixed-length (`[T; N]`)
//! sequences from the lazily decoded elements of the array.

use super::{mismatch, FieldStrategy, FromField};
use crate::core::error::Result;
use crate::core::value::FieldValue;
use crate::schema::member::TypeTag;

/// Bytes worth of elements reserved up front when the element count is
/// not known.
pub const RESERVE_BYTES: usize = 4096;

/// Element capacity reserved for a sequence of unknown length.
pub fn reserve_hint<T>() -> usize {
    (RESERVE_BYTES / std::mem::size_of::<T>().max(1)).max(1)
}

/// Collect elements into a `Vec`, stopping at the first error.
///
/// An exact size hint reserves exactly; otherwise [`reserve_hint`] worth
/// of capacity is reserved.
pub fn construct_vec<T, I>(elements: I) -> Result<Vec<T>>
where
    I: Iterator<Item = Result<T>>,
{
    let capacity = match elements.size_hint() {
        (lower, Some(upper)) if lower == upper => lower,
        _ => reserve_hint::<T>(),
    };
    let mut out = Vec::with_capacity(capacity);
    for element in elements {
        out.push(element?);
    }
    Ok(out)
}

/// Fill a fixed-length array from elements.
///
/// Positions left over when the elements run out keep `T::default()`.
/// Elements beyond `N` are not consumed.
pub fn construct_array<T, I, const N: usize>(elements: I) -> Result<[T; N]>
where
    T: Default,
    I: Iterator<Item = Result<T>>,
{
    let mut out: [T; N] = std::array::from_fn(|_| T::default());
    let mut elements = elements;
    for slot in out.iter_mut() {
        match elements.next() {
            Some(element) => *slot = element?,
            None => break,
        }
    }
    Ok(out)
}

fn accepts_elements<T: FromField>(tag: &TypeTag, nullable: bool) -> bool {
    !nullable && matches!(tag, TypeTag::Array(element) if T::accepts(element, false))
}

impl<T: FromField> FromField for Vec<T> {
    const STRATEGY: FieldStrategy = FieldStrategy::Sequence;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        accepts_elements::<T>(tag, nullable)
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        match value {
            FieldValue::Array(array) => {
                construct_vec(array.elements().map(|element| element.and_then(T::from_field)))
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromField + Default, const N: usize> FromField for [T; N] {
    const STRATEGY: FieldStrategy = FieldStrategy::FixedSequence;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        accepts_elements::<T>(tag, nullable)
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        match value {
            FieldValue::Array(array) => {
                construct_array(array.elements().map(|element| element.and_then(T::from_field)))
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::JsonLinkError;
    use crate::core::value::NumberKind;
    use std::sync::Arc;

    #[test]
    fn test_reserve_hint() {
        assert_eq!(reserve_hint::<u8>(), 4096);
        assert_eq!(reserve_hint::<u64>(), 512);
        assert_eq!(reserve_hint::<()>(), 4096);
        assert_eq!(reserve_hint::<[u8; 8192]>(), 1);
    }

    #[test]
    fn test_construct_vec_exact_hint() {
        let out = construct_vec(vec![Ok(1u32), Ok(2), Ok(3)].into_iter()).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(out.capacity(), 3);
    }

    #[test]
    fn test_construct_vec_unknown_length_reserves() {
        let source = (0..10u64).filter(|v| v % 2 == 0).map(Ok);
        let out = construct_vec(source).unwrap();
        assert_eq!(out, vec![0, 2, 4, 6, 8]);
        assert!(out.capacity() >= 512);
    }

    #[test]
    fn test_construct_vec_stops_at_error() {
        let source = vec![Ok(1), Err(JsonLinkError::Other("bad".into())), Ok(3)].into_iter();
        assert!(construct_vec::<i32, _>(source).is_err());
    }

    #[test]
    fn test_construct_array_defaults_missing() {
        let out: [i32; 4] = construct_array(vec![Ok(7), Ok(8)].into_iter()).unwrap();
        assert_eq!(out, [7, 8, 0, 0]);
    }

    #[test]
    fn test_construct_array_ignores_surplus() {
        let mut consumed = 0;
        let source = (1..=5).map(|v| {
            consumed += 1;
            Ok(v)
        });
        let out: [i32; 3] = construct_array(source).unwrap();
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_sequence_accepts() {
        let tag = TypeTag::Array(Arc::new(TypeTag::number(NumberKind::Int32)));
        assert!(Vec::<i32>::accepts(&tag, false));
        assert!(!Vec::<i32>::accepts(&tag, true));
        assert!(!Vec::<i64>::accepts(&tag, false));
        assert!(<[i32; 2]>::accepts(&tag, false));
        assert!(!Vec::<i32>::accepts(&TypeTag::number(NumberKind::Int32), false));
        assert_eq!(<[i32; 2] as FromField>::STRATEGY, FieldStrategy::FixedSequence);
    }
}
