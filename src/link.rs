// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Top-level decode and encode entry points.
//!
//! These look up the target's schema in the [global registry], binding it
//! on first use.
//!
//! [global registry]: crate::core::registry::global_registry

use crate::construct::FromField;
use crate::core::error::Result;
use crate::core::options::{DecodeOptions, EncodeOptions};
use crate::core::registry::global_registry;
use crate::core::value::FieldValue;
use crate::encoding::json::decoder::decode_root_array;
use crate::encoding::json::encoder::{JsonWriter, ToField};
use crate::schema::contract::{JsonClass, JsonEncode};
use crate::schema::member::JsonElement;

/// Decode a JSON object into `T`.
pub fn from_json<T: JsonClass>(text: &str) -> Result<T> {
    from_json_with(text, &DecodeOptions::default())
}

pub fn from_json_with<T: JsonClass>(text: &str, options: &DecodeOptions) -> Result<T> {
    global_registry().schema::<T>()?.decode_with(text, options)
}

/// Decode a JSON array whose elements are all `E`.
///
/// ```
/// let values: Vec<i64> = jsonlink::from_json_array("[1, -2, 3]")?;
/// assert_eq!(values, vec![1, -2, 3]);
/// # Ok::<(), jsonlink::JsonLinkError>(())
/// ```
pub fn from_json_array<E: JsonElement>(text: &str) -> Result<Vec<E>> {
    from_json_array_with(text, &DecodeOptions::default())
}

pub fn from_json_array_with<E: JsonElement>(text: &str, options: &DecodeOptions) -> Result<Vec<E>> {
    let array = decode_root_array(text, E::element_tag(), options)?;
    Vec::<E>::from_field(FieldValue::Array(array))
}

/// Encode `value` as compact JSON.
pub fn to_json<T: JsonEncode>(value: &T) -> Result<String> {
    to_json_with(value, &EncodeOptions::default())
}

pub fn to_json_with<T: JsonEncode>(value: &T, options: &EncodeOptions) -> Result<String> {
    global_registry().schema::<T>()?.encode_with(value, options)
}

/// Encode a slice as a JSON array.
pub fn to_json_array<T: ToField>(values: &[T]) -> Result<String> {
    to_json_array_with(values, &EncodeOptions::default())
}

pub fn to_json_array_with<T: ToField>(values: &[T], options: &EncodeOptions) -> Result<String> {
    let mut writer = JsonWriter::new(options);
    values.write_field(&mut writer)?;
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::Construction;
    use crate::core::error::{JsonLinkError, StructuralKind};
    use crate::schema::contract::Schema;
    use crate::schema::member::{json_bool, json_number, MemberList};

    #[derive(Debug, PartialEq)]
    struct Flag {
        id: u16,
        on: bool,
    }

    impl JsonClass for Flag {
        fn json_schema() -> Result<Schema<Self>> {
            Schema::bind(
                MemberList::new()
                    .with(json_number::<u16>("id"))
                    .with(json_bool("on")),
                Construction::direct(|id: u16, on: bool| Flag { id, on }),
            )
        }
    }

    impl JsonEncode for Flag {
        fn to_json_data(&self) -> Vec<&dyn ToField> {
            vec![&self.id, &self.on]
        }
    }

    #[test]
    fn test_from_json() {
        let flag: Flag = from_json(r#"{"on": true, "id": 7}"#).unwrap();
        assert_eq!(flag, Flag { id: 7, on: true });
    }

    #[test]
    fn test_to_json() {
        let text = to_json(&Flag { id: 3, on: false }).unwrap();
        assert_eq!(text, r#"{"id":3,"on":false}"#);
        assert_eq!(from_json::<Flag>(&text).unwrap(), Flag { id: 3, on: false });
    }

    #[test]
    fn test_array_of_classes() {
        let flags: Vec<Flag> = from_json_array(r#"[{"id":1,"on":true},{"id":2,"on":false}]"#).unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[1].id, 2);
        assert_eq!(
            to_json_array(&flags).unwrap(),
            r#"[{"id":1,"on":true},{"id":2,"on":false}]"#
        );
    }

    #[test]
    fn test_array_root_must_be_array() {
        let err = from_json_array::<i32>(" {}").unwrap_err();
        assert_eq!(
            err,
            JsonLinkError::structural(StructuralKind::UnexpectedCharacter('{'), 1)
        );
        let err = from_json_array::<i32>("   ").unwrap_err();
        assert_eq!(err, JsonLinkError::structural(StructuralKind::UnexpectedEnd, 3));
    }

    #[test]
    fn test_empty_array() {
        let values: Vec<String> = from_json_array("[ ]").unwrap();
        assert!(values.is_empty());
        assert_eq!(to_json_array::<String>(&[]).unwrap(), "[]");
    }
}
