// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bound schemas and the traits that declare them.
//!
//! A type opts into decoding by implementing [`JsonClass`], which returns
//! its member list bound to a construction strategy:
//!
//! ```
//! use jsonlink::construct::Construction;
//! use jsonlink::schema::{json_number, json_string, JsonClass, MemberList, Schema};
//! use jsonlink::Result;
//!
//! #[derive(Debug, PartialEq)]
//! struct Coordinate {
//!     label: String,
//!     x: i32,
//! }
//!
//! impl JsonClass for Coordinate {
//!     fn json_schema() -> Result<Schema<Self>> {
//!         Schema::bind(
//!             MemberList::new()
//!                 .with(json_string("label"))
//!                 .with(json_number::<i32>("x")),
//!             Construction::direct(|label: String, x: i32| Coordinate { label, x }),
//!         )
//!     }
//! }
//!
//! let value: Coordinate = jsonlink::from_json(r#"{"x": 3, "label": "a"}"#)?;
//! assert_eq!(value, Coordinate { label: "a".to_string(), x: 3 });
//! # Ok::<(), jsonlink::JsonLinkError>(())
//! ```

use std::borrow::Cow;
use std::fmt;

use tracing::{debug, warn};

use crate::construct::Construction;
use crate::core::error::{JsonLinkError, Result};
use crate::core::options::{DecodeOptions, EncodeOptions};
use crate::encoding::json::cursor::{JsonCursor, Span};
use crate::encoding::json::decoder::{
    check_presence, check_trailing, collect_slots, decode_slot, DecodeContext,
};
use crate::encoding::json::encoder::{JsonWriter, ToField};
use crate::schema::descriptor::NameTable;
use crate::schema::member::{LiteralAsString, MemberList, TypeTag};

/// A type decodable from a JSON object.
pub trait JsonClass: Sized + Send + 'static {
    /// Declare and bind the schema. Called once per process; the result
    /// is cached in the global registry.
    fn json_schema() -> Result<Schema<Self>>;
}

/// A [`JsonClass`] that can also be written back out.
pub trait JsonEncode: JsonClass {
    /// One entry per declared member, in declaration order.
    fn to_json_data(&self) -> Vec<&dyn ToField>;
}

/// Member declarations bound to a construction strategy for `T`.
pub struct Schema<T> {
    class_name: Cow<'static, str>,
    table: NameTable,
    construction: Construction<T>,
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl<T: 'static> Schema<T> {
    /// Bind `members` to `construction`, naming the class after `T`.
    ///
    /// Fails with [`JsonLinkError::ConstructionBinding`] when the
    /// construction cannot consume the declared members.
    pub fn bind(members: MemberList, construction: Construction<T>) -> Result<Self> {
        Self::bind_named(short_type_name::<T>(), members, construction)
    }

    /// Bind with an explicit class name for diagnostics.
    pub fn bind_named(
        class_name: impl Into<Cow<'static, str>>,
        members: MemberList,
        construction: Construction<T>,
    ) -> Result<Self> {
        let class_name = class_name.into();
        let table = NameTable::from_members(members);
        construction
            .check(table.descriptors())
            .map_err(|reason| JsonLinkError::binding(&*class_name, reason))?;

        for name in table.duplicate_names() {
            warn!(
                class = &*class_name,
                member = name,
                "duplicate member name, the first declaration is used"
            );
        }
        debug!(
            class = &*class_name,
            members = table.len(),
            construction = %construction.kind(),
            "bound schema"
        );

        Ok(Self {
            class_name,
            table,
            construction,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn table(&self) -> &NameTable {
        &self.table
    }

    pub fn construction(&self) -> &Construction<T> {
        &self.construction
    }

    /// Decode a complete JSON document holding one object.
    pub fn decode(&self, text: &str) -> Result<T> {
        self.decode_with(text, &DecodeOptions::default())
    }

    pub fn decode_with(&self, text: &str, options: &DecodeOptions) -> Result<T> {
        let mut cursor = JsonCursor::new(text);
        let value = self.decode_object(&mut cursor, DecodeContext::from_options(options))?;
        check_trailing(&mut cursor, options)?;
        Ok(value)
    }

    /// Decode one object at the cursor, leaving the cursor just past its
    /// closing brace with whitespace trimmed. Text after the object is not
    /// inspected.
    pub fn decode_from(&self, cursor: &mut JsonCursor<'_>) -> Result<T> {
        self.decode_from_with(cursor, &DecodeOptions::default())
    }

    /// [`Schema::decode_from`] with caller options. Only `max_depth`
    /// applies; trailing content is left for the caller.
    pub fn decode_from_with(
        &self,
        cursor: &mut JsonCursor<'_>,
        options: &DecodeOptions,
    ) -> Result<T> {
        self.decode_object(cursor, DecodeContext::from_options(options))
    }

    pub(crate) fn decode_span(&self, span: Span<'_>, ctx: DecodeContext) -> Result<T> {
        let mut cursor = JsonCursor::for_span(span);
        self.decode_object(&mut cursor, ctx)
    }

    fn decode_object(&self, cursor: &mut JsonCursor<'_>, ctx: DecodeContext) -> Result<T> {
        let slots = collect_slots(&self.table, &self.class_name, cursor)?;
        check_presence(&self.table, &self.class_name, &slots)?;
        let values = self
            .table
            .descriptors()
            .iter()
            .zip(&slots)
            .map(|(descriptor, slot)| decode_slot(descriptor, slot, ctx))
            .collect::<Result<Vec<_>>>()?;
        self.construction.build(values)
    }
}

impl<T: JsonEncode> Schema<T> {
    /// Encode `value` as compact JSON.
    pub fn encode(&self, value: &T) -> Result<String> {
        self.encode_with(value, &EncodeOptions::default())
    }

    pub fn encode_with(&self, value: &T, options: &EncodeOptions) -> Result<String> {
        let mut writer = JsonWriter::new(options);
        self.write_object(value, &mut writer)?;
        Ok(writer.finish())
    }

    /// Write `value` as an object. Absent values (a `None` option) of
    /// nullable members are left out; an absent required member is an error.
    pub fn write_object(&self, value: &T, writer: &mut JsonWriter) -> Result<()> {
        let fields = value.to_json_data();
        if fields.len() != self.table.len() {
            return Err(JsonLinkError::encode(format!(
                "{} produced {} member values for {} declared members",
                self.class_name,
                fields.len(),
                self.table.len()
            )));
        }

        writer.begin_object()?;
        for (descriptor, field) in self.table.descriptors().iter().zip(fields) {
            if field.is_absent() {
                if !descriptor.nullable {
                    return Err(JsonLinkError::encode(format!(
                        "{} has no value for required member '{}'",
                        self.class_name, descriptor.name
                    )));
                }
                continue;
            }
            writer.key(&descriptor.name);
            writer.set_quote_numbers(matches!(
                descriptor.tag,
                TypeTag::Number {
                    literal: LiteralAsString::Always,
                    ..
                }
            ));
            let written = field.write_field(writer);
            writer.set_quote_numbers(false);
            written?;
        }
        writer.end_object();
        Ok(())
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("class_name", &self.class_name)
            .field("table", &self.table)
            .field("construction", &self.construction)
            .finish()
    }
}
