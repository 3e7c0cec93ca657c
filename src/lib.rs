// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # jsonlink
//!
//! Schema-driven JSON decoding and encoding.
//!
//! A target type declares, once, an ordered list of members (JSON key, type,
//! nullability) and how to construct itself from their values. Decoding
//! then scans the input text in a single forward pass straight into the
//! target, with no intermediate document tree. Member values are raw spans
//! of the caller's buffer until the constructor asks for them.
//!
//! ## Architecture
//!
//! - `core/` - errors, decoded values, options and the schema registry
//! - `encoding/json/` - cursor, scanner, key reader, number parser, decoder
//!   and writer
//! - `schema/` - member declarations, name table and bound schemas
//! - `construct/` - construction strategies
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> jsonlink::Result<()> {
//! use jsonlink::construct::Construction;
//! use jsonlink::schema::{json_bool, json_number, json_string, MemberList};
//! use jsonlink::{JsonClass, JsonEncode, Schema, ToField};
//!
//! #[derive(Debug, PartialEq)]
//! struct Metadata {
//!     member0: i32,
//!     member1: String,
//!     member2: bool,
//! }
//!
//! impl JsonClass for Metadata {
//!     fn json_schema() -> jsonlink::Result<Schema<Self>> {
//!         Schema::bind(
//!             MemberList::new()
//!                 .with(json_number::<i32>("member0"))
//!                 .with(json_string("member1"))
//!                 .with(json_bool("member2")),
//!             Construction::direct(|member0: i32, member1: String, member2: bool| Metadata {
//!                 member0,
//!                 member1,
//!                 member2,
//!             }),
//!         )
//!     }
//! }
//!
//! impl JsonEncode for Metadata {
//!     fn to_json_data(&self) -> Vec<&dyn ToField> {
//!         vec![&self.member0, &self.member1, &self.member2]
//!     }
//! }
//!
//! let text = r#"{"member0": 55, "member1": "hello", "member2": true}"#;
//! let value: Metadata = jsonlink::from_json(text)?;
//! assert_eq!(value.member1, "hello");
//! assert_eq!(
//!     jsonlink::to_json(&value)?,
//!     r#"{"member0":55,"member1":"hello","member2":true}"#
//! );
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    global_registry, DecodeOptions, EncodeOptions, FieldValue, JsonLinkError, KeyFormatKind,
    LinkConfig, NumberKind, Result, SchemaRegistry, StructuralKind,
};

// Wire format
pub mod encoding;

pub use encoding::json::{JsonCursor, JsonWriter, ToField};

// Schema declarations
pub mod schema;

pub use schema::{JsonClass, JsonEncode, LiteralAsString, MemberList, Schema, TypeTag};

// Construction strategies
pub mod construct;

// Entry points
pub mod link;

pub use link::{
    from_json, from_json_array, from_json_array_with, from_json_with, to_json, to_json_array,
    to_json_array_with, to_json_with,
};
