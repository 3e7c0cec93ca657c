// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema declarations.
//!
//! A schema is an ordered list of member declarations bound to a
//! construction strategy. Binding happens once per type; the resulting
//! [`Schema`] is immutable and shared by every decode.

pub mod contract;
pub mod descriptor;
pub mod member;

pub use contract::{JsonClass, JsonEncode, Schema};
pub use descriptor::{MemberDescriptor, NameTable, ValueSlot};
pub use member::{
    json_array, json_bool, json_class, json_date, json_number, json_string, ClassRef,
    JsonElement, JsonMember, LiteralAsString, MemberList, ParseType, TypeTag,
};
