// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Member declarations.
//!
//! A class is described by an ordered list of [`JsonMember`]s built with
//! the `json_*` helpers:
//!
//! ```
//! use jsonlink::schema::{json_bool, json_number, json_string, MemberList};
//!
//! let members = MemberList::new()
//!     .with(json_number::<i32>("member0"))
//!     .with(json_string("member1"))
//!     .with(json_bool("member2").nullable());
//! assert_eq!(members.len(), 3);
//! ```

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::construct::FromField;
use crate::core::value::{JsonNumber, NumberKind};
use crate::encoding::json::decoder::{decode_erased, ClassDecodeFn};
use crate::schema::contract::JsonClass;

/// Whether a number member travels as a quoted string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LiteralAsString {
    /// Bare number only
    #[default]
    Never,
    /// Bare or quoted on input, bare on output
    Maybe,
    /// Quoted only
    Always,
}

/// Coarse category of a member's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseType {
    Number,
    Bool,
    String,
    Date,
    Class,
    Array,
}

impl ParseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseType::Number => "number",
            ParseType::Bool => "bool",
            ParseType::String => "string",
            ParseType::Date => "date",
            ParseType::Class => "class",
            ParseType::Array => "array",
        }
    }
}

/// Reference to a nested class's decoder.
#[derive(Clone, Copy)]
pub struct ClassRef {
    type_id: TypeId,
    type_name: &'static str,
    decode: ClassDecodeFn,
}

impl ClassRef {
    /// Reference the class `T`.
    pub fn of<T: JsonClass>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            decode: decode_erased::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the class.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn decoder(&self) -> ClassDecodeFn {
        self.decode
    }

    /// Check if this references the class `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassRef").field(&self.type_name).finish()
    }
}

/// Declared type of a member or array element.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    Number {
        kind: NumberKind,
        literal: LiteralAsString,
    },
    Bool,
    String,
    Date,
    Class(ClassRef),
    Array(Arc<TypeTag>),
}

impl TypeTag {
    /// Number tag with the bare-literal encoding.
    pub fn number(kind: NumberKind) -> Self {
        TypeTag::Number {
            kind,
            literal: LiteralAsString::Never,
        }
    }

    pub fn parse_type(&self) -> ParseType {
        match self {
            TypeTag::Number { .. } => ParseType::Number,
            TypeTag::Bool => ParseType::Bool,
            TypeTag::String => ParseType::String,
            TypeTag::Date => ParseType::Date,
            TypeTag::Class(_) => ParseType::Class,
            TypeTag::Array(_) => ParseType::Array,
        }
    }

    /// Human-readable description, e.g. `number(i32)` or `array<string>`.
    pub fn describe(&self) -> String {
        match self {
            TypeTag::Number { kind, .. } => format!("number({kind})"),
            TypeTag::Class(class) => format!("class({})", class.type_name()),
            TypeTag::Array(element) => format!("array<{}>", element.describe()),
            other => other.parse_type().as_str().to_string(),
        }
    }
}

/// One declared member: JSON key, type and nullability.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonMember {
    name: Cow<'static, str>,
    tag: TypeTag,
    nullable: bool,
}

impl JsonMember {
    pub fn new(name: impl Into<Cow<'static, str>>, tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            tag,
            nullable: false,
        }
    }

    /// Allow the member to be absent or `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the quoting policy of a number member. Other members are
    /// returned unchanged.
    pub fn literal_as_string(mut self, option: LiteralAsString) -> Self {
        if let TypeTag::Number { literal, .. } = &mut self.tag {
            *literal = option;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub(crate) fn into_parts(self) -> (Cow<'static, str>, TypeTag, bool) {
        (self.name, self.tag, self.nullable)
    }
}

/// Declare a number member of representation `N`.
pub fn json_number<N: JsonNumber>(name: impl Into<Cow<'static, str>>) -> JsonMember {
    JsonMember::new(name, TypeTag::number(N::KIND))
}

/// Declare a boolean member.
pub fn json_bool(name: impl Into<Cow<'static, str>>) -> JsonMember {
    JsonMember::new(name, TypeTag::Bool)
}

/// Declare a string member.
pub fn json_string(name: impl Into<Cow<'static, str>>) -> JsonMember {
    JsonMember::new(name, TypeTag::String)
}

/// Declare a date member.
pub fn json_date(name: impl Into<Cow<'static, str>>) -> JsonMember {
    JsonMember::new(name, TypeTag::Date)
}

/// Declare a nested class member.
pub fn json_class<T: JsonClass>(name: impl Into<Cow<'static, str>>) -> JsonMember {
    JsonMember::new(name, TypeTag::Class(ClassRef::of::<T>()))
}

/// Declare an array member with elements of type `E`.
pub fn json_array<E: JsonElement>(name: impl Into<Cow<'static, str>>) -> JsonMember {
    JsonMember::new(name, TypeTag::Array(Arc::new(E::element_tag())))
}

/// Ordered member declarations of one class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberList {
    members: Vec<JsonMember>,
}

impl MemberList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member.
    pub fn with(mut self, member: JsonMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn push(&mut self, member: JsonMember) {
        self.members.push(member);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JsonMember> {
        self.members.iter()
    }
}

impl From<Vec<JsonMember>> for MemberList {
    fn from(members: Vec<JsonMember>) -> Self {
        Self { members }
    }
}

impl IntoIterator for MemberList {
    type Item = JsonMember;
    type IntoIter = std::vec::IntoIter<JsonMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

/// Types usable as array elements.
pub trait JsonElement: FromField {
    /// Tag elements of this type are decoded with.
    fn element_tag() -> TypeTag;
}

macro_rules! impl_number_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl JsonElement for $ty {
                fn element_tag() -> TypeTag {
                    TypeTag::number(<$ty as JsonNumber>::KIND)
                }
            }
        )*
    };
}

impl_number_element!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl JsonElement for bool {
    fn element_tag() -> TypeTag {
        TypeTag::Bool
    }
}

impl JsonElement for String {
    fn element_tag() -> TypeTag {
        TypeTag::String
    }
}

impl JsonElement for DateTime<Utc> {
    fn element_tag() -> TypeTag {
        TypeTag::Date
    }
}

impl<T: JsonClass> JsonElement for T {
    fn element_tag() -> TypeTag {
        TypeTag::Class(ClassRef::of::<T>())
    }
}

impl<E: JsonElement> JsonElement for Vec<E> {
    fn element_tag() -> TypeTag {
        TypeTag::Array(Arc::new(E::element_tag()))
    }
}

impl<E: JsonElement + Default, const N: usize> JsonElement for [E; N] {
    fn element_tag() -> TypeTag {
        TypeTag::Array(Arc::new(E::element_tag()))
    }
}
