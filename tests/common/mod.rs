// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common fixture types for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};

use jsonlink::construct::{nullable, Construction, FieldStrategy, FromField, Nullable};
use jsonlink::schema::{
    json_array, json_bool, json_class, json_date, json_number, json_string, JsonClass, JsonEncode,
    MemberList, Schema,
};
use jsonlink::{FieldValue, JsonWriter, LiteralAsString, Result, ToField, TypeTag};

// ============================================================================
// Flat Class
// ============================================================================

/// Three scalar members, bound with a constructor function.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub member0: i32,
    pub member1: String,
    pub member2: bool,
}

impl JsonClass for Metadata {
    fn json_schema() -> Result<Schema<Self>> {
        Schema::bind(
            MemberList::new()
                .with(json_number::<i32>("member0"))
                .with(json_string("member1"))
                .with(json_bool("member2")),
            Construction::direct(|member0: i32, member1: String, member2: bool| Metadata {
                member0,
                member1,
                member2,
            }),
        )
    }
}

impl JsonEncode for Metadata {
    fn to_json_data(&self) -> Vec<&dyn ToField> {
        vec![&self.member0, &self.member1, &self.member2]
    }
}

pub const METADATA_JSON: &str = r#"{"member0": 55, "member1": "hello", "member2": true}"#;

// ============================================================================
// Nested Class
// ============================================================================

/// Quoted 64-bit id and a nested [`Metadata`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: u64,
    pub metadata: Metadata,
}

impl JsonClass for GraphNode {
    fn json_schema() -> Result<Schema<Self>> {
        Schema::bind(
            MemberList::new()
                .with(json_number::<u64>("id").literal_as_string(LiteralAsString::Always))
                .with(json_class::<Metadata>("metadata")),
            Construction::direct(|id: u64, metadata: Metadata| GraphNode { id, metadata }),
        )
    }
}

impl JsonEncode for GraphNode {
    fn to_json_data(&self) -> Vec<&dyn ToField> {
        vec![&self.id, &self.metadata]
    }
}

/// Arbitrarily deep nesting through an array of children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl JsonClass for TreeNode {
    fn json_schema() -> Result<Schema<Self>> {
        Schema::bind(
            MemberList::new()
                .with(json_string("label"))
                .with(json_array::<TreeNode>("children")),
            Construction::direct(|label: String, children: Vec<TreeNode>| TreeNode {
                label,
                children,
            }),
        )
    }
}

impl JsonEncode for TreeNode {
    fn to_json_data(&self) -> Vec<&dyn ToField> {
        vec![&self.label, &self.children]
    }
}

/// Build `{"label":"n","children":[ ... ]}` nested `levels` objects deep.
pub fn nested_tree_json(levels: usize) -> String {
    let mut text = String::new();
    for _ in 0..levels {
        text.push_str(r#"{"label":"n","children":["#);
    }
    for _ in 0..levels {
        text.push_str("]}");
    }
    text
}

// ============================================================================
// Numbers
// ============================================================================

/// Every number representation, bound by aggregate construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numbers {
    pub a: i8,
    pub b: i16,
    pub c: i32,
    pub d: i64,
    pub e: u8,
    pub f: u16,
    pub g: u32,
    pub h: u64,
    pub x: f32,
    pub y: f64,
}

type NumberArgs = (i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<NumberArgs> for Numbers {
    fn from((a, b, c, d, e, f, g, h, x, y): NumberArgs) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            x,
            y,
        }
    }
}

impl JsonClass for Numbers {
    fn json_schema() -> Result<Schema<Self>> {
        Schema::bind(
            MemberList::new()
                .with(json_number::<i8>("a"))
                .with(json_number::<i16>("b"))
                .with(json_number::<i32>("c"))
                .with(json_number::<i64>("d"))
                .with(json_number::<u8>("e"))
                .with(json_number::<u16>("f"))
                .with(json_number::<u32>("g"))
                .with(json_number::<u64>("h"))
                .with(json_number::<f32>("x"))
                .with(json_number::<f64>("y")),
            Construction::aggregate::<NumberArgs>(),
        )
    }
}

impl JsonEncode for Numbers {
    fn to_json_data(&self) -> Vec<&dyn ToField> {
        vec![
            &self.a, &self.b, &self.c, &self.d, &self.e, &self.f, &self.g, &self.h, &self.x,
            &self.y,
        ]
    }
}

// ============================================================================
// Nullable Members
// ============================================================================

/// Mixed required and nullable members, with dates and sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub nickname: Option<String>,
    pub age: Option<u8>,
    pub joined: DateTime<Utc>,
    pub tags: Vec<String>,
    pub scores: [i32; 3],
}

impl JsonClass for Profile {
    fn json_schema() -> Result<Schema<Self>> {
        Schema::bind(
            MemberList::new()
                .with(json_string("name"))
                .with(json_string("nickname").nullable())
                .with(json_number::<u8>("age").nullable())
                .with(json_date("joined"))
                .with(json_array::<String>("tags"))
                .with(json_array::<i32>("scores")),
            Construction::direct(
                |name: String,
                 nickname: Option<String>,
                 age: Option<u8>,
                 joined: DateTime<Utc>,
                 tags: Vec<String>,
                 scores: [i32; 3]| Profile {
                    name,
                    nickname,
                    age,
                    joined,
                    tags,
                    scores,
                },
            ),
        )
    }
}

impl JsonEncode for Profile {
    fn to_json_data(&self) -> Vec<&dyn ToField> {
        vec![
            &self.name,
            &self.nickname,
            &self.age,
            &self.joined,
            &self.tags,
            &self.scores,
        ]
    }
}

// ============================================================================
// User Nullable Wrapper
// ============================================================================

/// A nullable wrapper that is not `Option`.
#[derive(Debug, Clone, PartialEq)]
pub enum Maybe<T> {
    Nothing,
    Just(T),
}

impl<T: FromField> Nullable for Maybe<T> {
    type Value = T;

    fn empty() -> Self {
        Maybe::Nothing
    }

    fn from_value(value: T) -> Self {
        Maybe::Just(value)
    }
}

impl<T: FromField> FromField for Maybe<T> {
    const STRATEGY: FieldStrategy = FieldStrategy::Nullable;

    fn accepts(tag: &TypeTag, nullable: bool) -> bool {
        nullable::accepts::<Self>(tag, nullable)
    }

    fn from_field(value: FieldValue<'_>) -> Result<Self> {
        nullable::construct::<Self>(value)
    }
}

impl<T: ToField> ToField for Maybe<T> {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        match self {
            Maybe::Just(value) => value.write_field(writer),
            Maybe::Nothing => {
                writer.null();
                Ok(())
            }
        }
    }

    fn is_absent(&self) -> bool {
        matches!(self, Maybe::Nothing)
    }
}

/// Nullable nested class held in a [`Maybe`].
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub kind: String,
    pub payload: Maybe<Metadata>,
}

impl JsonClass for Envelope {
    fn json_schema() -> Result<Schema<Self>> {
        Schema::bind(
            MemberList::new()
                .with(json_string("kind"))
                .with(json_class::<Metadata>("payload").nullable()),
            Construction::direct(|kind: String, payload: Maybe<Metadata>| Envelope {
                kind,
                payload,
            }),
        )
    }
}

impl JsonEncode for Envelope {
    fn to_json_data(&self) -> Vec<&dyn ToField> {
        vec![&self.kind, &self.payload]
    }
}
