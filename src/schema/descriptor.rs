// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Name table and per-decode value slots.
//!
//! The [`NameTable`] is built once per schema and never mutated; decodes
//! resolve member names to positions through it. A fresh set of
//! [`ValueSlot`]s is allocated for every object decode.

use std::borrow::Cow;

use crate::encoding::json::cursor::Span;

use super::member::{MemberList, TypeTag};

/// A declared member resolved to its position.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    /// JSON key text
    pub name: Cow<'static, str>,
    /// Declared type
    pub tag: TypeTag,
    /// Whether the member may be absent or `null`
    pub nullable: bool,
    /// Declaration index, 0-based
    pub position: usize,
}

/// Immutable mapping from member names to descriptors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    descriptors: Vec<MemberDescriptor>,
}

impl NameTable {
    /// Build the table in declaration order.
    pub fn from_members(members: MemberList) -> Self {
        let descriptors = members
            .into_iter()
            .enumerate()
            .map(|(position, member)| {
                let (name, tag, nullable) = member.into_parts();
                MemberDescriptor {
                    name,
                    tag,
                    nullable,
                    position,
                }
            })
            .collect();
        Self { descriptors }
    }

    /// Position of the member whose name equals `key`.
    ///
    /// Linear scan over the raw key text; the first declaration wins when
    /// names repeat.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.descriptors
            .iter()
            .position(|descriptor| descriptor.name == key)
    }

    pub fn get(&self, position: usize) -> Option<&MemberDescriptor> {
        self.descriptors.get(position)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> &[MemberDescriptor] {
        &self.descriptors
    }

    /// Names declared more than once, in order of their second appearance.
    pub fn duplicate_names(&self) -> Vec<&str> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(i, d)| self.descriptors[..*i].iter().any(|p| p.name == d.name))
            .map(|(_, d)| &*d.name)
            .collect()
    }

    /// One empty slot per declared member.
    pub fn new_slots<'a>(&self) -> Vec<ValueSlot<'a>> {
        self.descriptors
            .iter()
            .map(|d| ValueSlot::new(d.nullable))
            .collect()
    }
}

/// Scratch record of one member during an object decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSlot<'a> {
    span: Option<Span<'a>>,
    nullable: bool,
}

impl<'a> ValueSlot<'a> {
    pub fn new(nullable: bool) -> Self {
        Self {
            span: None,
            nullable,
        }
    }

    /// Record the member's raw value. A later occurrence replaces an
    /// earlier one.
    pub fn fill(&mut self, span: Span<'a>) {
        self.span = Some(span);
    }

    pub fn span(&self) -> Option<Span<'a>> {
        self.span
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// A slot is present when it is nullable or was filled.
    pub fn is_present(&self) -> bool {
        self.nullable || self.span.is_some()
    }
}
