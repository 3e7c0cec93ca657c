// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Object decoding
//!
//! Decoding one object runs in two phases:
//!
//! 1. [`collect_slots`] walks the object's members. Each name is resolved
//!    through the schema's [`NameTable`]; a mapped member's raw value span
//!    is captured into its slot, an unmapped one is skipped. Afterwards
//!    [`check_presence`] rejects any required member that never appeared.
//! 2. [`decode_slot`] turns each slot into a typed [`FieldValue`] according
//!    to the member's declared [`TypeTag`]. Nested classes recurse into
//!    their own schema; arrays are handed over as lazy [`ArrayValue`]s.
//!
//! Every nesting step goes through [`DecodeContext::enter`], which fails
//! with a structural error once the configured depth is exceeded.

use std::any::Any;
use std::sync::Arc;

use tracing::trace;

use super::cursor::{is_json_whitespace, JsonCursor, Span, SpanKind};
use super::date::parse_date;
use super::name::parse_name;
use super::numeric::decode_number;
use super::scanner::{consume_separator, scan_value};
use crate::core::error::{JsonLinkError, Result, StructuralKind};
use crate::core::options::{DecodeOptions, DEFAULT_MAX_DEPTH};
use crate::core::registry::global_registry;
use crate::core::value::FieldValue;
use crate::schema::contract::JsonClass;
use crate::schema::descriptor::{MemberDescriptor, NameTable, ValueSlot};
use crate::schema::member::{LiteralAsString, TypeTag};

/// Type-erased decoder of one nested class.
pub type ClassDecodeFn = for<'a> fn(Span<'a>, DecodeContext) -> Result<Box<dyn Any + Send>>;

/// Nesting state threaded through a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    depth: usize,
    max_depth: usize,
}

impl Default for DecodeContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl DecodeContext {
    /// Context for a root value.
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    pub fn from_options(options: &DecodeOptions) -> Self {
        Self::new(options.max_depth)
    }

    /// Current nesting depth; 0 for the root value.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Context for a value nested one level deeper.
    pub fn enter(self, offset: usize) -> Result<Self> {
        if self.depth >= self.max_depth {
            return Err(JsonLinkError::structural(
                StructuralKind::DepthLimitExceeded(self.max_depth),
                offset,
            ));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }
}

/// Walk one object and capture each mapped member's raw value.
///
/// The cursor must be at the object's `{` (leading whitespace allowed).
/// On return it sits just past the closing `}` with whitespace trimmed.
/// When a key repeats, the last occurrence is kept.
pub fn collect_slots<'a>(
    table: &NameTable,
    class_name: &str,
    cursor: &mut JsonCursor<'a>,
) -> Result<Vec<ValueSlot<'a>>> {
    cursor.trim_left();
    if cursor.peek() != Some(b'{') {
        return Err(JsonLinkError::invalid_class_start(
            class_name,
            cursor.position(),
        ));
    }
    cursor.bump();
    cursor.trim_left();

    let mut slots = table.new_slots();
    if cursor.peek() == Some(b'}') {
        cursor.bump();
        cursor.trim_left();
        return Ok(slots);
    }

    loop {
        let name = parse_name(cursor)?;
        let value = scan_value(cursor)?;
        match table.find(name.text()) {
            Some(position) => slots[position].fill(value),
            None => trace!(
                class = class_name,
                member = name.text(),
                offset = name.offset(),
                "skipping unmapped member"
            ),
        }

        cursor.trim_left();
        let separator_at = cursor.position();
        match consume_separator(cursor, StructuralKind::UnterminatedObject)? {
            b',' => {}
            b'}' => break,
            other => {
                return Err(JsonLinkError::structural(
                    StructuralKind::MismatchedClose(other as char),
                    separator_at,
                ))
            }
        }
    }
    Ok(slots)
}

/// Fail on the first required member whose slot was never filled.
pub fn check_presence(table: &NameTable, class_name: &str, slots: &[ValueSlot<'_>]) -> Result<()> {
    for (descriptor, slot) in table.descriptors().iter().zip(slots) {
        if !slot.is_present() {
            return Err(JsonLinkError::missing_field(
                class_name,
                &*descriptor.name,
            ));
        }
    }
    Ok(())
}

/// Decode one slot according to its member's declaration.
///
/// An unfilled slot and a nullable member holding `null` both decode to
/// [`FieldValue::Null`].
pub fn decode_slot<'a>(
    descriptor: &MemberDescriptor,
    slot: &ValueSlot<'a>,
    ctx: DecodeContext,
) -> Result<FieldValue<'a>> {
    match slot.span() {
        None => Ok(FieldValue::Null),
        Some(span) if descriptor.nullable && span.is_null_literal() => Ok(FieldValue::Null),
        Some(span) => decode_value(&descriptor.name, &descriptor.tag, span, ctx),
    }
}

/// Decode a raw value span as `tag`.
///
/// `label` names the member in errors.
pub fn decode_value<'a>(
    label: &str,
    tag: &TypeTag,
    span: Span<'a>,
    ctx: DecodeContext,
) -> Result<FieldValue<'a>> {
    let invalid =
        || JsonLinkError::invalid_value(label, tag.describe(), span.text(), span.offset());

    match tag {
        TypeTag::Number { kind, literal } => {
            let allowed = match literal {
                LiteralAsString::Never => span.kind() == SpanKind::Literal,
                LiteralAsString::Always => span.kind() == SpanKind::String,
                LiteralAsString::Maybe => {
                    matches!(span.kind(), SpanKind::Literal | SpanKind::String)
                }
            };
            if !allowed {
                return Err(invalid());
            }
            let text = span.text().trim_end_matches(|c: char| c.is_ascii() && is_json_whitespace(c as u8));
            decode_number(text, *kind).ok_or_else(invalid)
        }
        TypeTag::Bool => {
            if span.kind() != SpanKind::Literal {
                return Err(invalid());
            }
            span.text()
                .bytes()
                .next()
                .map(|first| FieldValue::Bool(first.to_ascii_lowercase() == b't'))
                .ok_or_else(invalid)
        }
        TypeTag::String => match span.kind() {
            SpanKind::String => Ok(FieldValue::String(span.text())),
            _ => Err(invalid()),
        },
        TypeTag::Date => match span.kind() {
            SpanKind::String => parse_date(span.text())
                .map(FieldValue::Date)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
        TypeTag::Class(class) => {
            let inner = ctx.enter(span.offset())?;
            (class.decoder())(span, inner).map(FieldValue::Class)
        }
        TypeTag::Array(element) => {
            if span.kind() != SpanKind::Array {
                return Err(invalid());
            }
            let inner = ctx.enter(span.offset())?;
            Ok(FieldValue::Array(ArrayValue::new(
                span,
                Arc::clone(element),
                label,
                inner,
            )))
        }
    }
}

/// Decode a nested class `T` from its captured span.
pub fn decode_erased<T: JsonClass>(span: Span<'_>, ctx: DecodeContext) -> Result<Box<dyn Any + Send>> {
    let schema = global_registry().schema::<T>()?;
    let value = schema.decode_span(span, ctx)?;
    Ok(Box::new(value))
}

/// Fail if anything but whitespace follows the root value.
pub fn check_trailing(cursor: &mut JsonCursor<'_>, options: &DecodeOptions) -> Result<()> {
    cursor.trim_left();
    if options.allow_trailing_content || cursor.is_at_end() {
        return Ok(());
    }
    Err(JsonLinkError::structural(
        StructuralKind::TrailingCharacters,
        cursor.position(),
    ))
}

/// Capture a root array whose elements are `element`.
pub fn decode_root_array<'a>(
    text: &'a str,
    element: TypeTag,
    options: &DecodeOptions,
) -> Result<ArrayValue<'a>> {
    let mut cursor = JsonCursor::new(text);
    cursor.trim_left();
    match cursor.peek() {
        Some(b'[') => {}
        Some(byte) => {
            return Err(JsonLinkError::structural(
                StructuralKind::UnexpectedCharacter(cursor.peek_char().unwrap_or(byte as char)),
                cursor.position(),
            ))
        }
        None => {
            return Err(JsonLinkError::structural(
                StructuralKind::UnexpectedEnd,
                cursor.position(),
            ))
        }
    }
    let span = scan_value(&mut cursor)?;
    check_trailing(&mut cursor, options)?;
    Ok(ArrayValue::new(
        span,
        Arc::new(element),
        "[]",
        DecodeContext::from_options(options),
    ))
}

/// An array member whose elements are decoded on demand.
#[derive(Debug, Clone)]
pub struct ArrayValue<'a> {
    span: Span<'a>,
    element: Arc<TypeTag>,
    label: String,
    ctx: DecodeContext,
}

impl<'a> ArrayValue<'a> {
    pub(crate) fn new(span: Span<'a>, element: Arc<TypeTag>, label: &str, ctx: DecodeContext) -> Self {
        Self {
            span,
            element,
            label: label.to_string(),
            ctx,
        }
    }

    /// Raw `[...]` text.
    pub fn raw(&self) -> &'a str {
        self.span.text()
    }

    pub fn span(&self) -> Span<'a> {
        self.span
    }

    pub fn element_tag(&self) -> &TypeTag {
        &self.element
    }

    /// Iterate over the decoded elements. Iteration stops after the first
    /// error.
    pub fn elements(&self) -> ArrayElements<'a> {
        ArrayElements {
            cursor: JsonCursor::for_span(self.span),
            element: Arc::clone(&self.element),
            label: self.label.clone(),
            ctx: self.ctx,
            started: false,
            finished: false,
        }
    }
}

/// Iterator over the elements of an [`ArrayValue`].
pub struct ArrayElements<'a> {
    cursor: JsonCursor<'a>,
    element: Arc<TypeTag>,
    label: String,
    ctx: DecodeContext,
    started: bool,
    finished: bool,
}

impl<'a> ArrayElements<'a> {
    fn step(&mut self) -> Result<Option<FieldValue<'a>>> {
        if self.finished {
            return Ok(None);
        }
        if !self.started {
            self.started = true;
            self.cursor.trim_left();
            if self.cursor.peek() != Some(b'[') {
                return Err(JsonLinkError::structural(
                    StructuralKind::UnexpectedCharacter(self.cursor.peek_char().unwrap_or('\0')),
                    self.cursor.position(),
                ));
            }
            self.cursor.bump();
            self.cursor.trim_left();
            if self.cursor.peek() == Some(b']') {
                self.finished = true;
                return Ok(None);
            }
        }

        let span = scan_value(&mut self.cursor)?;
        self.cursor.trim_left();
        let separator_at = self.cursor.position();
        match consume_separator(&mut self.cursor, StructuralKind::UnterminatedArray)? {
            b',' => {}
            b']' => self.finished = true,
            other => {
                return Err(JsonLinkError::structural(
                    StructuralKind::MismatchedClose(other as char),
                    separator_at,
                ))
            }
        }
        decode_value(&self.label, &self.element, span, self.ctx).map(Some)
    }
}

impl<'a> Iterator for ArrayElements<'a> {
    type Item = Result<FieldValue<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
