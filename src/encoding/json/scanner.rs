// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Structural scanner.
//!
//! Locates the raw text of one JSON value without decoding it. Object and
//! array values are bounded by a quote-aware bracket count; strings by the
//! next unescaped quote; everything else by the next `,`, `}` or `]`.
//! Nothing is copied: every span borrows from the cursor's buffer.

use crate::core::error::{JsonLinkError, Result, StructuralKind};

use super::cursor::{JsonCursor, Span, SpanKind};

/// Index of the bracket closing the one at `bytes[0]`.
///
/// Brackets inside strings are ignored. A backslash escapes the byte after
/// it, inside or outside a string.
pub fn bracketed_end(bytes: &[u8], open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, &byte) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' => escaped = true,
            b'"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            _ if byte == open => depth += 1,
            _ if byte == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index of the first unescaped `"` in `bytes`.
pub fn closing_quote(bytes: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Skip a string value. The returned span holds the content between the
/// quotes, escapes untouched.
pub fn skip_string<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    let start = cursor.index();
    let open_position = cursor.position();
    cursor.bump();
    let end = closing_quote(cursor.bytes()).ok_or_else(|| {
        JsonLinkError::structural(StructuralKind::UnterminatedString, open_position)
    })?;
    let span = cursor.span(start + 1, start + 1 + end, SpanKind::String);
    cursor.advance(end + 1);
    Ok(span)
}

/// Skip an array value, returning its full bracketed text.
pub fn skip_array<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    skip_bracketed(cursor, b'[', b']', SpanKind::Array, StructuralKind::UnterminatedArray)
}

/// Skip an object value, returning its full braced text.
pub fn skip_class<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    skip_bracketed(cursor, b'{', b'}', SpanKind::Object, StructuralKind::UnterminatedObject)
}

fn skip_bracketed<'a>(
    cursor: &mut JsonCursor<'a>,
    open: u8,
    close: u8,
    kind: SpanKind,
    unterminated: StructuralKind,
) -> Result<Span<'a>> {
    let start = cursor.index();
    let end = bracketed_end(cursor.bytes(), open, close)
        .ok_or_else(|| JsonLinkError::structural(unterminated, cursor.position()))?;
    let span = cursor.span(start, start + end + 1, kind);
    cursor.advance(end + 1);
    Ok(span)
}

/// Skip an unquoted literal up to the next `,`, `}` or `]`.
///
/// Trailing whitespace is not part of the span. Running out of input
/// before a separator is a structural error.
pub fn skip_other<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    let start = cursor.index();
    let bytes = cursor.bytes();
    let len = bytes
        .iter()
        .position(|b| matches!(b, b',' | b'}' | b']'))
        .ok_or_else(|| {
            JsonLinkError::structural(StructuralKind::MissingSeparator, cursor.position())
        })?;
    let trimmed = bytes[..len]
        .iter()
        .rposition(|b| !super::cursor::is_json_whitespace(*b))
        .map_or(0, |i| i + 1);
    let span = cursor.span(start, start + trimmed, SpanKind::Literal);
    cursor.advance(len);
    Ok(span)
}

/// Capture the next value without consuming the separator after it.
pub fn scan_value<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    cursor.trim_left();
    match cursor.peek() {
        None => Err(JsonLinkError::structural(
            StructuralKind::UnexpectedEnd,
            cursor.position(),
        )),
        Some(b'"') => skip_string(cursor),
        Some(b'[') => skip_array(cursor),
        Some(b'{') => skip_class(cursor),
        Some(byte @ (b',' | b'}' | b']' | b':')) => Err(JsonLinkError::structural(
            StructuralKind::UnexpectedCharacter(byte as char),
            cursor.position(),
        )),
        Some(_) => skip_other(cursor),
    }
}

/// Consume the `,`, `}` or `]` following a value and trim after it.
///
/// Only whitespace may sit between the value and its separator. Running
/// out of input reports `at_end`.
pub fn consume_separator(cursor: &mut JsonCursor<'_>, at_end: StructuralKind) -> Result<u8> {
    cursor.trim_left();
    match cursor.peek() {
        Some(separator @ (b',' | b'}' | b']')) => {
            cursor.bump();
            cursor.set_last_separator(separator);
            cursor.trim_left();
            Ok(separator)
        }
        Some(byte) => Err(JsonLinkError::structural(
            StructuralKind::UnexpectedCharacter(cursor.peek_char().unwrap_or(byte as char)),
            cursor.position(),
        )),
        None => Err(JsonLinkError::structural(at_end, cursor.position())),
    }
}

/// Capture the next value and consume the separator after it.
pub fn skip_value<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    let span = scan_value(cursor)?;
    consume_separator(cursor, StructuralKind::MissingSeparator)?;
    Ok(span)
}
