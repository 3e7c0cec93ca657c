// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Forward-only cursor over JSON text, and the spans it hands out.
//!
//! A cursor created for a nested span keeps the span's absolute offset as
//! its base, so every position it reports is an offset into the caller's
//! original buffer.

/// Shape of the value a [`Span`] was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Content between the quotes of a string
    String,
    /// Full `[...]` text, brackets included
    Array,
    /// Full `{...}` text, braces included
    Object,
    /// Unquoted text: numbers, booleans, `null`
    Literal,
}

/// Borrowed view of one raw value in the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    text: &'a str,
    offset: usize,
    kind: SpanKind,
}

impl<'a> Span<'a> {
    /// Create a span starting at absolute `offset`.
    pub fn new(text: &'a str, offset: usize, kind: SpanKind) -> Self {
        Self { text, offset, kind }
    }

    /// Raw text of the value.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Absolute offset of the first byte of `text`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if this span is the bare literal `null`.
    pub fn is_null_literal(&self) -> bool {
        self.kind == SpanKind::Literal && self.text == "null"
    }
}

/// Returns true for the four JSON whitespace bytes.
#[inline]
pub fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Cursor over a JSON text buffer.
///
/// The cursor only moves forward. Scanning functions take it by mutable
/// reference and leave it past whatever they consumed.
#[derive(Debug, Clone)]
pub struct JsonCursor<'a> {
    /// Text being scanned
    data: &'a str,
    /// Current position within `data`
    offset: usize,
    /// Absolute offset of `data[0]` in the original buffer
    base: usize,
    /// Separator consumed after the most recent value
    last_separator: Option<u8>,
}

impl<'a> JsonCursor<'a> {
    /// Create a cursor at the start of a buffer.
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            offset: 0,
            base: 0,
            last_separator: None,
        }
    }

    /// Create a cursor over a captured span, keeping its absolute offset.
    pub fn for_span(span: Span<'a>) -> Self {
        Self {
            data: span.text(),
            offset: 0,
            base: span.offset(),
            last_separator: None,
        }
    }

    /// Absolute position in the original buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.base + self.offset
    }

    /// Position relative to the start of this cursor's text.
    #[inline]
    pub fn index(&self) -> usize {
        self.offset
    }

    /// Number of bytes left.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Look at the current byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.offset).copied()
    }

    /// Consume and return the current byte.
    #[inline]
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        Some(byte)
    }

    /// Move forward `n` bytes, stopping at the end of the buffer.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.data.len());
    }

    /// Skip JSON whitespace.
    pub fn trim_left(&mut self) {
        let bytes = self.data.as_bytes();
        while self.offset < bytes.len() && is_json_whitespace(bytes[self.offset]) {
            self.offset += 1;
        }
    }

    /// Unconsumed text.
    pub fn rest(&self) -> &'a str {
        self.data.get(self.offset..).unwrap_or("")
    }

    /// Character at the cursor, for diagnostics. Falls back to the raw
    /// byte when the cursor is not on a character boundary.
    pub fn peek_char(&self) -> Option<char> {
        self.rest()
            .chars()
            .next()
            .or_else(|| self.peek().map(char::from))
    }

    /// Unconsumed bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.data.as_bytes().get(self.offset..).unwrap_or(&[])
    }

    /// Capture `data[start..end]` (relative indices) as a span.
    pub fn span(&self, start: usize, end: usize, kind: SpanKind) -> Span<'a> {
        let text = self.data.get(start..end).unwrap_or("");
        Span::new(text, self.base + start, kind)
    }

    /// Separator consumed after the most recent value, if any.
    pub fn last_separator(&self) -> Option<u8> {
        self.last_separator
    }

    pub(crate) fn set_last_separator(&mut self, separator: u8) {
        self.last_separator = Some(separator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic_movement() {
        let mut cursor = JsonCursor::new("  {\"a\":1}");
        assert_eq!(cursor.remaining(), 9);
        cursor.trim_left();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.peek(), Some(b'{'));
        assert_eq!(cursor.bump(), Some(b'{'));
        assert_eq!(cursor.rest(), "\"a\":1}");
        cursor.advance(100);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn test_trim_left_json_whitespace_only() {
        let mut cursor = JsonCursor::new(" \t\r\n\u{a0}x");
        cursor.trim_left();
        assert_eq!(cursor.index(), 4);
    }

    #[test]
    fn test_span_cursor_keeps_absolute_offset() {
        let text = "{\"inner\": {\"x\": 1}}";
        let span = Span::new(&text[10..18], 10, SpanKind::Object);
        let mut cursor = JsonCursor::for_span(span);
        assert_eq!(cursor.position(), 10);
        cursor.bump();
        assert_eq!(cursor.position(), 11);
        assert_eq!(cursor.index(), 1);

        let inner = cursor.span(1, 4, SpanKind::String);
        assert_eq!(inner.text(), "\"x\"");
        assert_eq!(inner.offset(), 11);
    }

    #[test]
    fn test_null_literal() {
        assert!(Span::new("null", 0, SpanKind::Literal).is_null_literal());
        assert!(!Span::new("null", 0, SpanKind::String).is_null_literal());
        assert!(!Span::new("nul", 0, SpanKind::Literal).is_null_literal());
    }

    #[test]
    fn test_last_separator() {
        let mut cursor = JsonCursor::new("1,2");
        assert_eq!(cursor.last_separator(), None);
        cursor.set_last_separator(b',');
        assert_eq!(cursor.last_separator(), Some(b','));
    }
}
