// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Member name reader.

use crate::core::error::{JsonLinkError, KeyFormatKind, Result, StructuralKind};

use super::cursor::{JsonCursor, Span, SpanKind};
use super::scanner::closing_quote;

/// Read one member name and the `:` after it.
///
/// On success the returned span holds the name text without quotes and the
/// cursor sits on the first byte of the member's value. A byte other than
/// `"` where the name should start fails with a [`KeyFormatKind`] chosen
/// from that byte.
pub fn parse_name<'a>(cursor: &mut JsonCursor<'a>) -> Result<Span<'a>> {
    cursor.trim_left();
    let start = cursor.position();
    match cursor.peek() {
        Some(b'"') => {}
        Some(byte) => {
            return Err(JsonLinkError::key_format(
                KeyFormatKind::classify(byte),
                start,
            ))
        }
        None => {
            return Err(JsonLinkError::structural(
                StructuralKind::UnexpectedEnd,
                start,
            ))
        }
    }
    cursor.bump();

    let name_start = cursor.index();
    let len = closing_quote(cursor.bytes())
        .ok_or_else(|| JsonLinkError::structural(StructuralKind::UnterminatedString, start))?;
    let name = cursor.span(name_start, name_start + len, SpanKind::String);
    cursor.advance(len + 1);

    cursor.trim_left();
    if cursor.peek() != Some(b':') {
        return Err(JsonLinkError::key_format(
            KeyFormatKind::MissingColon,
            cursor.position(),
        ));
    }
    cursor.bump();
    cursor.trim_left();
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_error(text: &str) -> JsonLinkError {
        let mut cursor = JsonCursor::new(text);
        parse_name(&mut cursor).unwrap_err()
    }

    #[test]
    fn test_parse_name() {
        let mut cursor = JsonCursor::new("  \"member0\" :  12,");
        let name = parse_name(&mut cursor).unwrap();
        assert_eq!(name.text(), "member0");
        assert_eq!(name.offset(), 3);
        assert_eq!(cursor.rest(), "12,");
    }

    #[test]
    fn test_parse_name_with_escape() {
        let mut cursor = JsonCursor::new(r#""a\"b":1"#);
        let name = parse_name(&mut cursor).unwrap();
        assert_eq!(name.text(), r#"a\"b"#);
        assert_eq!(cursor.rest(), "1");
    }

    #[test]
    fn test_parse_name_empty() {
        let mut cursor = JsonCursor::new("\"\":true");
        let name = parse_name(&mut cursor).unwrap();
        assert!(name.is_empty());
        assert_eq!(cursor.peek(), Some(b't'));
    }

    #[test]
    fn test_key_error_categories() {
        let cases = [
            ("a:1", KeyFormatKind::LowerCase),
            ("1:1", KeyFormatKind::Digit),
            (":1", KeyFormatKind::Colon),
            (",\"a\":1", KeyFormatKind::Comma),
            ("'a':1", KeyFormatKind::NoOpeningQuote),
            ("}", KeyFormatKind::NoOpeningQuote),
        ];
        for (text, kind) in cases {
            assert_eq!(name_error(text), JsonLinkError::key_format(kind, 0), "{text}");
        }
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            name_error("\"a\" 1"),
            JsonLinkError::key_format(KeyFormatKind::MissingColon, 4)
        );
    }

    #[test]
    fn test_unterminated_name() {
        assert_eq!(
            name_error(" \"abc"),
            JsonLinkError::structural(StructuralKind::UnterminatedString, 1)
        );
    }

    #[test]
    fn test_name_at_end() {
        assert_eq!(
            name_error("  "),
            JsonLinkError::structural(StructuralKind::UnexpectedEnd, 2)
        );
    }
}
