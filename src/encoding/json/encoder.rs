// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON encoding
//!
//! [`JsonWriter`] builds the output text; [`ToField`] writes one member
//! value into it. Integers are formatted with `itoa`, floats with `ryu`.
//!
//! Strings are written as raw JSON string content, matching how they are
//! decoded: escape sequences already present are kept, while bare quotes,
//! stray backslashes and control characters are escaped.

use chrono::{DateTime, Utc};

use super::date::format_date;
use crate::core::error::{JsonLinkError, Result};
use crate::core::options::EncodeOptions;
use crate::core::registry::global_registry;
use crate::schema::contract::JsonEncode;

const HEX: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Clone, Copy)]
struct Frame {
    is_array: bool,
    empty: bool,
}

/// Incremental JSON text writer.
#[derive(Debug)]
pub struct JsonWriter {
    out: String,
    pretty: bool,
    indent: usize,
    max_depth: usize,
    frames: Vec<Frame>,
    quote_numbers: bool,
}

impl JsonWriter {
    pub fn new(options: &EncodeOptions) -> Self {
        Self {
            out: String::new(),
            pretty: options.pretty,
            indent: options.indent,
            max_depth: options.max_depth,
            frames: Vec::new(),
            quote_numbers: false,
        }
    }

    /// Consume the writer and return the text.
    pub fn finish(self) -> String {
        self.out
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Write numbers as quoted strings until reset.
    pub fn set_quote_numbers(&mut self, quote: bool) {
        self.quote_numbers = quote;
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth * self.indent {
            self.out.push(' ');
        }
    }

    /// Separator and indentation owed before the next array element or
    /// object key.
    fn entry_prefix(&mut self) {
        let depth = self.frames.len();
        if let Some(frame) = self.frames.last_mut() {
            if !frame.empty {
                self.out.push(',');
            }
            frame.empty = false;
            if self.pretty {
                self.newline(depth);
            }
        }
    }

    /// Prefix owed before a value: array elements need one, object member
    /// values follow their key directly.
    fn before_value(&mut self) {
        if self.frames.last().is_some_and(|frame| frame.is_array) {
            self.entry_prefix();
        }
    }

    fn open(&mut self, bracket: char, is_array: bool) -> Result<()> {
        if self.frames.len() > self.max_depth {
            return Err(JsonLinkError::encode(format!(
                "nesting exceeds maximum depth of {}",
                self.max_depth
            )));
        }
        self.before_value();
        self.out.push(bracket);
        self.frames.push(Frame {
            is_array,
            empty: true,
        });
        Ok(())
    }

    fn close(&mut self, bracket: char) {
        if let Some(frame) = self.frames.pop() {
            if self.pretty && !frame.empty {
                self.newline(self.frames.len());
            }
        }
        self.out.push(bracket);
    }

    pub fn begin_object(&mut self) -> Result<()> {
        self.open('{', false)
    }

    pub fn end_object(&mut self) {
        self.close('}');
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.open('[', true)
    }

    pub fn end_array(&mut self) {
        self.close(']');
    }

    /// Write an object key and its colon.
    pub fn key(&mut self, name: &str) {
        self.entry_prefix();
        self.push_string(name);
        self.out.push(':');
        if self.pretty {
            self.out.push(' ');
        }
    }

    pub fn null(&mut self) {
        self.before_value();
        self.out.push_str("null");
    }

    pub fn bool(&mut self, value: bool) {
        self.before_value();
        self.out.push_str(if value { "true" } else { "false" });
    }

    /// Write raw string content between quotes.
    pub fn string(&mut self, text: &str) {
        self.before_value();
        self.push_string(text);
    }

    pub fn integer<I: itoa::Integer>(&mut self, value: I) {
        let mut buffer = itoa::Buffer::new();
        let text = buffer.format(value);
        self.number_text(text);
    }

    pub fn f64(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(JsonLinkError::encode(format!(
                "cannot encode non-finite number {value}"
            )));
        }
        let mut buffer = ryu::Buffer::new();
        let text = buffer.format_finite(value);
        self.number_text(text);
        Ok(())
    }

    pub fn f32(&mut self, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(JsonLinkError::encode(format!(
                "cannot encode non-finite number {value}"
            )));
        }
        let mut buffer = ryu::Buffer::new();
        let text = buffer.format_finite(value);
        self.number_text(text);
        Ok(())
    }

    fn number_text(&mut self, text: &str) {
        self.before_value();
        if self.quote_numbers {
            self.out.push('"');
            self.out.push_str(text);
            self.out.push('"');
        } else {
            self.out.push_str(text);
        }
    }

    fn push_string(&mut self, text: &str) {
        self.out.push('"');
        let bytes = text.as_bytes();
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];
            let escape: &[u8] = match byte {
                b'\\' => {
                    if matches!(
                        bytes.get(i + 1),
                        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'u')
                    ) {
                        i += 2;
                        continue;
                    }
                    b"\\\\"
                }
                b'"' => b"\\\"",
                0x00..=0x1f => b"",
                _ => {
                    i += 1;
                    continue;
                }
            };
            self.out.push_str(&text[start..i]);
            if escape.is_empty() {
                self.out.push_str("\\u00");
                self.out.push(HEX[(byte >> 4) as usize] as char);
                self.out.push(HEX[(byte & 0xf) as usize] as char);
            } else {
                for &b in escape {
                    self.out.push(b as char);
                }
            }
            i += 1;
            start = i;
        }
        self.out.push_str(&text[start..]);
        self.out.push('"');
    }
}

/// A value that can be written as one member or element.
pub trait ToField {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()>;

    /// An absent value leaves its member out of the object.
    fn is_absent(&self) -> bool {
        false
    }
}

macro_rules! impl_integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToField for $ty {
                fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
                    writer.integer(*self);
                    Ok(())
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, u8, u16, u32, u64);

impl ToField for f32 {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.f32(*self)
    }
}

impl ToField for f64 {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.f64(*self)
    }
}

impl ToField for bool {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.bool(*self);
        Ok(())
    }
}

impl ToField for str {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.string(self);
        Ok(())
    }
}

impl ToField for String {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.string(self);
        Ok(())
    }
}

impl ToField for DateTime<Utc> {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.string(&format_date(self));
        Ok(())
    }
}

impl<T: ToField> ToField for Option<T> {
    /// `None` writes `null`; as an object member it is left out instead.
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        match self {
            Some(value) => value.write_field(writer),
            None => {
                writer.null();
                Ok(())
            }
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: ToField> ToField for [T] {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        writer.begin_array()?;
        for element in self {
            element.write_field(writer)?;
        }
        writer.end_array();
        Ok(())
    }
}

impl<T: ToField> ToField for Vec<T> {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        self.as_slice().write_field(writer)
    }
}

impl<T: ToField, const N: usize> ToField for [T; N] {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        self.as_slice().write_field(writer)
    }
}

impl<T: JsonEncode> ToField for T {
    fn write_field(&self, writer: &mut JsonWriter) -> Result<()> {
        let schema = global_registry().schema::<T>()?;
        schema.write_object(self, writer)
    }
}
