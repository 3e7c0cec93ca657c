// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for jsonlink.
//!
//! Decode-time failures are never recovered inside a decode call: they
//! propagate to the entry point with the byte offset where they occurred.
//! Binding failures are reported when a schema is declared, before any
//! text is parsed.

use std::fmt;

use thiserror::Error;

/// Category of a malformed member name.
///
/// The category is chosen from the byte found where the opening quote of a
/// member name was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormatKind {
    /// An unquoted lower-case letter (`{a: 1}`)
    LowerCase,
    /// An unquoted digit
    Digit,
    /// A newline
    Newline,
    /// A space
    Space,
    /// A colon with no name before it
    Colon,
    /// A tab
    Tab,
    /// A comma with no name after the previous member
    Comma,
    /// Any other byte in place of the opening quote
    NoOpeningQuote,
    /// The closing quote of the name is not followed by `:`
    MissingColon,
}

impl KeyFormatKind {
    /// Classify the byte found where an opening quote was expected.
    pub fn classify(byte: u8) -> Self {
        match byte {
            b'a'..=b'z' => KeyFormatKind::LowerCase,
            b'0'..=b'9' => KeyFormatKind::Digit,
            b'\n' => KeyFormatKind::Newline,
            b' ' => KeyFormatKind::Space,
            b':' => KeyFormatKind::Colon,
            b'\t' => KeyFormatKind::Tab,
            b',' => KeyFormatKind::Comma,
            _ => KeyFormatKind::NoOpeningQuote,
        }
    }

    /// Short diagnostic label.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyFormatKind::LowerCase => "unquoted lower-case letter",
            KeyFormatKind::Digit => "unquoted digit",
            KeyFormatKind::Newline => "newline",
            KeyFormatKind::Space => "space",
            KeyFormatKind::Colon => "colon",
            KeyFormatKind::Tab => "tab",
            KeyFormatKind::Comma => "comma",
            KeyFormatKind::NoOpeningQuote => "no opening quote",
            KeyFormatKind::MissingColon => "missing ':' after name",
        }
    }
}

impl fmt::Display for KeyFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the structural scanner failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    /// String without a closing quote
    UnterminatedString,
    /// Array without its matching `]`
    UnterminatedArray,
    /// Object without its matching `}`
    UnterminatedObject,
    /// Value not followed by `,`, `}` or `]` before the buffer ended
    MissingSeparator,
    /// A byte that cannot appear at this point
    UnexpectedCharacter(char),
    /// A closing bracket that does not match the open container
    MismatchedClose(char),
    /// The buffer ended where a value was expected
    UnexpectedEnd,
    /// Nesting deeper than the configured maximum
    DepthLimitExceeded(usize),
    /// Non-whitespace content after the top-level value
    TrailingCharacters,
}

impl fmt::Display for StructuralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralKind::UnterminatedString => f.write_str("unterminated string"),
            StructuralKind::UnterminatedArray => f.write_str("unterminated array"),
            StructuralKind::UnterminatedObject => f.write_str("unterminated object"),
            StructuralKind::MissingSeparator => {
                f.write_str("expected ',', '}' or ']' before end of input")
            }
            StructuralKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
            StructuralKind::MismatchedClose(c) => write!(f, "mismatched closing {c:?}"),
            StructuralKind::UnexpectedEnd => f.write_str("unexpected end of input"),
            StructuralKind::DepthLimitExceeded(max) => {
                write!(f, "nesting exceeds maximum depth of {max}")
            }
            StructuralKind::TrailingCharacters => f.write_str("trailing characters after value"),
        }
    }
}

/// Errors produced while binding, decoding or encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsonLinkError {
    /// Malformed member name
    #[error("Malformed member name at offset {offset}: {kind}")]
    KeyFormat {
        /// Offending character class
        kind: KeyFormatKind,
        /// Byte offset of the offending character
        offset: usize,
    },

    /// Required delimiter or terminator not found
    #[error("Structural error at offset {offset}: {kind}")]
    Structural {
        /// What was missing or unexpected
        kind: StructuralKind,
        /// Byte offset where scanning stopped
        offset: usize,
    },

    /// Object decode invoked on a span not starting with `{`
    #[error("Expected '{{' at offset {offset} to start class '{class}'")]
    InvalidClassStart {
        /// Class being decoded
        class: String,
        /// Byte offset of the first non-whitespace byte
        offset: usize,
    },

    /// Non-nullable member absent from the object
    #[error("Missing required member '{member}' of class '{class}'")]
    MissingRequiredField {
        /// Class being decoded
        class: String,
        /// Declared member name
        member: String,
    },

    /// No construction path from the declared members to the target type
    #[error("Cannot bind construction for '{class}': {reason}")]
    ConstructionBinding {
        /// Target type
        class: String,
        /// Why binding failed
        reason: String,
    },

    /// Member text does not decode as its declared type
    #[error("Invalid {expected} value for member '{member}' at offset {offset}: '{text}'")]
    InvalidValue {
        /// Member (or element) label
        member: String,
        /// Declared type description
        expected: String,
        /// Offending raw text
        text: String,
        /// Byte offset of the raw text
        offset: usize,
    },

    /// Encode direction failure
    #[error("Encode error: {message}")]
    Encode {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl JsonLinkError {
    /// Create a key format error.
    pub fn key_format(kind: KeyFormatKind, offset: usize) -> Self {
        JsonLinkError::KeyFormat { kind, offset }
    }

    /// Create a structural error.
    pub fn structural(kind: StructuralKind, offset: usize) -> Self {
        JsonLinkError::Structural { kind, offset }
    }

    /// Create an invalid class start error.
    pub fn invalid_class_start(class: impl Into<String>, offset: usize) -> Self {
        JsonLinkError::InvalidClassStart {
            class: class.into(),
            offset,
        }
    }

    /// Create a missing required field error.
    pub fn missing_field(class: impl Into<String>, member: impl Into<String>) -> Self {
        JsonLinkError::MissingRequiredField {
            class: class.into(),
            member: member.into(),
        }
    }

    /// Create a construction binding error.
    pub fn binding(class: impl Into<String>, reason: impl Into<String>) -> Self {
        JsonLinkError::ConstructionBinding {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        member: impl Into<String>,
        expected: impl Into<String>,
        text: impl Into<String>,
        offset: usize,
    ) -> Self {
        JsonLinkError::InvalidValue {
            member: member.into(),
            expected: expected.into(),
            text: text.into(),
            offset,
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        JsonLinkError::Encode {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        JsonLinkError::Config {
            message: message.into(),
        }
    }

    /// Byte offset into the input buffer, for decode-time errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonLinkError::KeyFormat { offset, .. }
            | JsonLinkError::Structural { offset, .. }
            | JsonLinkError::InvalidClassStart { offset, .. }
            | JsonLinkError::InvalidValue { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Whether this error was raised while declaring a schema.
    pub fn is_binding_error(&self) -> bool {
        matches!(self, JsonLinkError::ConstructionBinding { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            JsonLinkError::KeyFormat { kind, offset } => vec![
                ("kind", kind.to_string()),
                ("offset", offset.to_string()),
            ],
            JsonLinkError::Structural { kind, offset } => vec![
                ("kind", kind.to_string()),
                ("offset", offset.to_string()),
            ],
            JsonLinkError::InvalidClassStart { class, offset } => {
                vec![("class", class.clone()), ("offset", offset.to_string())]
            }
            JsonLinkError::MissingRequiredField { class, member } => {
                vec![("class", class.clone()), ("member", member.clone())]
            }
            JsonLinkError::ConstructionBinding { class, reason } => {
                vec![("class", class.clone()), ("reason", reason.clone())]
            }
            JsonLinkError::InvalidValue {
                member,
                expected,
                text,
                offset,
            } => vec![
                ("member", member.clone()),
                ("expected", expected.clone()),
                ("text", text.clone()),
                ("offset", offset.to_string()),
            ],
            JsonLinkError::Encode { message } | JsonLinkError::Config { message } => {
                vec![("message", message.clone())]
            }
            JsonLinkError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

/// Result type for jsonlink operations.
pub type Result<T> = std::result::Result<T, JsonLinkError>;
