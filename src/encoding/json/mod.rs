// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON text codec.
//!
//! Decoding scans the input once, left to right, without building a
//! document tree:
//! - [`cursor`] - forward-only position over the borrowed input
//! - [`scanner`] - skips whole values and consumes separators
//! - [`name`] - reads member keys
//! - [`numeric`] - number micro-parser
//! - [`date`] - date parsing and formatting
//! - [`decoder`] - object decode loop and typed value dispatch
//! - [`encoder`] - JSON writer

pub mod cursor;
pub mod date;
pub mod decoder;
pub mod encoder;
pub mod name;
pub mod numeric;
pub mod scanner;

pub use cursor::{JsonCursor, Span, SpanKind};
pub use decoder::{ArrayElements, ArrayValue, DecodeContext};
pub use encoder::{JsonWriter, ToField};
