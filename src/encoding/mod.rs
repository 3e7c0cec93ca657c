// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire format implementations.

pub mod json;

pub use json::{JsonCursor, JsonWriter, Span, ToField};
