// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout jsonlink.
//!
//! - [`JsonLinkError`] - closed error set with byte offsets
//! - [`FieldValue`] - one decoded member value
//! - [`SchemaRegistry`] - process-wide cache of bound schemas
//! - [`LinkConfig`] - decode and encode options

pub mod error;
pub mod options;
pub mod registry;
pub mod value;

pub use error::{JsonLinkError, KeyFormatKind, Result, StructuralKind};
pub use options::{DecodeOptions, EncodeOptions, LinkConfig};
pub use registry::{global_registry, SchemaRegistry};
pub use value::{FieldValue, JsonNumber, NumberKind};
