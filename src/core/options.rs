// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode and encode options.
//!
//! Options are plain values passed to the `*_with` entry points. A
//! [`LinkConfig`] groups both and can be loaded from TOML.

use serde::{Deserialize, Serialize};

use super::error::{JsonLinkError, Result};

/// Default maximum nesting depth for both directions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Largest indent accepted for pretty output.
pub const MAX_INDENT: usize = 16;

/// Largest nesting limit a configuration may request.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Options controlling a decode call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Maximum nesting of classes and arrays below the root value
    pub max_depth: usize,
    /// Accept non-whitespace text after the top-level value
    pub allow_trailing_content: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_content: false,
        }
    }
}

impl DecodeOptions {
    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Accept or reject text after the top-level value.
    pub fn with_trailing_content(mut self, allow: bool) -> Self {
        self.allow_trailing_content = allow;
        self
    }
}

/// Options controlling an encode call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Emit newlines and indentation
    pub pretty: bool,
    /// Spaces per indentation level when `pretty` is set
    pub indent: usize,
    /// Maximum nesting of classes and arrays below the root value
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Pretty output with the default indent.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Set the indent width.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Combined decode and encode configuration.
///
/// ```
/// use jsonlink::LinkConfig;
///
/// let config = LinkConfig::from_toml_str(
///     "[decode]\nmax_depth = 16\n\n[encode]\npretty = true\n",
/// ).unwrap();
/// assert_eq!(config.decode.max_depth, 16);
/// assert!(config.encode.pretty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub decode: DecodeOptions,
    pub encode: EncodeOptions,
}

impl LinkConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LinkConfig = toml::from_str(text)
            .map_err(|e| JsonLinkError::config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all limits are usable.
    pub fn validate(&self) -> Result<()> {
        check_depth("decode.max_depth", self.decode.max_depth)?;
        check_depth("encode.max_depth", self.encode.max_depth)?;
        if self.encode.indent > MAX_INDENT {
            return Err(JsonLinkError::config(format!(
                "encode.indent must be at most {MAX_INDENT}, got {}",
                self.encode.indent
            )));
        }
        Ok(())
    }
}

fn check_depth(key: &str, max_depth: usize) -> Result<()> {
    if max_depth == 0 {
        return Err(JsonLinkError::config(format!("{key} must be at least 1")));
    }
    if max_depth > MAX_DEPTH_LIMIT {
        return Err(JsonLinkError::config(format!(
            "{key} must be at most {MAX_DEPTH_LIMIT}, got {max_depth}"
        )));
    }
    Ok(())
}
