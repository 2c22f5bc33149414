// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! Decode limits guarding against hostile input. Supports both programmatic
//! and file-based (TOML) configuration:
//!
//! ```toml
//! [codec]
//! max_depth = 32
//! max_string_len = 16777216
//! max_container_len = 1000000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default nesting limit for structs and containers.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Limits applied by `BinaryReader` while decoding and skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum nesting of structs and containers.
    pub max_depth: usize,

    /// Maximum byte length of a single string or binary value.
    pub max_string_len: Option<usize>,

    /// Maximum element count of a single list, set or map.
    pub max_container_len: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: None,
            max_container_len: None,
        }
    }
}

impl CodecConfig {
    /// Parse configuration from TOML text.
    ///
    /// Reads the `[codec]` table when present (other tables are left to
    /// their owners), otherwise the fields at top level.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(content)?;
        let config: Self = match table.remove("codec") {
            Some(codec) => codec.try_into::<Self>()?,
            None => toml::Value::Table(table).try_into::<Self>()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.max_container_len == Some(0) {
            return Err(ConfigError::Invalid(
                "max_container_len of 0 would reject every container".into(),
            ));
        }
        Ok(())
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the string/binary length limit.
    pub fn with_max_string_len(mut self, limit: usize) -> Self {
        self.max_string_len = Some(limit);
        self
    }

    /// Set the container element limit.
    pub fn with_max_container_len(mut self, limit: usize) -> Self {
        self.max_container_len = Some(limit);
        self
    }
}
