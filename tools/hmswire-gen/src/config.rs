// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Code generator configuration.
//!
//! ```toml
//! [codegen]
//! derives = ["Eq", "Hash"]
//! emit_enums = true
//! emit_constants = true
//! header = "Metastore bindings"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Derives every generated struct carries.
pub const BASE_DERIVES: &[&str] = &["Debug", "Clone", "Default", "PartialEq"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Extra derives added after the base set.
    pub derives: Vec<String>,

    /// Emit a Rust enum per interface enum.
    pub emit_enums: bool,

    /// Emit `pub const` items for scalar constants.
    pub emit_constants: bool,

    /// Banner comment placed under the generated-file notice.
    pub header: Option<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            derives: Vec::new(),
            emit_enums: true,
            emit_constants: true,
            header: None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    codegen: GenConfig,
}

impl GenConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.codegen.validate()?;
        Ok(file.codegen)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Derive names must be plain paths like `Eq` or `serde::Serialize`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for derive in &self.derives {
            let valid = !derive.is_empty()
                && derive.split("::").all(|seg| {
                    seg.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
                        && seg.chars().all(|c| c.is_alphanumeric() || c == '_')
                });
            if !valid {
                return Err(ConfigError::Invalid(format!("invalid derive `{derive}`")));
            }
        }
        Ok(())
    }

    /// Base derives plus configured ones, without duplicates.
    pub fn struct_derives(&self) -> Vec<&str> {
        let mut derives: Vec<&str> = BASE_DERIVES.to_vec();
        for extra in &self.derives {
            if !derives.contains(&extra.as_str()) {
                derives.push(extra);
            }
        }
        derives
    }

    pub fn with_derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }
}
