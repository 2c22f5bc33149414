// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Code generator for `hmswire` interface definitions.
//!
//! Reads a Thrift IDL document, builds its schemas with
//! [`hmswire::idl::SchemaGenerator`] and emits Rust structs implementing
//! [`hmswire::ThriftStruct`], or a JSON description of the schemas.

pub mod codegen;
pub mod config;
pub mod dump;

pub use codegen::RustBackend;
pub use config::{ConfigError, GenConfig};
