// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hmswire - schema-driven binary struct codec
//!
//! Encodes and decodes records in the strict binary protocol spoken by
//! metastore RPC services, and builds the record schemas from interface
//! definitions.
//!
//! ## Quick Start
//!
//! ```rust
//! use hmswire::{codec, Record, StructSchemaBuilder, TypeDescriptor};
//!
//! let key = StructSchemaBuilder::new("SQLPrimaryKey")
//!     .optional_field(1, "table_db", TypeDescriptor::String)
//!     .optional_field(4, "key_seq", TypeDescriptor::I32)
//!     .build_ref()?;
//!
//! let args = StructSchemaBuilder::new("create_table_with_constraints_args")
//!     .struct_list_field(2, "primaryKeys", &key)
//!     .build()?;
//!
//! let pk = Record::new().with("table_db", "sales").with("key_seq", 1i32);
//! let record = Record::new().with("primaryKeys", vec![pk]);
//!
//! let bytes = codec::encode(&record, &args)?;
//! assert_eq!(codec::decode(&bytes, &args)?, record);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------+
//! |  IDL source --parse--> Document --generate--> SchemaSet    |
//! +------------------------------------------------------------+
//! |  ThriftStruct (typed)   |   DynamicStruct (runtime)        |
//! +------------------------------------------------------------+
//! |  codec: validate / write_struct / read_struct / skip       |
//! +------------------------------------------------------------+
//! |  protocol: BinaryWriter / BinaryReader / TypeTag           |
//! +------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StructSchema`] | Ordered field descriptors of one struct |
//! | [`Record`] | Field name to [`Value`] map; absent means unset |
//! | [`ThriftStruct`] | Trait implemented by generated structs |
//! | [`DynamicStruct`] | Schema-checked record for runtime use |
//! | [`CodecConfig`] | Decode limits (depth, string and container size) |

/// Encode, decode and validate records against schemas.
pub mod codec;
/// Decode limits, programmatic or from TOML.
pub mod config;
/// Typed value conversion helpers used by generated code.
pub mod convert;
/// Runtime-built structs.
pub mod dynamic;
/// Error types.
pub mod error;
/// Application exception replies.
pub mod exception;
/// Interface-definition parser and schema generator.
pub mod idl;
/// Wire primitives and message envelope.
pub mod protocol;
/// Struct and field descriptors.
pub mod schema;
/// Statically typed records.
pub mod typed;
/// Dynamic values and records.
pub mod value;

pub use config::{CodecConfig, ConfigError};
pub use convert::{FromValue, ToValue};
pub use dynamic::{DynamicStruct, RecordError};
pub use error::{DecodeError, EncodeError, SchemaError};
pub use exception::{ApplicationException, ApplicationExceptionKind};
pub use idl::{compile, parse, IdlError, ParseError, SchemaGenerator, SchemaSet};
pub use protocol::{BinaryReader, BinaryWriter, MessageHeader, MessageType, TypeTag};
pub use schema::{FieldDescriptor, SchemaRef, StructSchema, StructSchemaBuilder, TypeDescriptor};
pub use typed::ThriftStruct;
pub use value::{Record, Value};
