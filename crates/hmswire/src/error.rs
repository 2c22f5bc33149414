// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for encoding, decoding and schema generation.
//!
//! The three families never mix: `EncodeError` is raised while validating or
//! writing a record, `DecodeError` while reading bytes, `SchemaError` only
//! while building schemas (at generation time, never per message).

use crate::protocol::TypeTag;
use thiserror::Error;

/// Errors raised by `encode` / `write_struct`.
///
/// Every variant carries the dotted path of the offending value, e.g.
/// `create_table_args.primaryKeys[1].pk_name`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// Record holds a name the schema does not declare.
    #[error("unknown field `{path}`")]
    UnknownField { path: String },

    /// Runtime value does not match the declared type.
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// A field declared `required` is absent.
    #[error("required field `{path}` is not set")]
    MissingRequired { path: String },

    /// String, binary or container length does not fit the wire length prefix.
    #[error("length {len} at `{path}` exceeds the wire limit")]
    LengthOverflow { path: String, len: usize },
}

/// Errors raised by `decode` / `read_struct` and the message reader.
///
/// Unknown fields and wire tags that disagree with the schema are *not*
/// errors; they are skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}: need {needed} bytes, {remaining} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid type tag {tag:#04x} at offset {offset}")]
    InvalidTypeTag { offset: usize, tag: u8 },

    #[error("negative length {len} at offset {offset}")]
    NegativeLength { offset: usize, len: i32 },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("string length {len} exceeds limit of {limit}")]
    StringLimitExceeded { len: usize, limit: usize },

    #[error("container size {len} exceeds limit of {limit}")]
    ContainerLimitExceeded { len: usize, limit: usize },

    #[error("bad message version {version:#010x}")]
    BadVersion { version: u32 },

    /// Message header without the strict version word (legacy peers).
    #[error("message header has no version word")]
    MissingVersion,

    #[error("invalid message type {0}")]
    InvalidMessageType(u8),

    /// Raised only by the opt-in required-field check.
    #[error("required field `{path}` is not set")]
    MissingRequired { path: String },

    /// A record value could not be converted into a typed field.
    #[error("invalid value at `{path}`: expected {expected}, found {found}")]
    InvalidValue {
        path: String,
        expected: String,
        found: String,
    },
}

impl DecodeError {
    pub(crate) fn invalid_value(path: &str, expected: TypeTag, found: &str) -> Self {
        Self::InvalidValue {
            path: path.to_string(),
            expected: expected.name().to_string(),
            found: found.to_string(),
        }
    }
}

/// Errors raised while building schemas from definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("struct `{schema}` declares field id {id} twice")]
    DuplicateFieldId { schema: String, id: u16 },

    #[error("struct `{schema}` declares field `{field}` twice")]
    DuplicateFieldName { schema: String, field: String },

    #[error("type `{name}` is defined more than once")]
    DuplicateType { name: String },

    #[error("`{owner}.{field}` references undefined type `{type_name}`")]
    UndefinedType {
        owner: String,
        field: String,
        type_name: String,
    },

    #[error("struct `{name}` is recursive through `{path}`")]
    RecursiveStruct { name: String, path: String },

    #[error("field `{owner}.{field}` has no explicit id")]
    MissingFieldId { owner: String, field: String },

    #[error("field id {id} of `{owner}.{field}` is out of range")]
    FieldIdOutOfRange { owner: String, field: String, id: i64 },

    #[error("invalid default for `{owner}.{field}`: {reason}")]
    InvalidDefault {
        owner: String,
        field: String,
        reason: String,
    },

    #[error("enum value {value} of `{name}.{member}` does not fit in i32")]
    EnumValueOutOfRange {
        name: String,
        member: String,
        value: i64,
    },

    #[error("type of `{owner}.{field}` nests more than {limit} levels deep")]
    NestingTooDeep {
        owner: String,
        field: String,
        limit: usize,
    },

    #[error("`{owner}.{field}` uses {type_name} where a value type is required")]
    InvalidFieldType {
        owner: String,
        field: String,
        type_name: String,
    },
}
