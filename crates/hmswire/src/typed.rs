// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Statically typed records.

use crate::codec;
use crate::error::{DecodeError, EncodeError};
use crate::protocol::{BinaryReader, BinaryWriter};
use crate::schema::SchemaRef;
use crate::value::Record;

/// A Rust struct with a fixed schema.
///
/// Implementors only convert to and from [`Record`]; the codec does the
/// wire work, so typed and dynamic records produce identical bytes.
///
/// ```ignore
/// impl ThriftStruct for SQLPrimaryKey {
///     fn schema() -> &'static SchemaRef {
///         static SCHEMA: OnceLock<SchemaRef> = OnceLock::new();
///         SCHEMA.get_or_init(|| /* StructSchemaBuilder ... */)
///     }
///     // to_record / from_record
/// }
/// ```
pub trait ThriftStruct: Sized {
    fn schema() -> &'static SchemaRef;

    fn to_record(&self) -> Record;

    fn from_record(record: Record) -> Result<Self, DecodeError>;

    fn struct_name() -> &'static str {
        Self::schema().name()
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), EncodeError> {
        codec::write_struct(writer, &self.to_record(), Self::schema())
    }

    fn read(reader: &mut BinaryReader<'_>) -> Result<Self, DecodeError> {
        let record = codec::read_struct(reader, Self::schema())?;
        Self::from_record(record)
    }

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode(&self.to_record(), Self::schema())
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let record = codec::decode(bytes, Self::schema())?;
        Self::from_record(record)
    }
}
