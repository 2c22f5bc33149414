// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DynamicStruct: a record bound to its schema at runtime.

use crate::codec;
use crate::convert::FromValue;
use crate::error::{DecodeError, EncodeError};
use crate::protocol::{BinaryReader, BinaryWriter};
use crate::schema::SchemaRef;
use crate::value::{Record, Value};
use std::sync::Arc;
use thiserror::Error;

/// Errors for DynamicStruct accessors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("struct `{schema}` has no field `{field}`")]
    UnknownField { schema: String, field: String },

    #[error("field `{field}` expects {expected}, got {found}")]
    WrongKind {
        field: String,
        expected: String,
        found: String,
    },

    #[error("field `{field}` is not set")]
    NotSet { field: String },
}

/// Struct value with runtime type checking.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicStruct {
    schema: SchemaRef,
    record: Record,
}

impl DynamicStruct {
    /// Create with declared defaults applied; other fields stay unset.
    pub fn new(schema: &SchemaRef) -> Self {
        Self {
            schema: Arc::clone(schema),
            record: schema.default_record(),
        }
    }

    /// Defaults first, then `init` on top.
    pub fn with_values<K, I>(schema: &SchemaRef, init: I) -> Result<Self, RecordError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut data = Self::new(schema);
        for (name, value) in init {
            let name = name.into();
            data.set(&name, value)?;
        }
        Ok(data)
    }

    /// Wrap a record without checking it; `encode` validates.
    pub fn from_record(schema: &SchemaRef, record: Record) -> Self {
        Self {
            schema: Arc::clone(schema),
            record,
        }
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// Typed read of a set field.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, RecordError> {
        let value = self.get_value(name)?.ok_or_else(|| RecordError::NotSet {
            field: name.to_string(),
        })?;
        T::from_value(value.clone(), name).map_err(|err| match err {
            DecodeError::InvalidValue { expected, found, .. } => RecordError::WrongKind {
                field: name.to_string(),
                expected,
                found,
            },
            other => RecordError::WrongKind {
                field: name.to_string(),
                expected: "value".into(),
                found: other.to_string(),
            },
        })
    }

    /// Raw value, `None` when the field is unset.
    pub fn get_value(&self, name: &str) -> Result<Option<&Value>, RecordError> {
        self.check_field(name)?;
        Ok(self.record.get(name))
    }

    /// Set a field. The value's top-level kind must match the declared
    /// type; nested contents are checked at encode time.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let value = value.into();
        let field = self.schema.field(name).ok_or_else(|| RecordError::UnknownField {
            schema: self.schema.name().to_string(),
            field: name.to_string(),
        })?;
        if value.tag() != field.ty.tag() {
            return Err(RecordError::WrongKind {
                field: name.to_string(),
                expected: field.ty.to_string(),
                found: value.kind_name().to_string(),
            });
        }
        self.record.set(name, value);
        Ok(())
    }

    /// Clear a field, returning its previous value.
    pub fn unset(&mut self, name: &str) -> Result<Option<Value>, RecordError> {
        self.check_field(name)?;
        Ok(self.record.remove(name))
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.record.contains(name)
    }

    pub fn write(&self, writer: &mut BinaryWriter) -> Result<(), EncodeError> {
        codec::write_struct(writer, &self.record, &self.schema)
    }

    pub fn read(schema: &SchemaRef, reader: &mut BinaryReader<'_>) -> Result<Self, DecodeError> {
        let record = codec::read_struct(reader, schema)?;
        Ok(Self::from_record(schema, record))
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode(&self.record, &self.schema)
    }

    pub fn decode(bytes: &[u8], schema: &SchemaRef) -> Result<Self, DecodeError> {
        let record = codec::decode(bytes, schema)?;
        Ok(Self::from_record(schema, record))
    }

    fn check_field(&self, name: &str) -> Result<(), RecordError> {
        if self.schema.field(name).is_none() {
            return Err(RecordError::UnknownField {
                schema: self.schema.name().to_string(),
                field: name.to_string(),
            });
        }
        Ok(())
    }
}
