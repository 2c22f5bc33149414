// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Application exception sent in `MessageType::Exception` replies.

use crate::convert::{FromValue, ToValue};
use crate::error::DecodeError;
use crate::schema::{SchemaRef, StructSchemaBuilder, TypeDescriptor};
use crate::typed::ThriftStruct;
use crate::value::Record;
use std::fmt;
use std::sync::OnceLock;

/// Exception kinds, carried as `i32` in field 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ApplicationExceptionKind {
    #[default]
    Unknown = 0,
    UnknownMethod = 1,
    InvalidMessageType = 2,
    WrongMethodName = 3,
    BadSequenceId = 4,
    MissingResult = 5,
    InternalError = 6,
    ProtocolError = 7,
    InvalidTransform = 8,
    InvalidProtocol = 9,
    UnsupportedClientType = 10,
}

impl ApplicationExceptionKind {
    /// Unknown values map to `Unknown`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Self::UnknownMethod,
            2 => Self::InvalidMessageType,
            3 => Self::WrongMethodName,
            4 => Self::BadSequenceId,
            5 => Self::MissingResult,
            6 => Self::InternalError,
            7 => Self::ProtocolError,
            8 => Self::InvalidTransform,
            9 => Self::InvalidProtocol,
            10 => Self::UnsupportedClientType,
            _ => Self::Unknown,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Error reported by a server for a call it could not process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationException {
    pub message: Option<String>,
    pub kind: ApplicationExceptionKind,
}

impl ApplicationException {
    pub fn new(kind: ApplicationExceptionKind, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            kind,
        }
    }
}

impl fmt::Display for ApplicationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "application exception {:?}", self.kind)?;
        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApplicationException {}

impl ThriftStruct for ApplicationException {
    fn schema() -> &'static SchemaRef {
        static SCHEMA: OnceLock<SchemaRef> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            StructSchemaBuilder::new("TApplicationException")
                .optional_field(1, "message", TypeDescriptor::String)
                .optional_field(2, "type", TypeDescriptor::I32)
                .build_ref()
                .expect("application exception schema is valid")
        })
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        if let Some(message) = &self.message {
            record.set("message", message.to_value());
        }
        record.set("type", self.kind.as_i32());
        record
    }

    fn from_record(mut record: Record) -> Result<Self, DecodeError> {
        let message = record
            .take("message")
            .map(|v| String::from_value(v, "message"))
            .transpose()?;
        let kind = record
            .take("type")
            .map(|v| i32::from_value(v, "type"))
            .transpose()?
            .map_or(ApplicationExceptionKind::Unknown, ApplicationExceptionKind::from_i32);
        Ok(Self { message, kind })
    }
}
