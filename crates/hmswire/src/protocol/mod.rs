// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary protocol primitives.
//!
//! Big-endian, field-tagged, self-skipping encoding of structs:
//!
//! ```text
//! struct  := (field_header value)* STOP
//! header  := type:u8 id:u16
//! list    := elem_type:u8 count:u32 value*
//! set     := elem_type:u8 count:u32 value*
//! map     := key_type:u8 value_type:u8 count:u32 (key value)*
//! string  := len:u32 bytes
//! message := (0x8001_0000 | type):u32 name:string seq_id:i32 struct
//! ```

pub mod cursor;
mod reader;
mod writer;

pub use cursor::{Cursor, CursorMut};
pub use reader::{BinaryReader, FieldHeader};
pub use writer::BinaryWriter;

use crate::error::DecodeError;
use std::fmt;

/// Strict protocol version word (upper 16 bits of the message header).
pub const VERSION_1: u32 = 0x8001_0000;
/// Mask selecting the version bits of the message header.
pub const VERSION_MASK: u32 = 0xffff_0000;

/// Wire type of a value.
///
/// `String` and `Binary` share wire code 11; they differ only in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Stop,
    Bool,
    Byte,
    Double,
    I16,
    I32,
    I64,
    String,
    Binary,
    Struct,
    Map,
    Set,
    List,
}

impl TypeTag {
    /// Byte written on the wire.
    pub const fn wire_code(self) -> u8 {
        match self {
            Self::Stop => 0,
            Self::Bool => 2,
            Self::Byte => 3,
            Self::Double => 4,
            Self::I16 => 6,
            Self::I32 => 8,
            Self::I64 => 10,
            Self::String | Self::Binary => 11,
            Self::Struct => 12,
            Self::Map => 13,
            Self::Set => 14,
            Self::List => 15,
        }
    }

    /// Map a wire byte back to a tag. Code 11 reads as `String`.
    pub const fn from_wire(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Stop),
            2 => Some(Self::Bool),
            3 => Some(Self::Byte),
            4 => Some(Self::Double),
            6 => Some(Self::I16),
            8 => Some(Self::I32),
            10 => Some(Self::I64),
            11 => Some(Self::String),
            12 => Some(Self::Struct),
            13 => Some(Self::Map),
            14 => Some(Self::Set),
            15 => Some(Self::List),
            _ => None,
        }
    }

    /// Whether a value written with `self` can be read as `declared`.
    pub const fn wire_compatible(self, declared: TypeTag) -> bool {
        self.wire_code() == declared.wire_code()
    }

    /// Fixed encoded width, `None` for length-prefixed or composite types.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Byte => Some(1),
            Self::I16 => Some(2),
            Self::I32 => Some(4),
            Self::I64 | Self::Double => Some(8),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Double => "double",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Struct => "struct",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of RPC message carried by a message envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

impl TryFrom<u8> for MessageType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Call),
            2 => Ok(Self::Reply),
            3 => Ok(Self::Exception),
            4 => Ok(Self::Oneway),
            other => Err(DecodeError::InvalidMessageType(other)),
        }
    }
}

/// Message envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    /// Remote method name.
    pub name: String,
    pub kind: MessageType,
    /// Sequence id echoed by the peer in its reply.
    pub seq_id: i32,
}

impl MessageHeader {
    pub fn new(name: impl Into<String>, kind: MessageType, seq_id: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            seq_id,
        }
    }

    pub fn call(name: impl Into<String>, seq_id: i32) -> Self {
        Self::new(name, MessageType::Call, seq_id)
    }

    pub fn reply(name: impl Into<String>, seq_id: i32) -> Self {
        Self::new(name, MessageType::Reply, seq_id)
    }
}
