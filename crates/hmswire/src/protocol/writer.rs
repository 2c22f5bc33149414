// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary protocol writer.
//!
//! Writes headers and scalars only; walking a record against its schema is
//! the codec's job. Length prefixes are `u32` on the wire but must fit in a
//! non-negative `i32` for peers that read them signed, so callers pass
//! lengths already checked by the codec's validation pass.

use super::cursor::CursorMut;
use super::{MessageHeader, TypeTag, VERSION_1};

/// Encoder: appends binary-protocol bytes to an owned buffer.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    cursor: CursorMut,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cursor: CursorMut::with_capacity(capacity),
        }
    }

    /// Append to an existing buffer (e.g. after a transport frame header).
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        Self {
            cursor: CursorMut::from_vec(buffer),
        }
    }

    pub fn write_message_begin(&mut self, header: &MessageHeader) {
        self.cursor.write_u32_be(VERSION_1 | header.kind as u32);
        self.write_string(&header.name);
        self.cursor.write_i32_be(header.seq_id);
    }

    pub fn write_message_end(&mut self) {}

    /// Structs carry no begin/end bytes; kept for symmetry with the reader.
    pub fn write_struct_begin(&mut self, _name: &str) {}

    pub fn write_struct_end(&mut self) {}

    pub fn write_field_begin(&mut self, tag: TypeTag, id: u16) {
        self.cursor.write_u8(tag.wire_code());
        self.cursor.write_u16_be(id);
    }

    pub fn write_field_end(&mut self) {}

    pub fn write_field_stop(&mut self) {
        self.cursor.write_u8(TypeTag::Stop.wire_code());
    }

    pub fn write_list_begin(&mut self, elem: TypeTag, count: u32) {
        self.cursor.write_u8(elem.wire_code());
        self.cursor.write_u32_be(count);
    }

    pub fn write_list_end(&mut self) {}

    pub fn write_set_begin(&mut self, elem: TypeTag, count: u32) {
        self.write_list_begin(elem, count);
    }

    pub fn write_set_end(&mut self) {}

    pub fn write_map_begin(&mut self, key: TypeTag, value: TypeTag, count: u32) {
        self.cursor.write_u8(key.wire_code());
        self.cursor.write_u8(value.wire_code());
        self.cursor.write_u32_be(count);
    }

    pub fn write_map_end(&mut self) {}

    pub fn write_bool(&mut self, value: bool) {
        self.cursor.write_u8(u8::from(value));
    }

    pub fn write_byte(&mut self, value: i8) {
        self.cursor.write_i8(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.cursor.write_i16_be(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.cursor.write_i32_be(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.cursor.write_i64_be(value);
    }

    pub fn write_double(&mut self, value: f64) {
        self.cursor.write_f64_be(value);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_binary(value.as_bytes());
    }

    pub fn write_binary(&mut self, value: &[u8]) {
        self.cursor.write_u32_be(value.len() as u32);
        self.cursor.write_bytes(value);
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.cursor.offset()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.cursor.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.cursor.into_bytes()
    }
}
