// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors for big-endian buffer manipulation.

use crate::error::DecodeError;

/// Generate append methods for primitive types.
macro_rules! impl_write_be {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_be_bytes());
        }
    };
}

/// Generate read methods for primitive types.
///
/// Each generated method checks bounds (`DecodeError::UnexpectedEof` on
/// overflow), converts via `from_be_bytes()` and advances the offset.
macro_rules! impl_read_be {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type, DecodeError> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_be_bytes(bytes))
        }
    };
}

/// Append-only write cursor over an owned buffer.
#[derive(Debug, Default, Clone)]
pub struct CursorMut {
    buffer: Vec<u8>,
}

impl CursorMut {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Continue appending to an existing buffer.
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    impl_write_be!(write_i8, i8);
    impl_write_be!(write_i16_be, i16);
    impl_write_be!(write_u16_be, u16);
    impl_write_be!(write_i32_be, i32);
    impl_write_be!(write_u32_be, u32);
    impl_write_be!(write_i64_be, i64);

    pub fn write_f64_be(&mut self, value: f64) {
        self.write_i64_be(value.to_bits() as i64);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    impl_read_be!(read_i8, i8, 1);
    impl_read_be!(read_i16_be, i16, 2);
    impl_read_be!(read_u16_be, u16, 2);
    impl_read_be!(read_i32_be, i32, 4);
    impl_read_be!(read_u32_be, u32, 4);
    impl_read_be!(read_i64_be, i64, 8);

    pub fn read_f64_be(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_i64_be()? as u64))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Advance without looking at the bytes.
    pub fn advance(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
