// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary protocol reader.
//!
//! Every length and count is checked against the configured limits and
//! against the bytes actually left before anything is allocated.

use super::cursor::Cursor;
use super::{MessageHeader, MessageType, TypeTag, VERSION_1, VERSION_MASK};
use crate::config::CodecConfig;
use crate::error::DecodeError;

/// Field header read from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub tag: TypeTag,
    pub id: u16,
}

/// Decoder: reads binary-protocol values from a borrowed buffer.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    cursor: Cursor<'a>,
    config: CodecConfig,
    depth: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_config(bytes, CodecConfig::default())
    }

    pub fn with_config(bytes: &'a [u8], config: CodecConfig) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Enter one nesting level (struct or container).
    pub(crate) fn descend(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.config.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn read_message_begin(&mut self) -> Result<MessageHeader, DecodeError> {
        let word = self.cursor.read_i32_be()?;
        if word >= 0 {
            return Err(DecodeError::MissingVersion);
        }
        let word = word as u32;
        if word & VERSION_MASK != VERSION_1 {
            return Err(DecodeError::BadVersion {
                version: word & VERSION_MASK,
            });
        }
        let kind = MessageType::try_from((word & 0xff) as u8)?;
        let name = self.read_string()?;
        let seq_id = self.cursor.read_i32_be()?;
        Ok(MessageHeader { name, kind, seq_id })
    }

    pub fn read_message_end(&mut self) {}

    pub fn read_struct_begin(&mut self) -> Result<(), DecodeError> {
        self.descend()
    }

    pub fn read_struct_end(&mut self) {
        self.ascend();
    }

    /// Read the next field header; `None` once the STOP byte is reached.
    pub fn read_field_begin(&mut self) -> Result<Option<FieldHeader>, DecodeError> {
        let tag = self.read_tag()?;
        if tag == TypeTag::Stop {
            return Ok(None);
        }
        let id = self.cursor.read_u16_be()?;
        Ok(Some(FieldHeader { tag, id }))
    }

    pub fn read_field_end(&mut self) {}

    /// Returns the element tag and count.
    pub fn read_list_begin(&mut self) -> Result<(TypeTag, usize), DecodeError> {
        let elem = self.read_tag()?;
        let count = self.read_count(1)?;
        Ok((elem, count))
    }

    pub fn read_list_end(&mut self) {}

    pub fn read_set_begin(&mut self) -> Result<(TypeTag, usize), DecodeError> {
        self.read_list_begin()
    }

    pub fn read_set_end(&mut self) {}

    /// Returns key tag, value tag and entry count.
    pub fn read_map_begin(&mut self) -> Result<(TypeTag, TypeTag, usize), DecodeError> {
        let key = self.read_tag()?;
        let value = self.read_tag()?;
        let count = self.read_count(2)?;
        Ok((key, value, count))
    }

    pub fn read_map_end(&mut self) {}

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.cursor.read_u8()? != 0)
    }

    pub fn read_byte(&mut self) -> Result<i8, DecodeError> {
        self.cursor.read_i8()
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.cursor.read_i16_be()
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.cursor.read_i32_be()
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.cursor.read_i64_be()
    }

    pub fn read_double(&mut self) -> Result<f64, DecodeError> {
        self.cursor.read_f64_be()
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let offset = self.cursor.offset();
        let bytes = self.read_binary_slice()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    pub fn read_binary(&mut self) -> Result<Vec<u8>, DecodeError> {
        self.read_binary_slice().map(<[u8]>::to_vec)
    }

    /// Borrow a length-prefixed byte run without copying.
    pub fn read_binary_slice(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_length()?;
        if let Some(limit) = self.config.max_string_len {
            if len > limit {
                return Err(DecodeError::StringLimitExceeded { len, limit });
            }
        }
        self.cursor.read_bytes(len)
    }

    /// Consume one value of type `tag` without materialising it.
    pub fn skip(&mut self, tag: TypeTag) -> Result<(), DecodeError> {
        if let Some(size) = tag.fixed_size() {
            return self.cursor.advance(size);
        }
        match tag {
            TypeTag::String | TypeTag::Binary => self.read_binary_slice().map(|_| ()),
            TypeTag::Struct => {
                self.read_struct_begin()?;
                while let Some(header) = self.read_field_begin()? {
                    self.skip(header.tag)?;
                    self.read_field_end();
                }
                self.read_struct_end();
                Ok(())
            }
            TypeTag::List | TypeTag::Set => {
                self.descend()?;
                let (elem, count) = self.read_list_begin()?;
                for _ in 0..count {
                    self.skip(elem)?;
                }
                self.ascend();
                Ok(())
            }
            TypeTag::Map => {
                self.descend()?;
                let (key, value, count) = self.read_map_begin()?;
                for _ in 0..count {
                    self.skip(key)?;
                    self.skip(value)?;
                }
                self.ascend();
                Ok(())
            }
            // STOP is never a value; fixed-size tags returned above.
            _ => Err(DecodeError::InvalidTypeTag {
                offset: self.cursor.offset(),
                tag: tag.wire_code(),
            }),
        }
    }

    fn read_tag(&mut self) -> Result<TypeTag, DecodeError> {
        let offset = self.cursor.offset();
        let code = self.cursor.read_u8()?;
        TypeTag::from_wire(code).ok_or(DecodeError::InvalidTypeTag { offset, tag: code })
    }

    fn read_length(&mut self) -> Result<usize, DecodeError> {
        let offset = self.cursor.offset();
        let len = self.cursor.read_i32_be()?;
        usize::try_from(len).map_err(|_| DecodeError::NegativeLength { offset, len })
    }

    /// Container count; every element needs at least `min_bytes_per_entry`
    /// bytes, so larger counts cannot be satisfied by the remaining input.
    fn read_count(&mut self, min_bytes_per_entry: usize) -> Result<usize, DecodeError> {
        let count = self.read_length()?;
        if let Some(limit) = self.config.max_container_len {
            if count > limit {
                return Err(DecodeError::ContainerLimitExceeded { len: count, limit });
            }
        }
        let needed = count.saturating_mul(min_bytes_per_entry);
        if needed > self.cursor.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.cursor.offset(),
                needed,
                remaining: self.cursor.remaining(),
            });
        }
        Ok(count)
    }
}
