// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven struct encoding and decoding.
//!
//! # Encoding
//!
//! Fields are written in declaration order, absent fields are omitted and a
//! STOP byte ends the struct. The whole record is validated first, so a
//! failing `encode` never leaves a half-written struct behind.
//!
//! # Decoding
//!
//! Field headers are dispatched by id. Unknown ids and wire tags that
//! disagree with the schema are skipped, which lets old and new peers talk
//! to each other. Required fields are not checked here; see
//! [`check_required`].

use crate::config::CodecConfig;
use crate::error::{DecodeError, EncodeError};
use crate::protocol::{BinaryReader, BinaryWriter, MessageHeader, TypeTag};
use crate::schema::{StructSchema, TypeDescriptor};
use crate::value::{Record, Value};
use std::fmt;

/// Largest length or count a peer reading it as `i32` accepts.
const MAX_WIRE_LEN: usize = i32::MAX as usize;

/// Upper bound on elements reserved before any are read; the count on the
/// wire is only checked against the remaining bytes.
const MAX_PREALLOC: usize = 1024;

fn initial_capacity(count: usize) -> usize {
    count.min(MAX_PREALLOC)
}

/// Location of a value inside a record, rendered as `args.keys[1].name`.
#[derive(Clone, Copy)]
enum Path<'a> {
    Root(&'a str),
    Field(&'a Path<'a>, &'a str),
    Index(&'a Path<'a>, usize),
    Key(&'a Path<'a>, usize),
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root(name) => f.write_str(name),
            Self::Field(parent, name) => write!(f, "{parent}.{name}"),
            Self::Index(parent, i) => write!(f, "{parent}[{i}]"),
            Self::Key(parent, i) => write!(f, "{parent}[{i}].key"),
        }
    }
}

/// Encode a record as a struct.
pub fn encode(record: &Record, schema: &StructSchema) -> Result<Vec<u8>, EncodeError> {
    let mut writer = BinaryWriter::new();
    write_struct(&mut writer, record, schema)?;
    Ok(writer.into_bytes())
}

/// Validate `record`, then append it to `writer`.
///
/// On error nothing has been written.
pub fn write_struct(
    writer: &mut BinaryWriter,
    record: &Record,
    schema: &StructSchema,
) -> Result<(), EncodeError> {
    validate(record, schema)?;
    write_record(writer, record, schema);
    Ok(())
}

/// Check that `record` can be encoded with `schema`.
pub fn validate(record: &Record, schema: &StructSchema) -> Result<(), EncodeError> {
    validate_record(record, schema, &Path::Root(schema.name()))
}

fn validate_record(record: &Record, schema: &StructSchema, path: &Path<'_>) -> Result<(), EncodeError> {
    for name in record.names() {
        if schema.field(name).is_none() {
            return Err(EncodeError::UnknownField {
                path: Path::Field(path, name).to_string(),
            });
        }
    }

    for field in schema.fields() {
        let field_path = Path::Field(path, &field.name);
        match record.get(&field.name) {
            Some(value) => validate_value(value, &field.ty, &field_path)?,
            None if field.required => {
                return Err(EncodeError::MissingRequired {
                    path: field_path.to_string(),
                })
            }
            None => {}
        }
    }
    Ok(())
}

fn validate_value(value: &Value, ty: &TypeDescriptor, path: &Path<'_>) -> Result<(), EncodeError> {
    match (ty, value) {
        (TypeDescriptor::Bool, Value::Bool(_))
        | (TypeDescriptor::Byte, Value::Byte(_))
        | (TypeDescriptor::I16, Value::I16(_))
        | (TypeDescriptor::I32, Value::I32(_))
        | (TypeDescriptor::I64, Value::I64(_))
        | (TypeDescriptor::Double, Value::Double(_)) => Ok(()),
        (TypeDescriptor::String, Value::String(s)) => check_len(s.len(), path),
        (TypeDescriptor::Binary, Value::Binary(b)) => check_len(b.len(), path),
        (TypeDescriptor::Struct(schema), Value::Struct(record)) => {
            validate_record(record, schema, path)
        }
        (TypeDescriptor::List(elem), Value::List(items))
        | (TypeDescriptor::Set(elem), Value::Set(items)) => {
            check_len(items.len(), path)?;
            for (i, item) in items.iter().enumerate() {
                validate_value(item, elem, &Path::Index(path, i))?;
            }
            Ok(())
        }
        (TypeDescriptor::Map { key, value: val }, Value::Map(entries)) => {
            check_len(entries.len(), path)?;
            for (i, (k, v)) in entries.iter().enumerate() {
                validate_value(k, key, &Path::Key(path, i))?;
                validate_value(v, val, &Path::Index(path, i))?;
            }
            Ok(())
        }
        _ => Err(EncodeError::TypeMismatch {
            path: path.to_string(),
            expected: ty.to_string(),
            found: value.kind_name().to_string(),
        }),
    }
}

fn check_len(len: usize, path: &Path<'_>) -> Result<(), EncodeError> {
    if len > MAX_WIRE_LEN {
        return Err(EncodeError::LengthOverflow {
            path: path.to_string(),
            len,
        });
    }
    Ok(())
}

// Shapes and lengths below were checked by `validate`.

fn write_record(writer: &mut BinaryWriter, record: &Record, schema: &StructSchema) {
    writer.write_struct_begin(schema.name());
    for field in schema.fields() {
        if let Some(value) = record.get(&field.name) {
            writer.write_field_begin(field.ty.tag(), field.id);
            write_value(writer, value, &field.ty);
            writer.write_field_end();
        }
    }
    writer.write_field_stop();
    writer.write_struct_end();
}

fn write_value(writer: &mut BinaryWriter, value: &Value, ty: &TypeDescriptor) {
    match (ty, value) {
        (_, Value::Bool(v)) => writer.write_bool(*v),
        (_, Value::Byte(v)) => writer.write_byte(*v),
        (_, Value::I16(v)) => writer.write_i16(*v),
        (_, Value::I32(v)) => writer.write_i32(*v),
        (_, Value::I64(v)) => writer.write_i64(*v),
        (_, Value::Double(v)) => writer.write_double(*v),
        (_, Value::String(v)) => writer.write_string(v),
        (_, Value::Binary(v)) => writer.write_binary(v),
        (TypeDescriptor::Struct(schema), Value::Struct(record)) => {
            write_record(writer, record, schema);
        }
        (TypeDescriptor::List(elem), Value::List(items)) => {
            writer.write_list_begin(elem.tag(), items.len() as u32);
            for item in items {
                write_value(writer, item, elem);
            }
            writer.write_list_end();
        }
        (TypeDescriptor::Set(elem), Value::Set(items)) => {
            writer.write_set_begin(elem.tag(), items.len() as u32);
            for item in items {
                write_value(writer, item, elem);
            }
            writer.write_set_end();
        }
        (TypeDescriptor::Map { key, value: val }, Value::Map(entries)) => {
            writer.write_map_begin(key.tag(), val.tag(), entries.len() as u32);
            for (k, v) in entries {
                write_value(writer, k, key);
                write_value(writer, v, val);
            }
            writer.write_map_end();
        }
        _ => {}
    }
}

/// Decode a struct with the default limits.
pub fn decode(bytes: &[u8], schema: &StructSchema) -> Result<Record, DecodeError> {
    decode_with_config(bytes, schema, CodecConfig::default())
}

pub fn decode_with_config(
    bytes: &[u8],
    schema: &StructSchema,
    config: CodecConfig,
) -> Result<Record, DecodeError> {
    let mut reader = BinaryReader::with_config(bytes, config);
    read_struct(&mut reader, schema)
}

/// Read one struct from `reader`.
pub fn read_struct(reader: &mut BinaryReader<'_>, schema: &StructSchema) -> Result<Record, DecodeError> {
    reader.read_struct_begin()?;
    let mut record = Record::new();

    while let Some(header) = reader.read_field_begin()? {
        match schema.field_by_id(header.id) {
            Some(field) if header.tag.wire_compatible(field.ty.tag()) => {
                if let Some(value) = read_value(reader, &field.ty)? {
                    record.set(field.name.clone(), value);
                }
            }
            Some(field) => {
                log::debug!(
                    "[codec] {}.{}: wire type {} does not match {}, skipping",
                    schema.name(),
                    field.name,
                    header.tag,
                    field.ty
                );
                reader.skip(header.tag)?;
            }
            None => {
                log::trace!(
                    "[codec] {}: skipping unknown field id={} type={}",
                    schema.name(),
                    header.id,
                    header.tag
                );
                reader.skip(header.tag)?;
            }
        }
        reader.read_field_end();
    }

    reader.read_struct_end();
    Ok(record)
}

/// Read a value of type `ty`.
///
/// Returns `None` when a container's element tags disagree with the schema;
/// the container has then been consumed and is dropped as a whole.
fn read_value(reader: &mut BinaryReader<'_>, ty: &TypeDescriptor) -> Result<Option<Value>, DecodeError> {
    let value = match ty {
        TypeDescriptor::Bool => Value::Bool(reader.read_bool()?),
        TypeDescriptor::Byte => Value::Byte(reader.read_byte()?),
        TypeDescriptor::I16 => Value::I16(reader.read_i16()?),
        TypeDescriptor::I32 => Value::I32(reader.read_i32()?),
        TypeDescriptor::I64 => Value::I64(reader.read_i64()?),
        TypeDescriptor::Double => Value::Double(reader.read_double()?),
        TypeDescriptor::String => Value::String(reader.read_string()?),
        TypeDescriptor::Binary => Value::Binary(reader.read_binary()?),
        TypeDescriptor::Struct(schema) => Value::Struct(read_struct(reader, schema)?),
        TypeDescriptor::List(elem) => {
            reader.descend()?;
            let (tag, count) = reader.read_list_begin()?;
            let items = read_elements(reader, elem, tag, count)?;
            reader.read_list_end();
            reader.ascend();
            match items {
                Some(items) => Value::List(items),
                None => return Ok(None),
            }
        }
        TypeDescriptor::Set(elem) => {
            reader.descend()?;
            let (tag, count) = reader.read_set_begin()?;
            let items = read_elements(reader, elem, tag, count)?;
            reader.read_set_end();
            reader.ascend();
            match items {
                Some(items) => Value::Set(items),
                None => return Ok(None),
            }
        }
        TypeDescriptor::Map { key, value } => {
            reader.descend()?;
            let (key_tag, value_tag, count) = reader.read_map_begin()?;
            let entries = read_entries(reader, key, value, key_tag, value_tag, count)?;
            reader.read_map_end();
            reader.ascend();
            match entries {
                Some(entries) => Value::Map(entries),
                None => return Ok(None),
            }
        }
    };
    Ok(Some(value))
}

fn read_elements(
    reader: &mut BinaryReader<'_>,
    elem: &TypeDescriptor,
    tag: TypeTag,
    count: usize,
) -> Result<Option<Vec<Value>>, DecodeError> {
    if count > 0 && !tag.wire_compatible(elem.tag()) {
        log::debug!("[codec] element type {} does not match {}, skipping container", tag, elem);
        for _ in 0..count {
            reader.skip(tag)?;
        }
        return Ok(None);
    }

    let mut items = Vec::with_capacity(initial_capacity(count));
    let mut complete = true;
    for _ in 0..count {
        if complete {
            match read_value(reader, elem)? {
                Some(item) => items.push(item),
                None => complete = false,
            }
        } else {
            reader.skip(tag)?;
        }
    }
    Ok(complete.then_some(items))
}

fn read_entries(
    reader: &mut BinaryReader<'_>,
    key: &TypeDescriptor,
    value: &TypeDescriptor,
    key_tag: TypeTag,
    value_tag: TypeTag,
    count: usize,
) -> Result<Option<Vec<(Value, Value)>>, DecodeError> {
    let mut complete =
        count == 0 || (key_tag.wire_compatible(key.tag()) && value_tag.wire_compatible(value.tag()));
    if !complete {
        log::debug!(
            "[codec] map types {},{} do not match {},{}, skipping container",
            key_tag,
            value_tag,
            key,
            value
        );
    }

    let mut entries = Vec::with_capacity(if complete { initial_capacity(count) } else { 0 });
    for _ in 0..count {
        if complete {
            let k = read_value(reader, key)?;
            let v = read_value(reader, value)?;
            match (k, v) {
                (Some(k), Some(v)) => entries.push((k, v)),
                _ => complete = false,
            }
        } else {
            reader.skip(key_tag)?;
            reader.skip(value_tag)?;
        }
    }
    Ok(complete.then_some(entries))
}

/// Check that every required field is present, at every nesting level.
///
/// Decoding never does this on its own.
pub fn check_required(record: &Record, schema: &StructSchema) -> Result<(), DecodeError> {
    required_in_record(record, schema, &Path::Root(schema.name()))
}

fn required_in_record(record: &Record, schema: &StructSchema, path: &Path<'_>) -> Result<(), DecodeError> {
    for field in schema.fields() {
        let field_path = Path::Field(path, &field.name);
        match record.get(&field.name) {
            Some(value) => required_in_value(value, &field.ty, &field_path)?,
            None if field.required => {
                return Err(DecodeError::MissingRequired {
                    path: field_path.to_string(),
                })
            }
            None => {}
        }
    }
    Ok(())
}

fn required_in_value(value: &Value, ty: &TypeDescriptor, path: &Path<'_>) -> Result<(), DecodeError> {
    match (ty, value) {
        (TypeDescriptor::Struct(schema), Value::Struct(record)) => {
            required_in_record(record, schema, path)
        }
        (TypeDescriptor::List(elem), Value::List(items))
        | (TypeDescriptor::Set(elem), Value::Set(items)) => {
            for (i, item) in items.iter().enumerate() {
                required_in_value(item, elem, &Path::Index(path, i))?;
            }
            Ok(())
        }
        (TypeDescriptor::Map { key, value: val }, Value::Map(entries)) => {
            for (i, (k, v)) in entries.iter().enumerate() {
                required_in_value(k, key, &Path::Key(path, i))?;
                required_in_value(v, val, &Path::Index(path, i))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Encode a message envelope around `record`.
pub fn encode_message(
    header: &MessageHeader,
    record: &Record,
    schema: &StructSchema,
) -> Result<Vec<u8>, EncodeError> {
    validate(record, schema)?;
    let mut writer = BinaryWriter::new();
    writer.write_message_begin(header);
    write_record(&mut writer, record, schema);
    writer.write_message_end();
    Ok(writer.into_bytes())
}

/// Decode a message envelope whose body is a `schema` struct.
///
/// Callers expecting `MessageType::Exception` replies read the header with
/// [`BinaryReader::read_message_begin`] first and pick the body schema
/// from its kind.
pub fn decode_message(
    bytes: &[u8],
    schema: &StructSchema,
) -> Result<(MessageHeader, Record), DecodeError> {
    let mut reader = BinaryReader::new(bytes);
    let header = reader.read_message_begin()?;
    let record = read_struct(&mut reader, schema)?;
    reader.read_message_end();
    Ok((header, record))
}
