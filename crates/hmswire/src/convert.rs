// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversions between typed Rust values and [`Value`].
//!
//! Generated structs call these from `to_record`/`from_record`. Containers
//! take an element converter so nesting like `list<map<string, Key>>` is a
//! composition of closures.

use crate::error::DecodeError;
use crate::protocol::TypeTag;
use crate::typed::ThriftStruct;
use crate::value::Value;

/// Scalar to [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// [`Value`] to scalar; `path` names the field for error messages.
pub trait FromValue: Sized {
    fn from_value(value: Value, path: &str) -> Result<Self, DecodeError>;
}

macro_rules! impl_scalar {
    ($type:ty, $variant:ident, $tag:expr) => {
        impl ToValue for $type {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl FromValue for $type {
            fn from_value(value: Value, path: &str) -> Result<Self, DecodeError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(DecodeError::invalid_value(path, $tag, other.kind_name())),
                }
            }
        }
    };
}

impl_scalar!(bool, Bool, TypeTag::Bool);
impl_scalar!(i8, Byte, TypeTag::Byte);
impl_scalar!(i16, I16, TypeTag::I16);
impl_scalar!(i32, I32, TypeTag::I32);
impl_scalar!(i64, I64, TypeTag::I64);
impl_scalar!(f64, Double, TypeTag::Double);
impl_scalar!(String, String, TypeTag::String);
impl_scalar!(Vec<u8>, Binary, TypeTag::Binary);

pub fn list<T>(items: &[T], f: impl Fn(&T) -> Value) -> Value {
    Value::List(items.iter().map(f).collect())
}

pub fn set<T>(items: &[T], f: impl Fn(&T) -> Value) -> Value {
    Value::Set(items.iter().map(f).collect())
}

/// Map entries from any `(&K, &V)` iterator (`&BTreeMap`, or
/// `vec.iter().map(|(k, v)| (k, v))`).
pub fn map<'a, K: 'a, V: 'a>(
    entries: impl IntoIterator<Item = (&'a K, &'a V)>,
    fk: impl Fn(&K) -> Value,
    fv: impl Fn(&V) -> Value,
) -> Value {
    Value::Map(entries.into_iter().map(|(k, v)| (fk(k), fv(v))).collect())
}

pub fn struct_value<T: ThriftStruct>(item: &T) -> Value {
    Value::Struct(item.to_record())
}

pub fn from_list<T, C>(
    value: Value,
    path: &str,
    f: impl Fn(Value, &str) -> Result<T, DecodeError>,
) -> Result<C, DecodeError>
where
    C: FromIterator<T>,
{
    match value {
        Value::List(items) => from_elements(items, path, f),
        other => Err(DecodeError::invalid_value(path, TypeTag::List, other.kind_name())),
    }
}

pub fn from_set<T, C>(
    value: Value,
    path: &str,
    f: impl Fn(Value, &str) -> Result<T, DecodeError>,
) -> Result<C, DecodeError>
where
    C: FromIterator<T>,
{
    match value {
        Value::Set(items) => from_elements(items, path, f),
        other => Err(DecodeError::invalid_value(path, TypeTag::Set, other.kind_name())),
    }
}

fn from_elements<T, C>(
    items: Vec<Value>,
    path: &str,
    f: impl Fn(Value, &str) -> Result<T, DecodeError>,
) -> Result<C, DecodeError>
where
    C: FromIterator<T>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| f(item, &format!("{path}[{i}]")))
        .collect()
}

pub fn from_map<K, V, C>(
    value: Value,
    path: &str,
    fk: impl Fn(Value, &str) -> Result<K, DecodeError>,
    fv: impl Fn(Value, &str) -> Result<V, DecodeError>,
) -> Result<C, DecodeError>
where
    C: FromIterator<(K, V)>,
{
    match value {
        Value::Map(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(i, (k, v))| {
                let key = fk(k, &format!("{path}[{i}].key"))?;
                let value = fv(v, &format!("{path}[{i}]"))?;
                Ok((key, value))
            })
            .collect(),
        other => Err(DecodeError::invalid_value(path, TypeTag::Map, other.kind_name())),
    }
}

/// Nested struct; errors from inside it are reported under `path`.
pub fn from_struct<T: ThriftStruct>(value: Value, path: &str) -> Result<T, DecodeError> {
    let record = match value {
        Value::Struct(record) => record,
        other => {
            return Err(DecodeError::invalid_value(
                path,
                TypeTag::Struct,
                other.kind_name(),
            ))
        }
    };
    T::from_record(record).map_err(|err| match err {
        DecodeError::InvalidValue {
            path: inner,
            expected,
            found,
        } => DecodeError::InvalidValue {
            path: format!("{path}.{inner}"),
            expected,
            found,
        },
        other => other,
    })
}
