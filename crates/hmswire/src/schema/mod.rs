// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct schemas: the runtime type information driving the codec.
//!
//! A [`StructSchema`] is immutable once built and shared through
//! [`SchemaRef`]; encoders and decoders only ever borrow it.

mod builder;

pub use builder::StructSchemaBuilder;

use crate::error::SchemaError;
use crate::protocol::TypeTag;
use crate::value::{Record, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable schema.
pub type SchemaRef = Arc<StructSchema>;

/// Full type of a field or container element.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Struct(SchemaRef),
    List(Arc<TypeDescriptor>),
    Set(Arc<TypeDescriptor>),
    Map {
        key: Arc<TypeDescriptor>,
        value: Arc<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn list(elem: TypeDescriptor) -> Self {
        Self::List(Arc::new(elem))
    }

    pub fn set(elem: TypeDescriptor) -> Self {
        Self::Set(Arc::new(elem))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map {
            key: Arc::new(key),
            value: Arc::new(value),
        }
    }

    pub fn struct_of(schema: &SchemaRef) -> Self {
        Self::Struct(Arc::clone(schema))
    }

    /// Wire tag of values of this type.
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Bool => TypeTag::Bool,
            Self::Byte => TypeTag::Byte,
            Self::I16 => TypeTag::I16,
            Self::I32 => TypeTag::I32,
            Self::I64 => TypeTag::I64,
            Self::Double => TypeTag::Double,
            Self::String => TypeTag::String,
            Self::Binary => TypeTag::Binary,
            Self::Struct(_) => TypeTag::Struct,
            Self::List(_) => TypeTag::List,
            Self::Set(_) => TypeTag::Set,
            Self::Map { .. } => TypeTag::Map,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Self::Struct(_) | Self::List(_) | Self::Set(_) | Self::Map { .. }
        )
    }

    /// Nested schema, if this is a struct type.
    pub fn schema(&self) -> Option<&SchemaRef> {
        match self {
            Self::Struct(schema) => Some(schema),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct(schema) => f.write_str(schema.name()),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Set(elem) => write!(f, "set<{elem}>"),
            Self::Map { key, value } => write!(f, "map<{key},{value}>"),
            scalar => f.write_str(scalar.tag().name()),
        }
    }
}

/// One field of a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Wire id; unique within the struct and stable across versions.
    pub id: u16,
    pub name: String,
    pub ty: TypeDescriptor,
    pub required: bool,
    /// Value applied by constructors when nothing else is given.
    pub default: Option<Value>,
}

impl FieldDescriptor {
    pub fn new(id: u16, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
            required: false,
            default: None,
        }
    }

    /// Mark as required (enforced at encode time).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Named, ordered set of fields indexed by id and by name.
#[derive(Debug, Clone)]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    by_id: HashMap<u16, usize>,
    by_name: HashMap<String, usize>,
}

impl StructSchema {
    /// Build a schema; fails on duplicate field ids or names.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut by_id = HashMap::with_capacity(fields.len());
        let mut by_name = HashMap::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            if by_id.insert(field.id, index).is_some() {
                return Err(SchemaError::DuplicateFieldId {
                    schema: name,
                    id: field.id,
                });
            }
            if by_name.insert(field.name.clone(), index).is_some() {
                return Err(SchemaError::DuplicateFieldName {
                    schema: name,
                    field: field.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            fields,
            by_id,
            by_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order (also the encode order).
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    pub fn field_by_id(&self, id: u16) -> Option<&FieldDescriptor> {
        self.by_id.get(&id).map(|&i| &self.fields[i])
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Record holding the declared defaults and nothing else.
    pub fn default_record(&self) -> Record {
        self.fields
            .iter()
            .filter_map(|f| f.default.clone().map(|d| (f.name.clone(), d)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Indexes are derived from `fields`.
impl PartialEq for StructSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}
