// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for StructSchema.

use super::{FieldDescriptor, SchemaRef, StructSchema, TypeDescriptor};
use crate::error::SchemaError;
use crate::value::Value;
use std::sync::Arc;

/// Builder for creating StructSchema instances.
#[derive(Debug)]
pub struct StructSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl StructSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a fully specified field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn optional_field(self, id: u16, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.field(FieldDescriptor::new(id, name, ty))
    }

    pub fn required_field(self, id: u16, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.field(FieldDescriptor::new(id, name, ty).required())
    }

    /// Add an optional field with a default value.
    pub fn default_field(
        self,
        id: u16,
        name: impl Into<String>,
        ty: TypeDescriptor,
        default: impl Into<Value>,
    ) -> Self {
        self.field(FieldDescriptor::new(id, name, ty).with_default(default))
    }

    /// Add a nested struct field.
    pub fn struct_field(self, id: u16, name: impl Into<String>, nested: &SchemaRef) -> Self {
        self.optional_field(id, name, TypeDescriptor::struct_of(nested))
    }

    /// Add a `list<struct>` field.
    pub fn struct_list_field(self, id: u16, name: impl Into<String>, nested: &SchemaRef) -> Self {
        self.optional_field(id, name, TypeDescriptor::list(TypeDescriptor::struct_of(nested)))
    }

    pub fn build(self) -> Result<StructSchema, SchemaError> {
        StructSchema::new(self.name, self.fields)
    }

    pub fn build_ref(self) -> Result<SchemaRef, SchemaError> {
        self.build().map(Arc::new)
    }
}
