// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON description of a compiled schema set.

use hmswire::idl::SchemaSet;
use hmswire::{FieldDescriptor, StructSchema, Value};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SchemaDump {
    pub structs: Vec<StructDump>,
    pub enums: Vec<EnumDump>,
    pub services: Vec<ServiceDump>,
}

#[derive(Debug, Serialize)]
pub struct StructDump {
    pub name: String,
    pub fields: Vec<FieldDump>,
}

#[derive(Debug, Serialize)]
pub struct FieldDump {
    pub id: u16,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct EnumDump {
    pub name: String,
    pub members: Vec<(String, i32)>,
}

#[derive(Debug, Serialize)]
pub struct ServiceDump {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub methods: Vec<MethodDump>,
}

#[derive(Debug, Serialize)]
pub struct MethodDump {
    pub name: String,
    pub oneway: bool,
    pub args: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl SchemaDump {
    pub fn from_set(set: &SchemaSet) -> Self {
        Self {
            structs: set.iter().map(|schema| StructDump::from_schema(schema)).collect(),
            enums: set
                .enums()
                .iter()
                .map(|table| EnumDump {
                    name: table.name.clone(),
                    members: table.members.clone(),
                })
                .collect(),
            services: set
                .services()
                .iter()
                .map(|svc| ServiceDump {
                    name: svc.name.clone(),
                    extends: svc.extends.clone(),
                    methods: svc
                        .methods
                        .iter()
                        .map(|m| MethodDump {
                            name: m.name.clone(),
                            oneway: m.oneway,
                            args: m.args.clone(),
                            result: m.result.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl StructDump {
    pub fn from_schema(schema: &StructSchema) -> Self {
        Self {
            name: schema.name().to_string(),
            fields: schema.fields().iter().map(FieldDump::from_field).collect(),
        }
    }
}

impl FieldDump {
    fn from_field(field: &FieldDescriptor) -> Self {
        Self {
            id: field.id,
            name: field.name.clone(),
            ty: field.ty.to_string(),
            required: field.required,
            default: field.default.as_ref().map(json_value),
        }
    }
}

/// JSON rendering of a default value. Binary becomes a byte array, maps an
/// array of `[key, value]` pairs since keys need not be strings.
pub fn json_value(value: &Value) -> serde_json::Value {
    use serde_json::Value as Json;
    match value {
        Value::Bool(v) => Json::Bool(*v),
        Value::Byte(v) => Json::from(*v),
        Value::I16(v) => Json::from(*v),
        Value::I32(v) => Json::from(*v),
        Value::I64(v) => Json::from(*v),
        Value::Double(v) => serde_json::Number::from_f64(*v).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::Binary(bytes) => Json::from(bytes.clone()),
        Value::Struct(record) => Json::Object(
            record
                .iter()
                .map(|(name, v)| (name.clone(), json_value(v)))
                .collect(),
        ),
        Value::List(items) | Value::Set(items) => {
            Json::Array(items.iter().map(json_value).collect())
        }
        Value::Map(entries) => Json::Array(
            entries
                .iter()
                .map(|(k, v)| Json::Array(vec![json_value(k), json_value(v)]))
                .collect(),
        ),
    }
}
