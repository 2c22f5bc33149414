// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rust source emission.
//!
//! Each struct becomes a plain Rust struct whose fields are all `Option`,
//! plus an `impl ::hmswire::ThriftStruct` that converts it to and from a
//! `Record`. The schema it hands to the codec is rebuilt from the same
//! `SchemaSet`, so generated types and dynamic records share one wire shape.

use super::naming;
use crate::config::GenConfig;
use hmswire::idl::ast::{ConstDef, ConstValue, Definition, Document, TypeRef};
use hmswire::idl::{EnumTable, SchemaSet};
use hmswire::{FieldDescriptor, StructSchema, TypeDescriptor, Value};
use std::collections::HashSet;
use std::fmt::Write;

const OPTION: &str = "::core::option::Option";
const RESULT: &str = "::core::result::Result";
const STRING: &str = "::std::string::String";
const VEC: &str = "::std::vec::Vec";
const BTREE_MAP: &str = "::std::collections::BTreeMap";

pub struct RustBackend {
    config: GenConfig,
    source: Option<String>,
}

impl RustBackend {
    pub fn new(config: GenConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// Name of the input file, quoted in the header.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Emit one module for the whole document.
    pub fn emit(&self, doc: &Document, set: &SchemaSet) -> String {
        let mut out = self.emit_header(doc);

        if self.config.emit_constants {
            for def in &doc.definitions {
                if let Definition::Const(c) = def {
                    if let Some(item) = emit_const(c) {
                        out.push_str(&item);
                        out.push('\n');
                    }
                }
            }
        }

        if self.config.emit_enums {
            for table in set.enums() {
                out.push_str(&emit_enum(table));
                out.push('\n');
            }
        }

        for schema in set.iter() {
            out.push_str(&self.emit_struct(schema));
            out.push('\n');
        }

        out.truncate(out.trim_end().len());
        out.push('\n');
        out
    }

    fn emit_header(&self, doc: &Document) -> String {
        let mut out = String::new();
        match &self.source {
            Some(source) => {
                let _ = writeln!(out, "// Generated by hmswire-gen from `{source}`. Do not edit.");
            }
            None => out.push_str("// Generated by hmswire-gen. Do not edit.\n"),
        }
        if let Some(ns) = doc.namespace("rs").or_else(|| doc.namespace("*")) {
            let _ = writeln!(out, "// Namespace: {ns}");
        }
        if let Some(header) = &self.config.header {
            for line in header.lines() {
                let _ = writeln!(out, "// {line}");
            }
        }
        out.push('\n');
        out
    }

    /// Struct definition, `ThriftStruct` impl and a defaults constructor.
    pub fn emit_struct(&self, schema: &StructSchema) -> String {
        let type_name = naming::type_name(schema.name());
        let idents = field_idents(schema);
        let mut out = String::new();

        let _ = writeln!(out, "/// Wire struct `{}`.", schema.name());
        let _ = writeln!(out, "#[derive({})]", self.config.struct_derives().join(", "));
        if schema.is_empty() {
            let _ = writeln!(out, "pub struct {type_name} {{}}");
        } else {
            let _ = writeln!(out, "pub struct {type_name} {{");
            for (field, ident) in schema.fields().iter().zip(&idents) {
                let required = if field.required { ", required" } else { "" };
                let _ = writeln!(out, "    /// Field {}{required}.", field.id);
                let _ = writeln!(out, "    pub {ident}: {OPTION}<{}>,", rust_type(&field.ty));
            }
            out.push_str("}\n");
        }
        out.push('\n');

        let _ = writeln!(out, "impl {type_name} {{");
        out.push_str("    /// Declared defaults set, every other field unset.\n");
        out.push_str("    ///\n");
        out.push_str(
            "    /// Never panics: defaults were checked against their field types when this\n",
        );
        out.push_str("    /// file was generated.\n");
        out.push_str("    pub fn new() -> Self {\n");
        out.push_str("        <Self as ::hmswire::ThriftStruct>::from_record(\n");
        out.push_str("            <Self as ::hmswire::ThriftStruct>::schema().default_record(),\n");
        out.push_str("        )\n");
        out.push_str("        .expect(\"defaults match the schema\")\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        let _ = writeln!(out, "impl ::hmswire::ThriftStruct for {type_name} {{");
        out.push_str(&emit_schema_fn(schema));
        out.push('\n');
        out.push_str(&emit_to_record(schema, &idents));
        out.push('\n');
        out.push_str(&emit_from_record(schema, &idents));
        out.push_str("}\n");
        out
    }
}

/// Rust field names, made unique when two wire names map to the same one.
fn field_idents(schema: &StructSchema) -> Vec<String> {
    let mut seen = HashSet::new();
    schema
        .fields()
        .iter()
        .map(|field| {
            let ident = naming::field_name(&field.name);
            if seen.insert(ident.clone()) {
                ident
            } else {
                let ident = format!("{}_{}", ident.trim_start_matches("r#"), field.id);
                seen.insert(ident.clone());
                ident
            }
        })
        .collect()
}

fn emit_schema_fn(schema: &StructSchema) -> String {
    let mut out = String::new();
    out.push_str("    fn schema() -> &'static ::hmswire::SchemaRef {\n");
    out.push_str(
        "        static SCHEMA: ::std::sync::OnceLock<::hmswire::SchemaRef> = ::std::sync::OnceLock::new();\n",
    );
    out.push_str("        SCHEMA.get_or_init(|| {\n");
    let _ = writeln!(
        out,
        "            ::hmswire::StructSchemaBuilder::new({:?})",
        schema.name()
    );
    for field in schema.fields() {
        let _ = writeln!(out, "                .field({})", field_descriptor(field));
    }
    out.push_str("                .build_ref()\n");
    out.push_str("                .expect(\"generated schema is valid\")\n");
    out.push_str("        })\n");
    out.push_str("    }\n");
    out
}

fn field_descriptor(field: &FieldDescriptor) -> String {
    let mut expr = format!(
        "::hmswire::FieldDescriptor::new({}, {:?}, {})",
        field.id,
        field.name,
        type_expr(&field.ty)
    );
    if field.required {
        expr.push_str(".required()");
    }
    if let Some(default) = &field.default {
        let _ = write!(expr, ".with_default({})", value_expr(default));
    }
    expr
}

fn emit_to_record(schema: &StructSchema, idents: &[String]) -> String {
    let mut out = String::new();
    out.push_str("    fn to_record(&self) -> ::hmswire::Record {\n");
    if schema.is_empty() {
        out.push_str("        ::hmswire::Record::new()\n");
        out.push_str("    }\n");
        return out;
    }
    out.push_str("        let mut record = ::hmswire::Record::new();\n");
    for (field, ident) in schema.fields().iter().zip(idents) {
        let _ = writeln!(out, "        if let {OPTION}::Some(v) = &self.{ident} {{");
        let _ = writeln!(
            out,
            "            record.set({:?}, {});",
            field.name,
            to_value_expr(&field.ty, "v")
        );
        out.push_str("        }\n");
    }
    out.push_str("        record\n");
    out.push_str("    }\n");
    out
}

fn emit_from_record(schema: &StructSchema, idents: &[String]) -> String {
    let mut out = String::new();
    if schema.is_empty() {
        let _ = writeln!(
            out,
            "    fn from_record(_record: ::hmswire::Record) -> {RESULT}<Self, ::hmswire::DecodeError> {{"
        );
        let _ = writeln!(out, "        {RESULT}::Ok(Self {{}})");
        out.push_str("    }\n");
        return out;
    }
    let _ = writeln!(
        out,
        "    fn from_record(mut record: ::hmswire::Record) -> {RESULT}<Self, ::hmswire::DecodeError> {{"
    );
    let _ = writeln!(out, "        {RESULT}::Ok(Self {{");
    for (field, ident) in schema.fields().iter().zip(idents) {
        let path = format!("{:?}", field.name);
        let _ = writeln!(out, "            {ident}: record");
        let _ = writeln!(out, "                .take({path})");
        let _ = writeln!(
            out,
            "                .map(|v| {})",
            from_value_expr(&field.ty, "v", &path)
        );
        out.push_str("                .transpose()?,\n");
    }
    out.push_str("        })\n");
    out.push_str("    }\n");
    out
}

/// Rust type of a field value.
pub fn rust_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Bool => "bool".to_string(),
        TypeDescriptor::Byte => "i8".to_string(),
        TypeDescriptor::I16 => "i16".to_string(),
        TypeDescriptor::I32 => "i32".to_string(),
        TypeDescriptor::I64 => "i64".to_string(),
        TypeDescriptor::Double => "f64".to_string(),
        TypeDescriptor::String => STRING.to_string(),
        TypeDescriptor::Binary => format!("{VEC}<u8>"),
        TypeDescriptor::Struct(schema) => naming::type_name(schema.name()),
        TypeDescriptor::List(elem) | TypeDescriptor::Set(elem) => {
            format!("{VEC}<{}>", rust_type(elem))
        }
        TypeDescriptor::Map { key, value } if is_ordered_key(key) => {
            format!("{BTREE_MAP}<{}, {}>", rust_type(key), rust_type(value))
        }
        TypeDescriptor::Map { key, value } => {
            format!("{VEC}<({}, {})>", rust_type(key), rust_type(value))
        }
    }
}

/// Map keys that become `BTreeMap` keys; the rest stay an entry list.
fn is_ordered_key(ty: &TypeDescriptor) -> bool {
    matches!(
        ty,
        TypeDescriptor::Bool
            | TypeDescriptor::Byte
            | TypeDescriptor::I16
            | TypeDescriptor::I32
            | TypeDescriptor::I64
            | TypeDescriptor::String
    )
}

/// Expression building the `TypeDescriptor`.
fn type_expr(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Bool => "::hmswire::TypeDescriptor::Bool".to_string(),
        TypeDescriptor::Byte => "::hmswire::TypeDescriptor::Byte".to_string(),
        TypeDescriptor::I16 => "::hmswire::TypeDescriptor::I16".to_string(),
        TypeDescriptor::I32 => "::hmswire::TypeDescriptor::I32".to_string(),
        TypeDescriptor::I64 => "::hmswire::TypeDescriptor::I64".to_string(),
        TypeDescriptor::Double => "::hmswire::TypeDescriptor::Double".to_string(),
        TypeDescriptor::String => "::hmswire::TypeDescriptor::String".to_string(),
        TypeDescriptor::Binary => "::hmswire::TypeDescriptor::Binary".to_string(),
        TypeDescriptor::Struct(schema) => format!(
            "::hmswire::TypeDescriptor::struct_of(<{} as ::hmswire::ThriftStruct>::schema())",
            naming::type_name(schema.name())
        ),
        TypeDescriptor::List(elem) => format!("::hmswire::TypeDescriptor::list({})", type_expr(elem)),
        TypeDescriptor::Set(elem) => format!("::hmswire::TypeDescriptor::set({})", type_expr(elem)),
        TypeDescriptor::Map { key, value } => format!(
            "::hmswire::TypeDescriptor::map({}, {})",
            type_expr(key),
            type_expr(value)
        ),
    }
}

/// Expression turning `expr` (a `&T`) into a `Value`.
fn to_value_expr(ty: &TypeDescriptor, expr: &str) -> String {
    match ty {
        TypeDescriptor::Struct(_) => format!("::hmswire::convert::struct_value({expr})"),
        TypeDescriptor::List(elem) => format!(
            "::hmswire::convert::list({expr}, |e| {})",
            to_value_expr(elem, "e")
        ),
        TypeDescriptor::Set(elem) => format!(
            "::hmswire::convert::set({expr}, |e| {})",
            to_value_expr(elem, "e")
        ),
        TypeDescriptor::Map { key, value } => {
            let entries = if is_ordered_key(key) {
                expr.to_string()
            } else {
                format!("{expr}.iter().map(|(k, v)| (k, v))")
            };
            format!(
                "::hmswire::convert::map({entries}, |k| {}, |e| {})",
                to_value_expr(key, "k"),
                to_value_expr(value, "e")
            )
        }
        _ => format!("::hmswire::ToValue::to_value({expr})"),
    }
}

/// Expression converting `expr` (a `Value`) into the field type at `path`.
fn from_value_expr(ty: &TypeDescriptor, expr: &str, path: &str) -> String {
    match ty {
        TypeDescriptor::Struct(schema) => format!(
            "::hmswire::convert::from_struct::<{}>({expr}, {path})",
            naming::type_name(schema.name())
        ),
        TypeDescriptor::List(elem) | TypeDescriptor::Set(elem) => {
            let func = if matches!(ty, TypeDescriptor::Set(_)) {
                "from_set"
            } else {
                "from_list"
            };
            format!(
                "::hmswire::convert::{func}::<{}, {}>({expr}, {path}, |v, p| {})",
                rust_type(elem),
                rust_type(ty),
                from_value_expr(elem, "v", "p")
            )
        }
        TypeDescriptor::Map { key, value } => format!(
            "::hmswire::convert::from_map::<{}, {}, {}>({expr}, {path}, |v, p| {}, |v, p| {})",
            rust_type(key),
            rust_type(value),
            rust_type(ty),
            from_value_expr(key, "v", "p"),
            from_value_expr(value, "v", "p")
        ),
        _ => format!(
            "<{} as ::hmswire::FromValue>::from_value({expr}, {path})",
            rust_type(ty)
        ),
    }
}

/// Literal expression rebuilding a default `Value`.
pub fn value_expr(value: &Value) -> String {
    match value {
        Value::Bool(v) => format!("::hmswire::Value::Bool({v})"),
        Value::Byte(v) => format!("::hmswire::Value::Byte({v})"),
        Value::I16(v) => format!("::hmswire::Value::I16({v})"),
        Value::I32(v) => format!("::hmswire::Value::I32({v})"),
        Value::I64(v) if *v == i64::MIN => "::hmswire::Value::I64(i64::MIN)".to_string(),
        Value::I64(v) => format!("::hmswire::Value::I64({v})"),
        Value::Double(v) => format!("::hmswire::Value::Double({})", float_literal(*v)),
        Value::String(s) => format!("::hmswire::Value::String({s:?}.to_string())"),
        Value::Binary(bytes) => format!("::hmswire::Value::Binary(vec!{bytes:?})"),
        Value::Struct(record) => {
            let mut expr = "::hmswire::Record::new()".to_string();
            for (name, v) in record {
                let _ = write!(expr, ".with({name:?}, {})", value_expr(v));
            }
            format!("::hmswire::Value::Struct({expr})")
        }
        Value::List(items) => format!("::hmswire::Value::List(vec![{}])", join_values(items)),
        Value::Set(items) => format!("::hmswire::Value::Set(vec![{}])", join_values(items)),
        Value::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("({}, {})", value_expr(k), value_expr(v)))
                .collect();
            format!("::hmswire::Value::Map(vec![{}])", entries.join(", "))
        }
    }
}

fn join_values(items: &[Value]) -> String {
    items.iter().map(value_expr).collect::<Vec<_>>().join(", ")
}

fn float_literal(v: f64) -> String {
    if v.is_nan() {
        "f64::NAN".to_string()
    } else if v == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if v == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        format!("{v:?}")
    }
}

/// `#[repr(i32)]` enum with conversions from and to the wire value.
pub fn emit_enum(table: &EnumTable) -> String {
    let type_name = naming::type_name(&table.name);
    let mut variants: Vec<(String, &str, i32)> = Vec::new();
    let mut aliases: Vec<(String, String)> = Vec::new();
    for (member, value) in &table.members {
        match variants.iter().find(|(_, _, v)| v == value) {
            Some((first, _, _)) => aliases.push((naming::const_name(member), first.clone())),
            None => variants.push((naming::variant_name(member), member, *value)),
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "/// Enum `{}`; fields of this type hold the `i32` value.", table.name);
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
    if !variants.is_empty() {
        out.push_str("#[repr(i32)]\n");
    }
    let _ = writeln!(out, "pub enum {type_name} {{");
    for (variant, _, value) in &variants {
        let _ = writeln!(out, "    {variant} = {value},");
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {type_name} {{");
    for (alias, target) in &aliases {
        let _ = writeln!(out, "    pub const {alias}: Self = Self::{target};");
    }
    if !aliases.is_empty() {
        out.push('\n');
    }
    out.push_str("    /// Member name as declared.\n");
    out.push_str("    pub fn name(self) -> &'static str {\n");
    out.push_str("        match self {\n");
    for (variant, member, _) in &variants {
        let _ = writeln!(out, "            Self::{variant} => {member:?},");
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl ::core::convert::TryFrom<i32> for {type_name} {{");
    out.push_str("    type Error = i32;\n\n");
    let _ = writeln!(out, "    fn try_from(value: i32) -> {RESULT}<Self, i32> {{");
    out.push_str("        match value {\n");
    for (variant, _, value) in &variants {
        let _ = writeln!(out, "            {value} => {RESULT}::Ok(Self::{variant}),");
    }
    let _ = writeln!(out, "            other => {RESULT}::Err(other),");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl ::core::convert::From<{type_name}> for i32 {{");
    let _ = writeln!(out, "    fn from(value: {type_name}) -> i32 {{");
    if variants.is_empty() {
        out.push_str("        match value {}\n");
    } else {
        out.push_str("        value as i32\n");
    }
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// `pub const` for a literal scalar constant; other constants are skipped.
pub fn emit_const(def: &ConstDef) -> Option<String> {
    let name = naming::const_name(&def.name);
    let (ty, literal) = match (&def.ty, &def.value) {
        (TypeRef::Bool, ConstValue::Bool(b)) => ("bool", b.to_string()),
        (TypeRef::Bool, ConstValue::Int(v @ (0 | 1))) => ("bool", (*v == 1).to_string()),
        (TypeRef::Byte, ConstValue::Int(v)) => ("i8", i8::try_from(*v).ok()?.to_string()),
        (TypeRef::I16, ConstValue::Int(v)) => ("i16", i16::try_from(*v).ok()?.to_string()),
        (TypeRef::I32, ConstValue::Int(v)) => ("i32", i32::try_from(*v).ok()?.to_string()),
        (TypeRef::I64, ConstValue::Int(v)) if *v == i64::MIN => ("i64", "i64::MIN".to_string()),
        (TypeRef::I64, ConstValue::Int(v)) => ("i64", v.to_string()),
        (TypeRef::Double, ConstValue::Double(v)) => ("f64", float_literal(*v)),
        (TypeRef::Double, ConstValue::Int(v)) => ("f64", float_literal(*v as f64)),
        (TypeRef::String, ConstValue::String(s)) => ("&str", format!("{s:?}")),
        _ => {
            tracing::debug!(name = %def.name, "constant is not a scalar literal, skipped");
            return None;
        }
    };
    Some(format!("pub const {name}: {ty} = {literal};\n"))
}
