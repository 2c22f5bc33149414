// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Syntax tree of an interface-definition document.

/// A parsed document, definitions in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub includes: Vec<String>,
    pub namespaces: Vec<Namespace>,
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn structs(&self) -> impl Iterator<Item = &StructDef> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Struct(s) => Some(s),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Enum(e) => Some(e),
            _ => None,
        })
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceDef> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Service(s) => Some(s),
            _ => None,
        })
    }

    /// Namespace declared for `scope` (e.g. `rs`, `java`, `*`).
    pub fn namespace(&self, scope: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|ns| ns.scope == scope)
            .map(|ns| ns.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub scope: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Typedef(TypedefDef),
    Const(ConstDef),
    Enum(EnumDef),
    Struct(StructDef),
    Service(ServiceDef),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Self::Typedef(d) => &d.name,
            Self::Const(d) => &d.name,
            Self::Enum(d) => &d.name,
            Self::Struct(d) => &d.name,
            Self::Service(d) => &d.name,
        }
    }
}

/// Type as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
    /// Struct, enum or typedef name, possibly include-qualified.
    Named(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Double(f64),
    String(String),
    Bool(bool),
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
    /// Reference to a constant or `Enum.MEMBER`.
    Ident(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedefDef {
    pub name: String,
    pub target: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDef {
    pub name: String,
    pub ty: TypeRef,
    pub value: ConstValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    /// Values already resolved (implicit ones count up from the previous).
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    Struct,
    Exception,
    Union,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub kind: StructKind,
    pub name: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requiredness {
    Required,
    Optional,
    #[default]
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// `None` when the source omits the id.
    pub id: Option<i64>,
    pub requiredness: Requiredness,
    pub ty: TypeRef,
    pub name: String,
    pub default: Option<ConstValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDef {
    pub name: String,
    pub extends: Option<String>,
    pub methods: Vec<MethodDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub oneway: bool,
    /// `None` for `void`.
    pub returns: Option<TypeRef>,
    pub params: Vec<FieldDef>,
    pub throws: Vec<FieldDef>,
}
