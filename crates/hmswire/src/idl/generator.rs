// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema generation: resolves a [`Document`] into [`StructSchema`]s.

use super::ast::*;
use super::MAX_NESTING_DEPTH;
use crate::error::SchemaError;
use crate::schema::{FieldDescriptor, SchemaRef, StructSchema, TypeDescriptor};
use crate::value::{Record, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Typedef and constant chains longer than this are treated as cycles.
const MAX_ALIAS_DEPTH: usize = 32;

/// Members of one enum, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTable {
    pub name: String,
    pub members: Vec<(String, i32)>,
}

impl EnumTable {
    pub fn value_of(&self, member: &str) -> Option<i32> {
        self.members
            .iter()
            .find(|(name, _)| name == member)
            .map(|(_, v)| *v)
    }

    pub fn name_of(&self, value: i32) -> Option<&str> {
        self.members
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub oneway: bool,
    /// Name of the `_args` schema.
    pub args: String,
    /// Name of the `_result` schema; `None` for oneway methods.
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub extends: Option<String>,
    pub methods: Vec<MethodInfo>,
}

/// Output of [`SchemaGenerator::generate`].
///
/// Schemas iterate in dependency order: every struct comes after the
/// structs it references, ties broken by declaration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    schemas: Vec<SchemaRef>,
    index: HashMap<String, usize>,
    enums: Vec<EnumTable>,
    services: Vec<ServiceInfo>,
}

impl SchemaSet {
    pub fn get(&self, name: &str) -> Option<&SchemaRef> {
        self.index.get(name).map(|&i| &self.schemas[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaRef> {
        self.schemas.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|s| s.name())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn enums(&self) -> &[EnumTable] {
        &self.enums
    }

    pub fn enum_table(&self, name: &str) -> Option<&EnumTable> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn services(&self) -> &[ServiceInfo] {
        &self.services
    }
}

/// Single-use resolution pass over one document.
pub struct SchemaGenerator<'d> {
    typedefs: HashMap<&'d str, &'d TypeRef>,
    enums: HashMap<&'d str, &'d EnumDef>,
    consts: HashMap<&'d str, &'d ConstDef>,
    services: HashSet<&'d str>,
    structs: HashMap<String, StructDef>,
    struct_order: Vec<String>,
    built: HashMap<String, SchemaRef>,
    heights: HashMap<String, usize>,
    order: Vec<SchemaRef>,
    visiting: Vec<String>,
}

impl<'d> SchemaGenerator<'d> {
    /// Resolve every struct, exception, union and service method of `doc`.
    pub fn generate(doc: &'d Document) -> Result<SchemaSet, SchemaError> {
        let mut gen = Self {
            typedefs: HashMap::new(),
            enums: HashMap::new(),
            consts: HashMap::new(),
            services: HashSet::new(),
            structs: HashMap::new(),
            struct_order: Vec::new(),
            built: HashMap::new(),
            heights: HashMap::new(),
            order: Vec::new(),
            visiting: Vec::new(),
        };
        gen.register(doc)?;
        let enums = gen.enum_tables(doc)?;
        let services = gen.expand_services(doc)?;
        gen.check_aliases()?;

        for name in gen.struct_order.clone() {
            gen.build(&name)?;
        }

        let index = gen
            .order
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().to_string(), i))
            .collect();

        log::debug!(
            "[idl] generated {} schemas, {} enums, {} services",
            gen.order.len(),
            enums.len(),
            services.len()
        );

        Ok(SchemaSet {
            schemas: gen.order,
            index,
            enums,
            services,
        })
    }

    fn register(&mut self, doc: &'d Document) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for def in &doc.definitions {
            if !seen.insert(def.name()) {
                return Err(SchemaError::DuplicateType {
                    name: def.name().to_string(),
                });
            }
            match def {
                Definition::Typedef(t) => {
                    self.typedefs.insert(&t.name, &t.target);
                }
                Definition::Const(c) => {
                    self.consts.insert(&c.name, c);
                }
                Definition::Enum(e) => {
                    self.enums.insert(&e.name, e);
                }
                Definition::Struct(s) => {
                    self.struct_order.push(s.name.clone());
                    self.structs.insert(s.name.clone(), s.clone());
                }
                Definition::Service(s) => {
                    self.services.insert(&s.name);
                }
            }
        }
        Ok(())
    }

    fn enum_tables(&self, doc: &Document) -> Result<Vec<EnumTable>, SchemaError> {
        let mut tables = Vec::new();
        for def in doc.enums() {
            let mut names = HashSet::new();
            let mut members = Vec::with_capacity(def.members.len());
            for member in &def.members {
                if !names.insert(member.name.as_str()) {
                    return Err(SchemaError::DuplicateFieldName {
                        schema: def.name.clone(),
                        field: member.name.clone(),
                    });
                }
                let value =
                    i32::try_from(member.value).map_err(|_| SchemaError::EnumValueOutOfRange {
                        name: def.name.clone(),
                        member: member.name.clone(),
                        value: member.value,
                    })?;
                members.push((member.name.clone(), value));
            }
            tables.push(EnumTable {
                name: def.name.clone(),
                members,
            });
        }
        Ok(tables)
    }

    /// Add the implicit `_args` / `_result` structs of every method.
    fn expand_services(&mut self, doc: &Document) -> Result<Vec<ServiceInfo>, SchemaError> {
        let mut infos = Vec::new();
        for service in doc.services() {
            let mut methods = Vec::with_capacity(service.methods.len());
            for method in &service.methods {
                let args = format!("{}_{}_args", service.name, method.name);
                self.add_synthetic(StructDef {
                    kind: StructKind::Struct,
                    name: args.clone(),
                    fields: method.params.clone(),
                })?;

                let result = if method.oneway {
                    None
                } else {
                    let name = format!("{}_{}_result", service.name, method.name);
                    let mut fields = Vec::with_capacity(method.throws.len() + 1);
                    if let Some(returns) = &method.returns {
                        fields.push(FieldDef {
                            id: Some(0),
                            requiredness: Requiredness::Optional,
                            ty: returns.clone(),
                            name: "success".to_string(),
                            default: None,
                        });
                    }
                    fields.extend(method.throws.iter().map(|t| FieldDef {
                        requiredness: Requiredness::Optional,
                        default: None,
                        ..t.clone()
                    }));
                    self.add_synthetic(StructDef {
                        kind: StructKind::Struct,
                        name: name.clone(),
                        fields,
                    })?;
                    Some(name)
                };

                methods.push(MethodInfo {
                    name: method.name.clone(),
                    oneway: method.oneway,
                    args,
                    result,
                });
            }
            infos.push(ServiceInfo {
                name: service.name.clone(),
                extends: service.extends.clone(),
                methods,
            });
        }
        Ok(infos)
    }

    fn add_synthetic(&mut self, def: StructDef) -> Result<(), SchemaError> {
        if self.is_defined(&def.name) {
            return Err(SchemaError::DuplicateType { name: def.name });
        }
        self.struct_order.push(def.name.clone());
        self.structs.insert(def.name.clone(), def);
        Ok(())
    }

    fn is_defined(&self, name: &str) -> bool {
        self.structs.contains_key(name)
            || self.typedefs.contains_key(name)
            || self.enums.contains_key(name)
            || self.consts.contains_key(name)
            || self.services.contains(name)
    }

    /// Resolve typedefs and constants even when nothing uses them.
    fn check_aliases(&mut self) -> Result<(), SchemaError> {
        let mut typedefs: Vec<(&'d str, &'d TypeRef)> =
            self.typedefs.iter().map(|(k, v)| (*k, *v)).collect();
        typedefs.sort_by_key(|(name, _)| *name);
        for (name, target) in typedefs {
            self.resolve(target, "typedef", name)?;
        }

        let mut consts: Vec<&'d ConstDef> = self.consts.values().copied().collect();
        consts.sort_by(|a, b| a.name.cmp(&b.name));
        for c in consts {
            let ty = self.resolve(&c.ty, "const", &c.name)?;
            self.coerce(&c.value, &ty, 0)
                .map_err(|reason| SchemaError::InvalidDefault {
                    owner: "const".to_string(),
                    field: c.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }

    fn build(&mut self, name: &str) -> Result<SchemaRef, SchemaError> {
        if let Some(schema) = self.built.get(name) {
            return Ok(Arc::clone(schema));
        }
        if let Some(pos) = self.visiting.iter().position(|n| n == name) {
            let mut cycle = self.visiting[pos..].to_vec();
            cycle.push(name.to_string());
            return Err(SchemaError::RecursiveStruct {
                name: name.to_string(),
                path: cycle.join(" -> "),
            });
        }
        let Some(def) = self.structs.get(name).cloned() else {
            return Err(SchemaError::UndefinedType {
                owner: "<root>".to_string(),
                field: String::new(),
                type_name: name.to_string(),
            });
        };

        self.visiting.push(def.name.clone());
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            fields.push(self.build_field(&def, field)?);
        }
        self.visiting.pop();

        let mut height = 1;
        for field in &fields {
            let field_height = 1 + self.type_height(&field.ty);
            if field_height > MAX_NESTING_DEPTH {
                return Err(SchemaError::NestingTooDeep {
                    owner: def.name.clone(),
                    field: field.name.clone(),
                    limit: MAX_NESTING_DEPTH,
                });
            }
            height = height.max(field_height);
        }
        self.heights.insert(def.name.clone(), height);

        let schema = Arc::new(StructSchema::new(def.name.clone(), fields)?);
        self.built.insert(def.name.clone(), Arc::clone(&schema));
        self.order.push(Arc::clone(&schema));
        Ok(schema)
    }

    fn build_field(&mut self, def: &StructDef, field: &FieldDef) -> Result<FieldDescriptor, SchemaError> {
        let id = match field.id {
            None => {
                return Err(SchemaError::MissingFieldId {
                    owner: def.name.clone(),
                    field: field.name.clone(),
                })
            }
            Some(id) => u16::try_from(id)
                .ok()
                .filter(|id| i16::try_from(*id).is_ok())
                .ok_or_else(|| SchemaError::FieldIdOutOfRange {
                    owner: def.name.clone(),
                    field: field.name.clone(),
                    id,
                })?,
        };

        let ty = self.resolve(&field.ty, &def.name, &field.name)?;
        let mut desc = FieldDescriptor::new(id, field.name.clone(), ty);
        desc.required =
            field.requiredness == Requiredness::Required && def.kind != StructKind::Union;

        if let Some(default) = &field.default {
            let value = self.coerce(default, &desc.ty, 0).map_err(|reason| {
                SchemaError::InvalidDefault {
                    owner: def.name.clone(),
                    field: field.name.clone(),
                    reason,
                }
            })?;
            desc.default = Some(value);
        }
        Ok(desc)
    }

    fn resolve(
        &mut self,
        ty: &TypeRef,
        owner: &str,
        field: &str,
    ) -> Result<TypeDescriptor, SchemaError> {
        self.resolve_nested(ty, owner, field, 0, 0)
    }

    /// `aliases` counts typedef hops, `nesting` the containers around `ty`.
    /// Structs still being built count as one level each.
    fn resolve_nested(
        &mut self,
        ty: &TypeRef,
        owner: &str,
        field: &str,
        aliases: usize,
        nesting: usize,
    ) -> Result<TypeDescriptor, SchemaError> {
        if self.visiting.len() + nesting > MAX_NESTING_DEPTH {
            return Err(SchemaError::NestingTooDeep {
                owner: owner.to_string(),
                field: field.to_string(),
                limit: MAX_NESTING_DEPTH,
            });
        }
        let inner = nesting + 1;
        let desc = match ty {
            TypeRef::Bool => TypeDescriptor::Bool,
            TypeRef::Byte => TypeDescriptor::Byte,
            TypeRef::I16 => TypeDescriptor::I16,
            TypeRef::I32 => TypeDescriptor::I32,
            TypeRef::I64 => TypeDescriptor::I64,
            TypeRef::Double => TypeDescriptor::Double,
            TypeRef::String => TypeDescriptor::String,
            TypeRef::Binary => TypeDescriptor::Binary,
            TypeRef::List(elem) => {
                TypeDescriptor::list(self.resolve_nested(elem, owner, field, aliases, inner)?)
            }
            TypeRef::Set(elem) => {
                TypeDescriptor::set(self.resolve_nested(elem, owner, field, aliases, inner)?)
            }
            TypeRef::Map(key, value) => TypeDescriptor::map(
                self.resolve_nested(key, owner, field, aliases, inner)?,
                self.resolve_nested(value, owner, field, aliases, inner)?,
            ),
            TypeRef::Named(name) => {
                if let Some(target) = self.typedefs.get(name.as_str()).copied() {
                    if aliases >= MAX_ALIAS_DEPTH {
                        return Err(SchemaError::RecursiveStruct {
                            name: name.clone(),
                            path: format!("typedef chain through `{name}`"),
                        });
                    }
                    self.resolve_nested(target, owner, field, aliases + 1, nesting)?
                } else if self.enums.contains_key(name.as_str()) {
                    TypeDescriptor::I32
                } else if self.structs.contains_key(name.as_str()) {
                    TypeDescriptor::Struct(self.build(name)?)
                } else if self.consts.contains_key(name.as_str())
                    || self.services.contains(name.as_str())
                {
                    return Err(SchemaError::InvalidFieldType {
                        owner: owner.to_string(),
                        field: field.to_string(),
                        type_name: name.clone(),
                    });
                } else {
                    return Err(SchemaError::UndefinedType {
                        owner: owner.to_string(),
                        field: field.to_string(),
                        type_name: name.clone(),
                    });
                }
            }
        };
        Ok(desc)
    }

    /// Decode depth a value of `ty` needs: one per container or struct.
    fn type_height(&self, ty: &TypeDescriptor) -> usize {
        match ty {
            TypeDescriptor::Struct(schema) => self.heights.get(schema.name()).copied().unwrap_or(1),
            TypeDescriptor::List(elem) | TypeDescriptor::Set(elem) => 1 + self.type_height(elem),
            TypeDescriptor::Map { key, value } => {
                1 + self.type_height(key).max(self.type_height(value))
            }
            _ => 0,
        }
    }

    /// Convert a constant to a value of type `ty`; the error is a reason.
    fn coerce(&self, value: &ConstValue, ty: &TypeDescriptor, depth: usize) -> Result<Value, String> {
        if let ConstValue::Ident(name) = value {
            return self.coerce_ident(name, ty, depth);
        }

        let out_of_range = |v: i64| format!("{v} is out of range for {ty}");
        match (ty, value) {
            (TypeDescriptor::Bool, ConstValue::Bool(b)) => Ok(Value::Bool(*b)),
            (TypeDescriptor::Bool, ConstValue::Int(v @ (0 | 1))) => Ok(Value::Bool(*v == 1)),
            (TypeDescriptor::Byte, ConstValue::Int(v)) => {
                i8::try_from(*v).map(Value::Byte).map_err(|_| out_of_range(*v))
            }
            (TypeDescriptor::I16, ConstValue::Int(v)) => {
                i16::try_from(*v).map(Value::I16).map_err(|_| out_of_range(*v))
            }
            (TypeDescriptor::I32, ConstValue::Int(v)) => {
                i32::try_from(*v).map(Value::I32).map_err(|_| out_of_range(*v))
            }
            (TypeDescriptor::I64, ConstValue::Int(v)) => Ok(Value::I64(*v)),
            (TypeDescriptor::Double, ConstValue::Double(v)) => Ok(Value::Double(*v)),
            (TypeDescriptor::Double, ConstValue::Int(v)) => Ok(Value::Double(*v as f64)),
            (TypeDescriptor::String, ConstValue::String(s)) => Ok(Value::String(s.clone())),
            (TypeDescriptor::Binary, ConstValue::String(s)) => {
                Ok(Value::Binary(s.as_bytes().to_vec()))
            }
            (TypeDescriptor::List(elem), ConstValue::List(items)) => items
                .iter()
                .map(|item| self.coerce(item, elem, depth))
                .collect::<Result<_, _>>()
                .map(Value::List),
            (TypeDescriptor::Set(elem), ConstValue::List(items)) => items
                .iter()
                .map(|item| self.coerce(item, elem, depth))
                .collect::<Result<_, _>>()
                .map(Value::Set),
            (TypeDescriptor::Map { key, value: val }, ConstValue::Map(entries)) => entries
                .iter()
                .map(|(k, v)| -> Result<(Value, Value), String> {
                    Ok((self.coerce(k, key, depth)?, self.coerce(v, val, depth)?))
                })
                .collect::<Result<_, _>>()
                .map(Value::Map),
            (TypeDescriptor::Struct(schema), ConstValue::Map(entries)) => {
                let mut record = Record::new();
                for (k, v) in entries {
                    let ConstValue::String(name) = k else {
                        return Err(format!("struct constant keys must be field names, found {k:?}"));
                    };
                    let field = schema
                        .field(name)
                        .ok_or_else(|| format!("`{}` has no field `{name}`", schema.name()))?;
                    record.set(name.clone(), self.coerce(v, &field.ty, depth)?);
                }
                Ok(Value::Struct(record))
            }
            _ => Err(format!("{value:?} is not a valid {ty}")),
        }
    }

    fn coerce_ident(&self, name: &str, ty: &TypeDescriptor, depth: usize) -> Result<Value, String> {
        if depth >= MAX_ALIAS_DEPTH {
            return Err(format!("constant `{name}` refers to itself"));
        }
        if let Some(c) = self.consts.get(name) {
            return self.coerce(&c.value, ty, depth + 1);
        }
        if let Some((enum_name, member)) = name.rsplit_once('.') {
            if let Some(def) = self.enums.get(enum_name) {
                let Some(m) = def.members.iter().find(|m| m.name == member) else {
                    return Err(format!("enum `{enum_name}` has no member `{member}`"));
                };
                return self.coerce(&ConstValue::Int(m.value), ty, depth + 1);
            }
        }
        Err(format!("unknown constant `{name}`"))
    }
}
