// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive-descent parser producing a [`Document`].

use super::ast::*;
use super::lexer::{Lexer, Spanned, Token};
use super::{ParseError, MAX_NESTING_DEPTH};

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Spanned,
    depth: usize,
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("`{name}`"),
        Token::Int(n) => format!("integer {n}"),
        Token::Double(d) => format!("number {d}"),
        Token::Str(s) => format!("string \"{s}\""),
        Token::Punct(c) => format!("'{c}'"),
        Token::Eof => "end of input".to_string(),
    }
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next).token)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.current.line,
            column: self.current.column,
            message: message.into(),
        }
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "nesting too deep (limit {MAX_NESTING_DEPTH})"
            )));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        self.error(format!(
            "expected {expected}, found {}",
            describe(&self.current.token)
        ))
    }

    fn at_punct(&self, ch: char) -> bool {
        self.current.token == Token::Punct(ch)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current.token, Token::Ident(name) if name == keyword)
    }

    fn expect_punct(&mut self, ch: char) -> Result<(), ParseError> {
        if !self.at_punct(ch) {
            return Err(self.unexpected(&format!("'{ch}'")));
        }
        self.advance()?;
        Ok(())
    }

    fn eat_punct(&mut self, ch: char) -> Result<bool, ParseError> {
        if self.at_punct(ch) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn eat_keyword(&mut self, keyword: &str) -> Result<bool, ParseError> {
        if self.at_keyword(keyword) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Optional `,` or `;` list separator.
    fn eat_separator(&mut self) -> Result<(), ParseError> {
        if !self.eat_punct(',')? {
            self.eat_punct(';')?;
        }
        Ok(())
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        if !matches!(self.current.token, Token::Ident(_)) {
            return Err(self.unexpected(what));
        }
        match self.advance()? {
            Token::Ident(name) => Ok(name),
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_string(&mut self, what: &str) -> Result<String, ParseError> {
        if !matches!(self.current.token, Token::Str(_)) {
            return Err(self.unexpected(what));
        }
        match self.advance()? {
            Token::Str(s) => Ok(s),
            _ => Err(self.unexpected(what)),
        }
    }

    pub fn parse_document(&mut self) -> Result<Document, ParseError> {
        let mut doc = Document::default();

        loop {
            let keyword = match &self.current.token {
                Token::Eof => return Ok(doc),
                Token::Ident(name) => name.clone(),
                _ => return Err(self.unexpected("a definition")),
            };

            match keyword.as_str() {
                "include" | "cpp_include" => {
                    self.advance()?;
                    let path = self.expect_string("an include path")?;
                    if keyword == "include" {
                        doc.includes.push(path);
                    }
                }
                "namespace" => {
                    self.advance()?;
                    let scope = match self.current.token {
                        Token::Punct('*') => {
                            self.advance()?;
                            "*".to_string()
                        }
                        _ => self.expect_ident("a namespace scope")?,
                    };
                    let name = self.expect_ident("a namespace name")?;
                    doc.namespaces.push(Namespace { scope, name });
                }
                "typedef" => {
                    self.advance()?;
                    let target = self.parse_type()?;
                    let name = self.expect_ident("a typedef name")?;
                    self.eat_separator()?;
                    doc.definitions
                        .push(Definition::Typedef(TypedefDef { name, target }));
                }
                "const" => {
                    self.advance()?;
                    let ty = self.parse_type()?;
                    let name = self.expect_ident("a constant name")?;
                    self.expect_punct('=')?;
                    let value = self.parse_const_value()?;
                    self.eat_separator()?;
                    doc.definitions
                        .push(Definition::Const(ConstDef { name, ty, value }));
                }
                "enum" => {
                    self.advance()?;
                    let def = self.parse_enum()?;
                    doc.definitions.push(Definition::Enum(def));
                }
                "struct" | "exception" | "union" => {
                    self.advance()?;
                    let kind = match keyword.as_str() {
                        "struct" => StructKind::Struct,
                        "exception" => StructKind::Exception,
                        _ => StructKind::Union,
                    };
                    let def = self.parse_struct(kind)?;
                    doc.definitions.push(Definition::Struct(def));
                }
                "service" => {
                    self.advance()?;
                    let def = self.parse_service()?;
                    doc.definitions.push(Definition::Service(def));
                }
                _ => return Err(self.unexpected("a definition")),
            }
        }
    }

    fn parse_enum(&mut self) -> Result<EnumDef, ParseError> {
        let name = self.expect_ident("an enum name")?;
        self.expect_punct('{')?;
        let mut members = Vec::new();
        let mut next_value = 0i64;

        while !self.eat_punct('}')? {
            let member = self.expect_ident("an enum member")?;
            if self.eat_punct('=')? {
                next_value = match self.current.token {
                    Token::Int(v) => v,
                    _ => return Err(self.unexpected("an integer enum value")),
                };
                self.advance()?;
            }
            members.push(EnumMember {
                name: member,
                value: next_value,
            });
            next_value = next_value.saturating_add(1);
            self.eat_separator()?;
        }

        Ok(EnumDef { name, members })
    }

    fn parse_struct(&mut self, kind: StructKind) -> Result<StructDef, ParseError> {
        let name = self.expect_ident("a struct name")?;
        self.expect_punct('{')?;
        let fields = self.parse_fields('}')?;
        Ok(StructDef { kind, name, fields })
    }

    /// Fields up to and including the closing `close` punctuation.
    fn parse_fields(&mut self, close: char) -> Result<Vec<FieldDef>, ParseError> {
        let mut fields = Vec::new();
        while !self.eat_punct(close)? {
            fields.push(self.parse_field()?);
        }
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<FieldDef, ParseError> {
        let id = match self.current.token {
            Token::Int(id) => {
                self.advance()?;
                self.expect_punct(':')?;
                Some(id)
            }
            _ => None,
        };

        let requiredness = if self.eat_keyword("required")? {
            Requiredness::Required
        } else if self.eat_keyword("optional")? {
            Requiredness::Optional
        } else {
            Requiredness::Default
        };

        let ty = self.parse_type()?;
        let name = self.expect_ident("a field name")?;
        let default = if self.eat_punct('=')? {
            Some(self.parse_const_value()?)
        } else {
            None
        };
        self.eat_separator()?;

        Ok(FieldDef {
            id,
            requiredness,
            ty,
            name,
            default,
        })
    }

    fn parse_service(&mut self) -> Result<ServiceDef, ParseError> {
        let name = self.expect_ident("a service name")?;
        let extends = if self.eat_keyword("extends")? {
            Some(self.expect_ident("a base service name")?)
        } else {
            None
        };
        self.expect_punct('{')?;

        let mut methods = Vec::new();
        while !self.eat_punct('}')? {
            methods.push(self.parse_method()?);
        }

        Ok(ServiceDef {
            name,
            extends,
            methods,
        })
    }

    fn parse_method(&mut self) -> Result<MethodDef, ParseError> {
        let oneway = self.eat_keyword("oneway")?;
        let returns = if self.eat_keyword("void")? {
            None
        } else {
            Some(self.parse_type()?)
        };
        let name = self.expect_ident("a method name")?;
        self.expect_punct('(')?;
        let params = self.parse_fields(')')?;

        let throws = if self.eat_keyword("throws")? {
            self.expect_punct('(')?;
            self.parse_fields(')')?
        } else {
            Vec::new()
        };
        self.eat_separator()?;

        Ok(MethodDef {
            name,
            oneway,
            returns,
            params,
            throws,
        })
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let name = self.expect_ident("a type")?;
        let ty = match name.as_str() {
            "bool" => TypeRef::Bool,
            "byte" | "i8" => TypeRef::Byte,
            "i16" => TypeRef::I16,
            "i32" => TypeRef::I32,
            "i64" => TypeRef::I64,
            "double" => TypeRef::Double,
            "string" => TypeRef::String,
            "binary" => TypeRef::Binary,
            "list" | "set" => {
                self.expect_punct('<')?;
                let elem = Box::new(self.nested(Self::parse_type)?);
                self.expect_punct('>')?;
                if name == "list" {
                    TypeRef::List(elem)
                } else {
                    TypeRef::Set(elem)
                }
            }
            "map" => {
                self.expect_punct('<')?;
                let key = Box::new(self.nested(Self::parse_type)?);
                self.expect_punct(',')?;
                let value = Box::new(self.nested(Self::parse_type)?);
                self.expect_punct('>')?;
                TypeRef::Map(key, value)
            }
            _ => TypeRef::Named(name),
        };
        Ok(ty)
    }

    fn parse_const_value(&mut self) -> Result<ConstValue, ParseError> {
        match self.current.token {
            Token::Punct('[') => {
                self.advance()?;
                let mut items = Vec::new();
                while !self.eat_punct(']')? {
                    items.push(self.nested(Self::parse_const_value)?);
                    self.eat_separator()?;
                }
                Ok(ConstValue::List(items))
            }
            Token::Punct('{') => {
                self.advance()?;
                let mut entries = Vec::new();
                while !self.eat_punct('}')? {
                    let key = self.nested(Self::parse_const_value)?;
                    self.expect_punct(':')?;
                    let value = self.nested(Self::parse_const_value)?;
                    entries.push((key, value));
                    self.eat_separator()?;
                }
                Ok(ConstValue::Map(entries))
            }
            Token::Int(_) | Token::Double(_) | Token::Str(_) | Token::Ident(_) => {
                Ok(match self.advance()? {
                    Token::Int(v) => ConstValue::Int(v),
                    Token::Double(v) => ConstValue::Double(v),
                    Token::Str(s) => ConstValue::String(s),
                    Token::Ident(name) if name == "true" => ConstValue::Bool(true),
                    Token::Ident(name) if name == "false" => ConstValue::Bool(false),
                    Token::Ident(name) => ConstValue::Ident(name),
                    _ => return Err(self.unexpected("a constant")),
                })
            }
            _ => Err(self.unexpected("a constant")),
        }
    }
}
