// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Interface-definition front-end.
//!
//! Parses the Thrift IDL subset used by the metastore bindings and turns it
//! into runtime schemas:
//!
//! ```text
//! source --parse--> Document --SchemaGenerator::generate--> SchemaSet
//! ```
//!
//! Every service method also yields an implicit `Service_method_args`
//! struct and, unless it is `oneway`, a `Service_method_result` struct.

pub mod ast;
mod generator;
mod lexer;
mod parser;

pub use ast::Document;
pub use generator::{EnumTable, MethodInfo, SchemaGenerator, SchemaSet, ServiceInfo};

use crate::error::SchemaError;

/// Deepest type or constant nesting accepted, counting struct references.
pub const MAX_NESTING_DEPTH: usize = 64;
use thiserror::Error;

/// Syntax error with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Error from [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdlError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Parse a document.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parser::Parser::new(source)?.parse_document()
}

/// Parse and generate schemas in one step.
pub fn compile(source: &str) -> Result<SchemaSet, IdlError> {
    let doc = parse(source)?;
    Ok(SchemaGenerator::generate(&doc)?)
}
