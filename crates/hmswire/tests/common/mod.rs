// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Metastore schemas shared by the integration tests.

#![allow(dead_code)]

use hmswire::{Record, SchemaRef, StructSchemaBuilder, TypeDescriptor};

pub fn field_schema() -> SchemaRef {
    StructSchemaBuilder::new("FieldSchema")
        .optional_field(1, "name", TypeDescriptor::String)
        .optional_field(2, "type", TypeDescriptor::String)
        .optional_field(3, "comment", TypeDescriptor::String)
        .build_ref()
        .expect("FieldSchema")
}

pub fn storage_descriptor() -> SchemaRef {
    StructSchemaBuilder::new("StorageDescriptor")
        .struct_list_field(1, "cols", &field_schema())
        .optional_field(2, "location", TypeDescriptor::String)
        .optional_field(5, "compressed", TypeDescriptor::Bool)
        .optional_field(6, "numBuckets", TypeDescriptor::I32)
        .optional_field(8, "bucketCols", TypeDescriptor::list(TypeDescriptor::String))
        .optional_field(
            10,
            "parameters",
            TypeDescriptor::map(TypeDescriptor::String, TypeDescriptor::String),
        )
        .build_ref()
        .expect("StorageDescriptor")
}

pub fn table() -> SchemaRef {
    StructSchemaBuilder::new("Table")
        .optional_field(1, "tableName", TypeDescriptor::String)
        .optional_field(2, "dbName", TypeDescriptor::String)
        .optional_field(3, "owner", TypeDescriptor::String)
        .optional_field(4, "createTime", TypeDescriptor::I32)
        .struct_field(7, "sd", &storage_descriptor())
        .struct_list_field(8, "partitionKeys", &field_schema())
        .optional_field(
            9,
            "parameters",
            TypeDescriptor::map(TypeDescriptor::String, TypeDescriptor::String),
        )
        .optional_field(12, "tableType", TypeDescriptor::String)
        .build_ref()
        .expect("Table")
}

pub fn primary_key() -> SchemaRef {
    StructSchemaBuilder::new("SQLPrimaryKey")
        .optional_field(1, "table_db", TypeDescriptor::String)
        .optional_field(2, "table_name", TypeDescriptor::String)
        .optional_field(3, "column_name", TypeDescriptor::String)
        .optional_field(4, "key_seq", TypeDescriptor::I32)
        .optional_field(5, "pk_name", TypeDescriptor::String)
        .optional_field(6, "enable_cstr", TypeDescriptor::Bool)
        .optional_field(7, "validate_cstr", TypeDescriptor::Bool)
        .optional_field(8, "rely_cstr", TypeDescriptor::Bool)
        .optional_field(9, "catName", TypeDescriptor::String)
        .build_ref()
        .expect("SQLPrimaryKey")
}

pub fn foreign_key() -> SchemaRef {
    StructSchemaBuilder::new("SQLForeignKey")
        .optional_field(1, "pktable_db", TypeDescriptor::String)
        .optional_field(2, "pktable_name", TypeDescriptor::String)
        .optional_field(3, "pkcolumn_name", TypeDescriptor::String)
        .optional_field(4, "fktable_db", TypeDescriptor::String)
        .optional_field(5, "fktable_name", TypeDescriptor::String)
        .optional_field(6, "fkcolumn_name", TypeDescriptor::String)
        .optional_field(7, "key_seq", TypeDescriptor::I32)
        .optional_field(8, "update_rule", TypeDescriptor::I32)
        .optional_field(9, "delete_rule", TypeDescriptor::I32)
        .optional_field(10, "fk_name", TypeDescriptor::String)
        .optional_field(11, "pk_name", TypeDescriptor::String)
        .optional_field(12, "enable_cstr", TypeDescriptor::Bool)
        .optional_field(13, "validate_cstr", TypeDescriptor::Bool)
        .optional_field(14, "rely_cstr", TypeDescriptor::Bool)
        .build_ref()
        .expect("SQLForeignKey")
}

pub fn not_null_constraint() -> SchemaRef {
    StructSchemaBuilder::new("SQLNotNullConstraint")
        .optional_field(1, "catName", TypeDescriptor::String)
        .optional_field(2, "table_db", TypeDescriptor::String)
        .optional_field(3, "table_name", TypeDescriptor::String)
        .optional_field(4, "column_name", TypeDescriptor::String)
        .optional_field(5, "nn_name", TypeDescriptor::String)
        .optional_field(6, "enable_cstr", TypeDescriptor::Bool)
        .optional_field(7, "validate_cstr", TypeDescriptor::Bool)
        .optional_field(8, "rely_cstr", TypeDescriptor::Bool)
        .build_ref()
        .expect("SQLNotNullConstraint")
}

/// `ThriftHiveMetastore.create_table_with_constraints` arguments.
pub fn create_table_args() -> SchemaRef {
    StructSchemaBuilder::new("create_table_with_constraints_args")
        .struct_field(1, "tbl", &table())
        .struct_list_field(2, "primaryKeys", &primary_key())
        .struct_list_field(3, "foreignKeys", &foreign_key())
        .struct_list_field(5, "notNullConstraints", &not_null_constraint())
        .build_ref()
        .expect("args")
}

pub fn column(name: &str, ty: &str) -> Record {
    Record::new().with("name", name).with("type", ty)
}

pub fn sample_table() -> Record {
    let sd = Record::new()
        .with("cols", vec![column("id", "bigint"), column("name", "string")])
        .with("location", "hdfs://warehouse/sales.db/orders")
        .with("compressed", false)
        .with("numBuckets", -1i32)
        .with("bucketCols", Vec::<String>::new());
    Record::new()
        .with("tableName", "orders")
        .with("dbName", "sales")
        .with("owner", "etl")
        .with("createTime", 1_700_000_000i32)
        .with("sd", sd)
        .with("partitionKeys", vec![column("ds", "string")])
        .with("tableType", "MANAGED_TABLE")
}

pub fn sample_primary_key(seq: i32, column: &str) -> Record {
    Record::new()
        .with("table_db", "sales")
        .with("table_name", "orders")
        .with("column_name", column)
        .with("key_seq", seq)
        .with("pk_name", "pk_orders")
        .with("enable_cstr", false)
        .with("validate_cstr", false)
        .with("rely_cstr", true)
}

pub fn sample_args() -> Record {
    Record::new()
        .with("tbl", sample_table())
        .with(
            "primaryKeys",
            vec![sample_primary_key(1, "id"), sample_primary_key(2, "name")],
        )
        .with("foreignKeys", Vec::<Record>::new())
}
