// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder must reject or skip arbitrary input without panicking.

#![no_main]

use hmswire::idl::{self, SchemaSet};
use hmswire::{codec, BinaryReader, CodecConfig, StructSchema};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

const ARGS: &str = "ThriftHiveMetastore_create_table_with_constraints_args";

fn schemas() -> &'static SchemaSet {
    static SET: OnceLock<SchemaSet> = OnceLock::new();
    SET.get_or_init(|| {
        idl::compile(include_str!("../../tools/hmswire-gen/idl/hive_metastore.thrift"))
            .expect("metastore idl compiles")
    })
}

fuzz_target!(|data: &[u8]| {
    let set = schemas();
    let args = set.get(ARGS).expect("args schema");

    // Full metastore argument struct
    if let Ok(record) = codec::decode(data, args) {
        let _ = codec::check_required(&record, args);
        let _ = codec::encode(&record, args);
    }

    // Every field unknown: pure skip path
    let empty = StructSchema::new("Empty", Vec::new()).expect("empty schema");
    let _ = codec::decode(data, &empty);

    // Tight limits
    let config = CodecConfig::default()
        .with_max_depth(3)
        .with_max_string_len(16)
        .with_max_container_len(4);
    let _ = codec::decode_with_config(data, args, config);

    // Message envelope
    let mut reader = BinaryReader::new(data);
    if reader.read_message_begin().is_ok() {
        let _ = codec::read_struct(&mut reader, args);
    }
});
