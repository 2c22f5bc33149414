// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rust emission for any document that resolves.

#![no_main]

use hmswire::idl;
use hmswire_gen::{GenConfig, RustBackend};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = idl::parse(source) else {
        return;
    };
    let Ok(set) = idl::SchemaGenerator::generate(&doc) else {
        return;
    };
    let code = RustBackend::new(GenConfig::default()).emit(&doc, &set);
    assert!(code.starts_with("// Generated by hmswire-gen"));
});
