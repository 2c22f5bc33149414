// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IDL front-end on arbitrary text: parse errors are fine, panics are not.

#![no_main]

use hmswire::idl;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(doc) = idl::parse(source) {
        let _ = idl::SchemaGenerator::generate(&doc);
    }
});
