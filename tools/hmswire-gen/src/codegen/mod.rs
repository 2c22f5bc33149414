// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Source generation backends.

pub mod naming;
pub mod rust_backend;

pub use rust_backend::RustBackend;
