// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier conversion from interface names to Rust names.

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NOT_RAW: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Escape `name` if it collides with a Rust keyword.
pub fn escape(name: &str) -> String {
    if NOT_RAW.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// `ThriftHiveMetastore_get_table_args` -> `ThriftHiveMetastoreGetTableArgs`.
///
/// Segments keep their inner casing, so `SQLPrimaryKey` is unchanged.
pub fn type_name(name: &str) -> String {
    let out: String = name
        .split('_')
        .filter(|s| !s.is_empty())
        .map(capitalize)
        .collect();
    escape(&out)
}

/// `MANAGED_TABLE` -> `ManagedTable`, `Active` -> `Active`.
pub fn variant_name(name: &str) -> String {
    let out: String = name
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            if segment.chars().any(char::is_lowercase) {
                capitalize(segment)
            } else {
                capitalize(&segment.to_lowercase())
            }
        })
        .collect();
    escape(&out)
}

/// `tableName` -> `table_name`, `HTTPPort` -> `http_port`.
pub fn field_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev != '_' && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)) {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    escape(&out)
}

/// `DEFAULT_BUCKETS` stays, `maxParts` -> `MAX_PARTS`.
pub fn const_name(name: &str) -> String {
    field_name(name).trim_start_matches("r#").to_uppercase()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
