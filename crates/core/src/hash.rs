// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content hashing for change detection.
//!
//! A record's digest covers everything except the top-level volatile fields,
//! so a bump of `version` or `updated_at` alone never counts as a change.
//! Nested fields with the same names are hashed like any other field.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Top-level fields excluded from the content hash.
pub const VOLATILE_FIELDS: [&str; 2] = ["version", "updated_at"];

/// Computes the SHA-256 content hash of a payload as lowercase hex.
pub fn content_hash(payload: &Value) -> String {
    let mut canonical = String::new();
    match payload {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map
                .keys()
                .filter(|k| !VOLATILE_FIELDS.contains(&k.as_str()))
                .collect();
            keys.sort();
            write_object(&mut canonical, keys.into_iter().map(|k| (k, &map[k])));
        }
        other => write_canonical(&mut canonical, other),
    }
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Serializes a value with sorted object keys and no insignificant whitespace.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(&mut out, value);
    out
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            write_object(out, keys.into_iter().map(|k| (k, &map[k])));
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        // Scalars: serde_json's compact form is already canonical.
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_object<'a>(out: &mut String, entries: impl Iterator<Item = (&'a String, &'a Value)>) {
    out.push('{');
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(key.clone()).to_string());
        out.push(':');
        write_canonical(out, value);
    }
    out.push('}');
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
