// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed access into opaque upstream payloads.
//!
//! Upstream catalog objects are kept verbatim as [`serde_json::Value`] trees.
//! [`FieldPath`] resolves dot-separated keys inside them, and
//! [`UpstreamRecord`] wraps a payload with the two fields the core keys on:
//! `id` and `version`.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Item name used when a payload has no `item_data.name` string.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A dot-separated path into a payload, e.g. `item_data.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dot-separated path. Empty paths and empty segments are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolves the path by sequential key lookup.
    ///
    /// Returns `None` as soon as a segment is missing or the current value is
    /// not an object. Lists are never indexed into. An explicit JSON `null`
    /// counts as absent.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.lookup(value).filter(|v| !v.is_null())
    }

    /// Like [`FieldPath::resolve`], but an explicit `null` is returned as is.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for segment in &self.segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if s.is_empty() || segments.iter().any(String::is_empty) {
            return Err(Error::InvalidFieldPath(s.to_string()));
        }
        Ok(FieldPath {
            raw: s.to_string(),
            segments,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An upstream catalog object with its key fields lifted out.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRecord {
    /// Upstream identifier (top-level `id`).
    pub id: String,
    /// Upstream revision counter (top-level `version`), if present.
    pub version: Option<i64>,
    /// The object exactly as received.
    pub payload: Value,
}

impl UpstreamRecord {
    /// Wraps a payload, failing with [`Error::MissingId`] if it has no string `id`.
    pub fn from_payload(payload: Value) -> Result<Self> {
        let id = payload
            .get("id")
            .and_then(Value::as_str)
            .ok_or(Error::MissingId)?
            .to_string();
        let version = payload.get("version").and_then(Value::as_i64);
        Ok(UpstreamRecord {
            id,
            version,
            payload,
        })
    }

    /// Display name of the item, or [`UNKNOWN_NAME`].
    pub fn name(&self) -> &str {
        item_name(&self.payload).unwrap_or(UNKNOWN_NAME)
    }
}

/// Returns `item_data.name` if it is a string.
pub fn item_name(payload: &Value) -> Option<&str> {
    payload.get("item_data")?.get("name")?.as_str()
}

/// Returns the first entry of `item_data.variations`.
pub fn first_variation(payload: &Value) -> Option<&Value> {
    payload
        .get("item_data")?
        .get("variations")?
        .as_array()?
        .first()
}

/// Returns the SKU of the first variation.
pub fn first_variation_sku(payload: &Value) -> Option<&str> {
    first_variation(payload)?
        .get("item_variation_data")?
        .get("sku")?
        .as_str()
}

/// Returns `(amount, currency)` of the first variation's price.
///
/// Amount is in the currency's smallest unit. A price without a currency is
/// assumed to be USD.
pub fn first_variation_price(payload: &Value) -> Option<(i64, String)> {
    let money = first_variation(payload)?
        .get("item_variation_data")?
        .get("price_money")?;
    let amount = money.get("amount")?.as_i64()?;
    let currency = money
        .get("currency")
        .and_then(Value::as_str)
        .unwrap_or("USD")
        .to_string();
    Some((amount, currency))
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
