// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::{TimeZone, Utc};
use serde_json::json;
use yare::parameterized;

#[test]
fn since_date_is_midnight_utc() {
    assert_eq!(
        parse_since("2026-03-01").unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn since_rfc3339_is_converted_to_utc() {
    assert_eq!(
        parse_since("2026-03-01T12:30:00+02:00").unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap()
    );
}

#[parameterized(
    garbage = { "yesterday" },
    bad_month = { "2026-13-01" },
    empty = { "" },
)]
fn since_rejects(input: &str) {
    assert!(parse_since(input).is_err());
}

#[parameterized(
    string = { "type=ITEM", "type", json!("ITEM") },
    number = { "version=3", "version", json!(3) },
    boolean = { "item_data.is_archived=false", "item_data.is_archived", json!(false) },
    quoted = { "item_data.name=\"42\"", "item_data.name", json!("42") },
    with_equals = { "item_data.description=a=b", "item_data.description", json!("a=b") },
)]
fn filter_parses(input: &str, path: &str, value: serde_json::Value) {
    let filter = parse_filter(input).unwrap();
    assert_eq!(filter.path.as_str(), path);
    assert_eq!(filter.value, value);
}

#[parameterized(
    no_equals = { "item_data.name" },
    empty_path = { "=x" },
    empty_segment = { "item_data..name=x" },
)]
fn filter_rejects(input: &str) {
    assert!(parse_filter(input).is_err());
}
