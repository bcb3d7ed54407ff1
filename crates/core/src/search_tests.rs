// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::testing::{item, item_with_sku};
use serde_json::{json, Value};
use yare::parameterized;

fn path(s: &str) -> FieldPath {
    FieldPath::parse(s).unwrap()
}

#[test]
fn empty_query_matches_everything() {
    let query = SearchQuery::new();
    let matcher = query.compile().unwrap();
    assert!(matcher.matches(&item("A", 1, "Widget")));
    assert!(matcher.matches(&json!({"id": "X"})));
}

#[parameterized(
    exact = { "Widget" },
    lowercase = { "widget" },
    substring = { "idg" },
    anchored = { "^wid" },
    alternation = { "gadget|widget" },
)]
fn name_pattern_matches_case_insensitively(pattern: &str) {
    let query = SearchQuery::new().name(pattern);
    assert!(query.compile().unwrap().matches(&item("A", 1, "Widget")));
}

#[test]
fn name_pattern_rejects_other_names() {
    let query = SearchQuery::new().name("gadget");
    assert!(!query.compile().unwrap().matches(&item("A", 1, "Widget")));
}

#[test]
fn name_pattern_skips_payload_without_name() {
    let query = SearchQuery::new().name(".*");
    assert!(!query.compile().unwrap().matches(&json!({"id": "A"})));
}

#[test]
fn sku_pattern_uses_first_variation() {
    let query = SearchQuery::new().sku("^abc-");
    let matcher = query.compile().unwrap();
    assert!(matcher.matches(&item_with_sku("A", 1, "Widget", "ABC-100")));
    assert!(!matcher.matches(&item_with_sku("B", 1, "Widget", "XYZ-100")));
    assert!(!matcher.matches(&item("C", 1, "Widget")));
}

#[test]
fn name_and_sku_patterns_are_alternatives() {
    let query = SearchQuery::new().name("widget").sku("^XYZ");
    let matcher = query.compile().unwrap();
    assert!(matcher.matches(&item_with_sku("A", 1, "Widget", "ABC-1")));
    assert!(matcher.matches(&item_with_sku("B", 1, "Gadget", "XYZ-1")));
    assert!(!matcher.matches(&item_with_sku("C", 1, "Gadget", "ABC-1")));
}

#[test]
fn filters_require_exact_value() {
    let query = SearchQuery::new().filter(path("type"), json!("ITEM"));
    let matcher = query.compile().unwrap();
    assert!(matcher.matches(&item("A", 1, "Widget")));

    let query = SearchQuery::new().filter(path("type"), json!("ITEM_VARIATION"));
    assert!(!query.compile().unwrap().matches(&item("A", 1, "Widget")));
}

#[test]
fn filters_on_missing_path_never_match() {
    let query = SearchQuery::new().filter(path("item_data.category_id"), json!("CAT"));
    assert!(!query.compile().unwrap().matches(&item("A", 1, "Widget")));
}

#[test]
fn filters_combine_with_patterns() {
    let query = SearchQuery::new()
        .name("widget")
        .filter(path("version"), json!(2));
    let matcher = query.compile().unwrap();
    assert!(matcher.matches(&item("A", 2, "Widget")));
    assert!(!matcher.matches(&item("A", 1, "Widget")));
}

#[test]
fn invalid_pattern_is_rejected() {
    let query = SearchQuery::new().name("(unclosed");
    let err = query.compile().unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn null_filter_matches_explicit_null_only() {
    let query = SearchQuery::new().filter(path("item_data.description"), Value::Null);
    let matcher = query.compile().unwrap();

    let mut with_null = item("A", 1, "Widget");
    with_null["item_data"]["description"] = Value::Null;
    assert!(matcher.matches(&with_null));
    assert!(!matcher.matches(&item("B", 1, "Gadget")));
}
