// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{item, TestContext};

#[test]
fn table_report_summarizes_changes() {
    let mut ctx = TestContext::new();
    ctx.sync(vec![item("A", 1, "Mug", "M-1"), item("B", 1, "Cup", "C-1")])
        .sync(vec![item("A", 2, "Big Mug", "M-1"), item("B", 1, "Cup", "C-1")]);

    let out = run_impl(&ctx.db, None, OutputFormat::Table).unwrap();
    assert!(out.contains("Total changes: 3"));
    assert!(out.contains("Created: 2, Updated: 1, Deleted: 0"));
    assert!(out.contains("Type: update | Version: 1 → 2"));
}

#[test]
fn json_report_has_summary() {
    let mut ctx = TestContext::new();
    ctx.sync(vec![item("A", 1, "Mug", "M-1")]);

    let out = run_impl(&ctx.db, None, OutputFormat::Json).unwrap();
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["total_changes"], 1);
    assert_eq!(report["summary"]["created"], 1);
    assert_eq!(report["changes"][0]["version_change"], "New → 1");
}
