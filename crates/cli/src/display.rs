// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Table rendering for command output.

use catmirror_core::{CacheStatus, ChangeSnapshot, ItemSummary, Report, SyncRun};
use chrono::{DateTime, Utc};

use crate::colors;

/// Width of the rule under section headers.
const RULE_WIDTH: usize = 80;

/// Changes shown in a table report before eliding the rest.
pub const REPORT_TABLE_LIMIT: usize = 10;

const NOT_AVAILABLE: &str = "N/A";

/// Format a timestamp for display: `2026-03-01 12:00:00 UTC`.
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn section(lines: &mut Vec<String>, title: String) {
    lines.push(colors::header(&title));
    lines.push("=".repeat(RULE_WIDTH));
}

/// Render a list of changes.
///
/// ```text
/// Found 1 changes:
/// ================
/// Widget Pro (I1)
///    Type: update
///    Time: 2026-03-01 12:00:00 UTC
///    Changes: item_data.name, version
/// ```
pub fn format_changes(changes: &[ChangeSnapshot]) -> String {
    let mut lines = Vec::new();
    section(&mut lines, format!("Found {} changes:", changes.len()));
    for change in changes {
        lines.push(format!("{} ({})", change.item_name, change.item_id));
        lines.push(format!("   Type: {}", change.change_type));
        lines.push(format!("   Time: {}", format_time(&change.timestamp)));
        let fields = change.changed_fields();
        if !fields.is_empty() {
            lines.push(format!("   Changes: {}", fields.join(", ")));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Render a change report, listing at most [`REPORT_TABLE_LIMIT`] changes.
pub fn format_report(report: &Report) -> String {
    let mut lines = vec![colors::header("Change Report")];
    lines.push(format!(
        "Generated: {}",
        format_time(&report.report_generated)
    ));
    if let Some(since) = &report.since {
        lines.push(format!("Since: {}", format_time(since)));
    }
    lines.push(format!("Total changes: {}", report.total_changes));
    lines.push(format!(
        "Created: {}, Updated: {}, Deleted: {}",
        report.summary.created, report.summary.updated, report.summary.deleted
    ));
    lines.push("=".repeat(RULE_WIDTH));

    for entry in report.changes.iter().take(REPORT_TABLE_LIMIT) {
        lines.push(entry.item_name.clone());
        lines.push(format!(
            "   Type: {} | Version: {}",
            entry.change_type, entry.version_change
        ));
        lines.push(format!("   Time: {}", format_time(&entry.timestamp)));
        if !entry.key_changes.is_empty() {
            lines.push(format!("   Changes: {}", entry.key_changes.join(", ")));
        }
        lines.push(String::new());
    }

    if report.changes.len() > REPORT_TABLE_LIMIT {
        lines.push(colors::context(&format!(
            "... and {} more changes (use --output json for full report)",
            report.changes.len() - REPORT_TABLE_LIMIT
        )));
    }
    lines.join("\n")
}

/// Render search results.
pub fn format_items(items: &[ItemSummary]) -> String {
    let mut lines = Vec::new();
    section(&mut lines, format!("Found {} matching items:", items.len()));
    for item in items {
        lines.push(item.name.clone());
        lines.push(format!("   ID: {}", item.id));
        lines.push(format!(
            "   SKU: {}",
            item.sku.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
        lines.push(format!(
            "   Price: {}",
            item.price.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
        lines.push(format!(
            "   Updated: {}",
            item.updated_at.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// One-line summary of a sync run.
pub fn format_sync_run(run: &SyncRun) -> String {
    let mut line = format!(
        "{} at {}: {} items, {} created, {} updated ({:.2}s)",
        run.status,
        format_time(&run.timestamp),
        run.total_items,
        run.created_count,
        run.updated_count,
        run.duration_secs
    );
    if let Some(error) = &run.error {
        line.push_str(&format!(" - {error}"));
    }
    line
}

/// Render cache statistics.
pub fn format_status(status: &CacheStatus) -> String {
    let mut lines = Vec::new();
    section(&mut lines, "Cache Status".to_string());
    lines.push(format!("Items cached: {}", status.items_cached));
    lines.push(format!("Changes tracked: {}", status.changes_tracked));
    lines.push(format!("Sync operations: {}", status.sync_operations));
    match &status.last_sync {
        Some(run) => lines.push(format!("Last sync: {}", format_sync_run(run))),
        None => lines.push(format!("Last sync: {}", colors::context("never"))),
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
