// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only views over the cache, change log and sync log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::db::Database;
use crate::error::Result;
use crate::payload::{first_variation_price, first_variation_sku, item_name, UNKNOWN_NAME};
use crate::record::{CachedRecord, ChangeSnapshot, ChangeType, SyncRun};
use crate::search::SearchQuery;

/// Counts of changes by type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
}

/// One change as shown in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub item_id: String,
    pub item_name: String,
    pub change_type: ChangeType,
    pub timestamp: DateTime<Utc>,
    /// e.g. `3 → 4`, or `New → 1` for a first sighting.
    pub version_change: String,
    /// Changed field paths; empty for creates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_changes: Vec<String>,
}

impl From<&ChangeSnapshot> for ReportEntry {
    fn from(change: &ChangeSnapshot) -> Self {
        ReportEntry {
            item_id: change.item_id.clone(),
            item_name: change.item_name.clone(),
            change_type: change.change_type,
            timestamp: change.timestamp,
            version_change: change.version_change(),
            key_changes: change.changed_fields(),
        }
    }
}

/// Summary of changes over a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub report_generated: DateTime<Utc>,
    pub since: Option<DateTime<Utc>>,
    pub total_changes: u64,
    pub summary: ReportSummary,
    /// Newest first.
    pub changes: Vec<ReportEntry>,
}

/// Overall cache statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub items_cached: u64,
    pub changes_tracked: u64,
    pub sync_operations: u64,
    pub last_sync: Option<SyncRun>,
}

/// Display-oriented summary of a cached item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    /// SKU of the first variation.
    pub sku: Option<String>,
    /// Price of the first variation, e.g. `$12.50 USD`.
    pub price: Option<String>,
    pub updated_at: Option<String>,
}

impl ItemSummary {
    pub fn from_record(record: &CachedRecord) -> Self {
        let payload = &record.payload;
        ItemSummary {
            id: record.id.clone(),
            name: item_name(payload).unwrap_or(UNKNOWN_NAME).to_string(),
            sku: first_variation_sku(payload).map(str::to_string),
            price: first_variation_price(payload)
                .map(|(amount, currency)| format_price(amount, &currency)),
            updated_at: payload
                .get("updated_at")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Formats an amount in the currency's smallest unit, e.g. `1250` as `$12.50 USD`.
pub fn format_price(amount: i64, currency: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}${}.{:02} {currency}", abs / 100, abs % 100)
}

/// Query layer over a [`Database`].
pub struct Query<'a, C: Clock = SystemClock> {
    db: &'a Database,
    clock: C,
}

impl<'a> Query<'a, SystemClock> {
    pub fn new(db: &'a Database) -> Self {
        Query::with_clock(db, SystemClock)
    }
}

impl<'a, C: Clock> Query<'a, C> {
    pub fn with_clock(db: &'a Database, clock: C) -> Self {
        Query { db, clock }
    }

    /// Changes at or after `since`, newest first, at most `limit`.
    pub fn get_changes(
        &self,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<ChangeSnapshot>> {
        self.db.get_changes(since, limit)
    }

    /// Full change history for one item, newest first.
    pub fn get_item_history(&self, item_id: &str) -> Result<Vec<ChangeSnapshot>> {
        self.db.get_item_history(item_id)
    }

    pub fn get_item(&self, id: &str) -> Result<Option<CachedRecord>> {
        self.db.get_record(id)
    }

    pub fn search(&self, query: &SearchQuery) -> Result<Vec<CachedRecord>> {
        self.db.search_records(query)
    }

    /// Build a change report over everything at or after `since`.
    pub fn generate_report(&self, since: Option<DateTime<Utc>>) -> Result<Report> {
        let changes = self.db.get_changes(since, None)?;

        let mut summary = ReportSummary::default();
        for change in &changes {
            match change.change_type {
                ChangeType::Create => summary.created += 1,
                ChangeType::Update => summary.updated += 1,
                ChangeType::Delete => summary.deleted += 1,
            }
        }

        Ok(Report {
            report_generated: self.clock.now(),
            since,
            total_changes: changes.len() as u64,
            summary,
            changes: changes.iter().map(ReportEntry::from).collect(),
        })
    }

    pub fn status(&self) -> Result<CacheStatus> {
        Ok(CacheStatus {
            items_cached: self.db.count_records()?,
            changes_tracked: self.db.count_changes()?,
            sync_operations: self.db.count_sync_runs()?,
            last_sync: self.db.last_sync_run()?,
        })
    }

    pub fn item_summary(&self, record: &CachedRecord) -> ItemSummary {
        ItemSummary::from_record(record)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
