// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted record types: the cached catalog object, change snapshots for
//! the audit trail, and per-run sync summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::hash::content_hash;
use crate::payload::UpstreamRecord;

/// The latest known state of one upstream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRecord {
    /// Upstream identifier; unique in the cache.
    pub id: String,
    /// Upstream revision counter at the time of caching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// Digest of the payload without volatile fields.
    pub content_hash: String,
    /// When this record was last written by a sync.
    pub cached_at: DateTime<Utc>,
    /// The upstream object verbatim.
    pub payload: Value,
}

impl CachedRecord {
    /// Builds the cache entry for an upstream record, hashing its payload.
    pub fn from_upstream(record: &UpstreamRecord, cached_at: DateTime<Utc>) -> Self {
        CachedRecord {
            id: record.id.clone(),
            version: record.version,
            content_hash: content_hash(&record.payload),
            cached_at,
            payload: record.payload.clone(),
        }
    }
}

/// Kind of change recorded in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// First sighting of an id.
    Create,
    /// Content hash differs from the cached record.
    Update,
    /// Reserved; no sync path produces it.
    Delete,
}

impl ChangeType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Create => "create",
            ChangeType::Update => "update",
            ChangeType::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(ChangeType::Create),
            "update" => Ok(ChangeType::Update),
            "delete" => Ok(ChangeType::Delete),
            _ => Err(Error::InvalidChangeType(s.to_string())),
        }
    }
}

/// Before and after values of one field path. `None` means absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub before: Option<Value>,
    pub after: Option<Value>,
}

/// Field-path keyed differences, ordered by path.
pub type Differences = BTreeMap<String, FieldDiff>;

/// An immutable before/after record of one change, written to the change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSnapshot {
    /// Change log row id, set once persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub item_id: String,
    pub item_name: String,
    pub change_type: ChangeType,
    pub timestamp: DateTime<Utc>,
    pub before_data: Option<Value>,
    pub after_data: Option<Value>,
    pub differences: Option<Differences>,
    pub version_before: Option<i64>,
    pub version_after: Option<i64>,
}

impl ChangeSnapshot {
    /// Changed field paths, in path order. Empty for creates.
    pub fn changed_fields(&self) -> Vec<String> {
        self.differences
            .as_ref()
            .map(|d| d.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Human-readable version transition, e.g. `3 → 4` or `New → 1`.
    pub fn version_change(&self) -> String {
        let after = format_version(self.version_after);
        match self.version_before {
            Some(before) => format!("{before} → {after}"),
            None => format!("New → {after}"),
        }
    }
}

fn format_version(version: Option<i64>) -> String {
    version.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    Failed,
}

impl SyncStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "success" => Ok(SyncStatus::Success),
            "failed" => Ok(SyncStatus::Failed),
            _ => Err(Error::InvalidSyncStatus(s.to_string())),
        }
    }
}

/// Summary of one sync invocation, written to the sync log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRun {
    /// Sync log row id, set once persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// When the run started.
    pub timestamp: DateTime<Utc>,
    pub total_items: u64,
    pub created_count: u64,
    pub updated_count: u64,
    pub changes_detected: u64,
    pub duration_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: SyncStatus,
}

impl SyncRun {
    /// Returns true if the run completed.
    pub fn is_success(&self) -> bool {
        self.status == SyncStatus::Success
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
