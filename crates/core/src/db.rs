// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for the catalog mirror.
//!
//! The [`Database`] struct owns three independently queryable stores:
//! `cached_records` (one row per upstream id), `change_log` (append-only
//! snapshots) and `sync_log` (append-only run summaries).

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::clock::format_timestamp;
use crate::error::{Error, Result};
use crate::record::{CachedRecord, ChangeSnapshot, SyncRun};
use crate::search::SearchQuery;

/// SQL schema for the catalog mirror database.
pub const SCHEMA: &str = r#"
-- Latest known state per upstream id
CREATE TABLE IF NOT EXISTS cached_records (
    id TEXT PRIMARY KEY,
    version INTEGER,
    content_hash TEXT NOT NULL,
    cached_at TEXT NOT NULL,
    payload TEXT NOT NULL
);

-- Change snapshots (audit trail), append-only
CREATE TABLE IF NOT EXISTS change_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_id TEXT NOT NULL,
    item_name TEXT NOT NULL,
    change_type TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    before_data TEXT,
    after_data TEXT,
    differences TEXT,
    version_before INTEGER,
    version_after INTEGER
);

-- One row per sync invocation, append-only
CREATE TABLE IF NOT EXISTS sync_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    total_items INTEGER NOT NULL DEFAULT 0,
    created_count INTEGER NOT NULL DEFAULT 0,
    updated_count INTEGER NOT NULL DEFAULT 0,
    changes_detected INTEGER NOT NULL DEFAULT 0,
    duration_secs REAL NOT NULL DEFAULT 0,
    error TEXT,
    status TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_cached_records_cached_at ON cached_records(cached_at);
CREATE INDEX IF NOT EXISTS idx_cached_records_hash ON cached_records(content_hash);
CREATE INDEX IF NOT EXISTS idx_change_log_item ON change_log(item_id);
CREATE INDEX IF NOT EXISTS idx_change_log_timestamp ON change_log(timestamp DESC);
CREATE INDEX IF NOT EXISTS idx_change_log_type ON change_log(change_type);
CREATE INDEX IF NOT EXISTS idx_sync_log_timestamp ON sync_log(timestamp DESC);
"#;

const CHANGE_COLUMNS: &str = "id, item_id, item_name, change_type, timestamp, before_data,
     after_data, differences, version_before, version_after";

const SYNC_COLUMNS: &str = "id, timestamp, total_items, created_count, updated_count,
     changes_detected, duration_secs, error, status";

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| conversion_error(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

/// Parse a JSON column, passing NULL through as `None`.
fn parse_json_opt<T: DeserializeOwned>(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<T>, rusqlite::Error> {
    value
        .map(|s| {
            serde_json::from_str(&s)
                .map_err(|e| conversion_error(format!("invalid JSON in column '{column}': {e}")))
        })
        .transpose()
}

fn to_json_opt<T: serde::Serialize>(value: Option<&T>) -> Result<Option<String>> {
    Ok(value.map(serde_json::to_string).transpose()?)
}

fn count_to_db(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn count_from_db(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn record_from_row(row: &Row<'_>) -> std::result::Result<CachedRecord, rusqlite::Error> {
    let cached_str: String = row.get(3)?;
    let payload_str: Option<String> = row.get(4)?;
    Ok(CachedRecord {
        id: row.get(0)?,
        version: row.get(1)?,
        content_hash: row.get(2)?,
        cached_at: parse_timestamp(&cached_str, "cached_at")?,
        payload: parse_json_opt(payload_str, "payload")?.unwrap_or_default(),
    })
}

fn change_from_row(row: &Row<'_>) -> std::result::Result<ChangeSnapshot, rusqlite::Error> {
    let type_str: String = row.get(3)?;
    let ts_str: String = row.get(4)?;
    Ok(ChangeSnapshot {
        id: row.get(0)?,
        item_id: row.get(1)?,
        item_name: row.get(2)?,
        change_type: parse_db(&type_str, "change_type")?,
        timestamp: parse_timestamp(&ts_str, "timestamp")?,
        before_data: parse_json_opt(row.get(5)?, "before_data")?,
        after_data: parse_json_opt(row.get(6)?, "after_data")?,
        differences: parse_json_opt(row.get(7)?, "differences")?,
        version_before: row.get(8)?,
        version_after: row.get(9)?,
    })
}

fn sync_run_from_row(row: &Row<'_>) -> std::result::Result<SyncRun, rusqlite::Error> {
    let ts_str: String = row.get(1)?;
    let status_str: String = row.get(8)?;
    Ok(SyncRun {
        id: row.get(0)?,
        timestamp: parse_timestamp(&ts_str, "timestamp")?,
        total_items: count_from_db(row.get(2)?),
        created_count: count_from_db(row.get(3)?),
        updated_count: count_from_db(row.get(4)?),
        changes_detected: count_from_db(row.get(5)?),
        duration_secs: row.get(6)?,
        error: row.get(7)?,
        status: parse_db(&status_str, "status")?,
    })
}

/// Run schema creation on a database connection.
///
/// This is the single migration path for all crates (core and CLI).
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with catalog mirror operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL lets queries read while a sync writes
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    // ========================================================================
    // Cache store
    // ========================================================================

    /// Get a cached record by id.
    pub fn get_record(&self, id: &str) -> Result<Option<CachedRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, version, content_hash, cached_at, payload
                 FROM cached_records WHERE id = ?1",
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Insert a record, or replace the cached one with the same id wholesale.
    pub fn upsert_record(&self, record: &CachedRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO cached_records (id, version, content_hash, cached_at, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 version = excluded.version,
                 content_hash = excluded.content_hash,
                 cached_at = excluded.cached_at,
                 payload = excluded.payload",
            params![
                record.id,
                record.version,
                record.content_hash,
                format_timestamp(&record.cached_at),
                serde_json::to_string(&record.payload)?,
            ],
        )?;
        Ok(())
    }

    /// Get all cached records, ordered by id.
    pub fn all_records(&self) -> Result<Vec<CachedRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, version, content_hash, cached_at, payload
             FROM cached_records ORDER BY id",
        )?;

        let records = stmt
            .query_map([], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Get every cached id, ordered.
    pub fn all_record_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM cached_records ORDER BY id")?;

        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(ids)
    }

    /// Search cached records by name/SKU pattern and exact-match filters.
    pub fn search_records(&self, query: &SearchQuery) -> Result<Vec<CachedRecord>> {
        let matcher = query.compile()?;
        let mut records = self.all_records()?;
        records.retain(|record| matcher.matches(&record.payload));
        Ok(records)
    }

    /// Number of cached records.
    pub fn count_records(&self) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cached_records", [], |row| row.get(0))?;
        Ok(count_from_db(count))
    }

    // ========================================================================
    // Change log
    // ========================================================================

    /// Append a batch of snapshots in one transaction.
    ///
    /// Either every snapshot is written or none is. Returns the new row ids in
    /// input order.
    pub fn append_changes(&mut self, snapshots: &[ChangeSnapshot]) -> Result<Vec<i64>> {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(snapshots.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO change_log (item_id, item_name, change_type, timestamp,
                 before_data, after_data, differences, version_before, version_after)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for snapshot in snapshots {
                stmt.execute(params![
                    snapshot.item_id,
                    snapshot.item_name,
                    snapshot.change_type.as_str(),
                    format_timestamp(&snapshot.timestamp),
                    to_json_opt(snapshot.before_data.as_ref())?,
                    to_json_opt(snapshot.after_data.as_ref())?,
                    to_json_opt(snapshot.differences.as_ref())?,
                    snapshot.version_before,
                    snapshot.version_after,
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    /// Get snapshots newest first, optionally only those at or after `since`.
    pub fn get_changes(
        &self,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<ChangeSnapshot>> {
        self.query_changes(None, since, limit)
    }

    /// Get all snapshots for one item, newest first.
    pub fn get_item_history(&self, item_id: &str) -> Result<Vec<ChangeSnapshot>> {
        self.query_changes(Some(item_id), None, None)
    }

    fn query_changes(
        &self,
        item_id: Option<&str>,
        since: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<ChangeSnapshot>> {
        let mut sql = format!("SELECT {CHANGE_COLUMNS} FROM change_log");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();

        if let Some(id) = item_id {
            conditions.push("item_id = ?");
            params_vec.push(id.to_string());
        }

        if let Some(ts) = since {
            conditions.push("timestamp >= ?");
            params_vec.push(format_timestamp(&ts));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY timestamp DESC, id DESC");

        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", i64::try_from(n).unwrap_or(i64::MAX)));
        }

        let mut stmt = self.conn.prepare(&sql)?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();

        let changes = stmt
            .query_map(params_refs.as_slice(), change_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(changes)
    }

    /// Number of snapshots in the change log.
    pub fn count_changes(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM change_log", [], |row| row.get(0))?;
        Ok(count_from_db(count))
    }

    // ========================================================================
    // Sync log
    // ========================================================================

    /// Append a sync run summary. Returns its row id.
    pub fn append_sync_run(&self, run: &SyncRun) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sync_log (timestamp, total_items, created_count, updated_count,
             changes_detected, duration_secs, error, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                format_timestamp(&run.timestamp),
                count_to_db(run.total_items),
                count_to_db(run.created_count),
                count_to_db(run.updated_count),
                count_to_db(run.changes_detected),
                run.duration_secs,
                run.error,
                run.status.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get sync runs newest first.
    pub fn get_sync_runs(&self, limit: usize) -> Result<Vec<SyncRun>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SYNC_COLUMNS} FROM sync_log ORDER BY timestamp DESC, id DESC LIMIT ?1"
        ))?;

        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let runs = stmt
            .query_map(params![limit_i64], sync_run_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(runs)
    }

    /// Get the most recent sync run, if any.
    pub fn last_sync_run(&self) -> Result<Option<SyncRun>> {
        Ok(self.get_sync_runs(1)?.into_iter().next())
    }

    /// Number of entries in the sync log.
    pub fn count_sync_runs(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sync_log", [], |row| row.get(0))?;
        Ok(count_from_db(count))
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
