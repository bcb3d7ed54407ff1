// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync orchestrator: fetch, detect, upsert, log.

use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::clock::{Clock, SystemClock};
use crate::db::Database;
use crate::detect::ChangeDetector;
use crate::error::{Error, Result};
use crate::fetch::{fetch_all, Fetcher};
use crate::lock::SyncLock;
use crate::record::{CachedRecord, ChangeType, SyncRun, SyncStatus};

/// Upstream object type synced by default.
pub const DEFAULT_TYPES: &str = "ITEM";

/// Counters accumulated during a run, kept so a failed run can report them.
#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    total_items: u64,
    created_count: u64,
    updated_count: u64,
    changes_detected: u64,
}

impl Progress {
    fn into_run(
        self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: SyncStatus,
        error: Option<String>,
    ) -> SyncRun {
        let micros = (end - start).num_microseconds().unwrap_or(0).max(0);
        SyncRun {
            id: None,
            timestamp: start,
            total_items: self.total_items,
            created_count: self.created_count,
            updated_count: self.updated_count,
            changes_detected: self.changes_detected,
            duration_secs: micros as f64 / 1_000_000.0,
            error,
            status,
        }
    }
}

/// Runs one full sync of the upstream catalog into the local cache.
pub struct Syncer<'a, F: Fetcher, C: Clock = SystemClock> {
    db: &'a mut Database,
    fetcher: F,
    clock: C,
    detector: ChangeDetector,
    types: String,
    lock_path: Option<PathBuf>,
}

impl<'a, F: Fetcher> Syncer<'a, F, SystemClock> {
    /// Create a syncer using the system clock and the default detector.
    pub fn new(db: &'a mut Database, fetcher: F) -> Self {
        Syncer::with_clock(db, fetcher, SystemClock)
    }
}

impl<'a, F: Fetcher, C: Clock> Syncer<'a, F, C> {
    /// Create a syncer with an explicit clock.
    pub fn with_clock(db: &'a mut Database, fetcher: F, clock: C) -> Self {
        Syncer {
            db,
            fetcher,
            clock,
            detector: ChangeDetector::default(),
            types: DEFAULT_TYPES.to_string(),
            lock_path: None,
        }
    }

    pub fn detector(mut self, detector: ChangeDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Upstream object types to request, comma-separated.
    pub fn types(mut self, types: impl Into<String>) -> Self {
        self.types = types.into();
        self
    }

    /// Hold an exclusive lock on this file for the duration of each run.
    pub fn lock_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lock_path = Some(path.into());
        self
    }

    /// Run one sync and return its persisted summary.
    ///
    /// On failure a failed [`SyncRun`] is appended before the original error
    /// is returned. Cache writes already applied are kept.
    ///
    /// Lock contention is the one failure that is not logged: another run
    /// owns the sync log at that point.
    pub fn run_sync(&mut self) -> Result<SyncRun> {
        let start = self.clock.now();
        let mut progress = Progress::default();

        let _lock = match self.lock_path.as_deref().map(SyncLock::acquire).transpose() {
            Ok(lock) => lock,
            Err(e @ Error::SyncInProgress(_)) => return Err(e),
            Err(e) => return Err(self.record_failure(start, progress, e)),
        };
        tracing::info!(types = %self.types, "sync started");

        match self.sync_records(start, &mut progress) {
            Ok(run) => {
                tracing::info!(
                    total = run.total_items,
                    created = run.created_count,
                    updated = run.updated_count,
                    duration_secs = run.duration_secs,
                    "sync completed"
                );
                Ok(run)
            }
            Err(e) => Err(self.record_failure(start, progress, e)),
        }
    }

    /// Appends a failed run for `error` and hands the error back.
    fn record_failure(&mut self, start: DateTime<Utc>, progress: Progress, error: Error) -> Error {
        tracing::warn!(error = %error, "sync failed");
        let failed = progress.into_run(
            start,
            self.clock.now(),
            SyncStatus::Failed,
            Some(error.to_string()),
        );
        if let Err(log_err) = self.db.append_sync_run(&failed) {
            tracing::error!(error = %log_err, "failed to record failed sync run");
        }
        error
    }

    fn sync_records(&mut self, start: DateTime<Utc>, progress: &mut Progress) -> Result<SyncRun> {
        let records = fetch_all(&self.fetcher, &self.types)?;
        progress.total_items = records.len() as u64;

        // State of each id as it was before this run touched it
        let mut pre_sync: HashMap<String, Option<CachedRecord>> = HashMap::new();
        let mut snapshots = Vec::new();

        for record in &records {
            let cached = match pre_sync.entry(record.id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.db.get_record(&record.id)?),
            };

            let now = self.clock.now();
            if let Some(snapshot) = self.detector.detect(record, cached.as_ref(), now) {
                match snapshot.change_type {
                    ChangeType::Create => progress.created_count += 1,
                    ChangeType::Update => progress.updated_count += 1,
                    ChangeType::Delete => {}
                }
                progress.changes_detected += 1;
                tracing::debug!(
                    id = %snapshot.item_id,
                    change = %snapshot.change_type,
                    "change detected"
                );
                snapshots.push(snapshot);
            }

            self.db
                .upsert_record(&CachedRecord::from_upstream(record, now))?;
        }

        self.db.append_changes(&snapshots)?;

        let mut run = progress.into_run(start, self.clock.now(), SyncStatus::Success, None);
        run.id = Some(self.db.append_sync_run(&run)?);
        Ok(run)
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
