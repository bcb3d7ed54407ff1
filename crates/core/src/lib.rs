// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! catmirror-core: local mirror of an upstream product catalog
//!
//! This crate provides content hashing, the SQLite-backed cache and audit
//! logs, change detection, the sync orchestrator and the query layer used by
//! the catmirror CLI.

pub mod clock;
pub mod db;
pub mod detect;
pub mod error;
pub mod fetch;
pub mod hash;
pub mod lock;
pub mod payload;
pub mod query;
pub mod record;
pub mod search;
pub mod sync;

#[cfg(test)]
mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use db::Database;
pub use detect::{ChangeDetector, DEFAULT_DIFF_FIELDS};
pub use error::{Error, Result};
pub use fetch::{fetch_all, FetchError, Fetcher, Page};
pub use hash::content_hash;
pub use lock::{SyncLock, LOCK_FILE};
pub use payload::{FieldPath, UpstreamRecord};
pub use query::{CacheStatus, ItemSummary, Query, Report, ReportEntry, ReportSummary};
pub use record::{CachedRecord, ChangeSnapshot, ChangeType, FieldDiff, SyncRun, SyncStatus};
pub use search::SearchQuery;
pub use sync::{Syncer, DEFAULT_TYPES};
