// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for catmirror-core operations.

use thiserror::Error;

use crate::fetch::FetchError;

/// All possible errors that can occur in catmirror-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream record has no string 'id' field\n  hint: every catalog object must carry a top-level id")]
    MissingId,

    #[error("invalid change type: '{0}'\n  hint: valid types are: create, update, delete")]
    InvalidChangeType(String),

    #[error("invalid sync status: '{0}'\n  hint: valid statuses are: success, failed")]
    InvalidSyncStatus(String),

    #[error("invalid field path: '{0}'\n  hint: use dot-separated keys, e.g. item_data.name")]
    InvalidFieldPath(String),

    #[error("invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("another sync is already running\n  hint: lock held on {0}")]
    SyncInProgress(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for catmirror-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
