// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use catmirror_core::FetchError;
use thiserror::Error;

/// All possible errors that can occur in the catmirror CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("item not found: {0}\n  hint: run 'catmirror sync' to refresh the cache")]
    ItemNotFound(String),

    #[error("no access token found\n  hint: pass --token, set SQUARE_ACCESS_TOKEN, or add it to the env file")]
    TokenNotFound,

    #[error("another sync is already running\n  hint: lock held on {0}")]
    SyncInProgress(String),

    #[error("invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid field path: '{0}'\n  hint: use dot-separated keys, e.g. item_data.name")]
    InvalidFieldPath(String),

    #[error("fetch failed: {0}")]
    Fetch(FetchError),

    #[error("invalid upstream data: {0}")]
    Upstream(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data in database: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for catmirror CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<catmirror_core::Error> for Error {
    fn from(e: catmirror_core::Error) -> Self {
        use catmirror_core::Error as Core;
        match e {
            Core::MissingId => Error::Upstream(Core::MissingId.to_string()),
            Core::InvalidChangeType(s) => {
                Error::CorruptedData(format!("invalid change type: {s}"))
            }
            Core::InvalidSyncStatus(s) => {
                Error::CorruptedData(format!("invalid sync status: {s}"))
            }
            Core::InvalidFieldPath(s) => Error::InvalidFieldPath(s),
            Core::InvalidPattern { pattern, reason } => Error::InvalidPattern { pattern, reason },
            Core::SyncInProgress(path) => Error::SyncInProgress(path),
            Core::Fetch(e) => Error::Fetch(e),
            Core::Database(e) => Error::Database(e),
            Core::Io(e) => Error::Io(e),
            Core::Json(e) => Error::Json(e),
            Core::CorruptedData(s) => Error::CorruptedData(s),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
