// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod changes;
pub mod item;
pub mod report;
pub mod search;
pub mod status;
pub mod sync;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::Path;

use catmirror_core::Database;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;

/// Helper to open the database configured for a state directory.
pub fn open_db(state_dir: &Path) -> Result<Database> {
    let config = Config::load(state_dir)?;
    let db_path = config.db_path(state_dir);
    tracing::debug!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path)?;
    Ok(db)
}

/// Pretty-printed JSON for `--output json`.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
