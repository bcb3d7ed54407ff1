// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use catmirror_core::{Database, Query};
use chrono::{DateTime, Utc};

use crate::cli::OutputFormat;
use crate::display::format_changes;
use crate::error::Result;

use super::{open_db, to_json};

/// Default limit for changes in table output.
const DEFAULT_LIMIT: usize = 20;

pub fn run(
    state_dir: &Path,
    since: Option<DateTime<Utc>>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let db = open_db(state_dir)?;
    println!("{}", run_impl(&db, since, limit, format)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    since: Option<DateTime<Utc>>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<String> {
    let query = Query::new(db);
    match format {
        OutputFormat::Json => to_json(&query.get_changes(since, limit)?),
        OutputFormat::Table => {
            let changes = query.get_changes(since, Some(limit.unwrap_or(DEFAULT_LIMIT)))?;
            Ok(format_changes(&changes))
        }
    }
}

#[cfg(test)]
#[path = "changes_tests.rs"]
mod tests;
