// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use catmirror_core::{Database, Query};
use chrono::{DateTime, Utc};

use crate::cli::OutputFormat;
use crate::display::format_report;
use crate::error::Result;

use super::{open_db, to_json};

pub fn run(state_dir: &Path, since: Option<DateTime<Utc>>, format: OutputFormat) -> Result<()> {
    let db = open_db(state_dir)?;
    println!("{}", run_impl(&db, since, format)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    since: Option<DateTime<Utc>>,
    format: OutputFormat,
) -> Result<String> {
    let report = Query::new(db).generate_report(since)?;
    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(format_report(&report)),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
