// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use catmirror_core::{Database, Query};

use crate::cli::OutputFormat;
use crate::display::format_status;
use crate::error::Result;

use super::{open_db, to_json};

pub fn run(state_dir: &Path, format: OutputFormat) -> Result<()> {
    let db = open_db(state_dir)?;
    println!("{}", run_impl(&db, format)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database, format: OutputFormat) -> Result<String> {
    let status = Query::new(db).status()?;
    match format {
        OutputFormat::Json => to_json(&status),
        OutputFormat::Table => Ok(format_status(&status)),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
