// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use catmirror_core::{Database, ItemSummary, Query, SearchQuery};

use crate::cli::{FieldFilter, OutputFormat};
use crate::display::format_items;
use crate::error::Result;

use super::{open_db, to_json};

pub fn run(
    state_dir: &Path,
    name: Option<String>,
    sku: Option<String>,
    filters: Vec<FieldFilter>,
    format: OutputFormat,
) -> Result<()> {
    let db = open_db(state_dir)?;
    println!("{}", run_impl(&db, name, sku, filters, format)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    name: Option<String>,
    sku: Option<String>,
    filters: Vec<FieldFilter>,
    format: OutputFormat,
) -> Result<String> {
    let search = SearchQuery {
        name_pattern: name,
        sku_pattern: sku,
        filters: filters.into_iter().map(|f| (f.path, f.value)).collect(),
    };

    let query = Query::new(db);
    let records = query.search(&search)?;

    match format {
        OutputFormat::Json => {
            let payloads: Vec<&serde_json::Value> = records.iter().map(|r| &r.payload).collect();
            to_json(&payloads)
        }
        OutputFormat::Table => {
            let items: Vec<ItemSummary> = records.iter().map(|r| query.item_summary(r)).collect();
            Ok(format_items(&items))
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
