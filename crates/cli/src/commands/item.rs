// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use catmirror_core::{CachedRecord, ChangeSnapshot, Database, Query};
use serde::Serialize;

use crate::error::{Error, Result};

use super::{open_db, to_json};

#[derive(Serialize)]
struct ItemWithHistory<'a> {
    item: &'a CachedRecord,
    history: Vec<ChangeSnapshot>,
}

pub fn run(state_dir: &Path, item_id: &str, history: bool) -> Result<()> {
    let db = open_db(state_dir)?;
    println!("{}", run_impl(&db, item_id, history)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database, item_id: &str, history: bool) -> Result<String> {
    let query = Query::new(db);
    let record = query
        .get_item(item_id)?
        .ok_or_else(|| Error::ItemNotFound(item_id.to_string()))?;

    if history {
        to_json(&ItemWithHistory {
            item: &record,
            history: query.get_item_history(item_id)?,
        })
    } else {
        to_json(&record)
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
