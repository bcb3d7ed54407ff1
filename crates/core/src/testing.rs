// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures: scripted fetchers and catalog payload builders.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::fetch::{FetchError, Fetcher, Page};

/// A fetcher that replays scripted pages and records the cursors it was given.
pub struct ScriptedFetcher {
    pages: RefCell<VecDeque<std::result::Result<Page, FetchError>>>,
    pub cursors: RefCell<Vec<Option<String>>>,
}

impl ScriptedFetcher {
    pub fn new(pages: Vec<std::result::Result<Page, FetchError>>) -> Self {
        ScriptedFetcher {
            pages: RefCell::new(pages.into()),
            cursors: RefCell::new(Vec::new()),
        }
    }

    /// A fetcher serving `records` as a single final page.
    pub fn single(records: Vec<Value>) -> Self {
        Self::new(vec![Ok(page(records, None))])
    }
}

impl Fetcher for ScriptedFetcher {
    fn list(&self, _types: &str, cursor: Option<&str>) -> std::result::Result<Page, FetchError> {
        self.cursors.borrow_mut().push(cursor.map(str::to_string));
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no more scripted pages".into())))
    }
}

pub fn page(records: Vec<Value>, cursor: Option<&str>) -> Page {
    Page {
        records,
        cursor: cursor.map(str::to_string),
    }
}

/// A Square-shaped catalog item.
pub fn item(id: &str, version: i64, name: &str) -> Value {
    json!({
        "type": "ITEM",
        "id": id,
        "version": version,
        "updated_at": format!("2026-01-{:02}T00:00:00Z", version.clamp(1, 28)),
        "item_data": { "name": name }
    })
}

/// A catalog item with one variation carrying a SKU.
pub fn item_with_sku(id: &str, version: i64, name: &str, sku: &str) -> Value {
    let mut value = item(id, version, name);
    value["item_data"]["variations"] = json!([
        {
            "type": "ITEM_VARIATION",
            "id": format!("{id}-V1"),
            "item_variation_data": {
                "sku": sku,
                "price_money": { "amount": 1250, "currency": "USD" }
            }
        }
    ]);
    value
}
