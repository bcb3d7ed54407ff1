// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fetcher abstraction for the upstream catalog.
//!
//! A [`Fetcher`] returns one page of raw upstream objects plus an optional
//! cursor for the next page. [`fetch_all`] follows cursors until the upstream
//! stops returning one. Pages are requested strictly in sequence because each
//! request depends on the previous cursor.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::payload::UpstreamRecord;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered with an API version other than the one requested.
    #[error("api version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Upstream handed back the cursor it was just given.
    #[error("pagination cursor repeated: {0}")]
    CursorLoop(String),
}

/// One page of upstream objects.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Page {
    /// Raw catalog objects, possibly none.
    #[serde(default, rename = "objects")]
    pub records: Vec<Value>,
    /// Cursor for the next page; absent or empty on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl Page {
    /// Returns the cursor for the next page, treating an empty string as none.
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Source of upstream catalog pages.
pub trait Fetcher {
    /// Lists one page of objects of the given types, continuing from `cursor`.
    fn list(&self, types: &str, cursor: Option<&str>) -> std::result::Result<Page, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn list(&self, types: &str, cursor: Option<&str>) -> std::result::Result<Page, FetchError> {
        (**self).list(types, cursor)
    }
}

/// Fetches every page and returns all records in upstream order.
pub fn fetch_all(fetcher: &dyn Fetcher, types: &str) -> Result<Vec<UpstreamRecord>> {
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetcher.list(types, cursor.as_deref())?;
        pages += 1;
        tracing::debug!(page = pages, objects = page.records.len(), "fetched page");

        let next = page.next_cursor().map(str::to_string);
        for payload in page.records {
            records.push(UpstreamRecord::from_payload(payload)?);
        }

        match next {
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                return Err(FetchError::CursorLoop(next).into());
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::info!(pages, records = records.len(), "fetched upstream catalog");
    Ok(records)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
