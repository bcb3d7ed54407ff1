// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Square catalog REST client.

use catmirror_core::{FetchError, Fetcher, Page};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::SquareConfig;
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://connect.squareup.com";
pub const DEFAULT_API_VERSION: &str = "2026-01-22";

const LIST_PATH: &str = "/v2/catalog/list";
const VERSION_HEADER: &str = "Square-Version";

/// Blocking client for `GET /v2/catalog/list`, pinned to one API version.
#[derive(Debug)]
pub struct SquareClient {
    client: Client,
    base_url: String,
    api_version: String,
    token: String,
}

impl SquareClient {
    pub fn new(config: &SquareConfig, token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("catmirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(SquareClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token,
        })
    }
}

impl Fetcher for SquareClient {
    fn list(&self, types: &str, cursor: Option<&str>) -> std::result::Result<Page, FetchError> {
        let mut query = vec![("types", types)];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        tracing::debug!(types, cursor = cursor.unwrap_or(""), "listing catalog page");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, LIST_PATH))
            .query(&query)
            .bearer_auth(&self.token)
            .header(VERSION_HEADER, &self.api_version)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if let Some(returned) = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if returned != self.api_version {
                return Err(FetchError::VersionMismatch {
                    expected: self.api_version.clone(),
                    actual: returned.to_string(),
                });
            }
        }

        let body: Value = response
            .json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(Page {
            records: body
                .get("objects")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            cursor: body
                .get("cursor")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
#[path = "square_tests.rs"]
mod tests;
