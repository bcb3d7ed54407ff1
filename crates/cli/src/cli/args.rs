// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs and value parsers for CLI commands.

use catmirror_core::FieldPath;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use serde_json::Value;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Output format selection.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Lower time bound for change queries.
#[derive(Args, Clone, Debug, Default)]
pub struct SinceArgs {
    /// Only changes at or after this time (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_since)]
    pub since: Option<DateTime<Utc>>,
}

/// An exact-match filter on a payload field, written `path=value`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    pub path: FieldPath,
    pub value: Value,
}

/// Parse `--since`: a bare date means midnight UTC.
pub fn parse_since(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("invalid date '{s}'"));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"))
}

/// Parse `--filter path=value`. The value is read as JSON when it parses,
/// otherwise taken as a plain string.
pub fn parse_filter(s: &str) -> Result<FieldFilter, String> {
    let (path, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{s}': expected path=value"))?;
    let path = FieldPath::parse(path.trim()).map_err(|e| e.to_string())?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok(FieldFilter { path, value })
}
