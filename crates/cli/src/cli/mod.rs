// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use crate::help;
use clap::{Parser, Subcommand};

pub use args::{parse_filter, parse_since, FieldFilter, OutputArgs, OutputFormat, SinceArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "catmirror")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local mirror of a Square product catalog with change tracking")]
#[command(
    long_about = "Local mirror of a Square product catalog with change tracking.\n\n\
    Each sync fetches the full catalog, records every create and update as an\n\
    immutable snapshot, and keeps the latest state of each item for querying."
)]
#[command(styles = help::styles())]
pub struct Cli {
    /// Square access token (falls back to SQUARE_ACCESS_TOKEN, SQUARE_TOKEN, then the env file)
    #[arg(long, global = true, value_parser = non_empty_string)]
    pub token: Option<String>,

    /// State directory holding config.toml and the database
    #[arg(long, global = true, value_name = "path")]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the full catalog and record changes
    Sync,

    /// List recorded changes, newest first
    #[command(after_help = "\
Examples:
  catmirror changes                       Last 20 changes
  catmirror changes --since 2026-03-01    Changes since a date
  catmirror changes -n 5 -o json          Five newest as JSON")]
    Changes {
        #[command(flatten)]
        since: SinceArgs,

        /// Maximum number of changes (default 20 for table output)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Summarize changes by type
    Report {
        #[command(flatten)]
        since: SinceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one cached item as JSON
    Item {
        /// Upstream item id
        #[arg(long, value_parser = non_empty_string)]
        item_id: String,

        /// Include the item's change history
        #[arg(long)]
        history: bool,
    },

    /// Search cached items
    #[command(after_help = "\
Examples:
  catmirror search --name mug                  Name contains 'mug'
  catmirror search --sku '^ABC-'               SKU starts with ABC-
  catmirror search --filter item_data.is_archived=false")]
    Search {
        /// Regular expression matched against the item name (case-insensitive)
        #[arg(long)]
        name: Option<String>,

        /// Regular expression matched against the first variation's SKU (case-insensitive)
        #[arg(long)]
        sku: Option<String>,

        /// Exact-match filter, path=value (repeatable)
        #[arg(long, short = 'q', value_parser = parse_filter)]
        filter: Vec<FieldFilter>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show cache statistics and the last sync
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
