// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! catmirror - keep a local mirror of a Square product catalog.
//!
//! This crate provides the `catmirror` CLI on top of [`catmirror_core`]:
//! the Square REST fetcher, configuration and token resolution, and the
//! command implementations.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - argument parsing
//! - [`Config`] - optional `config.toml` in the state directory
//! - [`SquareClient`] - blocking `Fetcher` for the Square catalog API
//! - [`Error`] - error types for all operations

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;
mod help;

pub mod config;
pub mod error;
pub mod square;

pub use cli::{Cli, Command, FieldFilter, OutputArgs, OutputFormat, SinceArgs};
pub use config::{resolve_state_dir, resolve_token, Config, SquareConfig};
pub use error::{Error, Result};
pub use square::SquareClient;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let state_dir = resolve_state_dir(cli.state_dir.as_deref());
    tracing::debug!(state_dir = %state_dir.display(), "resolved state directory");

    match cli.command {
        Command::Sync => commands::sync::run(&state_dir, cli.token.as_deref()),
        Command::Changes {
            since,
            limit,
            output,
        } => commands::changes::run(&state_dir, since.since, limit, output.output),
        Command::Report { since, output } => {
            commands::report::run(&state_dir, since.since, output.output)
        }
        Command::Item { item_id, history } => commands::item::run(&state_dir, &item_id, history),
        Command::Search {
            name,
            sku,
            filter,
            output,
        } => commands::search::run(&state_dir, name, sku, filter, output.output),
        Command::Status { output } => commands::status::run(&state_dir, output.output),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
