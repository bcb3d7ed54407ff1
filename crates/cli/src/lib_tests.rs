// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! Tests for the public `run()` function.
//!
//! Sync needs an upstream and is covered by the command tests and the
//! integration tests; here the read-only commands run against a scratch
//! state directory.

use crate::{run, Cli, Command, Error, OutputArgs, OutputFormat, SinceArgs};
use tempfile::TempDir;

fn cli(dir: &TempDir, command: Command) -> Cli {
    Cli {
        token: None,
        state_dir: Some(dir.path().to_path_buf()),
        command,
    }
}

#[test]
fn status_creates_database_in_state_dir() {
    let dir = TempDir::new().unwrap();
    run(cli(
        &dir,
        Command::Status {
            output: OutputArgs::default(),
        },
    ))
    .unwrap();

    assert!(dir.path().join("catalog.db").exists());
}

#[test]
fn changes_and_report_on_empty_cache() {
    let dir = TempDir::new().unwrap();
    run(cli(
        &dir,
        Command::Changes {
            since: SinceArgs::default(),
            limit: None,
            output: OutputArgs {
                output: OutputFormat::Json,
            },
        },
    ))
    .unwrap();
    run(cli(
        &dir,
        Command::Report {
            since: SinceArgs::default(),
            output: OutputArgs::default(),
        },
    ))
    .unwrap();
}

#[test]
fn configured_database_path_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "database = \"data/mirror.db\"\n").unwrap();

    run(cli(
        &dir,
        Command::Status {
            output: OutputArgs::default(),
        },
    ))
    .unwrap();

    assert!(dir.path().join("data").join("mirror.db").exists());
}

#[test]
fn item_not_in_cache_is_error() {
    let dir = TempDir::new().unwrap();
    let err = run(cli(
        &dir,
        Command::Item {
            item_id: "missing".to_string(),
            history: false,
        },
    ))
    .unwrap_err();

    assert!(matches!(err, Error::ItemNotFound(_)));
}

#[test]
fn malformed_config_is_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "database = 3\n").unwrap();

    let err = run(cli(
        &dir,
        Command::Status {
            output: OutputArgs::default(),
        },
    ))
    .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
}
