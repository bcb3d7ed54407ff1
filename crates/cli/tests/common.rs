// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The catmirror binary with a clean environment.
pub fn catmirror() -> Command {
    let mut cmd = cargo_bin_cmd!("catmirror");
    cmd.env_remove("CATMIRROR_DIR")
        .env_remove("SQUARE_ACCESS_TOKEN")
        .env_remove("SQUARE_TOKEN")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// The catmirror binary pointed at a state directory.
pub fn catmirror_in(temp: &TempDir) -> Command {
    let mut cmd = catmirror();
    cmd.arg("--state-dir").arg(temp.path());
    cmd
}

/// Write `config.toml` into the state directory.
pub fn write_config(temp: &TempDir, content: &str) {
    std::fs::write(temp.path().join("config.toml"), content).unwrap();
}

/// Config pointing the fetcher at a mock server, with a missing env file so
/// a developer's real token is never picked up.
pub fn mock_config(temp: &TempDir, base_url: &str) {
    let env_file = temp.path().join("missing.env");
    write_config(
        temp,
        &format!(
            "env_file = \"{}\"\n\n[square]\nbase_url = \"{}\"\ntimeout_secs = 5\n",
            env_file.display(),
            base_url
        ),
    );
}
