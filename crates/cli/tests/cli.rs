// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn help_lists_commands() {
    catmirror()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("changes"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn unknown_command_fails() {
    catmirror().arg("frobnicate").assert().failure();
}

#[test]
fn status_on_fresh_state_dir() {
    let temp = TempDir::new().unwrap();

    catmirror_in(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Items cached: 0"))
        .stdout(predicate::str::contains("Last sync: never"));

    assert!(temp.path().join("catalog.db").exists());
}

#[test]
fn state_dir_from_environment() {
    let temp = TempDir::new().unwrap();

    catmirror()
        .env("CATMIRROR_DIR", temp.path())
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"items_cached\": 0"));

    assert!(temp.path().join("catalog.db").exists());
}

#[test]
fn changes_json_on_empty_cache() {
    let temp = TempDir::new().unwrap();

    catmirror_in(&temp)
        .args(["changes", "--output", "json"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn invalid_since_is_usage_error() {
    let temp = TempDir::new().unwrap();

    catmirror_in(&temp)
        .args(["changes", "--since", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn missing_item_exits_one() {
    let temp = TempDir::new().unwrap();

    catmirror_in(&temp)
        .args(["item", "--item-id", "NOPE"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: item not found: NOPE"));
}

#[test]
fn invalid_search_pattern_exits_one() {
    let temp = TempDir::new().unwrap();

    catmirror_in(&temp)
        .args(["search", "--name", "("])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid search pattern"));
}

#[test]
fn malformed_config_exits_one() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, "types = [");

    catmirror_in(&temp)
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn sync_without_token_exits_one() {
    let temp = TempDir::new().unwrap();
    mock_config(&temp, "http://127.0.0.1:9");

    catmirror_in(&temp)
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no access token"));
}

#[test]
fn sync_token_from_env_file() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join("token.env");
    std::fs::write(&env_file, "# token\nSQUARE_TOKEN=from-file\n").unwrap();
    write_config(
        &temp,
        &format!(
            "env_file = \"{}\"\n\n[square]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 1\n",
            env_file.display()
        ),
    );

    // Token resolves, so the failure is the unreachable upstream
    catmirror_in(&temp)
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fetch failed"));
}
