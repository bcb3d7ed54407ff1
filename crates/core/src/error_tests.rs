// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    missing_id = { Error::MissingId, "'id'" },
    invalid_change_type = { Error::InvalidChangeType("moved".into()), "moved" },
    sync_in_progress = { Error::SyncInProgress("/tmp/x.lock".into()), "already running" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_invalid_pattern_display() {
    let err = Error::InvalidPattern {
        pattern: "(".into(),
        reason: "unclosed group".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("'('"));
    assert!(msg.contains("unclosed group"));
}

#[test]
fn error_from_fetch() {
    let err: Error = FetchError::Transport("connection reset".into()).into();
    assert!(matches!(err, Error::Fetch(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
