// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock abstraction.
//!
//! Every timestamp the core writes (`cached_at`, snapshot and sync run
//! timestamps) comes from a [`Clock`], so tests can drive time explicitly.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Trait for getting the current wall clock time.
///
/// This allows injecting a mock clock for testing.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using `chrono::Utc::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (*self).now()
    }
}

/// A clock that returns a fixed start time and advances by `step` after every read.
///
/// With a non-zero step every call yields a strictly later instant, which keeps
/// ordering in the change log deterministic.
#[derive(Debug)]
pub struct ManualClock {
    now_us: AtomicI64,
    step_us: i64,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::ticking(start, Duration::zero())
    }

    /// Creates a clock starting at `start` that advances by `step` per read.
    pub fn ticking(start: DateTime<Utc>, step: Duration) -> Self {
        ManualClock {
            now_us: AtomicI64::new(start.timestamp_micros()),
            step_us: step.num_microseconds().unwrap_or(0),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now_us
            .fetch_add(by.num_microseconds().unwrap_or(0), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let us = self.now_us.fetch_add(self.step_us, Ordering::SeqCst);
        DateTime::from_timestamp_micros(us).unwrap_or_default()
    }
}

/// Formats a timestamp for storage.
///
/// Fixed precision and a `Z` suffix make lexical order equal time order, which
/// the `ORDER BY timestamp` and `timestamp >= ?` queries rely on.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
