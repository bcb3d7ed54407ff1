// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use catmirror_core::{Database, Fetcher, Syncer, LOCK_FILE};

use crate::config::{resolve_token, Config};
use crate::env;
use crate::error::Result;
use crate::square::SquareClient;

use super::to_json;

pub fn run(state_dir: &Path, token: Option<&str>) -> Result<()> {
    let config = Config::load(state_dir)?;
    let token = resolve_token(
        token,
        env::square_token(),
        config.env_file_path().as_deref(),
    )?;
    let client = SquareClient::new(&config.square, token)?;

    let mut db = Database::open(&config.db_path(state_dir))?;
    let output = run_impl(&mut db, &client, &config, &state_dir.join(LOCK_FILE))?;
    println!("{}", output);
    Ok(())
}

/// Internal implementation that accepts db and fetcher for testing.
pub(crate) fn run_impl<F: Fetcher>(
    db: &mut Database,
    fetcher: F,
    config: &Config,
    lock_path: &Path,
) -> Result<String> {
    let detector = config.detector()?;
    tracing::debug!(
        fields = detector.fields().len(),
        types = %config.types,
        "diff fields configured"
    );
    let run = Syncer::new(db, fetcher)
        .detector(detector)
        .types(config.types.clone())
        .lock_path(lock_path)
        .run_sync()?;
    to_json(&run)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
