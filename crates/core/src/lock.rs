// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight guard for sync runs.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the sync lock inside the state directory.
pub const LOCK_FILE: &str = "catalog-sync.lock";

/// An exclusive advisory lock held for the duration of a sync run.
///
/// Released when dropped.
#[derive(Debug)]
pub struct SyncLock {
    file: File,
    path: PathBuf,
}

impl SyncLock {
    /// Try to take the lock without blocking.
    ///
    /// Returns [`Error::SyncInProgress`] if another holder has it. Any other
    /// failure to open or lock the file is an I/O error.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.try_lock_exclusive().map_err(|e| {
            if e.kind() == fs2::lock_contended_error().kind() {
                Error::SyncInProgress(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;

        // Holder pid, for humans inspecting a stuck lock
        file.set_len(0)?;
        write!(file, "{}", std::process::id())?;

        tracing::debug!(path = %path.display(), "acquired sync lock");
        Ok(SyncLock {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for SyncLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        tracing::debug!(path = %self.path.display(), "released sync lock");
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
