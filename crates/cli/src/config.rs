// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! State directory and configuration management.
//!
//! Configuration is read from `config.toml` inside the state directory. Every
//! key is optional:
//! - `database`: database file, relative to the state directory or absolute
//! - `types`: upstream object types to sync
//! - `env_file`: `KEY=VALUE` file consulted for the access token
//! - `diff_fields`: field paths reported in update differences
//! - `[square]`: REST endpoint, API version and request timeout

use catmirror_core::{ChangeDetector, DEFAULT_DIFF_FIELDS, DEFAULT_TYPES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "catmirror";
const FALLBACK_DIR_NAME: &str = ".catmirror";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "catalog.db";
const ENV_FILE_NAME: &str = ".env";

/// Token keys looked up in the env file, in order.
const TOKEN_KEYS: [&str; 2] = ["SQUARE_ACCESS_TOKEN", "SQUARE_TOKEN"];

/// Configuration stored in `<state dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database file (relative to the state directory or absolute).
    pub database: String,
    /// Upstream object types requested on sync.
    pub types: String,
    /// Env file consulted for the token; defaults to `<config dir>/catmirror/.env`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_file: Option<String>,
    /// Field paths reported in update differences.
    pub diff_fields: Vec<String>,
    pub square: SquareConfig,
}

/// Square REST API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SquareConfig {
    pub base_url: String,
    /// Value sent in the `Square-Version` header.
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: DB_FILE_NAME.to_string(),
            types: DEFAULT_TYPES.to_string(),
            env_file: None,
            diff_fields: DEFAULT_DIFF_FIELDS.iter().map(|s| s.to_string()).collect(),
            square: SquareConfig::default(),
        }
    }
}

impl Default for SquareConfig {
    fn default() -> Self {
        SquareConfig {
            base_url: crate::square::DEFAULT_BASE_URL.to_string(),
            api_version: crate::square::DEFAULT_API_VERSION.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Loads configuration from the state directory, using defaults when
    /// there is no config file.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Path of the database file.
    pub fn db_path(&self, state_dir: &Path) -> PathBuf {
        let database = Path::new(&self.database);
        if database.is_absolute() {
            database.to_path_buf()
        } else {
            state_dir.join(database)
        }
    }

    /// Path of the env file consulted for the token.
    pub fn env_file_path(&self) -> Option<PathBuf> {
        match &self.env_file {
            Some(path) => Some(expand_home(path)),
            None => dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(ENV_FILE_NAME)),
        }
    }

    /// Change detector over the configured diff fields.
    pub fn detector(&self) -> Result<ChangeDetector> {
        Ok(ChangeDetector::from_paths(self.diff_fields.as_slice())?)
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the state directory: explicit flag, then `CATMIRROR_DIR`, then
/// the platform data directory, then `./.catmirror`.
pub fn resolve_state_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = env::state_dir() {
        return dir;
    }
    match dirs::data_local_dir() {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from(FALLBACK_DIR_NAME),
    }
}

/// Resolve the access token: explicit flag, then the environment, then the
/// env file.
pub fn resolve_token(
    explicit: Option<&str>,
    env_token: Option<String>,
    env_file: Option<&Path>,
) -> Result<String> {
    if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
        return Ok(token.to_string());
    }
    if let Some(token) = env_token {
        return Ok(token);
    }
    if let Some(path) = env_file {
        let values = read_env_file(path)?;
        if let Some(token) = TOKEN_KEYS
            .iter()
            .filter_map(|key| values.get(*key))
            .find(|v| !v.is_empty())
        {
            return Ok(token.clone());
        }
    }
    Err(Error::TokenNotFound)
}

/// Read `KEY=VALUE` lines, skipping blanks and `#` comments. A missing file
/// reads as empty.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };

    let mut values = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            values.insert(key.trim().to_string(), value.to_string());
        }
    }
    Ok(values)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
