//! TOML configuration for the database suite.
//!
//! ```toml
//! backend = "sqlite"
//! database_path = "dbbench.sqlite"
//! batch_insert_executions = 100
//! inserts_per_transaction = 10
//! select_executions = 100
//! warmup_executions = 5
//! seed = 0
//! ```
//!
//! Every count falls back to its default when missing or out of range. The
//! backend has no default: without it there is nothing to benchmark.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::db::BackendKind;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "dbbench.toml";
pub const DEFAULT_DATABASE_PATH: &str = "dbbench.sqlite";
pub const DEFAULT_BATCH_INSERT_EXECUTIONS: u32 = 100;
pub const DEFAULT_INSERTS_PER_TRANSACTION: u32 = 10;
pub const DEFAULT_SELECT_EXECUTIONS: u32 = 100;
pub const DEFAULT_WARMUP_EXECUTIONS: u32 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSettings {
    backend: Option<String>,
    database_path: Option<PathBuf>,
    batch_insert_executions: Option<i64>,
    inserts_per_transaction: Option<i64>,
    select_executions: Option<i64>,
    warmup_executions: Option<i64>,
    seed: Option<u64>,
}

/// Fully resolved settings; every field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: BackendKind,
    pub database_path: PathBuf,
    pub batch_insert_executions: u32,
    pub inserts_per_transaction: u32,
    pub select_executions: u32,
    pub warmup_executions: u32,
    pub seed: u64,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(content)?;
        Self::resolve(raw)
    }

    fn resolve(raw: RawSettings) -> Result<Self, ConfigError> {
        let backend = raw
            .backend
            .as_deref()
            .ok_or(ConfigError::MissingBackend)?
            .parse::<BackendKind>()?;

        Ok(Self {
            backend,
            database_path: raw
                .database_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            batch_insert_executions: positive_or_default(
                "batch_insert_executions",
                raw.batch_insert_executions,
                DEFAULT_BATCH_INSERT_EXECUTIONS,
            ),
            inserts_per_transaction: positive_or_default(
                "inserts_per_transaction",
                raw.inserts_per_transaction,
                DEFAULT_INSERTS_PER_TRANSACTION,
            ),
            select_executions: positive_or_default(
                "select_executions",
                raw.select_executions,
                DEFAULT_SELECT_EXECUTIONS,
            ),
            warmup_executions: non_negative_or_default(
                "warmup_executions",
                raw.warmup_executions,
                DEFAULT_WARMUP_EXECUTIONS,
            ),
            seed: raw.seed.unwrap_or_default(),
        })
    }
}

fn positive_or_default(key: &str, value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => clamp_u32(key, v),
        Some(v) => {
            warn!(key, value = v, default, "not a positive number, using default");
            default
        }
        None => {
            warn!(key, default, "not set, using default");
            default
        }
    }
}

/// Warmup may legitimately be zero; only negative or missing values fall back.
fn non_negative_or_default(key: &str, value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v >= 0 => clamp_u32(key, v),
        Some(v) => {
            warn!(key, value = v, default, "negative count, using default");
            default
        }
        None => {
            warn!(key, default, "not set, using default");
            default
        }
    }
}

fn clamp_u32(key: &str, v: i64) -> u32 {
    u32::try_from(v).unwrap_or_else(|_| {
        warn!(key, value = v, max = u32::MAX, "count too large, clamped");
        u32::MAX
    })
}
