//! Error types shared across the harness layers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by one of an operation's lifecycle hooks.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("database: {0}")]
    Db(#[from] DbError),
    #[error("operation used before init")]
    NotInitialized,
    #[error("{0}")]
    Failed(String),
}

impl OperationError {
    pub fn failed(msg: impl Into<String>) -> Self {
        OperationError::Failed(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no backend configured (supported: sqlite)")]
    MissingBackend,
    #[error("unknown backend: {0} (supported: sqlite)")]
    UnknownBackend(String),
}

/// Failure while preparing the database before any benchmark runs.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("connect to {backend}: {source}")]
    Connect {
        backend: &'static str,
        #[source]
        source: DbError,
    },
    #[error("create schema: {0}")]
    Schema(#[source] DbError),
}
