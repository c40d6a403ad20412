//! Backend capability consumed by the database benchmarks.
//!
//! Benchmarks only see [`Backend`] and [`Session`]; the SQL dialect, DDL and
//! statement handling live behind them.

pub mod row;
pub mod sqlite;

use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{ConfigError, DbError};

pub use row::TestRow;
pub use sqlite::SqliteBackend;

/// Opens sessions against one database.
pub trait Backend {
    fn name(&self) -> &'static str;
    fn connect(&self) -> Result<Box<dyn Session>, DbError>;
}

/// An open connection to the benchmark table.
pub trait Session {
    /// Drop and recreate the benchmark table.
    fn create_schema(&mut self) -> Result<(), DbError>;

    fn prepare_insert(&mut self) -> Result<(), DbError>;

    /// Insert `rows` in a single transaction. On error nothing is committed.
    fn insert_batch(&mut self, rows: &[TestRow]) -> Result<usize, DbError>;

    /// Highest primary key in the table, 0 when it is empty.
    fn max_primary_key(&mut self) -> Result<i64, DbError>;

    fn prepare_select(&mut self) -> Result<(), DbError>;

    fn select_by_pk(&mut self, pk: i64) -> Result<Option<TestRow>, DbError>;

    fn row_count(&mut self) -> Result<i64, DbError>;

    fn close(self: Box<Self>) -> Result<(), DbError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
        }
    }

    pub fn open(&self, database_path: &Path) -> Rc<dyn Backend> {
        match self {
            BackendKind::Sqlite => Rc::new(SqliteBackend::new(database_path)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(BackendKind::Sqlite),
            "" => Err(ConfigError::MissingBackend),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}
