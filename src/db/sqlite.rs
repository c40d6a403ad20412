//! SQLite implementation of the backend capability.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::row::TestRow;
use crate::db::{Backend, Session};
use crate::error::DbError;

const SCHEMA_SQL: &str = "
DROP TABLE IF EXISTS test_table;
CREATE TABLE test_table (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    test_column_varchar VARCHAR(20) NOT NULL,
    test_column_int     INTEGER NOT NULL,
    test_column_decimal DECIMAL(9,2) NOT NULL,
    test_column_date    INTEGER NOT NULL
);
";

const INSERT_SQL: &str = "INSERT INTO test_table \
    (test_column_varchar, test_column_int, test_column_decimal, test_column_date) \
    VALUES (?1, ?2, ?3, ?4)";

const SELECT_SQL: &str = "SELECT id, test_column_varchar, test_column_int, test_column_decimal, test_column_date \
    FROM test_table WHERE id = ?1";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl Backend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn connect(&self) -> Result<Box<dyn Session>, DbError> {
        ensure_parent_dir(&self.path)?;
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(Box::new(SqliteSession { conn }))
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), DbError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn scan_row(row: &rusqlite::Row) -> rusqlite::Result<TestRow> {
    Ok(TestRow {
        id: row.get(0)?,
        varchar: row.get(1)?,
        int: row.get(2)?,
        decimal: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Statements go through the connection's statement cache, so "preparing"
/// compiles them once up front and later calls reuse the compiled form.
pub struct SqliteSession {
    conn: Connection,
}

impl Session for SqliteSession {
    fn create_schema(&mut self) -> Result<(), DbError> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn prepare_insert(&mut self) -> Result<(), DbError> {
        self.conn.prepare_cached(INSERT_SQL)?;
        Ok(())
    }

    fn insert_batch(&mut self, rows: &[TestRow]) -> Result<usize, DbError> {
        // Dropping an uncommitted transaction rolls it back.
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for row in rows {
                stmt.execute(params![row.varchar, row.int, row.decimal, row.created_at])?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    fn max_primary_key(&mut self) -> Result<i64, DbError> {
        let max: Option<i64> =
            self.conn
                .query_row("SELECT MAX(id) FROM test_table", [], |row| row.get(0))?;
        Ok(max.unwrap_or(0))
    }

    fn prepare_select(&mut self) -> Result<(), DbError> {
        self.conn.prepare_cached(SELECT_SQL)?;
        Ok(())
    }

    fn select_by_pk(&mut self, pk: i64) -> Result<Option<TestRow>, DbError> {
        let mut stmt = self.conn.prepare_cached(SELECT_SQL)?;
        let row = stmt.query_row(params![pk], scan_row).optional()?;
        Ok(row)
    }

    fn row_count(&mut self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM test_table", [], |row| row.get(0))?;
        Ok(count)
    }

    fn close(self: Box<Self>) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, err)| DbError::from(err))
    }
}
