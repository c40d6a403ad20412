//! Database benchmarks and the suite that wires them to one backend.

pub mod select;

use std::rc::Rc;

use tracing::{info, warn};

use crate::config::Settings;
use crate::db::Backend;
use crate::engine::{Benchmark, Engine};
use crate::error::SuiteError;
use crate::harness::BenchConfig;

pub use insert::InsertBench;
pub use select::SelectBench;

/// Give each benchmark its own reproducible RNG stream from the master seed.
pub fn derive_seed(master_seed: u64, stream: u64) -> u64 {
    master_seed
        .wrapping_add(stream)
        .wrapping_mul(0x517cc1b727220a95)
}

/// Recreate the benchmark table on a short-lived connection.
pub fn prepare_schema(backend: &dyn Backend) -> Result<(), SuiteError> {
    let mut session = backend.connect().map_err(|source| SuiteError::Connect {
        backend: backend.name(),
        source,
    })?;
    session.create_schema().map_err(SuiteError::Schema)?;
    if let Err(err) = session.close() {
        warn!(error = %err, "closing schema connection failed");
    }
    info!(backend = backend.name(), "benchmark table created");
    Ok(())
}

/// Insert benchmark first, so the select benchmark finds rows to look up.
pub fn build_suite(settings: &Settings) -> Result<Vec<Box<dyn Benchmark>>, SuiteError> {
    let backend = settings.backend.open(&settings.database_path);
    prepare_schema(backend.as_ref())?;
    Ok(suite_for(backend, settings))
}

fn suite_for(backend: Rc<dyn Backend>, settings: &Settings) -> Vec<Box<dyn Benchmark>> {
    let insert: Box<dyn Benchmark> = Box::new(Engine::new(
        InsertBench::new(
            Rc::clone(&backend),
            settings.inserts_per_transaction,
            derive_seed(settings.seed, 0),
        ),
        BenchConfig::new(settings.batch_insert_executions, settings.warmup_executions),
    ));
    let select: Box<dyn Benchmark> = Box::new(Engine::new(
        SelectBench::new(backend, derive_seed(settings.seed, 1)),
        BenchConfig::new(settings.select_executions, settings.warmup_executions),
    ));
    vec![insert, select]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{BackendKind, SqliteBackend};
    use crate::runner::Runner;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn settings(path: PathBuf) -> Settings {
        Settings {
            backend: BackendKind::Sqlite,
            database_path: path,
            batch_insert_executions: 4,
            inserts_per_transaction: 3,
            select_executions: 6,
            warmup_executions: 1,
            seed: 17,
        }
    }

    #[test]
    fn test_suite_runs_insert_then_select() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("suite.sqlite");
        let suite = build_suite(&settings(db_path.clone())).unwrap();

        let mut runner = Runner::with_output(Vec::new());
        runner.extend(suite);
        let reports = runner.run();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, insert::NAME);
        assert_eq!(reports[1].name, select::NAME);
        assert!(reports.iter().all(|r| r.completed));
        assert!(reports[1].result.get("avg").is_some());

        let mut session = SqliteBackend::new(db_path).connect().unwrap();
        assert_eq!(session.row_count().unwrap(), (4 + 1) * 3);
    }

    #[test]
    fn test_schema_failure_is_fatal() {
        let dir = tempdir().unwrap();
        // a directory cannot be opened as a database file
        let err = build_suite(&settings(dir.path().to_path_buf())).err().unwrap();
        assert!(matches!(err, SuiteError::Connect { .. } | SuiteError::Schema(_)));
    }

    #[test]
    fn test_derived_seeds_differ_per_stream() {
        assert_ne!(derive_seed(0, 0), derive_seed(0, 1));
        assert_eq!(derive_seed(9, 1), derive_seed(9, 1));
    }
}
