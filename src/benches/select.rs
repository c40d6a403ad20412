use std::hint::black_box;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::db::{Backend, Session, TestRow};
use crate::error::OperationError;
use crate::operation::Operation;
use crate::state::IterationState;

pub const NAME: &str = "Select Statements by PK";

/// Key chosen before timing and the row the timed body fetched with it.
#[derive(Debug, Default)]
pub struct PendingRow {
    pub pk: i64,
    pub fetched: Option<TestRow>,
}

/// Times a single-row lookup by primary key per iteration.
pub struct SelectBench {
    backend: Rc<dyn Backend>,
    rng: ChaCha8Rng,
    session: Option<Box<dyn Session>>,
    max_pk: i64,
    hits: u64,
}

impl SelectBench {
    pub fn new(backend: Rc<dyn Backend>, seed: u64) -> Self {
        Self {
            backend,
            rng: ChaCha8Rng::seed_from_u64(seed),
            session: None,
            max_pk: 0,
            hits: 0,
        }
    }

    /// Iterations of the last run whose key matched a row.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}

impl Operation for SelectBench {
    type Extra = PendingRow;

    fn name(&self) -> &str {
        NAME
    }

    fn init(&mut self) -> Result<(), OperationError> {
        let mut session = self.backend.connect()?;
        self.max_pk = session.max_primary_key()?;
        if self.max_pk == 0 {
            warn!("benchmark table is empty, every select will miss");
        }
        session.prepare_select()?;
        self.session = Some(session);
        self.hits = 0;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OperationError> {
        if let Some(session) = self.session.take() {
            session.close()?;
        }
        Ok(())
    }

    /// Keys 1..=max are assumed to exist, as left behind by the insert run.
    fn before_each(&mut self, state: &mut IterationState<PendingRow>) -> Result<(), OperationError> {
        state.extra.pk = if self.max_pk > 0 {
            self.rng.gen_range(1..=self.max_pk)
        } else {
            0
        };
        Ok(())
    }

    fn timed_body(&mut self, state: &mut IterationState<PendingRow>) -> Result<(), OperationError> {
        let session = self.session.as_mut().ok_or(OperationError::NotInitialized)?;
        state.extra.fetched = session.select_by_pk(state.extra.pk)?;
        Ok(())
    }

    fn after_each(&mut self, state: &mut IterationState<PendingRow>) -> Result<(), OperationError> {
        if let Some(row) = state.extra.fetched.take() {
            self.hits += 1;
            black_box(row);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteBackend;
    use crate::engine::{Engine, Outcome};
    use crate::harness::BenchConfig;
    use tempfile::tempdir;

    fn seeded_backend(path: std::path::PathBuf, rows: usize) -> Rc<dyn Backend> {
        let backend: Rc<dyn Backend> = Rc::new(SqliteBackend::new(path));
        let mut session = backend.connect().unwrap();
        session.create_schema().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let batch: Vec<TestRow> = (0..rows).map(|_| TestRow::random(&mut rng, 0)).collect();
        session.insert_batch(&batch).unwrap();
        session.close().unwrap();
        backend
    }

    #[test]
    fn test_every_lookup_hits() {
        let dir = tempdir().unwrap();
        let backend = seeded_backend(dir.path().join("select.sqlite"), 25);

        let mut engine = Engine::new(SelectBench::new(backend, 3), BenchConfig::new(20, 5));
        assert_eq!(engine.execute(), Outcome::Completed);

        let stats = engine.stats().unwrap();
        assert_eq!(stats.measured.count(), 20);
        assert_eq!(stats.warmup.count(), 5);
        assert_eq!(engine.operation().hits(), 25);
        assert_eq!(engine.operation().max_pk, 25);
    }

    #[test]
    fn test_empty_table_still_measures() {
        let dir = tempdir().unwrap();
        let backend = seeded_backend(dir.path().join("select.sqlite"), 0);

        let mut engine = Engine::new(SelectBench::new(backend, 3), BenchConfig::new(4, 0));
        assert_eq!(engine.execute(), Outcome::Completed);
        assert_eq!(engine.stats().unwrap().measured.count(), 4);
        assert_eq!(engine.operation().hits(), 0);
    }
}
