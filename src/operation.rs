//! The lifecycle hooks a concrete benchmark supplies to the engine.

use std::hint::black_box;

use crate::error::OperationError;
use crate::harness::BenchConfig;
use crate::result::BenchResult;
use crate::state::IterationState;
use crate::stats::RunStats;

/// A unit of work the [`Engine`](crate::engine::Engine) can drive.
///
/// Per run the engine calls `init` once, then for every warmup and measured
/// iteration `before_each` → `timed_body` → `after_each`, then `finish` once.
/// Only `timed_body` is inside the timed interval.
pub trait Operation {
    /// Operation-specific payload carried in the iteration state.
    type Extra: Default;

    fn name(&self) -> &str;

    fn describe(&self, config: &BenchConfig) -> String {
        format!(
            "Warmup Executions: {}\nExecutions: {}\n",
            config.warmup_iters, config.iters
        )
    }

    /// Acquire resources. An error aborts the run before any iteration and
    /// `finish` is not called.
    fn init(&mut self) -> Result<(), OperationError>;

    /// Release resources. Called exactly once after a successful `init`.
    fn finish(&mut self) -> Result<(), OperationError>;

    fn before_each(&mut self, _state: &mut IterationState<Self::Extra>) -> Result<(), OperationError> {
        Ok(())
    }

    fn timed_body(&mut self, state: &mut IterationState<Self::Extra>) -> Result<(), OperationError>;

    fn after_each(&mut self, _state: &mut IterationState<Self::Extra>) -> Result<(), OperationError> {
        Ok(())
    }

    fn make_state(&self) -> IterationState<Self::Extra> {
        IterationState::new(Self::Extra::default())
    }

    /// Turn the statistics of a completed run into labelled metrics.
    fn report(&self, stats: &RunStats) -> BenchResult {
        stats.to_result()
    }
}

/// Adapts a plain closure into an [`Operation`]; the closure is the timed body.
pub struct FnOperation<F> {
    name: String,
    f: F,
}

impl<F> FnOperation<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F, T> Operation for FnOperation<F>
where
    F: FnMut() -> T,
{
    type Extra = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self) -> Result<(), OperationError> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OperationError> {
        Ok(())
    }

    fn timed_body(&mut self, _state: &mut IterationState) -> Result<(), OperationError> {
        black_box((self.f)());
        Ok(())
    }
}
