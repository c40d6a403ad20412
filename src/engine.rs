//! The warmup/measured iteration state machine.

use tracing::{debug, error, info_span, warn};

use crate::error::OperationError;
use crate::harness::{BenchConfig, Clock, MonotonicClock};
use crate::operation::Operation;
use crate::result::BenchResult;
use crate::state::{IterationState, Phase};
use crate::stats::{PhaseStats, RunStats};

/// Object-safe view of a runnable benchmark, used by the [`Runner`](crate::runner::Runner).
pub trait Benchmark {
    fn name(&self) -> &str;
    fn describe(&self) -> String;
    fn execute(&mut self) -> Outcome;
    /// Metrics from the last completed `execute`; empty if there is none.
    fn results(&self) -> BenchResult;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Completed,
    InitFailed,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Drives an [`Operation`] through init, warmup, measured iterations and
/// teardown, collecting one sample per successful iteration.
pub struct Engine<O: Operation, C: Clock = MonotonicClock> {
    op: O,
    config: BenchConfig,
    clock: C,
    stats: Option<RunStats>,
}

impl<O: Operation> Engine<O> {
    pub fn new(op: O, config: BenchConfig) -> Self {
        Self::with_clock(op, config, MonotonicClock::new())
    }
}

impl<O: Operation, C: Clock> Engine<O, C> {
    pub fn with_clock(op: O, config: BenchConfig, clock: C) -> Self {
        Self {
            op,
            config,
            clock,
            stats: None,
        }
    }

    pub fn operation(&self) -> &O {
        &self.op
    }

    pub fn operation_mut(&mut self) -> &mut O {
        &mut self.op
    }

    pub fn stats(&self) -> Option<&RunStats> {
        self.stats.as_ref()
    }

    pub fn into_stats(self) -> Option<RunStats> {
        self.stats
    }

    pub fn execute(&mut self) -> Outcome {
        let span = info_span!("benchmark", name = %self.op.name());
        let _enter = span.enter();

        // A failed init must not leave the previous run's numbers visible.
        self.stats = None;

        if let Err(err) = self.op.init() {
            error!(error = %err, "initialization failed, run skipped");
            return Outcome::InitFailed;
        }

        let mut stats = RunStats::default();
        let mut state = self.op.make_state();

        state.enter_phase(Phase::Warmup);
        self.run_phase(&mut state, self.config.warmup_iters, &mut stats.warmup);

        state.enter_phase(Phase::Measured);
        self.run_phase(&mut state, self.config.iters, &mut stats.measured);

        if let Err(err) = self.op.finish() {
            warn!(error = %err, "teardown failed");
        }

        debug!(
            warmup_samples = stats.warmup.count(),
            samples = stats.measured.count(),
            avg_ns = stats.measured.avg_ns,
            "run complete"
        );
        self.stats = Some(stats);
        Outcome::Completed
    }

    fn run_phase(&mut self, state: &mut IterationState<O::Extra>, count: u32, out: &mut PhaseStats) {
        for ordinal in 1..=count {
            state.set_ordinal(ordinal);
            match self.iterate(state) {
                Ok(sample_ns) => out.record(sample_ns),
                Err(err) => {
                    warn!(
                        phase = %state.phase(),
                        ordinal,
                        error = %err,
                        "iteration failed, sample discarded"
                    );
                    out.record_failure();
                }
            }
        }
        out.finalize();
    }

    /// One iteration. `after_each` runs whenever `before_each` succeeded, even
    /// if the timed body failed.
    fn iterate(&mut self, state: &mut IterationState<O::Extra>) -> Result<u64, OperationError> {
        self.op.before_each(state)?;

        let start = self.clock.now_ns();
        let body = self.op.timed_body(state);
        let elapsed = self.clock.now_ns().saturating_sub(start);

        let after = self.op.after_each(state);
        body?;
        after?;
        Ok(elapsed)
    }
}

impl<O: Operation, C: Clock> Benchmark for Engine<O, C> {
    fn name(&self) -> &str {
        self.op.name()
    }

    fn describe(&self) -> String {
        self.op.describe(&self.config)
    }

    fn execute(&mut self) -> Outcome {
        Engine::execute(self)
    }

    fn results(&self) -> BenchResult {
        self.stats
            .as_ref()
            .map(|stats| self.op.report(stats))
            .unwrap_or_default()
    }
}
