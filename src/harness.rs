use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use serde::Serialize;

use crate::engine::Engine;
use crate::operation::FnOperation;
use crate::stats::RunStats;

/// Monotonic nanosecond time source sampled around each timed body.
pub trait Clock {
    fn now_ns(&self) -> u64;
}

#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same reading, so an operation can hold one handle and
/// advance time from inside its timed body while the engine reads another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ns: u64) {
        self.now.set(self.now.get().saturating_add(ns));
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.now.get()
    }
}

/// Iteration counts for one benchmark; fixed for the benchmark's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BenchConfig {
    pub iters: u32,
    pub warmup_iters: u32,
}

impl BenchConfig {
    pub fn new(iters: u32, warmup_iters: u32) -> Self {
        Self {
            iters,
            warmup_iters,
        }
    }
}

/// Time a closure through the full engine and return its statistics.
pub fn measure_fn<T>(name: &str, cfg: BenchConfig, f: impl FnMut() -> T) -> RunStats {
    let mut engine = Engine::new(FnOperation::new(name, f), cfg);
    let outcome = engine.execute();
    // closures have no init step
    debug_assert!(outcome.is_completed());
    engine.into_stats().unwrap_or_default()
}
