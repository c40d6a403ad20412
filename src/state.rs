//! Per-run iteration context handed to every lifecycle hook.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Warmup,
    Measured,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Warmup => "warmup",
            Phase::Measured => "measured",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current ordinal and phase, plus whatever the operation needs to carry
/// from `before_each` through `timed_body` into `after_each`.
///
/// The engine owns the ordinal and phase; `extra` belongs to the operation.
#[derive(Clone, Debug)]
pub struct IterationState<E = ()> {
    ordinal: u32,
    phase: Phase,
    pub extra: E,
}

impl<E> IterationState<E> {
    pub fn new(extra: E) -> Self {
        Self {
            ordinal: 0,
            phase: Phase::Warmup,
            extra,
        }
    }

    /// 1-based position within the current phase; 0 before the first iteration.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.ordinal = 0;
    }

    pub(crate) fn set_ordinal(&mut self, ordinal: u32) {
        self.ordinal = ordinal;
    }
}

impl<E: Default> Default for IterationState<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}
