use clap::ValueEnum;

pub mod benches;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod harness;
pub mod operation;
pub mod result;
pub mod runner;
pub mod schema;
pub mod state;
pub mod stats;

pub use engine::{Benchmark, Engine, Outcome};
pub use error::OperationError;
pub use harness::{BenchConfig, Clock, MonotonicClock};
pub use operation::{FnOperation, Operation};
pub use result::BenchResult;
pub use runner::Runner;
pub use state::{IterationState, Phase};
pub use stats::{PhaseStats, RunStats};

/// How the runner presents finished benchmarks on standard output.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Start/result banners followed by `label: value` lines.
    #[default]
    Text,
    /// A single pretty-printed JSON report once every benchmark has run.
    Json,
}
