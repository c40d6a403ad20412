//! Sample accumulation and min/max/mean aggregation per phase.

use serde::Serialize;

use crate::result::{to_metric, BenchResult};

/// Samples and aggregates for one phase of a run.
///
/// `min_ns`/`max_ns` stay `None` until the first sample lands; an empty
/// phase has no minimum rather than a sentinel one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    pub samples: Vec<u64>,
    pub min_ns: Option<u64>,
    pub max_ns: Option<u64>,
    pub avg_ns: u64,
    pub failures: u32,
    #[serde(skip)]
    total_ns: u128,
}

impl PhaseStats {
    pub fn record(&mut self, sample_ns: u64) {
        self.samples.push(sample_ns);
        self.total_ns += u128::from(sample_ns);
        if self.min_ns.map_or(true, |min| sample_ns < min) {
            self.min_ns = Some(sample_ns);
        }
        if self.max_ns.map_or(true, |max| sample_ns > max) {
            self.max_ns = Some(sample_ns);
        }
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Compute the truncating mean over recorded samples; failed iterations
    /// do not count toward the divisor.
    pub fn finalize(&mut self) {
        self.avg_ns = match self.samples.len() {
            0 => 0,
            n => u64::try_from(self.total_ns / n as u128).unwrap_or(u64::MAX),
        };
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn total_ns(&self) -> u128 {
        self.total_ns
    }

    /// Append min/max/avg (only when there is data) and the failure count
    /// (only when non-zero), naming each metric with `label`.
    pub fn append_to(&self, result: &mut BenchResult, label: impl Fn(&str) -> String) {
        if let (Some(min), Some(max)) = (self.min_ns, self.max_ns) {
            result.put(label("min"), to_metric(min));
            result.put(label("max"), to_metric(max));
            result.put(label("avg"), to_metric(self.avg_ns));
        }
        if self.failures > 0 {
            result.put(label("failed"), i64::from(self.failures));
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub warmup: PhaseStats,
    pub measured: PhaseStats,
}

impl RunStats {
    /// Standard labels: `min-warmup`, `max-warmup`, `avg-warmup`, then
    /// `min`, `max`, `avg`.
    pub fn to_result(&self) -> BenchResult {
        let mut result = BenchResult::new();
        self.warmup.append_to(&mut result, |m| format!("{m}-warmup"));
        self.measured.append_to(&mut result, |m| m.to_string());
        result
    }
}
