use serde::Serialize;

use crate::result::BenchResult;

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub bench_version: String,
    pub backend: String,
    pub seed: u64,
    pub timestamp_utc: String,
    pub git_sha: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub name: String,
    pub info: String,
    pub completed: bool,
    pub result: BenchResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub run: RunMeta,
    pub benchmarks: Vec<BenchmarkReport>,
}
