//! Sequential execution of a benchmark list with start/result banners.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::engine::Benchmark;
use crate::schema::BenchmarkReport;

const RULE: &str = "-----------------------------------------------------";

pub struct Runner<W: Write = io::Stdout> {
    benchmarks: Vec<Box<dyn Benchmark>>,
    out: W,
    banners: bool,
}

impl Runner<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Runner<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Runner<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            benchmarks: Vec::new(),
            out,
            banners: true,
        }
    }

    /// Skip the text banners; reports are still returned from [`Runner::run`].
    pub fn without_banners(mut self) -> Self {
        self.banners = false;
        self
    }

    pub fn add(&mut self, benchmark: Box<dyn Benchmark>) {
        self.benchmarks.push(benchmark);
    }

    pub fn extend(&mut self, benchmarks: impl IntoIterator<Item = Box<dyn Benchmark>>) {
        self.benchmarks.extend(benchmarks);
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Execute every benchmark in insertion order. A benchmark whose init
    /// fails yields an empty result and the next one still runs. Banner
    /// write failures are logged and never stop the suite.
    pub fn run(&mut self) -> Vec<BenchmarkReport> {
        let mut reports = Vec::with_capacity(self.benchmarks.len());

        for benchmark in self.benchmarks.iter_mut() {
            let name = benchmark.name().to_string();
            info!(benchmark = %name, "starting");
            if self.banners {
                if let Err(err) = write_start_banner(&mut self.out, &name) {
                    warn!(benchmark = %name, error = %err, "failed to write start banner");
                }
            }

            let outcome = benchmark.execute();
            let report = BenchmarkReport {
                info: benchmark.describe(),
                completed: outcome.is_completed(),
                result: benchmark.results(),
                name,
            };

            if self.banners {
                if let Err(err) = write_result_banner(&mut self.out, &report) {
                    warn!(benchmark = %report.name, error = %err, "failed to write result banner");
                }
            }
            reports.push(report);
        }

        reports
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

fn write_start_banner<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "Executing benchmark: {name}")?;
    out.flush()
}

fn write_result_banner<W: Write>(out: &mut W, report: &BenchmarkReport) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Result for benchmark: {}", report.name)?;
    writeln!(out)?;
    writeln!(out, "{}", report.info)?;
    if report.completed {
        report.result.render(out)?;
    } else {
        writeln!(out, "no data (initialization failed)")?;
    }
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out)?;
    out.flush()
}
