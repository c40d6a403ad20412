use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dbbench::benches;
use dbbench::config::{Settings, DEFAULT_CONFIG_PATH};
use dbbench::error::{ConfigError, SuiteError};
use dbbench::schema::{RunMeta, SuiteReport};
use dbbench::{OutputFormat, Runner};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the benchmark table, then run the insert and select benchmarks (default).
    Run,
}

#[derive(Parser, Debug)]
#[command(name = "dbbench")]
#[command(about = "Warmup-aware latency benchmarks for database inserts and selects")]
struct Args {
    /// TOML configuration file.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// Override the configured RNG seed.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Suite(#[from] SuiteError),
    #[error("encode report: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn now_utc() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}

/// Returns whether every benchmark got past init.
fn run(args: &Args) -> Result<bool, AppError> {
    let mut settings = Settings::load(&args.config)?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    info!(
        backend = %settings.backend,
        database = %settings.database_path.display(),
        seed = settings.seed,
        "configuration resolved"
    );

    let suite = benches::build_suite(&settings)?;

    let reports = match args.format {
        OutputFormat::Text => {
            let mut runner = Runner::new();
            runner.extend(suite);
            runner.run()
        }
        OutputFormat::Json => {
            let mut runner = Runner::new().without_banners();
            runner.extend(suite);
            let benchmarks = runner.run();
            let report = SuiteReport {
                run: RunMeta {
                    schema_version: 1,
                    bench_version: env!("CARGO_PKG_VERSION").to_string(),
                    backend: settings.backend.to_string(),
                    seed: settings.seed,
                    timestamp_utc: now_utc(),
                    git_sha: git_sha_short(),
                },
                benchmarks,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            report.benchmarks
        }
    };

    Ok(reports.iter().all(|r| r.completed))
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match args.cmd.as_ref().unwrap_or(&Command::Run) {
        Command::Run => match run(&args) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => {
                error!("one or more benchmarks failed to initialize");
                ExitCode::FAILURE
            }
            Err(err) => {
                error!(error = %err, "benchmark run aborted");
                ExitCode::FAILURE
            }
        },
    }
}
