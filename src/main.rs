//! # tsp-bench
//!
//! Runs the TSP solvers side by side on TSPLIB files or generated instances
//! and prints one JSON array of results to stdout.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{error, LevelFilter};
use tsp_solvers::benchmark::{
    benchmark_generated, benchmark_tsplib, BenchmarkConfig, BenchmarkRecord,
};
use tsp_solvers::models::SolverKind;
use tsp_solvers::tsplib::dataset_name;
use tsp_solvers::{Result, TspError};

/// Compare TSP solvers on the same instances
#[derive(Parser)]
#[command(name = "tsp-bench", version)]
#[command(about = "Compare exact and heuristic TSP solvers on TSPLIB instances")]
struct Cli {
    /// TSPLIB files with a NODE_COORD_SECTION
    files: Vec<PathBuf>,

    /// Generate a random instance with this many cities (repeatable)
    #[arg(long = "generate", value_name = "N")]
    generate: Vec<usize>,

    /// Seed for generated instances
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Solver to run (repeatable); all solvers when omitted
    #[arg(long = "algorithm", value_enum)]
    algorithms: Vec<SolverKind>,

    /// Optimal cost for approximation ratios, if the dataset is not a known one
    #[arg(long)]
    ground_truth: Option<f64>,

    /// Log level (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if cli.files.is_empty() && cli.generate.is_empty() {
        return Err(TspError::invalid_input(
            "nothing to benchmark: pass TSPLIB files or --generate N",
        ));
    }

    let mut config = BenchmarkConfig::default();
    if !cli.algorithms.is_empty() {
        config = config.with_algorithms(cli.algorithms.clone());
    }
    if let Some(optimum) = cli.ground_truth {
        config = config.with_ground_truth(optimum);
    }

    let mut records: Vec<BenchmarkRecord> = Vec::new();
    for path in &cli.files {
        let text = std::fs::read_to_string(path)?;
        records.extend(benchmark_tsplib(&text, &dataset_name(path), &config)?);
    }
    for (i, &n) in cli.generate.iter().enumerate() {
        records.extend(benchmark_generated(
            n,
            cli.seed.wrapping_add(i as u64),
            &config,
        ));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &records).map_err(std::io::Error::from)?;
    } else {
        serde_json::to_writer(&mut out, &records).map_err(std::io::Error::from)?;
    }
    writeln!(out)?;
    Ok(())
}
