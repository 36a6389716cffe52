#![warn(missing_docs)]
//! Sortbench CLI Library
//!
//! This module provides the CLI for correctness-gated sorting benchmarks.
//! Use `sortbench::run()` (or `sortbench_cli::run()`) in your main function to get the
//! full sortbench CLI with the built-in algorithms and benchmarks.
//!
//! ```text
//! sortbench.toml ─┐
//! CLI flags ──────┴─► plan (algorithms, overrides)
//!                          │
//!                          ▼
//!        pool ─► validate ─► execute benchmark ─► print ─► export
//! ```

mod config;
mod formatting;
mod planner;

pub use config::*;
pub use formatting::{format_human_output, format_listing, format_validation};
pub use planner::{compile_filter, parse_override, resolve_overrides, select_algorithms};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sortbench_core::{DeviationBenchmark, Harness, Validator, builtin_descriptors};
use sortbench_report::{
    Exporter, OutputFormat, ResultTable, build_report, export_results, generate_csv_report,
    generate_json_report,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sortbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sortbench")]
#[command(author, version, about = "Sortbench - correctness-gated sorting benchmarks")]
pub struct Cli {
    /// Optional subcommand (List, Validate, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered algorithms and benchmarks
    List,
    /// Run the correctness battery only
    Validate(SelectArgs),
    /// Validate, then run a benchmark (default)
    Run(RunArgs),
    /// Write a default sortbench.toml
    Init {
        /// Destination file
        #[arg(default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Algorithm selection shared by `validate` and `run`
#[derive(Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Only pool algorithms whose name matches this regex
    #[arg(long)]
    pub algorithms: Option<String>,

    /// Seed for reproducible fixtures and workloads
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for `run`
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Benchmark to run (defaults to config, then "Deviation Benchmark")
    pub benchmark: Option<String>,

    /// Algorithm selection and seed
    #[command(flatten)]
    pub select: SelectArgs,

    /// Override a benchmark option, e.g. `-o iterations=5`
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Export results after the run
    #[arg(long)]
    pub export: bool,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Directory for exported results
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Run the Sortbench CLI with the process arguments.
/// This is the main entry point for the `sortbench` binary.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Sortbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging; a subscriber may already be installed when embedded
    let filter = if cli.verbose {
        "sortbench=debug"
    } else {
        "sortbench=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // sortbench.toml configuration (CLI flags override)
    let config = match &cli.config {
        Some(path) => SortbenchConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SortbenchConfig::discover().unwrap_or_default(),
    };

    match cli.command {
        Some(Commands::List) => list(),
        Some(Commands::Validate(ref args)) => validate(args, &config),
        Some(Commands::Run(ref args)) => run_benchmark(args, &config),
        Some(Commands::Init { ref path, force }) => init(path, force),
        None => run_benchmark(&RunArgs::default(), &config),
    }
}

/// Harness with the built-in algorithms and benchmarks registered.
///
/// With a seed, validation fixtures and benchmark workloads are reproducible.
pub fn default_harness(seed: Option<u64>) -> Harness {
    let (validator, deviation) = match seed {
        Some(seed) => (Validator::with_seed(seed), DeviationBenchmark::with_seed(seed)),
        None => (Validator::new(), DeviationBenchmark::new()),
    };

    let mut harness = Harness::new().with_validator(validator);
    for descriptor in builtin_descriptors() {
        harness.register(descriptor);
    }
    harness.add_benchmark(Box::new(deviation));
    harness
}

/// Build the harness and pool the selected algorithms
fn prepare_harness(args: &SelectArgs, config: &SortbenchConfig) -> anyhow::Result<Harness> {
    let mut harness = default_harness(args.seed.or(config.runner.seed));

    let pattern = args
        .algorithms
        .as_deref()
        .or(config.runner.algorithms.as_deref());
    let filter = compile_filter(pattern)?;

    for name in select_algorithms(harness.list_registered(), filter.as_ref()) {
        // Failures are logged by the harness; the rest of the pool still runs
        let _ = harness.instantiate_into_pool(&name);
    }

    if harness.pool().is_empty() {
        warn!(filter = pattern.unwrap_or(".*"), "no algorithms pooled");
    }
    Ok(harness)
}

fn list() -> anyhow::Result<()> {
    let harness = default_harness(None);

    let benchmarks: Vec<_> = harness
        .available_benchmarks()
        .into_iter()
        .filter_map(|name| {
            harness
                .benchmark(name)
                .map(|b| (name, b.configuration_options()))
        })
        .collect();

    print!(
        "{}",
        format_listing(&harness.list_registered(), &benchmarks)
    );
    Ok(())
}

fn validate(args: &SelectArgs, config: &SortbenchConfig) -> anyhow::Result<()> {
    let mut harness = prepare_harness(args, config)?;
    let report = harness.validate();
    print!("{}", format_validation(&report));
    Ok(())
}

fn run_benchmark(args: &RunArgs, config: &SortbenchConfig) -> anyhow::Result<()> {
    let format: OutputFormat = args
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;

    let mut harness = prepare_harness(&args.select, config)?;
    let validation = harness.validate();

    let name = args
        .benchmark
        .as_deref()
        .or(config.runner.benchmark.as_deref())
        .unwrap_or(DeviationBenchmark::NAME)
        .to_string();

    if harness.benchmark(&name).is_none() {
        println!(
            "Unknown benchmark '{}'. Available: {}",
            name,
            harness.available_benchmarks().join(", ")
        );
        return Ok(());
    }

    let overrides = resolve_overrides(&config.benchmark.options, &args.options)?;
    let overrides: Vec<(&str, f64)> = overrides
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect();

    let Some(run) = harness.execute_by_name(&name, &overrides)? else {
        return Ok(());
    };

    let output = match format {
        OutputFormat::Human => format_human_output(run, Some(&validation)),
        OutputFormat::Json => generate_json_report(&build_report(run, Some(&validation)))?,
        OutputFormat::Csv => generate_csv_report(&ResultTable::from_run(run))?,
    };
    print!("{}", output);

    if args.export || config.output.export {
        let directory = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.directory));
        let exporter = Exporter::new(directory).with_format(format.export_format());

        if export_results(Some(run), &exporter)? {
            info!(directory = %exporter.directory().display(), "results exported");
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, SortbenchConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
