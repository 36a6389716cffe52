#![warn(missing_docs)]
//! # Sortbench
//!
//! Correctness-gated benchmarking harness for interchangeable sorting algorithms.
//!
//! - **Registry**: named factories producing independent, stateful `Sorter` instances
//! - **Validation**: a five-fixture battery (ascending, descending, small-range random,
//!   singleton, empty); only instances that pass it are ever timed
//! - **Benchmarks**: pluggable kinds with typed options; the built-in Deviation Benchmark
//!   reports range, standard deviation and coefficient of variation of repeated sorts
//! - **Export**: CSV or JSON files named `<benchmark> yyyy-MM-dd HH-mm-ss`
//!
//! ## Quick Start
//!
//! ```no_run
//! use sortbench::prelude::*;
//!
//! #[derive(Default)]
//! struct BubbleSort;
//!
//! impl Sorter for BubbleSort {
//!     fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
//!         for i in 0..input.len() {
//!             for j in 1..input.len() - i {
//!                 if input[j - 1] > input[j] {
//!                     input.swap(j - 1, j);
//!                 }
//!             }
//!         }
//!         input
//!     }
//! }
//!
//! let mut harness = Harness::new();
//! harness.register(AlgorithmDescriptor::of::<BubbleSort>("BubbleSort"));
//! harness.instantiate_all_into_pool();
//! harness.validate();
//!
//! let mut deviation = DeviationBenchmark::new();
//! let run = harness
//!     .execute_benchmark(&mut deviation, &[("array-size", 1000.0), ("iterations", 5.0)])
//!     .unwrap();
//! println!("{:?}", run.results);
//! ```

// Re-export core types
pub use sortbench_core::{
    AlgorithmDescriptor, BenchOption, Benchmark, BenchmarkRun, BoxError, CandidateResult,
    DeviationBenchmark, FIXTURE_COUNT, FIXTURE_LEN, Fixture, FixtureOutcome, Harness, HeapSort,
    InstanceId, InstanceValidation, InstantiationError, MergeSort, MetricSet, OptionError,
    OptionType, Pool, PoolError, QuickSort, Registry, ResolvedOptions, SchedulerError, SetupError,
    ShellSort, SortTiming, Sorter, SorterInstance, StdSort, ValidationReport, ValidationState,
    ValidationSummary, Validator, builtin_descriptors, is_ordered, register_builtins,
};

// Re-export stats
pub use sortbench_stats::{DeviationStatistics, compute_summary};

// Re-export reporting
pub use sortbench_report::{
    DeviationPresenter, ExportError, ExportFormat, Exporter, OutputFormat, Report,
    ResultPresenter, ResultTable, build_report, export_file_name, export_results,
    generate_csv_report, generate_json_report, presenter_for,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AlgorithmDescriptor, Benchmark, BenchmarkRun, DeviationBenchmark, Harness, Sorter,
        ValidationState, export_results,
    };
}

/// Run the Sortbench CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     sortbench::run().unwrap();
/// }
/// ```
pub use sortbench_cli::run;

/// Harness with the built-in algorithms and the Deviation Benchmark registered
pub use sortbench_cli::default_harness;
