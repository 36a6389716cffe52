#![warn(missing_docs)]
//! Sortbench Core - Registry, Validation and Scheduling
//!
//! This crate provides the correctness-gated benchmarking pipeline:
//! - `Sorter` capability and the `Registry` of named algorithm factories
//! - `Pool` of independently stateful instances under test
//! - `Validator` running the five-fixture correctness battery
//! - `Benchmark` capability, option resolution, and the `Harness` scheduler
//! - `DeviationBenchmark`, measuring timing variability
//!
//! Everything runs on the calling thread: timed sorts never overlap.

mod algorithms;
mod benchmark;
mod deviation;
mod error;
mod harness;
mod measure;
mod options;
mod pool;
mod registry;
mod sorter;
mod validation;

pub use algorithms::{
    HeapSort, MergeSort, QuickSort, ShellSort, StdSort, builtin_descriptors, register_builtins,
};
pub use benchmark::{Benchmark, BenchmarkRun, CandidateResult, MetricSet};
pub use deviation::{
    ARRAY_SIZE, DEFAULT_ARRAY_SIZE, DEFAULT_ITERATIONS, DeviationBenchmark, ITERATIONS,
    MAX_ARRAY_SIZE, MAX_ITERATIONS, METRIC_COEFFICIENT_OF_VARIATION, METRIC_RANGE,
    METRIC_STANDARD_DEVIATION,
};
pub use error::{BoxError, InstantiationError, PoolError, SetupError};
pub use harness::{Harness, SchedulerError, SortTiming};
pub use measure::{Timer, as_millis_f64, time_ms};
pub use options::{BenchOption, OptionError, OptionType, ResolvedOptions};
pub use pool::Pool;
pub use registry::{AlgorithmDescriptor, Registry};
pub use sorter::{InstanceId, Sorter, SorterInstance, ValidationState};
pub use validation::{
    FIXTURE_COUNT, FIXTURE_LEN, Fixture, FixtureOutcome, InstanceValidation, RANDOM_FIXTURE_BOUND,
    ValidationReport, ValidationSummary, Validator, is_ordered,
};
