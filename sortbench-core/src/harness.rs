//! Benchmark Harness
//!
//! Ties the registry, pool, validator and benchmark kinds together and acts
//! as the scheduler: it runs one benchmark at a time over the validated pool
//! and keeps the last completed run for export.
//!
//! ## Data Flow
//!
//! ```text
//! register(descriptor)
//!        │
//!        ▼
//! instantiate_all_into_pool()   failures logged and skipped
//!        │
//!        ▼
//! validate()                    marks instances Passed / Failed
//!        │
//!        ▼
//! execute_benchmark(kind)       before_run → run(pool) → BenchmarkRun
//!        │
//!        ▼
//! last_run()                    consumed by the report crate
//! ```

use crate::benchmark::{Benchmark, BenchmarkRun};
use crate::error::{InstantiationError, PoolError, SetupError, panic_message};
use crate::measure::time_ms;
use crate::options::{OptionError, ResolvedOptions};
use crate::pool::Pool;
use crate::registry::{AlgorithmDescriptor, Registry};
use crate::sorter::{InstanceId, SorterInstance};
use crate::validation::{ValidationReport, Validator};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from executing a benchmark
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// An option override was rejected
    #[error(transparent)]
    Option(#[from] OptionError),

    /// A sort call panicked during a timed run; no result was recorded
    #[error("benchmark '{benchmark}' aborted: {message}")]
    RunAborted {
        /// Benchmark display name
        benchmark: String,
        /// Panic message
        message: String,
    },
}

/// Timing of one pooled instance from [`Harness::sort_once`]
#[derive(Debug, Clone, PartialEq)]
pub struct SortTiming {
    /// Pooled instance
    pub id: InstanceId,
    /// Algorithm name
    pub name: String,
    /// Wall time of the single sort
    pub elapsed_ms: f64,
}

/// Registry, pool and scheduler for one benchmarking session
#[derive(Default)]
pub struct Harness {
    registry: Registry,
    pool: Pool,
    validator: Validator,
    benchmarks: Vec<Box<dyn Benchmark>>,
    last_run: Option<BenchmarkRun>,
}

impl Harness {
    /// Empty harness with an entropy-seeded validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `validator` for subsequent validation passes
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    // ─── Registry ────────────────────────────────────────────────────────────

    /// Register (or replace) an algorithm
    pub fn register(&mut self, descriptor: AlgorithmDescriptor) {
        self.registry.register(descriptor);
    }

    /// The algorithm registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registered algorithm names, sorted
    pub fn list_registered(&self) -> Vec<&str> {
        self.registry.list_registered()
    }

    /// Build an instance of `name` without pooling it
    pub fn instantiate(&self, name: &str) -> Result<SorterInstance, InstantiationError> {
        self.registry.instantiate(name)
    }

    // ─── Pool ────────────────────────────────────────────────────────────────

    /// The current pool
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Set up `instance` and add it to the pool
    pub fn add_to_pool(&mut self, instance: SorterInstance) -> Result<InstanceId, SetupError> {
        self.pool.add(instance).inspect_err(|err| warn!(%err, "instance not pooled"))
    }

    /// Instantiate `name` and add it to the pool
    pub fn instantiate_into_pool(&mut self, name: &str) -> Result<InstanceId, PoolError> {
        let instance = self
            .instantiate(name)
            .inspect_err(|err| warn!(%err, "instantiation failed"))?;
        Ok(self.add_to_pool(instance)?)
    }

    /// Pool one instance of every registered algorithm.
    ///
    /// Failures are logged and skipped; the ids of pooled instances are returned.
    pub fn instantiate_all_into_pool(&mut self) -> Vec<InstanceId> {
        self.instantiate_matching_into_pool(|_| true)
    }

    /// Pool one instance of every registered algorithm whose name satisfies `filter`
    pub fn instantiate_matching_into_pool<F>(&mut self, filter: F) -> Vec<InstanceId>
    where
        F: Fn(&str) -> bool,
    {
        let names: Vec<String> = self
            .registry
            .list_registered()
            .into_iter()
            .filter(|name| filter(*name))
            .map(str::to_string)
            .collect();

        names
            .iter()
            .filter_map(|name| self.instantiate_into_pool(name).ok())
            .collect()
    }

    /// Remove an instance by identity; `None` if it was not pooled
    pub fn remove_from_pool(&mut self, id: InstanceId) -> Option<SorterInstance> {
        self.pool.remove(id)
    }

    // ─── Validation ──────────────────────────────────────────────────────────

    /// Run the correctness battery over the pool
    pub fn validate(&mut self) -> ValidationReport {
        let report = self.validator.validate(&mut self.pool);
        let summary = report.summary();
        info!(
            passed = summary.passed,
            failed = summary.failed,
            "validation complete"
        );
        report
    }

    /// Time one sort of a copy of `array` per pooled instance
    pub fn sort_once(&mut self, array: &[i32]) -> Vec<SortTiming> {
        self.pool
            .iter_mut()
            .map(|(id, instance)| {
                let input = array.to_vec();
                let (_, elapsed_ms) = time_ms(|| instance.sort(input));
                info!(instance = %id, name = instance.name(), elapsed_ms, "sorted");
                SortTiming {
                    id,
                    name: instance.name().to_string(),
                    elapsed_ms,
                }
            })
            .collect()
    }

    // ─── Benchmarks ──────────────────────────────────────────────────────────

    /// Register a benchmark kind, replacing one with the same name
    pub fn add_benchmark(&mut self, benchmark: Box<dyn Benchmark>) {
        self.benchmarks.retain(|b| b.name() != benchmark.name());
        self.benchmarks.push(benchmark);
    }

    /// Registered benchmark names, in registration order
    pub fn available_benchmarks(&self) -> Vec<&str> {
        self.benchmarks.iter().map(|b| b.name()).collect()
    }

    /// Look up a registered benchmark
    pub fn benchmark(&self, name: &str) -> Option<&dyn Benchmark> {
        self.benchmarks
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
    }

    /// Run a registered benchmark by name.
    ///
    /// Unknown names are a no-op and return `Ok(None)`.
    pub fn execute_by_name(
        &mut self,
        name: &str,
        overrides: &[(&str, f64)],
    ) -> Result<Option<&BenchmarkRun>, SchedulerError> {
        let Some(index) = self.benchmarks.iter().position(|b| b.name() == name) else {
            warn!(benchmark = name, "unknown benchmark, skipping");
            return Ok(None);
        };

        let run = run_benchmark(self.benchmarks[index].as_mut(), &mut self.pool, overrides)?;
        Ok(Some(&*self.last_run.insert(run)))
    }

    /// Run `benchmark` over the pool and make it the last completed run
    pub fn execute_benchmark(
        &mut self,
        benchmark: &mut dyn Benchmark,
        overrides: &[(&str, f64)],
    ) -> Result<&BenchmarkRun, SchedulerError> {
        let run = run_benchmark(benchmark, &mut self.pool, overrides)?;
        Ok(&*self.last_run.insert(run))
    }

    /// The last completed run, if any benchmark has finished
    pub fn last_run(&self) -> Option<&BenchmarkRun> {
        self.last_run.as_ref()
    }
}

/// Resolve options, then drive the benchmark lifecycle
fn run_benchmark(
    benchmark: &mut dyn Benchmark,
    pool: &mut Pool,
    overrides: &[(&str, f64)],
) -> Result<BenchmarkRun, SchedulerError> {
    let name = benchmark.name().to_string();
    let options = ResolvedOptions::resolve(&benchmark.configuration_options(), overrides)?;
    info!(benchmark = %name, pool = pool.len(), "starting benchmark");

    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        benchmark.before_run(&options);
        benchmark.run(pool, &options)
    }));
    let total_duration_ms = start.elapsed().as_secs_f64() * 1_000.0;

    let results = outcome.map_err(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(benchmark = %name, %message, "benchmark aborted");
        SchedulerError::RunAborted {
            benchmark: name.clone(),
            message,
        }
    })?;

    let mut resolved: Vec<(String, f64)> = options
        .iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    resolved.sort_by(|a, b| a.0.cmp(&b.0));

    info!(
        benchmark = %name,
        candidates = results.len(),
        total_duration_ms,
        "benchmark complete"
    );

    Ok(BenchmarkRun {
        benchmark: name,
        options: resolved,
        metric_names: benchmark
            .metric_names()
            .iter()
            .map(|m| m.to_string())
            .collect(),
        results,
        total_duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{MergeSort, StdSort};
    use crate::benchmark::{CandidateResult, MetricSet};
    use crate::deviation::{ARRAY_SIZE, DeviationBenchmark, ITERATIONS};
    use crate::options::BenchOption;
    use crate::sorter::Sorter;

    struct Identity;

    impl Sorter for Identity {
        fn sort(&mut self, input: Vec<i32>) -> Vec<i32> {
            input
        }
    }

    /// Passes validation, then panics on anything larger than the fixtures
    struct Fragile;

    impl Sorter for Fragile {
        fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
            if input.len() > 1000 {
                panic!("fragile sorter gave up");
            }
            input.sort();
            input
        }
    }

    /// Counts how often each lifecycle hook fires
    #[derive(Default)]
    struct Counting {
        before: usize,
        runs: usize,
    }

    impl Benchmark for Counting {
        fn name(&self) -> &str {
            "Counting"
        }

        fn configuration_options(&self) -> Vec<BenchOption> {
            vec![BenchOption::number("n", 1.0)]
        }

        fn metric_names(&self) -> &'static [&'static str] {
            &["calls"]
        }

        fn before_run(&mut self, _options: &ResolvedOptions) {
            self.before += 1;
        }

        fn run(&mut self, pool: &mut Pool, _options: &ResolvedOptions) -> Vec<CandidateResult> {
            self.runs += 1;
            pool.eligible_mut()
                .map(|(id, instance)| {
                    let mut metrics = MetricSet::new();
                    metrics.set("calls", self.runs as f64);
                    CandidateResult {
                        id,
                        name: instance.name().to_string(),
                        metrics,
                        samples_ms: Vec::new(),
                    }
                })
                .collect()
        }
    }

    fn harness() -> Harness {
        let mut harness = Harness::new().with_validator(Validator::with_seed(1));
        harness.register(AlgorithmDescriptor::of::<StdSort>("StdSort"));
        harness.register(AlgorithmDescriptor::of::<MergeSort>("MergeSort"));
        harness.register(AlgorithmDescriptor::new("Identity", || Ok(Box::new(Identity) as Box<dyn Sorter>)));
        harness
    }

    #[test]
    fn test_instantiate_all_skips_failures() {
        let mut harness = harness();
        harness.register(AlgorithmDescriptor::new("Broken", || Err("nope".into())));

        let ids = harness.instantiate_all_into_pool();
        assert_eq!(ids.len(), 3);
        assert_eq!(harness.pool().len(), 3);
    }

    #[test]
    fn test_instantiate_without_pooling() {
        let harness = harness();
        let instance = harness.instantiate("StdSort").unwrap();
        assert_eq!(instance.name(), "StdSort");
        assert!(harness.pool().is_empty());
        assert!(harness.instantiate("Nope").is_err());
    }

    #[test]
    fn test_same_algorithm_pooled_twice() {
        let mut harness = harness();
        let a = harness.instantiate_into_pool("StdSort").unwrap();
        let b = harness.instantiate_into_pool("StdSort").unwrap();
        assert_ne!(a, b);

        harness.remove_from_pool(a);
        assert!(harness.remove_from_pool(a).is_none());
        assert_eq!(harness.pool().len(), 1);
    }

    #[test]
    fn test_no_run_before_execution() {
        let harness = harness();
        assert!(harness.last_run().is_none());
    }

    #[test]
    fn test_execute_benchmark_lifecycle() {
        let mut harness = harness();
        harness.instantiate_all_into_pool();
        harness.validate();

        let mut bench = Counting::default();
        let run = harness.execute_benchmark(&mut bench, &[]).unwrap();
        assert_eq!(run.benchmark, "Counting");
        assert_eq!(run.metric_names, vec!["calls".to_string()]);
        assert_eq!(run.results.len(), 2);
        assert_eq!(run.option("n"), Some(1.0));

        assert_eq!(bench.before, 1);
        assert_eq!(bench.runs, 1);
        assert!(harness.last_run().is_some());
    }

    #[test]
    fn test_execute_by_name() {
        let mut harness = harness();
        harness.add_benchmark(Box::new(DeviationBenchmark::with_seed(4)));
        harness.instantiate_all_into_pool();
        harness.validate();

        assert!(harness.execute_by_name("Missing", &[]).unwrap().is_none());
        assert!(harness.last_run().is_none());

        let run = harness
            .execute_by_name(DeviationBenchmark::NAME, &[(ARRAY_SIZE, 100.0), (ITERATIONS, 3.0)])
            .unwrap()
            .unwrap();
        assert_eq!(run.results.len(), 2);
        assert_eq!(run.option(ARRAY_SIZE), Some(100.0));
    }

    #[test]
    fn test_last_run_is_replaced() {
        let mut harness = harness();
        harness.instantiate_all_into_pool();
        harness.validate();

        let mut bench = Counting::default();
        harness.execute_benchmark(&mut bench, &[]).unwrap();
        harness.execute_benchmark(&mut bench, &[]).unwrap();

        let run = harness.last_run().unwrap();
        assert_eq!(run.results[0].metrics.get("calls"), Some(2.0));
    }

    #[test]
    fn test_bad_option_is_rejected_before_running() {
        let mut harness = harness();
        let mut bench = Counting::default();

        let err = harness
            .execute_benchmark(&mut bench, &[("bogus", 1.0)])
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Option(OptionError::UnknownOption(_))));
        assert_eq!(bench.before, 0);
        assert!(harness.last_run().is_none());
    }

    #[test]
    fn test_panic_during_timed_run_aborts() {
        let mut harness = harness();
        harness.register(AlgorithmDescriptor::new("Fragile", || Ok(Box::new(Fragile) as Box<dyn Sorter>)));
        harness.instantiate_all_into_pool();
        harness.validate();

        let mut bench = DeviationBenchmark::with_seed(1);
        let err = harness
            .execute_benchmark(&mut bench, &[(ARRAY_SIZE, 2000.0), (ITERATIONS, 2.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::RunAborted { ref message, .. } if message == "fragile sorter gave up"
        ));
        assert!(harness.last_run().is_none());
    }

    #[test]
    fn test_available_benchmarks() {
        let mut harness = Harness::new();
        harness.add_benchmark(Box::new(DeviationBenchmark::new()));
        harness.add_benchmark(Box::new(Counting::default()));
        harness.add_benchmark(Box::new(DeviationBenchmark::new()));

        assert_eq!(
            harness.available_benchmarks(),
            vec!["Counting", DeviationBenchmark::NAME]
        );
        assert!(harness.benchmark("Counting").is_some());
        assert!(harness.benchmark("Nope").is_none());
    }

    #[test]
    fn test_sort_once_times_every_instance() {
        let mut harness = harness();
        harness.instantiate_all_into_pool();

        let timings = harness.sort_once(&[3, 1, 2]);
        assert_eq!(timings.len(), 3);
        assert!(timings.iter().all(|t| t.elapsed_ms >= 0.0));
    }
}
