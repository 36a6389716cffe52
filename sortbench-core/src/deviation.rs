//! Deviation Benchmark
//!
//! Sorts the same random workload repeatedly with every validated instance and
//! reports how much the timings spread: range, sample standard deviation and
//! coefficient of variation.
//!
//! Timing is strictly sequential. Reducing the collected samples to
//! statistics happens only after every instance has been timed, and is
//! parallelised with Rayon since it no longer affects measurements.

use crate::benchmark::{Benchmark, CandidateResult, MetricSet};
use crate::measure::time_ms;
use crate::options::{BenchOption, ResolvedOptions};
use crate::pool::Pool;
use crate::sorter::InstanceId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use sortbench_stats::compute_summary;
use tracing::{debug, info};

/// Option: number of elements in the workload
pub const ARRAY_SIZE: &str = "array-size";
/// Option: timed sorts per instance
pub const ITERATIONS: &str = "iterations";

/// Default workload length
pub const DEFAULT_ARRAY_SIZE: usize = 500_000;
/// Default timed sorts per instance
pub const DEFAULT_ITERATIONS: usize = 50;
/// Largest accepted workload length
pub const MAX_ARRAY_SIZE: usize = 50_000_000;
/// Largest accepted number of timed sorts per instance
pub const MAX_ITERATIONS: usize = 10_000;

/// Metric: `max - min` in milliseconds
pub const METRIC_RANGE: &str = "range";
/// Metric: sample standard deviation in milliseconds
pub const METRIC_STANDARD_DEVIATION: &str = "standard_deviation";
/// Metric: standard deviation as a percentage of the mean
pub const METRIC_COEFFICIENT_OF_VARIATION: &str = "coefficient_of_variation";

const METRICS: &[&str] = &[
    METRIC_RANGE,
    METRIC_STANDARD_DEVIATION,
    METRIC_COEFFICIENT_OF_VARIATION,
];

/// Timing-variability benchmark over one shared random workload
#[derive(Debug, Default)]
pub struct DeviationBenchmark {
    seed: Option<u64>,
    workload: Vec<i32>,
}

impl DeviationBenchmark {
    /// Display name
    pub const NAME: &'static str = "Deviation Benchmark";

    /// Benchmark with an entropy-seeded workload
    pub fn new() -> Self {
        Self::default()
    }

    /// Benchmark whose workload is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            workload: Vec::new(),
        }
    }

    /// The workload generated by the last `before_run`
    pub fn workload(&self) -> &[i32] {
        &self.workload
    }
}

impl Benchmark for DeviationBenchmark {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration_options(&self) -> Vec<BenchOption> {
        vec![
            BenchOption::number(ARRAY_SIZE, DEFAULT_ARRAY_SIZE as f64)
                .integer()
                .with_min(0.0)
                .with_max(MAX_ARRAY_SIZE as f64)
                .with_description("Number of random elements to sort"),
            BenchOption::number(ITERATIONS, DEFAULT_ITERATIONS as f64)
                .integer()
                .with_min(1.0)
                .with_max(MAX_ITERATIONS as f64)
                .with_description("Timed sorts per algorithm"),
        ]
    }

    fn metric_names(&self) -> &'static [&'static str] {
        METRICS
    }

    fn before_run(&mut self, options: &ResolvedOptions) {
        let size = options.count(ARRAY_SIZE, DEFAULT_ARRAY_SIZE);
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.workload = (0..size).map(|_| rng.r#gen::<i32>()).collect();
        debug!(size, "generated deviation workload");
    }

    fn run(&mut self, pool: &mut Pool, options: &ResolvedOptions) -> Vec<CandidateResult> {
        let iterations = options.count(ITERATIONS, DEFAULT_ITERATIONS).max(1);

        let mut timings: Vec<(InstanceId, String, Vec<f64>)> = Vec::new();
        for (id, instance) in pool.eligible_mut() {
            let mut samples = Vec::with_capacity(iterations);
            for _ in 0..iterations {
                let input = self.workload.clone();
                let (_, elapsed) = time_ms(|| instance.sort(input));
                samples.push(elapsed);
            }
            info!(instance = %id, name = instance.name(), iterations, "timed");
            timings.push((id, instance.name().to_string(), samples));
        }

        timings
            .into_par_iter()
            .filter(|(_, _, samples)| !samples.is_empty())
            .map(|(id, name, samples)| {
                let stats = compute_summary(&samples);
                let mut metrics = MetricSet::new();
                metrics.set(METRIC_RANGE, stats.range);
                metrics.set(METRIC_STANDARD_DEVIATION, stats.std_dev);
                metrics.set(METRIC_COEFFICIENT_OF_VARIATION, stats.coefficient_of_variation);
                CandidateResult {
                    id,
                    name,
                    metrics,
                    samples_ms: samples,
                }
            })
            .collect()
    }
}
