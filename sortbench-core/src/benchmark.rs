//! Benchmark Capability
//!
//! A benchmark kind owns its workload generation and per-candidate
//! measurement. The scheduler drives it through a fixed lifecycle:
//!
//! ```text
//! configuration_options() ──► resolve overrides
//!        │
//!        ▼
//!   before_run(options)        generate workload, seed randomness
//!        │
//!        ▼
//!   run(pool, options)         time eligible instances, reduce samples
//!        │
//!        ▼
//!   Vec<CandidateResult>  ──►  BenchmarkRun (last completed run)
//! ```
//!
//! Rendering results is not part of this trait; see the report crate's
//! presentation capability.

use crate::options::{BenchOption, ResolvedOptions};
use crate::pool::Pool;
use crate::sorter::InstanceId;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A pluggable benchmark kind
pub trait Benchmark {
    /// Display name, unique among registered benchmarks
    fn name(&self) -> &str;

    /// Options this benchmark reads, with defaults
    fn configuration_options(&self) -> Vec<BenchOption>;

    /// Metric names every candidate result carries, in column order
    fn metric_names(&self) -> &'static [&'static str];

    /// Prepare the workload; called once before `run`
    fn before_run(&mut self, options: &ResolvedOptions);

    /// Measure every eligible pooled instance.
    ///
    /// Instances that have not passed validation must be skipped.
    fn run(&mut self, pool: &mut Pool, options: &ResolvedOptions) -> Vec<CandidateResult>;
}

/// Named numeric metrics for one candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    values: FxHashMap<String, f64>,
}

impl MetricSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metric value
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Get a metric value
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of metrics
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no metric is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Measurement result for one pooled instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    /// Pooled instance that was timed
    pub id: InstanceId,
    /// Algorithm name
    pub name: String,
    /// Metrics named by the benchmark kind
    pub metrics: MetricSet,
    /// Raw timing samples in milliseconds
    pub samples_ms: Vec<f64>,
}

/// A completed benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Benchmark display name
    pub benchmark: String,
    /// Resolved option values, sorted by name
    pub options: Vec<(String, f64)>,
    /// Column order for `results[*].metrics`
    pub metric_names: Vec<String>,
    /// One entry per eligible instance, in pool order
    pub results: Vec<CandidateResult>,
    /// Wall-clock duration of the whole run
    pub total_duration_ms: f64,
}

impl BenchmarkRun {
    /// Result for one instance
    pub fn result_for(&self, id: InstanceId) -> Option<&CandidateResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Resolved value of an option
    pub fn option(&self, name: &str) -> Option<f64> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_set() {
        let mut metrics = MetricSet::new();
        assert!(metrics.is_empty());

        metrics.set("range", 4.0);
        metrics.set("range", 5.0);
        assert_eq!(metrics.get("range"), Some(5.0));
        assert_eq!(metrics.get("mean"), None);
        assert_eq!(metrics.len(), 1);
    }

    #[test]
    fn test_run_lookups() {
        let run = BenchmarkRun {
            benchmark: "Test".to_string(),
            options: vec![("iterations".to_string(), 3.0)],
            metric_names: vec!["range".to_string()],
            results: vec![CandidateResult {
                id: InstanceId(4),
                name: "Std".to_string(),
                metrics: MetricSet::new(),
                samples_ms: vec![1.0],
            }],
            total_duration_ms: 1.0,
        };

        assert_eq!(run.option("iterations"), Some(3.0));
        assert_eq!(run.option("missing"), None);
        assert_eq!(run.result_for(InstanceId(4)).unwrap().name, "Std");
        assert!(run.result_for(InstanceId(5)).is_none());
    }
}
