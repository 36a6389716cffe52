//! Shared fixtures for unit tests

use sortbench_core::{BenchmarkRun, CandidateResult, InstanceId, MetricSet};

pub(crate) fn sample_run() -> BenchmarkRun {
    let mut fast = MetricSet::new();
    fast.set("range", 2.0);
    fast.set("standard_deviation", 0.5);
    let mut slow = MetricSet::new();
    slow.set("range", 8.0);

    BenchmarkRun {
        benchmark: "Deviation Benchmark".to_string(),
        options: vec![("iterations".to_string(), 5.0)],
        metric_names: vec!["range".to_string(), "standard_deviation".to_string()],
        results: vec![
            CandidateResult {
                id: InstanceId::from(0),
                name: "QuickSort".to_string(),
                metrics: fast,
                samples_ms: vec![1.0, 3.0],
            },
            CandidateResult {
                id: InstanceId::from(3),
                name: "HeapSort".to_string(),
                metrics: slow,
                samples_ms: vec![2.0, 10.0],
            },
        ],
        total_duration_ms: 16.0,
    }
}
