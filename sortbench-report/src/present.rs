//! Result Presentation
//!
//! Turns a candidate's metrics into labelled lines for display. This runs
//! after a benchmark has finished and never touches the timed path.

use sortbench_core::{
    BenchmarkRun, CandidateResult, DeviationBenchmark, METRIC_COEFFICIENT_OF_VARIATION,
    METRIC_RANGE, METRIC_STANDARD_DEVIATION,
};

/// Renders one candidate's result as display lines
pub trait ResultPresenter {
    /// Labelled lines for `result`, without the candidate header
    fn present(&self, result: &CandidateResult) -> Vec<String>;
}

/// Presenter for the deviation benchmark
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviationPresenter;

impl ResultPresenter for DeviationPresenter {
    fn present(&self, result: &CandidateResult) -> Vec<String> {
        [
            ("Range", METRIC_RANGE, "ms"),
            ("Standard deviation", METRIC_STANDARD_DEVIATION, "ms"),
            ("Coefficient of variation", METRIC_COEFFICIENT_OF_VARIATION, "%"),
        ]
        .into_iter()
        .filter_map(|(label, metric, unit)| {
            result
                .metrics
                .get(metric)
                .map(|value| format!("{}: {:.2} {}", label, value, unit))
        })
        .collect()
    }
}

/// Fallback presenter listing metrics in column order
#[derive(Debug, Clone, Default)]
pub struct MetricListPresenter {
    metrics: Vec<String>,
}

impl MetricListPresenter {
    /// Present `metrics` in the given order
    pub fn new(metrics: Vec<String>) -> Self {
        Self { metrics }
    }
}

impl ResultPresenter for MetricListPresenter {
    fn present(&self, result: &CandidateResult) -> Vec<String> {
        self.metrics
            .iter()
            .map(|metric| match result.metrics.get(metric) {
                Some(value) => format!("{}: {:.2}", metric, value),
                None => format!("{}: -", metric),
            })
            .collect()
    }
}

/// Presenter matching the benchmark that produced `run`
pub fn presenter_for(run: &BenchmarkRun) -> Box<dyn ResultPresenter> {
    match run.benchmark.as_str() {
        DeviationBenchmark::NAME => Box::new(DeviationPresenter),
        _ => Box::new(MetricListPresenter::new(run.metric_names.clone())),
    }
}
