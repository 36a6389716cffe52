//! Tabular View of a Run
//!
//! Rows are candidates, columns are the benchmark kind's metric names.

use serde::{Deserialize, Serialize};
use sortbench_core::BenchmarkRun;

/// Leading column holding the algorithm name
pub const ALGORITHM_COLUMN: &str = "algorithm";
/// Second column holding the instance id
pub const INSTANCE_COLUMN: &str = "instance";

/// One candidate's row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Algorithm name
    pub algorithm: String,
    /// Raw instance id
    pub instance: u64,
    /// Values in `ResultTable::metrics` order; `None` where a metric is missing
    pub values: Vec<Option<f64>>,
}

/// Stable tabular representation of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Benchmark display name
    pub benchmark: String,
    /// Column names after the leading algorithm and instance columns
    pub metrics: Vec<String>,
    /// One row per candidate, in pool order
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Build the table in pool order
    pub fn from_run(run: &BenchmarkRun) -> Self {
        let rows = run
            .results
            .iter()
            .map(|result| ResultRow {
                algorithm: result.name.clone(),
                instance: result.id.get(),
                values: run
                    .metric_names
                    .iter()
                    .map(|metric| result.metrics.get(metric))
                    .collect(),
            })
            .collect();

        Self {
            benchmark: run.benchmark.clone(),
            metrics: run.metric_names.clone(),
            rows,
        }
    }

    /// Header row: algorithm, instance, then metric names
    pub fn header(&self) -> Vec<&str> {
        [ALGORITHM_COLUMN, INSTANCE_COLUMN]
            .into_iter()
            .chain(self.metrics.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_run;

    #[test]
    fn test_table_from_run() {
        let table = ResultTable::from_run(&sample_run());

        assert_eq!(table.benchmark, "Deviation Benchmark");
        assert_eq!(
            table.header(),
            vec!["algorithm", "instance", "range", "standard_deviation"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].algorithm, "QuickSort");
        assert_eq!(table.rows[0].values, vec![Some(2.0), Some(0.5)]);
        assert_eq!(table.rows[1].instance, 3);
        assert_eq!(table.rows[1].values, vec![Some(8.0), None]);
    }
}
