#![warn(missing_docs)]
//! Sortbench Report - Result Export and Presentation
//!
//! Consumes a completed `BenchmarkRun` and renders it:
//! - Tabular view (rows = candidates, columns = metrics)
//! - CSV (spreadsheet-compatible)
//! - JSON (machine-readable, with metadata and raw samples)
//! - Labelled lines for human-readable output
//!
//! Export files are named `<benchmark> yyyy-MM-dd HH-mm-ss.<ext>` and placed
//! in a results directory created on demand.

mod csv_report;
mod error;
mod export;
mod json;
mod present;
mod report;
mod table;

#[cfg(test)]
mod test_support;

pub use csv_report::{generate_csv_report, write_csv};
pub use error::ExportError;
pub use export::{
    DEFAULT_EXPORT_DIR, ExportFormat, Exporter, TIMESTAMP_FORMAT, export_file_name,
    export_results,
};
pub use json::generate_json_report;
pub use present::{DeviationPresenter, MetricListPresenter, ResultPresenter, presenter_for};
pub use report::{Report, ReportMeta, SystemInfo, build_report};
pub use table::{ALGORITHM_COLUMN, INSTANCE_COLUMN, ResultRow, ResultTable};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// JSON with metadata
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl OutputFormat {
    /// File format used when exporting alongside this output.
    ///
    /// Human output exports as CSV.
    pub fn export_format(self) -> ExportFormat {
        match self {
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Human | OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
