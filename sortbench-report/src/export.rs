//! Result Export
//!
//! Writes the last completed run to a timestamped file:
//!
//! ```text
//! Option<&BenchmarkRun> ──► None ──► Ok(false)
//!        │
//!        ▼ Some
//! create results directory (on demand)
//!        │
//!        ▼
//! "<benchmark> yyyy-MM-dd HH-mm-ss.<ext>"  ──► CSV table | JSON report
//! ```

use crate::csv_report::write_csv;
use crate::error::ExportError;
use crate::json::generate_json_report;
use crate::report::build_report;
use crate::table::ResultTable;
use chrono::{DateTime, Local, TimeZone};
use sortbench_core::BenchmarkRun;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory used when none is configured
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Timestamp layout inside export file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// File format written by an [`Exporter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// One row per candidate, one column per metric
    #[default]
    Csv,
    /// Full report with metadata and raw samples
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Base name (no extension) for an export of `benchmark` taken at `timestamp`.
///
/// Path separators in the benchmark name are replaced so the file always lands
/// directly in the export directory.
pub fn export_file_name<Tz>(benchmark: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let name: String = benchmark
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect();
    format!("{} {}", name, timestamp.format(TIMESTAMP_FORMAT))
}

/// Writes runs into a results directory
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
    format: ExportFormat,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_DIR)
    }
}

impl Exporter {
    /// CSV exporter targeting `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            format: ExportFormat::Csv,
        }
    }

    /// Select the file format
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Target directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Selected file format
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Write `run` using the local time as identifier
    pub fn export(&self, run: &BenchmarkRun) -> Result<PathBuf, ExportError> {
        self.export_at(run, &Local::now())
    }

    /// Write `run` using a caller-supplied timestamp; returns the written path
    pub fn export_at<Tz>(
        &self,
        run: &BenchmarkRun,
        timestamp: &DateTime<Tz>,
    ) -> Result<PathBuf, ExportError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        fs::create_dir_all(&self.directory)?;

        let path = self.directory.join(format!(
            "{}.{}",
            export_file_name(&run.benchmark, timestamp),
            self.format.extension()
        ));

        match self.format {
            ExportFormat::Csv => {
                let file = BufWriter::new(File::create(&path)?);
                write_csv(&ResultTable::from_run(run), file)?;
            }
            ExportFormat::Json => {
                let json = generate_json_report(&build_report(run, None))?;
                fs::write(&path, json)?;
            }
        }

        info!(path = %path.display(), benchmark = %run.benchmark, "exported results");
        Ok(path)
    }
}

/// Export the last completed run, if any.
///
/// Returns `Ok(false)` when no benchmark has run yet, `Ok(true)` once the file
/// has been written. I/O failures propagate.
pub fn export_results(
    last_run: Option<&BenchmarkRun>,
    exporter: &Exporter,
) -> Result<bool, ExportError> {
    match last_run {
        Some(run) => {
            exporter.export(run)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
