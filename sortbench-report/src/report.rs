//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sortbench_core::{BenchmarkRun, ValidationReport};

/// Complete report for one benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Version, timestamp and machine
    pub meta: ReportMeta,
    /// The completed run
    pub run: BenchmarkRun,
    /// Validation pass that gated the run, when available
    pub validation: Option<ValidationReport>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Sortbench version that produced the report
    pub version: String,
    /// Time the report was built
    pub timestamp: DateTime<Utc>,
    /// Machine the run executed on
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system family
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Available parallelism, 1 when unknown
    pub cpu_cores: u32,
}

impl SystemInfo {
    /// Describe the current machine
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_cores: std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(1),
        }
    }
}

/// Wrap a completed run with metadata
pub fn build_report(run: &BenchmarkRun, validation: Option<&ValidationReport>) -> Report {
    Report {
        meta: ReportMeta {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system: SystemInfo::current(),
        },
        run: run.clone(),
        validation: validation.cloned(),
    }
}
