//! Export errors

use thiserror::Error;

/// Failure while rendering or writing results
#[derive(Debug, Error)]
pub enum ExportError {
    /// Creating the directory or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
