//! JSON report file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gencheck_domain::RunReport;
use thiserror::Error;
use tracing::info;

/// Errors writing the report file.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file could not be written.
    #[error("failed to write report to {path}: {source}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Writes `report` to `path` as pretty-printed JSON, replacing any existing
/// file.
///
/// # Errors
///
/// Returns `ReportError` if serialization or the write fails.
pub fn write_json_report(path: &Path, report: &RunReport) -> Result<(), ReportError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}
