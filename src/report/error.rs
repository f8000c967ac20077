//! Errors surfaced by report resolution, compilation and execution.

use std::path::PathBuf;

/// Errors that can occur while running a report.
///
/// None of these are retried or recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown report: {0}")]
    UnknownReport(String),

    #[error("Dataset store unavailable at {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Compiled parameters do not line up with the statement's placeholders.
    /// Always a defect in the catalog or compiler, never in caller input.
    #[error(
        "Filter arity mismatch for report '{report}': statement expects {expected} parameters, compiled {actual}"
    )]
    FilterArityMismatch {
        report: String,
        expected: usize,
        actual: usize,
    },

    #[error("Query for report '{report}' failed: {source}")]
    QueryExecutionFailure {
        report: String,
        #[source]
        source: rusqlite::Error,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

impl ReportError {
    pub(crate) fn query_failure(report: &str, source: rusqlite::Error) -> Self {
        ReportError::QueryExecutionFailure {
            report: report.to_string(),
            source,
        }
    }
}
