//! Custom error types for the weather cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Fatal errors
//! (ingestion, date detection) abort the run; everything else is either
//! recovered at a stage boundary or reflected in row counts only.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input file could not be read or parsed as CSV.
    #[error("Failed to read '{}': {reason}", .path.display())]
    Ingestion { path: PathBuf, reason: String },

    /// No plausible date column was found by either detection rule.
    #[error(
        "Could not detect a date column: no column name contains 'date' or 'time' \
         and the first column does not look date-like"
    )]
    DateDetection,

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Imputation failed.
    #[error("Failed to impute missing values in column '{column}': {reason}")]
    ImputationFailed { column: String, reason: String },

    /// Monthly aggregation failed. Callers catch this at the aggregation
    /// boundary and continue without the aggregate artifact.
    #[error("Failed to compute monthly aggregates: {0}")]
    Aggregation(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PipelineError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error must abort the whole run.
    ///
    /// Ingestion and date detection are mandatory stages; everything else is
    /// recoverable at some boundary.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Ingestion { .. } | Self::DateDetection => true,
            Self::WithContext { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PipelineError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fatal() {
        assert!(
            PipelineError::Ingestion {
                path: PathBuf::from("data.csv"),
                reason: "missing".to_string(),
            }
            .is_fatal()
        );
        assert!(PipelineError::DateDetection.is_fatal());
        assert!(!PipelineError::Aggregation("bad types".to_string()).is_fatal());
        assert!(!PipelineError::ColumnNotFound("temp".to_string()).is_fatal());
    }

    #[test]
    fn test_with_context() {
        let error = PipelineError::ColumnNotFound("rainfall".to_string())
            .with_context("While aggregating");
        assert!(error.to_string().contains("While aggregating"));
        assert!(error.to_string().contains("rainfall"));
        // Context does not change fatality of the underlying error
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_context_preserves_fatality() {
        let error = PipelineError::DateDetection.with_context("During detection");
        assert!(error.is_fatal());
    }
}
