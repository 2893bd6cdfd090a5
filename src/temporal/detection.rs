//! Date column detection heuristics.

use crate::config::DATE_SNIFF_SAMPLE_ROWS;
use crate::error::{PipelineError, Result};
use crate::utils::cell_to_string;
use polars::prelude::*;
use tracing::debug;

/// Substrings that mark a column name as the date column.
pub(crate) const DATE_NAME_MARKERS: [&str; 2] = ["date", "time"];

/// Detect the date column, in priority order:
///
/// 1. The first column (original order) whose name contains "date" or "time"
///    (case-insensitive).
/// 2. Otherwise, sniff the first [`DATE_SNIFF_SAMPLE_ROWS`] values of the
///    first column: with '-' and '/' stripped, at least one sampled value
///    must be a pure digit sequence.
///
/// The digit fallback will happily select a purely numeric non-date column
/// (IDs, codes) when nothing better exists; that is a known limitation of the
/// heuristic, kept as-is.
pub(crate) fn detect_date_column(df: &DataFrame) -> Result<String> {
    for name in df.get_column_names() {
        let lower = name.to_lowercase();
        if DATE_NAME_MARKERS.iter().any(|m| lower.contains(m)) {
            debug!("Date column '{}' selected by name", name);
            return Ok(name.to_string());
        }
    }

    let Some(first) = df.get_columns().first() else {
        return Err(PipelineError::DateDetection);
    };
    let series = first.as_materialized_series();
    let sample_rows = DATE_SNIFF_SAMPLE_ROWS.min(series.len());

    for idx in 0..sample_rows {
        if let Some(raw) = cell_to_string(series, idx) {
            let stripped: String = raw.chars().filter(|c| *c != '-' && *c != '/').collect();
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                debug!(
                    "Date column '{}' selected by digit sniff (sample '{}')",
                    first.name(),
                    raw
                );
                return Ok(first.name().to_string());
            }
        }
    }

    Err(PipelineError::DateDetection)
}
