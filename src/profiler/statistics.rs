//! Per-column statistical summaries.

use crate::error::Result;
use crate::types::ColumnStats;
use crate::utils::sample_std;
use polars::prelude::*;

/// Compute {mean, min, max, sample std} over a column's non-null values.
///
/// Returns `None` for a column with zero non-null values; such columns get
/// no statistics entry at all, never a zero-filled one. A single-value column
/// reports `std: None` (the n-1 estimator is undefined there).
pub(crate) fn column_statistics(series: &Series) -> Result<Option<ColumnStats>> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(None);
    }

    let float = non_null.cast(&DataType::Float64)?;
    let values: Vec<f64> = float.f64()?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(None);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std = sample_std(&values, mean);

    Ok(Some(ColumnStats {
        mean,
        min,
        max,
        std,
    }))
}
