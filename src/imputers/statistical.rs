//! Statistical imputation: interpolation-then-mean for numeric columns, mode
//! for categorical columns.

use super::interpolate::interpolate_bidirectional;
use crate::error::Result;
use crate::utils::{fill_string_nulls, series_to_f64_vec, string_mode};
use polars::prelude::*;
use tracing::{debug, warn};

/// Fills missing values without reordering rows or changing column kinds.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Impute a numeric column: bidirectional linear interpolation over the
    /// current (temporal) row order, then mean fill for anything still null.
    ///
    /// A column with zero valid values has nothing to interpolate from and no
    /// mean; it is left untouched with a warning. Columns with no nulls are
    /// not rewritten.
    pub fn impute_numeric(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let nulls_before = series.null_count();
        if nulls_before == 0 {
            return Ok(());
        }

        let mut values = series_to_f64_vec(&series)?;
        if values.iter().all(|v| v.is_none()) {
            warn!(
                "Column '{}' has no valid values; leaving it unfilled",
                col_name
            );
            processing_steps.push(format!(
                "Left '{}' unfilled (no valid values to impute from)",
                col_name
            ));
            return Ok(());
        }

        interpolate_bidirectional(&mut values);

        let remaining = values.iter().filter(|v| v.is_none()).count();
        if remaining > 0 {
            let available: Vec<f64> = values.iter().copied().flatten().collect();
            let mean = available.iter().sum::<f64>() / available.len() as f64;
            for value in values.iter_mut() {
                if value.is_none() {
                    *value = Some(mean);
                }
            }
            debug!(
                "Mean-filled {} leftover nulls in '{}' with {:.3}",
                remaining, col_name, mean
            );
        }

        df.replace(col_name, Series::new(col_name.into(), values))?;
        processing_steps.push(format!(
            "Interpolated '{}': {} gaps filled ({} by mean)",
            col_name, nulls_before, remaining
        ));
        Ok(())
    }

    /// Impute a categorical column with its mode; an entirely-null column is
    /// filled with the empty string rather than failing.
    pub fn impute_categorical(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let nulls_before = series.null_count();
        if nulls_before == 0 {
            return Ok(());
        }

        let (fill_value, method) = match string_mode(&series) {
            Some(mode) => (mode, "mode"),
            None => (String::new(), "empty string"),
        };

        let filled = fill_string_nulls(&series, &fill_value)?;
        df.replace(col_name, filled)?;
        processing_steps.push(format!(
            "Filled '{}' with {}: '{}' ({} cells)",
            col_name, method, fill_value, nulls_before
        ));
        Ok(())
    }
}
