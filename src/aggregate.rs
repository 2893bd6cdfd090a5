//! Monthly aggregation.
//!
//! Explicit calendar grouping: rows are bucketed by their derived (year,
//! month) fields, buckets sorted ascending, and category-specific aggregation
//! functions applied per bucket. No bucket exists for a month with zero rows;
//! every month with at least one row gets exactly one bucket.

use crate::error::{PipelineError, Result};
use crate::types::{Category, DetectedColumns};
use crate::utils::{is_numeric_dtype, series_to_f64_vec};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Aggregation function applied within a monthly bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BucketStat {
    Mean,
    Min,
    Max,
    Sum,
}

impl BucketStat {
    fn suffix(&self) -> &'static str {
        match self {
            BucketStat::Mean => "mean",
            BucketStat::Min => "min",
            BucketStat::Max => "max",
            BucketStat::Sum => "sum",
        }
    }

    /// Apply over the bucket's non-null values; `None` for an empty bucket.
    fn apply(&self, indices: &[usize], values: &[Option<f64>]) -> Option<f64> {
        let bucket: Vec<f64> = indices.iter().filter_map(|&idx| values[idx]).collect();
        if bucket.is_empty() {
            return None;
        }
        Some(match self {
            BucketStat::Mean => bucket.iter().sum::<f64>() / bucket.len() as f64,
            BucketStat::Min => bucket.iter().copied().fold(f64::INFINITY, f64::min),
            BucketStat::Max => bucket.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            BucketStat::Sum => bucket.iter().sum(),
        })
    }
}

/// Stats computed per category, in output column order.
const CATEGORY_STATS: [(Category, &[BucketStat]); 3] = [
    (
        Category::Temperature,
        &[BucketStat::Mean, BucketStat::Min, BucketStat::Max],
    ),
    (Category::Rainfall, &[BucketStat::Sum, BucketStat::Mean]),
    (Category::Humidity, &[BucketStat::Mean]),
];

/// Resamples the cleaned table into monthly buckets.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Build the monthly aggregate table for the detected categories.
    ///
    /// Returns `Ok(None)` when there is nothing to aggregate (empty table or
    /// no usable category), which is a degradation rather than an error. Unexpected failures
    /// come back as [`PipelineError::Aggregation`] for the caller to catch at
    /// this stage's boundary.
    pub fn aggregate(
        df: &DataFrame,
        detected: &DetectedColumns,
        notices: &mut Vec<String>,
    ) -> Result<Option<DataFrame>> {
        if df.height() == 0 {
            notices.push("Monthly aggregation skipped: no rows retained".to_string());
            return Ok(None);
        }

        let years = month_key_column(df, "year")?;
        let months = month_key_column(df, "month")?;

        let mut buckets: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
        for idx in 0..df.height() {
            buckets.entry((years[idx], months[idx])).or_default().push(idx);
        }
        debug!("{} monthly buckets", buckets.len());

        let mut out_columns: Vec<Column> = vec![
            Series::new(
                "year".into(),
                buckets.keys().map(|k| k.0).collect::<Vec<i32>>(),
            )
            .into_column(),
            Series::new(
                "month".into(),
                buckets.keys().map(|k| k.1).collect::<Vec<i32>>(),
            )
            .into_column(),
        ];

        let mut aggregated_any = false;
        for (category, stats) in CATEGORY_STATS {
            let Some(col_name) = detected.get(category) else {
                continue;
            };
            let Ok(col) = df.column(col_name) else {
                // detection is by name over this same table, so this only
                // happens if the caller passed a foreign map
                return Err(PipelineError::ColumnNotFound(col_name.to_string()));
            };
            if !is_numeric_dtype(col.dtype()) {
                warn!(
                    "Skipping {} aggregates: column '{}' is not numeric",
                    category.as_str(),
                    col_name
                );
                notices.push(format!(
                    "Skipped {} aggregates: column '{}' has no numeric values",
                    category.as_str(),
                    col_name
                ));
                continue;
            }

            let values = series_to_f64_vec(col.as_materialized_series())?;
            if values.iter().all(|v| v.is_none()) {
                warn!(
                    "Skipping {} aggregates: column '{}' is entirely null",
                    category.as_str(),
                    col_name
                );
                notices.push(format!(
                    "Skipped {} aggregates: column '{}' has no numeric values",
                    category.as_str(),
                    col_name
                ));
                continue;
            }
            for stat in stats {
                let bucket_values: Vec<Option<f64>> = buckets
                    .values()
                    .map(|indices| stat.apply(indices, &values))
                    .collect();
                out_columns.push(
                    Series::new(
                        format!("{}_{}", col_name, stat.suffix()).into(),
                        bucket_values,
                    )
                    .into_column(),
                );
            }
            aggregated_any = true;
        }

        if !aggregated_any {
            notices.push(
                "Monthly aggregation skipped: no temperature, rainfall, or humidity column \
                 with numeric values"
                    .to_string(),
            );
            return Ok(None);
        }

        let frame =
            DataFrame::new(out_columns).map_err(|e| PipelineError::Aggregation(e.to_string()))?;
        Ok(Some(frame))
    }
}

/// Extract a derived calendar key column as a dense `Vec<i32>`.
fn month_key_column(df: &DataFrame, name: &str) -> Result<Vec<i32>> {
    let col = df
        .column(name)
        .map_err(|_| PipelineError::Aggregation(format!("missing derived '{}' column", name)))?;
    let cast = col
        .as_materialized_series()
        .cast(&DataType::Int32)
        .map_err(|e| PipelineError::Aggregation(e.to_string()))?;
    let values: Vec<i32> = cast
        .i32()
        .map_err(|e| PipelineError::Aggregation(e.to_string()))?
        .into_iter()
        .flatten()
        .collect();
    if values.len() != df.height() {
        return Err(PipelineError::Aggregation(format!(
            "derived '{}' column contains nulls",
            name
        )));
    }
    Ok(values)
}
