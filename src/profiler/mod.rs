//! Statistics engine: per-numeric-column summaries over the cleaned table.

mod statistics;

pub(crate) use statistics::column_statistics;

use crate::error::Result;
use crate::types::{ColumnKind, ColumnMeta, ColumnStats};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Computes summary statistics for every numeric column.
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Compute {mean, min, max, sample std} for each numeric column, keyed by
    /// normalized column name.
    ///
    /// Columns that remained all-null through imputation produce no entry.
    pub fn compute(
        df: &DataFrame,
        columns: &[ColumnMeta],
    ) -> Result<BTreeMap<String, ColumnStats>> {
        let mut stats = BTreeMap::new();

        for meta in columns {
            if meta.kind != ColumnKind::Numeric {
                continue;
            }
            let Ok(col) = df.column(&meta.name) else {
                continue;
            };
            if !is_numeric_dtype(col.dtype()) {
                continue;
            }

            match column_statistics(col.as_materialized_series())? {
                Some(column_stats) => {
                    stats.insert(meta.name.clone(), column_stats);
                }
                None => {
                    debug!("Skipping statistics for all-null column '{}'", meta.name);
                }
            }
        }

        Ok(stats)
    }
}
