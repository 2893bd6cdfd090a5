//! Column classification: header normalization, numeric coercion, and kind
//! tagging.

mod coercion;
mod headers;

pub(crate) use coercion::coerce_string_columns;
pub(crate) use headers::normalize_headers;

use crate::error::Result;
use crate::types::{ColumnKind, ColumnMeta};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;

/// Classifies columns: normalizes headers, coerces numeric-looking text
/// columns, and tags every column with its inferred kind.
pub struct ColumnClassifier;

impl ColumnClassifier {
    /// Normalize all column headers in place.
    ///
    /// Returns processing-step descriptions for headers that changed.
    pub fn normalize_headers(df: &mut DataFrame) -> Result<Vec<String>> {
        normalize_headers(df)
    }

    /// Coerce numeric-looking String columns to numeric.
    ///
    /// `exempt` columns (the detected date column) are never touched, so that
    /// date strings are not cannibalized into floats before parsing.
    pub fn coerce_numeric(df: &mut DataFrame, exempt: &[String]) -> Result<Vec<String>> {
        coerce_string_columns(df, exempt)
    }

    /// Tag every column with its kind, in original column order.
    ///
    /// Numeric dtypes (native or coerced) become [`ColumnKind::Numeric`];
    /// everything else is [`ColumnKind::Categorical`]. The date resolver
    /// upgrades its column to [`ColumnKind::Temporal`] afterwards.
    pub fn classify(df: &DataFrame) -> Vec<ColumnMeta> {
        df.get_columns()
            .iter()
            .map(|col| {
                let kind = if is_numeric_dtype(col.dtype()) {
                    ColumnKind::Numeric
                } else {
                    ColumnKind::Categorical
                };
                ColumnMeta::new(col.name().to_string(), kind)
            })
            .collect()
    }
}
