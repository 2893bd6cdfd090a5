//! Numeric coercion of text columns.
//!
//! A String column becomes numeric only when the count of parseable cells
//! strictly exceeds [`NUMERIC_COERCION_RATIO`] of its non-null cells.
//! Otherwise the parse attempt is discarded and the column stays categorical,
//! even if some cells coincidentally look numeric.

use crate::config::NUMERIC_COERCION_RATIO;
use crate::error::Result;
use crate::utils::parse_numeric_cell;
use polars::prelude::*;
use tracing::debug;

/// Attempt numeric coercion on every String column not listed in `exempt`.
///
/// Coerced columns are replaced in place with Float64 values; cells that fail
/// the parse become null. Returns processing-step descriptions.
pub(crate) fn coerce_string_columns(df: &mut DataFrame, exempt: &[String]) -> Result<Vec<String>> {
    let mut steps = Vec::new();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    for name in names {
        if exempt.contains(&name) {
            debug!("Skipping coercion for exempt column '{}'", name);
            continue;
        }

        let col = df.column(&name)?;
        let series = col.as_materialized_series();
        if series.dtype() != &DataType::String {
            continue;
        }

        let str_chunked = series.str()?;
        let mut parsed: Vec<Option<f64>> = Vec::with_capacity(str_chunked.len());
        let mut non_null = 0usize;
        let mut hits = 0usize;

        for opt_val in str_chunked.into_iter() {
            match opt_val {
                Some(val) if !val.trim().is_empty() => {
                    non_null += 1;
                    match parse_numeric_cell(val) {
                        Some(num) => {
                            hits += 1;
                            parsed.push(Some(num));
                        }
                        None => parsed.push(None),
                    }
                }
                _ => parsed.push(None),
            }
        }

        if non_null > 0 && (hits as f64) > (non_null as f64) * NUMERIC_COERCION_RATIO {
            df.replace(&name, Series::new(name.as_str().into(), parsed))?;
            steps.push(format!(
                "Coerced '{}' to numeric ({}/{} cells parsed)",
                name, hits, non_null
            ));
        } else {
            debug!(
                "Keeping '{}' categorical ({}/{} cells parse as numeric)",
                name, hits, non_null
            );
        }
    }

    Ok(steps)
}
