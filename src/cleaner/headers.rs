//! Header normalization.

use crate::error::Result;
use crate::utils::normalize_column_name;
use polars::prelude::*;
use tracing::debug;

/// Normalize all headers: trim, lowercase, internal spaces to underscores.
///
/// Duplicate normalized names are undefined behavior; the source is expected
/// to carry unique names.
pub(crate) fn normalize_headers(df: &mut DataFrame) -> Result<Vec<String>> {
    let mut steps = Vec::new();
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| {
            let new_name = normalize_column_name(name);
            if new_name != name.as_str() {
                debug!("Renamed column '{}' to '{}'", name, new_name);
                steps.push(format!("Renamed column '{}' to '{}'", name, new_name));
            }
            new_name
        })
        .collect();

    df.set_column_names(normalized.iter().map(|s| s.as_str()))?;
    Ok(steps)
}
