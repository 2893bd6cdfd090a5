//! Missing-value imputation.
//!
//! Numeric columns: bidirectional linear interpolation over the temporally
//! ordered rows, then mean fill. Categorical columns: mode fill, or empty
//! string when the column is entirely null. Row order and kind tags are never
//! touched.

mod interpolate;
mod statistical;

pub use statistical::StatisticalImputer;

use crate::error::Result;
use crate::types::{ColumnKind, ColumnMeta};
use polars::prelude::*;

/// Impute every non-temporal column according to its kind tag.
///
/// Returns processing-step descriptions for the report.
pub fn impute_missing(df: &mut DataFrame, columns: &[ColumnMeta]) -> Result<Vec<String>> {
    let mut processing_steps = Vec::new();
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    for meta in columns {
        if !present.contains(&meta.name) {
            continue;
        }
        match meta.kind {
            ColumnKind::Numeric => {
                StatisticalImputer::impute_numeric(df, &meta.name, &mut processing_steps)?;
            }
            ColumnKind::Categorical => {
                StatisticalImputer::impute_categorical(df, &meta.name, &mut processing_steps)?;
            }
            // the temporal key is complete by construction
            ColumnKind::Temporal => {}
        }
    }

    Ok(processing_steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impute_missing_dispatches_by_kind() {
        let mut df = df![
            "temp" => [Some(1.0), None, Some(3.0)],
            "sky" => [Some("clear"), None, Some("clear")],
        ]
        .unwrap();
        let columns = vec![
            ColumnMeta::new("temp", ColumnKind::Numeric),
            ColumnMeta::new("sky", ColumnKind::Categorical),
        ];

        let steps = impute_missing(&mut df, &columns).unwrap();

        assert_eq!(df.column("temp").unwrap().null_count(), 0);
        assert_eq!(df.column("sky").unwrap().null_count(), 0);
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_impute_missing_preserves_row_order() {
        let mut df = df![
            "temp" => [Some(3.0), None, Some(1.0)],
            "tag" => ["c", "b", "a"],
        ]
        .unwrap();
        let columns = vec![
            ColumnMeta::new("temp", ColumnKind::Numeric),
            ColumnMeta::new("tag", ColumnKind::Categorical),
        ];

        impute_missing(&mut df, &columns).unwrap();

        let tag = df.column("tag").unwrap();
        assert!(tag.get(0).unwrap().to_string().contains('c'));
        assert!(tag.get(2).unwrap().to_string().contains('a'));
    }

    #[test]
    fn test_impute_missing_skips_absent_columns() {
        let mut df = df!["temp" => [1.0]].unwrap();
        let columns = vec![ColumnMeta::new("gone", ColumnKind::Numeric)];
        let steps = impute_missing(&mut df, &columns).unwrap();
        assert!(steps.is_empty());
    }
}
