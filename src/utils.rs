//! Shared utilities for the cleaning pipeline.
//!
//! Helper functions used across multiple stages: header normalization, cell
//! sanitizing, mode calculation, and null-filling primitives.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// =============================================================================
// Header Utilities
// =============================================================================

/// Normalize a column header: trim whitespace, lowercase, and replace internal
/// spaces with underscores. Idempotent.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

// =============================================================================
// Cell Parsing Utilities
// =============================================================================

/// Everything other than digits, a decimal point, and a minus sign is stripped
/// from a cell before the numeric parse attempt.
static NON_NUMERIC_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("Invalid regex: non-numeric chars"));

/// Strip formatting characters from a cell, leaving digits, dots, and minus
/// signs.
pub fn sanitize_numeric_string(s: &str) -> String {
    NON_NUMERIC_CHARS.replace_all(s.trim(), "").into_owned()
}

/// Try to parse a cell as a numeric value after sanitizing.
///
/// The `f64` parse itself rejects leftover malformed shapes (multiple dots,
/// non-leading minus), so those cells come back as `None`.
pub fn parse_numeric_cell(s: &str) -> Option<f64> {
    let cleaned = sanitize_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Render a cell for heuristic inspection, or `None` when the cell is null.
///
/// String cells come back unquoted; other kinds use their display form.
pub fn cell_to_string(series: &Series, idx: usize) -> Option<String> {
    match series.get(idx) {
        Ok(AnyValue::Null) | Err(_) => None,
        Ok(AnyValue::String(s)) => Some(s.to_string()),
        Ok(AnyValue::StringOwned(s)) => Some(s.to_string()),
        Ok(av) => Some(format!("{}", av)),
    }
}

// =============================================================================
// Dtype Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties resolve to the lexicographically smallest value.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val.to_string()).or_insert(0) += 1;
    }

    value_counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(val, _)| val)
}

/// Sample standard deviation (n-1 denominator) over the given values.
///
/// Undefined for fewer than two values, in which case `None` is returned
/// rather than zero.
pub fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    Some(variance.sqrt())
}

/// Extract a Series as `Vec<Option<f64>>`, casting to Float64.
pub fn series_to_f64_vec(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float = series.cast(&DataType::Float64)?;
    Ok(float.f64()?.into_iter().collect())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = series.cast(&DataType::String)?;
    let str_chunked = str_series.str()?;
    let result_vec: Vec<Option<String>> = str_chunked
        .into_iter()
        .map(|opt| {
            Some(match opt {
                Some(val) => val.to_string(),
                None => fill_value.to_string(),
            })
        })
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  Temp C  "), "temp_c");
        assert_eq!(normalize_column_name("Rain mm"), "rain_mm");
        assert_eq!(normalize_column_name("humidity"), "humidity");
    }

    #[test]
    fn test_normalize_column_name_idempotent() {
        let once = normalize_column_name("  Station Name ");
        assert_eq!(normalize_column_name(&once), once);
    }

    #[test]
    fn test_sanitize_numeric_string() {
        assert_eq!(sanitize_numeric_string("23.5°C"), "23.5");
        assert_eq!(sanitize_numeric_string("  -4 mm "), "-4");
        assert_eq!(sanitize_numeric_string("abc"), "");
        assert_eq!(sanitize_numeric_string("05/03/2021"), "05032021");
    }

    #[test]
    fn test_parse_numeric_cell() {
        assert_eq!(parse_numeric_cell("23.5°C"), Some(23.5));
        assert_eq!(parse_numeric_cell("-4 mm"), Some(-4.0));
        assert_eq!(parse_numeric_cell("42"), Some(42.0));
        assert_eq!(parse_numeric_cell(""), None);
        assert_eq!(parse_numeric_cell("cloudy"), None);
        // leftover malformed shapes are rejected by the parse
        assert_eq!(parse_numeric_cell("1.2.3"), None);
        assert_eq!(parse_numeric_cell("3-4"), None);
    }

    #[test]
    fn test_cell_to_string_unquotes_strings() {
        let series = Series::new("s".into(), &[Some("a"), None]);
        assert_eq!(cell_to_string(&series, 0), Some("a".to_string()));
        assert_eq!(cell_to_string(&series, 1), None);

        let series = Series::new("n".into(), &[101i64]);
        assert_eq!(cell_to_string(&series, 0), Some("101".to_string()));
    }

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Date));
    }

    #[test]
    fn test_string_mode() {
        let series = Series::new("test".into(), &["a", "b", "a", "c", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_breaks_lexicographically() {
        let series = Series::new("test".into(), &["b", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_all_null() {
        let series = Series::new("test".into(), &[Option::<&str>::None, None]);
        assert_eq!(string_mode(&series), None);
    }

    #[test]
    fn test_sample_std() {
        // Values: 1..5, mean 3, variance 10/4 = 2.5
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let std = sample_std(&values, 3.0).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_single_value_is_undefined() {
        assert_eq!(sample_std(&[42.0], 42.0), None);
        assert_eq!(sample_std(&[], 0.0), None);
    }

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("s".into(), &[Some("x"), None, Some("y")]);
        let filled = fill_string_nulls(&series, "z").unwrap();
        assert_eq!(filled.null_count(), 0);
        assert_eq!(cell_to_string(&filled, 1), Some("z".to_string()));
    }

    #[test]
    fn test_series_to_f64_vec() {
        let series = Series::new("n".into(), &[Some(1i64), None, Some(3)]);
        let values = series_to_f64_vec(&series).unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }
}
