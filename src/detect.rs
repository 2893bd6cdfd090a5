//! Key-column detection: mapping normalized columns to semantic categories.
//!
//! Detection is by name only: an all-null "rainfall_mm" column is still the
//! rainfall column. Matching is keyword-major: the first keyword (in list
//! order) that matches any column, scanning columns in original order, wins.

use crate::config::CategoryKeywords;
use crate::types::DetectedColumns;
use polars::prelude::*;

/// Detect the temperature, rainfall, and humidity columns by keyword.
pub fn detect_key_columns(df: &DataFrame, keywords: &CategoryKeywords) -> DetectedColumns {
    DetectedColumns {
        temperature: find_column(df, &keywords.temperature),
        rainfall: find_column(df, &keywords.rainfall),
        humidity: find_column(df, &keywords.humidity),
    }
}

fn find_column(df: &DataFrame, keywords: &[String]) -> Option<String> {
    let names = df.get_column_names();
    for keyword in keywords {
        for name in &names {
            if name.contains(keyword.as_str()) {
                return Some(name.to_string());
            }
        }
    }
    None
}
