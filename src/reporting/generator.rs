//! Summary and run-report generation.

use crate::config::PipelineConfig;
use crate::types::{Category, ColumnStats, PipelineResult};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Machine-readable run report, for `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Path to the input file, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    /// Name of the detected date column.
    pub date_column: String,
    /// Rows in the input table.
    pub rows_loaded: usize,
    /// Rows retained after dropping unparsable dates.
    pub rows_retained: usize,
    /// Rows dropped for unparsable dates.
    pub rows_dropped: usize,
    /// Category to detected column name or "not found".
    pub detected_columns: BTreeMap<String, String>,
    /// Per-column statistics, keyed by normalized column name.
    pub statistics: BTreeMap<String, ColumnStats>,
    /// Number of monthly buckets, absent when aggregation was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_buckets: Option<usize>,
    /// Notices about degraded or skipped outputs.
    pub notices: Vec<String>,
}

impl RunReport {
    /// Build a run report from a pipeline result.
    pub fn from_result(result: &PipelineResult, input_file: Option<&str>) -> Self {
        let detected_columns = result
            .detected
            .entries()
            .iter()
            .map(|(category, _)| {
                (
                    category.as_str().to_string(),
                    result.detected.label(*category).to_string(),
                )
            })
            .collect();

        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.map(String::from),
            date_column: result.date_column.clone(),
            rows_loaded: result.rows_loaded,
            rows_retained: result.rows_retained,
            rows_dropped: result.rows_dropped(),
            detected_columns,
            statistics: result.stats.clone(),
            monthly_buckets: result.monthly.as_ref().map(|m| m.height()),
            notices: result.notices.clone(),
        }
    }
}

/// Renders the human-readable summary report.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Render the text summary written alongside the cleaned data.
    pub fn render_summary(result: &PipelineResult, config: &PipelineConfig) -> String {
        let mut out = String::new();

        out.push_str("Weather Data Cleaning - Summary Report\n");
        out.push_str(&format!(
            "Generated on: {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        out.push_str(&format!("Date column: {}\n", result.date_column));
        out.push_str(&format!(
            "Rows: {} loaded, {} retained ({} dropped for unparsable dates)\n\n",
            result.rows_loaded,
            result.rows_retained,
            result.rows_dropped()
        ));

        out.push_str("Detected key columns:\n");
        for category in [Category::Temperature, Category::Rainfall, Category::Humidity] {
            out.push_str(&format!(
                "  {} column: {}\n",
                capitalize(category.as_str()),
                result.detected.label(category)
            ));
        }
        out.push('\n');

        out.push_str("Basic numeric statistics:\n");
        if result.stats.is_empty() {
            out.push_str("  (no numeric columns with valid values)\n");
        }
        for (name, stats) in &result.stats {
            let std = match stats.std {
                Some(std) => format!("{:.3}", std),
                None => "n/a".to_string(),
            };
            out.push_str(&format!(
                "- {}: mean={:.3}, min={:.3}, max={:.3}, std={}\n",
                name, stats.mean, stats.min, stats.max, std
            ));
        }
        out.push('\n');

        match &result.monthly {
            Some(monthly) => out.push_str(&format!(
                "Monthly aggregates: {} buckets (saved as {})\n",
                monthly.height(),
                config.aggregate_name
            )),
            None => out.push_str("Monthly aggregates: not produced\n"),
        }

        if !result.notices.is_empty() {
            out.push_str("\nNotices:\n");
            for notice in &result.notices {
                out.push_str(&format!(" - {}\n", notice));
            }
        }

        out.push_str("\nNotes:\n");
        out.push_str(
            " - Missing numeric values were interpolated, then filled with column means.\n",
        );
        out.push_str(
            " - Date parsing used the day-first convention for ambiguous dates.\n",
        );
        out.push_str("\nEnd of report.\n");

        out
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
