//! Configuration for the weather cleaning pipeline.
//!
//! Output paths and the category keyword policy are explicit configuration
//! supplied to the pipeline entry point, so the pipeline stays callable and
//! testable in isolation. The fuzzy heuristic thresholds are named constants
//! so tests can probe boundary behavior precisely.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use std::path::PathBuf;

/// A text column is coerced to numeric only when the count of parseable cells
/// strictly exceeds this share of its non-null cells.
pub const NUMERIC_COERCION_RATIO: f64 = 0.10;

/// Number of leading values of the first column sniffed by the digit-pattern
/// date fallback.
pub const DATE_SNIFF_SAMPLE_ROWS: usize = 5;

const_assert!(DATE_SNIFF_SAMPLE_ROWS >= 1);

/// Ordered candidate substrings per semantic category.
///
/// Matching is keyword-major: the first keyword (in list order) that matches
/// any column (scanning columns in original order) wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub temperature: Vec<String>,
    pub rainfall: Vec<String>,
    pub humidity: Vec<String>,
}

impl Default for CategoryKeywords {
    fn default() -> Self {
        fn owned(keys: &[&str]) -> Vec<String> {
            keys.iter().map(|k| k.to_string()).collect()
        }
        Self {
            temperature: owned(&["temp", "temperature", "t_avg", "t_mean", "tmax", "tmin"]),
            rainfall: owned(&["rain", "precip", "ppt", "rainfall"]),
            humidity: owned(&["humid", "rh", "relative_humidity"]),
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`PipelineConfig::builder()`] for a fluent setup.
///
/// # Example
///
/// ```rust,ignore
/// use weather_processing::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .output_dir("results")
///     .cleaned_name("cleaned.csv")
///     .save_to_disk(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Keyword policy for the key-column detector.
    pub keywords: CategoryKeywords,

    /// Directory receiving all output artifacts.
    /// Default: "weather_outputs"
    pub output_dir: PathBuf,

    /// File name of the cleaned-table CSV.
    /// Default: "cleaned_weather.csv"
    pub cleaned_name: String,

    /// File name of the monthly-aggregates CSV.
    /// Default: "monthly_aggregates.csv"
    pub aggregate_name: String,

    /// File name of the text summary report.
    /// Default: "summary_report.txt"
    pub summary_name: String,

    /// Whether to write artifacts to disk. When false, results are kept in
    /// memory only.
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keywords: CategoryKeywords::default(),
            output_dir: PathBuf::from("weather_outputs"),
            cleaned_name: "cleaned_weather.csv".to_string(),
            aggregate_name: "monthly_aggregates.csv".to_string(),
            summary_name: "summary_report.txt".to_string(),
            save_to_disk: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, name) in [
            ("cleaned_name", &self.cleaned_name),
            ("aggregate_name", &self.aggregate_name),
            ("summary_name", &self.summary_name),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyFileName {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Empty file name for '{field}'")]
    EmptyFileName { field: String },
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    keywords: Option<CategoryKeywords>,
    output_dir: Option<PathBuf>,
    cleaned_name: Option<String>,
    aggregate_name: Option<String>,
    summary_name: Option<String>,
    save_to_disk: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Override the category keyword policy.
    pub fn keywords(mut self, keywords: CategoryKeywords) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Set the output directory for artifacts.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the cleaned-table CSV file name.
    pub fn cleaned_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_name = Some(name.into());
        self
    }

    /// Set the monthly-aggregates CSV file name.
    pub fn aggregate_name(mut self, name: impl Into<String>) -> Self {
        self.aggregate_name = Some(name.into());
        self
    }

    /// Set the summary report file name.
    pub fn summary_name(mut self, name: impl Into<String>) -> Self {
        self.summary_name = Some(name.into());
        self
    }

    /// Enable or disable writing artifacts to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            keywords: self.keywords.unwrap_or(defaults.keywords),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            cleaned_name: self.cleaned_name.unwrap_or(defaults.cleaned_name),
            aggregate_name: self.aggregate_name.unwrap_or(defaults.aggregate_name),
            summary_name: self.summary_name.unwrap_or(defaults.summary_name),
            save_to_disk: self.save_to_disk.unwrap_or(defaults.save_to_disk),
        };

        config.validate()?;
        Ok(config)
    }
}
