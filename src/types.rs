use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a column as inferred by the classifier and date resolver.
///
/// Assigned once; later stages never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point values (native or coerced from text).
    Numeric,
    /// Free text / labels.
    Categorical,
    /// The parsed date column (the table's temporal key).
    Temporal,
}

/// A column name together with its inferred kind, in original column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Summary statistics for a numeric column, computed over non-null values.
///
/// `std` is the sample standard deviation (n-1 denominator); it is `None` for
/// a column with exactly one valid value, where the estimator is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

/// The three semantic categories the detector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Temperature,
    Rainfall,
    Humidity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Temperature => "temperature",
            Category::Rainfall => "rainfall",
            Category::Humidity => "humidity",
        }
    }
}

/// Mapping from semantic category to the detected column name.
///
/// `None` means "not found", never an error; downstream stages degrade by
/// skipping the category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedColumns {
    pub temperature: Option<String>,
    pub rainfall: Option<String>,
    pub humidity: Option<String>,
}

impl DetectedColumns {
    /// Look up the detected column for a category.
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Temperature => self.temperature.as_deref(),
            Category::Rainfall => self.rainfall.as_deref(),
            Category::Humidity => self.humidity.as_deref(),
        }
    }

    /// All categories with their detected columns, in fixed order.
    pub fn entries(&self) -> [(Category, Option<&str>); 3] {
        [
            (Category::Temperature, self.temperature.as_deref()),
            (Category::Rainfall, self.rainfall.as_deref()),
            (Category::Humidity, self.humidity.as_deref()),
        ]
    }

    /// Render a category's detection result for reports.
    pub fn label(&self, category: Category) -> &str {
        self.get(category).unwrap_or("not found")
    }
}

/// The result of a pipeline run: the four core artifacts plus run metadata.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Cleaned table: all columns post-classification/imputation, the date
    /// restored as a plain column, one row per retained observation.
    pub cleaned: DataFrame,
    /// Per-column statistics, keyed by normalized column name. All-null
    /// columns have no entry.
    pub stats: BTreeMap<String, ColumnStats>,
    /// Monthly aggregate table, or `None` when aggregation was skipped.
    pub monthly: Option<DataFrame>,
    /// Semantic category to column name map.
    pub detected: DetectedColumns,
    /// Name of the detected date column.
    pub date_column: String,
    /// Column kinds in original column order (derived fields appended).
    pub columns: Vec<ColumnMeta>,
    /// Rows in the input table.
    pub rows_loaded: usize,
    /// Rows retained after dropping unparsable dates.
    pub rows_retained: usize,
    /// Per-stage processing step descriptions, for reports.
    pub processing_steps: Vec<String>,
    /// User-visible notices about degraded or skipped outputs.
    pub notices: Vec<String>,
}

impl PipelineResult {
    /// Number of rows dropped for unparsable dates.
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_retained)
    }
}
