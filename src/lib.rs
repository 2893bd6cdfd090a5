//! Weather CSV Cleaning Pipeline
//!
//! A schema-free cleaning pipeline for tabular weather CSVs, built on Polars.
//!
//! # Overview
//!
//! The pipeline takes an arbitrary, messily-labeled weather CSV and produces
//! cleaned data plus derived statistics and monthly aggregates:
//!
//! - **Ingestion**: CSV loading with a one-shot Latin-1 encoding fallback
//! - **Classification**: header normalization and numeric coercion of
//!   numeric-looking text columns
//! - **Date resolution**: heuristic date-column detection, day-first parsing,
//!   derived year/month/day fields, unparsable rows dropped
//! - **Imputation**: bidirectional linear interpolation plus mean fill for
//!   numeric gaps, mode fill for categorical gaps
//! - **Key-column detection**: keyword mapping to temperature / rainfall /
//!   humidity, degrading gracefully when a category is absent
//! - **Statistics**: per-column mean/min/max/sample standard deviation
//! - **Aggregation**: explicit (year, month) bucketing with category-specific
//!   aggregation functions
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use weather_processing::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .output_dir("weather_outputs")
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .build()?
//!     .run("observations.csv".as_ref())?;
//!
//! println!("Date column: {}", result.date_column);
//! println!("Temperature: {}", result.detected.label(weather_processing::Category::Temperature));
//! for (column, stats) in &result.stats {
//!     println!("{}: mean={:.2}", column, stats.mean);
//! }
//! ```
//!
//! # Error Handling
//!
//! Ingestion and date detection are mandatory stages: their failures are
//! fatal ([`PipelineError::is_fatal`]). Individual unparsable date cells only
//! drop their row; a missing semantic column or a failed aggregation degrades
//! the output with a notice instead of aborting.

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod detect;
pub mod error;
pub mod imputers;
pub mod ingest;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod temporal;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::MonthlyAggregator;
pub use cleaner::ColumnClassifier;
pub use config::{
    CategoryKeywords, ConfigValidationError, DATE_SNIFF_SAMPLE_ROWS, NUMERIC_COERCION_RATIO,
    PipelineConfig, PipelineConfigBuilder,
};
pub use detect::detect_key_columns;
pub use error::{PipelineError, Result, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use profiler::StatisticsEngine;
pub use reporting::{ReportGenerator, RunReport};
pub use temporal::DateResolver;
pub use types::{
    Category, ColumnKind, ColumnMeta, ColumnStats, DetectedColumns, PipelineResult,
};
