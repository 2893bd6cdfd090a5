//! Main cleaning pipeline and builder.
//!
//! Stages run strictly in sequence; each consumes the previous stage's table.
//! Mandatory-stage failures (ingestion, date detection) abort the run;
//! aggregation failures are caught at that stage's boundary and the run
//! continues without the aggregate artifact.

use crate::aggregate::MonthlyAggregator;
use crate::cleaner::ColumnClassifier;
use crate::config::PipelineConfig;
use crate::detect::detect_key_columns;
use crate::error::{PipelineError, Result};
use crate::imputers::impute_missing;
use crate::ingest;
use crate::profiler::StatisticsEngine;
use crate::reporting::ReportGenerator;
use crate::temporal::DateResolver;
use crate::types::{ColumnKind, ColumnMeta, PipelineResult};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// The main cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use weather_processing::{Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(PipelineConfig::builder().save_to_disk(false).build()?)
///     .build()?
///     .run("observations.csv".as_ref())?;
///
/// println!("Retained {} rows", result.rows_retained);
/// ```
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a CSV file and run the full pipeline on it.
    pub fn run(&self, input: &Path) -> Result<PipelineResult> {
        info!("Loading '{}'", input.display());
        let df = ingest::read_csv(input)?;
        self.process(df)
    }

    /// Run the pipeline on an already-loaded table.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        let mut df = df;
        let rows_loaded = df.height();
        let mut notices: Vec<String> = Vec::new();

        info!("Step 1: Normalizing headers...");
        let mut processing_steps = ColumnClassifier::normalize_headers(&mut df)?;

        info!("Step 2: Detecting the date column...");
        let date_column = DateResolver::detect(&df)?;
        info!("Using '{}' as the date column", date_column);

        info!("Step 3: Coercing numeric-looking text columns...");
        processing_steps.extend(ColumnClassifier::coerce_numeric(
            &mut df,
            std::slice::from_ref(&date_column),
        )?);

        let mut columns = ColumnClassifier::classify(&df);
        set_kind(&mut columns, &date_column, ColumnKind::Temporal);

        info!("Step 4: Parsing dates (day-first)...");
        let (mut df, dropped) = DateResolver::resolve(df, &date_column)?;
        if dropped > 0 {
            notices.push(format!(
                "Dropped {} of {} rows with unparsable dates",
                dropped, rows_loaded
            ));
        }
        for derived in ["year", "month", "day"] {
            set_kind(&mut columns, derived, ColumnKind::Numeric);
        }

        info!("Step 5: Imputing missing values...");
        processing_steps.extend(impute_missing(&mut df, &columns)?);

        info!("Step 6: Detecting key columns...");
        let detected = detect_key_columns(&df, &self.config.keywords);
        for (category, column) in detected.entries() {
            match column {
                Some(name) => info!("Detected {} column: '{}'", category.as_str(), name),
                None => {
                    warn!("No {} column detected", category.as_str());
                    notices.push(format!(
                        "No {} column detected; its statistics and aggregates are skipped",
                        category.as_str()
                    ));
                }
            }
        }

        info!("Step 7: Computing statistics...");
        let stats = StatisticsEngine::compute(&df, &columns)?;

        info!("Step 8: Aggregating by calendar month...");
        let monthly = match MonthlyAggregator::aggregate(&df, &detected, &mut notices) {
            Ok(monthly) => monthly,
            Err(e) => {
                warn!("Monthly aggregation failed: {}; continuing without it", e);
                notices.push(format!(
                    "Monthly aggregate table not produced: {}",
                    e
                ));
                None
            }
        };

        let rows_retained = df.height();
        let mut result = PipelineResult {
            cleaned: df,
            stats,
            monthly,
            detected,
            date_column,
            columns,
            rows_loaded,
            rows_retained,
            processing_steps,
            notices,
        };

        if self.config.save_to_disk {
            self.write_artifacts(&mut result)?;
        }

        info!(
            "Pipeline complete: {} of {} rows retained",
            result.rows_retained, result.rows_loaded
        );
        Ok(result)
    }

    /// Write output artifacts at sequential checkpoints.
    ///
    /// A failure writing the aggregate table is recovered with a notice;
    /// artifacts already written are never rolled back.
    fn write_artifacts(&self, result: &mut PipelineResult) -> Result<()> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let cleaned_path = self.config.output_dir.join(&self.config.cleaned_name);
        let mut file = File::create(&cleaned_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut result.cleaned)?;
        info!("Cleaned data saved to {}", cleaned_path.display());

        if let Some(monthly) = result.monthly.as_mut() {
            let aggregate_path = self.config.output_dir.join(&self.config.aggregate_name);
            match write_csv(&aggregate_path, monthly) {
                Ok(()) => info!("Monthly aggregates saved to {}", aggregate_path.display()),
                Err(e) => {
                    warn!(
                        "Could not write monthly aggregates to {}: {}",
                        aggregate_path.display(),
                        e
                    );
                    result
                        .notices
                        .push(format!("Monthly aggregates file not written: {}", e));
                }
            }
        }

        let summary_path = self.config.output_dir.join(&self.config.summary_name);
        let summary = ReportGenerator::render_summary(result, &self.config);
        std::fs::write(&summary_path, summary)?;
        info!("Summary report saved to {}", summary_path.display());

        Ok(())
    }
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Update the kind of a named column, appending a new meta if it is a derived
/// column the classifier never saw.
fn set_kind(columns: &mut Vec<ColumnMeta>, name: &str, kind: ColumnKind) {
    match columns.iter_mut().find(|meta| meta.name == name) {
        Some(meta) => meta.kind = kind,
        None => columns.push(ColumnMeta::new(name, kind)),
    }
}

/// Builder for [`Pipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        Ok(Pipeline { config })
    }
}
