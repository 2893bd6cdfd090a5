//! CLI entry point for the weather cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::Path;
use weather_processing::reporting::RunReport;
use weather_processing::types::Category;
use weather_processing::{Pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Weather CSV cleaning and aggregation pipeline",
    long_about = "Cleans a schema-free weather CSV: infers column types, parses the date\n\
                  column day-first, fills missing values, and writes cleaned data,\n\
                  monthly aggregates, and a summary report.\n\n\
                  EXAMPLES:\n  \
                  # Clean a CSV into ./weather_outputs\n  \
                  weather-processing -i observations.csv\n\n  \
                  # Custom output directory, JSON report on stdout\n  \
                  weather-processing -i observations.csv -o results/ --json\n\n  \
                  # Keep everything in memory\n  \
                  weather-processing -i observations.csv --no-save"
)]
struct Args {
    /// Path to the weather CSV to process
    #[arg(short, long)]
    input: String,

    /// Output directory for artifacts
    #[arg(short, long, default_value = "weather_outputs")]
    output: String,

    /// File name for the cleaned CSV
    #[arg(long, default_value = "cleaned_weather.csv")]
    cleaned_name: String,

    /// File name for the monthly aggregates CSV
    #[arg(long, default_value = "monthly_aggregates.csv")]
    aggregate_name: String,

    /// File name for the text summary report
    #[arg(long, default_value = "summary_report.txt")]
    summary_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the run report as JSON on stdout instead of a human-readable
    /// summary
    ///
    /// Disables all progress logs; only the JSON report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Skip writing artifacts to disk
    #[arg(long)]
    no_save: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = PipelineConfig::builder()
        .output_dir(&args.output)
        .cleaned_name(&args.cleaned_name)
        .aggregate_name(&args.aggregate_name)
        .summary_name(&args.summary_name)
        .save_to_disk(!args.no_save)
        .build()?;

    let pipeline = Pipeline::builder().config(config).build()?;
    let result = pipeline.run(Path::new(&args.input))?;

    if args.json {
        let report = RunReport::from_result(&result, Some(&args.input));
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&result, &args);
    Ok(())
}

/// Print the final run summary.
///
/// This uses `println!` intentionally for user-facing CLI output; unlike the
/// progress logging it should stay visible regardless of log level.
fn print_summary(result: &weather_processing::PipelineResult, args: &Args) {
    println!("\n{}", "=".repeat(60));
    println!("CLEANING SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Input: {}", args.input);
    println!("  Date column: {}", result.date_column);
    println!(
        "  Rows: {} loaded, {} retained ({} dropped)",
        result.rows_loaded,
        result.rows_retained,
        result.rows_dropped()
    );
    println!();

    println!("DETECTED COLUMNS");
    println!("{}", "-".repeat(40));
    for category in [Category::Temperature, Category::Rainfall, Category::Humidity] {
        println!("  {:<12} {}", category.as_str(), result.detected.label(category));
    }
    println!();

    println!("STATISTICS ({} numeric columns)", result.stats.len());
    println!("{}", "-".repeat(40));
    for (name, stats) in &result.stats {
        let std = match stats.std {
            Some(std) => format!("{:.3}", std),
            None => "n/a".to_string(),
        };
        println!(
            "  {:<16} mean={:.3} min={:.3} max={:.3} std={}",
            name, stats.mean, stats.min, stats.max, std
        );
    }
    println!();

    match &result.monthly {
        Some(monthly) => println!("Monthly aggregates: {} buckets", monthly.height()),
        None => println!("Monthly aggregates: not produced"),
    }

    if !result.notices.is_empty() {
        println!("\nNOTICES");
        println!("{}", "-".repeat(40));
        for notice in &result.notices {
            println!("  - {}", notice);
        }
    }

    if !args.no_save {
        println!("\nOutputs written to {}/", args.output);
    }
}
