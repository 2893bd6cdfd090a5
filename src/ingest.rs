//! CSV ingestion with a one-shot encoding fallback.
//!
//! The loader reads the file's raw bytes, attempts strict UTF-8, and on a
//! decoding failure retries once as Latin-1. Any other failure (missing file,
//! permissions, malformed CSV) is fatal and names the file and reason.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Rows inspected by the CSV reader's schema inference.
pub const INFER_SCHEMA_ROWS: usize = 100;

/// Read a CSV file into a DataFrame, preserving original column order.
///
/// Numeric-looking columns come back typed by the reader's schema inference;
/// everything else stays `String`. Dates are NOT parsed here; that is the
/// date resolver's job.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::Ingestion {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let bytes = match std::str::from_utf8(&bytes) {
        Ok(_) => bytes,
        Err(_) => {
            info!(
                "'{}' is not valid UTF-8, retrying with Latin-1",
                path.display()
            );
            decode_latin1(&bytes).into_bytes()
        }
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| PipelineError::Ingestion {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!("Loaded {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Decode Latin-1 bytes; every byte maps directly to its code point.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
