//! Date resolution: detection, day-first parsing, row filtering, and derived
//! calendar fields.

mod detection;
mod parsing;

pub(crate) use parsing::parse_date_cell;

use crate::error::Result;
use crate::utils::cell_to_string;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::{debug, warn};

/// Days from 0001-01-01 (CE) to the Unix epoch, for `Date` storage.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Detects and parses the table's date column.
pub struct DateResolver;

impl DateResolver {
    /// Detect the date column by name, falling back to the digit sniff on the
    /// first column. Fatal when neither rule yields a candidate.
    pub fn detect(df: &DataFrame) -> Result<String> {
        detection::detect_date_column(df)
    }

    /// Parse the detected column day-first and establish the temporal key.
    ///
    /// The parsed values replace the column in place (`Date` dtype); integer
    /// `year`/`month`/`day` columns are appended; rows whose cell fails every
    /// format are dropped. Returns the filtered table and the drop count.
    pub fn resolve(mut df: DataFrame, date_col: &str) -> Result<(DataFrame, usize)> {
        let series = df.column(date_col)?.as_materialized_series().clone();
        let height = series.len();

        let mut days: Vec<Option<i32>> = Vec::with_capacity(height);
        let mut years: Vec<Option<i32>> = Vec::with_capacity(height);
        let mut months: Vec<Option<i32>> = Vec::with_capacity(height);
        let mut month_days: Vec<Option<i32>> = Vec::with_capacity(height);
        let mut keep: Vec<bool> = Vec::with_capacity(height);

        for idx in 0..height {
            let parsed: Option<NaiveDate> =
                cell_to_string(&series, idx).and_then(|raw| parse_date_cell(&raw));
            match parsed {
                Some(date) => {
                    days.push(Some(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE));
                    years.push(Some(date.year()));
                    months.push(Some(date.month() as i32));
                    month_days.push(Some(date.day() as i32));
                    keep.push(true);
                }
                None => {
                    days.push(None);
                    years.push(None);
                    months.push(None);
                    month_days.push(None);
                    keep.push(false);
                }
            }
        }

        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            warn!(
                "Dropping {} of {} rows with unparsable '{}' values",
                dropped, height, date_col
            );
        }

        let parsed_series = Series::new(date_col.into(), days).cast(&DataType::Date)?;
        df.replace(date_col, parsed_series)?;
        df.with_column(Series::new("year".into(), years))?;
        df.with_column(Series::new("month".into(), months))?;
        df.with_column(Series::new("day".into(), month_days))?;

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let filtered = df.filter(&mask)?;
        debug!("Retained {} rows with a valid temporal key", filtered.height());

        Ok((filtered, dropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parses_and_derives_fields() {
        let df = df![
            "date" => ["05/03/2021", "06/03/2021"],
            "temp" => [4.0, 5.0],
        ]
        .unwrap();

        let (resolved, dropped) = DateResolver::resolve(df, "date").unwrap();

        assert_eq!(dropped, 0);
        assert_eq!(resolved.height(), 2);
        assert_eq!(resolved.column("date").unwrap().dtype(), &DataType::Date);

        let years = resolved.column("year").unwrap();
        let months = resolved.column("month").unwrap();
        let days = resolved.column("day").unwrap();
        assert_eq!(years.get(0).unwrap().try_extract::<i32>().unwrap(), 2021);
        assert_eq!(months.get(0).unwrap().try_extract::<i32>().unwrap(), 3);
        assert_eq!(days.get(0).unwrap().try_extract::<i32>().unwrap(), 5);
        assert_eq!(days.get(1).unwrap().try_extract::<i32>().unwrap(), 6);
    }

    #[test]
    fn test_resolve_drops_unparsable_rows() {
        let df = df![
            "date" => ["05/03/2021", "garbage", "07/03/2021"],
            "temp" => [4.0, 5.0, 6.0],
        ]
        .unwrap();

        let (resolved, dropped) = DateResolver::resolve(df, "date").unwrap();

        assert_eq!(dropped, 1);
        assert_eq!(resolved.height(), 2);
        // surviving rows keep their original order and alignment
        let temp = resolved.column("temp").unwrap();
        assert_eq!(temp.get(0).unwrap().try_extract::<f64>().unwrap(), 4.0);
        assert_eq!(temp.get(1).unwrap().try_extract::<f64>().unwrap(), 6.0);
    }

    #[test]
    fn test_resolve_no_temporal_key_left_null() {
        let df = df![
            "date" => ["05/03/2021", "bad"],
            "temp" => [1.0, 2.0],
        ]
        .unwrap();

        let (resolved, _) = DateResolver::resolve(df, "date").unwrap();
        // every retained row has a non-null temporal key
        assert_eq!(resolved.column("date").unwrap().null_count(), 0);
    }

    #[test]
    fn test_resolve_numeric_column_drops_everything() {
        // The digit-sniff false positive path: a numeric ID column selected
        // as the date column parses nowhere and empties the table.
        let df = df![
            "station_id" => [101i64, 102],
            "reading" => [1.0, 2.0],
        ]
        .unwrap();

        let (resolved, dropped) = DateResolver::resolve(df, "station_id").unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(resolved.height(), 0);
    }

    #[test]
    fn test_resolve_duplicate_dates_allowed() {
        let df = df![
            "date" => ["05/03/2021", "05/03/2021"],
            "temp" => [4.0, 5.0],
        ]
        .unwrap();

        let (resolved, dropped) = DateResolver::resolve(df, "date").unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(resolved.height(), 2);
    }
}
