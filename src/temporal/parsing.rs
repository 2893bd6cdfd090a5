//! Day-first date parsing.

use chrono::{NaiveDate, NaiveDateTime};

/// Datetime formats tried before the date-only formats; the time part is
/// discarded.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
];

/// Date-only formats, in priority order: ISO first, then day-first (the
/// convention for ambiguous numeric dates: "03/04/2020" is 3 April), then
/// compact, then month-first as a last resort for dates a day-first read
/// rejects (e.g. "04/25/2020").
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
];

/// Parse a single cell into a date; `None` when every format fails.
pub(crate) fn parse_date_cell(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date_cell("2021-03-05"), Some(ymd(2021, 3, 5)));
        assert_eq!(parse_date_cell("2021/03/05"), Some(ymd(2021, 3, 5)));
    }

    #[test]
    fn test_ambiguous_date_is_day_first() {
        // 03/04/2020 is 3 April, not 4 March
        assert_eq!(parse_date_cell("03/04/2020"), Some(ymd(2020, 4, 3)));
        assert_eq!(parse_date_cell("05/03/2021"), Some(ymd(2021, 3, 5)));
    }

    #[test]
    fn test_unambiguous_day_first() {
        assert_eq!(parse_date_cell("25/12/2020"), Some(ymd(2020, 12, 25)));
        assert_eq!(parse_date_cell("25-12-2020"), Some(ymd(2020, 12, 25)));
    }

    #[test]
    fn test_month_first_fallback() {
        // Impossible as day-first (month 25), so the month-first read applies.
        assert_eq!(parse_date_cell("12/25/2020"), Some(ymd(2020, 12, 25)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_date_cell("05/03/21"), Some(ymd(2021, 3, 5)));
    }

    #[test]
    fn test_compact_date() {
        assert_eq!(parse_date_cell("20210305"), Some(ymd(2021, 3, 5)));
    }

    #[test]
    fn test_datetime_formats() {
        assert_eq!(
            parse_date_cell("2021-03-05 14:30:00"),
            Some(ymd(2021, 3, 5))
        );
        assert_eq!(
            parse_date_cell("2021-03-05T14:30:00"),
            Some(ymd(2021, 3, 5))
        );
        assert_eq!(parse_date_cell("05/03/2021 14:30"), Some(ymd(2021, 3, 5)));
    }

    #[test]
    fn test_unparsable_cells() {
        assert_eq!(parse_date_cell(""), None);
        assert_eq!(parse_date_cell("  "), None);
        assert_eq!(parse_date_cell("not a date"), None);
        assert_eq!(parse_date_cell("32/13/2020"), None);
        assert_eq!(parse_date_cell("101"), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_date_cell("  05/03/2021  "), Some(ymd(2021, 3, 5)));
    }
}
