//! Ledger date parsing.

use chrono::{NaiveDate, NaiveDateTime};

const DAY_FIRST_FORMATS: [&str; 6] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%d/%m/%y", "%d %b %Y"];
const MONTH_FIRST_FORMATS: [&str; 5] = ["%m/%d/%Y", "%m-%d-%Y", "%Y-%m-%d", "%m/%d/%y", "%b %d %Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a ledger date. With `day_first`, `03/01/2023` is 3 January.
///
/// A trailing time component is ignored.
pub fn parse_date(value: &str, day_first: bool) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let formats: &[&str] = if day_first {
        &DAY_FIRST_FORMATS
    } else {
        &MONTH_FIRST_FORMATS
    };

    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            let (date, _time) = value.split_once(' ')?;
            formats
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(date, f).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_first_reads_day_before_month() {
        assert_eq!(parse_date("03/01/2023", true), Some(date(2023, 1, 3)));
        assert_eq!(parse_date("25-12-2022", true), Some(date(2022, 12, 25)));
        assert_eq!(parse_date("7 Mar 2023", true), Some(date(2023, 3, 7)));
    }

    #[test]
    fn month_first_reads_month_before_day() {
        assert_eq!(parse_date("03/01/2023", false), Some(date(2023, 3, 1)));
    }

    #[test]
    fn iso_dates_parse_either_way() {
        assert_eq!(parse_date("2023-01-03", true), Some(date(2023, 1, 3)));
        assert_eq!(parse_date("2023-01-03", false), Some(date(2023, 1, 3)));
        assert_eq!(parse_date("2023-01-03 10:15:00", true), Some(date(2023, 1, 3)));
    }

    #[test]
    fn time_suffix_is_ignored() {
        assert_eq!(parse_date("03/01/2023 09:30", true), Some(date(2023, 1, 3)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_date("", true), None);
        assert_eq!(parse_date("yesterday", true), None);
        assert_eq!(parse_date("31/02/2023", true), None);
    }
}
