//! Calendar-date normalization shared by workbook parsing and filter bounds.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date {input:?}: expected YYYYMMDD, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
pub struct DateError {
    pub input: String,
}

/// Parses `YYYYMMDD`, `YYYY-MM-DD`, or an ISO datetime and keeps only the calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    let parsed = match trimmed.len() {
        8 => NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok(),
        10 => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok(),
        len if len >= 19 => parse_iso_datetime(trimmed).map(|dt| dt.date()),
        _ => None,
    };

    parsed.ok_or_else(|| DateError {
        input: input.to_string(),
    })
}

fn parse_iso_datetime(input: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

/// Physical representation polars uses for `DataType::Date`.
pub fn to_epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}
