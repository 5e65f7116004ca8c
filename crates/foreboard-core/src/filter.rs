use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use chrono::NaiveDate;
use foreboard_parser::{from_epoch_days, parse_date, to_epoch_days};
use polars::prelude::*;

use crate::columns::*;
use crate::error::{PipelineError, Result};

pub const DEFAULT_RECENT_ROUNDS: usize = 20;

/// Which play dates a view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
    /// The N most recent distinct play dates in the table.
    LastRounds(usize),
}

/// A window pinned to concrete dates for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBounds {
    Unbounded,
    Between(NaiveDate, NaiveDate),
    Nothing,
}

impl DateWindow {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            DateWindow::Range { start, end }
        } else {
            DateWindow::Range {
                start: end,
                end: start,
            }
        }
    }

    /// Builds a range from two date strings in any supported layout.
    pub fn between(start: &str, end: &str) -> Result<Self> {
        Ok(Self::range(parse_date(start)?, parse_date(end)?))
    }

    pub fn resolve(&self, df: &DataFrame) -> Result<DateBounds> {
        match *self {
            DateWindow::All => Ok(DateBounds::Unbounded),
            DateWindow::Range { start, end } => Ok(DateBounds::Between(start, end)),
            DateWindow::LastRounds(0) => Ok(DateBounds::Nothing),
            DateWindow::LastRounds(count) => {
                let dates = df.column(DATE)?.date()?;
                let distinct: BTreeSet<i32> = (0..df.height())
                    .filter_map(|idx| dates.get(idx))
                    .collect();
                let recent: Vec<i32> = distinct.iter().rev().take(count).copied().collect();

                let (Some(&newest), Some(&oldest)) = (recent.first(), recent.last()) else {
                    return Ok(DateBounds::Nothing);
                };
                match (from_epoch_days(oldest), from_epoch_days(newest)) {
                    (Some(start), Some(end)) => Ok(DateBounds::Between(start, end)),
                    _ => Err(PipelineError::MalformedDate(format!(
                        "date column holds out-of-range day numbers {oldest}..{newest}"
                    ))),
                }
            }
        }
    }
}

impl FromStr for DateWindow {
    type Err = PipelineError;

    /// Accepts `all`, `Last N rounds`, or `START..END`.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(DateWindow::All);
        }

        if let Some((start, end)) = trimmed.split_once("..") {
            return DateWindow::between(start, end);
        }

        let lowered = trimmed.to_ascii_lowercase();
        let count = lowered
            .strip_prefix("last ")
            .map(|rest| rest.strip_suffix('s').unwrap_or(rest))
            .and_then(|rest| rest.strip_suffix(" round"))
            .and_then(|count| count.trim().parse::<usize>().ok());

        match count {
            Some(count) => Ok(DateWindow::LastRounds(count)),
            None => Err(PipelineError::MalformedInput(format!(
                "unrecognized date window {input:?}; expected all, Last N rounds or START..END"
            ))),
        }
    }
}

/// Conjunctive filter over the per-hole table. Empty golfer or course lists match everyone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub dates: DateWindow,
    pub golfers: Vec<String>,
    pub courses: Vec<String>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dates(mut self, dates: DateWindow) -> Self {
        self.dates = dates;
        self
    }

    pub fn with_golfers<I, S>(mut self, golfers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.golfers = golfers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_courses<I, S>(mut self, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.courses = courses.into_iter().map(Into::into).collect();
        self
    }
}

pub fn filter_table(df: &DataFrame, params: &FilterParams) -> Result<DataFrame> {
    let bounds = match params.dates.resolve(df)? {
        DateBounds::Nothing => return Ok(df.clear()),
        DateBounds::Unbounded => None,
        DateBounds::Between(start, end) => Some((to_epoch_days(start), to_epoch_days(end))),
    };

    let dates = df.column(DATE)?.date()?;
    let golfer = df.column(GOLFER)?.str()?;
    let course = df.column(COURSE)?.str()?;

    let golfers: HashSet<&str> = params.golfers.iter().map(String::as_str).collect();
    let courses: HashSet<&str> = params.courses.iter().map(String::as_str).collect();

    let mask: BooleanChunked = (0..df.height())
        .map(|idx| {
            in_window(dates.get(idx), bounds)
                && selected(&golfers, golfer.get(idx))
                && selected(&courses, course.get(idx))
        })
        .collect();

    Ok(df.filter(&mask)?)
}

fn in_window(day: Option<i32>, bounds: Option<(i32, i32)>) -> bool {
    match (day, bounds) {
        (_, None) => true,
        (Some(day), Some((first, last))) => first <= day && day <= last,
        (None, Some(_)) => false,
    }
}

/// An empty selection matches every value.
fn selected(choices: &HashSet<&str>, value: Option<&str>) -> bool {
    choices.is_empty() || value.is_some_and(|value| choices.contains(value))
}

/// Turns an empty table into [`PipelineError::EmptyResult`].
pub fn ensure_rows(df: DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        Err(PipelineError::EmptyResult)
    } else {
        Ok(df)
    }
}
