use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use foreboard_parser::from_epoch_days;
use polars::prelude::*;
use serde::Serialize;

use crate::columns::*;
use crate::error::Result;

/// Mean score-to-par per par value, ascending by par.
pub fn score_to_par_by_par(df: &DataFrame) -> Result<DataFrame> {
    let by_par = df
        .clone()
        .lazy()
        .filter(col(PAR).is_not_null())
        .group_by([col(PAR)])
        .agg([col(SCORE_TO_PAR)
            .cast(DataType::Float64)
            .mean()
            .alias(SCORE_TO_PAR)])
        .sort([PAR], SortMultipleOptions::default())
        .collect()?;

    Ok(by_par)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyColumn {
    Tee,
    Approach,
}

impl AccuracyColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            AccuracyColumn::Tee => TEE_ACCURACY,
            AccuracyColumn::Approach => APPROACH_ACCURACY,
        }
    }
}

/// Shot direction: left of target, on target, right of target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AccuracyCategory {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "H")]
    Hit,
    #[serde(rename = "R")]
    Right,
}

impl AccuracyCategory {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(AccuracyCategory::Left),
            "H" => Some(AccuracyCategory::Hit),
            "R" => Some(AccuracyCategory::Right),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AccuracyCategory::Left => "L",
            AccuracyCategory::Hit => "H",
            AccuracyCategory::Right => "R",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccuracyCount {
    pub category: AccuracyCategory,
    pub par: i64,
    pub count: usize,
}

/// Shots per (direction, par), ordered L, H, R then by par. Unknown codes, nulls and
/// unmatched holes are skipped.
pub fn accuracy_counts(df: &DataFrame, column: AccuracyColumn) -> Result<Vec<AccuracyCount>> {
    let accuracy = df.column(column.column_name())?.str()?;
    let par = df.column(PAR)?.i64()?;

    let mut counts: BTreeMap<(AccuracyCategory, i64), usize> = BTreeMap::new();
    for idx in 0..df.height() {
        let (Some(category), Some(par)) = (
            accuracy.get(idx).and_then(AccuracyCategory::from_code),
            par.get(idx),
        ) else {
            continue;
        };
        *counts.entry((category, par)).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|((category, par), count)| AccuracyCount {
            category,
            par,
            count,
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegulationCount {
    pub fir: Option<bool>,
    pub gir: Option<bool>,
    pub holes: usize,
}

/// Holes per (FIR, GIR) combination, hits first.
pub fn regulation_breakdown(df: &DataFrame) -> Result<Vec<RegulationCount>> {
    let fir = df.column(FIR)?.bool()?;
    let gir = df.column(GIR)?.bool()?;

    let mut counts: BTreeMap<(Option<bool>, Option<bool>), usize> = BTreeMap::new();
    for idx in 0..df.height() {
        *counts.entry((fir.get(idx), gir.get(idx))).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .rev()
        .map(|((fir, gir), holes)| RegulationCount { fir, gir, holes })
        .collect())
}

/// Choices for the golfer/course selectors and the date picker bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub golfers: Vec<String>,
    pub courses: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn from_table(df: &DataFrame) -> Result<Self> {
        let golfer = df.column(GOLFER)?.str()?;
        let course = df.column(COURSE)?.str()?;
        let date = df.column(DATE)?.date()?;

        let mut golfers = BTreeSet::new();
        let mut courses = BTreeSet::new();
        let mut first: Option<i32> = None;
        let mut last: Option<i32> = None;

        for idx in 0..df.height() {
            if let Some(name) = golfer.get(idx) {
                golfers.insert(name.to_string());
            }
            if let Some(name) = course.get(idx) {
                courses.insert(name.to_string());
            }
            if let Some(day) = date.get(idx) {
                first = Some(first.map_or(day, |current| current.min(day)));
                last = Some(last.map_or(day, |current| current.max(day)));
            }
        }

        Ok(Self {
            golfers: golfers.into_iter().collect(),
            courses: courses.into_iter().collect(),
            first_date: first.and_then(from_epoch_days),
            last_date: last.and_then(from_epoch_days),
        })
    }
}
