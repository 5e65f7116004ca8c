use chrono::NaiveDate;
use foreboard_parser::from_epoch_days;
use polars::prelude::*;
use serde::Serialize;

use crate::cache::{fingerprint, CacheKey, CacheStatus, SummaryCache};
use crate::columns::*;
use crate::error::{PipelineError, Result};

/// Rolls per-hole rows up to one row per (Golfer, Date, Course, Tee), sorted by that key.
/// Holes without a resolved par are left out.
pub fn summarize_rounds(df: &DataFrame) -> Result<DataFrame> {
    let summary = df
        .clone()
        .lazy()
        .filter(col(PAR).is_not_null())
        .group_by(ROUND_KEYS.map(col))
        .agg([
            col(SCORE).sum().alias(SCORE),
            col(SCORE_TO_PAR).sum().alias(SCORE_TO_PAR),
            col(PUTTS).sum().alias(PUTTS),
            col(PUTTS_TO_PAR).sum().alias(PUTTS_TO_PAR),
            col(HOLE).count().cast(DataType::Int64).alias(NUM_HOLES),
            col(GIR).cast(DataType::Int64).sum().alias(GREENS_HIT),
            col(GIR).cast(DataType::Float64).mean().alias(GIR),
            col(FIR).count().cast(DataType::Int64).alias(NUM_FAIRWAYS),
            col(FIR).cast(DataType::Int64).sum().alias(FAIRWAYS_HIT),
            col(FIR).cast(DataType::Float64).mean().alias(FIR),
        ])
        .sort(ROUND_KEYS, SortMultipleOptions::default())
        .collect()?;

    Ok(summary)
}

/// [`summarize_rounds`] memoized on the table's content fingerprint.
pub fn summarize_rounds_cached(
    df: &DataFrame,
    cache: &SummaryCache,
) -> Result<(DataFrame, CacheStatus)> {
    let key = CacheKey::new(fingerprint(df)?, ROUND_KEYS.join(","));
    cache.get_or_try_insert_with(key, || summarize_rounds(df))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub golfer: String,
    pub date: NaiveDate,
    pub course: String,
    pub tee: String,
    pub score: i64,
    pub score_to_par: i64,
    pub putts: i64,
    pub putts_to_par: i64,
    pub num_holes: i64,
    pub greens_hit: i64,
    pub gir: f64,
    pub num_fairways: i64,
    pub fairways_hit: i64,
    pub fir: Option<f64>,
}

/// Hit/miss split backing the per-round donut charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitMiss {
    pub hit: i64,
    pub missed: i64,
    /// Whole-number percentage, `None` when there was nothing to hit.
    pub percent: Option<f64>,
}

impl HitMiss {
    pub fn new(hit: i64, total: i64) -> Self {
        let ratio = hit as f64 / total as f64;
        let percent = (total > 0).then(|| (ratio * 100.0).round_ties_even());
        Self {
            hit,
            missed: total - hit,
            percent,
        }
    }
}

impl RoundSummary {
    pub fn greens(&self) -> HitMiss {
        HitMiss::new(self.greens_hit, self.num_holes)
    }

    pub fn fairways(&self) -> HitMiss {
        HitMiss::new(self.fairways_hit, self.num_fairways)
    }
}

/// Reads a summary table back into typed rows.
pub fn round_summaries(summary: &DataFrame) -> Result<Vec<RoundSummary>> {
    let golfer = summary.column(GOLFER)?.str()?;
    let date = summary.column(DATE)?.date()?;
    let course = summary.column(COURSE)?.str()?;
    let tee = summary.column(TEE)?.str()?;
    let score = summary.column(SCORE)?.i64()?;
    let score_to_par = summary.column(SCORE_TO_PAR)?.i64()?;
    let putts = summary.column(PUTTS)?.i64()?;
    let putts_to_par = summary.column(PUTTS_TO_PAR)?.i64()?;
    let num_holes = summary.column(NUM_HOLES)?.i64()?;
    let greens_hit = summary.column(GREENS_HIT)?.i64()?;
    let gir = summary.column(GIR)?.f64()?;
    let num_fairways = summary.column(NUM_FAIRWAYS)?.i64()?;
    let fairways_hit = summary.column(FAIRWAYS_HIT)?.i64()?;
    let fir = summary.column(FIR)?.f64()?;

    let mut rounds = Vec::with_capacity(summary.height());
    for idx in 0..summary.height() {
        let day = date
            .get(idx)
            .and_then(from_epoch_days)
            .ok_or_else(|| PipelineError::MalformedDate(format!("no date in row {idx}")))?;

        rounds.push(RoundSummary {
            golfer: golfer.get(idx).unwrap_or_default().to_string(),
            date: day,
            course: course.get(idx).unwrap_or_default().to_string(),
            tee: tee.get(idx).unwrap_or_default().to_string(),
            score: score.get(idx).unwrap_or_default(),
            score_to_par: score_to_par.get(idx).unwrap_or_default(),
            putts: putts.get(idx).unwrap_or_default(),
            putts_to_par: putts_to_par.get(idx).unwrap_or_default(),
            num_holes: num_holes.get(idx).unwrap_or_default(),
            greens_hit: greens_hit.get(idx).unwrap_or_default(),
            gir: gir.get(idx).unwrap_or_default(),
            num_fairways: num_fairways.get(idx).unwrap_or_default(),
            fairways_hit: fairways_hit.get(idx).unwrap_or_default(),
            fir: fir.get(idx),
        });
    }

    Ok(rounds)
}
