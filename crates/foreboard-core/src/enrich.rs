use std::collections::HashMap;
use std::path::Path;

use foreboard_parser::{parse_workbook_bytes, parse_workbook_file, ParsedWorkbook};
use polars::prelude::*;

use crate::columns::*;
use crate::error::{PipelineError, Result};

/// Putts a regulation hole budgets for once the green is reached.
pub const EXPECTED_PUTTS: i64 = 2;

/// Reads an uploaded workbook, or the default file when nothing was uploaded, and returns
/// the enriched per-hole table.
pub fn ingest_workbook(bytes: Option<&[u8]>, default_file: &Path) -> Result<DataFrame> {
    let workbook = match bytes {
        Some(bytes) => parse_workbook_bytes(bytes)?,
        None => parse_workbook_file(default_file)?,
    };
    enrich(&workbook)
}

pub fn enrich(workbook: &ParsedWorkbook) -> Result<DataFrame> {
    let joined = join_par(&workbook.scores, &workbook.courses)?;
    Ok(derive_hole_metrics(&joined)?)
}

/// Left-joins `Par` onto the score rows by (Course, Tee, Hole). Unmatched rows keep a null
/// `Par`; a table where nothing matches is rejected as the wrong file.
pub fn join_par(scores: &DataFrame, courses: &DataFrame) -> Result<DataFrame> {
    let ref_course = courses.column(COURSE)?.str()?;
    let ref_tee = courses.column(TEE)?.str()?;
    let ref_hole = courses.column(HOLE)?.i64()?;
    let ref_par = courses.column(PAR)?.i64()?;

    let mut par_by_hole = HashMap::with_capacity(courses.height());
    for idx in 0..courses.height() {
        let (Some(course), Some(tee), Some(hole), Some(par)) = (
            ref_course.get(idx),
            ref_tee.get(idx),
            ref_hole.get(idx),
            ref_par.get(idx),
        ) else {
            continue;
        };

        if par_by_hole.insert((course, tee, hole), par).is_some() {
            return Err(PipelineError::MalformedInput(format!(
                "Courses sheet lists {course} / {tee} / hole {hole} more than once"
            )));
        }
    }

    let course = scores.column(COURSE)?.str()?;
    let tee = scores.column(TEE)?.str()?;
    let hole = scores.column(HOLE)?.i64()?;

    let mut par = Vec::with_capacity(scores.height());
    let mut matched = 0usize;
    for idx in 0..scores.height() {
        let key = (course.get(idx), tee.get(idx), hole.get(idx));
        let value = match key {
            (Some(course), Some(tee), Some(hole)) => par_by_hole.get(&(course, tee, hole)),
            _ => None,
        };
        if value.is_some() {
            matched += 1;
        }
        par.push(value.copied());
    }

    if scores.height() > 0 && matched == 0 {
        return Err(PipelineError::MalformedInput(
            "no score row matched a course, tee and hole in the Courses sheet".to_string(),
        ));
    }

    let mut output = scores.clone();
    output.with_column(Series::new(PAR.into(), par))?;
    Ok(output)
}

pub fn derive_hole_metrics(df: &DataFrame) -> std::result::Result<DataFrame, PolarsError> {
    let len = df.height();

    let score = df.column(SCORE)?.i64()?;
    let putts = df.column(PUTTS)?.i64()?;
    let par = df.column(PAR)?.i64()?;
    let tee_accuracy = df.column(TEE_ACCURACY)?.str()?;

    let mut score_to_par = Vec::with_capacity(len);
    let mut putts_to_par = Vec::with_capacity(len);
    let mut gir = Vec::with_capacity(len);
    let mut fir = Vec::with_capacity(len);

    for idx in 0..len {
        let (score, putts, par) = (score.get(idx), putts.get(idx), par.get(idx));

        score_to_par.push(score.zip(par).map(|(score, par)| score - par));
        putts_to_par.push(putts.map(|putts| putts - EXPECTED_PUTTS));
        gir.push(match (score, putts, par) {
            (Some(score), Some(putts), Some(par)) => Some(green_in_regulation(score, putts, par)),
            _ => None,
        });
        let tee = tee_accuracy.get(idx);
        fir.push(par.and_then(|par| fairway_in_regulation(par, tee)));
    }

    let mut output = df.clone();
    output.hstack_mut(&[
        Series::new(SCORE_TO_PAR.into(), score_to_par).into(),
        Series::new(PUTTS_TO_PAR.into(), putts_to_par).into(),
        Series::new(GIR.into(), gir).into(),
        Series::new(FIR.into(), fir).into(),
    ])?;

    Ok(output)
}

/// Non-putt strokes within the par allowance for reaching the green.
pub fn green_in_regulation(score: i64, putts: i64, par: i64) -> bool {
    score - putts <= par - EXPECTED_PUTTS
}

/// `None` on par 3s and shorter, where there is no fairway to hit.
pub fn fairway_in_regulation(par: i64, tee_accuracy: Option<&str>) -> Option<bool> {
    (par > 3).then(|| tee_accuracy == Some("H"))
}

/// Rows whose course/tee/hole never resolved to a par.
pub fn unmatched_holes(df: &DataFrame) -> Result<usize> {
    Ok(df.column(PAR)?.null_count())
}
