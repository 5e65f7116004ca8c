use std::path::Path;
use std::sync::Arc;

use foreboard_core::columns::{PAR, SCORE_TO_PAR};
use foreboard_core::views::{accuracy_counts, regulation_breakdown, score_to_par_by_par};
use foreboard_core::{
    ensure_rows, filter_table, ingest_workbook, round_summaries, summarize_rounds_cached,
    unmatched_holes, AccuracyColumn, FilterOptions, FilterParams, Result, SummaryCache,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use crate::metric::{AccuracyRow, Metric, ParScore, View};

/// One uploaded workbook. Interactions never mutate the table; the summary cache is the
/// only state shared across sessions.
pub struct Session {
    table: DataFrame,
    cache: Arc<SummaryCache>,
}

impl Session {
    pub fn load(
        upload: Option<&[u8]>,
        default_file: &Path,
        cache: Arc<SummaryCache>,
    ) -> Result<Self> {
        match upload {
            Some(bytes) => info!(bytes = bytes.len(), "Reading uploaded workbook"),
            None => info!(path = %default_file.display(), "Reading default workbook"),
        }

        let table = ingest_workbook(upload, default_file)?;
        let unmatched = unmatched_holes(&table)?;
        if unmatched > 0 {
            warn!(unmatched, "Holes with no matching par are left out of round totals");
        }
        info!(rows = table.height(), "Workbook enriched");

        Ok(Self::from_table(table, cache))
    }

    pub fn from_table(table: DataFrame, cache: Arc<SummaryCache>) -> Self {
        Self { table, cache }
    }

    pub fn table(&self) -> &DataFrame {
        &self.table
    }

    pub fn options(&self) -> Result<View> {
        Ok(View::Options(FilterOptions::from_table(&self.table)?))
    }

    pub fn view(&self, metric: Metric, params: &FilterParams) -> Result<View> {
        let filtered = ensure_rows(filter_table(&self.table, params)?)?;
        debug!(
            metric = metric.label(),
            window = ?params.dates,
            golfers = params.golfers.len(),
            courses = params.courses.len(),
            rows = filtered.height(),
            "Filtered holes"
        );

        match metric {
            Metric::Scores => {
                let (summary, status) = summarize_rounds_cached(&filtered, &self.cache)?;
                debug!(cache = ?status, "Round summary ready");
                let mut rounds = round_summaries(&summary)?;
                rounds.sort_by(|a, b| b.date.cmp(&a.date));
                Ok(View::Rounds(rounds))
            }
            Metric::ScoreToPar => {
                let by_par = score_to_par_by_par(&filtered)?;
                let par = by_par.column(PAR)?.i64()?;
                let mean = by_par.column(SCORE_TO_PAR)?.f64()?;
                let rows = (0..by_par.height())
                    .filter_map(|idx| {
                        Some(ParScore {
                            par: par.get(idx)?,
                            mean_score_to_par: mean.get(idx)?,
                        })
                    })
                    .collect();
                Ok(View::ScoreToPar(rows))
            }
            Metric::Accuracy => {
                let mut rows = AccuracyRow::from_counts(
                    AccuracyColumn::Tee.column_name(),
                    accuracy_counts(&filtered, AccuracyColumn::Tee)?,
                );
                rows.extend(AccuracyRow::from_counts(
                    AccuracyColumn::Approach.column_name(),
                    accuracy_counts(&filtered, AccuracyColumn::Approach)?,
                ));
                Ok(View::Accuracy(rows))
            }
            Metric::InRegulation => Ok(View::InRegulation(regulation_breakdown(&filtered)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use foreboard_core::{enrich, DateWindow, ParsedWorkbook, PipelineError};
    use polars::prelude::*;

    use super::*;

    fn session() -> Session {
        let mut scores = df!(
            "Golfer" => &["A", "A", "A", "A"],
            "Date" => &[19_358i32, 19_358, 19_389, 19_389],
            "Course" => &["X", "X", "X", "X"],
            "Tee" => &["Blue", "Blue", "Blue", "Blue"],
            "Hole" => &[1i64, 2, 1, 2],
            "Score" => &[5i64, 4, 4, 3],
            "Putts" => &[2i64, 1, 2, 2],
            "TeeAccuracy" => &[Some("H"), None, Some("L"), None],
            "ApproachAccuracy" => &[Some("R"), Some("H"), None, Some("H")],
        )
        .unwrap();
        let days = scores.column("Date").unwrap();
        let date = days.cast(&DataType::Date).unwrap();
        scores.with_column(date).unwrap();

        let courses = df!(
            "Course" => &["X", "X"],
            "Tee" => &["Blue", "Blue"],
            "Hole" => &[1i64, 2],
            "Par" => &[4i64, 3],
        )
        .unwrap();

        let table = enrich(&ParsedWorkbook { scores, courses }).unwrap();
        Session::from_table(table, Arc::new(SummaryCache::default()))
    }

    #[test]
    fn scores_view_lists_latest_round_first() {
        let params = FilterParams::new();
        let view = session().view(Metric::Scores, &params).unwrap();
        let View::Rounds(rounds) = view else {
            panic!("expected rounds");
        };

        assert_eq!(rounds.len(), 2);
        assert!(rounds[0].date > rounds[1].date);
        assert_eq!(rounds[1].score, 9);
    }

    #[test]
    fn repeated_interactions_share_one_cached_summary() {
        let session = session();
        let params = FilterParams::new().with_dates(DateWindow::LastRounds(20));

        session.view(Metric::Scores, &params).unwrap();
        session.view(Metric::Scores, &params).unwrap();

        assert_eq!(session.cache.len(), 1);
    }

    #[test]
    fn accuracy_view_tags_each_shot_type() {
        let params = FilterParams::new();
        let view = session().view(Metric::Accuracy, &params).unwrap();
        let View::Accuracy(rows) = view else {
            panic!("expected accuracy rows");
        };

        assert!(rows.iter().any(|row| row.shot == "TeeAccuracy"));
        assert!(rows.iter().any(|row| row.shot == "ApproachAccuracy"));
        assert_eq!(rows.iter().map(|row| row.count).sum::<usize>(), 5);
    }

    #[test]
    fn empty_filter_result_is_reported() {
        let params = FilterParams::new().with_courses(["Nowhere"]);
        let err = session().view(Metric::ScoreToPar, &params).unwrap_err();

        assert!(matches!(err, PipelineError::EmptyResult));
    }
}
