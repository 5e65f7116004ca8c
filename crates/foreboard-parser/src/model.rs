use polars::prelude::*;

pub const SCORES_SHEET: &str = "Scores";
pub const COURSES_SHEET: &str = "Courses";

/// Column names shared by the parsed sheets and every derived table.
pub mod columns {
    pub const GOLFER: &str = "Golfer";
    pub const DATE: &str = "Date";
    pub const COURSE: &str = "Course";
    pub const TEE: &str = "Tee";
    pub const HOLE: &str = "Hole";
    pub const SCORE: &str = "Score";
    pub const PUTTS: &str = "Putts";
    pub const TEE_ACCURACY: &str = "TeeAccuracy";
    pub const APPROACH_ACCURACY: &str = "ApproachAccuracy";
    pub const PAR: &str = "Par";
}

/// Column-oriented buffer for the "Scores" sheet, one entry per hole played.
#[derive(Debug, Clone, Default)]
pub struct ScoreColumns {
    pub golfer: Vec<String>,
    /// Days since 1970-01-01.
    pub date: Vec<i32>,
    pub course: Vec<String>,
    pub tee: Vec<String>,
    pub hole: Vec<i64>,
    pub score: Vec<i64>,
    pub putts: Vec<i64>,
    pub tee_accuracy: Vec<Option<String>>,
    pub approach_accuracy: Vec<Option<String>>,
}

impl ScoreColumns {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            golfer: Vec::with_capacity(capacity),
            date: Vec::with_capacity(capacity),
            course: Vec::with_capacity(capacity),
            tee: Vec::with_capacity(capacity),
            hole: Vec::with_capacity(capacity),
            score: Vec::with_capacity(capacity),
            putts: Vec::with_capacity(capacity),
            tee_accuracy: Vec::with_capacity(capacity),
            approach_accuracy: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.golfer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.golfer.is_empty()
    }

    pub fn into_frame(self) -> PolarsResult<DataFrame> {
        let days = Series::new(columns::DATE.into(), self.date);
        let date = days.cast(&DataType::Date)?;

        DataFrame::new(vec![
            Series::new(columns::GOLFER.into(), self.golfer).into(),
            date.into(),
            Series::new(columns::COURSE.into(), self.course).into(),
            Series::new(columns::TEE.into(), self.tee).into(),
            Series::new(columns::HOLE.into(), self.hole).into(),
            Series::new(columns::SCORE.into(), self.score).into(),
            Series::new(columns::PUTTS.into(), self.putts).into(),
            Series::new(columns::TEE_ACCURACY.into(), self.tee_accuracy).into(),
            Series::new(columns::APPROACH_ACCURACY.into(), self.approach_accuracy).into(),
        ])
    }
}

/// Column-oriented buffer for the "Courses" reference sheet.
#[derive(Debug, Clone, Default)]
pub struct CourseColumns {
    pub course: Vec<String>,
    pub tee: Vec<String>,
    pub hole: Vec<i64>,
    pub par: Vec<i64>,
}

impl CourseColumns {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            course: Vec::with_capacity(capacity),
            tee: Vec::with_capacity(capacity),
            hole: Vec::with_capacity(capacity),
            par: Vec::with_capacity(capacity),
        }
    }

    pub fn into_frame(self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Series::new(columns::COURSE.into(), self.course).into(),
            Series::new(columns::TEE.into(), self.tee).into(),
            Series::new(columns::HOLE.into(), self.hole).into(),
            Series::new(columns::PAR.into(), self.par).into(),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct ParsedWorkbook {
    pub scores: DataFrame,
    pub courses: DataFrame,
}
