use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::dates::to_epoch_days;
use crate::errors::ParserError;
use crate::model::{
    columns, CourseColumns, ParsedWorkbook, ScoreColumns, COURSES_SHEET, SCORES_SHEET,
};
use crate::sheet::SheetTable;

/// Anything that can hand out named worksheets.
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;
    fn read_sheet(&mut self, name: &str) -> Result<Range<Data>, ParserError>;
}

impl<RS: Read + Seek> SheetSource for Sheets<RS> {
    fn sheet_names(&self) -> Vec<String> {
        Reader::sheet_names(self)
    }

    fn read_sheet(&mut self, name: &str) -> Result<Range<Data>, ParserError> {
        Ok(self.worksheet_range(name)?)
    }
}

/// Sheets held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, Range<Data>)>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, range: Range<Data>) -> Self {
        self.sheets.push((name.into(), range));
        self
    }
}

impl SheetSource for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Range<Data>, ParserError> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, range)| range.clone())
            .ok_or_else(|| ParserError::MissingSheet {
                sheet: name.to_string(),
            })
    }
}

/// Builds a worksheet range anchored at A1 from row-major cells.
pub fn sheet_from_rows(rows: Vec<Vec<Data>>) -> Range<Data> {
    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Range::empty();
    }

    let mut range = Range::new((0, 0), ((height - 1) as u32, (width - 1) as u32));
    for (row_idx, row) in rows.into_iter().enumerate() {
        for (col_idx, value) in row.into_iter().enumerate() {
            range.set_value((row_idx as u32, col_idx as u32), value);
        }
    }
    range
}

pub fn parse_workbook_bytes(bytes: &[u8]) -> Result<ParsedWorkbook, ParserError> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    parse_workbook(&mut sheets)
}

pub fn parse_workbook_file(path: &Path) -> Result<ParsedWorkbook, ParserError> {
    let mut sheets = open_workbook_auto(path)?;
    parse_workbook(&mut sheets)
}

pub fn parse_workbook<S: SheetSource + ?Sized>(
    source: &mut S,
) -> Result<ParsedWorkbook, ParserError> {
    let names = source.sheet_names();
    let scores_range = read_required(source, &names, SCORES_SHEET)?;
    let courses_range = read_required(source, &names, COURSES_SHEET)?;

    let scores = parse_scores(&SheetTable::new(SCORES_SHEET, &scores_range))?;
    if scores.is_empty() {
        return Err(ParserError::EmptyData {
            sheet: SCORES_SHEET,
        });
    }
    let courses = parse_courses(&SheetTable::new(COURSES_SHEET, &courses_range))?;

    Ok(ParsedWorkbook {
        scores: scores.into_frame()?,
        courses: courses.into_frame()?,
    })
}

fn read_required<S: SheetSource + ?Sized>(
    source: &mut S,
    names: &[String],
    sheet: &'static str,
) -> Result<Range<Data>, ParserError> {
    if !names.iter().any(|name| name == sheet) {
        return Err(ParserError::MissingSheet {
            sheet: sheet.to_string(),
        });
    }
    source.read_sheet(sheet)
}

fn parse_scores(table: &SheetTable<'_>) -> Result<ScoreColumns, ParserError> {
    let golfer = table.column(columns::GOLFER)?;
    let date = table.column(columns::DATE)?;
    let course = table.column(columns::COURSE)?;
    let tee = table.column(columns::TEE)?;
    let hole = table.column(columns::HOLE)?;
    let score = table.column(columns::SCORE)?;
    let putts = table.column(columns::PUTTS)?;
    let tee_accuracy = table.column(columns::TEE_ACCURACY)?;
    let approach_accuracy = table.column(columns::APPROACH_ACCURACY)?;

    let mut out = ScoreColumns::with_capacity(table.row_count_hint());
    for row in table.data_rows() {
        out.golfer.push(row.text(golfer, columns::GOLFER)?);
        out.date.push(to_epoch_days(row.date(date, columns::DATE)?));
        out.course.push(row.text(course, columns::COURSE)?);
        out.tee.push(row.text(tee, columns::TEE)?);
        out.hole.push(row.integer(hole, columns::HOLE)?);
        out.score.push(row.integer(score, columns::SCORE)?);
        out.putts.push(row.integer(putts, columns::PUTTS)?);
        out.tee_accuracy
            .push(row.accuracy(tee_accuracy, columns::TEE_ACCURACY)?);
        out.approach_accuracy
            .push(row.accuracy(approach_accuracy, columns::APPROACH_ACCURACY)?);
    }

    Ok(out)
}

fn parse_courses(table: &SheetTable<'_>) -> Result<CourseColumns, ParserError> {
    let course = table.column(columns::COURSE)?;
    let tee = table.column(columns::TEE)?;
    let hole = table.column(columns::HOLE)?;
    let par = table.column(columns::PAR)?;

    let mut out = CourseColumns::with_capacity(table.row_count_hint());
    for row in table.data_rows() {
        out.course.push(row.text(course, columns::COURSE)?);
        out.tee.push(row.text(tee, columns::TEE)?);
        out.hole.push(row.integer(hole, columns::HOLE)?);
        out.par.push(row.integer(par, columns::PAR)?);
    }

    Ok(out)
}
