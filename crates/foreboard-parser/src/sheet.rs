use std::collections::HashMap;

use calamine::{Data, DataType, Range};
use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::errors::ParserError;

static EMPTY_CELL: Data = Data::Empty;

/// A worksheet whose first row names the columns.
pub(crate) struct SheetTable<'a> {
    sheet: &'static str,
    range: &'a Range<Data>,
    header: HashMap<String, usize>,
    first_row: usize,
}

impl<'a> SheetTable<'a> {
    pub(crate) fn new(sheet: &'static str, range: &'a Range<Data>) -> Self {
        let header = range
            .rows()
            .next()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(idx, cell)| match cell {
                        Data::Empty => None,
                        other => Some((other.to_string().trim().to_string(), idx)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        Self {
            sheet,
            range,
            header,
            first_row,
        }
    }

    pub(crate) fn column(&self, column: &'static str) -> Result<usize, ParserError> {
        self.header
            .get(column)
            .copied()
            .ok_or(ParserError::MissingColumn {
                sheet: self.sheet,
                column,
            })
    }

    /// Non-blank rows below the header, paired with their 1-based spreadsheet row number.
    pub(crate) fn data_rows(&self) -> impl Iterator<Item = DataRow<'_>> + '_ {
        let first_row = self.first_row;
        let sheet = self.sheet;
        self.range
            .rows()
            .enumerate()
            .skip(1)
            .filter(|(_, cells)| cells.iter().any(|cell| !cell.is_empty()))
            .map(move |(idx, cells)| DataRow {
                sheet,
                row: first_row + idx + 1,
                cells,
            })
    }

    pub(crate) fn row_count_hint(&self) -> usize {
        self.range.height().saturating_sub(1)
    }
}

pub(crate) struct DataRow<'a> {
    sheet: &'static str,
    row: usize,
    cells: &'a [Data],
}

impl DataRow<'_> {
    fn cell(&self, idx: usize) -> &Data {
        self.cells.get(idx).unwrap_or(&EMPTY_CELL)
    }

    fn invalid(&self, column: &'static str, message: impl Into<String>) -> ParserError {
        ParserError::InvalidCell {
            sheet: self.sheet,
            row: self.row,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn optional_text(
        &self,
        idx: usize,
        column: &'static str,
    ) -> Result<Option<String>, ParserError> {
        match self.cell(idx) {
            Data::Empty => Ok(None),
            Data::Error(err) => Err(self.invalid(column, format!("cell error {err:?}"))),
            Data::String(value) => {
                let trimmed = value.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Data::Float(value) if value.fract() == 0.0 => Ok(Some(format!("{}", *value as i64))),
            other => Ok(Some(other.to_string())),
        }
    }

    pub(crate) fn text(&self, idx: usize, column: &'static str) -> Result<String, ParserError> {
        self.optional_text(idx, column)?
            .ok_or_else(|| self.invalid(column, "value is required"))
    }

    /// Shot-direction code, trimmed and upper-cased; blank cells are null.
    pub(crate) fn accuracy(
        &self,
        idx: usize,
        column: &'static str,
    ) -> Result<Option<String>, ParserError> {
        Ok(self
            .optional_text(idx, column)?
            .map(|value| value.to_ascii_uppercase()))
    }

    pub(crate) fn integer(&self, idx: usize, column: &'static str) -> Result<i64, ParserError> {
        match self.cell(idx) {
            Data::Int(value) => Ok(*value),
            Data::Float(value) if value.fract() == 0.0 => Ok(*value as i64),
            Data::String(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|err| self.invalid(column, format!("{value:?}: {err}"))),
            Data::Empty => Err(self.invalid(column, "value is required")),
            other => Err(self.invalid(column, format!("expected an integer, found {other}"))),
        }
    }

    pub(crate) fn date(&self, idx: usize, column: &'static str) -> Result<NaiveDate, ParserError> {
        let cell = self.cell(idx);
        match cell {
            Data::DateTime(_) | Data::DateTimeIso(_) => cell
                .as_date()
                .ok_or_else(|| self.invalid(column, format!("unreadable date {cell}"))),
            Data::Empty => Err(self.invalid(column, "value is required")),
            Data::String(value) => self.parse_text_date(value, column),
            Data::Int(value) => self.parse_text_date(&value.to_string(), column),
            Data::Float(value) if value.fract() == 0.0 => {
                self.parse_text_date(&format!("{}", *value as i64), column)
            }
            other => Err(self.invalid(column, format!("expected a date, found {other}"))),
        }
    }

    fn parse_text_date(&self, value: &str, column: &'static str) -> Result<NaiveDate, ParserError> {
        parse_date(value).map_err(|source| ParserError::InvalidDate {
            sheet: self.sheet,
            row: self.row,
            column,
            source,
        })
    }
}
