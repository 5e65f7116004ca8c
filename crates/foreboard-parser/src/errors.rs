use polars::prelude::PolarsError;
use thiserror::Error;

use crate::dates::DateError;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("workbook could not be read: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook is missing required sheet {sheet:?}")]
    MissingSheet { sheet: String },

    #[error("sheet {sheet:?} is missing required column {column:?}")]
    MissingColumn {
        sheet: &'static str,
        column: &'static str,
    },

    #[error("sheet {sheet:?} row {row} column {column:?} invalid: {message}")]
    InvalidCell {
        sheet: &'static str,
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("sheet {sheet:?} row {row} column {column:?}: {source}")]
    InvalidDate {
        sheet: &'static str,
        row: usize,
        column: &'static str,
        #[source]
        source: DateError,
    },

    #[error("sheet {sheet:?} did not contain any data rows")]
    EmptyData { sheet: &'static str },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
