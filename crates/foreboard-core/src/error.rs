use foreboard_parser::{DateError, ParserError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Malformed date: {0}")]
    MalformedDate(String),

    #[error("No rows matched the selected filters")]
    EmptyResult,

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl From<DateError> for PipelineError {
    fn from(err: DateError) -> Self {
        PipelineError::MalformedDate(err.to_string())
    }
}

impl From<ParserError> for PipelineError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::Polars(inner) => PipelineError::Polars(inner),
            err @ ParserError::InvalidDate { .. } => PipelineError::MalformedDate(err.to_string()),
            other => PipelineError::MalformedInput(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
