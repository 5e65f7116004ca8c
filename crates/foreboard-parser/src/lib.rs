pub mod dates;
pub mod errors;
pub mod model;
mod sheet;
mod source;

pub use dates::{from_epoch_days, parse_date, to_epoch_days, DateError};
pub use errors::ParserError;
pub use model::{columns, CourseColumns, ParsedWorkbook, ScoreColumns, COURSES_SHEET, SCORES_SHEET};
pub use source::{
    parse_workbook, parse_workbook_bytes, parse_workbook_file, sheet_from_rows, InMemoryWorkbook,
    SheetSource,
};
