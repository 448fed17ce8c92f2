use thiserror::Error;

/// Fatal parse failures: the grid does not match the sampling-sheet
/// convention and no partial model is exposed.
///
/// Malformed *cells* never surface here — individual oddities degrade to
/// blanks or "no standard" during parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input grid is empty")]
    EmptyGrid,

    #[error("no sample dates found in the date row (row {row})")]
    MissingDates { row: usize },

    #[error("no analyte rows found before the notes terminator")]
    NoAnalytes,
}
