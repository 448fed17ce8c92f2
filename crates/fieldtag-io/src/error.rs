use thiserror::Error;

/// Fatal load failures. A caller holding a previously loaded model must
/// discard it when one of these surfaces — the old model does not describe
/// the file the user just tried to open.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("i/o error reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("unreadable input: not a spreadsheet ({spreadsheet}); CSV fallback failed ({csv})")]
    Unreadable { spreadsheet: String, csv: String },
}
