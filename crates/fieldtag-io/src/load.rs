//! Grid loading.
//!
//! Input files arrive as XLSX/XLS exports or as CSV dumps with unknown
//! encodings. Loading tries the spreadsheet formats first (calamine's
//! auto-detection), then falls back to CSV decoded as UTF-8 and finally as
//! Windows-1252, which subsumes the Latin-1 exports seen in the wild.

use calamine::{Data, Range, Reader, open_workbook_auto, open_workbook_auto_from_rs};
use chrono::NaiveDate;
use std::io::Cursor;
use std::path::Path;

use fieldtag_common::{Cell, RawGrid, serial_to_datetime};

use crate::error::LoadError;

fn convert_value(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Malformed cells degrade to blank rather than aborting the load.
        Data::Error(_) => Cell::Empty,
        Data::DateTime(dt) => Cell::Date(serial_to_datetime(dt.as_f64()).date()),
        Data::DateTimeIso(s) => Cell::from(s.as_str()),
        Data::DurationIso(s) => Cell::from(s.as_str()),
    }
}

fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let Some((end_row, end_col)) = range.end() else {
        return RawGrid::default();
    };
    let n_rows = end_row as usize + 1;
    let n_cols = end_col as usize + 1;
    let start = range.start().unwrap_or_default();

    let mut rows = vec![vec![Cell::Empty; n_cols]; n_rows];
    for (row, col, value) in range.used_cells() {
        let abs_row = row + start.0 as usize;
        let abs_col = col + start.1 as usize;
        rows[abs_row][abs_col] = convert_value(value);
    }
    RawGrid::from_rows(rows)
}

fn grid_from_workbook<RS>(mut sheets: calamine::Sheets<RS>) -> Result<RawGrid, LoadError>
where
    RS: std::io::Read + std::io::Seek,
{
    let Some(first) = sheets.sheet_names().first().cloned() else {
        return Err(LoadError::NoSheets);
    };
    let range = sheets
        .worksheet_range(&first)
        .map_err(|e| LoadError::Unreadable {
            spreadsheet: e.to_string(),
            csv: "not attempted".to_string(),
        })?;
    tracing::debug!(sheet = %first, "loaded worksheet");
    Ok(range_to_grid(&range))
}

/// Infer a cell from one CSV field: numbers and ISO dates are typed,
/// everything else stays text.
fn infer_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Cell::Number(n);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Cell::Date(d);
    }
    Cell::Text(field.to_string())
}

/// Decode raw bytes for CSV parsing: strict UTF-8 first, then Windows-1252,
/// which never fails and covers the cp1252/latin-1 exports.
fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::debug!("input is not UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn grid_from_csv(bytes: &[u8]) -> Result<RawGrid, csv::Error> {
    let decoded = decode_bytes(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        // Allow ragged rows; the grid pads missing cells as empty.
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(infer_field).collect());
    }
    Ok(RawGrid::from_rows(rows))
}

/// Load a grid from a file path. Spreadsheet formats are tried first; CSV is
/// the fallback.
pub fn load_grid(path: impl AsRef<Path>) -> Result<RawGrid, LoadError> {
    let path = path.as_ref();
    match open_workbook_auto(path) {
        Ok(sheets) => grid_from_workbook(sheets),
        Err(spreadsheet_err) => {
            tracing::debug!(
                error = %spreadsheet_err,
                "not a spreadsheet; falling back to CSV"
            );
            let bytes = std::fs::read(path)?;
            grid_from_csv(&bytes).map_err(|csv_err| LoadError::Unreadable {
                spreadsheet: spreadsheet_err.to_string(),
                csv: csv_err.to_string(),
            })
        }
    }
}

/// Load a grid from in-memory bytes (e.g. a browser upload).
pub fn load_grid_from_bytes(bytes: &[u8]) -> Result<RawGrid, LoadError> {
    match open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())) {
        Ok(sheets) => grid_from_workbook(sheets),
        Err(spreadsheet_err) => grid_from_csv(bytes).map_err(|csv_err| LoadError::Unreadable {
            spreadsheet: spreadsheet_err.to_string(),
            csv: csv_err.to_string(),
        }),
    }
}
