//! Layout detection for the fixed sampling-sheet convention.
//!
//! The header region left of the data columns has variable width depending on
//! how many regulatory standards columns a sheet carries, so the first
//! location column is found by content rather than by a fixed offset.

use fieldtag_common::{RawGrid, StandardsColumn};

/// Row 0: location ID repeated across each location's data columns.
pub const LOCATION_ROW: usize = 0;
/// Row 1: per-column sample name; only consulted in depth-qualified mode.
pub const SAMPLE_NAME_ROW: usize = 1;
/// Row 3: per-column sample date.
pub const DATE_ROW: usize = 3;
/// Default index of the header row carrying the "Analyte" token in column 0.
pub const DEFAULT_ANALYTE_HEADER_ROW: usize = 4;
/// Fallback when no column qualifies as the first location column.
pub const DEFAULT_FIRST_LOCATION_COL: usize = 3;
/// How many analyte data rows are probed when qualifying a standards column.
const STANDARDS_PROBE_ROWS: usize = 15;
/// How far down the sheet the "Analyte" header token is searched for.
const HEADER_SEARCH_ROWS: usize = 10;

/// Row-0 labels that belong to the header region, never to a location.
const RESERVED_HEADERS: [&str; 9] = [
    "AWQS",
    "Analyte",
    "Threshold",
    "Sample Name",
    "Location ID",
    "Location Name",
    "Date",
    "Sample Date",
    "Parent Sample Name",
];

fn is_reserved_header(label: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(label))
}

/// Find the first data (location) column.
///
/// Scans row 0 left to right for a cell that is non-empty, not a known header
/// label, and whose date-row cell is also populated. Falls back to
/// [`DEFAULT_FIRST_LOCATION_COL`] when nothing qualifies.
pub fn detect_first_location_column(grid: &RawGrid) -> usize {
    for col in 0..grid.n_cols() {
        let Some(header) = grid.text(LOCATION_ROW, col) else {
            continue;
        };
        if is_reserved_header(&header) {
            continue;
        }
        if grid.cell(DATE_ROW, col).is_empty() {
            continue;
        }
        tracing::debug!(col, header = %header, "detected first location column");
        return col;
    }
    tracing::debug!(
        fallback = DEFAULT_FIRST_LOCATION_COL,
        "no location column detected; using fallback"
    );
    DEFAULT_FIRST_LOCATION_COL
}

/// Row whose column 0 carries the literal "Analyte" token, if present.
pub fn detect_analyte_header_row(grid: &RawGrid) -> Option<usize> {
    (0..HEADER_SEARCH_ROWS.min(grid.n_rows()))
        .find(|&row| {
            grid.text(row, 0)
                .is_some_and(|t| t.eq_ignore_ascii_case("Analyte"))
        })
}

/// First row of category/analyte data.
pub fn data_start_row(grid: &RawGrid) -> usize {
    detect_analyte_header_row(grid)
        .map(|row| row + 1)
        .unwrap_or(DEFAULT_ANALYTE_HEADER_ROW + 1)
}

/// Detect the regulatory standards columns between the analyte-name column
/// and the first location column.
///
/// A column qualifies only if at least one of the first
/// [`STANDARDS_PROBE_ROWS`] analyte data rows holds a float-parseable value;
/// free-text notes columns are excluded. Header names come from the analyte
/// header row (row 0 as fallback); an empty header synthesizes
/// `"Standard {col}"`. Duplicate names are allowed — each column keeps its
/// own index.
pub fn detect_standards_columns(
    grid: &RawGrid,
    first_location_col: usize,
) -> Vec<StandardsColumn> {
    let names_row = detect_analyte_header_row(grid).unwrap_or(0);
    let data_start = data_start_row(grid);

    let mut columns = Vec::new();
    for col in 1..first_location_col {
        let has_numeric = (data_start..data_start + STANDARDS_PROBE_ROWS)
            .any(|row| grid.cell(row, col).as_f64().is_some());
        if !has_numeric {
            tracing::debug!(col, "column has no numeric values; not a standards column");
            continue;
        }
        let name = grid
            .text(names_row, col)
            .unwrap_or_else(|| format!("Standard {col}"));
        columns.push(StandardsColumn { name, col });
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtag_common::Cell;

    fn cells(row: &[&str]) -> Vec<Cell> {
        row.iter().map(|s| Cell::from(*s)).collect()
    }

    fn grid_with_standards() -> RawGrid {
        RawGrid::from_rows(vec![
            cells(&["Location ID", "AWQS", "Notes", "MW-1", "MW-1"]),
            cells(&["Sample Name", "", "", "MW-1-0215", "MW-1-0318"]),
            cells(&["", "", "", "", ""]),
            cells(&["Sample Date", "", "", "2024-02-15", "2024-03-18"]),
            cells(&["Analyte", "AWQS", "Notes", "", ""]),
            cells(&["Metals", "", "", "", ""]),
            vec![
                Cell::from("Lead"),
                Cell::Number(5.0),
                Cell::from("see lab sheet"),
                Cell::from("7.2"),
                Cell::from("4.1"),
            ],
        ])
    }

    #[test]
    fn first_location_column_skips_reserved_headers() {
        let grid = grid_with_standards();
        assert_eq!(detect_first_location_column(&grid), 3);
    }

    #[test]
    fn first_location_column_requires_populated_date() {
        // "MW-9" has no date beneath it, so detection moves on.
        let grid = RawGrid::from_rows(vec![
            cells(&["Location ID", "MW-9", "MW-1"]),
            cells(&["", "", ""]),
            cells(&["", "", ""]),
            cells(&["Sample Date", "", "2024-02-15"]),
        ]);
        assert_eq!(detect_first_location_column(&grid), 2);
    }

    #[test]
    fn fallback_when_nothing_qualifies() {
        let grid = RawGrid::from_rows(vec![cells(&["Location ID", "Analyte"])]);
        assert_eq!(
            detect_first_location_column(&grid),
            DEFAULT_FIRST_LOCATION_COL
        );
    }

    #[test]
    fn standards_detection_excludes_text_only_columns() {
        let grid = grid_with_standards();
        let columns = detect_standards_columns(&grid, 3);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "AWQS");
        assert_eq!(columns[0].col, 1);
    }

    #[test]
    fn unnamed_standards_column_gets_synthesized_name() {
        let grid = RawGrid::from_rows(vec![
            cells(&["Location ID", "", "MW-1"]),
            cells(&["", "", ""]),
            cells(&["", "", ""]),
            cells(&["Sample Date", "", "2024-02-15"]),
            cells(&["Analyte", "", ""]),
            cells(&["Metals", "", ""]),
            vec![Cell::from("Lead"), Cell::Number(5.0), Cell::from("7.2")],
        ]);
        let columns = detect_standards_columns(&grid, 2);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "Standard 1");
    }
}
