//! Sampling-grid parser: reconstructs the relational model from the
//! positionally-addressed wide layout.

use chrono::{NaiveDate, NaiveDateTime};
use fieldtag_common::{Analyte, Category, Cell, ModelParts, ParsedModel, RawGrid, ResultKey};

use crate::depth::extract_depth;
use crate::error::ParseError;
use crate::layout::{
    DATE_ROW, LOCATION_ROW, SAMPLE_NAME_ROW, data_start_row, detect_first_location_column,
    detect_standards_columns,
};

/// Parser configuration supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// When set, row-1 sample names are consulted and sampling events are
    /// addressed by (location, date, depth) instead of (location, date).
    pub depth_enabled: bool,
}

/// One data column resolved to its sampling event.
struct ColumnEvent {
    col: usize,
    location: String,
    date: String,
    depth: Option<String>,
}

/// Render a date-row cell to its canonical string form.
///
/// Date cells become ISO `YYYY-MM-DD`; text that parses as a date or
/// date-time is normalized the same way; anything else is stringified as-is.
fn normalize_date(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        Cell::Text(s) => {
            let t = s.trim();
            if t.is_empty() {
                return None;
            }
            if let Some(date) = parse_date_like(t) {
                return Some(date.format("%Y-%m-%d").to_string());
            }
            Some(t.to_string())
        }
        Cell::Number(n) => Some(n.to_string()),
    }
}

fn parse_date_like(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

/// The row that terminates the analyte region.
const NOTES_TERMINATOR: &str = "Notes:";

/// Parse a raw grid into the relational model.
///
/// Fails with [`ParseError`] when the grid is structurally unusable (empty,
/// no dated columns, no analyte rows); malformed individual cells degrade to
/// blanks instead of failing the parse.
pub fn parse(grid: &RawGrid, options: &ParseOptions) -> Result<ParsedModel, ParseError> {
    if grid.is_empty() {
        return Err(ParseError::EmptyGrid);
    }

    let first_location_col = detect_first_location_column(grid);
    let standards_columns = detect_standards_columns(grid, first_location_col);
    let data_start = data_start_row(grid);

    // Every location named in row 0 is part of the dataset, dated or not.
    let mut locations = Vec::new();
    for col in first_location_col..grid.n_cols() {
        if let Some(location) = grid.text(LOCATION_ROW, col) {
            locations.push(location);
        }
    }

    let mut events = Vec::new();
    let mut dated_columns = 0usize;
    for col in first_location_col..grid.n_cols() {
        let Some(location) = grid.text(LOCATION_ROW, col) else {
            continue;
        };
        let Some(date) = normalize_date(grid.cell(DATE_ROW, col)) else {
            continue;
        };
        dated_columns += 1;

        let depth = if options.depth_enabled {
            let sample_name = grid.text(SAMPLE_NAME_ROW, col);
            match sample_name
                .as_deref()
                .and_then(|name| extract_depth(name, &location))
            {
                Some(depth) => Some(depth),
                None => {
                    tracing::warn!(
                        col,
                        location = %location,
                        sample_name = sample_name.as_deref().unwrap_or(""),
                        "no depth derivable; column excluded from depth indexing"
                    );
                    continue;
                }
            }
        } else {
            None
        };

        events.push(ColumnEvent {
            col,
            location,
            date,
            depth,
        });
    }

    if dated_columns == 0 {
        return Err(ParseError::MissingDates { row: DATE_ROW });
    }

    let mut categories: Vec<Category> = Vec::new();
    let mut analytes: Vec<Analyte> = Vec::new();
    let mut parts = ModelParts {
        depth_qualified: options.depth_enabled,
        ..ModelParts::default()
    };

    let mut row = data_start;
    let mut open_category: Option<usize> = None;
    while row < grid.n_rows() {
        let col0 = grid.text(row, 0);
        if col0.as_deref() == Some(NOTES_TERMINATOR) {
            break;
        }
        let Some(name) = col0 else {
            row += 1;
            continue;
        };

        // A category row has a name in column 0 and nothing anywhere else.
        let is_category = (1..grid.n_cols()).all(|col| grid.cell(row, col).is_empty());
        if is_category {
            categories.push(Category {
                name,
                analytes: Vec::new(),
            });
            open_category = Some(categories.len() - 1);
        } else if let Some(cat_idx) = open_category {
            let standards: Vec<Option<f64>> = standards_columns
                .iter()
                .map(|sc| grid.cell(row, sc.col).as_f64())
                .collect();
            let threshold = standards.iter().copied().flatten().next();

            for event in &events {
                if let Some(value) = grid.text(row, event.col) {
                    parts.results.append(
                        ResultKey {
                            location: event.location.clone(),
                            date: event.date.clone(),
                            depth: event.depth.clone(),
                            analyte: name.clone(),
                        },
                        value,
                    );
                }
            }

            categories[cat_idx].analytes.push(name.clone());
            analytes.push(Analyte {
                name,
                category: categories[cat_idx].name.clone(),
                standards,
                threshold,
            });
        }
        row += 1;
    }

    if analytes.is_empty() {
        return Err(ParseError::NoAnalytes);
    }

    for event in &events {
        parts
            .location_dates
            .push((event.location.clone(), event.date.clone()));
        if let Some(depth) = &event.depth {
            parts.location_date_depths.push((
                event.location.clone(),
                event.date.clone(),
                depth.clone(),
            ));
        }
    }

    tracing::debug!(
        locations = locations.len(),
        analytes = analytes.len(),
        standards = standards_columns.len(),
        results = parts.results.len(),
        "parsed sampling grid"
    );

    parts.locations = locations;
    parts.categories = categories;
    parts.analytes = analytes;
    parts.standards_columns = standards_columns;
    Ok(ParsedModel::from_parts(parts))
}
