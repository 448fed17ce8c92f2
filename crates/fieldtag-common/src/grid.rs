use crate::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable 2-D array of untyped cells, indexed from (0, 0).
///
/// This is the source of truth for a loaded file: built once by a loader,
/// frozen, then read positionally by the layout detector and parser.
/// Out-of-bounds reads yield [`Cell::Empty`] so callers can probe fixed
/// row/column positions without bounds bookkeeping.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
    n_cols: usize,
}

const EMPTY: Cell = Cell::Empty;

impl RawGrid {
    /// Build a grid from row-major cell data. Rows may be ragged; the grid
    /// width is the widest row seen.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, n_cols }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.n_cols == 0
    }

    /// Cell at (row, col); `Empty` when out of bounds or in a ragged gap.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Trimmed text of the cell's display form, or `None` when blank.
    pub fn text(&self, row: usize, col: usize) -> Option<String> {
        let cell = self.cell(row, col);
        if cell.is_empty() {
            return None;
        }
        let s = cell.to_string();
        let t = s.trim();
        if t.is_empty() { None } else { Some(t.to_string()) }
    }
}
