#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of an assembled tag.
///
/// The three vectors are parallel, one slot per output column. `analyte` is
/// `None` for structural rows (location identity, axis header, date/interval
/// rows) and carries the original analyte name — not the display override —
/// for data rows, so consumers can trace a row back to the model.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagRow {
    pub analyte: Option<String>,
    pub values: Vec<String>,
    pub highlighted: Vec<bool>,
    /// Dominant exceeded standard per cell, `None` where nothing is exceeded.
    pub exceeded: Vec<Option<String>>,
}

impl TagRow {
    /// Structural row: no analyte identity, nothing highlighted.
    pub fn structural(values: Vec<String>) -> Self {
        let n = values.len();
        Self {
            analyte: None,
            values,
            highlighted: vec![false; n],
            exceeded: vec![None; n],
        }
    }
}

/// An assembled tag: the ordered rows for one location's selection.
///
/// Tags are pure derived views — rebuilt on every preview/export request
/// from model + selection + customization, never stored.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub location: String,
    /// Underlying ISO dates covered by this tag, in output order.
    pub dates: Vec<String>,
    pub rows: Vec<TagRow>,
}
