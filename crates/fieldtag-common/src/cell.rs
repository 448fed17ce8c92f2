use chrono::{Duration as ChronoDur, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/* ───────────────────── Excel date-serial utilities ───────────────────
Excel's serial date system:
  Serial 1  = 1900-01-01
  Serial 60 = 1900-02-29  (phantom – doesn't exist, but Excel thinks it does)
Base date = 1899-12-31 so that serial 1 = base + 1 day = 1900-01-01.
Time is stored as fractional days (no timezone).
------------------------------------------------------------------- */

const EXCEL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 31) {
    Some(d) => d,
    None => unreachable!(),
};

/// Convert an Excel 1900-system serial number to a naive date-time.
pub fn serial_to_datetime(serial: f64) -> NaiveDateTime {
    let days = serial.trunc() as i64;
    let frac_secs = (serial.fract() * 86_400.0).round() as i64;

    // Serial 60 is phantom 1900-02-29; map to 1900-02-28
    let date = if days == 60 {
        match NaiveDate::from_ymd_opt(1900, 2, 28) {
            Some(d) => d,
            None => EXCEL_EPOCH,
        }
    } else {
        // serial < 60: offset = serial (no phantom day yet)
        // serial > 60: offset = serial - 1 (skip phantom day)
        let offset = if days < 60 { days } else { days - 1 };
        EXCEL_EPOCH + ChronoDur::days(offset)
    };

    let time = NaiveTime::from_num_seconds_from_midnight_opt((frac_secs.rem_euclid(86_400)) as u32, 0)
        .unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// A single spreadsheet cell as read from the input grid.
///
/// This is deliberately narrower than a full spreadsheet value model: the
/// sampling-sheet convention only ever produces text, numbers, dates, and
/// blanks. Everything else a backend may report is coerced at load time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    /// True when the cell carries no usable content.
    ///
    /// Whitespace-only text counts as empty: the sheets in the wild pad
    /// header regions with space-filled cells.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric coercion: numbers pass through, text is parsed after trimming.
    /// Dates never coerce (a date is not a threshold).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Trimmed textual content, if any.
    pub fn as_trimmed_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => {
                let t = s.trim();
                if t.is_empty() { None } else { Some(t) }
            }
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, ""),
            Cell::Text(s) => write!(f, "{}", s.trim()),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}
