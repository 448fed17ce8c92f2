//! Caller-owned customization settings.
//!
//! The core never persists these; a host session owns one value, mutates it
//! through the setters, and passes it by reference into tag assembly. All
//! types serialize so hosts can save and restore sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

use fieldtag_common::ExceedanceConfig;

/// The fixed set of supported date display patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateStyle {
    #[default]
    IsoYmd,
    SlashMdy,
    SlashDmy,
    DashMdy,
    DashDmy,
    MonthAbbrevDay,
    MonthFullDay,
    SlashYmd,
    MonthFullYear,
    MonthAbbrevYear,
}

impl DateStyle {
    pub const ALL: [DateStyle; 10] = [
        DateStyle::IsoYmd,
        DateStyle::SlashMdy,
        DateStyle::SlashDmy,
        DateStyle::DashMdy,
        DateStyle::DashDmy,
        DateStyle::MonthAbbrevDay,
        DateStyle::MonthFullDay,
        DateStyle::SlashYmd,
        DateStyle::MonthFullYear,
        DateStyle::MonthAbbrevYear,
    ];

    /// Human-readable pattern label, as shown in pickers.
    pub fn label(self) -> &'static str {
        match self {
            DateStyle::IsoYmd => "YYYY-MM-DD",
            DateStyle::SlashMdy => "MM/DD/YYYY",
            DateStyle::SlashDmy => "DD/MM/YYYY",
            DateStyle::DashMdy => "MM-DD-YYYY",
            DateStyle::DashDmy => "DD-MM-YYYY",
            DateStyle::MonthAbbrevDay => "MMM DD, YYYY",
            DateStyle::MonthFullDay => "MMMM DD, YYYY",
            DateStyle::SlashYmd => "YYYY/MM/DD",
            DateStyle::MonthFullYear => "MMMM, YYYY",
            DateStyle::MonthAbbrevYear => "MMM, YYYY",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            DateStyle::IsoYmd => "%Y-%m-%d",
            DateStyle::SlashMdy => "%m/%d/%Y",
            DateStyle::SlashDmy => "%d/%m/%Y",
            DateStyle::DashMdy => "%m-%d-%Y",
            DateStyle::DashDmy => "%d-%m-%Y",
            DateStyle::MonthAbbrevDay => "%b %d, %Y",
            DateStyle::MonthFullDay => "%B %d, %Y",
            DateStyle::SlashYmd => "%Y/%m/%d",
            DateStyle::MonthFullYear => "%B, %Y",
            DateStyle::MonthAbbrevYear => "%b, %Y",
        }
    }
}

/// Everything a host can customize about tag output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationSettings {
    /// Original analyte name → display override.
    pub analyte_names: BTreeMap<String, String>,
    pub date_style: DateStyle,
    /// First cell of the axis-header row.
    pub axis_label: String,
    /// Rewrite non-detect results ("< N U") to "ND".
    pub non_detect_as_nd: bool,
    /// Render exceeded values bold (carried through to the renderer).
    pub exceedance_bold: bool,
    /// Per-standards-column overrides, keyed by column name. Columns without
    /// an entry use the model's eager defaults.
    pub standards: BTreeMap<String, ExceedanceConfig>,
}

impl Default for CustomizationSettings {
    fn default() -> Self {
        Self {
            analyte_names: BTreeMap::new(),
            date_style: DateStyle::default(),
            axis_label: "Analyte".to_string(),
            non_detect_as_nd: false,
            exceedance_bold: false,
            standards: BTreeMap::new(),
        }
    }
}

impl CustomizationSettings {
    /// Display name for an analyte: the override if set, else the original.
    pub fn display_name<'a>(&'a self, original: &'a str) -> &'a str {
        self.analyte_names
            .get(original)
            .map(String::as_str)
            .unwrap_or(original)
    }

    /// Set or clear an analyte display override; a blank name clears it.
    pub fn set_display_name(&mut self, original: &str, display: &str) {
        let display = display.trim();
        if display.is_empty() {
            self.analyte_names.remove(original);
        } else {
            self.analyte_names
                .insert(original.to_string(), display.to_string());
        }
    }

    /// Per-column override, if the host configured one.
    pub fn standard_config(&self, column_name: &str) -> Option<&ExceedanceConfig> {
        self.standards.get(column_name)
    }

    /// Re-render an ISO `YYYY-MM-DD` date in the configured style.
    /// Non-ISO input is returned untouched.
    pub fn format_date<'a>(&self, date: &'a str) -> Cow<'a, str> {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => Cow::Owned(parsed.format(self.date_style.pattern()).to_string()),
            Err(_) => Cow::Borrowed(date),
        }
    }

    /// Apply the non-detect rewrite: a trimmed value starting with `<` and
    /// ending with `U` becomes `"ND"` when the toggle is on.
    pub fn rewrite_non_detect<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if !self.non_detect_as_nd {
            return Cow::Borrowed(value);
        }
        let trimmed = value.trim();
        if trimmed.starts_with('<') && trimmed.ends_with('U') {
            Cow::Borrowed("ND")
        } else {
            Cow::Borrowed(value)
        }
    }
}
