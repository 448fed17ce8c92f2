use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::resolve;

/// A regulatory threshold series: one named column of per-analyte limits.
///
/// Duplicate names across columns are allowed; each column keeps its own
/// position and is evaluated independently, so display layers must
/// disambiguate by `col` when names collide.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsColumn {
    pub name: String,
    /// 0-based column index in the source grid. Left-to-right encounter
    /// order is the canonical column order for tie-breaking.
    pub col: usize,
}

/// Per-standards-column evaluation/display configuration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceedanceConfig {
    pub enabled: bool,
    /// Text color for exceeded values, as a hex string. The core never
    /// interprets this; it is carried through to the rendering collaborator.
    pub color: String,
}

impl Default for ExceedanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#000000".to_string(),
        }
    }
}

/// One analyte row: name, owning category, and its per-standards-column
/// limit values (parallel to the model's `standards_columns` order).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Analyte {
    pub name: String,
    pub category: String,
    /// Limit per standards column; `None` where the sheet cell was absent or
    /// non-numeric ("no standard").
    pub standards: Vec<Option<f64>>,
    /// First numeric standard encountered left-to-right. Retained for
    /// backward compatibility with single-threshold consumers.
    pub threshold: Option<f64>,
}

impl Analyte {
    pub fn standard_value(&self, column_index: usize) -> Option<f64> {
        self.standards.get(column_index).copied().flatten()
    }
}

/// Ordered, named group of analytes as encountered in the sheet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub analytes: Vec<String>,
}

/// Key of the sparse result table.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub location: String,
    pub date: String,
    /// Depth-interval string, present only for depth-qualified datasets.
    pub depth: Option<String>,
    pub analyte: String,
}

/// Sparse (location, date, [depth], analyte) → raw result strings.
///
/// Append-only: the same key may be hit by several sheet columns
/// (re-analyzed samples), so values accumulate and are never overwritten.
/// Resolution to a single display value happens on read.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
    entries: FxHashMap<ResultKey, Vec<String>>,
}

impl ResultTable {
    pub fn append(&mut self, key: ResultKey, value: String) {
        self.entries.entry(key).or_default().push(value);
    }

    pub fn raw_values(&self, key: &ResultKey) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Resolved display value for a key, or `None` when nothing was stored.
    pub fn resolved(&self, key: &ResultKey) -> Option<String> {
        self.entries.get(key).map(|values| resolve::resolve(values))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sort weight of a depth-interval string: its leading numeric token.
/// Unparseable depths sort after every parseable one.
pub fn depth_sort_value(depth: &str) -> f64 {
    let token: String = depth
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    token.parse::<f64>().unwrap_or(f64::MAX)
}

/// Raw inputs for [`ParsedModel`] construction, produced by the grid parser.
///
/// Finalization (sorting, deduplication, eager config population) happens in
/// [`ParsedModel::from_parts`] so no half-initialized model can escape.
#[derive(Debug, Default)]
pub struct ModelParts {
    pub locations: Vec<String>,
    /// (location, date) pairs, unsorted, possibly duplicated.
    pub location_dates: Vec<(String, String)>,
    /// (location, date, depth) triples; only populated in depth mode.
    pub location_date_depths: Vec<(String, String, String)>,
    pub categories: Vec<Category>,
    pub analytes: Vec<Analyte>,
    pub standards_columns: Vec<StandardsColumn>,
    pub results: ResultTable,
    pub depth_qualified: bool,
}

/// The relational view reconstructed from one input file.
///
/// Owned by the caller's session; all tag generation reads from it through
/// immutable accessors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModel {
    locations: Vec<String>,
    dates: FxHashMap<String, Vec<String>>,
    date_depths: FxHashMap<String, Vec<(String, String)>>,
    categories: Vec<Category>,
    analytes: Vec<Analyte>,
    standards_columns: Vec<StandardsColumn>,
    configs: FxHashMap<String, ExceedanceConfig>,
    results: ResultTable,
    depth_qualified: bool,
}

impl ParsedModel {
    pub fn from_parts(parts: ModelParts) -> Self {
        let ModelParts {
            mut locations,
            location_dates,
            location_date_depths,
            categories,
            analytes,
            standards_columns,
            results,
            depth_qualified,
        } = parts;

        locations.sort();
        locations.dedup();

        let mut dates: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for (location, date) in location_dates {
            dates.entry(location).or_default().push(date);
        }
        for list in dates.values_mut() {
            list.sort();
            list.dedup();
        }

        let mut date_depths: FxHashMap<String, Vec<(String, String)>> = FxHashMap::default();
        for (location, date, depth) in location_date_depths {
            date_depths.entry(location).or_default().push((date, depth));
        }
        for list in date_depths.values_mut() {
            list.sort_by(|a, b| {
                a.0.cmp(&b.0).then_with(|| {
                    depth_sort_value(&a.1)
                        .partial_cmp(&depth_sort_value(&b.1))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            });
            list.dedup();
        }

        // One config per distinct column name, populated up front so read
        // paths never create state.
        let mut configs = FxHashMap::default();
        for column in &standards_columns {
            configs
                .entry(column.name.clone())
                .or_insert_with(ExceedanceConfig::default);
        }

        Self {
            locations,
            dates,
            date_depths,
            categories,
            analytes,
            standards_columns,
            configs,
            results,
            depth_qualified,
        }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn analytes(&self) -> &[Analyte] {
        &self.analytes
    }

    pub fn analyte(&self, name: &str) -> Option<&Analyte> {
        self.analytes.iter().find(|a| a.name == name)
    }

    pub fn standards_columns(&self) -> &[StandardsColumn] {
        &self.standards_columns
    }

    /// Default (model-construction-time) config for a standards column name.
    pub fn default_config(&self, name: &str) -> Option<&ExceedanceConfig> {
        self.configs.get(name)
    }

    pub fn depth_qualified(&self) -> bool {
        self.depth_qualified
    }

    /// Sorted, deduplicated sample dates for a location.
    pub fn dates_for(&self, location: &str) -> &[String] {
        self.dates.get(location).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sorted (date, depth) pairs for a location; empty unless the model is
    /// depth-qualified.
    pub fn date_depth_pairs_for(&self, location: &str) -> &[(String, String)] {
        self.date_depths
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn results(&self) -> &ResultTable {
        &self.results
    }

    /// Resolved display value for a sampling key, or `None` on lookup miss.
    pub fn resolved_value(
        &self,
        location: &str,
        date: &str,
        depth: Option<&str>,
        analyte: &str,
    ) -> Option<String> {
        self.results.resolved(&ResultKey {
            location: location.to_string(),
            date: date.to_string(),
            depth: depth.map(str::to_string),
            analyte: analyte.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_dates() -> ParsedModel {
        ParsedModel::from_parts(ModelParts {
            locations: vec!["MW-2".into(), "MW-1".into(), "MW-1".into()],
            location_dates: vec![
                ("MW-1".into(), "2024-03-01".into()),
                ("MW-1".into(), "2024-01-15".into()),
                ("MW-1".into(), "2024-01-15".into()),
            ],
            standards_columns: vec![
                StandardsColumn { name: "AWQS".into(), col: 1 },
                StandardsColumn { name: "EPA".into(), col: 2 },
            ],
            ..ModelParts::default()
        })
    }

    #[test]
    fn locations_sorted_and_deduplicated() {
        let model = model_with_dates();
        assert_eq!(model.locations(), ["MW-1", "MW-2"]);
    }

    #[test]
    fn dates_sorted_and_deduplicated() {
        let model = model_with_dates();
        assert_eq!(model.dates_for("MW-1"), ["2024-01-15", "2024-03-01"]);
        assert!(model.dates_for("MW-9").is_empty());
    }

    #[test]
    fn configs_populated_eagerly() {
        let model = model_with_dates();
        let config = model.default_config("EPA").unwrap();
        assert!(config.enabled);
        assert_eq!(config.color, "#000000");
        assert!(model.default_config("missing").is_none());
    }

    #[test]
    fn depth_pairs_sort_by_date_then_numeric_depth() {
        let model = ParsedModel::from_parts(ModelParts {
            locations: vec!["SB-1".into()],
            location_date_depths: vec![
                ("SB-1".into(), "2024-01-15".into(), "10-12".into()),
                ("SB-1".into(), "2024-01-15".into(), "2-6".into()),
                ("SB-1".into(), "2024-01-10".into(), "6-9".into()),
                ("SB-1".into(), "2024-01-15".into(), "bedrock".into()),
            ],
            depth_qualified: true,
            ..ModelParts::default()
        });
        let pairs = model.date_depth_pairs_for("SB-1");
        let rendered: Vec<String> = pairs.iter().map(|(d, z)| format!("{d}/{z}")).collect();
        assert_eq!(
            rendered,
            [
                "2024-01-10/6-9",
                "2024-01-15/2-6",
                "2024-01-15/10-12",
                "2024-01-15/bedrock",
            ]
        );
    }

    #[test]
    fn result_table_appends_and_resolves() {
        let mut table = ResultTable::default();
        let key = ResultKey {
            location: "MW-1".into(),
            date: "2024-01-15".into(),
            depth: None,
            analyte: "Lead".into(),
        };
        table.append(key.clone(), "5.0 J".into());
        table.append(key.clone(), "7.2".into());
        assert_eq!(table.raw_values(&key).unwrap().len(), 2);
        assert_eq!(table.resolved(&key).as_deref(), Some("7.2"));
    }
}
