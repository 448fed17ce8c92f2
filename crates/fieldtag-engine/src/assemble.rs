//! Tag assembly: the parsed model plus a selection and customization,
//! rendered into ordered, abstract tag rows.
//!
//! This is pure derivation — no I/O, no stored state — and deterministic for
//! identical inputs, so live preview and final export call the same function
//! and must agree byte for byte.

use fieldtag_common::{ParsedModel, Tag, TagRow, depth_sort_value};

use crate::exceedance::evaluate_display;
use crate::selection::SelectionKey;
use crate::settings::CustomizationSettings;

/// Build one tag per selected location that has at least one selected key.
///
/// Locations keep the caller-supplied order; each location's own date (or
/// date/depth) keys are sorted internally. Analyte rows follow
/// `selected_analytes` order.
pub fn build_tags(
    selected_locations: &[String],
    selected_analytes: &[String],
    selected_keys: &[SelectionKey],
    model: &ParsedModel,
    settings: &CustomizationSettings,
) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for location in selected_locations {
        if seen.contains(&location.as_str()) {
            continue;
        }
        seen.push(location);

        let keys: Vec<&SelectionKey> = selected_keys
            .iter()
            .filter(|key| key.location == *location)
            .collect();
        if keys.is_empty() {
            continue;
        }

        let tag = if model.depth_qualified() {
            build_depth_tag(location, selected_analytes, &keys, model, settings)
        } else {
            build_date_tag(location, selected_analytes, &keys, model, settings)
        };
        tags.push(tag);
    }

    tags
}

/// Number of tags [`build_tags`] would produce for this selection.
pub fn tag_count(selected_locations: &[String], selected_keys: &[SelectionKey]) -> usize {
    let mut count = 0;
    let mut seen: Vec<&str> = Vec::new();
    for location in selected_locations {
        if seen.contains(&location.as_str()) {
            continue;
        }
        seen.push(location);
        if selected_keys.iter().any(|key| key.location == *location) {
            count += 1;
        }
    }
    count
}

fn build_date_tag(
    location: &str,
    selected_analytes: &[String],
    keys: &[&SelectionKey],
    model: &ParsedModel,
    settings: &CustomizationSettings,
) -> Tag {
    let mut dates: Vec<String> = keys.iter().map(|key| key.date.clone()).collect();
    dates.sort();
    dates.dedup();

    let n_cols = 1 + dates.len();
    let mut rows = Vec::with_capacity(2 + selected_analytes.len());

    // Location identity row, spanning all date columns.
    let mut identity = vec![String::new(); n_cols];
    identity[0] = location.to_string();
    rows.push(TagRow::structural(identity));

    // Axis header: configurable label, then the formatted dates.
    let mut axis = Vec::with_capacity(n_cols);
    axis.push(settings.axis_label.clone());
    axis.extend(dates.iter().map(|date| settings.format_date(date).into_owned()));
    rows.push(TagRow::structural(axis));

    for analyte_name in selected_analytes {
        let analyte = model.analyte(analyte_name);
        let mut values = Vec::with_capacity(n_cols);
        let mut highlighted = Vec::with_capacity(n_cols);
        let mut exceeded = Vec::with_capacity(n_cols);

        values.push(settings.display_name(analyte_name).to_string());
        highlighted.push(false);
        exceeded.push(None);

        for date in &dates {
            match model.resolved_value(location, date, None, analyte_name) {
                Some(resolved) => {
                    let shown = settings.rewrite_non_detect(&resolved).into_owned();
                    let outcome = analyte
                        .map(|a| evaluate_display(model, settings, a, &shown))
                        .unwrap_or_default();
                    values.push(shown);
                    highlighted.push(outcome.exceeded);
                    exceeded.push(outcome.dominant);
                }
                None => {
                    values.push(String::new());
                    highlighted.push(false);
                    exceeded.push(None);
                }
            }
        }

        rows.push(TagRow {
            analyte: Some(analyte_name.clone()),
            values,
            highlighted,
            exceeded,
        });
    }

    Tag {
        location: location.to_string(),
        dates,
        rows,
    }
}

/// Labels for the structural rows of a depth-qualified block.
const DATE_ROW_LABEL: &str = "Date Sampled";
const INTERVAL_ROW_LABEL: &str = "Sample Interval";

fn build_depth_tag(
    location: &str,
    selected_analytes: &[String],
    keys: &[&SelectionKey],
    model: &ParsedModel,
    settings: &CustomizationSettings,
) -> Tag {
    // Keys without a depth cannot address results in a depth-qualified model.
    let mut pairs: Vec<(String, String)> = keys
        .iter()
        .filter_map(|key| {
            key.depth
                .as_ref()
                .map(|depth| (key.date.clone(), depth.clone()))
        })
        .collect();
    pairs.sort_by(|a, b| {
        a.0.cmp(&b.0).then_with(|| {
            depth_sort_value(&a.1)
                .partial_cmp(&depth_sort_value(&b.1))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    pairs.dedup();

    let mut dates = Vec::with_capacity(pairs.len());
    let mut rows = Vec::new();

    for (date, depth) in &pairs {
        dates.push(date.clone());

        rows.push(TagRow::structural(vec![location.to_string(), String::new()]));
        rows.push(TagRow::structural(vec![
            DATE_ROW_LABEL.to_string(),
            settings.format_date(date).into_owned(),
        ]));
        rows.push(TagRow::structural(vec![
            INTERVAL_ROW_LABEL.to_string(),
            depth.clone(),
        ]));

        for analyte_name in selected_analytes {
            let analyte = model.analyte(analyte_name);
            let (shown, outcome) =
                match model.resolved_value(location, date, Some(depth), analyte_name) {
                    Some(resolved) => {
                        let shown = settings.rewrite_non_detect(&resolved).into_owned();
                        let outcome = analyte
                            .map(|a| evaluate_display(model, settings, a, &shown))
                            .unwrap_or_default();
                        (shown, outcome)
                    }
                    None => (String::new(), Default::default()),
                };

            rows.push(TagRow {
                analyte: Some(analyte_name.clone()),
                values: vec![settings.display_name(analyte_name).to_string(), shown],
                highlighted: vec![false, outcome.exceeded],
                exceeded: vec![None, outcome.dominant],
            });
        }
    }

    Tag {
        location: location.to_string(),
        dates,
        rows,
    }
}
