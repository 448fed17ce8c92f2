//! Standards/exceedance evaluation.
//!
//! A value exceeds a standard only on strict greater-than; values equal to
//! the limit do not flag. When several standards are breached at once, the
//! one with the numerically highest limit is reported as dominant, with
//! later column order breaking exact ties.

use fieldtag_common::{Analyte, ParsedModel};

use crate::settings::CustomizationSettings;

/// Outcome of evaluating one value against the enabled standards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exceedance {
    pub exceeded: bool,
    /// Name of the dominant breached standards column, if any.
    pub dominant: Option<String>,
}

impl Exceedance {
    fn none() -> Self {
        Self::default()
    }
}

/// Effective enabled flag for each standards column: the host override when
/// present, else the model's eager default.
fn enabled_flags(model: &ParsedModel, settings: &CustomizationSettings) -> Vec<bool> {
    model
        .standards_columns()
        .iter()
        .map(|column| {
            settings
                .standard_config(&column.name)
                .or_else(|| model.default_config(&column.name))
                .map(|config| config.enabled)
                .unwrap_or(true)
        })
        .collect()
}

/// Evaluate a numeric result value for one analyte.
///
/// If every column is disabled but the model does have standards columns,
/// all of them are treated as enabled for this call only — a host that has
/// not initialized its configuration yet must not silently evaluate nothing.
pub fn evaluate(
    model: &ParsedModel,
    settings: &CustomizationSettings,
    analyte: &Analyte,
    value: f64,
) -> Exceedance {
    let columns = model.standards_columns();
    if columns.is_empty() {
        return Exceedance::none();
    }

    let mut enabled = enabled_flags(model, settings);
    if enabled.iter().all(|on| !on) {
        enabled = vec![true; columns.len()];
    }

    let mut dominant: Option<(f64, &str)> = None;
    for (idx, column) in columns.iter().enumerate() {
        if !enabled[idx] {
            continue;
        }
        let Some(standard) = analyte.standard_value(idx) else {
            continue;
        };
        if value > standard {
            // >= so an exact tie prefers the later column.
            let replace = dominant.map(|(best, _)| standard >= best).unwrap_or(true);
            if replace {
                dominant = Some((standard, &column.name));
            }
        }
    }

    match dominant {
        Some((_, name)) => Exceedance {
            exceeded: true,
            dominant: Some(name.to_string()),
        },
        None => Exceedance::none(),
    }
}

/// Evaluate a displayed result string; values that do not parse as numbers
/// are never exceedances (the raw string still displays).
pub fn evaluate_display(
    model: &ParsedModel,
    settings: &CustomizationSettings,
    analyte: &Analyte,
    value: &str,
) -> Exceedance {
    match value.trim().parse::<f64>() {
        Ok(numeric) => evaluate(model, settings, analyte, numeric),
        Err(_) => Exceedance::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtag_common::{ExceedanceConfig, ModelParts, ParsedModel, StandardsColumn};

    fn model_two_columns(a: Option<f64>, b: Option<f64>) -> (ParsedModel, Analyte) {
        let analyte = Analyte {
            name: "Lead".into(),
            category: "Metals".into(),
            standards: vec![a, b],
            threshold: a.or(b),
        };
        let model = ParsedModel::from_parts(ModelParts {
            locations: vec!["MW-1".into()],
            analytes: vec![analyte.clone()],
            standards_columns: vec![
                StandardsColumn { name: "A".into(), col: 1 },
                StandardsColumn { name: "B".into(), col: 2 },
            ],
            ..ModelParts::default()
        });
        (model, analyte)
    }

    #[test]
    fn strict_greater_than_only() {
        let (model, analyte) = model_two_columns(Some(10.0), None);
        let settings = CustomizationSettings::default();
        assert!(!evaluate(&model, &settings, &analyte, 10.0).exceeded);
        assert!(evaluate(&model, &settings, &analyte, 10.1).exceeded);
    }

    #[test]
    fn dominant_is_highest_standard() {
        let (model, analyte) = model_two_columns(Some(5.0), Some(12.0));
        let settings = CustomizationSettings::default();

        let result = evaluate(&model, &settings, &analyte, 15.0);
        assert_eq!(result.dominant.as_deref(), Some("B"));

        // Only A is breached at 8.0.
        let result = evaluate(&model, &settings, &analyte, 8.0);
        assert_eq!(result.dominant.as_deref(), Some("A"));
    }

    #[test]
    fn exact_tie_prefers_later_column() {
        let (model, analyte) = model_two_columns(Some(10.0), Some(10.0));
        let settings = CustomizationSettings::default();
        let result = evaluate(&model, &settings, &analyte, 15.0);
        assert_eq!(result.dominant.as_deref(), Some("B"));
    }

    #[test]
    fn disabled_column_is_never_dominant() {
        let (model, analyte) = model_two_columns(Some(5.0), Some(12.0));
        let mut settings = CustomizationSettings::default();
        settings.standards.insert(
            "B".into(),
            ExceedanceConfig {
                enabled: false,
                color: "#000000".into(),
            },
        );
        let result = evaluate(&model, &settings, &analyte, 15.0);
        assert!(result.exceeded);
        assert_eq!(result.dominant.as_deref(), Some("A"));
    }

    #[test]
    fn all_disabled_auto_enables_for_the_call() {
        let (model, analyte) = model_two_columns(Some(5.0), Some(12.0));
        let mut settings = CustomizationSettings::default();
        for name in ["A", "B"] {
            settings.standards.insert(
                name.into(),
                ExceedanceConfig {
                    enabled: false,
                    color: "#000000".into(),
                },
            );
        }
        let result = evaluate(&model, &settings, &analyte, 15.0);
        assert!(result.exceeded);
        assert_eq!(result.dominant.as_deref(), Some("B"));
        // The stored configuration was not touched.
        assert!(!settings.standards["A"].enabled);
    }

    #[test]
    fn unparseable_display_value_is_not_exceeded() {
        let (model, analyte) = model_two_columns(Some(5.0), None);
        let settings = CustomizationSettings::default();
        assert!(!evaluate_display(&model, &settings, &analyte, "7.2 J").exceeded);
        assert!(evaluate_display(&model, &settings, &analyte, " 7.2 ").exceeded);
        assert!(!evaluate_display(&model, &settings, &analyte, "ND").exceeded);
    }
}
