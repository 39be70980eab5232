//! Projection of a prediction outcome into the live report.

use crate::dom::{ids, Element, Page};
use crate::error::Result;
use crate::renderers::theme::Theme;
use crate::types::{display_value, format_number, to_fixed, FeatureImportance, PredictionOutcome};

/// Input fields echoed back in the report, in display order
pub const INPUT_ECHO_FIELDS: [&str; 7] = [
    "age",
    "gender",
    "glucose",
    "bmi",
    "systolic_bp",
    "diastolic_bp",
    "hypertensive",
];

pub const DEFAULT_MODEL_NAME: &str = "Decision Tree (CART)";
pub const DEFAULT_MODEL_ACCURACY: &str = "99.26%";
pub const VALIDATION_METHOD: &str = "5-Fold CV (Calibrated)";
pub const NO_FACTORS_MESSAGE: &str = "Data faktor dominan tidak tersedia.";

/// Display label of an input field
pub fn field_label(field: &str) -> &str {
    match field {
        "age" => "Usia Pasien",
        "gender" => "Jenis Kelamin",
        "glucose" => "Kadar Glukosa",
        "bmi" => "BMI (kg/m²)",
        "systolic_bp" => "Tensi Sistolik",
        "diastolic_bp" => "Tensi Diastolik",
        "height" => "Tinggi (m)",
        "weight" => "Berat (kg)",
        "family_diabetes" => "Riwayat Diabetes",
        "hypertensive" => "Status Hipertensi",
        other => other,
    }
}

/// Renders a [`PredictionOutcome`] into the report targets of a [`Page`].
///
/// Every call overwrites what a previous call rendered, so rendering the
/// same outcome twice leaves the page unchanged.
#[derive(Debug, Clone, Default)]
pub struct ResultRenderer;

impl ResultRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, page: &mut Page, outcome: &PredictionOutcome) -> Result<()> {
        let theme = Theme::for_label(&outcome.label);
        let color = theme.color();

        let label = page.require_mut(ids::RES_LABEL)?;
        label.set_text(theme.diagnosis_text());
        label.style.set("color", color);

        page.require_mut(ids::RES_RISK)?
            .set_text(outcome.risk_level.as_str());

        let probability = page.require_mut(ids::RES_PROB)?;
        probability.set_text(format!("{}%", format_number(outcome.probability_percent)));
        probability.style.set("color", color);

        page.require_mut(ids::MOD_NAME)?
            .set_text(non_empty_or(&outcome.model_info.name, DEFAULT_MODEL_NAME));
        page.require_mut(ids::MOD_METHOD)?.set_text(VALIDATION_METHOD);
        page.require_mut(ids::MOD_ACC)?
            .set_text(non_empty_or(&outcome.model_info.accuracy, DEFAULT_MODEL_ACCURACY));

        page.require_mut(ids::INPUT_LIST)?
            .replace_content(None, self.input_rows(outcome));
        page.require_mut(ids::FEAT_LIST)?
            .replace_content(None, self.factor_rows(&outcome.feature_importance, theme));

        page.show_result();
        Ok(())
    }

    fn input_rows(&self, outcome: &PredictionOutcome) -> Vec<Element> {
        INPUT_ECHO_FIELDS
            .iter()
            .filter_map(|field| {
                outcome.input_data.get(*field).map(|value| {
                    Element::new("li")
                        .with_child(Element::new("span").with_text(field_label(field)))
                        .with_child(Element::new("strong").with_text(display_value(value)))
                })
            })
            .collect()
    }

    fn factor_rows(&self, factors: &[FeatureImportance], theme: Theme) -> Vec<Element> {
        if factors.is_empty() {
            return vec![Element::new("li")
                .with_style("color: #94a3b8; font-style: italic")
                .with_text(NO_FACTORS_MESSAGE)];
        }

        factors
            .iter()
            .map(|factor| factor_row(factor, theme.color()))
            .collect()
    }
}

fn factor_row(factor: &FeatureImportance, color: &str) -> Element {
    let heading = Element::new("div")
        .with_style("display: flex; justify-content: space-between; align-items: center; margin-bottom: 4px")
        .with_child(
            Element::new("span")
                .with_class("feat-name")
                .with_style("font-size: 0.85rem; opacity: 0.8")
                .with_text(format!("• {}", factor.name)),
        )
        .with_child(
            Element::new("strong")
                .with_class("feat-val")
                .with_style(&format!("font-size: 0.85rem; color: {color}"))
                .with_text(format!("{}%", to_fixed(factor.value, 3))),
        );

    let bar = Element::new("div")
        .with_class("bar-track")
        .with_style("width: 100%; height: 6px; background: rgba(255,255,255,0.1); border-radius: 3px; overflow: hidden")
        .with_child(
            Element::new("div")
                .with_class("bar-fill")
                .with_style(&format!(
                    "width: {}%; height: 100%; background: {color}; opacity: 0.8",
                    format_number(factor.value)
                )),
        );

    Element::new("li")
        .with_style("margin-bottom: 12px")
        .with_child(heading)
        .with_child(bar)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelInfo;
    use serde_json::json;

    fn outcome(label: &str, factors: Vec<FeatureImportance>) -> PredictionOutcome {
        let input_data = json!({
            "hypertensive": "Yes",
            "age": 52,
            "pulse_rate": 80,
            "glucose": 8.4,
            "gender": "Female",
            "bmi": 27.1
        });
        PredictionOutcome {
            label: label.to_string(),
            risk_level: "Tinggi".to_string(),
            probability_percent: 87.5,
            model_info: ModelInfo {
                name: "Decision Tree (CART)".to_string(),
                accuracy: "99.26%".to_string(),
            },
            input_data: input_data.as_object().cloned().unwrap(),
            feature_importance: factors,
        }
    }

    fn factors() -> Vec<FeatureImportance> {
        vec![
            FeatureImportance {
                name: "Kadar Glukosa Darah".to_string(),
                value: 61.2345,
            },
            FeatureImportance {
                name: "Faktor Usia".to_string(),
                value: 20.0,
            },
        ]
    }

    #[test]
    fn test_diabetic_label_applies_alert_theme_everywhere() {
        let mut page = Page::new();
        ResultRenderer::new()
            .render(&mut page, &outcome("DIABETIC", factors()))
            .unwrap();

        let label = page.element(ids::RES_LABEL).unwrap();
        assert_eq!(label.text_content(), "DIAGNOSIS: DIABETIC");
        assert_eq!(label.style.get("color"), Some("#ef4444"));
        assert_eq!(
            page.element(ids::RES_PROB).unwrap().style.get("color"),
            Some("#ef4444")
        );

        let factor_list = page.element(ids::FEAT_LIST).unwrap();
        let fills = factor_list.find_by_class("bar-fill");
        assert_eq!(fills.len(), 2);
        for fill in fills {
            assert_eq!(fill.style.get("background"), Some("#ef4444"));
        }
        for value in factor_list.find_by_class("feat-val") {
            assert_eq!(value.style.get("color"), Some("#ef4444"));
        }
    }

    #[test]
    fn test_non_diabetic_label_applies_safe_theme() {
        let mut page = Page::new();
        ResultRenderer::new()
            .render(&mut page, &outcome("Non-Diabetic", factors()))
            .unwrap();

        assert_eq!(
            page.text_of(ids::RES_LABEL).as_deref(),
            Some("DIAGNOSIS: NON-DIABETIC")
        );
        assert_eq!(
            page.element(ids::RES_PROB).unwrap().style.get("color"),
            Some("#22c55e")
        );
    }

    #[test]
    fn test_metrics_and_model_info() {
        let mut page = Page::new();
        let mut result = outcome("Diabetic", factors());
        result.model_info = ModelInfo::default();
        ResultRenderer::new().render(&mut page, &result).unwrap();

        assert_eq!(page.text_of(ids::RES_RISK).as_deref(), Some("Tinggi"));
        assert_eq!(page.text_of(ids::RES_PROB).as_deref(), Some("87.5%"));
        assert_eq!(page.text_of(ids::MOD_NAME).as_deref(), Some(DEFAULT_MODEL_NAME));
        assert_eq!(page.text_of(ids::MOD_METHOD).as_deref(), Some(VALIDATION_METHOD));
        assert_eq!(page.text_of(ids::MOD_ACC).as_deref(), Some(DEFAULT_MODEL_ACCURACY));
        assert!(page.is_result_visible());
    }

    #[test]
    fn test_input_echo_uses_fixed_order_and_allow_list() {
        let mut page = Page::new();
        ResultRenderer::new()
            .render(&mut page, &outcome("Diabetic", factors()))
            .unwrap();

        let rows: Vec<String> = page
            .element(ids::INPUT_LIST)
            .unwrap()
            .children
            .iter()
            .map(Element::text_content)
            .collect();
        assert_eq!(
            rows,
            vec![
                "Usia Pasien52",
                "Jenis KelaminFemale",
                "Kadar Glukosa8.4",
                "BMI (kg/m²)27.1",
                "Status HipertensiYes",
            ]
        );
    }

    #[test]
    fn test_factor_labels_and_bar_widths() {
        let mut page = Page::new();
        ResultRenderer::new()
            .render(&mut page, &outcome("Diabetic", factors()))
            .unwrap();

        let factor_list = page.element(ids::FEAT_LIST).unwrap();
        let values: Vec<String> = factor_list
            .find_by_class("feat-val")
            .iter()
            .map(|element| element.text_content())
            .collect();
        assert_eq!(values, vec!["61.234%", "20.000%"]);

        let widths: Vec<&str> = factor_list
            .find_by_class("bar-fill")
            .iter()
            .filter_map(|element| element.style.get("width"))
            .collect();
        assert_eq!(widths, vec!["61.2345%", "20%"]);
    }

    #[test]
    fn test_factor_value_rounds_exact_ties_up() {
        let mut page = Page::new();
        let tie = vec![FeatureImportance {
            name: "Tekanan Darah".to_string(),
            value: 0.0625,
        }];
        ResultRenderer::new()
            .render(&mut page, &outcome("Diabetic", tie))
            .unwrap();

        let factor_list = page.element(ids::FEAT_LIST).unwrap();
        assert_eq!(factor_list.find_by_class("feat-val")[0].text_content(), "0.063%");
        assert_eq!(
            factor_list.find_by_class("bar-fill")[0].style.get("width"),
            Some("0.0625%")
        );
    }

    #[test]
    fn test_empty_factor_list_renders_one_placeholder() {
        let mut page = Page::new();
        ResultRenderer::new()
            .render(&mut page, &outcome("Diabetic", Vec::new()))
            .unwrap();

        let factor_list = page.element(ids::FEAT_LIST).unwrap();
        assert_eq!(factor_list.children.len(), 1);
        assert_eq!(factor_list.text_content(), NO_FACTORS_MESSAGE);
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = ResultRenderer::new();
        let result = outcome("Diabetic", factors());

        let mut page = Page::new();
        renderer.render(&mut page, &result).unwrap();
        let first = page.clone();
        renderer.render(&mut page, &result).unwrap();

        assert_eq!(page, first);
        assert_eq!(page.element(ids::FEAT_LIST).unwrap().children.len(), 2);
    }

    #[test]
    fn test_render_replaces_previous_result() {
        let renderer = ResultRenderer::new();
        let mut page = Page::new();
        renderer
            .render(&mut page, &outcome("Diabetic", factors()))
            .unwrap();
        renderer
            .render(&mut page, &outcome("Non-Diabetic", Vec::new()))
            .unwrap();

        let mut fresh = Page::new();
        renderer
            .render(&mut fresh, &outcome("Non-Diabetic", Vec::new()))
            .unwrap();
        assert_eq!(page, fresh);
    }

    #[test]
    fn test_missing_target_is_reported() {
        let mut page = Page::from_body(Element::new("body"));
        let error = ResultRenderer::new()
            .render(&mut page, &outcome("Diabetic", factors()))
            .unwrap_err();
        assert!(error.to_string().contains(ids::RES_LABEL));
    }
}
