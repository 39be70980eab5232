//! Terminal tables for predictions, history and model metadata.

use crate::renderers::result::{field_label, INPUT_ECHO_FIELDS, NO_FACTORS_MESSAGE, VALIDATION_METHOD};
use crate::renderers::result::{DEFAULT_MODEL_ACCURACY, DEFAULT_MODEL_NAME};
use crate::renderers::table::{TableBuilder, TableStyle};
use crate::renderers::theme::Theme;
use crate::renderers::OutputRenderer;
use crate::types::{display_value, format_number, to_fixed, LogEntry, ModelMetadata, PredictionOutcome};
use comfy_table::Color;

/// Plain-text rendering of a prediction for terminals
#[derive(Debug, Clone, Default)]
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn new() -> Self {
        Self
    }

    /// History table; the columns are the union of all entry keys in
    /// first-seen order
    pub fn render_history(&self, logs: &[LogEntry]) -> String {
        let mut columns: Vec<&str> = Vec::new();
        for entry in logs {
            for key in entry.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }

        let mut builder = TableBuilder::new();
        builder.headers(columns.iter().copied());
        for entry in logs {
            builder.row(
                columns
                    .iter()
                    .map(|column| entry.get(*column).map(display_value).unwrap_or_default()),
            );
        }
        builder.build()
    }

    pub fn render_metadata(&self, metadata: &ModelMetadata) -> String {
        let mut builder = TableBuilder::with_style(TableStyle::Compact);
        builder.headers(["Metric", "Value"]);
        for (key, value) in metadata {
            builder.row([key.clone(), display_value(value)]);
        }
        builder.build()
    }
}

impl OutputRenderer for SummaryRenderer {
    fn render(&self, outcome: &PredictionOutcome) -> String {
        let theme = Theme::for_label(&outcome.label);
        let color = match theme {
            Theme::Alert => Color::Red,
            Theme::Safe => Color::Green,
        };

        let mut overview = TableBuilder::with_style(TableStyle::Compact);
        overview
            .colored_row("Diagnosis", theme.diagnosis_text(), color)
            .row(["Tingkat Risiko".to_string(), outcome.risk_level.clone()])
            .colored_row(
                "Probabilitas",
                format!("{}%", format_number(outcome.probability_percent)),
                color,
            )
            .row(["Algoritma", or_default(&outcome.model_info.name, DEFAULT_MODEL_NAME)])
            .row(["Validasi", VALIDATION_METHOD])
            .row(["Akurasi", or_default(&outcome.model_info.accuracy, DEFAULT_MODEL_ACCURACY)]);

        let mut inputs = TableBuilder::with_style(TableStyle::Compact);
        inputs.headers(["Data Pasien", "Nilai"]);
        for field in INPUT_ECHO_FIELDS {
            if let Some(value) = outcome.input_data.get(field) {
                inputs.row([field_label(field).to_string(), display_value(value)]);
            }
        }

        let factors = if outcome.feature_importance.is_empty() {
            NO_FACTORS_MESSAGE.to_string()
        } else {
            let mut table = TableBuilder::new();
            table.headers(["Faktor Dominan", "Kontribusi"]);
            for factor in &outcome.feature_importance {
                table.colored_row(factor.name.clone(), format!("{}%", to_fixed(factor.value, 3)), color);
            }
            table.build()
        };

        let mut sections = vec![overview.build()];
        if !inputs.is_empty() {
            sections.push(inputs.build());
        }
        sections.push(factors);
        sections.join("\n\n")
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
