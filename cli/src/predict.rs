use crate::context::{runtime, Context};
use crate::error::{CliError, Result, ResultExt};
use crate::notifier::TerminalNotifier;
use crate::progress::Spinner;
use crate::ui;
use screening::{
    ApiClient, Control, EventOutcome, HtmlSnapshotConverter, OutputRenderer, PredictionFlow,
    SubmitOutcome, SummaryRenderer, UiEvent,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct PredictArgs {
    pub fields: Vec<String>,
    pub input: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub export: Option<PathBuf>,
}

type CliFlow = PredictionFlow<ApiClient, TerminalNotifier, HtmlSnapshotConverter>;

pub fn execute(context: &Context, args: PredictArgs) -> Result<()> {
    let entries = collect_entries(args.input.as_deref(), &args.fields)?;
    let client = context.client()?;
    let export_dir = args.export.clone().unwrap_or_else(|| PathBuf::from("."));
    let flow = PredictionFlow::new(client, TerminalNotifier::new(), HtmlSnapshotConverter::new(export_dir));

    runtime()?.block_on(execute_async(&flow, entries, &args))
}

async fn execute_async(flow: &CliFlow, entries: Vec<(String, String)>, args: &PredictArgs) -> Result<()> {
    for (field, value) in entries {
        if let EventOutcome::InputUpdated { bmi: Some(bmi) } =
            flow.dispatch(UiEvent::InputChanged { field, value }).await?
        {
            tracing::debug!(bmi = %bmi, "BMI recomputed");
        }
    }
    if let Some(bmi) = flow.form_snapshot().get("bmi").filter(|bmi| !bmi.is_empty()) {
        ui::info_message(&format!("BMI: {bmi} kg/m²"));
    }

    let spinner = Spinner::new("⏳ Menjalankan Inferensi...");
    let outcome = match flow.dispatch(UiEvent::Submit).await {
        Ok(EventOutcome::Submitted(outcome)) => outcome,
        Ok(_) => {
            spinner.finish_error();
            return Err(CliError::Other("Unexpected event outcome".to_string()));
        }
        Err(error) => {
            spinner.finish_error();
            return Err(error.into());
        }
    };

    let prediction = match outcome {
        SubmitOutcome::Rendered(prediction) => {
            spinner.finish_success("Prediction complete");
            prediction
        }
        SubmitOutcome::Invalid(report) => {
            spinner.finish_error();
            return Err(CliError::IncompleteForm(report.missing));
        }
        SubmitOutcome::Failed { message } => {
            spinner.finish_error();
            return Err(CliError::PredictionFailed(message));
        }
    };

    println!("{}", SummaryRenderer::new().render(&prediction));

    if let Some(path) = &args.report {
        let document = flow.page().snapshot().to_document();
        fs::write(path, document).with_context(|| format!("Writing report to {}", path.display()))?;
        ui::success_message(&format!("Report written to {}", path.display()));
    }

    if args.export.is_some() {
        match flow.dispatch(UiEvent::Click(Control::ExportPdf)).await? {
            EventOutcome::Exported(path) => {
                ui::success_message(&format!("Print-ready report exported to {}", path.display()));
            }
            _ => return Err(CliError::Other("Export did not produce a file".to_string())),
        }
    }

    Ok(())
}

/// Form entries from the optional TOML input file, then from `--field`
/// arguments in order, so later values win
pub fn collect_entries(input: Option<&Path>, fields: &[String]) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();

    if let Some(path) = input {
        let content =
            fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        let table: toml::Table = toml::from_str(&content)?;
        for (key, value) in table {
            entries.push((key, toml_scalar(value)?));
        }
    }

    for field in fields {
        let (key, value) = field
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CliError::InvalidField(field.clone()))?;
        entries.push((key.trim().to_string(), value.trim().to_string()));
    }

    Ok(entries)
}

fn toml_scalar(value: toml::Value) -> Result<String> {
    match value {
        toml::Value::String(text) => Ok(text),
        toml::Value::Integer(number) => Ok(number.to_string()),
        toml::Value::Float(number) => Ok(number.to_string()),
        toml::Value::Boolean(flag) => Ok(flag.to_string()),
        other => Err(CliError::Other(format!(
            "Unsupported input value '{other}', expected a string or a number"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fields_are_split_on_first_equals() {
        let entries = collect_entries(None, &["age=45".to_string(), "note=a=b".to_string()]).unwrap();
        assert_eq!(
            entries,
            vec![
                ("age".to_string(), "45".to_string()),
                ("note".to_string(), "a=b".to_string())
            ]
        );
    }

    #[test]
    fn test_malformed_field_is_rejected() {
        for field in ["age", "=45"] {
            let result = collect_entries(None, &[field.to_string()]);
            assert!(matches!(result, Err(CliError::InvalidField(_))));
        }
    }

    #[test]
    fn test_input_file_then_field_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient.toml");
        fs::write(&path, "age = 52\nglucose = 8.4\ngender = \"Female\"\n").unwrap();

        let entries = collect_entries(Some(&path), &["age=53".to_string()]).unwrap();

        assert!(entries.contains(&("glucose".to_string(), "8.4".to_string())));
        assert!(entries.contains(&("gender".to_string(), "Female".to_string())));
        assert_eq!(entries.last(), Some(&("age".to_string(), "53".to_string())));
    }

    #[test]
    fn test_nested_input_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patient.toml");
        fs::write(&path, "[vitals]\nage = 52\n").unwrap();
        assert!(collect_entries(Some(&path), &[]).is_err());
    }
}
