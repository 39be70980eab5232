use crate::context::{runtime, Context};
use crate::error::{CliError, Result};
use crate::progress::Spinner;
use crate::ui;
use screening::{PredictionService, SummaryRenderer};

pub fn execute(context: &Context, limit: Option<usize>) -> Result<()> {
    let client = context.client()?;
    let spinner = Spinner::new("Fetching prediction history");

    let response = match runtime()?.block_on(client.history()) {
        Ok(response) => response,
        Err(error) => {
            spinner.finish_error();
            return Err(error.into());
        }
    };

    if !response.success {
        spinner.finish_error();
        return Err(CliError::Other(
            response
                .error
                .unwrap_or_else(|| "The service could not read its prediction log".to_string()),
        ));
    }
    spinner.finish_success(&format!("{} predictions logged", response.logs.len()));

    if response.logs.is_empty() {
        ui::info_message("No predictions have been logged yet");
        return Ok(());
    }

    let shown = limit.unwrap_or(response.logs.len()).min(response.logs.len());
    ui::section_header("Prediction History");
    println!(
        "{}",
        SummaryRenderer::new().render_history(&response.logs[..shown])
    );
    if shown < response.logs.len() {
        ui::info_message(&format!(
            "Showing {shown} of {} entries",
            response.logs.len()
        ));
    }
    Ok(())
}
