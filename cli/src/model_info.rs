use crate::context::{runtime, Context};
use crate::error::Result;
use crate::progress::Spinner;
use crate::ui;
use screening::{PredictionService, SummaryRenderer};

pub fn execute(context: &Context) -> Result<()> {
    let client = context.client()?;
    let spinner = Spinner::new("Fetching model metadata");

    let metadata = match runtime()?.block_on(client.model_metadata()) {
        Ok(metadata) => {
            spinner.finish_success("Model metadata loaded");
            metadata
        }
        Err(error) => {
            spinner.finish_error();
            return Err(error.into());
        }
    };

    if metadata.is_empty() {
        ui::warning_message("The service returned no model metadata");
        return Ok(());
    }

    ui::section_header("Model Info");
    println!("{}", SummaryRenderer::new().render_metadata(&metadata));
    Ok(())
}
