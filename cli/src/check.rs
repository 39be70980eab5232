use crate::context::{runtime, Context};
use crate::error::{CliError, Result};
use crate::ui;

pub fn execute(context: &Context) -> Result<()> {
    let client = context.client()?;
    let base_address = client.config().base_address().to_string();

    ui::info_message(&format!("Checking prediction service at {base_address}"));
    let healthy = runtime()?.block_on(client.announce_connection());

    if healthy {
        ui::success_message("API connected & healthy");
        Ok(())
    } else {
        Err(CliError::Offline(base_address))
    }
}
