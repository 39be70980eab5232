mod check;
mod cli;
mod context;
mod error;
mod history;
mod logging;
mod model_info;
mod notifier;
mod predict;
mod progress;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use context::Context;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let context = Context::new(cli.base_url, cli.config);

    let result = match cli.command {
        Commands::Check => check::execute(&context),
        Commands::ModelInfo => model_info::execute(&context),
        Commands::History { limit } => history::execute(&context, limit),
        Commands::Predict {
            fields,
            input,
            report,
            export,
        } => predict::execute(
            &context,
            predict::PredictArgs {
                fields,
                input,
                report,
                export,
            },
        ),
    };

    if let Err(err) = result {
        if !err.is_reported() {
            eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        }
        process::exit(1);
    }
}
