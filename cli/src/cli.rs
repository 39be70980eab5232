use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diascreen")]
#[command(
    author,
    version,
    about = "Diabetes screening client: run predictions and export reports"
)]
pub struct Cli {
    /// Base address of the prediction service (overrides DIASCREEN_BASE_URL and the config file)
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    /// Configuration file path (defaults to diascreen.toml when present)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the prediction service is reachable
    Check,

    /// Show metadata of the deployed model
    ModelInfo,

    /// Show the prediction log kept by the service
    History {
        /// Show at most this many entries
        #[clap(short, long)]
        limit: Option<usize>,
    },

    /// Run a prediction for one patient
    Predict {
        /// Form field as key=value (repeatable, applied after --input)
        #[clap(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// TOML file with one key = value pair per form field
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Write the rendered report as HTML to this file
        #[clap(short, long)]
        report: Option<PathBuf>,

        /// Export the print-ready report into this directory
        #[clap(short, long)]
        export: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_arguments() {
        let cli = Cli::parse_from([
            "diascreen",
            "--base-url",
            "http://clinic.local",
            "predict",
            "-f",
            "age=45",
            "--field",
            "gender=Male",
            "--export",
            "out",
        ]);

        assert_eq!(cli.base_url.as_deref(), Some("http://clinic.local"));
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Predict { fields, export, .. } => {
                assert_eq!(fields, vec!["age=45", "gender=Male"]);
                assert_eq!(export, Some(PathBuf::from("out")));
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["diascreen", "history", "--limit", "5", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::History { limit: Some(5) }));
    }
}
