use screening::ScreeningError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Screening(#[from] ScreeningError),

    #[error("Failed to parse input file: {0}")]
    InputParse(#[from] toml::de::Error),

    #[error("Invalid field '{0}', expected KEY=VALUE")]
    InvalidField(String),

    #[error("Form is incomplete, missing: {}", .0.join(", "))]
    IncompleteForm(Vec<String>),

    #[error("Prediction service is offline at {0}")]
    Offline(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Dialoguer error: {0}")]
    DialoguerError(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// Whether the message already reached the user through the notifier
    pub fn is_reported(&self) -> bool {
        match self {
            Self::PredictionFailed(_) => true,
            Self::WithContext(_, err) => err.is_reported(),
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::Screening(err) => err.user_message(),
            Self::InputParse(err) => format!("Invalid input file: {err}"),
            Self::InvalidField(field) => format!("Invalid field '{field}', expected KEY=VALUE"),
            Self::IncompleteForm(missing) => {
                format!("Form is incomplete, missing: {}", missing.join(", "))
            }
            Self::Offline(address) => format!(
                "Prediction service is not responding at {address}. Make sure the backend is running."
            ),
            Self::PredictionFailed(message) => message.clone(),
            Self::DialoguerError(err) => format!("UI interaction error: {err}"),
            Self::Other(msg) => msg.clone(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let cli_err: CliError = err.into();
            cli_err.with_context(context())
        })
    }
}
