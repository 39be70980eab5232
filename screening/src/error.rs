use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for screening operations
pub type Result<T> = std::result::Result<T, ScreeningError>;

/// Underlying cause of a request that never produced a usable response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error taxonomy shared by the client, the prediction flow and the exporter
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Malformed call arguments, caught before any I/O
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Network or parse failure, no response available
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived but it was not JSON
    #[error("Server Error: Received non-JSON response ({status})")]
    Server { status: u16 },

    /// JSON response carrying an application-level failure
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Another {operation} is already in progress")]
    Busy { operation: &'static str },

    #[error("Report element '#{id}' is missing from the page")]
    MissingElement { id: String },

    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScreeningError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new export error
    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn missing_element<S: Into<String>>(id: S) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Whether this failure came out of a request to the prediction service
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Server { .. } | Self::Api { .. }
        )
    }

    /// HTTP status attached to the failure, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a blocking alert
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Transport(_) => {
                "Kesalahan koneksi ke server. Pastikan backend berjalan.".to_string()
            }
            Self::Server { status } => format!("Server tidak merespons dengan benar ({status})"),
            Self::Api { message, .. } => message.clone(),
            Self::Busy { operation } => format!("Proses {operation} masih berjalan"),
            other => other.to_string(),
        }
    }
}
