use serde::{Deserialize, Serialize};

/// Origin the prediction service is served from when nothing else is configured
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Connection settings for [`crate::http::ApiClient`]. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    base_address: String,
}

impl ClientConfig {
    /// Create a config for the given base address, falling back to
    /// [`DEFAULT_ORIGIN`] when it is blank. Only surrounding whitespace is
    /// trimmed; endpoints are appended literally.
    pub fn new<S: Into<String>>(base_address: S) -> Self {
        let base_address = base_address.into();
        if base_address.trim().is_empty() {
            Self::default()
        } else {
            Self {
                base_address: base_address.trim().to_string(),
            }
        }
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_ORIGIN.to_string(),
        }
    }
}

/// `[client]` table of the configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientSection {
    /// Base address of the prediction service
    pub base_address: Option<String>,
}

/// Top-level structure of `diascreen.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScreeningConfig {
    #[serde(default)]
    pub client: ClientSection,
}

impl ScreeningConfig {
    /// Client config described by this file, if it names a base address
    pub fn client_config(&self) -> Option<ClientConfig> {
        self.client
            .base_address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
            .map(ClientConfig::new)
    }
}
