use crate::config::types::{ClientConfig, ScreeningConfig};
use crate::error::{Result, ScreeningError};
use std::path::Path;

/// Environment variable consulted for the service base address
pub const BASE_URL_ENV: &str = "DIASCREEN_BASE_URL";

impl ScreeningConfig {
    /// Load configuration from a `diascreen.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ScreeningError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;
        let config: ScreeningConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Resolve the client config.
///
/// Precedence: explicit address, then [`BASE_URL_ENV`], then the config
/// file, then the default origin.
pub fn resolve_client_config(
    explicit: Option<&str>,
    file: Option<&ScreeningConfig>,
) -> ClientConfig {
    if let Some(address) = explicit.filter(|a| !a.trim().is_empty()) {
        return ClientConfig::new(address);
    }

    if let Ok(address) = std::env::var(BASE_URL_ENV) {
        if !address.trim().is_empty() {
            return ClientConfig::new(address);
        }
    }

    file.and_then(ScreeningConfig::client_config)
        .unwrap_or_default()
}
