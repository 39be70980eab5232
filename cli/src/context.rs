use crate::error::{CliError, Result};
use screening::{resolve_client_config, ApiClient, ClientConfig, ScreeningConfig};
use std::path::{Path, PathBuf};
use tokio::runtime::{Builder, Runtime};

pub const DEFAULT_CONFIG_FILE: &str = "diascreen.toml";

/// Global options shared by every command
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub base_url: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(base_url: Option<String>, config_path: Option<PathBuf>) -> Self {
        Self {
            base_url,
            config_path,
        }
    }

    /// An explicit `--config` must exist; the default file is optional
    fn load_file(&self) -> Result<Option<ScreeningConfig>> {
        match &self.config_path {
            Some(path) => Ok(Some(ScreeningConfig::load_from_file(path)?)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Ok(Some(ScreeningConfig::load_from_file(DEFAULT_CONFIG_FILE)?))
            }
            None => Ok(None),
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let file = self.load_file()?;
        Ok(resolve_client_config(self.base_url.as_deref(), file.as_ref()))
    }

    /// The one client of this process
    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.client_config()?)?)
    }
}

/// Single-threaded runtime driving one command
pub fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {e}")))
}
