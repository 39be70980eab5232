//! Client configuration: the base address of the prediction service and
//! the optional `diascreen.toml` file it can be read from.

pub mod loader;
pub mod types;

pub use loader::{resolve_client_config, BASE_URL_ENV};
pub use types::{ClientConfig, ClientSection, ScreeningConfig, DEFAULT_ORIGIN};
