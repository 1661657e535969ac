//! Configuration management.
//!
//! Settings are read from an optional TOML file and overridden by
//! `SCREENER__<SECTION>__<KEY>` environment variables, e.g.
//! `SCREENER__SCREENER__SAMPLE_SIZE=1000`.

mod settings;

pub use settings::{
    AppConfig, AppSettings, BarProvider, LoggingConfig, ProviderSettings, UniverseProvider,
};

use config::{Config, ConfigError, Environment, File, FileFormat};
use screener_core::error::ScreenerError;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<ScreenerError> for SettingsError {
    fn from(e: ScreenerError) -> Self {
        SettingsError::Invalid(e.to_string())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SCREENER")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from an optional file and the environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, SettingsError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    let config = builder.add_source(environment()).build()?;

    Ok(config.try_deserialize()?)
}

/// Parse configuration from TOML text, without environment overrides.
pub fn parse_config(toml: &str) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Render the default configuration as TOML.
pub fn default_config_toml() -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(&AppConfig::default())?)
}

impl AppConfig {
    /// Check the configuration can drive a scan.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.screener.validate()?;

        if self.providers.universe == UniverseProvider::File && self.providers.universe_file.is_none() {
            return Err(SettingsError::Invalid(
                "providers.universe_file is required for the file universe".into(),
            ));
        }
        if self.providers.bars == BarProvider::Csv && self.providers.data_dir.is_none() {
            return Err(SettingsError::Invalid(
                "providers.data_dir is required for the csv bar source".into(),
            ));
        }
        if self.providers.http.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "providers.http.timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
