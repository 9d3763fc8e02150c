use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

/// Root configuration struct expecting a `[reader]` TOML table
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reader: ReaderSettings,
}

/// Settings for the code reader and its polling loop
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Identifier stamped on published scan messages
    pub id: String,
    /// I2C character device the reader is attached to
    pub bus: String,
    pub poll_interval_ms: u64,
    /// LED state written to the device at startup
    pub led: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            id: "tcr0".to_string(),
            bus: "/dev/i2c-1".to_string(),
            poll_interval_ms: 200,
            led: true,
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let parsed: AppConfig = toml::from_str(content)?;
        parsed.validate()?;
        Ok(parsed)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.reader.bus.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reader.bus".to_string(),
                reason: "bus path must not be empty".to_string(),
            });
        }
        if self.reader.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reader.poll_interval_ms".to_string(),
                reason: "poll interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads config from TOML file
pub fn load_config(path: &str) -> ConfigResult<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadError {
        path: path.to_string(),
        source: e,
    })?;
    AppConfig::from_toml(&content)
}

/// Like [`load_config`], but a missing file yields the defaults
pub fn load_config_or_default(path: &str) -> ConfigResult<AppConfig> {
    match load_config(path) {
        Err(ConfigError::LoadError { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(AppConfig::default())
        }
        other => other,
    }
}
