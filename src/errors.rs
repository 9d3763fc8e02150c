use thiserror::Error;

/// Errors raised while talking to the code reader
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Only {obtained} bytes available on I2C at offset {offset}, but we need {needed}")]
    IncompleteTransfer {
        offset: usize,
        obtained: usize,
        needed: usize,
    },

    #[error("Failed to open I2C bus '{path}': {reason}")]
    BusOpen { path: String, reason: String },

    #[error("I2C transport unavailable: {reason}")]
    Unsupported { reason: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type aliases for convenience
pub type ReaderResult<T> = Result<T, ReaderError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
