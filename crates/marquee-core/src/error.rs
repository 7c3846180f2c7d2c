//! Error types for configuration and item loading

use std::path::PathBuf;

use thiserror::Error;

/// Marquee error type
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized back to TOML
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Items file could not be read
    #[error("failed to read items from {path}: {source}")]
    ItemsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value is outside its accepted range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result alias used across the core crate
pub type Result<T> = std::result::Result<T, MarqueeError>;
