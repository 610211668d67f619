//! Error types
//!
//! Only configuration loading and the device contract can fail. The per-tick
//! path absorbs every fault itself and never returns an error.

use std::path::PathBuf;

/// Errors raised while loading or validating a [`StylusConfig`](crate::config::StylusConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Raised by a [`DeviceLayer`](crate::input::DeviceLayer) that cannot produce a
/// sample this tick
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("Stylus not connected")]
    Disconnected,

    #[error("Device runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
