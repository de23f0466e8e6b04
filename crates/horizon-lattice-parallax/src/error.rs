//! Error types for the parallax layout crate.
//!
//! Layout passes never fail. Errors only come out of the configuration layer,
//! when a [`ParallaxConfig`](crate::ParallaxConfig) is loaded or validated.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or validating a parallax configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A size component is negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeDimension {
        /// Name of the offending field, e.g. `min_size.height`.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The collapsed banner would be taller than the resting banner.
    #[error("min_size.height ({min}) exceeds indicative_size.height ({indicative})")]
    MinExceedsIndicative {
        /// Collapsed height.
        min: f32,
        /// Resting height.
        indicative: f32,
    },

    /// The TOML document could not be parsed.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize configuration as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The JSON document could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither `toml` nor `json`.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// The main error type for parallax layout operations.
#[derive(Error, Debug)]
pub enum ParallaxError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for parallax layout operations.
pub type ParallaxResult<T> = Result<T, ParallaxError>;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
