//! Configuration management for segment studio
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files (`config/default`, `config/{env}`)
//! - Environment variables (`SEGMENT_STUDIO__` prefix, `__` separator,
//!   e.g. `SEGMENT_STUDIO__NORMALIZATION__ROUNDING=largest_remainder`)
//! - Preset files merged over the built-in preset catalog

pub mod presets;
pub mod settings;

pub use presets::{PresetFile, PresetStore};
pub use settings::{
    load_settings, load_settings_for_profile, load_settings_from, AttributesConfig,
    NormalizationConfig, PresetsConfig, Settings, SynthesisConfig, ENV_PROFILE_VAR,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<segment_studio_core::Error> for ConfigError {
    fn from(err: segment_studio_core::Error) -> Self {
        ConfigError::InvalidValue {
            field: "synthesis".to_string(),
            message: err.to_string(),
        }
    }
}
