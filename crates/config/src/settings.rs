//! Main settings module

use std::path::Path;

use config::{Config, Environment, File};
use segment_studio_core::{
    AttributeTable, DimensionSet, PercentageNormalizer, PresetCatalog, RoundingPolicy,
    WeightBounds, WeightVector, DEFAULT_ATTRIBUTE, DIGITAL_ENGAGEMENT_DOMAIN,
};
use serde::{Deserialize, Serialize};

use crate::presets::PresetStore;
use crate::ConfigError;

/// Environment variable naming the active settings profile
pub const ENV_PROFILE_VAR: &str = "SEGMENT_STUDIO_ENV";

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Segment synthesis defaults
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Percentage normalization
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Extra preset file
    #[serde(default)]
    pub presets: PresetsConfig,

    /// Attribute lookups
    #[serde(default)]
    pub attributes: AttributesConfig,
}

/// Synthesis defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Domain used when a surface does not name one
    #[serde(default = "default_domain")]
    pub default_domain: String,

    /// Weights a surface starts with
    #[serde(default = "default_weights")]
    pub default_weights: Vec<f64>,

    /// Slider range
    #[serde(default)]
    pub bounds: WeightBounds,
}

fn default_domain() -> String {
    DIGITAL_ENGAGEMENT_DOMAIN.to_string()
}

fn default_weights() -> Vec<f64> {
    vec![40.0, 60.0, 80.0, 70.0, 50.0, 90.0]
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            default_domain: default_domain(),
            default_weights: default_weights(),
            bounds: WeightBounds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NormalizationConfig {
    /// `independent` keeps per-segment rounding drift, `largest_remainder`
    /// forces an exact 100
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PresetsConfig {
    /// YAML or JSON preset file merged over the built-in presets
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesConfig {
    /// Attribute shown when a segment id has no breakdown
    #[serde(default = "default_fallback_attribute")]
    pub fallback_attribute: String,
}

fn default_fallback_attribute() -> String {
    DEFAULT_ATTRIBUTE.to_string()
}

impl Default for AttributesConfig {
    fn default() -> Self {
        Self {
            fallback_attribute: default_fallback_attribute(),
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.weight_bounds()?;

        if self.synthesis.default_domain.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "synthesis.default_domain".to_string(),
            ));
        }

        if self.synthesis.default_weights.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.default_weights".to_string(),
                message: "must have at least one dimension".to_string(),
            });
        }

        let dimensions = DimensionSet::for_domain(&self.synthesis.default_domain);
        if self.synthesis.default_weights.len() != dimensions.len() {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.default_weights".to_string(),
                message: format!(
                    "expected {} values for domain '{}', got {}",
                    dimensions.len(),
                    self.synthesis.default_domain,
                    self.synthesis.default_weights.len()
                ),
            });
        }

        if let Some(bad) = self
            .synthesis
            .default_weights
            .iter()
            .find(|w| !bounds.contains(**w))
        {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.default_weights".to_string(),
                message: format!("{} outside [{}, {}]", bad, bounds.min, bounds.max),
            });
        }

        if !AttributeTable::builtin().contains(&self.attributes.fallback_attribute) {
            return Err(ConfigError::InvalidValue {
                field: "attributes.fallback_attribute".to_string(),
                message: format!("unknown attribute '{}'", self.attributes.fallback_attribute),
            });
        }

        Ok(())
    }

    /// Slider bounds, checked
    pub fn weight_bounds(&self) -> Result<WeightBounds, ConfigError> {
        let b = self.synthesis.bounds;
        WeightBounds::new(b.min, b.max).map_err(|e| ConfigError::InvalidValue {
            field: "synthesis.bounds".to_string(),
            message: e.to_string(),
        })
    }

    /// Starting weight vector
    pub fn default_weight_vector(&self) -> Result<WeightVector, ConfigError> {
        let bounds = self.weight_bounds()?;
        Ok(WeightVector::with_bounds(
            self.synthesis.default_weights.clone(),
            bounds,
        )?)
    }

    pub fn normalizer(&self) -> PercentageNormalizer {
        PercentageNormalizer::new(self.normalization.rounding)
    }

    /// Built-in attribute table using the configured fallback
    pub fn attribute_table(&self) -> AttributeTable {
        AttributeTable::builtin().with_fallback(self.attributes.fallback_attribute.clone())
    }

    /// Preset store: built-ins, plus the preset file when one is configured
    pub fn preset_store(&self) -> Result<PresetStore, ConfigError> {
        match &self.presets.path {
            Some(path) => PresetStore::from_file(path, self.weight_bounds()?),
            None => Ok(PresetStore::new()),
        }
    }

    /// Current preset catalog
    pub fn preset_catalog(&self) -> Result<PresetCatalog, ConfigError> {
        Ok(self.preset_store()?.snapshot())
    }
}

/// Load settings from `config/` and the environment
///
/// `env` selects an extra `config/{env}` file layered over `config/default`.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings using the profile named by `SEGMENT_STUDIO_ENV`, if set
pub fn load_settings_for_profile() -> Result<Settings, ConfigError> {
    match std::env::var(ENV_PROFILE_VAR) {
        Ok(profile) => load_settings(Some(&profile)),
        Err(std::env::VarError::NotPresent) => load_settings(None),
        Err(e) => Err(ConfigError::Environment(format!("{}: {}", ENV_PROFILE_VAR, e))),
    }
}

/// Load settings with config files resolved under `base_dir`
pub fn load_settings_from(
    base_dir: impl AsRef<Path>,
    env: Option<&str>,
) -> Result<Settings, ConfigError> {
    let base_dir = base_dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::from(base_dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(base_dir.join(env_name)).required(false));
    }

    // Load from environment variables; weight lists are comma separated
    builder = builder.add_source(
        Environment::with_prefix("SEGMENT_STUDIO")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("synthesis.default_weights")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::info!(
        domain = %settings.synthesis.default_domain,
        rounding = ?settings.normalization.rounding,
        "Loaded settings"
    );

    Ok(settings)
}
