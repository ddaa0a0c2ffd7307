//! Preset files
//!
//! Extra presets can be shipped as YAML or JSON and merged over the
//! built-in catalog:
//!
//! ```yaml
//! presets:
//!   - id: branch-loyal
//!     label: Branch Loyal
//!     values: [20, 25, 15, 30, 20, 10]
//! ```

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use segment_studio_core::{Preset, PresetCatalog, WeightBounds};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// On-disk preset list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetFile {
    #[serde(default)]
    pub presets: Vec<Preset>,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl PresetFile {
    /// Load from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_existing(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_existing(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load by extension: `.yaml`/`.yml` as YAML, anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if is_yaml(path) {
            Self::from_yaml_file(path)
        } else {
            Self::from_json_file(path)
        }
    }

    /// Check every preset has an id and in-range values
    pub fn validate(&self, bounds: &WeightBounds) -> Result<(), ConfigError> {
        for preset in &self.presets {
            if preset.id.trim().is_empty() {
                return Err(ConfigError::MissingField("presets[].id".to_string()));
            }
            if preset.values.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("presets.{}.values", preset.id),
                    message: "must not be empty".to_string(),
                });
            }
            if let Some(bad) = preset.values.iter().find(|v| !bounds.contains(**v)) {
                return Err(ConfigError::InvalidValue {
                    field: format!("presets.{}.values", preset.id),
                    message: format!("{} outside [{}, {}]", bad, bounds.min, bounds.max),
                });
            }
        }
        Ok(())
    }

    /// Built-in catalog with this file's presets merged over it
    pub fn merged_with_builtin(&self) -> PresetCatalog {
        let mut catalog = PresetCatalog::builtin().clone();
        catalog.merge(self.presets.iter().cloned());
        catalog
    }
}

fn read_existing(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Preset catalog with reload support
pub struct PresetStore {
    catalog: Arc<RwLock<PresetCatalog>>,
    path: Option<String>,
    bounds: WeightBounds,
}

impl PresetStore {
    /// Store holding only the built-in presets
    pub fn new() -> Self {
        Self::with_catalog(PresetCatalog::builtin().clone())
    }

    pub fn with_catalog(catalog: PresetCatalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            path: None,
            bounds: WeightBounds::default(),
        }
    }

    /// Built-in presets merged with a preset file
    pub fn from_file(path: impl AsRef<Path>, bounds: WeightBounds) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let catalog = Self::load_catalog(path, &bounds)?;

        Ok(Self {
            catalog: Arc::new(RwLock::new(catalog)),
            path: Some(path.to_string_lossy().to_string()),
            bounds,
        })
    }

    fn load_catalog(path: &Path, bounds: &WeightBounds) -> Result<PresetCatalog, ConfigError> {
        let file = PresetFile::load(path)?;
        file.validate(bounds)?;
        tracing::info!(
            path = %path.display(),
            presets = file.presets.len(),
            "Merged preset file"
        );
        Ok(file.merged_with_builtin())
    }

    /// Re-read the preset file; a failed reload keeps the current catalog
    pub fn reload(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ConfigError::FileNotFound("No preset file path set".to_string()))?;

        let catalog = Self::load_catalog(Path::new(path), &self.bounds)?;
        *self.catalog.write() = catalog;
        Ok(())
    }

    /// Copy of the current catalog
    pub fn snapshot(&self) -> PresetCatalog {
        self.catalog.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Preset> {
        self.catalog.read().get(id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.catalog.read().ids().into_iter().map(String::from).collect()
    }
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
presets:
  - id: branch-loyal
    label: Branch Loyal
    values: [20, 25, 15, 30, 20, 10]
  - id: balanced
    label: Even Split
    values: [50, 50, 50, 50, 50, 50]
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_yaml_preset_file() {
        let file = write_temp(".yaml", YAML);
        let presets = PresetFile::load(file.path()).unwrap();
        assert_eq!(presets.presets.len(), 2);
        assert_eq!(presets.presets[0].values[3], 30.0);
    }

    #[test]
    fn test_json_preset_file() {
        let json = r#"{"presets": [{"id": "x", "label": "X", "values": [1, 2, 3, 4, 5, 6]}]}"#;
        let file = write_temp(".json", json);
        let presets = PresetFile::load(file.path()).unwrap();
        assert_eq!(presets.presets[0].id, "x");
    }

    #[test]
    fn test_missing_file() {
        let result = PresetFile::load("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let file = PresetFile {
            presets: vec![Preset::new("hot", "Hot", vec![50.0, 150.0])],
        };
        assert!(file.validate(&WeightBounds::default()).is_err());
    }

    #[test]
    fn test_store_merges_over_builtin() {
        let file = write_temp(".yml", YAML);
        let store = PresetStore::from_file(file.path(), WeightBounds::default()).unwrap();

        assert_eq!(store.get("balanced").unwrap().label, "Even Split");
        assert!(store.get("branch-loyal").is_some());
        assert_eq!(
            store.get("digital-first").unwrap().values,
            vec![95.0, 90.0, 85.0, 80.0, 75.0, 85.0]
        );
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let file = write_temp(".yaml", YAML);
        let store = PresetStore::from_file(file.path(), WeightBounds::default()).unwrap();
        assert!(store.get("weekend").is_none());

        std::fs::write(
            file.path(),
            "presets:\n  - id: weekend\n    label: Weekend\n    values: [1, 1, 1, 1, 1, 1]\n",
        )
        .unwrap();

        store.reload().unwrap();
        assert!(store.get("weekend").is_some());
        assert!(store.get("branch-loyal").is_none());
    }

    #[test]
    fn test_reload_without_path() {
        assert!(PresetStore::new().reload().is_err());
    }
}
