//! Named weight presets
//!
//! Presets bulk-set the digital engagement subdimensions to a fixed
//! profile. The built-in catalog is static; deployments can merge extra
//! presets over it from a file (see `segment-studio-config`).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named, fixed weight profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Stable identifier (e.g., "digital-first")
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Values in dimension order
    pub values: Vec<f64>,
}

impl Preset {
    pub fn new(id: impl Into<String>, label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            values,
        }
    }
}

/// Ordered collection of presets, looked up by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    #[serde(default)]
    presets: Vec<Preset>,
}

static BUILTIN_PRESETS: Lazy<PresetCatalog> = Lazy::new(|| {
    PresetCatalog::new(vec![
        Preset::new(
            "digital-first",
            "Digital First",
            vec![95.0, 90.0, 85.0, 80.0, 75.0, 85.0],
        ),
        Preset::new(
            "balanced",
            "Balanced",
            vec![60.0, 60.0, 60.0, 60.0, 60.0, 60.0],
        ),
        Preset::new(
            "traditional-banking",
            "Traditional Banking",
            vec![25.0, 30.0, 20.0, 35.0, 30.0, 25.0],
        ),
        Preset::new(
            "mobile-focused",
            "Mobile Focused",
            vec![90.0, 70.0, 75.0, 65.0, 85.0, 95.0],
        ),
    ])
});

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Catalog shipped with the product
    pub fn builtin() -> &'static PresetCatalog {
        &BUILTIN_PRESETS
    }

    /// Look up a preset by id
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Look up a preset by id, failing on a miss
    pub fn require(&self, id: &str) -> Result<&Preset> {
        self.get(id).ok_or_else(|| Error::UnknownPreset(id.to_string()))
    }

    /// Preset ids in catalog order
    pub fn ids(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Merge presets into this catalog
    ///
    /// Entries with an existing id replace it in place; new ids are appended
    /// in the order given.
    pub fn merge(&mut self, presets: impl IntoIterator<Item = Preset>) {
        for preset in presets {
            match self.presets.iter_mut().find(|p| p.id == preset.id) {
                Some(existing) => *existing = preset,
                None => self.presets.push(preset),
            }
        }
    }
}
