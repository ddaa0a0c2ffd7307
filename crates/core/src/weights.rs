//! Weight vectors
//!
//! A weight vector holds one importance score per dimension, in dimension
//! order. Every value is kept inside the vector's bounds (default 0-100).
//! Edits never mutate in place: `set` and `apply_preset` return a new
//! vector so the caller can swap the whole thing atomically.

use serde::{Deserialize, Serialize};

use crate::presets::PresetCatalog;
use crate::{Error, Result};

/// Lowest value a slider can take
pub const DEFAULT_MIN_WEIGHT: f64 = 0.0;

/// Highest value a slider can take
pub const DEFAULT_MAX_WEIGHT: f64 = 100.0;

/// Inclusive range every weight is clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: f64,
    pub max: f64,
}

impl WeightBounds {
    /// Create bounds, rejecting non-finite or inverted ranges
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Constrain a value into the range. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Check whether a value already lies inside the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WEIGHT,
            max: DEFAULT_MAX_WEIGHT,
        }
    }
}

/// Summary statistics the synthesis formulas are written against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl WeightStats {
    /// Spread between the strongest and weakest dimension
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Ordered per-dimension importance scores
///
/// Deserialized vectors go through the same checks as
/// [`WeightVector::with_bounds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeightVector")]
pub struct WeightVector {
    values: Vec<f64>,
    bounds: WeightBounds,
}

#[derive(Deserialize)]
struct RawWeightVector {
    values: Vec<f64>,
    #[serde(default)]
    bounds: WeightBounds,
}

impl TryFrom<RawWeightVector> for WeightVector {
    type Error = Error;

    fn try_from(raw: RawWeightVector) -> Result<Self> {
        let bounds = WeightBounds::new(raw.bounds.min, raw.bounds.max)?;
        Self::with_bounds(raw.values, bounds)
    }
}

impl WeightVector {
    /// Create a vector with the default 0-100 bounds
    pub fn new(values: Vec<f64>) -> Result<Self> {
        Self::with_bounds(values, WeightBounds::default())
    }

    /// Create a vector with explicit bounds; out-of-range values are clamped
    pub fn with_bounds(values: Vec<f64>, bounds: WeightBounds) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyWeightVector);
        }
        let values = values.into_iter().map(|v| bounds.clamp(v)).collect();
        Ok(Self { values, bounds })
    }

    /// Vector of `len` dimensions all set to `value`
    pub fn uniform(len: usize, value: f64) -> Result<Self> {
        Self::new(vec![value; len])
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed vector
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in dimension order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at one dimension
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    /// Replace one dimension, returning a new vector
    ///
    /// The value is clamped into the vector's bounds.
    pub fn try_set(&self, index: usize, value: f64) -> Result<Self> {
        if index >= self.values.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.values.len(),
            });
        }
        let mut values = self.values.clone();
        values[index] = self.bounds.clamp(value);
        Ok(Self {
            values,
            bounds: self.bounds,
        })
    }

    /// Replace one dimension, returning a new vector
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Slider surfaces only ever emit
    /// indices they were built from; use [`WeightVector::try_set`] otherwise.
    pub fn set(&self, index: usize, value: f64) -> Self {
        match self.try_set(index, value) {
            Ok(vector) => vector,
            Err(e) => panic!("{}", e),
        }
    }

    /// Replace every value with a preset's values
    ///
    /// Unknown preset ids leave the vector unchanged.
    pub fn apply_preset(&self, catalog: &PresetCatalog, preset_id: &str) -> Self {
        match catalog.get(preset_id) {
            Some(preset) => Self {
                values: preset.values.iter().map(|v| self.bounds.clamp(*v)).collect(),
                bounds: self.bounds,
            },
            None => {
                tracing::warn!(preset_id, "Unknown preset, keeping current weights");
                self.clone()
            }
        }
    }

    /// Mean, max and min across all dimensions
    pub fn stats(&self) -> WeightStats {
        let len = self.values.len() as f64;
        let sum: f64 = self.values.iter().sum();
        let max = self.values.iter().copied().fold(f64::MIN, f64::max);
        let min = self.values.iter().copied().fold(f64::MAX, f64::min);

        WeightStats {
            mean: sum / len,
            max,
            min,
        }
    }
}
