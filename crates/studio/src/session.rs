//! Radar weighting sessions
//!
//! A session owns one radar surface's state: the domain being segmented,
//! its dimension labels, the current weights and the segments derived from
//! them. Every accepted edit replaces the whole weight vector and runs
//! exactly one full re-synthesis; nothing is recomputed incrementally.

use std::sync::Arc;

use segment_studio_config::{PresetStore, Settings};
use segment_studio_core::{
    DimensionSet, Error, PercentageNormalizer, SegmentProfile, SegmentSynthesizer, WeightVector,
};

use crate::Result;

/// Domain key of the attribute-weighting surface
pub const GENERAL_DOMAIN: &str = "general";

/// Contract between a radar chart and whatever computes its segments
pub trait RadarSurface {
    /// Current weights, one per label
    fn weights(&self) -> &WeightVector;

    /// Dimension labels in weight order
    fn labels(&self) -> &[String];

    /// Segments for the current weights
    fn segments(&self) -> &[SegmentProfile];

    /// Accept a full replacement vector and re-synthesize
    fn on_weights_changed(&mut self, weights: WeightVector) -> Result<&[SegmentProfile]>;

    /// Replace the weights with a preset's values
    ///
    /// Unknown preset ids leave weights and segments untouched.
    fn select_preset(&mut self, preset_id: &str) -> Result<&[SegmentProfile]>;
}

/// Radar session for one segmentation domain
pub struct SegmentationSession {
    domain: String,
    dimensions: DimensionSet,
    weights: WeightVector,
    segments: Vec<SegmentProfile>,
    synthesizer: Arc<SegmentSynthesizer>,
    normalizer: PercentageNormalizer,
    presets: Arc<PresetStore>,
    synthesis_count: u64,
}

impl SegmentationSession {
    /// Create a session and compute its initial segments
    ///
    /// Labels come from the domain's subdimensions.
    pub fn new(
        domain: impl Into<String>,
        weights: WeightVector,
        synthesizer: Arc<SegmentSynthesizer>,
        normalizer: PercentageNormalizer,
        presets: Arc<PresetStore>,
    ) -> Result<Self> {
        let domain = domain.into();
        let dimensions = DimensionSet::for_domain(&domain);
        Self::with_dimensions(domain, dimensions, weights, synthesizer, normalizer, presets)
    }

    /// Create a session over an explicit set of labels
    ///
    /// Used by the attribute-weighting surface, which weights the five
    /// general attributes rather than one domain's subdimensions.
    pub fn with_dimensions(
        domain: impl Into<String>,
        dimensions: DimensionSet,
        weights: WeightVector,
        synthesizer: Arc<SegmentSynthesizer>,
        normalizer: PercentageNormalizer,
        presets: Arc<PresetStore>,
    ) -> Result<Self> {
        let domain = domain.into();
        check_dimensions(&dimensions, &weights)?;

        tracing::debug!(
            domain = %domain,
            dimensions = dimensions.len(),
            rounding = ?normalizer.policy(),
            "Created segmentation session"
        );

        let mut session = Self {
            domain,
            dimensions,
            weights,
            segments: Vec::new(),
            synthesizer,
            normalizer,
            presets,
            synthesis_count: 0,
        };
        session.resynthesize();
        Ok(session)
    }

    /// Session for the configured default domain
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::for_domain(settings, settings.synthesis.default_domain.clone())
    }

    /// Attribute-weighting session over the five general attributes
    ///
    /// Every attribute starts at the midpoint of the configured bounds.
    pub fn general(settings: &Settings) -> Result<Self> {
        let dimensions = DimensionSet::general();
        let bounds = settings.weight_bounds()?;
        let midpoint = (bounds.min + bounds.max) / 2.0;
        let weights = WeightVector::with_bounds(vec![midpoint; dimensions.len()], bounds)?;

        Self::with_dimensions(
            GENERAL_DOMAIN,
            dimensions,
            weights,
            Arc::new(SegmentSynthesizer::new()),
            settings.normalizer(),
            Arc::new(settings.preset_store()?),
        )
    }

    /// Session for a specific domain, starting from the configured default weights
    pub fn for_domain(settings: &Settings, domain: impl Into<String>) -> Result<Self> {
        Self::new(
            domain,
            settings.default_weight_vector()?,
            Arc::new(SegmentSynthesizer::new()),
            settings.normalizer(),
            Arc::new(settings.preset_store()?),
        )
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn dimensions(&self) -> &DimensionSet {
        &self.dimensions
    }

    /// Number of full re-syntheses run so far, including the initial one
    pub fn synthesis_count(&self) -> u64 {
        self.synthesis_count
    }

    /// Edit one dimension
    ///
    /// The single-value edit is expanded to a full copy of the vector before
    /// it reaches [`RadarSurface::on_weights_changed`].
    pub fn edit_dimension(&mut self, index: usize, value: f64) -> Result<&[SegmentProfile]> {
        let next = self.weights.try_set(index, value)?;
        self.on_weights_changed(next)
    }

    /// Edit a dimension by its label
    pub fn edit_label(&mut self, label: &str, value: f64) -> Result<&[SegmentProfile]> {
        let index = self
            .dimensions
            .index_of(label)
            .ok_or_else(|| Error::UnknownDimension(label.to_string()))?;
        self.edit_dimension(index, value)
    }

    /// Preset ids available to this session
    pub fn preset_ids(&self) -> Vec<String> {
        self.presets.ids()
    }

    fn resynthesize(&mut self) {
        self.segments = self
            .synthesizer
            .profiles(&self.weights, &self.domain, &self.normalizer);
        self.synthesis_count += 1;
    }
}

fn check_dimensions(dimensions: &DimensionSet, weights: &WeightVector) -> Result<()> {
    if weights.len() != dimensions.len() {
        return Err(Error::DimensionMismatch {
            expected: dimensions.len(),
            actual: weights.len(),
        }
        .into());
    }
    Ok(())
}

impl RadarSurface for SegmentationSession {
    fn weights(&self) -> &WeightVector {
        &self.weights
    }

    fn labels(&self) -> &[String] {
        self.dimensions.labels()
    }

    fn segments(&self) -> &[SegmentProfile] {
        &self.segments
    }

    fn on_weights_changed(&mut self, weights: WeightVector) -> Result<&[SegmentProfile]> {
        check_dimensions(&self.dimensions, &weights)?;
        self.weights = weights;
        self.resynthesize();
        Ok(&self.segments)
    }

    fn select_preset(&mut self, preset_id: &str) -> Result<&[SegmentProfile]> {
        let catalog = self.presets.snapshot();
        if let Err(e) = catalog.require(preset_id) {
            tracing::warn!(error = %e, domain = %self.domain, "Keeping current weights");
            return Ok(&self.segments);
        }

        let next = self.weights.apply_preset(&catalog, preset_id);
        self.on_weights_changed(next)
    }
}
