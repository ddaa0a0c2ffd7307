//! Segment synthesis
//!
//! Turns a weight vector into a list of named customer segments. Each
//! segmentation domain owns a [`SegmentStrategy`]; the
//! [`SegmentSynthesizer`] keeps a table of them keyed by domain id and
//! falls back to the generic strategy for any domain without its own.
//!
//! ```text
//! WeightVector → WeightStats → SegmentStrategy → Vec<SegmentDraft>
//!                                                      ↓
//!                                          PercentageNormalizer
//!                                                      ↓
//!                                            Vec<SegmentProfile>
//! ```
//!
//! Synthesis is a pure function of `(weights, domain)`. Every call
//! recomputes the full list from scratch.

mod digital;
mod generic;

pub use digital::DigitalEngagementStrategy;
pub use generic::GenericStrategy;

use std::collections::HashMap;
use std::sync::Arc;

use crate::normalize::PercentageNormalizer;
use crate::segment::{SegmentDraft, SegmentProfile};
use crate::weights::{WeightStats, WeightVector};

/// Domain id with a dedicated formula set
pub const DIGITAL_ENGAGEMENT_DOMAIN: &str = "digital-engagement";

/// Formula set for one segmentation domain
pub trait SegmentStrategy: Send + Sync {
    /// Strategy name, for logging
    fn name(&self) -> &str;

    /// Produce unnormalized segments from the weight statistics
    ///
    /// Must return at least one segment with unique names.
    fn synthesize(&self, stats: &WeightStats) -> Vec<SegmentDraft>;
}

/// Strategy table keyed by domain id
pub struct SegmentSynthesizer {
    strategies: HashMap<String, Arc<dyn SegmentStrategy>>,
    fallback: Arc<dyn SegmentStrategy>,
}

impl SegmentSynthesizer {
    /// Synthesizer with the built-in domains registered
    pub fn new() -> Self {
        let mut synthesizer = Self::empty();
        synthesizer.register(DIGITAL_ENGAGEMENT_DOMAIN, Arc::new(DigitalEngagementStrategy));
        synthesizer
    }

    /// Synthesizer that uses the generic strategy for every domain
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(GenericStrategy),
        }
    }

    /// Register (or replace) the strategy for a domain
    pub fn register(&mut self, domain: impl Into<String>, strategy: Arc<dyn SegmentStrategy>) {
        self.strategies.insert(domain.into(), strategy);
    }

    /// Strategy that applies to a domain
    pub fn strategy_for(&self, domain: &str) -> &dyn SegmentStrategy {
        self.strategies
            .get(domain)
            .map(|s| s.as_ref())
            .unwrap_or_else(|| self.fallback.as_ref())
    }

    /// Whether a domain has its own formula set
    pub fn has_dedicated_strategy(&self, domain: &str) -> bool {
        self.strategies.contains_key(domain)
    }

    /// Raw segments for a weight vector
    pub fn synthesize(&self, weights: &WeightVector, domain: &str) -> Vec<SegmentDraft> {
        let stats = weights.stats();
        let strategy = self.strategy_for(domain);
        let drafts = strategy.synthesize(&stats);

        tracing::debug!(
            domain,
            strategy = strategy.name(),
            mean = stats.mean,
            segments = drafts.len(),
            "Synthesized segments"
        );

        drafts
    }

    /// Synthesize and normalize in one step
    pub fn profiles(
        &self,
        weights: &WeightVector,
        domain: &str,
        normalizer: &PercentageNormalizer,
    ) -> Vec<SegmentProfile> {
        normalizer.normalize(self.synthesize(weights, domain))
    }
}

impl Default for SegmentSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
