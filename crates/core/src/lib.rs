//! Core types for customer segmentation
//!
//! This crate provides the pure computational core:
//! - Weight vectors and their bounds
//! - Named weight presets
//! - Dimension labels for the radar surfaces
//! - Segment synthesis (strategy table keyed by domain)
//! - Percentage normalization
//! - Attribute breakdown lookups
//! - Error types
//!
//! Everything here is synchronous and side-effect free apart from
//! `tracing` events.

pub mod attributes;
pub mod dimensions;
pub mod error;
pub mod normalize;
pub mod presets;
pub mod segment;
pub mod synthesis;
pub mod weights;

pub use attributes::{AttributeBreakdown, AttributeTable, Impact, SubAttribute, DEFAULT_ATTRIBUTE};
pub use dimensions::DimensionSet;
pub use error::{Error, Result};
pub use normalize::{PercentageNormalizer, RoundingPolicy};
pub use presets::{Preset, PresetCatalog};
pub use segment::{SegmentDraft, SegmentProfile, SegmentTemplate};
pub use synthesis::{
    DigitalEngagementStrategy, GenericStrategy, SegmentStrategy, SegmentSynthesizer,
    DIGITAL_ENGAGEMENT_DOMAIN,
};
pub use weights::{
    WeightBounds, WeightStats, WeightVector, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT,
};
