//! Segment studio sessions
//!
//! Features:
//! - Radar weighting sessions that re-synthesize segments on every edit
//! - Preset selection
//! - Single-subscriber bridge for segment clicks from the 3D view

pub mod bridge;
pub mod session;

pub use bridge::{SegmentClickBridge, SegmentSelection, Subscription};
pub use session::{RadarSurface, SegmentationSession, GENERAL_DOMAIN};

use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Segmentation error: {0}")]
    Core(#[from] segment_studio_core::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] segment_studio_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
