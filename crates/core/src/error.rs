//! Error types for the segmentation core

use thiserror::Error;

/// Errors raised by weight vector construction and editing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Weight vector must have at least one dimension")]
    EmptyWeightVector,

    #[error("Dimension index {index} out of range for vector of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("Invalid weight bounds: min {min} must be finite and below max {max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, Error>;
