//! Errors reported at the search boundary.
//!
//! Geometry never fails; only malformed input images and out-of-range
//! configuration values are rejected, before any work is done.
use thiserror::Error;

/// A configuration value outside its valid range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("contour needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("{field} blur kernel must be odd and non-zero, got {size}")]
    BlurKernel { field: &'static str, size: usize },
    #[error("{field}: low threshold {low} exceeds high threshold {high}")]
    ThresholdOrder {
        field: &'static str,
        low: f32,
        high: f32,
    },
    #[error("max_dim must be non-zero")]
    ZeroMaxDim,
}

/// Failure of a search run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },
    #[error("invalid search configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("pixel buffer holds {actual} bytes, expected at least {expected}")]
    BufferSize { expected: usize, actual: usize },
}
