//! Edge maps: Gaussian smoothing, image gradients and Canny-style thinning.
//!
//! This module provides the default edge-map collaborator used by the search:
//!
//! - Separable Gaussian blur with OpenCV-compatible kernel sizing.
//! - Sobel gradients returning `gx`, `gy` and magnitude.
//! - Direction-aligned non-maximum suppression on the gradient magnitude.
//! - Double-threshold hysteresis producing a binary raster (1.0 on edges).
//!
//! Borders are handled by clamping indices (replicate). Thresholds are
//! expressed in 8-bit intensity units so that the usual Canny settings carry
//! over unchanged.

pub mod blur;
pub mod canny;
pub mod grad;
pub mod nms;

pub use blur::{gaussian_blur, GaussianKernel, SeparableFilter};
pub use canny::{canny_edge_map, EdgeMapOptions};
pub use grad::{sobel_gradients, Grad};
pub use nms::suppress_non_maxima;
