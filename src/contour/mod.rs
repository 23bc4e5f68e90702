//! Contour construction by radial ray casting.
//!
//! [`find_radial_edge`] walks a ray through a raster and ranks the pixels it
//! crosses; [`build_contour`] casts a fan of such rays around a candidate
//! centre and keeps the best hit of each to form a closed polygon.

pub mod builder;
pub mod ray;

pub use builder::{build_contour, ContourSampling};
pub use ray::{find_radial_edge, RayHit, RAY_MAX_STEPS, RAY_STEP};
