//! Template matching: synthetic ring templates, ZNCC similarity maps,
//! local-maximum picking and patch extraction.
//!
//! These are the default implementations behind [`crate::search::SearchBackend`];
//! the search itself only sees them through that trait.

pub mod maxima;
pub mod patch;
pub mod template;
pub mod zncc;

pub use maxima::local_maxima;
pub use patch::{extract_patch, Patch};
pub use template::{diffuse_ellipse, radial_attenuation, ring_profile};
pub use zncc::{zncc_map, zncc_score};
