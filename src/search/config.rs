//! Typed, validated parameters of one particle search.
//!
//! Every section deserialises from JSON with defaults for missing fields;
//! only `searched_radius` is required. [`SearchConfig::validate`] checks the
//! ranges and is run by the search before touching the image.
use crate::contour::ContourSampling;
use crate::edges::EdgeMapOptions;
use crate::error::ConfigError;
use crate::particle::AdmissionRule;
use serde::{Deserialize, Serialize};

/// Edge-map settings for the full-resolution and the downscaled image.
///
/// Thresholds are in 8-bit intensity units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    pub gauss_full: usize,
    pub gauss_scaled: usize,
    pub low_full: f32,
    pub high_full: f32,
    pub low_scaled: f32,
    pub high_scaled: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            gauss_full: 11,
            gauss_scaled: 3,
            low_full: 0.0,
            high_full: 50.0,
            low_scaled: 0.0,
            high_scaled: 250.0,
        }
    }
}

impl EdgeParams {
    pub fn full(&self) -> EdgeMapOptions {
        EdgeMapOptions {
            blur_size: self.gauss_full,
            low: self.low_full,
            high: self.high_full,
        }
    }

    pub fn scaled(&self) -> EdgeMapOptions {
        EdgeMapOptions {
            blur_size: self.gauss_scaled,
            low: self.low_scaled,
            high: self.high_scaled,
        }
    }
}

/// Candidate generation by template matching.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchParams {
    /// Sharpness of the synthetic ring used in the preliminary stage.
    pub sharpness: f64,
    /// Fraction of the reference score a maximum must reach.
    pub tolerance: f64,
    /// Template and patch half-size relative to the radius.
    pub factor: f64,
    /// Largest dimension of the image used for matching.
    pub max_dim: usize,
    /// Neighbourhood radius of the local-maximum search.
    pub maxima_order: usize,
    /// Reference score for matching against a found particle.
    pub refinement_threshold: f64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            sharpness: 0.7,
            tolerance: 0.8,
            factor: 1.2,
            max_dim: 1080,
            maxima_order: 10,
            refinement_threshold: 0.4,
        }
    }
}

/// Contour sampling, admission and outlier settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    pub nb_points: usize,
    /// Overlap tolerance between particles.
    pub dist_tol: f64,
    /// Minimum circularity of an admitted particle.
    pub circ_tol: f64,
    /// Sharpness of the attenuation ring around the expected boundary.
    pub sharpness: f64,
    /// Minimum attenuated edge value accepted on a ray.
    pub radial_tol: f32,
    /// Minimum fraction of `nb_points` an admitted contour must keep.
    pub nb_tol: f64,
    /// z-score above which a contour point is an outlier.
    pub outlier_threshold: f64,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            nb_points: 35,
            dist_tol: 0.8,
            circ_tol: 0.9,
            sharpness: 0.7,
            radial_tol: 0.5,
            nb_tol: 0.8,
            outlier_threshold: 2.5,
        }
    }
}

impl ContourParams {
    pub fn sampling(&self) -> ContourSampling {
        ContourSampling {
            nb_points: self.nb_points,
            radial_tol: self.radial_tol,
            sharpness: self.sharpness,
        }
    }

    pub fn admission_rule(&self) -> AdmissionRule {
        AdmissionRule {
            min_circularity: self.circ_tol,
            min_point_ratio: self.nb_tol,
            target_points: self.nb_points,
            overlap_tolerance: self.dist_tol,
        }
    }
}

fn default_iterations() -> usize {
    1
}

fn default_color_weights() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// Parameters of one search for particles of a given radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Expected particle radius in full-resolution pixels.
    pub searched_radius: f64,
    /// Refinement rounds after the preliminary stage.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub use_color_differences: bool,
    /// Weights of the (R−G, R−B, G−B) difference channels.
    #[serde(default = "default_color_weights")]
    pub color_weights: [f64; 3],
    #[serde(default)]
    pub edges: EdgeParams,
    #[serde(default, rename = "match")]
    pub matching: MatchParams,
    #[serde(default)]
    pub contour: ContourParams,
}

impl SearchConfig {
    /// Defaults for everything but the radius.
    pub fn new(searched_radius: f64) -> Self {
        Self {
            searched_radius,
            iterations: default_iterations(),
            use_color_differences: false,
            color_weights: default_color_weights(),
            edges: EdgeParams::default(),
            matching: MatchParams::default(),
            contour: ContourParams::default(),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_color_differences(mut self, weights: [f64; 3]) -> Self {
        self.use_color_differences = true;
        self.color_weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("searched_radius", self.searched_radius)?;

        let e = &self.edges;
        odd_kernel("gauss_full", e.gauss_full)?;
        odd_kernel("gauss_scaled", e.gauss_scaled)?;
        ordered("full", e.low_full, e.high_full)?;
        ordered("scaled", e.low_scaled, e.high_scaled)?;

        let m = &self.matching;
        unit("match.sharpness", m.sharpness)?;
        unit("match.tolerance", m.tolerance)?;
        unit("match.refinement_threshold", m.refinement_threshold)?;
        positive("match.factor", m.factor)?;
        if m.max_dim == 0 {
            return Err(ConfigError::ZeroMaxDim);
        }

        let c = &self.contour;
        if c.nb_points < 3 {
            return Err(ConfigError::TooFewPoints(c.nb_points));
        }
        positive("contour.dist_tol", c.dist_tol)?;
        unit("contour.circ_tol", c.circ_tol)?;
        unit("contour.radial_tol", c.radial_tol as f64)?;
        unit("contour.nb_tol", c.nb_tol)?;
        positive("contour.outlier_threshold", c.outlier_threshold)?;
        // A sharpness of 1 makes the attenuation ring zero everywhere but on
        // the exact boundary.
        if !(0.0..1.0).contains(&c.sharpness) {
            return Err(ConfigError::OutOfUnitRange {
                field: "contour.sharpness",
                value: c.sharpness,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn odd_kernel(field: &'static str, size: usize) -> Result<(), ConfigError> {
    if size % 2 == 1 {
        Ok(())
    } else {
        Err(ConfigError::BlurKernel { field, size })
    }
}

fn ordered(field: &'static str, low: f32, high: f32) -> Result<(), ConfigError> {
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOrder { field, low, high })
    }
}
