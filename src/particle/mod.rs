//! Particles: a contour plus the descriptors derived from it.
//!
//! A [`Particle`] is immutable. Every operation that changes the contour
//! (outlier removal, translation, unit conversion) builds a new particle so
//! the descriptors can never drift from the points they describe.

pub mod descriptors;
pub mod outliers;
pub mod registry;

pub use descriptors::Descriptors;
pub use outliers::{find_outliers, refine_particle};
pub use registry::{Admission, AdmissionRule, ParticleRegistry};

use crate::types::{Contour, Point};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    contour: Contour,
    descriptors: Descriptors,
}

impl Particle {
    pub fn new(contour: Contour) -> Self {
        let descriptors = Descriptors::of(&contour);
        Self {
            contour,
            descriptors,
        }
    }

    #[inline]
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    #[inline]
    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    /// Number of contour points.
    #[inline]
    pub fn len(&self) -> usize {
        self.contour.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contour.is_empty()
    }

    pub fn center(&self) -> Point {
        self.descriptors.center
    }

    pub fn area(&self) -> f64 {
        self.descriptors.area
    }

    pub fn perimeter(&self) -> f64 {
        self.descriptors.perimeter
    }

    pub fn radius(&self) -> f64 {
        self.descriptors.radius
    }

    pub fn circularity(&self) -> f64 {
        self.descriptors.circularity
    }

    pub fn radial_mean(&self) -> f64 {
        self.descriptors.radial_mean
    }

    pub fn radial_sd(&self) -> f64 {
        self.descriptors.radial_sd
    }

    pub fn radial_difference_sd(&self) -> f64 {
        self.descriptors.radial_difference_sd
    }

    /// New particle built from the contour minus `indices`.
    pub fn without_points(&self, indices: &[usize]) -> Particle {
        Particle::new(self.contour.without(indices))
    }

    pub fn translated(&self, by: Point) -> Particle {
        Particle::new(self.contour.translated(by))
    }

    /// New particle with every contour point multiplied by `k` (no rounding).
    pub fn scaled(&self, k: f64) -> Particle {
        Particle::new(self.contour.scaled(k, false))
    }

    pub fn into_contour(self) -> Contour {
        self.contour
    }
}

impl From<Contour> for Particle {
    fn from(contour: Contour) -> Self {
        Particle::new(contour)
    }
}
