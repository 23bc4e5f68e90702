//! Conversion from pixels to physical units with a single scalar ratio.
use crate::particle::Particle;
use serde::{Deserialize, Serialize};

/// Units per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelScale {
    units_per_pixel: f64,
}

impl Default for PixelScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PixelScale {
    pub const IDENTITY: PixelScale = PixelScale {
        units_per_pixel: 1.0,
    };

    pub fn new(units_per_pixel: f64) -> Self {
        Self { units_per_pixel }
    }

    /// Scale that maps the mean radius of `particles` onto `true_radius`.
    ///
    /// Falls back to [`PixelScale::IDENTITY`] when there are no particles or
    /// their mean radius is zero.
    pub fn from_reference<'a>(
        particles: impl IntoIterator<Item = &'a Particle>,
        true_radius: f64,
    ) -> Self {
        let (count, sum) = particles
            .into_iter()
            .fold((0usize, 0.0), |(n, s), p| (n + 1, s + p.radius()));
        if count == 0 || sum == 0.0 {
            return Self::IDENTITY;
        }
        Self::new(true_radius / (sum / count as f64))
    }

    #[inline]
    pub fn units_per_pixel(&self) -> f64 {
        self.units_per_pixel
    }

    #[inline]
    pub fn length(&self, pixels: f64) -> f64 {
        pixels * self.units_per_pixel
    }

    #[inline]
    pub fn area(&self, pixels: f64) -> f64 {
        pixels * self.units_per_pixel * self.units_per_pixel
    }

    /// The particle rebuilt from its contour expressed in units.
    pub fn to_units(&self, particle: &Particle) -> Particle {
        particle.scaled(self.units_per_pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Contour, Point};
    use std::f64::consts::PI;

    fn circle(r: f64) -> Particle {
        let contour: Contour = (0..40)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / 40.0;
                Point::new(200.0 + r * t.cos(), 150.0 + r * t.sin())
            })
            .collect();
        Particle::new(contour)
    }

    #[test]
    fn reference_mean_radius_maps_to_true_radius() {
        let particles = [circle(20.0), circle(30.0)];
        let scale = PixelScale::from_reference(&particles, 100.0);
        assert!((scale.units_per_pixel() - 4.0).abs() < 1e-9);
        assert!((scale.length(25.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn no_reference_means_identity() {
        assert_eq!(
            PixelScale::from_reference(std::iter::empty::<&Particle>(), 100.0),
            PixelScale::IDENTITY
        );
    }

    #[test]
    fn unit_conversion_rebuilds_descriptors() {
        let p = circle(25.0);
        let scale = PixelScale::new(0.5);
        let q = scale.to_units(&p);
        assert!((q.radius() - 12.5).abs() < 1e-9);
        assert!((q.area() - scale.area(p.area())).abs() < 1e-9);
        assert!((q.circularity() - p.circularity()).abs() < 1e-12);
    }
}
