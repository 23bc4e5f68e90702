//! Statistical outlier removal on contour points.
//!
//! Two z-score tests run per point: the distance to the centre against a
//! reference mean/SD, and the jump from the previous point's distance against
//! the contour's own radial-difference SD. A jump is blamed on whichever of
//! the two points lies further from the reference mean.
use super::descriptors::{center, radial_steps};
use super::Particle;
use crate::types::Contour;
use log::debug;

/// Indices of contour points that fail either z-score test at threshold `t`,
/// sorted ascending without duplicates.
///
/// `r` and `sd` are the reference radial mean and standard deviation. When
/// `sd` is zero nothing is flagged; when the contour's radial-difference SD is
/// zero only the first test applies.
pub fn find_outliers(contour: &Contour, r: f64, sd: f64, t: f64) -> Vec<usize> {
    if sd == 0.0 || contour.is_empty() {
        return Vec::new();
    }
    let c = center(contour);
    let radii: Vec<f64> = contour.points().iter().map(|p| p.distance(&c)).collect();
    let steps = radial_steps(&radii);
    let step_sd = (steps.iter().map(|d| d * d).sum::<f64>() / steps.len() as f64).sqrt();
    let n = radii.len();

    let mut flagged = Vec::new();
    for (i, (&radius, &step)) in radii.iter().zip(&steps).enumerate() {
        let prev = (i + n - 1) % n;
        if ((radius - r) / sd).abs() > t {
            flagged.push(i);
        } else if step_sd > 0.0 && (step / step_sd).abs() > t {
            if (radius - r).abs() > (radii[prev] - r).abs() {
                flagged.push(i);
            } else {
                flagged.push(prev);
            }
        }
    }
    flagged.sort_unstable();
    flagged.dedup();
    flagged
}

/// Strip outliers measured against the particle's own radial statistics and
/// rebuild the particle from the remaining points.
pub fn refine_particle(particle: &Particle, t: f64) -> Particle {
    let outliers = find_outliers(
        particle.contour(),
        particle.radial_mean(),
        particle.radial_sd(),
        t,
    );
    if outliers.is_empty() {
        return particle.clone();
    }
    debug!(
        "removing {} of {} contour points as outliers",
        outliers.len(),
        particle.len()
    );
    particle.without_points(&outliers)
}
