//! Closed contours from a fan of radial rays.
use super::ray::find_radial_edge;
use crate::image::ImageF32;
use crate::matching::radial_attenuation;
use crate::types::{Contour, Point};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Ray fan parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourSampling {
    /// Number of rays, evenly spaced in angle.
    pub nb_points: usize,
    /// Minimum attenuated edge value accepted as a hit.
    pub radial_tol: f32,
    /// Sharpness of the attenuation ring, in `[0, 1)`.
    pub sharpness: f64,
}

/// Trace the boundary of a roughly circular object around `center`.
///
/// The edge map is first weighted by a ring of the expected `radius` so that
/// responses far from the expected boundary drop below `radial_tol`. Each ray
/// `θ_i = 2πi/N` then contributes its strongest hit on the forward half-ray;
/// rays without one are skipped, so the contour may hold fewer than `N`
/// points but always in increasing angle.
pub fn build_contour(edges: &ImageF32, center: Point, radius: f64, sampling: &ContourSampling) -> Contour {
    let weighted = radial_attenuation(edges, center, radius, sampling.sharpness);
    let n = sampling.nb_points;

    let contour: Contour = (0..n)
        .filter_map(|i| {
            let theta = 2.0 * PI * i as f64 / n as f64;
            let dir = Point::new(theta.cos(), theta.sin());
            find_radial_edge(&weighted, center, dir, sampling.radial_tol)
                .into_iter()
                .find(|hit| hit.offset >= 0.0)
                .map(|hit| hit.pixel)
        })
        .collect();

    debug!(
        "contour at ({:.1}, {:.1}) r={radius:.1}: {}/{n} rays hit",
        center.x,
        center.y,
        contour.len()
    );
    contour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampling() -> ContourSampling {
        ContourSampling {
            nb_points: 35,
            radial_tol: 0.5,
            sharpness: 0.7,
        }
    }

    fn ring(w: usize, h: usize, c: Point, r: f64) -> ImageF32 {
        ImageF32::from_fn(w, h, |x, y| {
            let d = Point::new(x as f64, y as f64).distance(&c);
            if (d - r).abs() <= 0.5 {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn traces_a_clean_ring() {
        let c = Point::new(82.0, 74.0);
        let edges = ring(160, 150, c, 30.0);
        let contour = build_contour(&edges, c, 30.0, &sampling());
        assert_eq!(contour.len(), 35);
        for p in contour.points() {
            let d = p.distance(&c);
            assert!((d - 30.0).abs() <= 1.0, "point {p:?} at distance {d}");
        }
        assert_eq!(contour.points()[0], Point::new(112.0, 74.0));
    }

    #[test]
    fn off_centre_candidate_still_orders_points_by_angle() {
        let c = Point::new(82.0, 74.0);
        let edges = ring(160, 150, c, 30.0);
        let start = Point::new(86.0, 71.0);
        let contour = build_contour(&edges, start, 30.0, &sampling());
        assert!(contour.len() >= 30);
        let mut prev = f64::NEG_INFINITY;
        for p in contour.points() {
            let mut a = (p.y - start.y).atan2(p.x - start.x);
            if a < -1e-9 {
                a += 2.0 * PI;
            }
            assert!(a > prev, "angles must increase");
            prev = a;
        }
    }

    #[test]
    fn spurious_inner_edges_are_attenuated() {
        let c = Point::new(60.0, 60.0);
        let mut edges = ring(120, 120, c, 30.0);
        edges.set(70, 60, 1.0);
        let contour = build_contour(&edges, c, 30.0, &sampling());
        assert_eq!(contour.points()[0], Point::new(90.0, 60.0));
    }

    #[test]
    fn stronger_backward_hit_is_ignored() {
        let c = Point::new(60.0, 60.0);
        let mut edges = ring(120, 120, c, 30.0);
        edges.set(30, 60, 2.0);
        let contour = build_contour(&edges, c, 30.0, &sampling());
        assert_eq!(contour.points()[0], Point::new(90.0, 60.0));
    }

    #[test]
    fn empty_edge_map_gives_empty_contour() {
        let edges = ImageF32::new(40, 40);
        let contour = build_contour(&edges, Point::new(20.0, 20.0), 10.0, &sampling());
        assert!(contour.is_empty());
    }
}
