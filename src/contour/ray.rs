//! Sub-pixel ray sampling over a raster.
use crate::image::ImageF32;
use crate::types::Point;
use std::cmp::Ordering;

/// Parametric step between consecutive samples.
pub const RAY_STEP: f64 = 0.5;
/// Upper bound on samples taken in each direction.
pub const RAY_MAX_STEPS: usize = 1000;

/// A raster pixel crossed by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Integer pixel coordinates.
    pub pixel: Point,
    /// Raster value at `pixel`.
    pub value: f32,
    /// Signed parametric distance from the start point at which the pixel was
    /// first entered; negative on the backward half-ray.
    pub offset: f64,
}

/// Collect the pixels on the line through `start` along `dir` whose value
/// exceeds `tol`, strongest first.
///
/// The line is walked forward then backward in steps of [`RAY_STEP`]; each
/// walk stops when it leaves the raster or after [`RAY_MAX_STEPS`] samples.
/// Consecutive samples that round to the same pixel are recorded once. Equal
/// values keep their visiting order.
pub fn find_radial_edge(raster: &ImageF32, start: Point, dir: Point, tol: f32) -> Vec<RayHit> {
    let mut hits = Vec::new();
    let origin = (start.x.round() as i64, start.y.round() as i64);

    for (sign, mut last) in [(1.0, None), (-1.0, Some(origin))] {
        let mut t = 0.0;
        for _ in 0..RAY_MAX_STEPS {
            let offset = sign * t;
            let px = (start.x + offset * dir.x).round() as i64;
            let py = (start.y + offset * dir.y).round() as i64;
            t += RAY_STEP;
            if last == Some((px, py)) {
                continue;
            }
            last = Some((px, py));
            let Some(value) = raster.get_checked(px, py) else {
                break;
            };
            if value > tol {
                hits.push(RayHit {
                    pixel: Point::new(px as f64, py as f64),
                    value,
                    offset,
                });
            }
        }
    }

    hits.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_raster_yields_nothing() {
        let img = ImageF32::new(50, 40);
        let hits = find_radial_edge(&img, Point::new(25.0, 20.0), Point::new(0.6, 0.8), 0.1);
        assert!(hits.is_empty());
    }

    #[test]
    fn hits_are_ranked_and_signed() {
        let mut img = ImageF32::new(21, 5);
        img.set(15, 2, 0.6);
        img.set(4, 2, 0.9);
        img.set(12, 2, 0.2);
        let hits = find_radial_edge(&img, Point::new(10.0, 2.0), Point::new(1.0, 0.0), 0.3);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].pixel, Point::new(4.0, 2.0));
        assert!((hits[0].offset + 6.0).abs() < 1e-12);
        assert_eq!(hits[1].pixel, Point::new(15.0, 2.0));
        assert!((hits[1].offset - 4.5).abs() < 1e-12);
    }

    #[test]
    fn start_pixel_is_recorded_once() {
        let mut img = ImageF32::new(5, 5);
        img.set(2, 2, 1.0);
        let hits = find_radial_edge(&img, Point::new(2.0, 2.0), Point::new(0.0, 1.0), 0.5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].offset, 0.0);
    }

    #[test]
    fn long_rays_stop_at_the_step_cap() {
        let img = ImageF32::from_fn(3000, 1, |_, _| 1.0);
        let hits = find_radial_edge(&img, Point::new(1500.0, 0.0), Point::new(1.0, 0.0), 0.5);
        // 1000 samples at half-pixel steps cover 500 pixels each way.
        assert!(hits.len() <= 2 * RAY_MAX_STEPS);
        assert_eq!(hits.len(), 1000);
        assert!(hits.iter().all(|h| h.pixel.x > 999.0 && h.pixel.x < 2001.0));
    }
}
