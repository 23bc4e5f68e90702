//! Synthetic ring templates.
//!
//! A diffuse ring has the profile `s / ((d − 1)² + s)` where `s = (1 − sharpness)²`
//! and `d` is the normalised elliptical distance from the centre, so the
//! response peaks at 1 on the ellipse and decays on both sides. A sharpness of
//! exactly 1 degenerates into a crisp band one and a half pixels wide.
use crate::image::{ImageF32, ImageViewMut};
use crate::types::Point;

/// Ring weight at normalised distance `d`.
#[inline]
pub fn ring_profile(d: f64, sharpness: f64) -> f64 {
    let s = (1.0 - sharpness).powi(2);
    s / ((d - 1.0).powi(2) + s)
}

/// Render a `size.0 × size.1` template of an ellipse with the given diagonals,
/// centred in the raster.
pub fn diffuse_ellipse(size: (usize, usize), diagonals: (f64, f64), sharpness: f64) -> ImageF32 {
    let (w, h) = size;
    let half_x = diagonals.0 / 2.0;
    let half_y = diagonals.1 / 2.0;
    let shift_x = (w as f64 - diagonals.0) / 2.0;
    let shift_y = (h as f64 - diagonals.1) / 2.0;
    let mut out = ImageF32::new(w, h);
    if half_x <= 0.0 || half_y <= 0.0 {
        return out;
    }
    let outer = half_x.hypot(half_y);

    for y in 0..h {
        let ny = (y as f64 - shift_y + 0.5 - half_y) / half_y;
        let row = out.row_mut(y);
        for (x, px) in row.iter_mut().enumerate() {
            let nx = (x as f64 - shift_x + 0.5 - half_x) / half_x;
            let d = nx.hypot(ny);
            *px = if sharpness < 1.0 {
                ring_profile(d, sharpness) as f32
            } else {
                let r = outer * d;
                if r <= outer + 0.5 && r >= outer - 1.0 {
                    1.0
                } else {
                    0.0
                }
            };
        }
    }
    out
}

/// Weight every pixel of `raster` by the ring profile of a circle of
/// `radius` around `center`.
///
/// Returns a weighted copy; pixels near the expected boundary keep their
/// value, pixels far inside or outside it fade towards zero.
pub fn radial_attenuation(raster: &ImageF32, center: Point, radius: f64, sharpness: f64) -> ImageF32 {
    let mut out = raster.clone();
    if radius <= 0.0 {
        return out;
    }
    for y in 0..out.h {
        let dy = y as f64 - center.y;
        let row = out.row_mut(y);
        for (x, px) in row.iter_mut().enumerate() {
            if *px == 0.0 {
                continue;
            }
            let d = (x as f64 - center.x).hypot(dy) / radius;
            *px *= ring_profile(d, sharpness) as f32;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_peaks_on_the_ring() {
        assert!((ring_profile(1.0, 0.7) - 1.0).abs() < 1e-12);
        assert!(ring_profile(0.5, 0.7) < 0.3);
        assert!(ring_profile(1.3, 0.7) >= 0.5 - 1e-9);
    }

    #[test]
    fn diffuse_template_is_symmetric() {
        let t = diffuse_ellipse((24, 24), (20.0, 20.0), 0.7);
        for y in 0..24 {
            for x in 0..24 {
                assert!((t.get(x, y) - t.get(23 - x, y)).abs() < 1e-6);
                assert!((t.get(x, y) - t.get(x, 23 - y)).abs() < 1e-6);
            }
        }
        assert!(t.get(12, 2) > 0.9, "ring row should be bright");
        assert!(t.get(12, 12) < 0.2, "centre should be dark");
    }

    #[test]
    fn crisp_template_is_binary_band() {
        let t = diffuse_ellipse((24, 24), (20.0, 20.0), 1.0);
        assert!(t.data.iter().all(|&v| v == 0.0 || v == 1.0));
        assert_eq!(t.get(12, 12), 0.0);
        assert!(t.data.iter().any(|&v| v == 1.0));
    }

    #[test]
    fn attenuation_keeps_boundary_pixels() {
        let edges = ImageF32::from_fn(41, 41, |_, _| 1.0);
        let att = radial_attenuation(&edges, Point::new(20.0, 20.0), 10.0, 0.7);
        assert!((att.get(30, 20) - 1.0).abs() < 1e-6);
        assert!(att.get(20, 20) < 0.1);
        assert_eq!(edges.get(20, 20), 1.0, "input untouched");
    }
}
