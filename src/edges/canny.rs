//! Binary edge maps: blur, Sobel, non-maximum suppression and hysteresis.
//!
//! Thresholds are expressed in 8-bit intensity units so that values tuned on
//! ordinary photographs carry over; the input raster is in `[0, 1]` and is
//! rescaled by 255 before differentiation.
use super::blur::gaussian_blur;
use super::grad::sobel_gradients;
use super::nms::suppress_non_maxima;
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

/// Parameters of one edge-map pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeMapOptions {
    /// Odd Gaussian kernel size; 1 disables smoothing.
    pub blur_size: usize,
    /// Lower hysteresis threshold; weaker ridges are discarded.
    pub low: f32,
    /// Upper hysteresis threshold; stronger ridges seed edges.
    pub high: f32,
}

impl Default for EdgeMapOptions {
    fn default() -> Self {
        Self {
            blur_size: 3,
            low: 0.0,
            high: 50.0,
        }
    }
}

/// Compute a binary edge map (1.0 on edges, 0.0 elsewhere).
pub fn canny_edge_map(gray: &ImageF32, opts: &EdgeMapOptions) -> ImageF32 {
    let mut scaled = gaussian_blur(gray, opts.blur_size);
    for v in scaled.data.iter_mut() {
        *v *= 255.0;
    }
    let grad = sobel_gradients(&scaled);
    let ridges = suppress_non_maxima(&grad);
    hysteresis(&ridges, opts.low, opts.high)
}

/// Keep ridges above `low` that are 8-connected to a ridge above `high`.
fn hysteresis(ridges: &ImageF32, low: f32, high: f32) -> ImageF32 {
    let (w, h) = (ridges.w, ridges.h);
    let mut out = ImageF32::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let v = ridges.get(x, y);
            if v > high && v > low && out.get(x, y) == 0.0 {
                out.set(x, y, 1.0);
                stack.push((x, y));
            }
            while let Some((cx, cy)) = stack.pop() {
                for ny in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                    let src = ridges.row(ny);
                    let dst = out.row_mut(ny);
                    for nx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                        if dst[nx] == 0.0 && src[nx] > low {
                            dst[nx] = 1.0;
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(w: usize, h: usize, cx: f32, cy: f32, r: f32) -> ImageF32 {
        ImageF32::from_fn(w, h, |x, y| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if (dx * dx + dy * dy).sqrt() <= r {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn disc_boundary_is_detected_near_radius() {
        let img = disc(80, 80, 40.0, 40.0, 20.0);
        let edges = canny_edge_map(&img, &EdgeMapOptions::default());
        let mut count = 0usize;
        for y in 0..edges.h {
            for x in 0..edges.w {
                if edges.get(x, y) > 0.0 {
                    count += 1;
                    let d = ((x as f32 - 40.0).powi(2) + (y as f32 - 40.0).powi(2)).sqrt();
                    assert!((d - 20.0).abs() < 2.5, "edge pixel ({x},{y}) at distance {d}");
                }
            }
        }
        assert!(count > 60, "too few edge pixels: {count}");
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = ImageF32::from_fn(20, 20, |_, _| 0.5);
        let edges = canny_edge_map(&img, &EdgeMapOptions::default());
        assert!(edges.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn weak_ridges_need_a_strong_neighbour() {
        let mut ridges = ImageF32::new(6, 3);
        ridges.set(1, 1, 100.0);
        ridges.set(2, 1, 10.0);
        ridges.set(4, 1, 10.0);
        let out = hysteresis(&ridges, 5.0, 50.0);
        assert_eq!(out.get(1, 1), 1.0);
        assert_eq!(out.get(2, 1), 1.0);
        assert_eq!(out.get(4, 1), 0.0);
    }
}
