//! Separable Gaussian smoothing.
//!
//! Kernels follow the OpenCV sizing rule: an odd size `k` maps to
//! `sigma = 0.3 · ((k − 1) / 2 − 1) + 0.8`. Size 1 is the identity filter.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Normalised Gaussian taps for an odd kernel size.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Build the kernel for `size` (rounded up to the next odd value).
    pub fn new(size: usize) -> Self {
        let size = if size % 2 == 0 { size + 1 } else { size };
        if size <= 1 {
            return Self { taps: vec![1.0] };
        }
        let sigma = Self::sigma_for(size);
        let half = (size / 2) as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-half..=half)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }

    pub fn sigma_for(size: usize) -> f32 {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Apply a separable filter horizontally then vertically with clamped borders.
pub fn apply(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    if taps.len() <= 1 || src.is_empty() {
        return src.clone();
    }
    let half = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);

    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = horiz.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, w as isize - 1) as usize;
                acc += src_row[sx] * tap;
            }
            *dst_px = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = (y as isize + k as isize - half).clamp(0, h as isize - 1) as usize;
            let src_row = horiz.row(sy);
            for (dst_px, &v) in dst_row.iter_mut().zip(src_row.iter()) {
                *dst_px += v * tap;
            }
        }
    }
    out
}

/// Gaussian blur with an odd kernel size.
pub fn gaussian_blur(src: &ImageF32, size: usize) -> ImageF32 {
    apply(&GaussianKernel::new(size), src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let k = GaussianKernel::new(11);
        let taps = k.taps();
        assert_eq!(taps.len(), 11);
        assert!((taps.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!((taps[0] - taps[10]).abs() < 1e-7);
        assert!((GaussianKernel::sigma_for(11) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn blur_preserves_flat_images() {
        let img = ImageF32::from_fn(7, 5, |_, _| 0.5);
        let out = gaussian_blur(&img, 5);
        assert!(out.data.iter().all(|v| (v - 0.5).abs() < 1e-5));
    }

    #[test]
    fn size_one_is_identity() {
        let img = ImageF32::from_fn(4, 4, |x, y| (x * 3 + y) as f32);
        assert_eq!(gaussian_blur(&img, 1), img);
    }
}
