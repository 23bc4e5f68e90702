//! Bilinear resampling with half-pixel centre alignment.
//!
//! Source coordinates are `(dst + 0.5) · (src_len / dst_len) − 0.5`, clamped to
//! the source extents, which matches the usual "area-aligned" convention so
//! that a resize by 1.0 is the identity.
use super::{ImageF32, ImageView, ImageViewMut};

/// Resample `src` to `dst_w × dst_h`.
pub fn resize_bilinear(src: &ImageF32, dst_w: usize, dst_h: usize) -> ImageF32 {
    if src.w == dst_w && src.h == dst_h {
        return src.clone();
    }
    let mut out = ImageF32::new(dst_w, dst_h);
    if src.is_empty() || dst_w == 0 || dst_h == 0 {
        return out;
    }
    let sx = src.w as f32 / dst_w as f32;
    let sy = src.h as f32 / dst_h as f32;
    let max_x = (src.w - 1) as f32;
    let max_y = (src.h - 1) as f32;

    // Horizontal taps are shared by every row.
    let taps: Vec<(usize, usize, f32)> = (0..dst_w)
        .map(|x| {
            let fx = ((x as f32 + 0.5) * sx - 0.5).clamp(0.0, max_x);
            let x0 = fx.floor() as usize;
            let x1 = (x0 + 1).min(src.w - 1);
            (x0, x1, fx - x0 as f32)
        })
        .collect();

    for y in 0..dst_h {
        let fy = ((y as f32 + 0.5) * sy - 0.5).clamp(0.0, max_y);
        let y0 = fy.floor() as usize;
        let y1 = (y0 + 1).min(src.h - 1);
        let ty = fy - y0 as f32;
        let row0 = src.row(y0);
        let row1 = src.row(y1);
        let dst = out.row_mut(y);
        for (px, &(x0, x1, tx)) in dst.iter_mut().zip(taps.iter()) {
            let top = row0[x0] * (1.0 - tx) + row0[x1] * tx;
            let bottom = row1[x0] * (1.0 - tx) + row1[x1] * tx;
            *px = top * (1.0 - ty) + bottom * ty;
        }
    }
    out
}

/// Resize by a uniform factor, rounding the target dimensions.
pub fn resize_by(src: &ImageF32, factor: f64) -> ImageF32 {
    let w = (src.w as f64 * factor).round().max(0.0) as usize;
    let h = (src.h as f64 * factor).round().max(0.0) as usize;
    resize_bilinear(src, w, h)
}

/// Downscale so that neither dimension exceeds `max_dim`.
///
/// Returns the (possibly unchanged) image and the applied scale factor.
pub fn rescale_to_max_dim(src: &ImageF32, max_dim: usize) -> (ImageF32, f64) {
    let largest = src.w.max(src.h);
    if largest <= max_dim || largest == 0 {
        return (src.clone(), 1.0);
    }
    let factor = max_dim as f64 / largest as f64;
    (resize_by(src, factor), factor)
}
