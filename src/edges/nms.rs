//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! For each pixel the two neighbours along the quantized gradient direction
//! (0°, 45°, 90°, 135°) are compared; responses that are not strictly greater
//! than both are zeroed. The outermost 1-pixel frame is always suppressed to
//! avoid out-of-bounds neighbour lookups.
use crate::edges::grad::Grad;
use crate::image::{ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Thin the gradient magnitude to one-pixel ridges.
///
/// Returns a raster holding the magnitude on surviving pixels and 0 elsewhere.
pub fn suppress_non_maxima(grad: &Grad) -> ImageF32 {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut out = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let dst = out.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= 0.0 {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            // Image rows grow downward, so a same-sign gradient points along
            // the main diagonal (x-1, y-1) → (x+1, y+1).
            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x - 1], mag_next[x + 1])
                } else {
                    (mag_prev[x + 1], mag_next[x - 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            // Ties keep the pixel on one side only, which leaves plateaus
            // one pixel wide instead of erasing them.
            if mag < neighbor1 || mag <= neighbor2 {
                continue;
            }
            dst[x] = mag;
        }
    }

    out
}
