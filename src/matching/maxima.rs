//! Local maxima of a score raster.
use crate::image::{ImageF32, ImageView};
use crate::types::Point;

/// Pixels at least `order` away from the border whose score is `>= threshold`
/// and not below any score in the surrounding `(2·order + 1)²` window.
///
/// Plateaus yield every tied pixel. Points are returned in row-major order.
pub fn local_maxima(scores: &ImageF32, order: usize, threshold: f32) -> Vec<Point> {
    let mut maxima = Vec::new();
    let (w, h) = (scores.w, scores.h);
    if w <= order || h <= order {
        return maxima;
    }
    let y_end = (h - order).min(h - 1);
    let x_end = (w - order).min(w - 1);
    for y in order..=y_end {
        let row = scores.row(y);
        for x in order..=x_end {
            let v = row[x];
            if v < threshold {
                continue;
            }
            let y0 = y - order;
            let y1 = (y + order).min(h - 1);
            let x0 = x - order;
            let x1 = (x + order).min(w - 1);
            let is_max = (y0..=y1).all(|yy| scores.row(yy)[x0..=x1].iter().all(|&n| v >= n));
            if is_max {
                maxima.push(Point::new(x as f64, y as f64));
            }
        }
    }
    maxima
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_isolated_peaks_above_threshold() {
        let mut img = ImageF32::new(30, 20);
        img.set(8, 6, 0.9);
        img.set(9, 6, 0.5);
        img.set(20, 12, 0.3);
        img.set(22, 15, 0.7);
        let peaks = local_maxima(&img, 3, 0.4);
        assert_eq!(peaks, vec![Point::new(8.0, 6.0), Point::new(22.0, 15.0)]);
    }

    #[test]
    fn peaks_near_the_border_are_skipped() {
        let mut img = ImageF32::new(10, 10);
        img.set(1, 5, 1.0);
        assert!(local_maxima(&img, 2, 0.1).is_empty());
        assert!(local_maxima(&ImageF32::new(2, 2), 3, 0.0).is_empty());
    }
}
