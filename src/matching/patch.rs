//! Square windows cut around a point.
use crate::image::ImageF32;
use crate::types::Point;

/// A sub-raster together with where it came from.
#[derive(Clone, Debug)]
pub struct Patch {
    pub image: ImageF32,
    /// The requested centre in patch coordinates.
    pub center: Point,
    /// Top-left corner of the patch in source coordinates.
    pub corner: Point,
}

/// Cut a window of half-size `round(factor · radius)` around `center`.
///
/// The window is clamped to the raster; a centre near the border therefore
/// ends up off-centre in the patch. Window bounds are truncated to whole
/// pixels after clamping.
pub fn extract_patch(raster: &ImageF32, center: Point, radius: f64, factor: f64) -> Patch {
    let half = (factor * radius).round();
    let clamp = |v: f64, max: usize| v.max(0.0).min(max as f64) as usize;
    let min_x = clamp(center.x - half, raster.w);
    let max_x = clamp(center.x + half, raster.w);
    let min_y = clamp(center.y - half, raster.h);
    let max_y = clamp(center.y + half, raster.h);

    let corner = Point::new(min_x as f64, min_y as f64);
    Patch {
        image: raster.crop(min_x, min_y, max_x - min_x, max_y - min_y),
        center: center - corner,
        corner,
    }
}
