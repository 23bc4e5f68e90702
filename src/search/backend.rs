//! Seam between the search loop and the raster operations it relies on.
use crate::edges::{canny_edge_map, EdgeMapOptions};
use crate::image::ImageF32;
use crate::matching::{self, Patch};
use crate::types::Point;

/// Raster collaborators of a search run.
///
/// Every method has a default implementation; override any one of them to
/// plug in a different edge detector, similarity measure or peak picker.
pub trait SearchBackend {
    /// Edge strength per pixel, same size as `image`.
    fn edge_map(&self, image: &ImageF32, opts: &EdgeMapOptions) -> ImageF32 {
        canny_edge_map(image, opts)
    }

    /// Match score of `template` centred on every pixel of `image`.
    fn similarity_map(&self, image: &ImageF32, template: &ImageF32) -> ImageF32 {
        matching::zncc_map(image, template)
    }

    /// Similarity of two equally sized rasters.
    fn similarity(&self, a: &ImageF32, b: &ImageF32) -> f32 {
        matching::zncc_score(a, b)
    }

    fn local_maxima(&self, scores: &ImageF32, order: usize, threshold: f32) -> Vec<Point> {
        matching::local_maxima(scores, order, threshold)
    }

    fn extract_patch(&self, raster: &ImageF32, center: Point, radius: f64, factor: f64) -> Patch {
        matching::extract_patch(raster, center, radius, factor)
    }
}

/// Canny edges, ZNCC similarity and the plain local-maximum picker.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBackend;

impl SearchBackend for DefaultBackend {}

impl<B: SearchBackend + ?Sized> SearchBackend for &B {
    fn edge_map(&self, image: &ImageF32, opts: &EdgeMapOptions) -> ImageF32 {
        (**self).edge_map(image, opts)
    }

    fn similarity_map(&self, image: &ImageF32, template: &ImageF32) -> ImageF32 {
        (**self).similarity_map(image, template)
    }

    fn similarity(&self, a: &ImageF32, b: &ImageF32) -> f32 {
        (**self).similarity(a, b)
    }

    fn local_maxima(&self, scores: &ImageF32, order: usize, threshold: f32) -> Vec<Point> {
        (**self).local_maxima(scores, order, threshold)
    }

    fn extract_patch(&self, raster: &ImageF32, center: Point, radius: f64, factor: f64) -> Patch {
        (**self).extract_patch(raster, center, radius, factor)
    }
}
