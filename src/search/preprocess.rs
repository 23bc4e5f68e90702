//! Conversion of the RGB input into the rasters the search works on.
use super::config::SearchConfig;
use crate::error::SearchError;
use crate::image::{rescale_to_max_dim, ImageF32, ImageRgbU8, ImageViewMut};
use log::debug;

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Rasters derived from one input image.
#[derive(Clone, Debug)]
pub struct Prepared {
    /// Full-resolution search image (grayscale or colour differences).
    pub image: ImageF32,
    /// `image` downscaled to the matching resolution.
    pub scaled: ImageF32,
    /// `scaled` size over `image` size.
    pub scale_factor: f64,
    /// Plain grayscale image, kept only when `image` holds colour
    /// differences.
    pub gray: Option<ImageF32>,
}

/// Reject empty images and buffers shorter than the view claims.
pub fn check_input(rgb: &ImageRgbU8<'_>) -> Result<(), SearchError> {
    if rgb.w == 0 || rgb.h == 0 {
        return Err(SearchError::EmptyImage {
            width: rgb.w,
            height: rgb.h,
        });
    }
    let expected = rgb.required_len();
    if rgb.data.len() < expected || rgb.stride < 3 * rgb.w {
        return Err(SearchError::BufferSize {
            expected,
            actual: rgb.data.len(),
        });
    }
    Ok(())
}

fn combine(rgb: &ImageRgbU8<'_>, weights: [f32; 3]) -> ImageF32 {
    let mut out = ImageF32::new(rgb.w, rgb.h);
    for y in 0..rgb.h {
        let src = rgb.row(y);
        for (px, c) in out.row_mut(y).iter_mut().zip(src.chunks_exact(3)) {
            *px = weights[0] * c[0] as f32 + weights[1] * c[1] as f32 + weights[2] * c[2] as f32;
        }
    }
    out
}

/// Luma in `[0, 1]`.
pub fn to_grayscale(rgb: &ImageRgbU8<'_>) -> ImageF32 {
    let w = LUMA_WEIGHTS.map(|k| k / 255.0);
    combine(rgb, w)
}

/// Map the value range linearly onto `[0, 1]`; flat images are returned as is.
pub fn normalize(img: &ImageF32) -> ImageF32 {
    let mut out = img.clone();
    if let Some((lo, hi)) = img.min_max() {
        if hi > lo {
            let span = hi - lo;
            for v in out.data.iter_mut() {
                *v = (*v - lo) / span;
            }
        }
    }
    out
}

/// Weighted sum of the normalised R−G, R−B and G−B channels, normalised.
///
/// Highlights objects that differ from the background by hue rather than
/// brightness.
pub fn color_differences(rgb: &ImageRgbU8<'_>, weights: [f64; 3]) -> ImageF32 {
    let channels = [
        normalize(&combine(rgb, [1.0, -1.0, 0.0])),
        normalize(&combine(rgb, [1.0, 0.0, -1.0])),
        normalize(&combine(rgb, [0.0, 1.0, -1.0])),
    ];
    let mut out = ImageF32::new(rgb.w, rgb.h);
    for (channel, &k) in channels.iter().zip(weights.iter()) {
        for (dst, &src) in out.data.iter_mut().zip(channel.data.iter()) {
            *dst += k as f32 * src;
        }
    }
    normalize(&out)
}

/// Build the full-resolution and matching-resolution search images.
pub fn preprocess(rgb: &ImageRgbU8<'_>, config: &SearchConfig) -> Result<Prepared, SearchError> {
    check_input(rgb)?;
    let (image, gray) = if config.use_color_differences {
        (
            color_differences(rgb, config.color_weights),
            Some(to_grayscale(rgb)),
        )
    } else {
        (to_grayscale(rgb), None)
    };
    let (scaled, scale_factor) = rescale_to_max_dim(&image, config.matching.max_dim);
    debug!(
        "preprocessed {}x{} image, matching at {}x{} (scale {scale_factor:.4})",
        image.w, image.h, scaled.w, scaled.h
    );
    Ok(Prepared {
        image,
        scaled,
        scale_factor,
        gray,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: usize, h: usize, rgb: [u8; 3]) -> Vec<u8> {
        rgb.iter().copied().cycle().take(3 * w * h).collect()
    }

    #[test]
    fn grayscale_uses_luma_weights() {
        let data = solid(2, 2, [255, 0, 0]);
        let g = to_grayscale(&ImageRgbU8::packed(2, 2, &data));
        assert!((g.get(1, 1) - 0.299).abs() < 1e-6);
        let white = solid(1, 1, [255, 255, 255]);
        assert!((to_grayscale(&ImageRgbU8::packed(1, 1, &white)).get(0, 0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normalize_stretches_and_keeps_flat() {
        let img = ImageF32::from_fn(3, 1, |x, _| 2.0 + x as f32);
        assert_eq!(normalize(&img).data, vec![0.0, 0.5, 1.0]);
        let flat = ImageF32::from_fn(3, 1, |_, _| 0.7);
        assert_eq!(normalize(&flat), flat);
    }

    #[test]
    fn color_differences_separate_hues_of_equal_brightness() {
        // Red and green pixels chosen with nearly equal luma.
        let mut data = solid(4, 1, [200, 102, 100]);
        data[9..12].copy_from_slice(&[100, 153, 100]);
        let rgb = ImageRgbU8::packed(4, 1, &data);
        let diff = color_differences(&rgb, [1.0, 1.0, 1.0]);
        assert!((diff.get(0, 0) - diff.get(3, 0)).abs() > 0.5);
        let gray = to_grayscale(&rgb);
        assert!((gray.get(0, 0) - gray.get(3, 0)).abs() < 0.05);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let cfg = SearchConfig::new(10.0);
        let empty: Vec<u8> = Vec::new();
        assert_eq!(
            preprocess(&ImageRgbU8::packed(0, 5, &empty), &cfg).unwrap_err(),
            SearchError::EmptyImage {
                width: 0,
                height: 5
            }
        );
        let short = vec![0u8; 10];
        assert_eq!(
            preprocess(&ImageRgbU8::packed(2, 2, &short), &cfg).unwrap_err(),
            SearchError::BufferSize {
                expected: 12,
                actual: 10
            }
        );
    }

    #[test]
    fn large_images_are_downscaled_for_matching() {
        let data = solid(200, 100, [10, 20, 30]);
        let mut cfg = SearchConfig::new(10.0);
        cfg.matching.max_dim = 50;
        let prepared = preprocess(&ImageRgbU8::packed(200, 100, &data), &cfg).unwrap();
        assert_eq!((prepared.image.w, prepared.image.h), (200, 100));
        assert_eq!((prepared.scaled.w, prepared.scaled.h), (50, 25));
        assert!((prepared.scale_factor - 0.25).abs() < 1e-12);
        assert!(prepared.gray.is_none());
    }
}
