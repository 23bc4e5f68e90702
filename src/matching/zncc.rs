//! Zero-mean normalised cross-correlation (ZNCC) similarity maps.
//!
//! Window sums come from integral images, the correlation term is evaluated
//! directly against the zero-mean template. Windows with (numerically) zero
//! variance score 0 so that flat regions never produce candidates.
use crate::image::{ImageF32, ImageView, ImageViewMut};

const VAR_EPS: f64 = 1e-10;

/// Zero-mean template with its energy.
struct CenteredTemplate {
    w: usize,
    h: usize,
    values: Vec<f64>,
    energy: f64,
}

impl CenteredTemplate {
    fn new(tpl: &ImageF32) -> Self {
        let n = (tpl.w * tpl.h) as f64;
        let mean = tpl.rows().flatten().map(|&v| v as f64).sum::<f64>() / n.max(1.0);
        let values: Vec<f64> = tpl.rows().flatten().map(|&v| v as f64 - mean).collect();
        let energy = values.iter().map(|v| v * v).sum();
        Self {
            w: tpl.w,
            h: tpl.h,
            values,
            energy,
        }
    }
}

/// Summed-area tables of values and squared values, `(w + 1) × (h + 1)`.
struct Integrals {
    stride: usize,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl Integrals {
    fn new(img: &ImageF32) -> Self {
        let stride = img.w + 1;
        let mut sum = vec![0.0; stride * (img.h + 1)];
        let mut sum_sq = vec![0.0; stride * (img.h + 1)];
        for y in 0..img.h {
            let mut row_sum = 0.0;
            let mut row_sq = 0.0;
            for (x, &v) in img.row(y).iter().enumerate() {
                let v = v as f64;
                row_sum += v;
                row_sq += v * v;
                let i = (y + 1) * stride + x + 1;
                sum[i] = sum[i - stride] + row_sum;
                sum_sq[i] = sum_sq[i - stride] + row_sq;
            }
        }
        Self {
            stride,
            sum,
            sum_sq,
        }
    }

    #[inline]
    fn window(&self, table: &[f64], x: usize, y: usize, w: usize, h: usize) -> f64 {
        let s = self.stride;
        table[(y + h) * s + x + w] - table[y * s + x + w] - table[(y + h) * s + x]
            + table[y * s + x]
    }
}

fn score_at(img: &ImageF32, tpl: &CenteredTemplate, ints: &Integrals, x: usize, y: usize) -> f32 {
    let n = (tpl.w * tpl.h) as f64;
    let s = ints.window(&ints.sum, x, y, tpl.w, tpl.h);
    let s2 = ints.window(&ints.sum_sq, x, y, tpl.w, tpl.h);
    let var = s2 - s * s / n;
    if var <= VAR_EPS || tpl.energy <= VAR_EPS {
        return 0.0;
    }
    let mut num = 0.0;
    for ty in 0..tpl.h {
        let src = &img.row(y + ty)[x..x + tpl.w];
        let t = &tpl.values[ty * tpl.w..(ty + 1) * tpl.w];
        num += src
            .iter()
            .zip(t)
            .map(|(&a, &b)| a as f64 * b)
            .sum::<f64>();
    }
    (num / (var * tpl.energy).sqrt()) as f32
}

fn score_row(img: &ImageF32, tpl: &CenteredTemplate, ints: &Integrals, y: usize) -> Vec<f32> {
    (0..=img.w - tpl.w)
        .map(|x| score_at(img, tpl, ints, x, y))
        .collect()
}

/// ZNCC of `template` against every placement inside `image`.
///
/// The result has the size of `image`; the score of the placement with
/// top-left corner `(x, y)` is stored at `(x + tw / 2, y + th / 2)` and the
/// uncovered border is zero.
pub fn zncc_map(image: &ImageF32, template: &ImageF32) -> ImageF32 {
    let mut out = ImageF32::new(image.w, image.h);
    if template.is_empty() || template.w > image.w || template.h > image.h {
        return out;
    }
    let tpl = CenteredTemplate::new(template);
    let ints = Integrals::new(image);
    let rows = score_rows(image, &tpl, &ints);

    let ox = template.w / 2;
    let oy = template.h / 2;
    for (y, scores) in rows.into_iter().enumerate() {
        out.row_mut(y + oy)[ox..ox + scores.len()].copy_from_slice(&scores);
    }
    out
}

#[cfg(not(feature = "parallel"))]
fn score_rows(image: &ImageF32, tpl: &CenteredTemplate, ints: &Integrals) -> Vec<Vec<f32>> {
    (0..=image.h - tpl.h)
        .map(|y| score_row(image, tpl, ints, y))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_rows(image: &ImageF32, tpl: &CenteredTemplate, ints: &Integrals) -> Vec<Vec<f32>> {
    use rayon::prelude::*;

    (0..=image.h - tpl.h)
        .into_par_iter()
        .map(|y| score_row(image, tpl, ints, y))
        .collect()
}

/// ZNCC of `b` placed at the top-left corner of `a`; 0 if it does not fit.
pub fn zncc_score(a: &ImageF32, b: &ImageF32) -> f32 {
    if b.is_empty() || b.w > a.w || b.h > a.h {
        return 0.0;
    }
    let tpl = CenteredTemplate::new(b);
    let ints = Integrals::new(a);
    score_at(a, &tpl, &ints, 0, 0)
}
