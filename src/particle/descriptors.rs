//! Geometric and statistical measures of a closed contour.
//!
//! Every function is total: an empty contour, or one whose perimeter is zero,
//! yields 0 (or the origin for [`center`]). The centre is the centroid of the
//! boundary curve, not of the enclosed area, and is the reference point for
//! all radial statistics.
use crate::types::{Contour, Point};
use serde::Serialize;
use std::f64::consts::PI;

/// Sum of edge lengths, closing the polygon from the last point to the first.
pub fn perimeter(contour: &Contour) -> f64 {
    contour.edges().map(|(a, b)| a.distance(b)).sum()
}

/// Edge-length weighted mean of edge midpoints.
pub fn center(contour: &Contour) -> Point {
    let mut moment = Point::ORIGIN;
    let mut length = 0.0;
    for (a, b) in contour.edges() {
        let l = a.distance(b);
        moment = moment + a.midpoint(b) * l;
        length += l;
    }
    if length == 0.0 {
        return Point::ORIGIN;
    }
    Point::new(moment.x / length, moment.y / length)
}

fn area_about(contour: &Contour, c: Point) -> f64 {
    contour
        .edges()
        .map(|(a, b)| {
            let u = a.vector() - c.vector();
            let v = b.vector() - c.vector();
            (u.x * v.y - u.y * v.x).abs() / 2.0
        })
        .sum()
}

/// Fan-triangulated area anchored at [`center`].
pub fn area(contour: &Contour) -> f64 {
    area_about(contour, center(contour))
}

fn radius_from(area: f64, perimeter: f64, n: usize) -> f64 {
    if n == 0 || perimeter == 0.0 {
        return 0.0;
    }
    2.0 * area / perimeter / (PI / n as f64).cos()
}

/// `2·area / perimeter`, corrected from apothem to circumradius by
/// `1 / cos(π/N)`.
pub fn radius(contour: &Contour) -> f64 {
    radius_from(area(contour), perimeter(contour), contour.len())
}

fn circularity_from(area: f64, perimeter: f64) -> f64 {
    if perimeter == 0.0 {
        return 0.0;
    }
    4.0 * PI * area / (perimeter * perimeter)
}

/// Isoperimetric ratio `4π·area / perimeter²`.
pub fn circularity(contour: &Contour) -> f64 {
    circularity_from(area(contour), perimeter(contour))
}

fn radial_distances(contour: &Contour, c: Point) -> Vec<f64> {
    contour.points().iter().map(|p| p.distance(&c)).collect()
}

/// Distances from every point to the contour's centre, in contour order.
pub fn radii(contour: &Contour) -> Vec<f64> {
    radial_distances(contour, center(contour))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}

/// Cyclic successive differences `r_i − r_{i−1}`, with `r_{−1} = r_{N−1}`.
pub(crate) fn radial_steps(radii: &[f64]) -> Vec<f64> {
    let Some(&last) = radii.last() else {
        return Vec::new();
    };
    let mut prev = last;
    radii
        .iter()
        .map(|&r| {
            let d = r - prev;
            prev = r;
            d
        })
        .collect()
}

/// Mean distance to the centre.
pub fn radial_mean(contour: &Contour) -> f64 {
    mean(&radii(contour))
}

/// Population variance of the distance to the centre.
pub fn radial_variance(contour: &Contour) -> f64 {
    variance(&radii(contour))
}

pub fn radial_sd(contour: &Contour) -> f64 {
    radial_variance(contour).sqrt()
}

/// Mean squared step between neighbouring radial distances.
///
/// Cyclic steps always sum to zero, so this equals their variance.
pub fn radial_difference_variance(contour: &Contour) -> f64 {
    let steps = radial_steps(&radii(contour));
    mean(&steps.iter().map(|d| d * d).collect::<Vec<_>>())
}

pub fn radial_difference_sd(contour: &Contour) -> f64 {
    radial_difference_variance(contour).sqrt()
}

/// All descriptors of one contour, computed in a single pass over the
/// shared intermediates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptors {
    pub center: Point,
    pub perimeter: f64,
    pub area: f64,
    pub radius: f64,
    pub circularity: f64,
    pub radial_mean: f64,
    pub radial_sd: f64,
    pub radial_difference_sd: f64,
}

impl Descriptors {
    pub fn of(contour: &Contour) -> Self {
        if contour.is_empty() {
            return Self::default();
        }
        let c = center(contour);
        let p = perimeter(contour);
        let a = area_about(contour, c);
        let r = radial_distances(contour, c);
        let steps = radial_steps(&r);
        Self {
            center: c,
            perimeter: p,
            area: a,
            radius: radius_from(a, p, contour.len()),
            circularity: circularity_from(a, p),
            radial_mean: mean(&r),
            radial_sd: variance(&r).sqrt(),
            radial_difference_sd: mean(&steps.iter().map(|d| d * d).collect::<Vec<_>>()).sqrt(),
        }
    }
}
