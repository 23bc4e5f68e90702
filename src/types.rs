//! Core value types: raster points and closed contours.
//!
//! Coordinates follow the raster convention used throughout the crate: `x` is
//! the column and `y` the row. Both types are plain values; every transform
//! returns a new instance.
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A coordinate pair in raster space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (other.vector() - self.vector()).norm()
    }

    /// Midpoint of the segment `self`–`other`.
    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::from((self.vector() + other.vector()) * 0.5)
    }

    #[inline]
    pub fn translate(&self, by: Point) -> Point {
        *self + by
    }

    /// Component-wise scale, optionally rounding to the nearest pixel.
    pub fn scale(&self, sx: f64, sy: f64, round: bool) -> Point {
        let p = Point::new(self.x * sx, self.y * sy);
        if round {
            p.rounded()
        } else {
            p
        }
    }

    #[inline]
    pub fn rounded(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    #[inline]
    pub fn vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Ordered, implicitly closed polygon.
///
/// The last point connects back to the first; no closing duplicate is stored.
/// An empty contour is valid and yields all-zero descriptors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate `(previous, current)` pairs, starting with `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        let prev = self.points.last().into_iter().chain(self.points.iter());
        prev.zip(self.points.iter())
    }

    pub fn translated(&self, by: Point) -> Contour {
        Contour::new(self.points.iter().map(|p| p.translate(by)).collect())
    }

    pub fn scaled(&self, k: f64, round: bool) -> Contour {
        Contour::new(self.points.iter().map(|p| p.scale(k, k, round)).collect())
    }

    /// Copy of the contour with the given indices removed.
    ///
    /// Indices may be unsorted or repeated; out-of-range indices are ignored.
    pub fn without(&self, indices: &[usize]) -> Contour {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let mut points = self.points.clone();
        for &idx in sorted.iter().rev() {
            if idx < points.len() {
                points.remove(idx);
            }
        }
        Contour::new(points)
    }

    /// Same polygon starting at a different index.
    pub fn rotated(&self, start: usize) -> Contour {
        if self.points.is_empty() {
            return self.clone();
        }
        let mut points = self.points.clone();
        points.rotate_left(start % self.points.len());
        Contour::new(points)
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl From<Vec<Point>> for Contour {
    fn from(points: Vec<Point>) -> Self {
        Contour::new(points)
    }
}

impl FromIterator<Point> for Contour {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Contour::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Contour {
        Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ])
    }

    #[test]
    fn edges_wrap_from_last_to_first() {
        let c = square();
        let edges: Vec<_> = c.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(*edges[0].0, Point::new(0.0, 2.0));
        assert_eq!(*edges[0].1, Point::new(0.0, 0.0));
    }

    #[test]
    fn without_removes_highest_index_first() {
        let c = square().without(&[3, 1, 3]);
        assert_eq!(c.points(), &[Point::new(0.0, 0.0), Point::new(2.0, 2.0)]);
        assert_eq!(square().len(), 4, "source contour untouched");
    }

    #[test]
    fn scale_rounds_on_request() {
        let p = Point::new(1.26, 2.74);
        assert_eq!(p.scale(2.0, 2.0, true), Point::new(3.0, 5.0));
        assert!((p.scale(2.0, 2.0, false).x - 2.52).abs() < 1e-12);
    }

    #[test]
    fn rotation_keeps_cyclic_order() {
        let c = square().rotated(1);
        assert_eq!(c.points()[0], Point::new(2.0, 0.0));
        assert_eq!(c.points()[3], Point::new(0.0, 0.0));
    }
}
