//! Map-plane point type.
//!
//! Map coordinates are meters on the floor plan. The positioning solver and
//! the route planner both work in this frame.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or displacement) on the 2D floor map, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl Point2D {
    /// Origin.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Vector from `from` to this point.
    #[inline]
    pub fn vector_from(&self, from: &Point2D) -> Point2D {
        *self - *from
    }

    /// Vector from this point to `to`.
    #[inline]
    pub fn vector_to(&self, to: &Point2D) -> Point2D {
        *to - *self
    }

    /// Z component of the 3D cross product `self × other`.
    ///
    /// Negative when `other` is clockwise from `self` in a Y-up frame.
    #[inline]
    pub fn cross(&self, other: &Point2D) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Point2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// True when both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}

impl From<(f32, f32)> for Point2D {
    fn from((x, y): (f32, f32)) -> Self {
        Point2D::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-6);
        assert_relative_eq!(a.distance_squared(&b), 25.0, epsilon = 1e-6);
    }

    #[test]
    fn test_vectors() {
        let a = Point2D::new(1.0, 1.0);
        let b = Point2D::new(4.0, 5.0);
        assert_eq!(b.vector_from(&a), Point2D::new(3.0, 4.0));
        assert_eq!(a.vector_to(&b), Point2D::new(3.0, 4.0));
    }

    #[test]
    fn test_cross_sign() {
        let east = Point2D::new(1.0, 0.0);
        let north = Point2D::new(0.0, 1.0);
        assert!(east.cross(&north) > 0.0);
        assert!(north.cross(&east) < 0.0);
        assert_eq!(east.cross(&east), 0.0);
    }

    #[test]
    fn test_ops() {
        let p = Point2D::new(1.0, 2.0) + Point2D::new(0.5, 0.5);
        assert_eq!(p, Point2D::new(1.5, 2.5));
        assert_eq!(p * 2.0, Point2D::new(3.0, 5.0));
        assert_eq!(Point2D::from((1.0, 2.0)), Point2D::new(1.0, 2.0));
    }
}
