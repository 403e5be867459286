//! Mathematical utilities for angles and polylines.
//!
//! All angles are in radians.

use std::f32::consts::PI;

use super::Point2D;

/// Heading of the planar direction `(x, z)`, measured from +X towards +Z.
///
/// Quadrant handling is done explicitly rather than through `atan2`:
/// - `x == 0`: `π/2` when `z > 0`, otherwise `3π/2`
/// - `x != 0`: `atan(z / x)`, plus `π` when `x < 0`
///
/// The result lies in `(-π/2, 3π/2]`. The `x == 0` branch is a hard
/// discontinuity and is kept exactly as written.
///
/// # Example
/// ```
/// use disha_core::core::math::planar_heading;
/// use std::f32::consts::{FRAC_PI_2, PI};
///
/// assert_eq!(planar_heading(1.0, 0.0), 0.0);
/// assert_eq!(planar_heading(0.0, 1.0), FRAC_PI_2);
/// assert_eq!(planar_heading(0.0, -1.0), 3.0 * FRAC_PI_2);
/// assert!((planar_heading(-1.0, 0.0) - PI).abs() < 1e-6);
/// ```
#[inline]
pub fn planar_heading(x: f32, z: f32) -> f32 {
    if x == 0.0 {
        if z > 0.0 {
            PI / 2.0
        } else {
            3.0 * PI / 2.0
        }
    } else {
        let theta = (z / x).atan();
        if x < 0.0 {
            theta + PI
        } else {
            theta
        }
    }
}

/// Total length of the polyline through `points`.
///
/// # Example
/// ```
/// use disha_core::core::{Point2D, math::polyline_length};
///
/// let pts = [Point2D::new(0.0, 0.0), Point2D::new(3.0, 0.0), Point2D::new(3.0, 4.0)];
/// assert_eq!(polyline_length(&pts), 7.0);
/// ```
#[inline]
pub fn polyline_length(points: &[Point2D]) -> f32 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Square of a value. Useful for avoiding `pow(x, 2)`.
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_planar_heading_axes() {
        assert_eq!(planar_heading(1.0, 0.0), 0.0);
        assert_eq!(planar_heading(0.0, 2.0), FRAC_PI_2);
        assert_eq!(planar_heading(0.0, -2.0), 3.0 * FRAC_PI_2);
        assert_relative_eq!(planar_heading(-1.0, 0.0), PI, epsilon = 1e-6);
    }

    #[test]
    fn test_planar_heading_zero_vector_takes_lower_branch() {
        // z == 0 is not > 0
        assert_eq!(planar_heading(0.0, 0.0), 3.0 * FRAC_PI_2);
        assert_eq!(planar_heading(-0.0, 0.0), 3.0 * FRAC_PI_2);
    }

    #[test]
    fn test_planar_heading_quadrants() {
        assert_relative_eq!(planar_heading(1.0, 1.0), PI / 4.0, epsilon = 1e-6);
        assert_relative_eq!(planar_heading(-1.0, 1.0), 3.0 * PI / 4.0, epsilon = 1e-6);
        assert_relative_eq!(planar_heading(-1.0, -1.0), 5.0 * PI / 4.0, epsilon = 1e-6);
        assert_relative_eq!(planar_heading(1.0, -1.0), -PI / 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_polyline_length() {
        assert_eq!(polyline_length(&[]), 0.0);
        assert_eq!(polyline_length(&[Point2D::new(1.0, 1.0)]), 0.0);
        let pts = [
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 2.0),
            Point2D::new(2.0, 2.0),
        ];
        assert_relative_eq!(polyline_length(&pts), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sq() {
        assert_eq!(sq(3.0), 9.0);
        assert_eq!(sq(-2.0), 4.0);
    }
}
