//! Routes between two map points.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::core::math::polyline_length;
use crate::error::ConfigError;

/// A planned route as an ordered list of waypoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Waypoints from source to destination.
    pub points: Vec<Point2D>,
    /// Total polyline length.
    pub length: f32,
}

impl Path {
    pub fn new(points: Vec<Point2D>) -> Self {
        let length = polyline_length(&points);
        Self { points, length }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A path with no turns.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.points.len() <= 2
    }

    pub fn source(&self) -> Option<Point2D> {
        self.points.first().copied()
    }

    pub fn destination(&self) -> Option<Point2D> {
        self.points.last().copied()
    }
}

/// Something that can produce a route between two points.
pub trait RouteProvider {
    fn route(&self, source: Point2D, destination: Point2D) -> Path;
}

/// A route that ignores the endpoints and always follows fixed waypoints.
///
/// Used for surveyed floor plans where the walkable route was drawn by hand.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRoute {
    path: Path,
}

impl FixedRoute {
    pub fn new(points: Vec<Point2D>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::FixedRouteTooShort(points.len()));
        }
        Ok(Self {
            path: Path::new(points),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteProvider for FixedRoute {
    fn route(&self, _source: Point2D, _destination: Point2D) -> Path {
        self.path.clone()
    }
}

/// A named place users can navigate to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl Destination {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_length() {
        let path = Path::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 3.0),
            Point2D::new(4.0, 3.0),
        ]);
        assert_eq!(path.length, 7.0);
        assert!(!path.is_direct());
        assert_eq!(path.destination(), Some(Point2D::new(4.0, 3.0)));
    }

    #[test]
    fn test_fixed_route_ignores_endpoints() {
        let route = FixedRoute::new(vec![Point2D::new(1.0, 1.0), Point2D::new(1.0, 5.0)]).unwrap();
        let path = route.route(Point2D::new(9.0, 9.0), Point2D::new(-3.0, 0.0));
        assert_eq!(path.points, vec![Point2D::new(1.0, 1.0), Point2D::new(1.0, 5.0)]);
        assert_eq!(path.length, 4.0);
    }

    #[test]
    fn test_fixed_route_needs_two_points() {
        assert_eq!(
            FixedRoute::new(vec![Point2D::new(1.0, 1.0)]),
            Err(ConfigError::FixedRouteTooShort(1))
        );
    }
}
