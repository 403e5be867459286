//! Positioning inputs and outputs.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Length unit used by a ranging stack or an anchor layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Millimeters,
    Meters,
}

impl DistanceUnit {
    /// Meters per unit.
    #[inline]
    pub fn scale(&self) -> f64 {
        match self {
            DistanceUnit::Millimeters => 1e-3,
            DistanceUnit::Meters => 1.0,
        }
    }

    #[inline]
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.scale()
    }

    #[inline]
    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.scale()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Millimeters => "mm",
            DistanceUnit::Meters => "m",
        }
    }
}

/// One anchor's known position and measured distance for a ranging round.
///
/// Position is in the configured coordinate unit, distance in the
/// configured distance unit.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorObservation {
    pub anchor_id: String,
    pub position: Point2D,
    pub measured_distance: f32,
}

impl AnchorObservation {
    pub fn new(anchor_id: impl Into<String>, position: Point2D, measured_distance: f32) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            position,
            measured_distance,
        }
    }
}

/// Confidence of a solved location.
#[derive(Clone, Debug, PartialEq)]
pub enum Uncertainty {
    /// Standard deviation per axis (meters) and the 2x2 covariance (m²).
    Available {
        std_dev: Vector2<f64>,
        covariance: Matrix2<f64>,
    },
    /// Geometry too degenerate to estimate confidence.
    Unavailable { reason: String },
}

impl Uncertainty {
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Uncertainty::Available { .. })
    }

    /// Per-axis standard deviation, if available.
    pub fn std_dev(&self) -> Option<Vector2<f64>> {
        match self {
            Uncertainty::Available { std_dev, .. } => Some(*std_dev),
            Uncertainty::Unavailable { .. } => None,
        }
    }
}

/// Result of one multilateration round, in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct SolvedLocation {
    pub position: Point2D,
    /// Number of anchors used.
    pub anchor_count: usize,
    pub iterations: usize,
    pub converged: bool,
    /// RMS of range residuals at the solution (meters).
    pub rms_residual: f32,
    pub uncertainty: Uncertainty,
}

impl SolvedLocation {
    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert_eq!(DistanceUnit::Millimeters.to_meters(2500.0), 2.5);
        assert_eq!(DistanceUnit::Meters.to_meters(2.5), 2.5);
        assert_eq!(DistanceUnit::Millimeters.from_meters(1.5), 1500.0);
    }

    #[test]
    fn test_uncertainty_accessors() {
        let unavailable = Uncertainty::Unavailable {
            reason: "collinear".into(),
        };
        assert!(!unavailable.is_available());
        assert_eq!(unavailable.std_dev(), None);

        let available = Uncertainty::Available {
            std_dev: Vector2::new(0.1, 0.2),
            covariance: Matrix2::new(0.01, 0.0, 0.0, 0.04),
        };
        assert!(available.is_available());
        assert_eq!(available.std_dev(), Some(Vector2::new(0.1, 0.2)));
    }
}
