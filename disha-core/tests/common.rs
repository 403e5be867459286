//! Test utilities for Disha integration tests.
//!
//! Builders for camera poses, anchor layouts and walks along a path.

#![allow(dead_code)]

use disha_core::config::DishaConfig;
use disha_core::positioning::{AnchorObservation, AnchorSpec, DistanceUnit};
use disha_core::{Point2D, RigidPose};
use nalgebra::{UnitQuaternion, Vector3};

/// Camera at `height` above the origin, yawed by `yaw` about world Y.
///
/// At zero yaw the camera looks down world -Z.
pub fn camera(height: f32, yaw: f32) -> RigidPose {
    RigidPose::from_parts(
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw),
        Vector3::new(0.0, height, 0.0),
    )
}

/// Camera at an arbitrary world position.
pub fn camera_at(x: f32, height: f32, z: f32, yaw: f32) -> RigidPose {
    RigidPose::from_parts(
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw),
        Vector3::new(x, height, z),
    )
}

/// Anchors at the corners of the 36 x 33 m demo hall.
pub fn hall_anchors() -> Vec<AnchorSpec> {
    vec![
        AnchorSpec::new("north-west", 0.0, 0.0),
        AnchorSpec::new("north-east", 36.0, 0.0),
        AnchorSpec::new("south-west", 0.0, 33.0),
        AnchorSpec::new("south-east", 36.0, 33.0),
    ]
}

/// Exact observations of `position` from `anchors`, with distances in `unit`.
pub fn observations(
    anchors: &[AnchorSpec],
    position: Point2D,
    unit: DistanceUnit,
) -> Vec<AnchorObservation> {
    anchors
        .iter()
        .map(|a| {
            let meters = a.position().distance(&position);
            let distance = unit.from_meters(meters as f64) as f32;
            AnchorObservation::new(a.name.clone(), a.position(), distance)
        })
        .collect()
}

/// Default config with the demo hall anchors and distances in meters.
pub fn hall_config() -> DishaConfig {
    let mut config = DishaConfig::default();
    config.positioning.distance_unit = DistanceUnit::Meters;
    config.positioning.anchors = hall_anchors();
    config
}

/// Points every `step` meters along the polyline through `points`.
pub fn walk(points: &[Point2D], step: f32) -> Vec<Point2D> {
    let mut samples = Vec::new();
    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        let length = a.distance(&b);
        let n = (length / step).ceil().max(1.0) as usize;
        for i in 0..n {
            let t = i as f32 / n as f32;
            samples.push(Point2D::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
    }
    if let Some(last) = points.last() {
        samples.push(*last);
    }
    samples
}
