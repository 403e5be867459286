//! Corridor orientation from floor and camera poses.
//!
//! Frame conventions:
//!
//! ```text
//!   Floor pose                Camera pose              Corridor pose
//!   Y = floor normal          Z = camera forward       Y = floor normal
//!   X, Z span the plane       X, Y in screen plane     -X = away from camera
//!                                                      Z = camera's left
//! ```
//!
//! The corridor pose keeps the floor's rotation, spun about the floor normal
//! so that surfaces placed at fixed local offsets always face the user, and
//! is positioned at the camera.

use nalgebra::{Point3, RowVector4, Vector3};

use crate::core::RigidPose;
use crate::core::math::planar_heading;

/// Heading of the camera's forward axis within the floor plane.
///
/// Both poses are stripped of translation and the camera forward vector is
/// carried into the floor frame as a row vector:
/// `b = (0, 0, 1, 1) · camera⁻¹ · floor`. The heading is taken from the
/// `(x, z)` components of `b` by [`planar_heading`].
pub fn corridor_heading(floor: &RigidPose, camera: &RigidPose) -> f32 {
    let floor_rotation = floor.without_translation();
    let camera_rotation = camera.without_translation();

    let forward = RowVector4::new(0.0, 0.0, 1.0, 1.0);
    let b = forward * camera_rotation.inverse().matrix() * floor_rotation.matrix();

    planar_heading(b[0], b[2])
}

/// Corridor anchor transform for the current frame.
///
/// Rotation is the floor's rotation turned by `-heading` about the floor's
/// own Y axis; translation is the camera's current position.
pub fn corridor_orientation(floor: &RigidPose, camera: &RigidPose) -> RigidPose {
    let theta = corridor_heading(floor, camera);
    floor
        .with_translation(camera.translation())
        .rotated_about_local(&Vector3::y_axis(), -theta)
}

/// Height of the camera above the floor plane.
///
/// The camera position is expressed in the floor's local frame and its Y
/// component returned. Orientation of the camera does not matter.
pub fn camera_floor_distance(floor: &RigidPose, camera: &RigidPose) -> f32 {
    let camera_position: Point3<f32> = camera.position();
    floor.inverse().transform_point(&camera_position).y
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{UnitQuaternion, Vector3};
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Camera looking along world `direction` (horizontal), placed at `position`.
    fn camera_facing(direction: Vector3<f32>, position: Vector3<f32>) -> RigidPose {
        // Rotation taking +Z onto `direction` about the world Y axis
        let yaw = direction.x.atan2(direction.z);
        RigidPose::from_parts(
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw),
            position,
        )
    }

    #[test]
    fn test_heading_zero_when_forward_along_floor_x() {
        let floor = RigidPose::identity();
        let camera = camera_facing(Vector3::x(), Vector3::new(0.0, 1.5, 0.0));
        assert_relative_eq!(corridor_heading(&floor, &camera), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_follows_camera_yaw() {
        let floor = RigidPose::identity();

        let camera = camera_facing(Vector3::z(), Vector3::zeros());
        assert_relative_eq!(corridor_heading(&floor, &camera), FRAC_PI_2, epsilon = 1e-6);

        let camera = camera_facing(-Vector3::x(), Vector3::zeros());
        assert_relative_eq!(corridor_heading(&floor, &camera), PI, epsilon = 1e-6);
    }

    #[test]
    fn test_heading_exact_zero_x_branch() {
        // Identity camera: forward is exactly +Z, x component exactly 0
        let floor = RigidPose::identity();
        let camera = RigidPose::identity();
        assert_eq!(corridor_heading(&floor, &camera), FRAC_PI_2);
    }

    #[test]
    fn test_orientation_translation_comes_from_camera() {
        let floor = RigidPose::from_parts(UnitQuaternion::identity(), Vector3::new(5.0, 0.0, 5.0));
        let camera = camera_facing(Vector3::x(), Vector3::new(1.0, 1.4, 2.0));
        let anchor = corridor_orientation(&floor, &camera);
        assert_eq!(anchor.translation(), Vector3::new(1.0, 1.4, 2.0));
    }

    #[test]
    fn test_orientation_minus_x_points_away_from_camera() {
        let floor = RigidPose::identity();
        for direction in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(-0.6, 0.0, 0.8),
        ] {
            let camera = camera_facing(direction, Vector3::zeros());
            let anchor = corridor_orientation(&floor, &camera);
            // AR cameras look down their own -Z axis
            let looking = -camera.axis_z();
            let outward = -anchor.axis_x();
            assert_relative_eq!(outward, looking, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_orientation_preserves_floor_normal() {
        let floor = RigidPose::from_parts(
            UnitQuaternion::from_euler_angles(0.05, 0.8, -0.03),
            Vector3::new(0.0, -1.2, 0.0),
        );
        for yaw in [0.0_f32, 0.4, 1.9, -2.7] {
            let camera = RigidPose::from_parts(
                UnitQuaternion::from_euler_angles(0.3, yaw, 0.1),
                Vector3::new(0.2, 0.3, -0.4),
            );
            let anchor = corridor_orientation(&floor, &camera);
            assert_relative_eq!(anchor.axis_y(), floor.axis_y(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_camera_floor_distance() {
        let floor = RigidPose::from_parts(UnitQuaternion::identity(), Vector3::new(0.0, -1.0, 0.0));
        let camera = camera_facing(Vector3::x(), Vector3::new(3.0, 0.5, -2.0));
        assert_relative_eq!(camera_floor_distance(&floor, &camera), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_camera_floor_distance_ignores_camera_rotation() {
        let floor = RigidPose::from_parts(
            UnitQuaternion::from_euler_angles(0.02, 0.7, 0.0),
            Vector3::new(0.3, -1.1, 0.2),
        );
        let position = Vector3::new(1.0, 0.4, -0.5);
        let reference = camera_floor_distance(
            &floor,
            &RigidPose::from_parts(UnitQuaternion::identity(), position),
        );
        for (roll, pitch, yaw) in [(0.5, 0.0, 0.0), (0.0, 1.2, 0.0), (0.3, -0.7, 2.5)] {
            let camera = RigidPose::from_parts(
                UnitQuaternion::from_euler_angles(roll, pitch, yaw),
                position,
            );
            assert_relative_eq!(
                camera_floor_distance(&floor, &camera),
                reference,
                epsilon = 1e-5
            );
        }
    }
}
