//! 4x4 rigid transforms for floor and camera poses.
//!
//! Coordinate frame follows the AR tracking convention:
//! - Right-handed, meters, Y-up in world space
//! - Floor poses: Y axis is the floor normal, X/Z span the plane
//! - Camera poses: Z axis is camera forward, X/Y lie in the screen plane

use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Unit, UnitQuaternion, Vector3};

use crate::error::PoseError;

/// Tolerance used when validating that a matrix is a rigid transform.
const RIGID_TOLERANCE: f32 = 1e-3;

/// A rigid 4x4 homogeneous transform (rotation + translation).
///
/// The rotation block is orthonormal with determinant +1. Construction from
/// an arbitrary matrix goes through [`RigidPose::from_matrix`], which checks
/// this.
///
/// # Composition
///
/// Poses compose with `*` like the underlying matrices:
/// ```
/// use disha_core::core::RigidPose;
/// use nalgebra::{UnitQuaternion, Vector3};
///
/// let parent = RigidPose::from_parts(UnitQuaternion::identity(), Vector3::new(1.0, 0.0, 0.0));
/// let child = RigidPose::from_parts(UnitQuaternion::identity(), Vector3::new(0.0, 2.0, 0.0));
/// let world = parent * child;
/// assert_eq!(world.translation(), Vector3::new(1.0, 2.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidPose {
    matrix: Matrix4<f32>,
}

impl RigidPose {
    /// Identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Build from a rotation and a translation.
    #[inline]
    pub fn from_parts(rotation: UnitQuaternion<f32>, translation: Vector3<f32>) -> Self {
        let mut matrix = rotation.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Build from a 4x4 matrix, checking that it is a rigid transform.
    pub fn from_matrix(matrix: Matrix4<f32>) -> Result<Self, PoseError> {
        if !matrix.iter().all(|v| v.is_finite()) {
            return Err(PoseError::NonFinite);
        }

        let bottom = matrix.fixed_view::<1, 4>(3, 0);
        let expected = [0.0, 0.0, 0.0, 1.0];
        if bottom
            .iter()
            .zip(expected.iter())
            .any(|(a, b)| (a - b).abs() > RIGID_TOLERANCE)
        {
            return Err(PoseError::NotHomogeneous);
        }

        let rotation: Matrix3<f32> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let orthogonality = (rotation.transpose() * rotation - Matrix3::identity()).abs().max();
        if orthogonality > RIGID_TOLERANCE {
            return Err(PoseError::NotOrthonormal {
                deviation: orthogonality,
            });
        }

        let determinant = rotation.determinant();
        if (determinant - 1.0).abs() > RIGID_TOLERANCE {
            return Err(PoseError::NotProperRotation { determinant });
        }

        Ok(Self { matrix })
    }

    /// Build from column-major data, the layout AR frameworks hand out.
    pub fn from_columns(columns: [[f32; 4]; 4]) -> Result<Self, PoseError> {
        let matrix = Matrix4::from_fn(|row, col| columns[col][row]);
        Self::from_matrix(matrix)
    }

    /// The underlying homogeneous matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Rotation block.
    #[inline]
    pub fn rotation(&self) -> Rotation3<f32> {
        Rotation3::from_matrix_unchecked(self.matrix.fixed_view::<3, 3>(0, 0).into_owned())
    }

    /// Translation column.
    #[inline]
    pub fn translation(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Translation as a point in the parent frame.
    #[inline]
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.translation())
    }

    /// Local X axis expressed in the parent frame.
    #[inline]
    pub fn axis_x(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 0).into_owned()
    }

    /// Local Y axis expressed in the parent frame.
    #[inline]
    pub fn axis_y(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 1).into_owned()
    }

    /// Local Z axis expressed in the parent frame.
    #[inline]
    pub fn axis_z(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 2).into_owned()
    }

    /// Same rotation, new translation.
    #[inline]
    pub fn with_translation(&self, translation: Vector3<f32>) -> Self {
        let mut matrix = self.matrix;
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Same rotation, translation zeroed.
    #[inline]
    pub fn without_translation(&self) -> Self {
        self.with_translation(Vector3::zeros())
    }

    /// Rotate about one of this pose's own axes, keeping the translation.
    ///
    /// Equivalent to post-multiplying the rotation block.
    #[inline]
    pub fn rotated_about_local(&self, axis: &Unit<Vector3<f32>>, angle: f32) -> Self {
        let local = Rotation3::from_axis_angle(axis, angle);
        let rotation = self.rotation() * local;
        let mut matrix = rotation.to_homogeneous();
        matrix
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&self.translation());
        Self { matrix }
    }

    /// Rigid inverse (`Rᵀ`, `-Rᵀ·t`).
    #[inline]
    pub fn inverse(&self) -> Self {
        let rotation_t = self.rotation().transpose();
        let translation = -(rotation_t * self.translation());
        let mut matrix = rotation_t.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Chain transforms: apply `other` in this pose's frame.
    #[inline]
    pub fn compose(&self, other: &RigidPose) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point from this pose's local frame to the parent frame.
    #[inline]
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let h = self.matrix * point.to_homogeneous();
        Point3::new(h.x, h.y, h.z)
    }

    /// Rotate a direction into the parent frame; translation is ignored.
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Check approximate equality of every matrix element.
    pub fn approx_eq(&self, other: &RigidPose, epsilon: f32) -> bool {
        (self.matrix - other.matrix).abs().max() <= epsilon
    }
}

impl Default for RigidPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for RigidPose {
    type Output = Self;

    /// Compose two poses (same as `compose`).
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn yaw(angle: f32, translation: Vector3<f32>) -> RigidPose {
        RigidPose::from_parts(
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle),
            translation,
        )
    }

    #[test]
    fn test_identity() {
        let pose = RigidPose::identity();
        assert_eq!(pose.translation(), Vector3::zeros());
        assert_eq!(pose.axis_y(), Vector3::y());
    }

    #[test]
    fn test_from_matrix_rejects_scaled_rotation() {
        let mut m = Matrix4::identity();
        m[(0, 0)] = 2.0;
        assert!(matches!(
            RigidPose::from_matrix(m),
            Err(PoseError::NotOrthonormal { .. })
        ));
    }

    #[test]
    fn test_from_matrix_rejects_reflection() {
        let mut m = Matrix4::identity();
        m[(0, 0)] = -1.0;
        assert!(matches!(
            RigidPose::from_matrix(m),
            Err(PoseError::NotProperRotation { .. })
        ));
    }

    #[test]
    fn test_from_matrix_rejects_projective_row() {
        let mut m = Matrix4::identity();
        m[(3, 0)] = 0.5;
        assert!(matches!(
            RigidPose::from_matrix(m),
            Err(PoseError::NotHomogeneous)
        ));
    }

    #[test]
    fn test_from_columns_is_column_major() {
        let pose = RigidPose::from_columns([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 2.0, 3.0, 1.0],
        ])
        .unwrap();
        assert_eq!(pose.translation(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let pose = yaw(0.7, Vector3::new(1.0, 2.0, -3.0));
        let identity = pose * pose.inverse();
        assert!(identity.approx_eq(&RigidPose::identity(), 1e-5));
    }

    #[test]
    fn test_transform_point() {
        // Rotating +X by 90° about +Y lands on -Z
        let pose = yaw(FRAC_PI_2, Vector3::new(0.0, 1.0, 0.0));
        let p = pose.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let pose = yaw(FRAC_PI_2, Vector3::new(5.0, 5.0, 5.0));
        let v = pose.transform_vector(&Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(v, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotated_about_local_keeps_translation_and_axis() {
        let pose = yaw(0.3, Vector3::new(4.0, 5.0, 6.0));
        let rotated = pose.rotated_about_local(&Vector3::y_axis(), -1.1);
        assert_eq!(rotated.translation(), pose.translation());
        assert_relative_eq!(rotated.axis_y(), pose.axis_y(), epsilon = 1e-6);
    }

    #[test]
    fn test_without_translation() {
        let pose = yaw(0.3, Vector3::new(4.0, 5.0, 6.0));
        let bare = pose.without_translation();
        assert_eq!(bare.translation(), Vector3::zeros());
        assert_eq!(bare.rotation(), pose.rotation());
    }
}
