//! Corridor surfaces and their corner probes.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use super::config::{CorridorConfig, CorridorLayout};
use crate::core::RigidPose;

/// Which face of the corridor a surface is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Front,
    Right,
    Left,
    Top,
}

impl SurfaceKind {
    /// All kinds in evaluation order.
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::Front,
        SurfaceKind::Right,
        SurfaceKind::Left,
        SurfaceKind::Top,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceKind::Front => "front",
            SurfaceKind::Right => "right",
            SurfaceKind::Left => "left",
            SurfaceKind::Top => "top",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis a surface is rotated about in the corridor frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
    None,
}

impl RotationAxis {
    fn unit(&self) -> Option<Unit<Vector3<f32>>> {
        match self {
            RotationAxis::X => Some(Vector3::x_axis()),
            RotationAxis::Y => Some(Vector3::y_axis()),
            RotationAxis::Z => Some(Vector3::z_axis()),
            RotationAxis::None => None,
        }
    }
}

/// A corner of a surface, as an offset in the surface's own plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbePoint {
    pub x: f32,
    pub y: f32,
}

impl ProbePoint {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset as a point in the surface frame (the surface lies in its XY plane).
    #[inline]
    pub fn local(&self) -> Point3<f32> {
        Point3::new(self.x, self.y, 0.0)
    }
}

/// A rectangular corridor face.
///
/// The rectangle lies in its own XY plane, `width` along X and `height`
/// along Y, centered on the origin. It is rotated by `rotation_angle` about
/// `rotation_axis` and then placed at `translation` in the corridor frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    kind: SurfaceKind,
    width: f32,
    height: f32,
    rotation_axis: RotationAxis,
    rotation_angle: f32,
    translation: Vector3<f32>,
    probes: [ProbePoint; 4],
}

impl Surface {
    /// Create a surface with its corner probes; placed at the corridor origin.
    pub fn new(
        kind: SurfaceKind,
        width: f32,
        height: f32,
        rotation_axis: RotationAxis,
        rotation_angle: f32,
    ) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self {
            kind,
            width,
            height,
            rotation_axis,
            rotation_angle,
            translation: Vector3::zeros(),
            probes: [
                ProbePoint::new(-hw, -hh),
                ProbePoint::new(hw, -hh),
                ProbePoint::new(hw, hh),
                ProbePoint::new(-hw, hh),
            ],
        }
    }

    /// Preset dimensions and rotation for one face of the corridor.
    pub fn preset(kind: SurfaceKind, config: &CorridorConfig) -> Self {
        let side = config.side_length();
        match kind {
            SurfaceKind::Front => {
                Self::new(kind, config.width, config.height, RotationAxis::Y, FRAC_PI_2)
            }
            SurfaceKind::Right => Self::new(kind, side, config.height, RotationAxis::None, 0.0),
            SurfaceKind::Left => Self::new(kind, side, config.height, RotationAxis::Y, PI),
            SurfaceKind::Top => Self::new(kind, side, config.width, RotationAxis::X, FRAC_PI_2),
        }
    }

    /// Translation of this face in the corridor frame for a camera held
    /// `camera_height` above the floor.
    pub fn placement(
        kind: SurfaceKind,
        layout: &CorridorLayout,
        camera_height: f32,
    ) -> Vector3<f32> {
        match kind {
            SurfaceKind::Front => {
                Vector3::new(layout.front_x, layout.wall_center_height - camera_height, 0.0)
            }
            SurfaceKind::Right => Vector3::new(
                layout.side_center_x,
                layout.wall_center_height - camera_height,
                -layout.half_width,
            ),
            SurfaceKind::Left => Vector3::new(
                layout.side_center_x,
                layout.wall_center_height - camera_height,
                layout.half_width,
            ),
            SurfaceKind::Top => {
                Vector3::new(layout.side_center_x, layout.top_height - camera_height, 0.0)
            }
        }
    }

    #[inline]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn rotation_axis(&self) -> RotationAxis {
        self.rotation_axis
    }

    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    #[inline]
    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    #[inline]
    pub fn probes(&self) -> &[ProbePoint; 4] {
        &self.probes
    }

    /// Move the surface within the corridor frame.
    #[inline]
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.translation = translation;
    }

    /// Transform from the surface frame to the corridor frame.
    pub fn local_transform(&self) -> RigidPose {
        let rotation = match self.rotation_axis.unit() {
            Some(axis) => UnitQuaternion::from_axis_angle(&axis, self.rotation_angle),
            None => UnitQuaternion::identity(),
        };
        RigidPose::from_parts(rotation, self.translation)
    }

    /// Transform from the surface frame to the world, given the corridor anchor.
    #[inline]
    pub fn world_transform(&self, anchor: &RigidPose) -> RigidPose {
        *anchor * self.local_transform()
    }

    /// World positions of the four corner probes.
    pub fn probe_positions(&self, anchor: &RigidPose) -> [Point3<f32>; 4] {
        let world = self.world_transform(anchor);
        self.probes.map(|probe| world.transform_point(&probe.local()))
    }
}
