//! Safe walking corridor overlaid in front of the user.
//!
//! - [`pose_math`]: corridor orientation and camera height from floor/camera poses
//! - [`CorridorModel`]: four surfaces re-anchored to the camera every frame
//! - [`ProximityRaycaster`]: corner probes classified as safe, buffer or unsafe

mod config;
mod model;
pub mod pose_math;
mod raycast;
mod surface;

pub use config::{CorridorConfig, CorridorLayout};
pub use model::{CorridorFrame, CorridorModel, SurfaceFrame};
pub use pose_math::{camera_floor_distance, corridor_heading, corridor_orientation};
pub use raycast::{
    EnvironmentRaycaster, PlaneRaycaster, ProbeReading, ProximityRaycaster, RayCastResult,
};
pub use surface::{ProbePoint, RotationAxis, Surface, SurfaceKind};
