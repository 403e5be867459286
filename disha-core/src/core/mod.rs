//! Core geometric types shared by the corridor and positioning engines.
//!
//! - [`RigidPose`]: 4x4 rigid transform for floor and camera poses
//! - [`Point2D`]: floor-map coordinates in meters
//! - [`math`]: heading and polyline helpers

pub mod math;
mod point;
mod pose;

pub use point::Point2D;
pub use pose::RigidPose;
