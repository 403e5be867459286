//! Corridor dimensions and the surface offsets derived from them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Walking corridor dimensions in meters.
///
/// The corridor is a box of `width × height × depth` placed in front of the
/// user. Hazard probing starts `depth_offset` meters ahead of the camera so
/// the user's own body and feet are not flagged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Corridor width (side to side).
    /// Default: 0.6
    pub width: f32,

    /// Corridor height above the floor.
    /// Default: 2.0
    pub height: f32,

    /// Distance from the camera to the front surface.
    /// Default: 2.0
    pub depth: f32,

    /// Distance from the camera where the side and top surfaces begin.
    /// Must be smaller than `depth`.
    /// Default: 1.0
    pub depth_offset: f32,

    /// Tolerance band around a probe used to classify ray hits.
    /// Default: 0.2
    pub ray_cast_buffer: f32,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            width: 0.6,
            height: 2.0,
            depth: 2.0,
            depth_offset: 1.0,
            ray_cast_buffer: 0.2,
        }
    }
}

impl CorridorConfig {
    /// Builder-style setter for the corridor box.
    pub fn with_dimensions(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    /// Builder-style setter for the depth offset.
    pub fn with_depth_offset(mut self, depth_offset: f32) -> Self {
        self.depth_offset = depth_offset;
        self
    }

    /// Builder-style setter for the ray-cast buffer.
    pub fn with_ray_cast_buffer(mut self, buffer: f32) -> Self {
        self.ray_cast_buffer = buffer;
        self
    }

    /// Length of the side and top surfaces.
    #[inline]
    pub fn side_length(&self) -> f32 {
        self.depth - self.depth_offset
    }

    /// Check the dimensions describe a usable corridor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("corridor.width", self.width),
            ("corridor.height", self.height),
            ("corridor.depth", self.depth),
            ("corridor.ray_cast_buffer", self.ray_cast_buffer),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.depth_offset >= 0.0 && self.depth_offset < self.depth) {
            return Err(ConfigError::DepthOffsetOutOfRange {
                depth_offset: self.depth_offset,
                depth: self.depth,
            });
        }
        Ok(())
    }
}

/// Fixed surface offsets in the corridor's local frame.
///
/// Derived once from [`CorridorConfig`]. The corridor frame has -X pointing
/// away from the camera, Y along the floor normal and Z to the camera's left.
/// Heights are measured from the floor; the camera's height above the floor
/// is subtracted per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorLayout {
    /// X of the front surface (`-depth`).
    pub front_x: f32,
    /// X of the side and top surface centers (`-(depth + depth_offset) / 2`).
    pub side_center_x: f32,
    /// Z of the left wall (`+width / 2`); the right wall sits at the negation.
    pub half_width: f32,
    /// Height of the front and side surface centers (`height / 2`).
    pub wall_center_height: f32,
    /// Height of the top surface (`height`).
    pub top_height: f32,
}

impl CorridorLayout {
    /// Compute the offsets for a corridor.
    pub fn from_config(config: &CorridorConfig) -> Self {
        Self {
            front_x: -config.depth,
            side_center_x: -(config.depth + config.depth_offset) / 2.0,
            half_width: config.width / 2.0,
            wall_center_height: config.height / 2.0,
            top_height: config.height,
        }
    }
}
