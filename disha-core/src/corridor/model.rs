//! Stateful corridor model updated once per camera frame.

use log::{debug, info};

use super::config::{CorridorConfig, CorridorLayout};
use super::pose_math::{camera_floor_distance, corridor_orientation};
use super::raycast::{EnvironmentRaycaster, ProbeReading, ProximityRaycaster, RayCastResult};
use super::surface::{Surface, SurfaceKind};
use crate::core::RigidPose;
use crate::error::ConfigError;

/// One surface's state after a frame update.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceFrame {
    pub kind: SurfaceKind,
    /// Surface frame to world.
    pub transform: RigidPose,
    pub probes: [ProbeReading; 4],
    pub result: RayCastResult,
}

/// Render-ready corridor state for one camera frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CorridorFrame {
    /// Corridor frame to world.
    pub anchor: RigidPose,
    /// Camera height above the floor.
    pub camera_floor_distance: f32,
    /// Surfaces in [`SurfaceKind::ALL`] order.
    pub surfaces: [SurfaceFrame; 4],
    pub result: RayCastResult,
}

impl CorridorFrame {
    /// State of a single surface.
    pub fn surface(&self, kind: SurfaceKind) -> &SurfaceFrame {
        &self.surfaces[CorridorModel::slot(kind)]
    }
}

/// The walking corridor in front of the user.
///
/// Created once a floor plane is known. Each camera frame re-anchors the
/// corridor at the camera, turns it to face the camera's heading, drops the
/// surfaces to the floor and probes every surface corner for hazards.
#[derive(Clone, Debug)]
pub struct CorridorModel {
    config: CorridorConfig,
    layout: CorridorLayout,
    raycaster: ProximityRaycaster,
    floor: RigidPose,
    anchor: RigidPose,
    camera_floor_distance: f32,
    surfaces: [Surface; 4],
    last_result: Option<RayCastResult>,
}

impl CorridorModel {
    /// Build the corridor surfaces for a detected floor.
    pub fn create(config: CorridorConfig, floor: RigidPose) -> Result<Self, ConfigError> {
        config.validate()?;

        let layout = CorridorLayout::from_config(&config);
        let surfaces = SurfaceKind::ALL.map(|kind| Surface::preset(kind, &config));

        info!(
            "Corridor created: {:.2}m wide, {:.2}m high, {:.2}m deep (probing from {:.2}m)",
            config.width, config.height, config.depth, config.depth_offset
        );

        Ok(Self {
            raycaster: ProximityRaycaster::new(config.ray_cast_buffer),
            config,
            layout,
            floor,
            anchor: floor,
            camera_floor_distance: 0.0,
            surfaces,
            last_result: None,
        })
    }

    fn slot(kind: SurfaceKind) -> usize {
        match kind {
            SurfaceKind::Front => 0,
            SurfaceKind::Right => 1,
            SurfaceKind::Left => 2,
            SurfaceKind::Top => 3,
        }
    }

    /// Replace the floor pose after the tracker refines the plane.
    pub fn on_floor_updated(&mut self, floor: RigidPose) {
        self.floor = floor;
    }

    /// Re-anchor the corridor at `camera` and probe every surface.
    pub fn on_frame_update<R>(&mut self, camera: &RigidPose, environment: &R) -> CorridorFrame
    where
        R: EnvironmentRaycaster + ?Sized,
    {
        self.anchor = corridor_orientation(&self.floor, camera);
        self.camera_floor_distance = camera_floor_distance(&self.floor, camera);

        for surface in self.surfaces.iter_mut() {
            let kind = surface.kind();
            surface.set_translation(Surface::placement(
                kind,
                &self.layout,
                self.camera_floor_distance,
            ));
        }

        let camera_position = camera.position();
        let anchor = self.anchor;
        let raycaster = self.raycaster;
        let surfaces = self.surfaces.each_ref().map(|surface| {
            let (probes, result) = raycaster.evaluate_probes(
                &camera_position,
                surface.probe_positions(&anchor),
                environment,
            );
            SurfaceFrame {
                kind: surface.kind(),
                transform: surface.world_transform(&anchor),
                probes,
                result,
            }
        });

        let result = RayCastResult::worst(surfaces.iter().map(|s| s.result));
        if self.last_result != Some(result) {
            debug!(
                "Corridor result {} (front={}, right={}, left={}, top={})",
                result,
                surfaces[0].result,
                surfaces[1].result,
                surfaces[2].result,
                surfaces[3].result
            );
            self.last_result = Some(result);
        }

        CorridorFrame {
            anchor,
            camera_floor_distance: self.camera_floor_distance,
            surfaces,
            result,
        }
    }

    #[inline]
    pub fn config(&self) -> &CorridorConfig {
        &self.config
    }

    #[inline]
    pub fn floor(&self) -> &RigidPose {
        &self.floor
    }

    /// Anchor computed by the most recent frame update.
    #[inline]
    pub fn anchor(&self) -> &RigidPose {
        &self.anchor
    }

    #[inline]
    pub fn camera_floor_distance(&self) -> f32 {
        self.camera_floor_distance
    }

    #[inline]
    pub fn surfaces(&self) -> &[Surface; 4] {
        &self.surfaces
    }

    pub fn surface(&self, kind: SurfaceKind) -> &Surface {
        &self.surfaces[Self::slot(kind)]
    }

    /// Aggregate result of the most recent frame, `None` before the first.
    #[inline]
    pub fn last_result(&self) -> Option<RayCastResult> {
        self.last_result
    }
}
