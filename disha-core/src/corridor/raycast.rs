//! Probe hazard detection by ray casting against the environment.
//!
//! For each probe the distance from the camera to the probe is compared with
//! the distance to the first environment hit along the same ray:
//!
//! ```text
//! delta = model_distance - hit_distance
//!
//!   delta >  buffer  → Unsafe   (something is in front of the probe)
//!   delta > -buffer  → Buffer   (the hit is close to the probe)
//!   otherwise        → Safe
//! ```
//!
//! Both comparisons are strict. A miss counts as a hit at infinity.

use std::fmt;

use nalgebra::{Point3, Unit, Vector3};

use crate::core::RigidPose;

/// Hazard level of a probe, surface or the whole corridor.
///
/// Ordered by severity, so aggregation is a plain `max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RayCastResult {
    #[default]
    Safe,
    Buffer,
    Unsafe,
}

impl RayCastResult {
    /// Classify a distance delta against the buffer band.
    #[inline]
    pub fn classify(delta: f32, buffer: f32) -> Self {
        if delta > buffer {
            RayCastResult::Unsafe
        } else if delta > -buffer {
            RayCastResult::Buffer
        } else {
            RayCastResult::Safe
        }
    }

    /// Most severe of `results`; `Safe` when empty.
    pub fn worst<I>(results: I) -> Self
    where
        I: IntoIterator<Item = RayCastResult>,
    {
        results.into_iter().max().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RayCastResult::Safe => "safe",
            RayCastResult::Buffer => "buffer",
            RayCastResult::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for RayCastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ray query against the scanned environment.
///
/// Returns the distance along `direction` to the nearest hit, or `None`
/// when nothing is hit.
pub trait EnvironmentRaycaster {
    fn cast(&self, origin: &Point3<f32>, direction: &Unit<Vector3<f32>>) -> Option<f32>;
}

impl<F> EnvironmentRaycaster for F
where
    F: Fn(&Point3<f32>, &Unit<Vector3<f32>>) -> Option<f32>,
{
    #[inline]
    fn cast(&self, origin: &Point3<f32>, direction: &Unit<Vector3<f32>>) -> Option<f32> {
        self(origin, direction)
    }
}

/// Rays against a single infinite plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneRaycaster {
    point: Point3<f32>,
    normal: Unit<Vector3<f32>>,
}

impl PlaneRaycaster {
    /// Rays parallel to the plane closer than this are treated as misses.
    const PARALLEL_EPSILON: f32 = 1e-6;

    pub fn new(point: Point3<f32>, normal: Unit<Vector3<f32>>) -> Self {
        Self { point, normal }
    }

    /// Horizontal plane `y = height` in world coordinates.
    pub fn horizontal(height: f32) -> Self {
        Self::new(Point3::new(0.0, height, 0.0), Vector3::y_axis())
    }

    /// The plane described by a floor pose (its XZ plane).
    pub fn from_floor(floor: &RigidPose) -> Self {
        Self::new(floor.position(), Unit::new_normalize(floor.axis_y()))
    }
}

impl EnvironmentRaycaster for PlaneRaycaster {
    fn cast(&self, origin: &Point3<f32>, direction: &Unit<Vector3<f32>>) -> Option<f32> {
        let denom = self.normal.dot(&direction.into_inner());
        if denom.abs() < Self::PARALLEL_EPSILON {
            return None;
        }
        let t = self.normal.dot(&(self.point - origin)) / denom;
        (t >= 0.0).then_some(t)
    }
}

/// Evaluation of a single probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeReading {
    pub world_position: Point3<f32>,
    /// Distance from the camera to the probe.
    pub model_distance: f32,
    /// Distance to the first environment hit, `None` on a miss.
    pub hit_distance: Option<f32>,
    pub delta: f32,
    pub result: RayCastResult,
}

/// Classifies probes by comparing probe distance with ray hit distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityRaycaster {
    buffer: f32,
}

impl ProximityRaycaster {
    pub fn new(buffer: f32) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn buffer(&self) -> f32 {
        self.buffer
    }

    /// Cast from `camera` through `probe` and classify the result.
    ///
    /// A probe coinciding with the camera has no ray direction and is
    /// treated as a miss.
    pub fn evaluate_probe<R>(
        &self,
        camera: &Point3<f32>,
        probe: Point3<f32>,
        raycaster: &R,
    ) -> ProbeReading
    where
        R: EnvironmentRaycaster + ?Sized,
    {
        let offset = probe - camera;
        let model_distance = offset.norm();
        let hit_distance =
            Unit::try_new(offset, f32::EPSILON).and_then(|dir| raycaster.cast(camera, &dir));
        let delta = model_distance - hit_distance.unwrap_or(f32::INFINITY);

        ProbeReading {
            world_position: probe,
            model_distance,
            hit_distance,
            delta,
            result: RayCastResult::classify(delta, self.buffer),
        }
    }

    /// Evaluate four probes and return them with their worst result.
    pub fn evaluate_probes<R>(
        &self,
        camera: &Point3<f32>,
        probes: [Point3<f32>; 4],
        raycaster: &R,
    ) -> ([ProbeReading; 4], RayCastResult)
    where
        R: EnvironmentRaycaster + ?Sized,
    {
        let readings = probes.map(|p| self.evaluate_probe(camera, p, raycaster));
        let worst = RayCastResult::worst(readings.iter().map(|r| r.result));
        (readings, worst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Raycaster that always reports the same hit distance.
    fn fixed_hit(
        distance: Option<f32>,
    ) -> impl Fn(&Point3<f32>, &Unit<Vector3<f32>>) -> Option<f32> {
        move |_, _| distance
    }

    fn reading_for(hit: Option<f32>) -> ProbeReading {
        let raycaster = ProximityRaycaster::new(0.2);
        raycaster.evaluate_probe(&Point3::origin(), Point3::new(5.0, 0.0, 0.0), &fixed_hit(hit))
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(reading_for(Some(5.3)).result, RayCastResult::Safe);
        assert_eq!(reading_for(Some(4.85)).result, RayCastResult::Buffer);
        assert_eq!(reading_for(Some(4.5)).result, RayCastResult::Unsafe);
    }

    #[test]
    fn test_classify_zero_delta_is_inside_band() {
        let reading = reading_for(Some(5.0));
        assert_eq!(reading.delta, 0.0);
        assert_eq!(reading.result, RayCastResult::Buffer);
    }

    #[test]
    fn test_classify_boundaries_are_strict() {
        assert_eq!(RayCastResult::classify(0.2, 0.2), RayCastResult::Buffer);
        assert_eq!(RayCastResult::classify(-0.2, 0.2), RayCastResult::Safe);
        assert_eq!(RayCastResult::classify(0.2001, 0.2), RayCastResult::Unsafe);
    }

    #[test]
    fn test_miss_is_safe() {
        let reading = reading_for(None);
        assert_eq!(reading.hit_distance, None);
        assert_eq!(reading.delta, f32::NEG_INFINITY);
        assert_eq!(reading.result, RayCastResult::Safe);
    }

    #[test]
    fn test_worst_is_order_independent() {
        use RayCastResult::*;
        assert_eq!(RayCastResult::worst([Safe; 4]), Safe);
        assert_eq!(RayCastResult::worst(Vec::new()), Safe);
        for position in 0..4 {
            let mut results = [Safe, Buffer, Safe, Safe];
            results[position] = Unsafe;
            assert_eq!(RayCastResult::worst(results), Unsafe);
        }
    }

    #[test]
    fn test_plane_raycaster() {
        let floor = PlaneRaycaster::horizontal(-1.5);
        let down = Unit::new_normalize(Vector3::new(1.0, -1.0, 0.0));
        let hit = floor.cast(&Point3::origin(), &down).unwrap();
        assert_relative_eq!(hit, 1.5 * 2.0_f32.sqrt(), epsilon = 1e-5);

        let up = Vector3::y_axis();
        assert_eq!(floor.cast(&Point3::origin(), &up), None);

        let flat = Vector3::x_axis();
        assert_eq!(floor.cast(&Point3::origin(), &flat), None);
    }

    #[test]
    fn test_probe_on_floor_is_buffer() {
        // A probe lying on the floor is hit exactly where it sits
        let floor = PlaneRaycaster::horizontal(-1.5);
        let raycaster = ProximityRaycaster::new(0.2);
        let reading =
            raycaster.evaluate_probe(&Point3::origin(), Point3::new(2.0, -1.5, 0.3), &floor);
        assert_relative_eq!(reading.delta, 0.0, epsilon = 1e-5);
        assert_eq!(reading.result, RayCastResult::Buffer);
    }

    #[test]
    fn test_probe_below_floor_is_unsafe() {
        // Floor dropped away: probe hangs below the hit point
        let floor = PlaneRaycaster::horizontal(-1.0);
        let raycaster = ProximityRaycaster::new(0.2);
        let reading =
            raycaster.evaluate_probe(&Point3::origin(), Point3::new(2.0, -2.0, 0.0), &floor);
        assert_eq!(reading.result, RayCastResult::Unsafe);
    }

    #[test]
    fn test_probe_at_camera_is_miss() {
        let raycaster = ProximityRaycaster::new(0.2);
        let reading = raycaster.evaluate_probe(
            &Point3::origin(),
            Point3::origin(),
            &fixed_hit(Some(0.0)),
        );
        assert_eq!(reading.hit_distance, None);
        assert_eq!(reading.result, RayCastResult::Safe);
    }
}
