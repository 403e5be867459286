//! Default value functions for serde deserialization.

use crate::navigation::{Destination, ObstacleBox};
use crate::positioning::DistanceUnit;

pub fn coordinate_unit() -> DistanceUnit {
    DistanceUnit::Meters
}

pub fn max_iterations() -> usize {
    100
}

pub fn step_threshold() -> f64 {
    1e-9
}

pub fn gradient_threshold() -> f64 {
    1e-12
}

pub fn lm_initial_lambda() -> f64 {
    1e-3
}

pub fn lm_lambda_factor() -> f64 {
    10.0
}

pub fn lm_min_lambda() -> f64 {
    1e-7
}

pub fn lm_max_lambda() -> f64 {
    1e7
}

pub fn min_eigenvalue_ratio() -> f64 {
    1e-9
}

pub fn proximity_for_turn() -> f32 {
    1.0
}

pub fn route_announcement_delay_secs() -> f32 {
    3.0
}

pub fn path_offset() -> f32 {
    1.0
}

pub fn map_scale() -> f32 {
    10.0
}

/// Demo hall: eight booth rows 7m apart.
pub fn booth_rows() -> Vec<ObstacleBox> {
    (0..8)
        .map(|i| ObstacleBox::new(4.0 + 7.0 * i as f32, 15.0, 3.0, 13.0))
        .collect()
}

/// Hand-drawn route across the surveyed floor plan.
pub fn fixed_route() -> Vec<[f32; 2]> {
    vec![[33.2, 31.2], [33.2, 27.5], [15.5, 27.5], [15.5, 17.0]]
}

pub fn destinations() -> Vec<Destination> {
    vec![Destination::new("Sample", 10.0, 15.0)]
}
