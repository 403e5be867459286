//! Map configuration section.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::error::ConfigError;
use crate::navigation::{Destination, FixedRoute, ObstacleBox, PathPlanner, RouteProvider};

use super::defaults;

/// How routes are produced on this map
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    /// Rows of obstacle boxes, routed by [`PathPlanner`]
    #[default]
    Booths,
    /// A fixed hand-drawn route
    Fixed,
}

/// Map configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSection {
    /// Route provider to use
    #[serde(default)]
    pub kind: MapKind,

    /// Clearance kept from box edges when routing (meters)
    #[serde(default = "defaults::path_offset")]
    pub path_offset: f32,

    /// View points per meter when drawing the map
    #[serde(default = "defaults::map_scale")]
    pub scale: f32,

    /// Waypoints for `kind = "fixed"`
    #[serde(default = "defaults::fixed_route")]
    pub fixed_route: Vec<[f32; 2]>,

    /// Obstacle rows for `kind = "booths"`, sorted by center_x
    #[serde(default = "defaults::booth_rows")]
    pub boxes: Vec<ObstacleBox>,

    /// Named destinations
    #[serde(default = "defaults::destinations")]
    pub destinations: Vec<Destination>,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            kind: MapKind::default(),
            path_offset: defaults::path_offset(),
            scale: defaults::map_scale(),
            fixed_route: defaults::fixed_route(),
            boxes: defaults::booth_rows(),
            destinations: defaults::destinations(),
        }
    }
}

impl MapSection {
    /// Route provider for the configured map kind
    pub fn route_provider(&self) -> Result<Box<dyn RouteProvider + Send + Sync>, ConfigError> {
        let provider: Box<dyn RouteProvider + Send + Sync> = match self.kind {
            MapKind::Booths => Box::new(self.path_planner()?),
            MapKind::Fixed => Box::new(self.fixed_route()?),
        };
        Ok(provider)
    }

    pub fn path_planner(&self) -> Result<PathPlanner, ConfigError> {
        PathPlanner::new(self.boxes.clone(), self.path_offset)
    }

    pub fn fixed_route(&self) -> Result<FixedRoute, ConfigError> {
        FixedRoute::new(self.fixed_route.iter().map(|&[x, y]| Point2D::new(x, y)).collect())
    }

    /// Map point in view points, for drawing the floor plan
    #[inline]
    pub fn to_view(&self, point: Point2D) -> Point2D {
        point * self.scale
    }

    /// Look up a destination by name (case-insensitive)
    pub fn destination(&self, name: &str) -> Option<&Destination> {
        self.destinations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "map.scale",
                value: self.scale,
            });
        }
        match self.kind {
            MapKind::Booths => self.path_planner().map(|_| ()),
            MapKind::Fixed => self.fixed_route().map(|_| ()),
        }
    }
}
