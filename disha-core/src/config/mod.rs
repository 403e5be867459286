//! Unified configuration loading.
//!
//! Loads all configuration from a single TOML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use disha_core::config::DishaConfig;
//!
//! // Load from default path (configs/disha.toml)
//! let config = DishaConfig::load_default()?;
//!
//! // Convert to runtime pieces
//! let solver = config.solver();
//! let route = config.map.route_provider()?;
//! let tracker = config.navigation.to_tracker();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`CorridorConfig`](crate::corridor::CorridorConfig) | Corridor box and ray-cast buffer |
//! | [`PositioningSection`] | Units, solver tuning, anchors |
//! | [`NavigationSection`] | Waypoint proximity, announcement delay |
//! | [`MapSection`] | Obstacle rows, fixed route, destinations |
//!
//! ## Example TOML
//!
//! ```toml
//! [corridor]
//! width = 0.6
//! depth = 2.0
//! depth_offset = 1.0
//!
//! [positioning]
//! distance_unit = "millimeters"
//!
//! [[positioning.anchors]]
//! name = "entrance"
//! x = 0.0
//! y = 0.0
//!
//! [map]
//! kind = "booths"
//! path_offset = 1.0
//! ```

mod defaults;
mod disha;
mod map;
mod navigation;
mod positioning;

pub use crate::error::ConfigLoadError;
pub use disha::{DEFAULT_CONFIG_PATH, DishaConfig};
pub use map::{MapKind, MapSection};
pub use navigation::NavigationSection;
pub use positioning::PositioningSection;
