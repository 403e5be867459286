//! Navigation configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::navigation::NavigationTracker;

use super::defaults;

/// Longest accepted route announcement delay (seconds).
pub const MAX_ROUTE_ANNOUNCEMENT_DELAY_SECS: f32 = 60.0;

/// Navigation configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationSection {
    /// Distance at which a waypoint counts as reached (meters)
    #[serde(default = "defaults::proximity_for_turn")]
    pub proximity_for_turn: f32,

    /// Delay before the route announcement is spoken (seconds)
    #[serde(default = "defaults::route_announcement_delay_secs")]
    pub route_announcement_delay_secs: f32,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            proximity_for_turn: defaults::proximity_for_turn(),
            route_announcement_delay_secs: defaults::route_announcement_delay_secs(),
        }
    }
}

impl NavigationSection {
    /// Announcement delay, clamped to `[0, MAX_ROUTE_ANNOUNCEMENT_DELAY_SECS]`.
    pub fn route_announcement_delay(&self) -> Duration {
        let secs = self
            .route_announcement_delay_secs
            .clamp(0.0, MAX_ROUTE_ANNOUNCEMENT_DELAY_SECS);
        Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
    }

    /// Build a tracker with these settings
    pub fn to_tracker(&self) -> NavigationTracker {
        NavigationTracker::new(self.proximity_for_turn, self.route_announcement_delay())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.proximity_for_turn > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "navigation.proximity_for_turn",
                value: self.proximity_for_turn,
            });
        }
        let delay = self.route_announcement_delay_secs;
        if !(0.0..=MAX_ROUTE_ANNOUNCEMENT_DELAY_SECS).contains(&delay) {
            return Err(ConfigError::OutOfRange {
                name: "navigation.route_announcement_delay_secs",
                value: delay,
                max: MAX_ROUTE_ANNOUNCEMENT_DELAY_SECS,
            });
        }
        Ok(())
    }
}
