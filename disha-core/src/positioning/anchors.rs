//! Known anchors and their latest ranging results.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::types::AnchorObservation;
use crate::core::Point2D;
use crate::error::ConfigError;

/// An anchor with a surveyed position (configured coordinate unit).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl AnchorSpec {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Outcome of one ranging exchange with an anchor.
#[derive(Clone, Debug, PartialEq)]
pub enum RangingStatus {
    /// Distance in the configured distance unit.
    Success { distance: f32 },
    /// The ranging stack reported a failure.
    Failure { reason: String },
}

#[derive(Clone, Debug)]
struct AnchorState {
    spec: AnchorSpec,
    last_distance: Option<f32>,
}

/// Anchors known to the site and the most recent distance to each.
#[derive(Clone, Debug, Default)]
pub struct AnchorRegistry {
    anchors: Vec<AnchorState>,
}

impl AnchorRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(specs: impl IntoIterator<Item = AnchorSpec>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for spec in specs {
            if registry.index_of(&spec.name).is_some() {
                return Err(ConfigError::DuplicateAnchor(spec.name));
            }
            registry.anchors.push(AnchorState {
                spec,
                last_distance: None,
            });
        }
        Ok(registry)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.anchors.iter().position(|a| a.spec.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn anchor(&self, name: &str) -> Option<&AnchorSpec> {
        self.index_of(name).map(|i| &self.anchors[i].spec)
    }

    /// Latest distance recorded for `name`.
    pub fn last_distance(&self, name: &str) -> Option<f32> {
        self.index_of(name).and_then(|i| self.anchors[i].last_distance)
    }

    /// Record a ranging result.
    ///
    /// Returns `true` when a distance was stored. Failures and unknown
    /// anchors are logged and leave the registry unchanged.
    pub fn record_ranging(&mut self, name: &str, status: RangingStatus) -> bool {
        let Some(index) = self.index_of(name) else {
            warn!("Ranging result from unknown anchor '{}'", name);
            return false;
        };
        match status {
            RangingStatus::Success { distance } if distance.is_finite() && distance >= 0.0 => {
                debug!("Anchor '{}' range {}", name, distance);
                self.anchors[index].last_distance = Some(distance);
                true
            }
            RangingStatus::Success { distance } => {
                warn!("Anchor '{}' reported invalid range {}", name, distance);
                false
            }
            RangingStatus::Failure { reason } => {
                warn!("Ranging with '{}' failed: {}", name, reason);
                false
            }
        }
    }

    /// Drop the distance for an anchor that went out of range.
    pub fn forget(&mut self, name: &str) {
        if let Some(index) = self.index_of(name) {
            self.anchors[index].last_distance = None;
        }
    }

    /// Drop every recorded distance.
    pub fn clear_ranges(&mut self) {
        for anchor in &mut self.anchors {
            anchor.last_distance = None;
        }
    }

    /// Observations for every anchor with a recorded distance.
    pub fn observations(&self) -> Vec<AnchorObservation> {
        self.anchors
            .iter()
            .filter_map(|a| {
                a.last_distance
                    .map(|d| AnchorObservation::new(a.spec.name.clone(), a.spec.position(), d))
            })
            .collect()
    }
}
