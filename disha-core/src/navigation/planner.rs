//! Two-turn detours around rows of obstacle boxes.
//!
//! Map layout (y grows downward, as on screen):
//!
//! ```text
//!          top detour  ┌──────────────────────┐
//!                      │                      │
//!    ┌──┐   ┌──┐   ┌──┐│  ┌──┐   ┌──┐   ┌──┐  │
//!    │  │ S │  │   │  ││  │  │   │  │ D │  │  │
//!    │  │ │ │  │   │  ││  │  │   │  │ │ │  │  │
//!    └──┘ │ └──┘   └──┘   └──┘   └──┘ │ └──┘
//!         └───── bottom detour ───────┘
//! ```
//!
//! Boxes are sorted by `center_x` and share a row. The gaps between them are
//! lanes. Source and destination are snapped to their lane center; if they
//! share a lane the route is direct, otherwise it leaves the source lane
//! above or below the boxes in between and enters the destination lane.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::route::{Path, RouteProvider};
use crate::core::Point2D;
use crate::error::ConfigError;

/// A rectangular no-go region, such as a row of booths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBox {
    pub center_x: f32,
    pub center_y: f32,
    /// Extent along X.
    pub width: f32,
    /// Extent along Y.
    pub length: f32,
}

impl ObstacleBox {
    pub fn new(center_x: f32, center_y: f32, width: f32, length: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            length,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center_x + self.width / 2.0
    }

    /// Smallest y covered by the box.
    #[inline]
    pub fn top(&self) -> f32 {
        self.center_y - self.length / 2.0
    }

    /// Largest y covered by the box.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center_y + self.length / 2.0
    }
}

/// The two detours considered between different lanes.
#[derive(Clone, Debug, PartialEq)]
pub struct DetourCandidates {
    pub top: Path,
    pub bottom: Path,
}

impl DetourCandidates {
    /// The shorter candidate; the top detour wins only when strictly shorter.
    pub fn shorter(self) -> Path {
        if self.top.length < self.bottom.length {
            self.top
        } else {
            self.bottom
        }
    }
}

/// Route planner for a hall of obstacle rows.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPlanner {
    boxes: Vec<ObstacleBox>,
    path_offset: f32,
}

impl PathPlanner {
    /// Create a planner.
    ///
    /// Boxes must be sorted by `center_x` and must not overlap along X.
    pub fn new(boxes: Vec<ObstacleBox>, path_offset: f32) -> Result<Self, ConfigError> {
        if !(path_offset > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "map.path_offset",
                value: path_offset,
            });
        }
        for (index, pair) in boxes.windows(2).enumerate() {
            if pair[1].center_x <= pair[0].center_x || pair[1].left() < pair[0].right() {
                return Err(ConfigError::UnsortedBoxes { index: index + 1 });
            }
        }
        Ok(Self { boxes, path_offset })
    }

    #[inline]
    pub fn boxes(&self) -> &[ObstacleBox] {
        &self.boxes
    }

    #[inline]
    pub fn path_offset(&self) -> f32 {
        self.path_offset
    }

    /// Index of the first box whose center lies strictly right of `point`.
    ///
    /// Equals `boxes().len()` when the point is right of every box. Points
    /// with the same index share a lane.
    pub fn box_index_right_of(&self, point: Point2D) -> usize {
        self.boxes.partition_point(|b| b.center_x <= point.x)
    }

    /// Snap `point` to the centerline of its lane, keeping `y`.
    ///
    /// Between two boxes the lane center is the midpoint of their centers.
    /// Before the first or past the last box it is `path_offset` beyond
    /// that box's outer edge.
    pub fn project_to_lane_center(&self, point: Point2D) -> Point2D {
        let (Some(first), Some(last)) = (self.boxes.first(), self.boxes.last()) else {
            return point;
        };
        let index = self.box_index_right_of(point);
        let x = if index == 0 {
            first.left() - self.path_offset
        } else if index >= self.boxes.len() {
            last.right() + self.path_offset
        } else {
            (self.boxes[index - 1].center_x + self.boxes[index].center_x) / 2.0
        };
        Point2D::new(x, point.y)
    }

    /// Top and bottom detours, or `None` when both ends share a lane.
    pub fn detour_candidates(
        &self,
        source: Point2D,
        destination: Point2D,
    ) -> Option<DetourCandidates> {
        let source_lane = self.box_index_right_of(source);
        let destination_lane = self.box_index_right_of(destination);
        if source_lane == destination_lane {
            return None;
        }

        let start = self.project_to_lane_center(source);
        let end = self.project_to_lane_center(destination);

        // Boxes separating the two lanes
        let (first, last) = (
            source_lane.min(destination_lane),
            source_lane.max(destination_lane),
        );
        let between = &self.boxes[first..last];
        let top = between.iter().map(ObstacleBox::top).fold(f32::INFINITY, f32::min);
        let bottom = between
            .iter()
            .map(ObstacleBox::bottom)
            .fold(f32::NEG_INFINITY, f32::max);
        let top_y = top - self.path_offset;
        let bottom_y = bottom + self.path_offset;

        let detour = |y: f32| {
            Path::new(vec![start, Point2D::new(start.x, y), Point2D::new(end.x, y), end])
        };

        Some(DetourCandidates {
            top: detour(top_y),
            bottom: detour(bottom_y),
        })
    }

    /// Plan a route from `source` to `destination`.
    ///
    /// Returns the direct 2-point path within one lane, otherwise the shorter
    /// of the two 4-point detours.
    pub fn plan_path(&self, source: Point2D, destination: Point2D) -> Path {
        match self.detour_candidates(source, destination) {
            None => {
                let path = Path::new(vec![
                    self.project_to_lane_center(source),
                    self.project_to_lane_center(destination),
                ]);
                debug!("Direct path, length {:.2}", path.length);
                path
            }
            Some(candidates) => {
                let (top, bottom) = (candidates.top.length, candidates.bottom.length);
                let path = candidates.shorter();
                info!(
                    "Planned {} detour: {:.2} (top {:.2}, bottom {:.2})",
                    if top < bottom { "top" } else { "bottom" },
                    path.length,
                    top,
                    bottom
                );
                path
            }
        }
    }
}

impl RouteProvider for PathPlanner {
    fn route(&self, source: Point2D, destination: Point2D) -> Path {
        self.plan_path(source, destination)
    }
}
