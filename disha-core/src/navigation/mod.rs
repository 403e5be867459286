//! Route planning and turn-by-turn guidance on the 2D map.

mod planner;
mod route;
mod tracker;

pub use planner::{DetourCandidates, ObstacleBox, PathPlanner};
pub use route::{Destination, FixedRoute, Path, RouteProvider};
pub use tracker::{
    Announcement, AnnouncementKind, Announcer, LogAnnouncer, NavigationState, NavigationTracker,
    RecordingAnnouncer, turn_direction,
};
