//! Turn-by-turn guidance along a planned path.
//!
//! The tracker watches the location stream and announces each waypoint once,
//! the first time the user comes within `proximity_for_turn` of it. Turn
//! direction comes from the sign of the cross product of the arriving and
//! departing segments; a negative cross product is a left turn.

use std::fmt;
use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, info, warn};

use super::route::Path;
use crate::core::Point2D;

/// What is being announced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnouncementKind {
    RouteCalculated,
    TurnLeft,
    TurnRight,
    TurnNow,
    ReachedDestination,
}

impl AnnouncementKind {
    /// Text spoken to the user.
    pub fn text(&self) -> &'static str {
        match self {
            AnnouncementKind::RouteCalculated => {
                "Route calculated. Estimated time 1 minute to destination. Start walking"
            }
            AnnouncementKind::TurnLeft => "Turn left",
            AnnouncementKind::TurnRight => "Turn right",
            AnnouncementKind::TurnNow => "Turn now",
            AnnouncementKind::ReachedDestination => "Reached destination",
        }
    }
}

impl fmt::Display for AnnouncementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A message for the speech or accessibility layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub kind: AnnouncementKind,
    /// How long to wait before speaking.
    pub delay: Duration,
    /// Waypoint that triggered it, if any.
    pub waypoint: Option<usize>,
}

impl Announcement {
    pub fn immediate(kind: AnnouncementKind, waypoint: usize) -> Self {
        Self {
            kind,
            delay: Duration::ZERO,
            waypoint: Some(waypoint),
        }
    }

    #[inline]
    pub fn text(&self) -> &'static str {
        self.kind.text()
    }
}

/// Receives announcements (speech synthesizer, screen reader, log).
pub trait Announcer {
    fn announce(&mut self, announcement: &Announcement);
}

/// Announcer that keeps everything it is told.
#[derive(Clone, Debug, Default)]
pub struct RecordingAnnouncer {
    pub announcements: Vec<Announcement>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<AnnouncementKind> {
        self.announcements.iter().map(|a| a.kind).collect()
    }

    pub fn texts(&self) -> Vec<&'static str> {
        self.announcements.iter().map(|a| a.text()).collect()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, announcement: &Announcement) {
        self.announcements.push(*announcement);
    }
}

/// Announcer that writes to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&mut self, announcement: &Announcement) {
        if announcement.delay.is_zero() {
            info!("Announce: {}", announcement.text());
        } else {
            info!(
                "Announce in {:.1}s: {}",
                announcement.delay.as_secs_f32(),
                announcement.text()
            );
        }
    }
}

/// Forwards announcements to another thread (e.g. a speech worker).
impl Announcer for Sender<Announcement> {
    fn announce(&mut self, announcement: &Announcement) {
        if self.send(*announcement).is_err() {
            debug!("Announcement dropped, receiver gone: {}", announcement.text());
        }
    }
}

/// Turn direction at `waypoint` given its neighbours.
pub fn turn_direction(previous: Point2D, waypoint: Point2D, next: Point2D) -> AnnouncementKind {
    let arrival = waypoint.vector_from(&previous);
    let departure = waypoint.vector_to(&next);
    if arrival.cross(&departure) < 0.0 {
        AnnouncementKind::TurnLeft
    } else {
        AnnouncementKind::TurnRight
    }
}

/// Per-session navigation state.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationState {
    pub source: Point2D,
    pub destination: Point2D,
    pub path: Vec<Point2D>,
    pub visited: Vec<bool>,
}

impl NavigationState {
    fn new(source: Point2D, destination: Point2D) -> Self {
        Self {
            source,
            destination,
            path: Vec::new(),
            visited: Vec::new(),
        }
    }
}

/// Tracks progress along a path and produces guidance announcements.
#[derive(Clone, Debug)]
pub struct NavigationTracker {
    proximity_for_turn: f32,
    route_announcement_delay: Duration,
    state: Option<NavigationState>,
}

impl Default for NavigationTracker {
    fn default() -> Self {
        Self::new(1.0, Duration::from_secs(3))
    }
}

impl NavigationTracker {
    pub fn new(proximity_for_turn: f32, route_announcement_delay: Duration) -> Self {
        Self {
            proximity_for_turn,
            route_announcement_delay,
            state: None,
        }
    }

    #[inline]
    pub fn proximity_for_turn(&self) -> f32 {
        self.proximity_for_turn
    }

    #[inline]
    pub fn is_navigating(&self) -> bool {
        self.state.is_some()
    }

    #[inline]
    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }

    /// Begin a navigation session, discarding any previous one.
    pub fn start(&mut self, source: Point2D, destination: Point2D) {
        info!(
            "Navigation started: ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            source.x, source.y, destination.x, destination.y
        );
        self.state = Some(NavigationState::new(source, destination));
    }

    /// End the session.
    pub fn stop(&mut self) {
        if self.state.take().is_some() {
            info!("Navigation stopped");
        }
    }

    /// Set the route for the current session.
    ///
    /// Only the first non-empty path is taken; later calls are no-ops. The
    /// source waypoint is marked visited. Returns the delayed route
    /// announcement when the path is accepted.
    pub fn set_path(&mut self, path: &Path) -> Option<Announcement> {
        let Some(state) = self.state.as_mut() else {
            warn!("Path ignored: navigation not started");
            return None;
        };
        if !state.path.is_empty() || path.is_empty() {
            return None;
        }

        state.path = path.points.clone();
        state.visited = vec![false; path.len()];
        state.visited[0] = true;

        info!("Route set: {} waypoints, {:.2}m", path.len(), path.length);
        Some(Announcement {
            kind: AnnouncementKind::RouteCalculated,
            delay: self.route_announcement_delay,
            waypoint: None,
        })
    }

    /// Feed a new location.
    ///
    /// Every unvisited waypoint closer than `proximity_for_turn` is marked
    /// visited. The lowest such index is announced, except that reaching the
    /// destination always takes precedence.
    pub fn on_location_update(&mut self, x: f32, y: f32) -> Option<Announcement> {
        let state = self.state.as_mut()?;
        let here = Point2D::new(x, y);

        let mut first = None;
        let mut reached_destination = false;
        let last = state.path.len().checked_sub(1)?;
        for (index, waypoint) in state.path.iter().enumerate() {
            if !state.visited[index] && waypoint.distance(&here) < self.proximity_for_turn {
                state.visited[index] = true;
                first.get_or_insert(index);
                reached_destination |= index == last;
            }
        }

        let index = if reached_destination { last } else { first? };
        let kind = if index == last {
            AnnouncementKind::ReachedDestination
        } else if index == 0 {
            AnnouncementKind::TurnNow
        } else {
            turn_direction(state.path[index - 1], state.path[index], state.path[index + 1])
        };

        debug!("Waypoint {} reached at ({:.2}, {:.2}): {}", index, x, y, kind);
        Some(Announcement::immediate(kind, index))
    }

    /// Whether the destination waypoint has been reached.
    pub fn is_complete(&self) -> bool {
        self.state
            .as_ref()
            .and_then(|s| s.visited.last().copied())
            .unwrap_or(false)
    }

    /// Waypoints not yet reached, in path order.
    pub fn remaining_waypoints(&self) -> Vec<Point2D> {
        match &self.state {
            Some(state) => state
                .path
                .iter()
                .zip(&state.visited)
                .filter(|(_, visited)| !**visited)
                .map(|(p, _)| *p)
                .collect(),
            None => Vec::new(),
        }
    }
}
