//! Per-session context tying the corridor, positioning and guidance together.
//!
//! A [`TrackingSession`] is created when the user starts a walk and dropped
//! (or [`end`](TrackingSession::end)ed) when they finish. Camera frames and
//! ranging results may arrive on different threads; each piece of mutable
//! state sits behind its own mutex so a slow solve never stalls the frame
//! loop.
//!
//! ```text
//!   AR frame callback ──► on_frame ──────► CorridorModel ──► CorridorFrame
//!                                                              (renderer)
//!   ranging callback ───► record_ranging ─► AnchorRegistry
//!                         locate ─────────► Solver ─► NavigationTracker
//!                                                        │
//!                                                        ▼
//!                                                    Announcer
//! ```

use log::{info, warn};
use parking_lot::Mutex;

use crate::config::DishaConfig;
use crate::core::{Point2D, RigidPose};
use crate::corridor::{CorridorConfig, CorridorFrame, CorridorModel, EnvironmentRaycaster};
use crate::error::{Result, SolveError};
use crate::navigation::{
    Announcement, Announcer, Destination, LogAnnouncer, NavigationTracker, Path, RouteProvider,
};
use crate::positioning::{
    AnchorObservation, AnchorRegistry, MultilaterationSolver, RangingStatus, SolvedLocation,
};

/// Result of feeding one ranging round through the session.
#[derive(Clone, Debug, PartialEq)]
pub struct RangingOutcome {
    pub location: SolvedLocation,
    /// Guidance triggered by this location, if any.
    pub announcement: Option<Announcement>,
}

/// Explicit context object for one tracking/navigation session.
pub struct TrackingSession {
    corridor_config: CorridorConfig,
    solver: MultilaterationSolver,
    route: Box<dyn RouteProvider + Send + Sync>,
    destinations: Vec<Destination>,
    corridor: Mutex<Option<CorridorModel>>,
    anchors: Mutex<AnchorRegistry>,
    navigation: Mutex<NavigationTracker>,
    last_location: Mutex<Option<SolvedLocation>>,
    announcer: Mutex<Box<dyn Announcer + Send>>,
}

impl TrackingSession {
    /// Build a session from validated configuration.
    ///
    /// Announcements go to the log until [`with_announcer`](Self::with_announcer)
    /// installs another sink.
    pub fn new(config: &DishaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            corridor_config: config.corridor.clone(),
            solver: config.solver(),
            route: config.map.route_provider()?,
            destinations: config.map.destinations.clone(),
            corridor: Mutex::new(None),
            anchors: Mutex::new(config.positioning.anchor_registry()?),
            navigation: Mutex::new(config.navigation.to_tracker()),
            last_location: Mutex::new(None),
            announcer: Mutex::new(Box::new(LogAnnouncer)),
        })
    }

    /// Replace the announcement sink.
    pub fn with_announcer(self, announcer: impl Announcer + Send + 'static) -> Self {
        *self.announcer.lock() = Box::new(announcer);
        self
    }

    fn announce(&self, announcement: Option<Announcement>) -> Option<Announcement> {
        if let Some(a) = &announcement {
            self.announcer.lock().announce(a);
        }
        announcement
    }

    // ------------------------------------------------------------------
    // Corridor
    // ------------------------------------------------------------------

    /// A floor plane was detected or refined.
    ///
    /// The first call creates the corridor; later calls move it to the new floor.
    pub fn on_floor_detected(&self, floor: RigidPose) -> Result<()> {
        let mut corridor = self.corridor.lock();
        match corridor.as_mut() {
            Some(model) => model.on_floor_updated(floor),
            None => *corridor = Some(CorridorModel::create(self.corridor_config.clone(), floor)?),
        }
        Ok(())
    }

    /// Whether a floor has been seen and the corridor exists.
    pub fn has_floor(&self) -> bool {
        self.corridor.lock().is_some()
    }

    /// Update the corridor for a camera frame; `None` until a floor is known.
    pub fn on_frame<R>(&self, camera: &RigidPose, environment: &R) -> Option<CorridorFrame>
    where
        R: EnvironmentRaycaster + ?Sized,
    {
        self.corridor
            .lock()
            .as_mut()
            .map(|model| model.on_frame_update(camera, environment))
    }

    // ------------------------------------------------------------------
    // Positioning
    // ------------------------------------------------------------------

    /// Record one anchor's ranging result.
    pub fn record_ranging(&self, anchor: &str, status: RangingStatus) -> bool {
        self.anchors.lock().record_ranging(anchor, status)
    }

    /// Drop an anchor that went out of range.
    pub fn forget_anchor(&self, anchor: &str) {
        self.anchors.lock().forget(anchor);
    }

    /// Solve from the latest recorded ranges and update guidance.
    pub fn locate(&self) -> std::result::Result<RangingOutcome, SolveError> {
        let observations = self.anchors.lock().observations();
        self.on_ranging(&observations)
    }

    /// Solve one ranging round and update guidance.
    ///
    /// On failure the previous location is kept and nothing is announced.
    pub fn on_ranging(
        &self,
        observations: &[AnchorObservation],
    ) -> std::result::Result<RangingOutcome, SolveError> {
        let location = self.solver.solve(observations)?;
        let announcement = self
            .navigation
            .lock()
            .on_location_update(location.x(), location.y());
        *self.last_location.lock() = Some(location.clone());

        Ok(RangingOutcome {
            location,
            announcement: self.announce(announcement),
        })
    }

    /// Most recent solved location.
    pub fn last_location(&self) -> Option<SolvedLocation> {
        self.last_location.lock().clone()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Plan a route and start guidance along it.
    pub fn start_navigation(&self, source: Point2D, destination: Point2D) -> Path {
        let path = self.route.route(source, destination);
        let announcement = {
            let mut navigation = self.navigation.lock();
            navigation.start(source, destination);
            navigation.set_path(&path)
        };
        self.announce(announcement);
        path
    }

    /// Start guidance from the last solved location to a named destination.
    ///
    /// Returns `None` if the destination is unknown or no location is known yet.
    pub fn navigate_to(&self, destination: &str) -> Option<Path> {
        let Some(target) = self
            .destinations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(destination))
            .map(Destination::position)
        else {
            warn!("Unknown destination '{}'", destination);
            return None;
        };
        let source = self.last_location()?.position;
        Some(self.start_navigation(source, target))
    }

    pub fn stop_navigation(&self) {
        self.navigation.lock().stop();
    }

    pub fn is_navigating(&self) -> bool {
        self.navigation.lock().is_navigating()
    }

    pub fn is_navigation_complete(&self) -> bool {
        self.navigation.lock().is_complete()
    }

    pub fn remaining_waypoints(&self) -> Vec<Point2D> {
        self.navigation.lock().remaining_waypoints()
    }

    /// End the session and release all state.
    pub fn end(self) {
        let complete = self.is_navigation_complete();
        info!("Tracking session ended (navigation complete: {})", complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corridor::PlaneRaycaster;
    use crate::navigation::AnnouncementKind;
    use crate::positioning::{AnchorSpec, DistanceUnit};
    use std::sync::mpsc;

    fn config() -> DishaConfig {
        let mut config = DishaConfig::default();
        config.positioning.distance_unit = DistanceUnit::Meters;
        config.positioning.anchors = vec![
            AnchorSpec::new("a", 0.0, 0.0),
            AnchorSpec::new("b", 30.0, 0.0),
            AnchorSpec::new("c", 0.0, 30.0),
        ];
        config
    }

    fn ranges_to(session: &TrackingSession, p: Point2D) {
        for (name, anchor) in [("a", (0.0, 0.0)), ("b", (30.0, 0.0)), ("c", (0.0, 30.0))] {
            let distance = Point2D::from(anchor).distance(&p);
            session.record_ranging(name, RangingStatus::Success { distance });
        }
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrackingSession>();
    }

    #[test]
    fn test_no_frame_before_floor() {
        let session = TrackingSession::new(&config()).unwrap();
        let camera = RigidPose::identity();
        assert!(session.on_frame(&camera, &PlaneRaycaster::horizontal(-1.5)).is_none());

        session.on_floor_detected(RigidPose::identity()).unwrap();
        assert!(session.has_floor());
        assert!(session.on_frame(&camera, &PlaneRaycaster::horizontal(-1.5)).is_some());
    }

    #[test]
    fn test_locate_needs_two_anchors() {
        let session = TrackingSession::new(&config()).unwrap();
        session.record_ranging("a", RangingStatus::Success { distance: 3.0 });
        assert!(matches!(
            session.locate(),
            Err(SolveError::InsufficientAnchors { found: 1, .. })
        ));
        assert!(session.last_location().is_none());
    }

    #[test]
    fn test_locate_updates_last_location() {
        let session = TrackingSession::new(&config()).unwrap();
        ranges_to(&session, Point2D::new(7.5, 12.0));
        let outcome = session.locate().unwrap();
        assert!(outcome.location.position.distance(&Point2D::new(7.5, 12.0)) < 1e-3);
        assert_eq!(outcome.announcement, None);
        assert!(session.last_location().is_some());
    }

    #[test]
    fn test_navigation_announcements_reach_announcer() {
        let (tx, rx) = mpsc::channel();
        let session = TrackingSession::new(&config()).unwrap().with_announcer(tx);

        let path = session.start_navigation(Point2D::new(7.5, 12.0), Point2D::new(7.5, 18.0));
        assert_eq!(path.points.len(), 2);
        assert_eq!(rx.try_recv().unwrap().kind, AnnouncementKind::RouteCalculated);

        ranges_to(&session, Point2D::new(7.5, 18.0));
        let outcome = session.locate().unwrap();
        assert_eq!(
            outcome.announcement.map(|a| a.kind),
            Some(AnnouncementKind::ReachedDestination)
        );
        assert_eq!(rx.try_recv().unwrap().kind, AnnouncementKind::ReachedDestination);
        assert!(session.is_navigation_complete());

        session.stop_navigation();
        assert!(!session.is_navigating());
        session.end();
    }

    #[test]
    fn test_navigate_to_named_destination() {
        let session = TrackingSession::new(&config()).unwrap();
        assert!(session.navigate_to("Sample").is_none());

        ranges_to(&session, Point2D::new(21.0, 10.0));
        session.locate().unwrap();
        let path = session.navigate_to("sample").unwrap();
        assert_eq!(path.points.len(), 4);
        assert!(session.navigate_to("nowhere").is_none());
    }
}
