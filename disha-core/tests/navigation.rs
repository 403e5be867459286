//! Navigation integration tests.
//!
//! A simulated walker follows the planned route while the session solves
//! its position from anchor ranges and announces each waypoint.

mod common;

use std::sync::mpsc;

use disha_core::config::{DishaConfig, MapKind};
use disha_core::positioning::RangingStatus;
use disha_core::{AnnouncementKind, Point2D, TrackingSession};

/// Feed exact ranges for `position` and solve.
fn range_and_locate(session: &TrackingSession, position: Point2D) -> Option<AnnouncementKind> {
    for anchor in common::hall_anchors() {
        let distance = anchor.position().distance(&position);
        session.record_ranging(&anchor.name, RangingStatus::Success { distance });
    }
    session
        .locate()
        .expect("four anchors always solve")
        .announcement
        .map(|a| a.kind)
}

fn walk_route(
    config: &DishaConfig,
    source: Point2D,
    destination: Point2D,
) -> Vec<AnnouncementKind> {
    let (tx, rx) = mpsc::channel();
    let session = TrackingSession::new(config).unwrap().with_announcer(tx);

    let path = session.start_navigation(source, destination);
    for position in common::walk(&path.points, 0.5) {
        range_and_locate(&session, position);
    }

    assert!(session.is_navigation_complete());
    assert!(session.remaining_waypoints().is_empty());
    session.end();

    rx.try_iter().map(|a| a.kind).collect()
}

#[test]
fn test_walk_across_booth_rows() {
    let config = common::hall_config();
    let kinds = walk_route(&config, Point2D::new(7.5, 12.0), Point2D::new(21.5, 12.0));

    // Up over the booths, across, back down: two right turns
    assert_eq!(
        kinds,
        vec![
            AnnouncementKind::RouteCalculated,
            AnnouncementKind::TurnRight,
            AnnouncementKind::TurnRight,
            AnnouncementKind::ReachedDestination,
        ]
    );
}

#[test]
fn test_walk_within_one_lane() {
    let config = common::hall_config();
    let kinds = walk_route(&config, Point2D::new(7.5, 5.0), Point2D::new(7.5, 25.0));
    assert_eq!(
        kinds,
        vec![AnnouncementKind::RouteCalculated, AnnouncementKind::ReachedDestination]
    );
}

#[test]
fn test_walk_fixed_route() {
    let mut config = common::hall_config();
    config.map.kind = MapKind::Fixed;

    let kinds = walk_route(&config, Point2D::new(33.2, 31.2), Point2D::new(15.5, 17.0));
    assert_eq!(kinds.first(), Some(&AnnouncementKind::RouteCalculated));
    assert_eq!(kinds.last(), Some(&AnnouncementKind::ReachedDestination));
    assert_eq!(kinds.len(), 4);
}

#[test]
fn test_route_announcement_is_delayed() {
    let (tx, rx) = mpsc::channel();
    let session = TrackingSession::new(&common::hall_config())
        .unwrap()
        .with_announcer(tx);

    session.start_navigation(Point2D::new(7.5, 12.0), Point2D::new(21.5, 12.0));
    let announcement = rx.try_recv().unwrap();
    assert_eq!(announcement.kind, AnnouncementKind::RouteCalculated);
    assert_eq!(announcement.delay.as_secs_f32(), 3.0);
    assert_eq!(announcement.waypoint, None);
}

#[test]
fn test_stop_silences_guidance() {
    let (tx, rx) = mpsc::channel();
    let session = TrackingSession::new(&common::hall_config())
        .unwrap()
        .with_announcer(tx);

    session.start_navigation(Point2D::new(7.5, 5.0), Point2D::new(7.5, 25.0));
    session.stop_navigation();
    assert_eq!(range_and_locate(&session, Point2D::new(7.5, 25.0)), None);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn test_navigate_to_destination_from_fix() {
    let session = TrackingSession::new(&common::hall_config()).unwrap();
    range_and_locate(&session, Point2D::new(28.5, 5.0));

    let path = session.navigate_to("Sample").unwrap();
    assert_eq!(path.destination(), Some(Point2D::new(7.5, 15.0)));
    assert!(session.is_navigating());
}
