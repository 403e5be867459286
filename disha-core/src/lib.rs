//! # Disha-Core: Indoor AR Wayfinding Engine
//!
//! Geometry and numerics behind an indoor walking aid: a safe walking
//! corridor overlaid in front of the user, 2D positioning from ranging to
//! fixed anchors, and turn-by-turn guidance along a planned route.
//!
//! ## Features
//!
//! - **Walking corridor**: four surfaces re-anchored to the camera every
//!   frame, corner probes ray cast against the scanned environment and
//!   classified as safe, buffer or unsafe
//! - **Multilateration**: Levenberg-Marquardt position solve from two or more
//!   anchors, with covariance when the geometry allows it
//! - **Route planning**: two-turn detours around rows of obstacle boxes
//! - **Guidance**: each waypoint announced once, with turn direction from
//!   the path geometry
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use disha_core::config::DishaConfig;
//! use disha_core::core::{Point2D, RigidPose};
//! use disha_core::corridor::PlaneRaycaster;
//! use disha_core::positioning::RangingStatus;
//! use disha_core::TrackingSession;
//!
//! let config = DishaConfig::load_default()?;
//! let session = TrackingSession::new(&config)?;
//!
//! // AR tracking found the floor; probe the corridor for this frame
//! session.on_floor_detected(RigidPose::identity())?;
//! let camera = RigidPose::identity();
//! if let Some(frame) = session.on_frame(&camera, &PlaneRaycaster::horizontal(0.0)) {
//!     println!("corridor: {}", frame.result);
//! }
//!
//! // Ranging results arrive, solve and feed guidance
//! session.record_ranging("entrance", RangingStatus::Success { distance: 4200.0 });
//! session.record_ranging("stage", RangingStatus::Success { distance: 3100.0 });
//! if let Ok(outcome) = session.locate() {
//!     println!("at ({:.2}, {:.2})", outcome.location.x(), outcome.location.y());
//! }
//!
//! session.start_navigation(Point2D::new(7.5, 12.0), Point2D::new(21.5, 12.0));
//! # Ok::<(), disha_core::DishaError>(())
//! ```
//!
//! ## Coordinate Frames
//!
//! - **World (3D)**: right-handed, meters, Y-up, as delivered by AR tracking
//! - **Floor pose**: Y is the floor normal, X/Z span the plane
//! - **Camera pose**: Z is camera forward, X/Y lie in the screen plane
//! - **Map (2D)**: meters, y grows downward as on screen
//!
//! ## Architecture
//!
//! - [`core`]: Rigid poses, 2D points and small math helpers
//! - [`corridor`]: Corridor orientation, surfaces and hazard probing
//! - [`positioning`]: Anchor registry and multilateration solver
//! - [`navigation`]: Route providers and the guidance tracker
//! - [`config`]: TOML configuration
//! - [`session`]: Per-session context object shared across callback threads

pub mod config;
pub mod core;
pub mod corridor;
pub mod error;
pub mod navigation;
pub mod positioning;
pub mod session;

pub use config::DishaConfig;
pub use crate::core::{Point2D, RigidPose};
pub use corridor::{CorridorFrame, CorridorModel, RayCastResult};
pub use error::{ConfigError, ConfigLoadError, DishaError, PoseError, Result, SolveError};
pub use navigation::{Announcement, AnnouncementKind, NavigationTracker, Path, PathPlanner};
pub use positioning::{AnchorObservation, MultilaterationSolver, SolvedLocation, Uncertainty};
pub use session::{RangingOutcome, TrackingSession};
