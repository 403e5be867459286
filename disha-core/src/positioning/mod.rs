//! 2D positioning from ranging to fixed anchors.
//!
//! Ranging results are collected per anchor in an [`AnchorRegistry`], turned
//! into [`AnchorObservation`]s and solved by the [`MultilaterationSolver`].

mod anchors;
mod payload;
mod solver;
mod types;

pub use anchors::{AnchorRegistry, AnchorSpec, RangingStatus};
pub use payload::LocationPayload;
pub use solver::{MIN_ANCHORS, MultilaterationSolver, SolverConfig};
pub use types::{AnchorObservation, DistanceUnit, SolvedLocation, Uncertainty};
