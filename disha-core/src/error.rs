//! Error types for disha-core.

use thiserror::Error;

/// A matrix handed in as a pose is not a rigid transform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    #[error("pose matrix contains non-finite values")]
    NonFinite,

    #[error("pose matrix bottom row is not [0, 0, 0, 1]")]
    NotHomogeneous,

    #[error("rotation block is not orthonormal (max deviation {deviation:.4})")]
    NotOrthonormal { deviation: f32 },

    #[error("rotation block has determinant {determinant:.4}, expected +1")]
    NotProperRotation { determinant: f32 },
}

/// Multilateration could not be attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("insufficient anchors: {found} observation(s), at least {required} required")]
    InsufficientAnchors { found: usize, required: usize },

    #[error("invalid observation for anchor '{anchor_id}': {reason}")]
    InvalidObservation { anchor_id: String, reason: String },
}

/// Location payload could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("expected at least 2 comma-separated coordinates, got {0}")]
    MissingCoordinates(usize),

    #[error("coordinate '{0}' is not a number")]
    InvalidNumber(String),
}

/// Configuration values that fail validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must lie in [0, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        max: f32,
    },

    #[error("depth_offset {depth_offset} must lie in [0, depth) with depth {depth}")]
    DepthOffsetOutOfRange { depth_offset: f32, depth: f32 },

    #[error("obstacle boxes must be sorted by center_x without overlap (box {index})")]
    UnsortedBoxes { index: usize },

    #[error("duplicate anchor name '{0}'")]
    DuplicateAnchor(String),

    #[error("fixed route needs at least 2 points, got {0}")]
    FixedRouteTooShort(usize),
}

/// Configuration could not be loaded.
#[derive(Error, Debug, Clone)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum DishaError {
    #[error("Pose error: {0}")]
    Pose(#[from] PoseError),

    #[error("Solver error: {0}")]
    Solve(#[from] SolveError),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

impl From<ConfigError> for DishaError {
    fn from(e: ConfigError) -> Self {
        DishaError::Config(ConfigLoadError::Invalid(e))
    }
}

pub type Result<T> = std::result::Result<T, DishaError>;
