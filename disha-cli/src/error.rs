//! Error types for the disha command line.

use disha_core::{ConfigError, ConfigLoadError, DishaError, SolveError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Disha(#[from] DishaError),

    #[error("{0}")]
    Config(#[from] ConfigLoadError),

    #[error("invalid map configuration: {0}")]
    Map(#[from] ConfigError),

    #[error("solve failed: {0}")]
    Solve(#[from] SolveError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
