//! Main DishaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corridor::CorridorConfig;
use crate::error::{ConfigError, ConfigLoadError};
use crate::positioning::{MultilaterationSolver, SolverConfig};

use super::map::MapSection;
use super::navigation::NavigationSection;
use super::positioning::PositioningSection;

/// Default config file looked up by [`DishaConfig::load_default`].
pub const DEFAULT_CONFIG_PATH: &str = "configs/disha.toml";

/// Full configuration loaded from TOML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct DishaConfig {
    /// Walking corridor dimensions
    #[serde(default)]
    pub corridor: CorridorConfig,

    /// Anchors and solver settings
    #[serde(default)]
    pub positioning: PositioningSection,

    /// Guidance settings
    #[serde(default)]
    pub navigation: NavigationSection,

    /// Map layout and routing
    #[serde(default)]
    pub map: MapSection,
}

impl DishaConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load from the default config path, falling back to built-in defaults
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML string
    pub fn from_toml(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, ConfigLoadError> {
        toml::to_string_pretty(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.corridor.validate()?;
        self.positioning.validate()?;
        self.navigation.validate()?;
        self.map.validate()
    }

    /// Get the solver config
    pub fn solver_config(&self) -> SolverConfig {
        self.positioning.to_solver_config()
    }

    /// Build a solver from the positioning section
    pub fn solver(&self) -> MultilaterationSolver {
        MultilaterationSolver::new(self.solver_config())
    }
}
