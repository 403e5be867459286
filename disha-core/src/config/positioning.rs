//! Positioning configuration section.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::positioning::{AnchorRegistry, AnchorSpec, DistanceUnit, SolverConfig};

use super::defaults;

/// Positioning configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositioningSection {
    /// Unit of distances reported by the ranging stack
    #[serde(default)]
    pub distance_unit: DistanceUnit,

    /// Unit of anchor coordinates
    #[serde(default = "defaults::coordinate_unit")]
    pub coordinate_unit: DistanceUnit,

    /// Solver iteration cap
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,

    /// Step length below which the solve has converged (meters)
    #[serde(default = "defaults::step_threshold")]
    pub step_threshold: f64,

    /// Gradient magnitude below which the solve has converged
    #[serde(default = "defaults::gradient_threshold")]
    pub gradient_threshold: f64,

    /// Initial LM damping
    #[serde(default = "defaults::lm_initial_lambda")]
    pub lm_initial_lambda: f64,

    /// LM damping scale factor
    #[serde(default = "defaults::lm_lambda_factor")]
    pub lm_lambda_factor: f64,

    /// LM damping floor
    #[serde(default = "defaults::lm_min_lambda")]
    pub lm_min_lambda: f64,

    /// LM damping ceiling
    #[serde(default = "defaults::lm_max_lambda")]
    pub lm_max_lambda: f64,

    /// Eigenvalue ratio of JᵀJ treated as singular
    #[serde(default = "defaults::min_eigenvalue_ratio")]
    pub min_eigenvalue_ratio: f64,

    /// Surveyed anchors
    #[serde(default)]
    pub anchors: Vec<AnchorSpec>,
}

impl Default for PositioningSection {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::default(),
            coordinate_unit: defaults::coordinate_unit(),
            max_iterations: defaults::max_iterations(),
            step_threshold: defaults::step_threshold(),
            gradient_threshold: defaults::gradient_threshold(),
            lm_initial_lambda: defaults::lm_initial_lambda(),
            lm_lambda_factor: defaults::lm_lambda_factor(),
            lm_min_lambda: defaults::lm_min_lambda(),
            lm_max_lambda: defaults::lm_max_lambda(),
            min_eigenvalue_ratio: defaults::min_eigenvalue_ratio(),
            anchors: Vec::new(),
        }
    }
}

impl PositioningSection {
    /// Convert to the solver's runtime config
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig {
            distance_unit: self.distance_unit,
            coordinate_unit: self.coordinate_unit,
            max_iterations: self.max_iterations,
            step_threshold: self.step_threshold,
            gradient_threshold: self.gradient_threshold,
            lm_initial_lambda: self.lm_initial_lambda,
            lm_lambda_factor: self.lm_lambda_factor,
            lm_min_lambda: self.lm_min_lambda,
            lm_max_lambda: self.lm_max_lambda,
            min_eigenvalue_ratio: self.min_eigenvalue_ratio,
        }
    }

    /// Registry of the configured anchors
    pub fn anchor_registry(&self) -> Result<AnchorRegistry, ConfigError> {
        AnchorRegistry::new(self.anchors.iter().cloned())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::NonPositive {
                name: "positioning.max_iterations",
                value: 0.0,
            });
        }
        for (name, value) in [
            ("positioning.lm_lambda_factor", self.lm_lambda_factor),
            ("positioning.lm_max_lambda", self.lm_max_lambda),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive {
                    name,
                    value: value as f32,
                });
            }
        }
        self.anchor_registry().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_solver() {
        let section = PositioningSection::default();
        assert_eq!(section.to_solver_config(), SolverConfig::default());
    }

    #[test]
    fn test_duplicate_anchor_fails_validation() {
        let section = PositioningSection {
            anchors: vec![AnchorSpec::new("a", 0.0, 0.0), AnchorSpec::new("a", 1.0, 0.0)],
            ..Default::default()
        };
        assert_eq!(section.validate(), Err(ConfigError::DuplicateAnchor("a".into())));
    }
}
