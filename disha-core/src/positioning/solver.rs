//! Levenberg-Marquardt multilateration.
//!
//! Minimizes `Σ (‖p − aᵢ‖ − dᵢ)²` over the 2D position `p`. Everything is
//! converted to meters and solved in `f64`; output is meters.
//!
//! # Algorithm
//!
//! 1. Start from the centroid of the anchors.
//! 2. Build `H = JᵀJ` and `g = Jᵀr` with Jacobian rows `(p − aᵢ) / ‖p − aᵢ‖`.
//! 3. Solve `(H + λI)·δ = −g`; accept the step if the cost drops.
//! 4. Adapt λ from the ratio of actual to predicted reduction.
//! 5. Stop on a small gradient, a small step or the iteration cap.
//!
//! Confidence is `(JᵀJ)⁻¹` at the solution. Near-collinear anchors make
//! `JᵀJ` singular; the position is still returned with the confidence marked
//! unavailable.

use log::{debug, warn};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use super::types::{AnchorObservation, DistanceUnit, SolvedLocation, Uncertainty};
use crate::core::Point2D;
use crate::core::math::sq;
use crate::error::SolveError;

/// Fewest observations a 2D solve accepts.
pub const MIN_ANCHORS: usize = 2;

/// Configuration for the multilateration solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Unit of measured distances.
    /// Default: millimeters
    pub distance_unit: DistanceUnit,

    /// Unit of anchor coordinates.
    /// Default: meters
    pub coordinate_unit: DistanceUnit,

    /// Maximum number of iterations.
    /// Default: 100
    pub max_iterations: usize,

    /// Stop when the step is shorter than this (meters).
    /// Default: 1e-9
    pub step_threshold: f64,

    /// Stop when every gradient component is below this.
    /// Default: 1e-12
    pub gradient_threshold: f64,

    /// Initial LM damping factor (λ).
    /// Default: 0.001
    pub lm_initial_lambda: f64,

    /// Factor to scale λ up (on bad step) or down (on good step).
    /// Default: 10.0
    pub lm_lambda_factor: f64,

    /// Minimum λ value.
    /// Default: 1e-7
    pub lm_min_lambda: f64,

    /// Maximum λ value; reaching it ends the solve.
    /// Default: 1e7
    pub lm_max_lambda: f64,

    /// Smallest/largest eigenvalue ratio of `JᵀJ` below which the geometry
    /// is treated as singular.
    /// Default: 1e-9
    pub min_eigenvalue_ratio: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Millimeters,
            coordinate_unit: DistanceUnit::Meters,
            max_iterations: 100,
            step_threshold: 1e-9,
            gradient_threshold: 1e-12,
            lm_initial_lambda: 1e-3,
            lm_lambda_factor: 10.0,
            lm_min_lambda: 1e-7,
            lm_max_lambda: 1e7,
            min_eigenvalue_ratio: 1e-9,
        }
    }
}

impl SolverConfig {
    /// Builder-style setter for the distance unit.
    pub fn with_distance_unit(mut self, unit: DistanceUnit) -> Self {
        self.distance_unit = unit;
        self
    }

    /// Builder-style setter for the coordinate unit.
    pub fn with_coordinate_unit(mut self, unit: DistanceUnit) -> Self {
        self.coordinate_unit = unit;
        self
    }

    /// Builder-style setter for maximum iterations.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }
}

/// Damping schedule for the LM iteration.
struct AdaptiveLm {
    lambda: f64,
    factor: f64,
    min: f64,
    max: f64,
}

impl AdaptiveLm {
    fn new(config: &SolverConfig) -> Self {
        Self {
            lambda: config.lm_initial_lambda,
            factor: config.lm_lambda_factor,
            min: config.lm_min_lambda,
            max: config.lm_max_lambda,
        }
    }

    fn damping(&self) -> f64 {
        self.lambda
    }

    /// `rho` is actual over predicted cost reduction.
    fn update(&mut self, rho: f64) {
        if rho > 0.75 {
            self.lambda = (self.lambda / self.factor).max(self.min);
        } else if rho > 0.25 {
            self.lambda = (self.lambda / self.factor.sqrt()).max(self.min);
        } else if rho < 0.0 {
            self.reject_step();
        }
    }

    fn reject_step(&mut self) {
        self.lambda = (self.lambda * self.factor).min(self.max);
    }

    fn is_stuck(&self) -> bool {
        self.lambda >= self.max * 0.99
    }
}

/// An observation converted to meters.
#[derive(Clone, Copy, Debug)]
struct Range {
    anchor: Vector2<f64>,
    distance: f64,
}

/// Normal equations at `p`: `(JᵀJ, Jᵀr, Σr²)`.
fn normal_equations(ranges: &[Range], p: &Vector2<f64>) -> (Matrix2<f64>, Vector2<f64>, f64) {
    let mut h = Matrix2::zeros();
    let mut g = Vector2::zeros();
    let mut cost = 0.0;

    for range in ranges {
        let diff = p - range.anchor;
        let norm = diff.norm();
        let residual = norm - range.distance;
        // Jacobian row is undefined on top of an anchor; leave it zero
        let row = if norm > f64::EPSILON {
            diff / norm
        } else {
            Vector2::zeros()
        };
        h += row * row.transpose();
        g += row * residual;
        cost += sq(residual);
    }

    (h, g, cost)
}

fn cost_at(ranges: &[Range], p: &Vector2<f64>) -> f64 {
    ranges
        .iter()
        .map(|r| sq((p - r.anchor).norm() - r.distance))
        .sum()
}

/// Multilateration solver for 2D positions.
#[derive(Clone, Debug, Default)]
pub struct MultilaterationSolver {
    config: SolverConfig,
}

impl MultilaterationSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the position best matching `observations`.
    ///
    /// # Errors
    /// - [`SolveError::InsufficientAnchors`] with fewer than two observations;
    ///   no solve is attempted.
    /// - [`SolveError::InvalidObservation`] for a non-finite coordinate or a
    ///   negative or non-finite distance.
    pub fn solve(&self, observations: &[AnchorObservation]) -> Result<SolvedLocation, SolveError> {
        if observations.len() < MIN_ANCHORS {
            warn!(
                "Multilateration skipped: {} anchor(s), need {}",
                observations.len(),
                MIN_ANCHORS
            );
            return Err(SolveError::InsufficientAnchors {
                found: observations.len(),
                required: MIN_ANCHORS,
            });
        }

        let ranges = self.to_ranges(observations)?;

        let centroid = ranges.iter().map(|r| r.anchor).sum::<Vector2<f64>>() / ranges.len() as f64;
        let mut p = centroid;
        let mut lm = AdaptiveLm::new(&self.config);
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..self.config.max_iterations {
            iterations = iter + 1;

            let (h, g, cost) = normal_equations(&ranges, &p);
            if g.amax() < self.config.gradient_threshold {
                converged = true;
                break;
            }

            let damped = h + Matrix2::identity() * lm.damping();
            let Some(step) = damped.cholesky().map(|c| -c.solve(&g)) else {
                lm.reject_step();
                if lm.is_stuck() {
                    break;
                }
                continue;
            };

            let candidate = p + step;
            let new_cost = cost_at(&ranges, &candidate);
            // Quadratic model: cost(p + δ) ≈ cost + 2gᵀδ + δᵀHδ
            let predicted = -(2.0 * g.dot(&step) + step.dot(&(h * step)));
            let rho = if predicted > 0.0 {
                (cost - new_cost) / predicted
            } else {
                -1.0
            };

            if new_cost < cost {
                p = candidate;
                lm.update(rho.max(0.0));
                if step.norm() < self.config.step_threshold {
                    converged = true;
                    break;
                }
            } else {
                lm.reject_step();
                if lm.is_stuck() {
                    // No damping produces a descent: already at a minimum
                    converged = g.amax() < self.config.gradient_threshold.sqrt();
                    break;
                }
            }
        }

        let (h, _, cost) = normal_equations(&ranges, &p);
        let rms_residual = (cost / ranges.len() as f64).sqrt();
        let uncertainty = self.uncertainty(&h);

        debug!(
            "Multilateration: {} anchors, {} iterations, converged={}, rms={:.4}m",
            ranges.len(),
            iterations,
            converged,
            rms_residual
        );
        if let Uncertainty::Unavailable { reason } = &uncertainty {
            warn!("Location confidence unavailable: {}", reason);
        }

        Ok(SolvedLocation {
            position: Point2D::new(p.x as f32, p.y as f32),
            anchor_count: ranges.len(),
            iterations,
            converged,
            rms_residual: rms_residual as f32,
            uncertainty,
        })
    }

    fn to_ranges(&self, observations: &[AnchorObservation]) -> Result<Vec<Range>, SolveError> {
        observations
            .iter()
            .map(|obs| {
                if !obs.position.is_finite() {
                    return Err(SolveError::InvalidObservation {
                        anchor_id: obs.anchor_id.clone(),
                        reason: "anchor position is not finite".to_string(),
                    });
                }
                if !(obs.measured_distance.is_finite() && obs.measured_distance >= 0.0) {
                    return Err(SolveError::InvalidObservation {
                        anchor_id: obs.anchor_id.clone(),
                        reason: format!("distance {} is not a valid range", obs.measured_distance),
                    });
                }
                let coordinate = self.config.coordinate_unit;
                Ok(Range {
                    anchor: Vector2::new(
                        coordinate.to_meters(obs.position.x as f64),
                        coordinate.to_meters(obs.position.y as f64),
                    ),
                    distance: self.config.distance_unit.to_meters(obs.measured_distance as f64),
                })
            })
            .collect()
    }

    fn uncertainty(&self, h: &Matrix2<f64>) -> Uncertainty {
        let eigenvalues = h.symmetric_eigenvalues();
        let (min_eig, max_eig) = (eigenvalues.min(), eigenvalues.max());
        if max_eig <= 0.0 || min_eig <= self.config.min_eigenvalue_ratio * max_eig {
            return Uncertainty::Unavailable {
                reason: format!(
                    "ill-conditioned anchor geometry (eigenvalues {:.3e}, {:.3e})",
                    min_eig, max_eig
                ),
            };
        }
        match h.try_inverse() {
            Some(covariance) => Uncertainty::Available {
                std_dev: Vector2::new(covariance[(0, 0)].sqrt(), covariance[(1, 1)].sqrt()),
                covariance,
            },
            None => Uncertainty::Unavailable {
                reason: "normal matrix is singular".to_string(),
            },
        }
    }
}
