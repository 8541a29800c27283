//! Solver configuration.
//!
//! Parameters that control the hybrid loop: iteration budget,
//! convergence tolerance, Newton step clamp, line-search schedule
//! and the per-DOF refinement perturbation.

use serde::{Deserialize, Serialize};

use statix_types::constants;
use statix_types::{StatixError, StatixResult};

/// Configuration for the hybrid equilibrium solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum outer iterations before giving up.
    pub max_iterations: u32,

    /// Convergence tolerance on the residual infinity norm.
    /// Solver stops when `max |E_i| < tolerance`.
    pub tolerance: f64,

    /// Slack added to the reference energy. A Newton step is rejected
    /// only if it raises the energy above `J + energy_tolerance`.
    pub energy_tolerance: f64,

    /// Largest allowed single-iteration change of any DOF from the Newton step.
    pub step_limit: f64,

    /// Perturbation handed to `improve_dof` for DOFs the Newton step did not move.
    pub refine_step: f64,

    /// First step fraction tried once a full Newton step is rejected.
    pub backtrack_initial: f64,

    /// Factor applied to the step fraction after each failed retry.
    pub backtrack_shrink: f64,

    /// The line search gives up once the step fraction drops below this.
    pub backtrack_min_factor: f64,

    /// Whether to take the system's robust step before Newton iteration.
    pub use_robust_step: bool,

    /// Optional wall-clock budget (seconds), checked once per outer iteration.
    pub timeout_s: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: constants::DEFAULT_MAX_ITERATIONS,
            tolerance: constants::DEFAULT_TOLERANCE,
            energy_tolerance: constants::DEFAULT_ENERGY_TOLERANCE,
            step_limit: constants::DEFAULT_STEP_LIMIT,
            refine_step: constants::DEFAULT_REFINE_STEP,
            backtrack_initial: constants::DEFAULT_BACKTRACK_INITIAL,
            backtrack_shrink: constants::DEFAULT_BACKTRACK_SHRINK,
            backtrack_min_factor: constants::DEFAULT_BACKTRACK_MIN_FACTOR,
            use_robust_step: true,
            timeout_s: None,
        }
    }
}

impl SolverConfig {
    /// Creates a config for debugging (few iterations, default tolerance).
    pub fn debug() -> Self {
        Self {
            max_iterations: 5,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (more iterations, tighter tolerance).
    pub fn high_quality() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            ..Default::default()
        }
    }

    /// Step fractions the line search will try, in order.
    ///
    /// With the defaults this is `[0.5, 0.25, 0.125]`.
    pub fn backtrack_factors(&self) -> Vec<f64> {
        let mut factors = Vec::new();
        let mut f = self.backtrack_initial;
        while f >= self.backtrack_min_factor {
            factors.push(f);
            f *= self.backtrack_shrink;
        }
        factors
    }

    /// Checks that every value is in range and that the line search terminates.
    pub fn validate(&self) -> StatixResult<()> {
        fn positive(name: &str, v: f64) -> StatixResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(StatixError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {v}"
                )))
            }
        }

        if self.max_iterations == 0 {
            return Err(StatixError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        positive("tolerance", self.tolerance)?;
        positive("step_limit", self.step_limit)?;
        positive("refine_step", self.refine_step)?;
        positive("backtrack_min_factor", self.backtrack_min_factor)?;

        if !(self.energy_tolerance.is_finite() && self.energy_tolerance >= 0.0) {
            return Err(StatixError::InvalidConfig(format!(
                "energy_tolerance must be non-negative, got {}",
                self.energy_tolerance
            )));
        }
        if !(self.backtrack_initial > 0.0 && self.backtrack_initial < 1.0) {
            return Err(StatixError::InvalidConfig(format!(
                "backtrack_initial must lie in (0, 1), got {}",
                self.backtrack_initial
            )));
        }
        if !(self.backtrack_shrink > 0.0 && self.backtrack_shrink < 1.0) {
            return Err(StatixError::InvalidConfig(format!(
                "backtrack_shrink must lie in (0, 1), got {}",
                self.backtrack_shrink
            )));
        }
        if self.backtrack_min_factor > self.backtrack_initial {
            return Err(StatixError::InvalidConfig(format!(
                "backtrack_min_factor ({}) exceeds backtrack_initial ({})",
                self.backtrack_min_factor, self.backtrack_initial
            )));
        }
        if let Some(t) = self.timeout_s {
            if !(t.is_finite() && t >= 0.0) {
                return Err(StatixError::InvalidConfig(format!(
                    "timeout_s must be non-negative, got {t}"
                )));
            }
        }
        Ok(())
    }
}
