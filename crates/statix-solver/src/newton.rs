//! Newton step restricted to restrained DOFs.
//!
//! 1. **Select**: DOFs with a negative stiffness diagonal
//! 2. **Reduce**: gather `Kr`, `Er` over the selected DOFs
//! 3. **Solve**: dense LU on `Kr · y = Er`
//! 4. **Clamp**: rescale `y` so no component exceeds `step_limit`
//! 5. **Apply**: `change_dof` for every selected DOF
//!
//! DOFs with zero or positive diagonal stiffness have no meaningful
//! linearization; a Newton correction for them would be arbitrarily large.
//! They are left to the per-DOF refiner.

use thiserror::Error;

use statix_math::dense::{diagonal_indices, gather, inf_norm, principal_submatrix};
use statix_math::{DenseLuSolver, LinalgError};
use statix_types::StatixError;

use crate::config::SolverConfig;
use crate::system::{checked_residual, checked_stiffness, MechanicalSystem};

/// Why no Newton step could be produced.
#[derive(Debug, Error)]
pub enum StepError {
    /// No DOF qualifies for the reduced system. Recoverable.
    #[error("no DOF has a negative stiffness diagonal")]
    NoConstrainedDofs,

    /// Residual or energy is NaN or infinite at the current state. Recoverable.
    #[error("residual or energy is not finite")]
    NonFiniteState,

    /// The reduced system could not be solved. Recoverable.
    #[error("reduced Newton system is singular: {0}")]
    SingularReducedSystem(LinalgError),

    /// The system broke its interface contract. Fatal.
    #[error(transparent)]
    Contract(#[from] StatixError),
}

/// A Newton update over a subset of DOFs.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonStep {
    /// DOF indices, ascending.
    pub indices: Vec<usize>,
    /// Change for each entry of `indices`.
    pub deltas: Vec<f64>,
    /// Whether the raw solution was scaled down to the step limit.
    pub clamped: bool,
}

impl NewtonStep {
    /// Number of DOFs moved by this step.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the step moves no DOF.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Largest `|delta|`.
    pub fn max_abs_delta(&self) -> f64 {
        inf_norm(&self.deltas)
    }

    /// Adds `factor * delta` to every DOF of the step.
    pub fn apply_scaled<S: MechanicalSystem + ?Sized>(&self, system: &mut S, factor: f64) {
        for (&i, &d) in self.indices.iter().zip(&self.deltas) {
            system.change_dof(i, factor * d);
        }
    }
}

/// Uniformly rescale `y` so that `max |y_i| <= limit`.
///
/// Returns true if a rescale happened. The largest component ends up with
/// magnitude exactly `limit`.
pub fn clamp_step(y: &mut [f64], limit: f64) -> bool {
    let largest = inf_norm(y);
    if largest <= limit {
        return false;
    }
    for v in y.iter_mut() {
        *v = *v / largest * limit;
    }
    true
}

/// Computes the Newton step at the current state without applying it.
///
/// Re-evaluates forces first.
pub fn compute<S: MechanicalSystem + ?Sized>(
    system: &mut S,
    config: &SolverConfig,
) -> Result<NewtonStep, StepError> {
    system.state_update_forces();
    let residual = checked_residual(system)?;
    let stiffness = checked_stiffness(system)?;
    if residual.iter().any(|v| !v.is_finite()) || !system.energy().is_finite() {
        return Err(StepError::NonFiniteState);
    }

    let indices = diagonal_indices(&stiffness, |d| d < 0.0);
    if indices.is_empty() {
        return Err(StepError::NoConstrainedDofs);
    }

    let kr = principal_submatrix(&stiffness, &indices);
    let er = gather(&residual, &indices);

    let mut deltas = DenseLuSolver::solve_once(&kr, &er)
        .map_err(StepError::SingularReducedSystem)?;
    let clamped = clamp_step(&mut deltas, config.step_limit);

    Ok(NewtonStep {
        indices,
        deltas,
        clamped,
    })
}

/// Computes the Newton step and applies it to the system.
///
/// On error the system is left untouched (apart from a force update).
pub fn propose<S: MechanicalSystem + ?Sized>(
    system: &mut S,
    config: &SolverConfig,
) -> Result<NewtonStep, StepError> {
    let step = compute(system, config)?;
    step.apply_scaled(system, 1.0);
    tracing::trace!(
        dofs = step.len(),
        max_delta = step.max_abs_delta(),
        clamped = step.clamped,
        "newton_step_applied"
    );
    Ok(step)
}
