//! The mechanical system seen by the solver.
//!
//! The solver never touches physics directly. It reads forces, stiffness
//! and energy, and moves DOFs, only through this trait. Element assembly,
//! geometry and the meaning of each DOF stay on the implementor's side.

use faer::Mat;

use statix_types::{StatixError, StatixResult};

use crate::refine::probe_dof;

/// Numerical interface of a constrained mechanical system.
///
/// # Sign convention
///
/// `residual()` is the out-of-balance generalized force `E`, zero at
/// equilibrium. `stiffness()` is reported so that a restrained DOF has a
/// *negative* diagonal entry; the Newton update solves `K·y = E`. For a
/// potential `U`, `E = ∇U` and `K = −∇²U` satisfy this. A zero or positive
/// diagonal marks a DOF without restoring stiffness; the Newton step leaves
/// such DOFs to [`improve_dof`](Self::improve_dof).
///
/// # Call order
///
/// ```text
/// system.state_prepare();
/// loop {
///     system.state_update_forces();
///     let e = system.residual();
///     let k = system.stiffness();
///     let j = system.energy();
///     system.change_dof(i, delta);   // or set_dofs / improve_dof
/// }
/// ```
///
/// `residual`, `stiffness` and `energy` describe the state as of the last
/// `state_update_forces` call.
pub trait MechanicalSystem {
    /// Number of free DOFs. Must not change during a solve.
    fn n_dofs(&self) -> usize;

    /// Snapshot of the current DOF values.
    fn get_dofs(&self) -> Vec<f64>;

    /// Overwrite all DOF values. `dofs.len() == n_dofs()`.
    fn set_dofs(&mut self, dofs: &[f64]);

    /// Add `delta` to DOF `index`.
    fn change_dof(&mut self, index: usize, delta: f64);

    /// Internal bookkeeping refresh, called once before a solve.
    fn state_prepare(&mut self) {}

    /// Recompute residual, stiffness and energy from the current DOFs.
    fn state_update_forces(&mut self);

    /// Out-of-balance force per DOF.
    fn residual(&self) -> Vec<f64>;

    /// `n × n` stiffness, see the sign convention above.
    fn stiffness(&self) -> Mat<f64>;

    /// Scalar energy; only compared against itself.
    fn energy(&self) -> f64;

    /// One heuristic move away from a degenerate starting configuration.
    ///
    /// Called once at the start of a solve. The default does nothing.
    fn robust_step(&mut self) {}

    /// Local improvement of a single DOF.
    ///
    /// The default probes `+step` then `-step` and keeps the first move that
    /// strictly lowers the energy, restoring the DOF otherwise.
    fn improve_dof(&mut self, index: usize, step: f64) {
        probe_dof(self, index, step);
    }

    /// Returns the system's name for logging.
    fn name(&self) -> &str {
        "mechanical_system"
    }
}

/// Reads the residual and checks its length against `n_dofs()`.
pub(crate) fn checked_residual<S: MechanicalSystem + ?Sized>(
    system: &S,
) -> StatixResult<Vec<f64>> {
    let residual = system.residual();
    let n = system.n_dofs();
    if residual.len() != n {
        return Err(StatixError::DimensionMismatch {
            what: "residual",
            expected: n,
            actual: residual.len(),
        });
    }
    Ok(residual)
}

/// Reads the stiffness matrix and checks that it is `n_dofs() × n_dofs()`.
pub(crate) fn checked_stiffness<S: MechanicalSystem + ?Sized>(
    system: &S,
) -> StatixResult<Mat<f64>> {
    let k = system.stiffness();
    let n = system.n_dofs();
    if k.nrows() != n {
        return Err(StatixError::DimensionMismatch {
            what: "stiffness rows",
            expected: n,
            actual: k.nrows(),
        });
    }
    if k.ncols() != n {
        return Err(StatixError::DimensionMismatch {
            what: "stiffness columns",
            expected: n,
            actual: k.ncols(),
        });
    }
    Ok(k)
}
