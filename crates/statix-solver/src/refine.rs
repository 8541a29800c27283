//! Per-DOF refinement: the fallback that keeps every iteration moving.
//!
//! Each DOF the Newton step did not move this iteration gets one call to
//! [`MechanicalSystem::improve_dof`]. That covers DOFs without restoring
//! stiffness, and every DOF when the Newton step is skipped or discarded.

use crate::system::MechanicalSystem;
use crate::trace::{SolveTrace, TraceEntry};

/// Applies `improve_dof` to the DOFs outside the last Newton step.
#[derive(Debug, Clone, Copy)]
pub struct PerDofRefiner {
    step: f64,
}

impl PerDofRefiner {
    /// Refiner that hands `step` to every `improve_dof` call.
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// Probe size passed to `improve_dof`.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Refine a single DOF.
    pub fn refine<S: MechanicalSystem + ?Sized>(&self, system: &mut S, dof: usize) {
        system.improve_dof(dof, self.step);
    }

    /// Refine every DOF not listed in `handled`, in ascending order.
    ///
    /// Returns the number of DOFs refined.
    pub fn refine_remaining<S: MechanicalSystem + ?Sized>(
        &self,
        system: &mut S,
        handled: &[usize],
        trace: &mut SolveTrace,
    ) -> usize {
        let n = system.n_dofs();
        let mut skip = vec![false; n];
        for &i in handled {
            if i < n {
                skip[i] = true;
            }
        }

        let mut refined = 0;
        for dof in (0..n).filter(|&i| !skip[i]) {
            self.refine(system, dof);
            trace.push(TraceEntry::DofRefined { dof });
            refined += 1;
        }
        refined
    }
}

/// Energy probe used as the default `improve_dof`.
///
/// Tries `+step`, then `-step`; keeps the first move that strictly lowers
/// the energy. If neither does, the DOF is restored. Forces are current
/// on return.
pub fn probe_dof<S: MechanicalSystem + ?Sized>(system: &mut S, index: usize, step: f64) {
    system.state_update_forces();
    let base = system.energy();

    system.change_dof(index, step);
    system.state_update_forces();
    if system.energy() < base {
        return;
    }

    system.change_dof(index, -2.0 * step);
    system.state_update_forces();
    if system.energy() < base {
        return;
    }

    system.change_dof(index, step);
    system.state_update_forces();
}
