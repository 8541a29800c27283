//! A load with nothing to resist it.

use faer::Mat;

use statix_solver::MechanicalSystem;

/// DOFs under a constant load `f` and no stiffness: `U = f · Σ x_i`.
///
/// The residual is `f` everywhere, forever. Used to exercise the
/// iteration and time budgets.
#[derive(Debug, Clone)]
pub struct RunawayLoad {
    pub load: f64,
    pub x: Vec<f64>,
}

impl RunawayLoad {
    pub fn new(n_dofs: usize, load: f64) -> Self {
        Self {
            load,
            x: vec![0.0; n_dofs],
        }
    }
}

impl MechanicalSystem for RunawayLoad {
    fn n_dofs(&self) -> usize {
        self.x.len()
    }

    fn get_dofs(&self) -> Vec<f64> {
        self.x.clone()
    }

    fn set_dofs(&mut self, dofs: &[f64]) {
        self.x.copy_from_slice(dofs);
    }

    fn change_dof(&mut self, index: usize, delta: f64) {
        self.x[index] += delta;
    }

    fn state_update_forces(&mut self) {}

    fn residual(&self) -> Vec<f64> {
        vec![self.load; self.x.len()]
    }

    fn stiffness(&self) -> Mat<f64> {
        Mat::zeros(self.x.len(), self.x.len())
    }

    fn energy(&self) -> f64 {
        self.load * self.x.iter().sum::<f64>()
    }

    fn name(&self) -> &str {
        "runaway_load"
    }
}
