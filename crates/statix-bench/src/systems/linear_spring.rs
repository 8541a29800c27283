//! Single linear spring with one DOF.

use faer::Mat;

use statix_solver::MechanicalSystem;

/// One DOF `x` tied to `rest` by a spring of stiffness `k`.
///
/// `U = ½ k (x − rest)²`, `E = k (x − rest)`, `K = [[−k]]`.
/// With `k = 10`, `rest = 0.5` this is `E(x) = 10x − 5`.
#[derive(Debug, Clone)]
pub struct LinearSpring {
    pub stiffness: f64,
    pub rest: f64,
    pub x: f64,
    residual: f64,
    energy: f64,
}

impl LinearSpring {
    pub fn new(stiffness: f64, rest: f64, x: f64) -> Self {
        Self {
            stiffness,
            rest,
            x,
            residual: 0.0,
            energy: 0.0,
        }
    }
}

impl Default for LinearSpring {
    fn default() -> Self {
        Self::new(10.0, 0.5, 0.0)
    }
}

impl MechanicalSystem for LinearSpring {
    fn n_dofs(&self) -> usize {
        1
    }

    fn get_dofs(&self) -> Vec<f64> {
        vec![self.x]
    }

    fn set_dofs(&mut self, dofs: &[f64]) {
        self.x = dofs[0];
    }

    fn change_dof(&mut self, _index: usize, delta: f64) {
        self.x += delta;
    }

    fn state_update_forces(&mut self) {
        let stretch = self.x - self.rest;
        self.residual = self.stiffness * stretch;
        self.energy = 0.5 * self.stiffness * stretch * stretch;
    }

    fn residual(&self) -> Vec<f64> {
        vec![self.residual]
    }

    fn stiffness(&self) -> Mat<f64> {
        Mat::from_fn(1, 1, |_, _| -self.stiffness)
    }

    fn energy(&self) -> f64 {
        self.energy
    }

    fn name(&self) -> &str {
        "linear_spring"
    }
}
