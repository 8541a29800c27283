//! Dense LU solver backed by `faer`.
//!
//! Implements [`LinearSolver`] using faer's partial-pivoting LU
//! decomposition.
//!
//! ## Workflow
//! 1. `factorize(matrix)`: copies the matrix and computes `PA = LU`
//! 2. `solve(rhs, solution)`: forward/backward substitution, then a
//!    backward-error check that flags singular systems

use faer::Mat;
use faer::linalg::solvers::{PartialPivLu, Solve};

use crate::linear::{LinalgError, LinearSolver};

/// Relative backward error above which a solution is treated as singular.
const BACKWARD_ERROR_LIMIT: f64 = 1.0e-8;

/// Dense LU (partial pivoting) solver using `faer`.
///
/// Partial-pivoting LU never fails outright on a singular matrix; a zero
/// pivot shows up as `inf`/`NaN` in the solution instead. `solve` turns
/// that (and any solution whose residual is not small relative to the
/// data) into [`LinalgError::Singular`].
pub struct DenseLuSolver {
    /// Cached LU factorization.
    factorization: Option<PartialPivLu<f64>>,
    /// Copy of the factorized matrix, for the backward-error check.
    matrix: Mat<f64>,
    /// Matrix dimension (N×N).
    dimension: usize,
}

impl DenseLuSolver {
    /// Creates a new solver (unfactorized).
    pub fn new() -> Self {
        Self {
            factorization: None,
            matrix: Mat::zeros(0, 0),
            dimension: 0,
        }
    }

    /// Factorize and solve in one call.
    pub fn solve_once(matrix: &Mat<f64>, rhs: &[f64]) -> Result<Vec<f64>, LinalgError> {
        let mut solver = Self::new();
        solver.factorize(matrix)?;
        let mut solution = vec![0.0; rhs.len()];
        solver.solve(rhs, &mut solution)?;
        Ok(solution)
    }

    /// Matrix dimension of the current factorization.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for DenseLuSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearSolver for DenseLuSolver {
    fn factorize(&mut self, matrix: &Mat<f64>) -> Result<(), LinalgError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(LinalgError::NotSquare {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
            });
        }
        if matrix.nrows() == 0 {
            return Err(LinalgError::Empty);
        }

        self.dimension = matrix.nrows();
        self.matrix = matrix.clone();
        self.factorization = Some(matrix.partial_piv_lu());
        Ok(())
    }

    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> Result<(), LinalgError> {
        let lu = self
            .factorization
            .as_ref()
            .ok_or(LinalgError::NotFactorized)?;

        if rhs.len() != self.dimension {
            return Err(LinalgError::DimensionMismatch {
                what: "RHS",
                expected: self.dimension,
                actual: rhs.len(),
            });
        }
        if solution.len() != self.dimension {
            return Err(LinalgError::DimensionMismatch {
                what: "Solution",
                expected: self.dimension,
                actual: solution.len(),
            });
        }

        let rhs_col: Mat<f64> = Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);
        let sol = lu.solve(&rhs_col);

        for (i, x) in solution.iter_mut().enumerate() {
            *x = sol[(i, 0)];
        }

        if solution.iter().any(|x| !x.is_finite()) {
            return Err(LinalgError::Singular);
        }

        // ‖Ax − b‖ ≤ tol · (n ‖A‖ ‖x‖ + ‖b‖), entrywise max norms
        let residual = &(&self.matrix * &sol) - &rhs_col;
        let scale = self.dimension as f64 * self.matrix.norm_max() * sol.norm_max()
            + rhs_col.norm_max();
        let r = residual.norm_max();
        if !r.is_finite() || r > BACKWARD_ERROR_LIMIT * scale.max(f64::MIN_POSITIVE) {
            return Err(LinalgError::Singular);
        }

        Ok(())
    }

    fn is_factorized(&self) -> bool {
        self.factorization.is_some()
    }
}
