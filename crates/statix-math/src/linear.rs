//! Linear solver interface.
//!
//! The Newton step only ever needs "factorize once, solve once" on a
//! small dense system, but the trait keeps the backend swappable.

use faer::Mat;
use thiserror::Error;

use statix_types::StatixError;

/// Failure modes of a dense linear solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("cannot factorize an empty matrix")]
    Empty,

    #[error("solver not factorized; call factorize() first")]
    NotFactorized,

    #[error("{what} length ({actual}) != matrix dimension ({expected})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The factorization produced a non-finite or inaccurate solution.
    #[error("matrix is singular to working precision")]
    Singular,
}

impl From<LinalgError> for StatixError {
    fn from(e: LinalgError) -> Self {
        StatixError::LinearAlgebra(e.to_string())
    }
}

/// Trait for dense square linear solvers.
pub trait LinearSolver {
    /// Factorize the matrix. Call once per system.
    fn factorize(&mut self, matrix: &Mat<f64>) -> Result<(), LinalgError>;

    /// Solve `A x = b` using the stored factorization.
    /// Writes `x` into `solution`.
    fn solve(&self, rhs: &[f64], solution: &mut [f64]) -> Result<(), LinalgError>;

    /// Returns true if the solver holds a valid factorization.
    fn is_factorized(&self) -> bool;
}
