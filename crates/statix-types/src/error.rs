//! Error types for the Statix solver.
//!
//! All crates return `StatixResult<T>` from fallible operations.
//! Expected numerical conditions (singular reduced systems, rejected
//! line searches, non-convergence) are *not* errors; they are reported
//! through solver outcomes and trace entries instead.

use thiserror::Error;

/// Unified error type for the Statix workspace.
#[derive(Debug, Error)]
pub enum StatixError {
    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A mechanical system returned data of the wrong shape.
    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Solver did not reach equilibrium within its budget.
    #[error("Solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    SolverDivergence {
        iterations: u32,
        residual: f64,
    },

    /// Dense linear algebra failure outside the recoverable Newton path.
    #[error("Linear algebra error: {0}")]
    LinearAlgebra(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, StatixError>`.
pub type StatixResult<T> = Result<T, StatixError>;
